//! # Function-backed subscriber (`SubscriberFn`)
//!
//! [`SubscriberFn`] wraps a closure `F: Fn(&E)` so small handlers do not need a
//! dedicated type.
//!
//! ## Example
//! ```rust
//! use typebus::{SubscriberFn, SubscriberRef, SyncBus};
//!
//! struct Tick(u64);
//!
//! let bus = SyncBus::default();
//! let printer = SubscriberFn::arc("printer", |t: &Tick| println!("tick {}", t.0));
//! bus.subscribe(SubscriberRef::shared(printer)).unwrap().publish(Tick(1));
//! ```

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::events::Event;
use crate::subscribers::Subscribe;

/// Closure-backed subscriber for shape `E`.
pub struct SubscriberFn<E, F> {
    name: &'static str,
    f: F,
    _shape: PhantomData<fn(&E)>,
}

impl<E, F> SubscriberFn<E, F>
where
    E: Event,
    F: Fn(&E) + Send + Sync + 'static,
{
    /// Creates a new function-backed subscriber.
    ///
    /// Prefer [`SubscriberFn::arc`] when the result goes straight into
    /// [`SubscriberRef::shared`](crate::SubscriberRef::shared).
    pub fn new(name: &'static str, f: F) -> Self {
        Self {
            name,
            f,
            _shape: PhantomData,
        }
    }

    /// Creates the subscriber behind an `Arc`.
    pub fn arc(name: &'static str, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }
}

impl<E, F> Subscribe<E> for SubscriberFn<E, F>
where
    E: Event,
    F: Fn(&E) + Send + Sync + 'static,
{
    fn on_event(&self, event: &E) {
        (self.f)(event)
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

impl<E, F> fmt::Debug for SubscriberFn<E, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriberFn")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
