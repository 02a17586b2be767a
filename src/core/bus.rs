//! # Event bus (dispatcher).
//!
//! [`Bus`] composes one [`Registry`] with one delivery strategy `D`, fixed at
//! construction.
//!
//! ## Flow
//! ```text
//! subscribe(handle)   ──► Registry::subscribe      ──► Ok(&bus) | Err(AlreadySubscribed)
//! unsubscribe(handle) ──► Registry::unsubscribe    ──► &bus
//! publish(ev)         ──► Registry::snapshot::<E>() ──► D::deliver(ev, snapshot) ──► &bus
//! ```
//!
//! Every operation returns `&Self`, so calls chain:
//!
//! ```rust
//! use typebus::{SubscriberFn, SubscriberRef, SyncBus};
//!
//! struct Ping;
//!
//! let bus = SyncBus::default();
//! let log = SubscriberRef::shared(SubscriberFn::arc("log", |_: &Ping| println!("ping")));
//!
//! bus.subscribe(log.clone())?
//!     .publish(Ping)
//!     .publish(Ping)
//!     .unsubscribe(&log);
//! # Ok::<(), typebus::BusError>(())
//! ```

use std::any::type_name;
use std::fmt;
use std::sync::Arc;

use super::{BusBuilder, Config, Registry};
use crate::delivery::{Deliver, SyncDelivery};
use crate::error::BusError;
use crate::events::{Event, ShapeKey};
use crate::subscribers::SubscriberRef;

#[cfg(feature = "concurrent")]
use crate::delivery::ConcurrentDelivery;

/// Type-indexed publish/subscribe dispatcher.
///
/// `Bus` is `Send + Sync`; share it through `Arc` to subscribe and publish
/// from several threads.
pub struct Bus<D: Deliver = SyncDelivery> {
    registry: Registry,
    delivery: D,
}

/// Bus that delivers on the publisher's thread, in order.
pub type SyncBus = Bus<SyncDelivery>;

/// Bus that delivers fire-and-forget on a tokio runtime.
#[cfg(feature = "concurrent")]
pub type ConcurrentBus = Bus<ConcurrentDelivery>;

impl Bus<SyncDelivery> {
    /// Starts building a bus from `cfg`.
    pub fn builder(cfg: Config) -> BusBuilder {
        BusBuilder::new(cfg)
    }
}

impl<D: Deliver> Bus<D> {
    /// Creates a bus with an empty registry that delivers through `delivery`.
    pub fn new(delivery: D) -> Self {
        Self {
            registry: Registry::new(),
            delivery,
        }
    }

    /// Registers `subscriber` for events of shape `E`.
    ///
    /// # Errors
    /// [`BusError::AlreadySubscribed`] if the same subscriber object is already
    /// registered for `E`. The registry is unchanged in that case.
    pub fn subscribe<E: Event>(&self, subscriber: SubscriberRef<E>) -> Result<&Self, BusError> {
        self.registry.subscribe(subscriber)?;
        Ok(self)
    }

    /// Removes `subscriber` from shape `E`. A no-op if it is not registered.
    ///
    /// Deliveries already scheduled by a concurrent strategy may still reach
    /// the subscriber after this returns.
    pub fn unsubscribe<E: Event>(&self, subscriber: &SubscriberRef<E>) -> &Self {
        self.registry.unsubscribe(subscriber);
        self
    }

    /// Publishes `event` to every subscriber of shape `E`.
    ///
    /// Publishing a shape without subscribers does nothing.
    pub fn publish<E: Event>(&self, event: E) -> &Self {
        self.publish_arc(Arc::new(event))
    }

    /// Publishes a pre-allocated `Arc<E>`.
    ///
    /// Preferred over [`publish`](Self::publish) when the caller already
    /// shares the event.
    pub fn publish_arc<E: Event>(&self, event: Arc<E>) -> &Self {
        let subscribers = self.registry.snapshot::<E>();
        tracing::trace!(
            event = type_name::<E>(),
            subscribers = subscribers.len(),
            "publish"
        );
        self.delivery.deliver(event, subscribers);
        self
    }

    /// Publishes a borrowed event by cloning it.
    ///
    /// Shorthand for `publish(ev.clone())`.
    pub fn publish_ref<E: Event + Clone>(&self, event: &E) -> &Self {
        self.publish(event.clone())
    }

    /// Number of subscribers registered for shape `E`.
    pub fn subscriber_count<E: Event>(&self) -> usize {
        self.registry.len::<E>()
    }

    /// True if `subscriber` is registered for shape `E`.
    pub fn is_subscribed<E: Event>(&self, subscriber: &SubscriberRef<E>) -> bool {
        self.registry.contains(subscriber)
    }

    /// Every event shape this bus has seen so far.
    pub fn shapes(&self) -> Vec<ShapeKey> {
        self.registry.shapes()
    }

    /// The delivery strategy.
    pub fn delivery(&self) -> &D {
        &self.delivery
    }
}

impl Default for SyncBus {
    fn default() -> Self {
        Self::new(SyncDelivery::default())
    }
}

impl<D: Deliver + fmt::Debug> fmt::Debug for Bus<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bus")
            .field("registry", &self.registry)
            .field("delivery", &self.delivery)
            .finish()
    }
}
