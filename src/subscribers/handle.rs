//! # Subscriber handles.
//!
//! A [`SubscriberRef`] is what the bus stores for each registration. It fixes
//! one of two ownership modes at registration time:
//!
//! | Mode       | Constructor                    | Who keeps the subscriber alive        |
//! |------------|--------------------------------|---------------------------------------|
//! | `Borrowed` | [`SubscriberRef::borrowed`]    | the caller; the referent is `'static` |
//! | `Shared`   | [`SubscriberRef::shared`]      | every `Arc` holder, the bus included  |
//!
//! The two modes are never converted into each other.
//!
//! ## Identity
//! Duplicate detection and removal compare [`SubscriberId`]s: the address of the
//! underlying subscriber object, not the handle. A borrowed handle and a shared
//! handle that point at the same object are the same subscriber.
//!
//! Addresses can alias across distinct objects, and borrowed handles are where
//! it shows:
//! - zero-sized subscribers share one address, so two distinct borrowed
//!   instances of a zero-sized type compare equal;
//! - a borrowed subscriber and a subscriber stored at offset 0 inside it
//!   (`&OUTER` and `&OUTER.inner`, both implementing `Subscribe<E>`) compare
//!   equal, and registering the second one is rejected as a duplicate.
//!
//! Give zero-sized subscribers a field and avoid registering a subscriber
//! together with its own first field under one shape, or use shared handles
//! (every `Arc` allocation has its own address).

use std::fmt;
use std::sync::Arc;

use crate::events::Event;
use crate::subscribers::Subscribe;

/// Identity of a subscriber object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriberId(usize);

impl SubscriberId {
    fn of<T: ?Sized>(ptr: *const T) -> Self {
        Self(ptr.cast::<()>() as usize)
    }
}

/// Ownership mode of a [`SubscriberRef`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ownership {
    /// Non-owning `'static` reference; the caller owns the subscriber.
    Borrowed,
    /// Shared ownership through `Arc`.
    Shared,
}

enum Target<E: Event> {
    Borrowed(&'static dyn Subscribe<E>),
    Shared(Arc<dyn Subscribe<E>>),
}

/// Registered reference to a subscriber of shape `E`.
///
/// Cloning a handle is cheap and keeps its identity.
pub struct SubscriberRef<E: Event> {
    target: Target<E>,
}

impl<E: Event> SubscriberRef<E> {
    /// Externally owned subscriber.
    ///
    /// The `'static` bound carries the caller's lifetime obligation: the
    /// subscriber must outlive every use by the bus, including concurrent
    /// deliveries still in flight after `unsubscribe`. Typical sources are a
    /// `static` item or `Box::leak`.
    pub fn borrowed<S: Subscribe<E>>(subscriber: &'static S) -> Self {
        Self {
            target: Target::Borrowed(subscriber),
        }
    }

    /// Subscriber kept alive by shared ownership; the bus holds its own clone.
    pub fn shared<S: Subscribe<E>>(subscriber: Arc<S>) -> Self {
        Self {
            target: Target::Shared(subscriber),
        }
    }

    /// Same as [`SubscriberRef::shared`], for an already type-erased `Arc`.
    pub fn from_dyn(subscriber: Arc<dyn Subscribe<E>>) -> Self {
        Self {
            target: Target::Shared(subscriber),
        }
    }

    /// Identity of the underlying subscriber object.
    pub fn id(&self) -> SubscriberId {
        match &self.target {
            Target::Borrowed(s) => SubscriberId::of(*s as *const dyn Subscribe<E>),
            Target::Shared(s) => SubscriberId::of(Arc::as_ptr(s)),
        }
    }

    /// Ownership mode chosen at construction.
    pub fn ownership(&self) -> Ownership {
        match self.target {
            Target::Borrowed(_) => Ownership::Borrowed,
            Target::Shared(_) => Ownership::Shared,
        }
    }

    /// Subscriber name, see [`Subscribe::name`].
    pub fn name(&self) -> &'static str {
        self.subscriber().name()
    }

    /// True if both handles refer to the same subscriber object.
    pub fn same_subscriber(&self, other: &Self) -> bool {
        self.id() == other.id()
    }

    pub(crate) fn on_event(&self, event: &E) {
        self.subscriber().on_event(event)
    }

    fn subscriber(&self) -> &dyn Subscribe<E> {
        match &self.target {
            Target::Borrowed(s) => *s,
            Target::Shared(s) => s.as_ref(),
        }
    }
}

impl<E: Event> Clone for SubscriberRef<E> {
    fn clone(&self) -> Self {
        let target = match &self.target {
            Target::Borrowed(s) => Target::Borrowed(*s),
            Target::Shared(s) => Target::Shared(Arc::clone(s)),
        };
        Self { target }
    }
}

impl<E: Event, S: Subscribe<E>> From<Arc<S>> for SubscriberRef<E> {
    fn from(subscriber: Arc<S>) -> Self {
        Self::shared(subscriber)
    }
}

impl<E: Event, S: Subscribe<E>> From<&'static S> for SubscriberRef<E> {
    fn from(subscriber: &'static S) -> Self {
        Self::borrowed(subscriber)
    }
}

impl<E: Event> fmt::Debug for SubscriberRef<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriberRef")
            .field("name", &self.name())
            .field("id", &self.id())
            .field("ownership", &self.ownership())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Ping;

    struct Counter {
        #[allow(dead_code)]
        label: &'static str,
    }

    impl Subscribe<Ping> for Counter {
        fn on_event(&self, _: &Ping) {}
    }

    fn leak(label: &'static str) -> &'static Counter {
        Box::leak(Box::new(Counter { label }))
    }

    #[test]
    fn test_clone_keeps_identity() {
        let h = SubscriberRef::<Ping>::shared(Arc::new(Counter { label: "a" }));
        assert_eq!(h.id(), h.clone().id());
    }

    #[test]
    fn test_distinct_objects_distinct_ids() {
        let a = SubscriberRef::<Ping>::shared(Arc::new(Counter { label: "a" }));
        let b = SubscriberRef::<Ping>::shared(Arc::new(Counter { label: "a" }));
        assert!(!a.same_subscriber(&b));
    }

    #[test]
    fn test_borrowed_and_shared_of_same_object_collide() {
        let shared = Arc::new(Counter { label: "x" });
        let keep: &'static Arc<Counter> = Box::leak(Box::new(Arc::clone(&shared)));
        let leaked: &'static Counter = keep.as_ref();

        let by_arc = SubscriberRef::<Ping>::shared(Arc::clone(&shared));
        let by_ref = SubscriberRef::<Ping>::borrowed(leaked);
        assert!(by_arc.same_subscriber(&by_ref));
        assert_ne!(by_arc.ownership(), by_ref.ownership());

        let other = SubscriberRef::<Ping>::borrowed(leak("y"));
        assert!(!other.same_subscriber(&by_arc));
    }

    #[test]
    fn test_from_dyn_matches_shared() {
        let sub = Arc::new(Counter { label: "d" });
        let erased: Arc<dyn Subscribe<Ping>> = sub.clone();

        let by_dyn = SubscriberRef::from_dyn(erased);
        assert!(by_dyn.same_subscriber(&SubscriberRef::shared(sub)));
        assert_eq!(by_dyn.ownership(), Ownership::Shared);
    }

    #[test]
    fn test_from_arc_matches_shared() {
        let sub = Arc::new(Counter { label: "f" });
        let by_from: SubscriberRef<Ping> = Arc::clone(&sub).into();
        assert!(by_from.same_subscriber(&SubscriberRef::shared(sub)));
        assert_eq!(by_from.ownership(), Ownership::Shared);
    }

    #[test]
    fn test_from_static_ref_matches_borrowed() {
        let sub = leak("r");
        let by_from: SubscriberRef<Ping> = sub.into();
        assert!(by_from.same_subscriber(&SubscriberRef::borrowed(sub)));
        assert_eq!(by_from.ownership(), Ownership::Borrowed);
    }

    #[repr(C)]
    struct Outer {
        inner: Counter,
        #[allow(dead_code)]
        extra: u8,
    }

    impl Subscribe<Ping> for Outer {
        fn on_event(&self, _: &Ping) {}
    }

    #[test]
    fn test_borrowed_first_field_aliases_its_container() {
        let outer: &'static Outer = Box::leak(Box::new(Outer {
            inner: Counter { label: "in" },
            extra: 0,
        }));

        let whole = SubscriberRef::<Ping>::borrowed(outer);
        let first = SubscriberRef::<Ping>::borrowed(&outer.inner);
        assert!(whole.same_subscriber(&first));
    }

    #[test]
    fn test_ownership_mode_is_preserved() {
        let shared = SubscriberRef::<Ping>::shared(Arc::new(Counter { label: "s" }));
        let borrowed = SubscriberRef::<Ping>::borrowed(leak("b"));
        assert_eq!(shared.ownership(), Ownership::Shared);
        assert_eq!(borrowed.ownership(), Ownership::Borrowed);
        assert_eq!(borrowed.clone().ownership(), Ownership::Borrowed);
    }

    #[test]
    fn test_shared_handle_keeps_subscriber_alive() {
        let sub = Arc::new(Counter { label: "s" });
        let handle = SubscriberRef::<Ping>::shared(Arc::clone(&sub));
        assert_eq!(Arc::strong_count(&sub), 2);
        drop(handle);
        assert_eq!(Arc::strong_count(&sub), 1);
    }

    #[test]
    fn test_default_name_is_type_name() {
        let h = SubscriberRef::<Ping>::borrowed(leak("n"));
        assert!(h.name().ends_with("Counter"));
    }
}
