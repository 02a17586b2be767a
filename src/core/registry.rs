//! # Subscription registry.
//!
//! [`Registry`] maps each event shape to its ordered sequence of subscriber
//! handles.
//!
//! ## Architecture
//! ```text
//! Registry
//!   └─ RwLock<HashMap<ShapeKey, Arc<dyn Any>>>
//!         ├─ ShapeKey(OrderPlaced) ──► Subscribers<OrderPlaced> ── Mutex<[S1, S2]>
//!         └─ ShapeKey(UserJoined)  ──► Subscribers<UserJoined>  ── Mutex<[S3]>
//! ```
//!
//! ## Rules
//! - Each value is a `Subscribers<E>` stored under `ShapeKey::of::<E>()`; the
//!   key fixes the type the value is downcast to.
//! - A shape's entry is created on first touch (subscribe, unsubscribe or
//!   snapshot) and is never evicted, even when it becomes empty.
//! - Within a shape: no duplicate identities, subscription order preserved,
//!   re-subscription appends at the back.
//! - Subscribe, unsubscribe and snapshot of one shape are serialized by that
//!   shape's mutex. Shapes do not contend once their entries exist.
//! - Subscriber code never runs under a registry lock.

use std::any::{Any, type_name};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use crate::error::BusError;
use crate::events::{Event, ShapeKey};
use crate::subscribers::SubscriberRef;

type Slot = Arc<dyn Any + Send + Sync>;

/// Ordered subscriber sequence of one event shape.
struct Subscribers<E: Event> {
    entries: Mutex<Vec<SubscriberRef<E>>>,
}

impl<E: Event> Subscribers<E> {
    fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }

    fn entries(&self) -> MutexGuard<'_, Vec<SubscriberRef<E>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Appends `subscriber` unless its identity is present; returns whether it was added.
    fn insert(&self, subscriber: SubscriberRef<E>) -> bool {
        let mut entries = self.entries();
        if entries.iter().any(|s| s.same_subscriber(&subscriber)) {
            return false;
        }
        entries.push(subscriber);
        true
    }

    fn remove(&self, subscriber: &SubscriberRef<E>) -> bool {
        let mut entries = self.entries();
        match entries.iter().position(|s| s.same_subscriber(subscriber)) {
            Some(at) => {
                entries.remove(at);
                true
            }
            None => false,
        }
    }

    fn snapshot(&self) -> Vec<SubscriberRef<E>> {
        self.entries().clone()
    }

    fn contains(&self, subscriber: &SubscriberRef<E>) -> bool {
        self.entries().iter().any(|s| s.same_subscriber(subscriber))
    }

    fn len(&self) -> usize {
        self.entries().len()
    }
}

/// Type-indexed subscription registry.
pub struct Registry {
    shapes: RwLock<HashMap<ShapeKey, Slot>>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            shapes: RwLock::new(HashMap::new()),
        }
    }

    /// Appends `subscriber` to the sequence of shape `E`.
    ///
    /// # Errors
    /// [`BusError::AlreadySubscribed`] if the same subscriber object is already
    /// registered for `E`; the sequence is left unchanged.
    pub fn subscribe<E: Event>(&self, subscriber: SubscriberRef<E>) -> Result<(), BusError> {
        // Resolved before locking: `name()` is subscriber code.
        let name = subscriber.name();
        if self.slot::<E>().insert(subscriber) {
            tracing::debug!(event = type_name::<E>(), subscriber = name, "subscribed");
            Ok(())
        } else {
            tracing::warn!(
                event = type_name::<E>(),
                subscriber = name,
                "duplicate subscription rejected"
            );
            Err(BusError::AlreadySubscribed {
                subscriber: name.to_string(),
                event: type_name::<E>(),
            })
        }
    }

    /// Removes `subscriber` from the sequence of shape `E`.
    ///
    /// Returns `false` (and changes nothing) if it was not registered.
    pub fn unsubscribe<E: Event>(&self, subscriber: &SubscriberRef<E>) -> bool {
        let removed = self.slot::<E>().remove(subscriber);
        tracing::debug!(
            event = type_name::<E>(),
            subscriber = subscriber.name(),
            removed,
            "unsubscribed"
        );
        removed
    }

    /// Returns an independent copy of the sequence of shape `E`.
    pub fn snapshot<E: Event>(&self) -> Vec<SubscriberRef<E>> {
        self.slot::<E>().snapshot()
    }

    /// True if `subscriber` is registered for shape `E`.
    pub fn contains<E: Event>(&self, subscriber: &SubscriberRef<E>) -> bool {
        self.existing::<E>().is_some_and(|s| s.contains(subscriber))
    }

    /// Number of subscribers registered for shape `E`.
    pub fn len<E: Event>(&self) -> usize {
        self.existing::<E>().map_or(0, |s| s.len())
    }

    /// Every shape touched so far, including shapes whose sequence is empty.
    pub fn shapes(&self) -> Vec<ShapeKey> {
        let shapes = self.shapes.read().unwrap_or_else(PoisonError::into_inner);
        shapes.keys().copied().collect()
    }

    /// Returns the entry of shape `E`, creating it on first use.
    fn slot<E: Event>(&self) -> Arc<Subscribers<E>> {
        if let Some(found) = self.existing::<E>() {
            return found;
        }
        let slot = {
            let mut shapes = self.shapes.write().unwrap_or_else(PoisonError::into_inner);
            let entry = shapes
                .entry(ShapeKey::of::<E>())
                .or_insert_with(|| Arc::new(Subscribers::<E>::new()) as Slot);
            Arc::clone(entry)
        };
        Self::typed(slot)
    }

    /// Returns the entry of shape `E` without creating it.
    fn existing<E: Event>(&self) -> Option<Arc<Subscribers<E>>> {
        let shapes = self.shapes.read().unwrap_or_else(PoisonError::into_inner);
        shapes.get(&ShapeKey::of::<E>()).cloned().map(Self::typed)
    }

    fn typed<E: Event>(slot: Slot) -> Arc<Subscribers<E>> {
        match slot.downcast::<Subscribers<E>>() {
            Ok(typed) => typed,
            Err(_) => unreachable!("registry entry for {} has a foreign type", type_name::<E>()),
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("shapes", &self.shapes())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subscribers::{Subscribe, SubscriberFn};
    use std::sync::{Weak, mpsc};
    use std::time::Duration;

    struct Temperature(#[allow(dead_code)] i32);
    struct Pressure(#[allow(dead_code)] i32);

    struct Gauge {
        #[allow(dead_code)]
        tag: u8,
    }

    impl Subscribe<Temperature> for Gauge {
        fn on_event(&self, _: &Temperature) {}
        fn name(&self) -> &'static str {
            "gauge"
        }
    }

    impl Subscribe<Pressure> for Gauge {
        fn on_event(&self, _: &Pressure) {}
    }

    fn gauge(tag: u8) -> Arc<Gauge> {
        Arc::new(Gauge { tag })
    }

    fn ids<E: Event>(registry: &Registry) -> Vec<crate::SubscriberId> {
        registry.snapshot::<E>().iter().map(|s| s.id()).collect()
    }

    #[test]
    fn test_duplicate_rejected_and_sequence_unchanged() {
        let registry = Registry::new();
        let p = gauge(1);
        let h = SubscriberRef::<Temperature>::shared(Arc::clone(&p));

        registry.subscribe(h.clone()).unwrap();
        let err = registry.subscribe(h.clone()).unwrap_err();

        assert_eq!(
            err,
            BusError::AlreadySubscribed {
                subscriber: "gauge".into(),
                event: type_name::<Temperature>(),
            }
        );
        assert_eq!(registry.len::<Temperature>(), 1);
    }

    struct Nosy {
        registry: Weak<Registry>,
    }

    impl Subscribe<Temperature> for Nosy {
        fn on_event(&self, _: &Temperature) {}
        fn name(&self) -> &'static str {
            if let Some(registry) = self.registry.upgrade() {
                let _ = registry.len::<Temperature>();
            }
            "nosy"
        }
    }

    #[test]
    fn test_duplicate_with_reentrant_name_does_not_deadlock() {
        let registry = Arc::new(Registry::new());
        let nosy = Arc::new(Nosy {
            registry: Arc::downgrade(&registry),
        });
        let h = SubscriberRef::<Temperature>::shared(nosy);

        let (tx, rx) = mpsc::channel();
        let worker = {
            let registry = Arc::clone(&registry);
            std::thread::spawn(move || {
                registry.subscribe(h.clone()).unwrap();
                let _ = tx.send(registry.subscribe(h));
            })
        };

        let second = rx
            .recv_timeout(Duration::from_secs(3))
            .expect("duplicate subscribe should return instead of blocking");
        worker.join().unwrap();

        assert_eq!(second.unwrap_err().as_label(), "bus_already_subscribed");
        assert_eq!(registry.len::<Temperature>(), 1);
    }

    #[test]
    fn test_same_object_under_two_shapes_is_allowed() {
        let registry = Registry::new();
        let p = gauge(1);

        registry
            .subscribe(SubscriberRef::<Temperature>::shared(Arc::clone(&p)))
            .unwrap();
        registry
            .subscribe(SubscriberRef::<Pressure>::shared(Arc::clone(&p)))
            .unwrap();

        assert_eq!(registry.len::<Temperature>(), 1);
        assert_eq!(registry.len::<Pressure>(), 1);
    }

    #[test]
    fn test_resubscribe_goes_to_back() {
        let registry = Registry::new();
        let (a, b, c) = (gauge(1), gauge(2), gauge(3));
        let ha = SubscriberRef::<Temperature>::shared(a);
        let hb = SubscriberRef::<Temperature>::shared(b);
        let hc = SubscriberRef::<Temperature>::shared(c);

        for h in [&ha, &hb, &hc] {
            registry.subscribe(h.clone()).unwrap();
        }
        assert!(registry.unsubscribe(&ha));
        registry.subscribe(ha.clone()).unwrap();

        assert_eq!(ids::<Temperature>(&registry), vec![hb.id(), hc.id(), ha.id()]);
    }

    #[test]
    fn test_unsubscribe_removes_only_the_target() {
        let registry = Registry::new();
        let ha = SubscriberRef::<Temperature>::shared(gauge(1));
        let hb = SubscriberRef::<Temperature>::shared(gauge(2));
        let hc = SubscriberRef::<Temperature>::shared(gauge(3));
        for h in [&ha, &hb, &hc] {
            registry.subscribe(h.clone()).unwrap();
        }

        assert!(registry.unsubscribe(&hb));

        assert_eq!(ids::<Temperature>(&registry), vec![ha.id(), hc.id()]);
    }

    #[test]
    fn test_unsubscribe_absent_is_noop() {
        let registry = Registry::new();
        let kept = SubscriberRef::<Pressure>::shared(gauge(1));
        registry.subscribe(kept.clone()).unwrap();

        let stranger = SubscriberRef::<Temperature>::shared(gauge(2));
        assert!(!registry.unsubscribe(&stranger));
        assert!(!registry.unsubscribe(&SubscriberRef::<Pressure>::shared(gauge(3))));

        assert_eq!(ids::<Pressure>(&registry), vec![kept.id()]);
        assert_eq!(registry.len::<Temperature>(), 0);
    }

    #[test]
    fn test_snapshot_is_independent() {
        let registry = Registry::new();
        let ha = SubscriberRef::<Temperature>::shared(gauge(1));
        registry.subscribe(ha.clone()).unwrap();

        let snap = registry.snapshot::<Temperature>();
        registry.unsubscribe(&ha);
        registry
            .subscribe(SubscriberRef::<Temperature>::shared(gauge(2)))
            .unwrap();

        assert_eq!(snap.len(), 1);
        assert!(snap[0].same_subscriber(&ha));
    }

    #[test]
    fn test_entries_created_lazily_and_kept() {
        let registry = Registry::new();
        assert!(registry.shapes().is_empty());

        assert!(registry.snapshot::<Temperature>().is_empty());
        let h = SubscriberRef::<Pressure>::shared(gauge(1));
        registry.unsubscribe(&h);

        let shapes = registry.shapes();
        assert_eq!(shapes.len(), 2);
        assert!(shapes.iter().any(ShapeKey::is::<Temperature>));
        assert!(shapes.iter().any(ShapeKey::is::<Pressure>));
    }

    #[test]
    fn test_read_helpers_do_not_create_entries() {
        let registry = Registry::new();
        let h = SubscriberRef::<Temperature>::shared(gauge(1));

        assert_eq!(registry.len::<Temperature>(), 0);
        assert!(!registry.contains(&h));
        assert!(registry.shapes().is_empty());
    }

    #[test]
    fn test_concurrent_subscribe_keeps_every_entry() {
        let registry = Arc::new(Registry::new());
        let workers: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || {
                    for _ in 0..50 {
                        let sub = SubscriberFn::arc("n", |_: &Temperature| {});
                        registry.subscribe(SubscriberRef::shared(sub)).unwrap();
                        let _ = registry.snapshot::<Temperature>();
                    }
                })
            })
            .collect();
        for w in workers {
            w.join().unwrap();
        }

        assert_eq!(registry.len::<Temperature>(), 400);
    }
}
