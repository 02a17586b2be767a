//! # Synchronous delivery.
//!
//! [`SyncDelivery`] walks the snapshot on the publisher's thread:
//!
//! ```text
//! publish(ev) ──► on_event(S1) ──► on_event(S2) ──► ... ──► on_event(SN) ──► return
//!                      └─ panic ─► report ─┬─ Isolate:   continue with next
//!                                          └─ Propagate: resume_unwind
//! ```

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crate::core::Config;
use crate::delivery::{Deliver, DeliveryFailure, FailurePolicy};
use crate::events::Event;
use crate::reporters::{LogReporter, ReportFailure};
use crate::subscribers::SubscriberRef;

/// In-order delivery on the calling thread.
///
/// `publish` returns only after every subscriber of the snapshot was invoked
/// (or, under [`FailurePolicy::Propagate`], one of them panicked).
#[derive(Clone)]
pub struct SyncDelivery {
    policy: FailurePolicy,
    reporter: Arc<dyn ReportFailure>,
}

impl SyncDelivery {
    /// Isolating delivery that logs failures through [`LogReporter`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_reporter(FailurePolicy::default(), Arc::new(LogReporter))
    }

    /// Delivery with an explicit policy and reporter.
    #[must_use]
    pub fn with_reporter(policy: FailurePolicy, reporter: Arc<dyn ReportFailure>) -> Self {
        Self { policy, reporter }
    }

    /// Delivery configured from `cfg`, reporting to `reporter`.
    #[must_use]
    pub fn from_config(cfg: &Config, reporter: Arc<dyn ReportFailure>) -> Self {
        Self::with_reporter(cfg.failure_policy, reporter)
    }

    /// The configured failure policy.
    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Invokes every subscriber in order, applying the failure policy.
    pub(crate) fn traverse<E: Event>(&self, event: &E, subscribers: &[SubscriberRef<E>]) {
        for sub in subscribers {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| sub.on_event(event)));
            if let Err(payload) = outcome {
                self.reporter
                    .report(DeliveryFailure::from_panic(sub, &*payload));
                if self.policy == FailurePolicy::Propagate {
                    panic::resume_unwind(payload);
                }
            }
        }
    }
}

impl Default for SyncDelivery {
    fn default() -> Self {
        Self::new()
    }
}

impl Deliver for SyncDelivery {
    fn deliver<E: Event>(&self, event: Arc<E>, subscribers: Vec<SubscriberRef<E>>) {
        self.traverse(event.as_ref(), &subscribers);
    }
}

impl fmt::Debug for SyncDelivery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncDelivery")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::subscribers::SubscriberFn;

    struct Note(&'static str);

    type Log = Arc<Mutex<Vec<String>>>;

    fn recorder(tag: &'static str, log: &Log) -> SubscriberRef<Note> {
        let log = Arc::clone(log);
        SubscriberRef::shared(SubscriberFn::arc(tag, move |n: &Note| {
            log.lock().unwrap().push(format!("{tag}:{}", n.0));
        }))
    }

    fn exploding() -> SubscriberRef<Note> {
        SubscriberRef::shared(SubscriberFn::arc("boom", |_: &Note| panic!("kaboom")))
    }

    fn collecting() -> (Arc<dyn ReportFailure>, Arc<Mutex<Vec<DeliveryFailure>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let reporter: Arc<dyn ReportFailure> =
            Arc::new(move |f: DeliveryFailure| sink.lock().unwrap().push(f));
        (reporter, seen)
    }

    #[test]
    fn test_delivers_in_snapshot_order() {
        let log = Log::default();
        let subs = vec![recorder("a", &log), recorder("b", &log), recorder("c", &log)];

        SyncDelivery::new().deliver(Arc::new(Note("x")), subs);

        assert_eq!(*log.lock().unwrap(), vec!["a:x", "b:x", "c:x"]);
    }

    #[test]
    fn test_isolate_continues_after_panic() {
        let log = Log::default();
        let (reporter, seen) = collecting();
        let delivery = SyncDelivery::with_reporter(FailurePolicy::Isolate, reporter);

        delivery.deliver(
            Arc::new(Note("y")),
            vec![recorder("a", &log), exploding(), recorder("c", &log)],
        );

        assert_eq!(*log.lock().unwrap(), vec!["a:y", "c:y"]);
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].subscriber, "boom");
        assert_eq!(seen[0].message, "kaboom");
    }

    #[test]
    fn test_propagate_interrupts_and_unwinds() {
        let log = Log::default();
        let (reporter, seen) = collecting();
        let delivery = SyncDelivery::with_reporter(FailurePolicy::Propagate, reporter);
        let subs = vec![recorder("a", &log), exploding(), recorder("c", &log)];

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            delivery.deliver(Arc::new(Note("z")), subs);
        }));

        assert!(result.is_err());
        assert_eq!(*log.lock().unwrap(), vec!["a:z"]);
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_empty_snapshot_is_noop() {
        let (reporter, seen) = collecting();
        SyncDelivery::with_reporter(FailurePolicy::Propagate, reporter)
            .deliver(Arc::new(Note("nobody")), Vec::new());
        assert!(seen.lock().unwrap().is_empty());
    }
}
