//! # Concurrent (fire-and-forget) delivery.
//!
//! [`ConcurrentDelivery`] schedules the synchronous walk of a snapshot as one
//! blocking task on a tokio runtime and returns without waiting:
//!
//! ```text
//! publish(ev#1) ──► spawn_blocking ──► [S1, S2, S3] in order ──┐
//! publish(ev#2) ──► spawn_blocking ──► [S1, S2, S3] in order ──┼─► may overlap,
//!      │                                                       │   finish in any order
//!      └─► returns immediately                                 ┘
//! ```
//!
//! Handlers are plain synchronous functions, so the blocking pool is used
//! instead of async worker threads.
//!
//! ## Observability
//! The join handle of every delivery is dropped. Subscriber panics are still
//! reported through the configured [`ReportFailure`](crate::ReportFailure).
//! [`ConcurrentDelivery::wait_idle`] drains whatever is in flight; it never
//! cancels anything.

use std::fmt;
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::Mutex;
use tokio_util::task::TaskTracker;

use crate::delivery::{Deliver, SyncDelivery};
use crate::error::BusError;
use crate::events::Event;
use crate::subscribers::SubscriberRef;

/// Fire-and-forget delivery on a tokio runtime.
pub struct ConcurrentDelivery {
    inner: SyncDelivery,
    runtime: Handle,
    tracker: TaskTracker,
    drain: Mutex<()>,
}

impl ConcurrentDelivery {
    /// Uses the runtime of the current context.
    ///
    /// Fails with [`BusError::NoRuntime`] when called outside a tokio runtime.
    pub fn current() -> Result<Self, BusError> {
        let runtime = Handle::try_current().map_err(|_| BusError::NoRuntime)?;
        Ok(Self::on(runtime))
    }

    /// Schedules deliveries on `runtime` with the default [`SyncDelivery`].
    #[must_use]
    pub fn on(runtime: Handle) -> Self {
        Self::wrapping(SyncDelivery::new(), runtime)
    }

    /// Schedules `inner` on `runtime`; `inner` supplies the failure policy and
    /// reporter used inside each scheduled delivery.
    #[must_use]
    pub fn wrapping(inner: SyncDelivery, runtime: Handle) -> Self {
        Self {
            inner,
            runtime,
            tracker: TaskTracker::new(),
            drain: Mutex::new(()),
        }
    }

    /// Number of scheduled deliveries that have not finished yet.
    pub fn in_flight(&self) -> usize {
        self.tracker.len()
    }

    /// Waits until no delivery is in flight.
    ///
    /// Deliveries scheduled while waiting are waited for as well. Concurrent
    /// callers are serialized.
    pub async fn wait_idle(&self) {
        let _guard = self.drain.lock().await;
        self.tracker.close();
        self.tracker.wait().await;
        self.tracker.reopen();
    }
}

impl Deliver for ConcurrentDelivery {
    fn deliver<E: Event>(&self, event: Arc<E>, subscribers: Vec<SubscriberRef<E>>) {
        if subscribers.is_empty() {
            return;
        }
        let inner = self.inner.clone();
        let token = self.tracker.token();

        let _detached = self.runtime.spawn_blocking(move || {
            let _token = token;
            inner.traverse(event.as_ref(), &subscribers);
        });
    }
}

impl fmt::Debug for ConcurrentDelivery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConcurrentDelivery")
            .field("inner", &self.inner)
            .field("in_flight", &self.in_flight())
            .finish_non_exhaustive()
    }
}
