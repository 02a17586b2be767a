//! # Subscriber trait.
//!
//! [`Subscribe`] is the extension point for plugging handlers into a
//! [`Bus`](crate::Bus). A subscriber declares which event shape it accepts
//! through the type parameter, so a single type can listen to several shapes by
//! implementing the trait more than once.
//!
//! ## Rules
//! - `on_event` runs on whatever thread the delivery strategy chose: the
//!   publisher's thread for [`SyncDelivery`](crate::SyncDelivery), a blocking
//!   pool thread for `ConcurrentDelivery`.
//! - No bus lock is held while `on_event` runs; calling back into the bus
//!   (subscribe, unsubscribe, publish) is allowed.
//! - A panic is the failure signal. It is caught and handed to the bus's
//!   [`ReportFailure`](crate::ReportFailure); what happens next is decided by
//!   the [`FailurePolicy`](crate::FailurePolicy).
//!
//! ## Example
//! ```rust
//! use std::sync::atomic::{AtomicU64, Ordering};
//! use typebus::Subscribe;
//!
//! struct OrderPlaced { total_cents: u64 }
//!
//! #[derive(Default)]
//! struct Revenue { cents: AtomicU64 }
//!
//! impl Subscribe<OrderPlaced> for Revenue {
//!     fn on_event(&self, ev: &OrderPlaced) {
//!         self.cents.fetch_add(ev.total_cents, Ordering::Relaxed);
//!     }
//!
//!     fn name(&self) -> &'static str { "revenue" }
//! }
//! ```

use std::any::type_name;

use crate::events::Event;

/// Handler for events of shape `E`.
pub trait Subscribe<E: Event>: Send + Sync + 'static {
    /// Handles one event.
    ///
    /// Called once per publish for every registered subscriber of `E`,
    /// in subscription order within that publish.
    fn on_event(&self, event: &E);

    /// Returns the subscriber name used in logs, errors and failure reports.
    ///
    /// The default uses `type_name::<Self>()`, which can be verbose.
    fn name(&self) -> &'static str {
        type_name::<Self>()
    }
}
