//! # LogReporter
//!
//! Logs every [`DeliveryFailure`] as a `tracing` error event.
//!
//! ## Example output (with `tracing_subscriber::fmt`)
//! ```text
//! ERROR typebus::reporters::log: subscriber panicked during delivery event="app::Tick" subscriber="printer" reason="index out of bounds"
//! ```

use crate::delivery::DeliveryFailure;
use crate::reporters::ReportFailure;

/// Failure reporter backed by `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogReporter;

impl ReportFailure for LogReporter {
    fn report(&self, failure: DeliveryFailure) {
        tracing::error!(
            event = failure.event,
            subscriber = failure.subscriber,
            reason = %failure.message,
            "subscriber panicked during delivery"
        );
    }
}
