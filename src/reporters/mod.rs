//! # Failure reporters.
//!
//! Subscriber panics caught by a delivery strategy become
//! [`DeliveryFailure`](crate::DeliveryFailure)s and are handed to a
//! [`ReportFailure`] implementation chosen when the bus is built.
//!
//! - [`LogReporter`]: logs each failure with `tracing` (the default);
//! - `ChannelReporter`: forwards failures into a tokio channel;
//! - any `Fn(DeliveryFailure) + Send + Sync` closure.

mod log;
mod report;

#[cfg(feature = "concurrent")]
mod channel;

pub use log::LogReporter;
pub use report::ReportFailure;

#[cfg(feature = "concurrent")]
pub use channel::ChannelReporter;
