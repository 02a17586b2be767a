//! # ChannelReporter
//!
//! Forwards every [`DeliveryFailure`] into an unbounded tokio channel, making
//! failures of fire-and-forget deliveries observable to the application.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use typebus::{Bus, ChannelReporter, Config, SubscriberFn, SubscriberRef};
//!
//! struct Tick;
//!
//! let (reporter, mut failures) = ChannelReporter::new();
//! let bus = Bus::builder(Config::default())
//!     .with_reporter(Arc::new(reporter))
//!     .synchronous();
//!
//! let faulty = SubscriberFn::arc("faulty", |_: &Tick| panic!("nope"));
//! bus.subscribe(SubscriberRef::shared(faulty)).unwrap().publish(Tick);
//!
//! let failure = failures.try_recv().unwrap();
//! assert_eq!(failure.subscriber, "faulty");
//! ```

use tokio::sync::mpsc;

use crate::delivery::DeliveryFailure;
use crate::reporters::ReportFailure;

/// Failure reporter that sends failures into a channel.
///
/// If the receiver was dropped, failures are discarded.
#[derive(Clone, Debug)]
pub struct ChannelReporter {
    tx: mpsc::UnboundedSender<DeliveryFailure>,
}

impl ChannelReporter {
    /// Creates the reporter and the receiving end of its channel.
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<DeliveryFailure>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl ReportFailure for ChannelReporter {
    fn report(&self, failure: DeliveryFailure) {
        let _ = self.tx.send(failure);
    }
}
