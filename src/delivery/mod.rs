//! # Delivery strategies.
//!
//! A strategy decides *how* a snapshot of subscribers receives one event. The
//! bus is generic over the strategy and never inspects which one it holds.
//!
//! | Strategy               | Runs on           | `publish` returns    | Order inside one publish |
//! |------------------------|-------------------|----------------------|--------------------------|
//! | [`SyncDelivery`]       | caller's thread   | after every handler  | subscription order       |
//! | `ConcurrentDelivery`   | tokio blocking pool | immediately        | subscription order       |
//!
//! Neither strategy orders *separate* publishes against each other beyond what
//! the calling thread already implies; concurrent deliveries may overlap and
//! finish in any order.
//!
//! Subscriber panics are caught per subscriber, reported through
//! [`ReportFailure`](crate::ReportFailure), and then handled per
//! [`FailurePolicy`].

mod deliver;
mod failure;
mod sync;

#[cfg(feature = "concurrent")]
mod concurrent;

pub use deliver::Deliver;
pub use failure::{DeliveryFailure, FailurePolicy};
pub use sync::SyncDelivery;

#[cfg(feature = "concurrent")]
pub use concurrent::ConcurrentDelivery;
