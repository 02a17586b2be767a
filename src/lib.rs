//! # typebus
//!
//! **typebus** is an in-process, type-indexed publish/subscribe dispatcher.
//!
//! Subscribers register for one event *shape* (a Rust type); publishing a
//! value of that type reaches every subscriber currently registered for exactly
//! that type. How the subscribers are invoked is decided by a pluggable
//! delivery strategy, fixed when the bus is built.
//!
//! ## Architecture
//! ```text
//!   caller
//!     │ subscribe(SubscriberRef<E>)        publish(E)
//!     ▼                                        │
//! ┌──────────────────────────────────────────────────────────────┐
//! │ Bus<D>                                                       │
//! │  ┌────────────────────────────┐   snapshot::<E>()            │
//! │  │ Registry                   │◄─────────────────────────────┤
//! │  │  ShapeKey(A) ─► [S1, S2]   │                              │
//! │  │  ShapeKey(B) ─► [S3]       │──► Vec<SubscriberRef<E>> ──┐ │
//! │  └────────────────────────────┘                            │ │
//! │                                     D::deliver(ev, snap) ◄─┘ │
//! └───────────────────────────────────────┬──────────────────────┘
//!                    ┌────────────────────┴───────────────────┐
//!                    ▼                                        ▼
//!             SyncDelivery                          ConcurrentDelivery
//!      (caller thread, in order)          (spawn_blocking, returns at once)
//!                    │                                        │
//!                    └──► S1.on_event(&ev) ─► S2.on_event(&ev) ─► ...
//!                              └─ panic ─► ReportFailure ─► FailurePolicy
//! ```
//!
//! ## Features
//! | Area               | Description                                              | Key types                                  |
//! |--------------------|----------------------------------------------------------|--------------------------------------------|
//! | **Dispatch**       | Subscribe, unsubscribe, publish; chainable               | [`Bus`], [`SyncBus`], `ConcurrentBus`      |
//! | **Subscribers**    | Handler trait, closure adapter, owned/borrowed handles   | [`Subscribe`], [`SubscriberFn`], [`SubscriberRef`] |
//! | **Delivery**       | Interchangeable strategies                               | [`Deliver`], [`SyncDelivery`], `ConcurrentDelivery` |
//! | **Failures**       | Panic isolation and reporting                            | [`FailurePolicy`], [`ReportFailure`], [`LogReporter`] |
//! | **Errors**         | Typed errors for bus operations                          | [`BusError`]                               |
//! | **Configuration**  | Settings and builder                                     | [`Config`], [`BusBuilder`]                 |
//!
//! ## Optional features
//! - `concurrent` _(default)_: `ConcurrentDelivery`, `ConcurrentBus` and
//!   `ChannelReporter`, backed by tokio.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicI64, Ordering};
//! use typebus::{Bus, BusError, Config, Subscribe, SubscriberRef};
//!
//! struct Deposited { amount: i64 }
//! struct Withdrawn { amount: i64 }
//!
//! #[derive(Default)]
//! struct Balance(AtomicI64);
//!
//! impl Subscribe<Deposited> for Balance {
//!     fn on_event(&self, ev: &Deposited) { self.0.fetch_add(ev.amount, Ordering::SeqCst); }
//! }
//! impl Subscribe<Withdrawn> for Balance {
//!     fn on_event(&self, ev: &Withdrawn) { self.0.fetch_sub(ev.amount, Ordering::SeqCst); }
//! }
//!
//! let bus = Bus::builder(Config::default()).synchronous();
//! let balance = Arc::new(Balance::default());
//!
//! bus.subscribe(SubscriberRef::<Deposited>::shared(Arc::clone(&balance)))?
//!     .subscribe(SubscriberRef::<Withdrawn>::shared(Arc::clone(&balance)))?
//!     .publish(Deposited { amount: 100 })
//!     .publish(Withdrawn { amount: 30 });
//!
//! assert_eq!(balance.0.load(Ordering::SeqCst), 70);
//!
//! // The same object cannot subscribe twice to one shape.
//! let again = bus.subscribe(SubscriberRef::<Deposited>::shared(Arc::clone(&balance)));
//! assert!(matches!(again, Err(BusError::AlreadySubscribed { .. })));
//! # Ok::<(), BusError>(())
//! ```
mod core;
mod delivery;
mod error;
mod events;
mod reporters;
mod subscribers;

// ---- Public re-exports ----

pub use self::core::{Bus, BusBuilder, Config, Registry, SyncBus};
pub use delivery::{Deliver, DeliveryFailure, FailurePolicy, SyncDelivery};
pub use error::BusError;
pub use events::{Event, ShapeKey};
pub use reporters::{LogReporter, ReportFailure};
pub use subscribers::{Ownership, Subscribe, SubscriberFn, SubscriberId, SubscriberRef};

// Fire-and-forget delivery on tokio.
// Enable with: `--features concurrent` (on by default)
#[cfg(feature = "concurrent")]
pub use self::core::ConcurrentBus;
#[cfg(feature = "concurrent")]
pub use delivery::ConcurrentDelivery;
#[cfg(feature = "concurrent")]
pub use reporters::ChannelReporter;
