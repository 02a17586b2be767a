//! # Subscribers and subscriber handles.
//!
//! - [`Subscribe`] the handler trait, parameterized by event shape;
//! - [`SubscriberFn`] closure-backed implementation;
//! - [`SubscriberRef`] the registered handle, with its [`Ownership`] mode and
//!   [`SubscriberId`] identity.
//!
//! ## Architecture
//! ```text
//! Bus::publish(E) ──► snapshot: [SubscriberRef<E>; n]
//!                             │
//!                             ├──► Borrowed(&'static S) ──► S::on_event(&E)
//!                             └──► Shared(Arc<S>)       ──► S::on_event(&E)
//! ```

mod handle;
mod subscriber;
mod subscriber_fn;

pub use handle::{Ownership, SubscriberId, SubscriberRef};
pub use subscriber::Subscribe;
pub use subscriber_fn::SubscriberFn;
