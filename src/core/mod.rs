//! Bus core: registry, dispatcher and construction.
//!
//! - [`registry`]: per-shape subscriber sequences with identity checks;
//! - [`bus`]: the dispatcher composing the registry with a delivery strategy;
//! - [`builder`]: wires configuration, reporter and strategy together;
//! - [`config`]: settings passed on to the strategy.

mod builder;
mod bus;
mod config;
mod registry;

pub use builder::BusBuilder;
pub use bus::{Bus, SyncBus};
pub use config::Config;
pub use registry::Registry;

#[cfg(feature = "concurrent")]
pub use bus::ConcurrentBus;
