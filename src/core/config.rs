//! # Bus configuration.
//!
//! [`Config`] centralizes the settings that a [`BusBuilder`](crate::BusBuilder)
//! passes on to the delivery strategy.

use crate::delivery::FailurePolicy;

/// Configuration for a bus.
///
/// ## Field semantics
/// - `failure_policy`: what a delivery does after a subscriber panicked
///   (the panic is always reported first).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct Config {
    /// Failure handling inside one delivery.
    ///
    /// - [`FailurePolicy::Isolate`] keeps delivering to the remaining subscribers;
    /// - [`FailurePolicy::Propagate`] resumes the panic after reporting it.
    pub failure_policy: FailurePolicy,
}

impl Config {
    /// Returns the config with `policy` as failure policy.
    #[must_use]
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }
}
