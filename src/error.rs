//! Error types returned by the bus.
//!
//! [`BusError`] is the only error surfaced to direct callers. Failures of
//! subscriber code during delivery are not errors of the caller's operation;
//! they travel as [`DeliveryFailure`](crate::DeliveryFailure) reports.
//!
//! Like the other error types in this crate family, it provides `as_label`
//! (stable snake_case for logs) and `as_message` helpers.

use thiserror::Error;

/// # Errors produced by bus operations.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BusError {
    /// The subscriber object is already registered for this event shape.
    ///
    /// The registry is left unchanged.
    #[error("subscriber ({subscriber}) already subscribed to {event}")]
    AlreadySubscribed {
        /// Name of the rejected subscriber.
        subscriber: String,
        /// Type name of the event shape.
        event: &'static str,
    },

    /// Concurrent delivery was requested outside of a tokio runtime.
    #[error("concurrent delivery requires a tokio runtime")]
    NoRuntime,
}

impl BusError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use typebus::BusError;
    ///
    /// let err = BusError::AlreadySubscribed { subscriber: "audit".into(), event: "Login" };
    /// assert_eq!(err.as_label(), "bus_already_subscribed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            BusError::AlreadySubscribed { .. } => "bus_already_subscribed",
            BusError::NoRuntime => "bus_no_runtime",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            BusError::AlreadySubscribed { subscriber, event } => {
                format!("duplicate subscriber={subscriber} event={event}")
            }
            BusError::NoRuntime => "no tokio runtime in context".to_string(),
        }
    }

    /// True if the error leaves the bus state untouched and the caller may
    /// simply continue.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, BusError::AlreadySubscribed { .. })
    }
}
