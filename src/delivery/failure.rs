use std::any::{Any, type_name};

use thiserror::Error;

use crate::events::Event;
use crate::subscribers::{SubscriberId, SubscriberRef};

/// What a delivery does after a subscriber panicked.
///
/// The failure is reported first in both cases.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Continue with the remaining subscribers of the snapshot.
    #[default]
    Isolate,
    /// Resume the panic, skipping the remaining subscribers.
    ///
    /// With [`SyncDelivery`](crate::SyncDelivery) the panic unwinds into the
    /// `publish` caller. With `ConcurrentDelivery` it ends the detached task.
    Propagate,
}

/// A subscriber panicked while handling an event.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("subscriber {subscriber} panicked on {event}: {message}")]
pub struct DeliveryFailure {
    /// Type name of the event shape.
    pub event: &'static str,
    /// Name of the failing subscriber.
    pub subscriber: &'static str,
    /// Identity of the failing subscriber.
    pub id: SubscriberId,
    /// Panic message, or `"unknown panic"` for non-string payloads.
    pub message: String,
}

impl DeliveryFailure {
    pub(crate) fn from_panic<E: Event>(
        subscriber: &SubscriberRef<E>,
        payload: &(dyn Any + Send),
    ) -> Self {
        let message = if let Some(msg) = payload.downcast_ref::<&'static str>() {
            (*msg).to_string()
        } else if let Some(msg) = payload.downcast_ref::<String>() {
            msg.clone()
        } else {
            "unknown panic".to_string()
        };

        Self {
            event: type_name::<E>(),
            subscriber: subscriber.name(),
            id: subscriber.id(),
            message,
        }
    }
}
