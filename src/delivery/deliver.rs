use std::sync::Arc;

use crate::events::Event;
use crate::subscribers::SubscriberRef;

/// Delivery strategy contract.
///
/// `deliver` receives the event and an independent snapshot of the shape's
/// subscribers, in subscription order. It must not fail towards the publisher;
/// subscriber failures are the strategy's concern.
pub trait Deliver: Send + Sync + 'static {
    /// Hands `event` to every subscriber in `subscribers`.
    fn deliver<E: Event>(&self, event: Arc<E>, subscribers: Vec<SubscriberRef<E>>);
}
