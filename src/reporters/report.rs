use crate::delivery::DeliveryFailure;

/// Sink for subscriber failures.
///
/// Called on the thread that ran the failing subscriber, right after the panic
/// was caught. Implementations should be quick and must not panic.
pub trait ReportFailure: Send + Sync + 'static {
    /// Records one failure.
    fn report(&self, failure: DeliveryFailure);
}

impl<F> ReportFailure for F
where
    F: Fn(DeliveryFailure) + Send + Sync + 'static,
{
    fn report(&self, failure: DeliveryFailure) {
        self(failure)
    }
}
