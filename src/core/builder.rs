use std::sync::Arc;

#[cfg(feature = "concurrent")]
use tokio::runtime::Handle;

use super::{Bus, Config, SyncBus};
use crate::delivery::SyncDelivery;
use crate::reporters::{LogReporter, ReportFailure};

#[cfg(feature = "concurrent")]
use super::ConcurrentBus;
#[cfg(feature = "concurrent")]
use crate::delivery::ConcurrentDelivery;
#[cfg(feature = "concurrent")]
use crate::error::BusError;

/// Builder for constructing a [`Bus`] with a chosen delivery strategy.
pub struct BusBuilder {
    cfg: Config,
    reporter: Option<Arc<dyn ReportFailure>>,
}

impl BusBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            reporter: None,
        }
    }

    /// Sets the sink for subscriber failures.
    ///
    /// Defaults to [`LogReporter`].
    pub fn with_reporter(mut self, reporter: Arc<dyn ReportFailure>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    /// Builds a bus that delivers in order on the publisher's thread.
    pub fn synchronous(self) -> SyncBus {
        Bus::new(self.sync_delivery())
    }

    /// Builds a fire-and-forget bus on the runtime of the current context.
    ///
    /// # Errors
    /// [`BusError::NoRuntime`] when called outside a tokio runtime.
    #[cfg(feature = "concurrent")]
    pub fn concurrent(self) -> Result<ConcurrentBus, BusError> {
        let runtime = Handle::try_current().map_err(|_| BusError::NoRuntime)?;
        Ok(self.concurrent_on(runtime))
    }

    /// Builds a fire-and-forget bus that schedules deliveries on `runtime`.
    #[cfg(feature = "concurrent")]
    pub fn concurrent_on(self, runtime: Handle) -> ConcurrentBus {
        Bus::new(ConcurrentDelivery::wrapping(self.sync_delivery(), runtime))
    }

    fn sync_delivery(&self) -> SyncDelivery {
        let reporter = self
            .reporter
            .clone()
            .unwrap_or_else(|| Arc::new(LogReporter) as Arc<dyn ReportFailure>);
        SyncDelivery::from_config(&self.cfg, reporter)
    }
}
