//! Job context for dependency injection

use std::sync::Arc;

use crate::config::ConfigStore;
use crate::metrics::Metrics;
use crate::services::market_data::MarketDataProvider;
use crate::services::notifier::Notifier;

/// Collaborators shared by every instrument pipeline.
///
/// All members are read-only from the pipeline's point of view; the config
/// store is only read by the orchestrator at cycle start.
pub struct JobContext {
    pub data_provider: Arc<dyn MarketDataProvider>,
    pub notifier: Arc<dyn Notifier>,
    pub config_store: Arc<dyn ConfigStore>,
    pub metrics: Option<Arc<Metrics>>,
}

impl JobContext {
    pub fn new(
        data_provider: Arc<dyn MarketDataProvider>,
        notifier: Arc<dyn Notifier>,
        config_store: Arc<dyn ConfigStore>,
        metrics: Option<Arc<Metrics>>,
    ) -> Self {
        Self {
            data_provider,
            notifier,
            config_store,
            metrics,
        }
    }
}
