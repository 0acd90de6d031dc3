//! Outbound signal alerts

pub mod format;
pub mod telegram;

pub use format::*;
pub use telegram::*;

use async_trait::async_trait;

use crate::config::{Credentials, Timeframe};
use crate::error::NotifyError;
use crate::models::signal::{EvaluationResult, Verdict};

/// Everything needed to render one alert
#[derive(Debug, Clone, PartialEq)]
pub struct SignalAlert {
    pub symbol: String,
    pub timeframe: Timeframe,
    pub evaluation: EvaluationResult,
    pub verdict: Verdict,
}

/// Delivery channel for fired signals. Failures are reported, never retried.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, credentials: &Credentials, alert: &SignalAlert) -> Result<(), NotifyError>;
}
