//! Job and outcome types for the per-instrument pipeline

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::{IndicatorConfig, RuntimeConfig, Timeframe};
use crate::models::signal::SignalDirection;

/// One instrument's work item for a cycle
#[derive(Debug, Clone)]
pub struct InstrumentJob {
    pub symbol: String,
    pub timeframe: Timeframe,
    pub history_limit: usize,
    /// Config snapshot taken at cycle start
    pub config: RuntimeConfig,
    pub indicator_config: IndicatorConfig,
}

impl InstrumentJob {
    pub fn new(symbol: impl Into<String>, config: &RuntimeConfig, history_limit: usize) -> Self {
        Self {
            symbol: symbol.into(),
            timeframe: config.timeframe,
            history_limit,
            indicator_config: config.indicator_config(),
            config: config.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineStage {
    Fetch,
    Evaluate,
    Notify,
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::Fetch => "fetch",
            PipelineStage::Evaluate => "evaluate",
            PipelineStage::Notify => "notify",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    NoData,
}

/// What happened to one instrument in one cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstrumentOutcome {
    Skipped(SkipReason),
    NoSignal,
    Signaled(SignalDirection),
    /// The verdict fired but the alert could not be delivered
    Undelivered {
        direction: SignalDirection,
        error: String,
    },
    Failed {
        stage: PipelineStage,
        error: String,
    },
}

impl InstrumentOutcome {
    /// Direction of a fired verdict, delivered or not
    pub fn signal(&self) -> Option<SignalDirection> {
        match self {
            InstrumentOutcome::Signaled(direction)
            | InstrumentOutcome::Undelivered { direction, .. } => Some(*direction),
            _ => None,
        }
    }
}
