use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::indicators::IndicatorKind;
use crate::models::indicators::IndicatorReading;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalDirection {
    Pump,
    Dump,
    None,
}

impl SignalDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalDirection::Pump => "pump",
            SignalDirection::Dump => "dump",
            SignalDirection::None => "none",
        }
    }

    pub fn is_signal(&self) -> bool {
        !matches!(self, SignalDirection::None)
    }
}

impl std::fmt::Display for SignalDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One enabled indicator's latest reading and its trigger flags
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorEvaluation {
    pub kind: IndicatorKind,
    pub reading: IndicatorReading,
    pub pump: bool,
    pub dump: bool,
}

/// Everything the decider and the alert need about one instrument at one bar.
///
/// Built fresh per instrument and cycle and never mutated afterwards. Only
/// enabled indicators appear in `readings`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub symbol: String,
    pub bar_count: usize,
    pub last_close: f64,
    pub last_timestamp: DateTime<Utc>,
    pub price_change_pct: f64,
    /// Short-history warning, not an error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advisory: Option<String>,
    pub readings: Vec<IndicatorEvaluation>,
    pub total_enabled: usize,
}

impl EvaluationResult {
    pub fn reading(&self, kind: IndicatorKind) -> Option<&IndicatorEvaluation> {
        self.readings.iter().find(|r| r.kind == kind)
    }

    pub fn pump_triggered(&self, kind: IndicatorKind) -> bool {
        self.reading(kind).is_some_and(|r| r.pump)
    }

    pub fn dump_triggered(&self, kind: IndicatorKind) -> bool {
        self.reading(kind).is_some_and(|r| r.dump)
    }

    pub fn pump_count(&self) -> usize {
        self.readings.iter().filter(|r| r.pump).count()
    }

    pub fn dump_count(&self) -> usize {
        self.readings.iter().filter(|r| r.dump).count()
    }
}

/// Outcome of the quorum rules for one evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub direction: SignalDirection,
    /// Trigger count of the direction that fired, 0 when none did
    pub triggered_count: usize,
    pub total_enabled: usize,
    pub pump_count: usize,
    pub dump_count: usize,
    /// Indicators that voted for the fired direction
    pub triggered: Vec<IndicatorKind>,
    pub comment: String,
}

impl Verdict {
    pub fn is_signal(&self) -> bool {
        self.direction.is_signal()
    }
}
