//! Quorum rules turning trigger flags into a verdict.

use crate::config::IndicatorConfig;
use crate::indicators::IndicatorKind;
use crate::models::signal::{EvaluationResult, SignalDirection, Verdict};

pub struct SignalDecider;

impl SignalDecider {
    /// Pump fires when at least `min_indicators` pump triggers are set and every
    /// required indicator's pump trigger is set; dump likewise. Pump is checked
    /// first and wins when both fire.
    pub fn decide(evaluation: &EvaluationResult, config: &IndicatorConfig) -> Verdict {
        let pump_count = evaluation.pump_count();
        let dump_count = evaluation.dump_count();

        let pump = pump_count >= config.min_indicators
            && config
                .required
                .iter()
                .all(|kind| evaluation.pump_triggered(*kind));
        let dump = dump_count >= config.min_indicators
            && config
                .required
                .iter()
                .all(|kind| evaluation.dump_triggered(*kind));

        let (direction, triggered_count) = if pump {
            (SignalDirection::Pump, pump_count)
        } else if dump {
            (SignalDirection::Dump, dump_count)
        } else {
            (SignalDirection::None, 0)
        };

        let triggered: Vec<IndicatorKind> = evaluation
            .readings
            .iter()
            .filter(|r| match direction {
                SignalDirection::Pump => r.pump,
                SignalDirection::Dump => r.dump,
                SignalDirection::None => false,
            })
            .map(|r| r.kind)
            .collect();

        Verdict {
            direction,
            triggered_count,
            total_enabled: evaluation.total_enabled,
            pump_count,
            dump_count,
            triggered,
            comment: build_comment(evaluation),
        }
    }
}

/// `Label=reading` for every enabled indicator, independent of the direction
pub fn build_comment(evaluation: &EvaluationResult) -> String {
    if evaluation.readings.is_empty() {
        return "No active indicators".to_string();
    }
    evaluation
        .readings
        .iter()
        .map(|r| format!("{}={}", r.kind.label(), r.reading.describe()))
        .collect::<Vec<_>>()
        .join(", ")
}
