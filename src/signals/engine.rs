//! Evaluate-then-decide entry point used by the instrument pipeline.

use crate::config::IndicatorConfig;
use crate::models::indicators::PriceSeries;
use crate::models::signal::{EvaluationResult, Verdict};
use crate::signals::decision::SignalDecider;
use crate::signals::evaluator::IndicatorEvaluator;

pub struct SignalEngine;

impl SignalEngine {
    /// `None` when the series is empty; the decider never sees such a series
    pub fn run(
        series: &PriceSeries,
        config: &IndicatorConfig,
        symbol: &str,
    ) -> Option<(EvaluationResult, Verdict)> {
        let evaluation = IndicatorEvaluator::evaluate(series, config, symbol)?;
        let verdict = SignalDecider::decide(&evaluation, config);
        Some((evaluation, verdict))
    }
}
