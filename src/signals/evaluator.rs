//! Per-instrument indicator evaluation.

use tracing::debug;

use crate::config::IndicatorConfig;
use crate::indicators::price_change_percent;
use crate::models::indicators::PriceSeries;
use crate::models::signal::{EvaluationResult, IndicatorEvaluation};

/// Below this many bars the result carries a strong advisory
pub const MIN_RELIABLE_BARS: usize = 50;
/// Below this many bars the result carries a mild advisory
pub const RECOMMENDED_BARS: usize = 200;

pub struct IndicatorEvaluator;

impl IndicatorEvaluator {
    /// Compute every enabled indicator on `series` and flag its pump/dump triggers.
    ///
    /// Returns `None` for an empty series, which callers treat as a skipped
    /// instrument. Disabled indicators are not computed at all.
    pub fn evaluate(
        series: &PriceSeries,
        config: &IndicatorConfig,
        symbol: &str,
    ) -> Option<EvaluationResult> {
        let last = series.last()?;

        let advisory = short_history_advisory(series.len(), symbol);
        if let Some(note) = &advisory {
            debug!(symbol = %symbol, bars = series.len(), "{}", note);
        }

        let readings: Vec<IndicatorEvaluation> = config
            .enabled_kinds()
            .map(|kind| {
                let def = kind.definition();
                let reading = def.compute(series);
                IndicatorEvaluation {
                    kind,
                    pump: def.pump_triggered(&reading, config),
                    dump: def.dump_triggered(&reading, config),
                    reading,
                }
            })
            .collect();

        Some(EvaluationResult {
            symbol: symbol.to_string(),
            bar_count: series.len(),
            last_close: last.close,
            last_timestamp: last.timestamp,
            price_change_pct: price_change_percent(series),
            advisory,
            total_enabled: readings.len(),
            readings,
        })
    }
}

fn short_history_advisory(bars: usize, symbol: &str) -> Option<String> {
    if bars < MIN_RELIABLE_BARS {
        Some(format!(
            "only {} bars available for {} (fewer than {})",
            bars, symbol, MIN_RELIABLE_BARS
        ))
    } else if bars < RECOMMENDED_BARS {
        Some(format!(
            "{} bars available for {} (fewer than the {} recommended)",
            bars, symbol, RECOMMENDED_BARS
        ))
    } else {
        None
    }
}
