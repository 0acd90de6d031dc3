//! Per-instrument pipeline: fetch, evaluate, decide, notify

use tracing::{debug, error, info, warn};

use crate::jobs::context::JobContext;
use crate::jobs::types::{InstrumentJob, InstrumentOutcome, SkipReason};
use crate::services::notifier::SignalAlert;
use crate::signals::decision::SignalDecider;
use crate::signals::evaluator::IndicatorEvaluator;

/// Run one instrument through the pipeline.
///
/// Stages are strictly sequential. Nothing here returns an error: every stage
/// result is folded into an [`InstrumentOutcome`] for the orchestrator.
pub async fn process_instrument(ctx: &JobContext, job: InstrumentJob) -> InstrumentOutcome {
    let symbol = job.symbol.as_str();

    let series = ctx
        .data_provider
        .fetch_series(symbol, job.timeframe, job.history_limit)
        .await;

    let Some(evaluation) = IndicatorEvaluator::evaluate(&series, &job.indicator_config, symbol)
    else {
        debug!(symbol = %symbol, "No data for {}, skipping", symbol);
        return InstrumentOutcome::Skipped(SkipReason::NoData);
    };

    let verdict = SignalDecider::decide(&evaluation, &job.indicator_config);
    if !verdict.is_signal() {
        debug!(
            symbol = %symbol,
            pump_count = verdict.pump_count,
            dump_count = verdict.dump_count,
            "No signal for {}: {}",
            symbol,
            verdict.comment
        );
        return InstrumentOutcome::NoSignal;
    }

    let direction = verdict.direction;
    info!(
        symbol = %symbol,
        direction = %direction,
        triggered = verdict.triggered_count,
        total = verdict.total_enabled,
        "Signal for {}: {} ({} of {} indicators)",
        symbol,
        direction,
        verdict.triggered_count,
        verdict.total_enabled
    );
    if let Some(advisory) = &evaluation.advisory {
        warn!(symbol = %symbol, "Signal for {} built on short history: {}", symbol, advisory);
    }

    let alert = SignalAlert {
        symbol: job.symbol.clone(),
        timeframe: job.timeframe,
        evaluation,
        verdict,
    };
    match ctx
        .notifier
        .notify(&job.config.credentials(), &alert)
        .await
    {
        Ok(()) => InstrumentOutcome::Signaled(direction),
        Err(e) => {
            error!(
                symbol = %symbol,
                stage = "notify",
                error = %e,
                "Failed to deliver {} alert for {}: {}",
                direction,
                symbol,
                e
            );
            InstrumentOutcome::Undelivered {
                direction,
                error: e.to_string(),
            }
        }
    }
}
