//! Scan orchestrator: one monitoring cycle over the tradable universe

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures_util::future::join_all;
use serde::{Deserialize, Serialize};
use tokio::sync::{RwLock, Semaphore};
use tracing::{debug, error, info, warn};

use crate::common::numbers::human_readable_number;
use crate::error::CycleError;
use crate::jobs::context::JobContext;
use crate::jobs::handlers::process_instrument;
use crate::jobs::types::{InstrumentJob, InstrumentOutcome, PipelineStage};
use crate::models::signal::SignalDirection;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrchestratorConfig {
    pub interval_seconds: u64,
    /// Maximum instrument pipelines in flight
    pub concurrency: usize,
    /// Pause after a pipeline is admitted, before its first request
    pub request_delay_ms: u64,
    /// Bars requested per instrument
    pub history_limit: usize,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 60,
            concurrency: 10,
            request_delay_ms: 100,
            history_limit: 200,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleStatus {
    Completed,
    /// `bot_status` is off; nothing was fetched
    Disabled,
    EmptyUniverse,
}

/// Statistics for one cycle, counted from the outcomes returned in that cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleReport {
    pub started_at: DateTime<Utc>,
    pub status: CycleStatus,
    pub universe_size: usize,
    pub excluded: usize,
    pub dispatched: usize,
    /// Pipelines that reached a verdict
    pub processed: usize,
    pub pumps: usize,
    pub dumps: usize,
    pub skipped: usize,
    /// Fired verdicts whose alert could not be delivered
    pub undelivered: usize,
    pub failed: usize,
    pub elapsed_ms: u64,
}

impl CycleReport {
    fn empty(status: CycleStatus, started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            status,
            universe_size: 0,
            excluded: 0,
            dispatched: 0,
            processed: 0,
            pumps: 0,
            dumps: 0,
            skipped: 0,
            undelivered: 0,
            failed: 0,
            elapsed_ms: 0,
        }
    }

    pub fn signals(&self) -> usize {
        self.pumps + self.dumps
    }

    pub fn elapsed(&self) -> Duration {
        Duration::from_millis(self.elapsed_ms)
    }

    fn record(&mut self, outcome: &InstrumentOutcome) {
        match outcome {
            InstrumentOutcome::Skipped(_) => self.skipped += 1,
            InstrumentOutcome::NoSignal => self.processed += 1,
            InstrumentOutcome::Signaled(_) => self.processed += 1,
            InstrumentOutcome::Undelivered { .. } => {
                self.processed += 1;
                self.undelivered += 1;
            }
            InstrumentOutcome::Failed { .. } => self.failed += 1,
        }
        match outcome.signal() {
            Some(SignalDirection::Pump) => self.pumps += 1,
            Some(SignalDirection::Dump) => self.dumps += 1,
            _ => {}
        }
    }
}

/// Anything the scheduler can drive once per tick
#[async_trait]
pub trait CycleRunner: Send + Sync {
    async fn run_cycle(&self) -> Result<CycleReport, CycleError>;
}

pub type SharedReport = Arc<RwLock<Option<CycleReport>>>;

pub struct ScanOrchestrator {
    config: OrchestratorConfig,
    ctx: Arc<JobContext>,
    gate: Arc<Semaphore>,
    last_report: SharedReport,
}

impl ScanOrchestrator {
    pub fn new(ctx: Arc<JobContext>, config: OrchestratorConfig) -> Self {
        let gate = Arc::new(Semaphore::new(config.concurrency.max(1)));
        Self {
            config,
            ctx,
            gate,
            last_report: Arc::new(RwLock::new(None)),
        }
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// Handle to the most recent report, shared with the status endpoint
    pub fn report_handle(&self) -> SharedReport {
        self.last_report.clone()
    }

    pub async fn last_report(&self) -> Option<CycleReport> {
        self.last_report.read().await.clone()
    }

    /// Run one full cycle.
    ///
    /// The runtime config is loaded once at the start and shared read-only by
    /// every pipeline. Per-instrument problems never fail the cycle; only a
    /// config load failure does.
    pub async fn run_cycle(&self) -> Result<CycleReport, CycleError> {
        let start = Instant::now();
        let started_at = Utc::now();

        let config = self.ctx.config_store.load().map_err(|e| {
            error!(error = %e, "Cycle aborted, config could not be loaded: {}", e);
            CycleError::from(e)
        })?;

        if !config.bot_status {
            info!("Bot is disabled, skipping cycle");
            return Ok(self.finish(CycleReport::empty(CycleStatus::Disabled, started_at), start).await);
        }

        let universe = self
            .ctx
            .data_provider
            .list_tradable_symbols(config.volume_filter)
            .await;
        if universe.is_empty() {
            warn!("Instrument universe is empty, skipping cycle");
            return Ok(self
                .finish(CycleReport::empty(CycleStatus::EmptyUniverse, started_at), start)
                .await);
        }

        let universe_size = universe.len();
        let (symbols, excluded): (Vec<String>, Vec<String>) =
            universe.into_iter().partition(|s| !config.is_excluded(s));
        if !excluded.is_empty() {
            debug!(count = excluded.len(), symbols = ?excluded, "Excluded {} symbols by keyword", excluded.len());
        }

        info!(
            universe = universe_size,
            dispatched = symbols.len(),
            timeframe = %config.timeframe,
            "Scanning {} symbols on {} (24h volume >= {})",
            symbols.len(),
            config.timeframe,
            human_readable_number(config.volume_filter)
        );

        let delay = Duration::from_millis(self.config.request_delay_ms);
        let tasks: Vec<_> = symbols
            .iter()
            .map(|symbol| {
                let ctx = self.ctx.clone();
                let gate = self.gate.clone();
                let job = InstrumentJob::new(symbol.clone(), &config, self.config.history_limit);
                tokio::spawn(async move {
                    let Ok(_permit) = gate.acquire_owned().await else {
                        return InstrumentOutcome::Failed {
                            stage: PipelineStage::Fetch,
                            error: "admission gate closed".to_string(),
                        };
                    };
                    tokio::time::sleep(delay).await;
                    process_instrument(&ctx, job).await
                })
            })
            .collect();
        let results = join_all(tasks).await;

        let mut report = CycleReport::empty(CycleStatus::Completed, started_at);
        report.universe_size = universe_size;
        report.excluded = excluded.len();
        report.dispatched = symbols.len();

        for (symbol, result) in symbols.iter().zip(results) {
            let outcome = result.unwrap_or_else(|e| {
                error!(symbol = %symbol, error = %e, "Pipeline for {} aborted: {}", symbol, e);
                InstrumentOutcome::Failed {
                    stage: PipelineStage::Evaluate,
                    error: e.to_string(),
                }
            });
            self.observe(symbol, &outcome);
            report.record(&outcome);
        }

        Ok(self.finish(report, start).await)
    }

    fn observe(&self, symbol: &str, outcome: &InstrumentOutcome) {
        let Some(metrics) = &self.ctx.metrics else {
            return;
        };
        match outcome {
            InstrumentOutcome::Skipped(_) => {}
            InstrumentOutcome::NoSignal => metrics.instruments_processed_total.inc(),
            InstrumentOutcome::Signaled(direction) => {
                metrics.instruments_processed_total.inc();
                metrics.record_signal(*direction);
            }
            InstrumentOutcome::Undelivered { direction, .. } => {
                metrics.instruments_processed_total.inc();
                metrics.record_signal(*direction);
                metrics.record_failure(PipelineStage::Notify);
            }
            InstrumentOutcome::Failed { stage, error } => {
                debug!(symbol = %symbol, stage = %stage, error = %error, "Pipeline failure recorded for {}", symbol);
                metrics.record_failure(*stage);
            }
        }
    }

    async fn finish(&self, mut report: CycleReport, start: Instant) -> CycleReport {
        report.elapsed_ms = start.elapsed().as_millis() as u64;

        if let Some(metrics) = &self.ctx.metrics {
            match report.status {
                CycleStatus::Completed => {
                    metrics.cycles_total.inc();
                    metrics.universe_size.set(report.dispatched as i64);
                    metrics
                        .cycle_duration_seconds
                        .observe(report.elapsed().as_secs_f64());
                }
                CycleStatus::Disabled | CycleStatus::EmptyUniverse => {
                    metrics.cycles_skipped_total.inc()
                }
            }
        }

        if report.status == CycleStatus::Completed {
            info!(
                processed = report.processed,
                signals = report.signals(),
                pumps = report.pumps,
                dumps = report.dumps,
                skipped = report.skipped,
                failed = report.failed,
                elapsed_ms = report.elapsed_ms,
                "Cycle done: {} processed, {} signals in {:.2}s",
                report.processed,
                report.signals(),
                report.elapsed().as_secs_f64()
            );
        }

        *self.last_report.write().await = Some(report.clone());
        report
    }
}

#[async_trait]
impl CycleRunner for ScanOrchestrator {
    async fn run_cycle(&self) -> Result<CycleReport, CycleError> {
        ScanOrchestrator::run_cycle(self).await
    }
}
