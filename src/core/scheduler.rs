//! Fixed-interval scheduler driving scan cycles

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::{interval, Instant, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::core::orchestrator::CycleRunner;
use crate::error::ConfigError;

/// A tick that fires later than this after its deadline is dropped
const OVERDUE_TOLERANCE: Duration = Duration::from_secs(1);

/// Runs one cycle per interval on a single timer task.
///
/// Cycles run inline, so they never overlap. Ticks that fall due while a cycle
/// is still running are skipped rather than queued; the next cycle starts on
/// the next on-schedule tick.
pub struct ScanScheduler {
    runner: Arc<dyn CycleRunner>,
    period: Duration,
    handle: Arc<RwLock<Option<tokio::task::JoinHandle<()>>>>,
}

impl ScanScheduler {
    pub fn new(runner: Arc<dyn CycleRunner>, interval_seconds: u64) -> Result<Self, ConfigError> {
        if interval_seconds == 0 {
            return Err(ConfigError::Invalid(
                "scan interval must be greater than zero".to_string(),
            ));
        }
        Ok(Self::with_period(runner, Duration::from_secs(interval_seconds)))
    }

    pub fn with_period(runner: Arc<dyn CycleRunner>, period: Duration) -> Self {
        info!(
            interval_ms = period.as_millis() as u64,
            "ScanScheduler: created with interval {:?}",
            period
        );
        Self {
            runner,
            period,
            handle: Arc::new(RwLock::new(None)),
        }
    }

    /// Start the timer task; the first cycle runs immediately
    pub async fn start(&self) {
        let mut slot = self.handle.write().await;
        if slot.is_some() {
            debug!("ScanScheduler: already running");
            return;
        }

        let runner = self.runner.clone();
        let period = self.period;
        let handle = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                let deadline = ticker.tick().await;
                let lateness = Instant::now().saturating_duration_since(deadline);
                if lateness > OVERDUE_TOLERANCE {
                    debug!(
                        late_ms = lateness.as_millis() as u64,
                        "ScanScheduler: previous cycle overran, skipping tick"
                    );
                    continue;
                }

                // Cycle panics surface here as a JoinError
                let cycle_runner = runner.clone();
                let cycle = tokio::spawn(async move { cycle_runner.run_cycle().await });
                match cycle.await {
                    Ok(Ok(report)) => debug!(
                        status = ?report.status,
                        signals = report.signals(),
                        "ScanScheduler: cycle finished"
                    ),
                    Ok(Err(e)) => error!(error = %e, "ScanScheduler: cycle failed: {}", e),
                    Err(e) => error!(error = %e, "ScanScheduler: cycle aborted: {}", e),
                }
            }
        });

        *slot = Some(handle);
        info!("ScanScheduler: started");
    }

    /// Stop the timer; a cycle already in flight runs to completion
    pub async fn stop(&self) {
        let mut handle = self.handle.write().await;
        if let Some(h) = handle.take() {
            h.abort();
            info!("ScanScheduler: stopped");
        }
    }

    /// Check if the scheduler is running
    pub async fn is_running(&self) -> bool {
        let handle = self.handle.read().await;
        handle.is_some()
    }
}
