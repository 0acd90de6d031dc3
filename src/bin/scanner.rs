//! Pumpwatch Scanner
//!
//! Runs the scan orchestrator on a fixed interval and, when `PORT` is set,
//! serves health, metrics and last-cycle status over HTTP.

use std::sync::Arc;
use std::time::Duration;

use dotenvy::dotenv;
use pumpwatch::config::{ConfigStore, JsonFileConfigStore, ScannerSettings};
use pumpwatch::core::http::{start_server, AppState};
use pumpwatch::core::orchestrator::{OrchestratorConfig, ScanOrchestrator};
use pumpwatch::core::scheduler::ScanScheduler;
use pumpwatch::jobs::JobContext;
use pumpwatch::logging;
use pumpwatch::metrics::Metrics;
use pumpwatch::services::bybit::BybitRestClient;
use pumpwatch::services::notifier::TelegramNotifier;
use tokio::signal;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    let log_format = logging::init_logging()?;

    let settings = ScannerSettings::from_env()?;
    let env = pumpwatch::config::get_environment();
    info!("Starting Pumpwatch Scanner");
    info!(environment = %env, log_format = ?log_format, "Environment: {}", env);
    info!(
        interval = settings.interval_seconds,
        concurrency = settings.concurrency,
        "Scan: every {} seconds, {} instruments in flight",
        settings.interval_seconds,
        settings.concurrency
    );

    let config_store = Arc::new(JsonFileConfigStore::new(&settings.config_path));
    let initial = config_store.load()?;
    info!(
        path = %settings.config_path,
        timeframe = %initial.timeframe,
        bot_status = initial.bot_status,
        "Runtime config loaded from {}",
        settings.config_path
    );
    if !initial.credentials().is_complete() {
        warn!("telegram_token or chat_id is empty; alerts will fail until they are configured");
    }

    let metrics = Arc::new(Metrics::new()?);
    let data_provider = Arc::new(BybitRestClient::new(&settings.bybit_api_url)?);
    let notifier = Arc::new(TelegramNotifier::new(&settings.telegram_api_url)?);

    let job_context = Arc::new(JobContext::new(
        data_provider,
        notifier,
        config_store,
        Some(metrics.clone()),
    ));

    let orchestrator = Arc::new(ScanOrchestrator::new(
        job_context,
        OrchestratorConfig {
            interval_seconds: settings.interval_seconds,
            concurrency: settings.concurrency,
            request_delay_ms: settings.request_delay_ms,
            history_limit: settings.history_limit,
        },
    ));

    let server_handle = settings.port.map(|port| {
        let state = AppState::new(
            metrics.clone(),
            orchestrator.report_handle(),
            Duration::from_secs(settings.interval_seconds),
        );
        tokio::spawn(async move {
            if let Err(e) = start_server(port, state).await {
                error!(error = %e, "HTTP server error: {}", e);
            }
        })
    });

    let scheduler = ScanScheduler::new(orchestrator, settings.interval_seconds)?;
    scheduler.start().await;

    info!("Scanner started, waiting for shutdown signal...");
    signal::ctrl_c().await?;
    info!("Shutting down scanner...");
    scheduler.stop().await;
    if let Some(handle) = server_handle {
        handle.abort();
    }
    info!("Scanner stopped");

    Ok(())
}
