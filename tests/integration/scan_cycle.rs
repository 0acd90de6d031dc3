//! Full scan cycles against mocked Bybit and Telegram APIs

use std::sync::Arc;

use pumpwatch::config::{InMemoryConfigStore, RuntimeConfig};
use pumpwatch::core::{CycleStatus, OrchestratorConfig, ScanOrchestrator};
use pumpwatch::jobs::JobContext;
use pumpwatch::metrics::Metrics;
use pumpwatch::services::bybit::BybitRestClient;
use pumpwatch::services::notifier::TelegramNotifier;
use wiremock::MockServer;

use crate::support::{candles_from_closes, flat_closes, pump_closes};
use crate::test_utils::{
    mock_instrument, mock_klines, mock_telegram_ok, mock_tickers, received_json, TEST_CHAT_ID,
    TEST_TOKEN,
};

struct Upstreams {
    bybit: MockServer,
    telegram: MockServer,
}

impl Upstreams {
    async fn start() -> Self {
        let bybit = MockServer::start().await;
        mock_tickers(
            &bybit,
            &[
                ("PUMPUSDT", "25000000"),
                ("FLATUSDT", "12000000"),
                ("AIMEMEUSDT", "90000000"),
                ("QUIETUSDT", "1000"),
                ("PUMPUSDC", "25000000"),
            ],
        )
        .await;
        for (symbol, closes) in [
            ("PUMPUSDT", pump_closes()),
            ("FLATUSDT", flat_closes(60)),
            ("AIMEMEUSDT", pump_closes()),
        ] {
            mock_instrument(&bybit, symbol).await;
            mock_klines(&bybit, symbol, &candles_from_closes(&closes)).await;
        }

        let telegram = MockServer::start().await;
        mock_telegram_ok(&telegram).await;
        Self { bybit, telegram }
    }

    fn orchestrator(&self, config: RuntimeConfig, metrics: Option<Arc<Metrics>>) -> ScanOrchestrator {
        let ctx = JobContext::new(
            Arc::new(BybitRestClient::with_client(&self.bybit.uri(), reqwest::Client::new())),
            Arc::new(TelegramNotifier::with_client(&self.telegram.uri(), reqwest::Client::new())),
            Arc::new(InMemoryConfigStore::new(config)),
            metrics,
        );
        ScanOrchestrator::new(
            Arc::new(ctx),
            OrchestratorConfig {
                concurrency: 2,
                request_delay_ms: 0,
                ..OrchestratorConfig::default()
            },
        )
    }
}

fn configured() -> RuntimeConfig {
    RuntimeConfig {
        telegram_token: TEST_TOKEN.to_string(),
        chat_id: TEST_CHAT_ID.to_string(),
        ..RuntimeConfig::default()
    }
}

#[tokio::test]
async fn cycle_delivers_pump_alert() {
    let upstreams = Upstreams::start().await;
    let metrics = Arc::new(Metrics::new().unwrap());
    let orchestrator = upstreams.orchestrator(configured(), Some(metrics.clone()));

    let report = orchestrator.run_cycle().await.unwrap();

    assert_eq!(report.status, CycleStatus::Completed);
    assert_eq!(report.universe_size, 3);
    assert_eq!(report.excluded, 1);
    assert_eq!(report.dispatched, 2);
    assert_eq!(report.processed, 2);
    assert_eq!(report.pumps, 1);
    assert_eq!(report.dumps, 0);
    assert_eq!(report.undelivered, 0);

    let messages = received_json(&upstreams.telegram).await;
    assert_eq!(messages.len(), 1);
    let text = messages[0]["text"].as_str().unwrap();
    assert!(text.contains("<b>Symbol:</b> PUMPUSDT"));
    assert!(text.contains("<b>Triggered 5 of 11 indicators</b>"));

    let exported = metrics.export().unwrap();
    assert!(exported.contains("pumpwatch_signals_total{direction=\"pump\"} 1"));
    assert!(exported.contains("pumpwatch_cycles_total 1"));
}

#[tokio::test]
async fn cycle_without_credentials_counts_undelivered() {
    let upstreams = Upstreams::start().await;
    let orchestrator = upstreams.orchestrator(RuntimeConfig::default(), None);

    let report = orchestrator.run_cycle().await.unwrap();

    assert_eq!(report.pumps, 1);
    assert_eq!(report.undelivered, 1);
    assert!(received_json(&upstreams.telegram).await.is_empty());
}

#[tokio::test]
async fn volume_filter_comes_from_runtime_config() {
    let upstreams = Upstreams::start().await;
    let config = RuntimeConfig {
        volume_filter: 20_000_000.0,
        ..configured()
    };
    let orchestrator = upstreams.orchestrator(config, None);

    let report = orchestrator.run_cycle().await.unwrap();
    assert_eq!(report.universe_size, 2);
    assert_eq!(report.dispatched, 1);
    assert_eq!(report.pumps, 1);
}

#[tokio::test]
async fn disabled_bot_makes_no_requests() {
    let upstreams = Upstreams::start().await;
    let config = RuntimeConfig {
        bot_status: false,
        ..configured()
    };
    let orchestrator = upstreams.orchestrator(config, None);

    let report = orchestrator.run_cycle().await.unwrap();
    assert_eq!(report.status, CycleStatus::Disabled);
    assert!(upstreams
        .bybit
        .received_requests()
        .await
        .unwrap_or_default()
        .is_empty());
}
