//! Market data provider interface consumed by the scan orchestrator.

use async_trait::async_trait;

use crate::config::Timeframe;
use crate::models::indicators::PriceSeries;

/// Universe and history source.
///
/// Both operations fail closed: transport or parse problems are logged by the
/// implementation and surface as an empty list or an empty series.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Symbols eligible for scanning, filtered by 24h quote volume
    async fn list_tradable_symbols(&self, min_quote_volume: f64) -> Vec<String>;

    /// Oldest-first history for one symbol
    async fn fetch_series(&self, symbol: &str, timeframe: Timeframe, limit: usize) -> PriceSeries;
}
