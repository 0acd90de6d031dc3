//! Bybit REST client implementing [`MarketDataProvider`]

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, warn};

use crate::config::Timeframe;
use crate::error::MarketDataError;
use crate::models::indicators::{Candle, PriceSeries};
use crate::services::market_data::MarketDataProvider;

use super::messages::{
    parse_kline_row, BybitResponse, InstrumentEntry, KlineRow, ListResult, TickerEntry,
};

const CATEGORY: &str = "linear";
const QUOTE_SUFFIX: &str = "USDT";
const REQUEST_TIMEOUT_SECS: u64 = 15;

/// Universe selection counts from one tickers call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UniverseStats {
    pub total: usize,
    pub kept: usize,
    pub rejected_quote: usize,
    pub rejected_volume: usize,
}

pub struct BybitRestClient {
    base_url: String,
    http: Client,
}

impl BybitRestClient {
    pub fn new(base_url: &str) -> Result<Self, MarketDataError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self::with_client(base_url, http))
    }

    pub fn with_client(base_url: &str, http: Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, MarketDataError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.http.get(&url).query(query).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MarketDataError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: BybitResponse<T> = response
            .json()
            .await
            .map_err(|e| MarketDataError::Malformed(e.to_string()))?;
        envelope.into_result()
    }

    /// USDT-quoted symbols whose 24h turnover reaches `min_quote_volume`
    pub async fn tradable_symbols(
        &self,
        min_quote_volume: f64,
    ) -> Result<(Vec<String>, UniverseStats), MarketDataError> {
        let tickers: ListResult<TickerEntry> = self
            .get("/v5/market/tickers", &[("category", CATEGORY)])
            .await?;

        let mut stats = UniverseStats {
            total: tickers.list.len(),
            ..UniverseStats::default()
        };
        let mut symbols = Vec::new();
        for ticker in tickers.list {
            if !ticker.symbol.ends_with(QUOTE_SUFFIX) {
                stats.rejected_quote += 1;
                continue;
            }
            match ticker.turnover() {
                Some(turnover) if turnover >= min_quote_volume => symbols.push(ticker.symbol),
                _ => stats.rejected_volume += 1,
            }
        }
        stats.kept = symbols.len();
        Ok((symbols, stats))
    }

    /// Whether Bybit lists `symbol` in the linear category with status `Trading`
    pub async fn instrument_exists(&self, symbol: &str) -> Result<bool, MarketDataError> {
        let instruments: ListResult<InstrumentEntry> = self
            .get(
                "/v5/market/instruments-info",
                &[("category", CATEGORY), ("symbol", symbol)],
            )
            .await?;
        Ok(instruments
            .list
            .iter()
            .any(|i| i.symbol == symbol && i.is_trading()))
    }

    /// Klines parsed oldest-first; Bybit returns them newest-first
    pub async fn klines(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<PriceSeries, MarketDataError> {
        let limit = limit.to_string();
        let rows: ListResult<KlineRow> = self
            .get(
                "/v5/market/kline",
                &[
                    ("category", CATEGORY),
                    ("symbol", symbol),
                    ("interval", timeframe.bybit_interval()),
                    ("limit", limit.as_str()),
                ],
            )
            .await?;

        let candles = rows
            .list
            .iter()
            .map(|row| parse_kline_row(row))
            .collect::<Result<Vec<Candle>, _>>()?;
        Ok(PriceSeries::new(candles))
    }
}

#[async_trait]
impl MarketDataProvider for BybitRestClient {
    async fn list_tradable_symbols(&self, min_quote_volume: f64) -> Vec<String> {
        match self.tradable_symbols(min_quote_volume).await {
            Ok((symbols, stats)) => {
                info!(
                    total = stats.total,
                    kept = stats.kept,
                    rejected_quote = stats.rejected_quote,
                    rejected_volume = stats.rejected_volume,
                    "Universe: {} of {} tickers pass the USDT and volume filters",
                    stats.kept,
                    stats.total
                );
                symbols
            }
            Err(e) => {
                error!(error = %e, "Failed to fetch ticker universe: {}", e);
                Vec::new()
            }
        }
    }

    async fn fetch_series(&self, symbol: &str, timeframe: Timeframe, limit: usize) -> PriceSeries {
        match self.instrument_exists(symbol).await {
            Ok(true) => {}
            Ok(false) => {
                warn!(symbol = %symbol, "Symbol {} is not a listed linear instrument", symbol);
                return PriceSeries::empty();
            }
            Err(e) => {
                error!(symbol = %symbol, error = %e, "Instrument lookup failed for {}: {}", symbol, e);
                return PriceSeries::empty();
            }
        }

        match self.klines(symbol, timeframe, limit).await {
            Ok(series) => {
                if series.is_empty() {
                    warn!(symbol = %symbol, timeframe = %timeframe, "No klines returned for {}", symbol);
                } else {
                    debug!(symbol = %symbol, bars = series.len(), "Fetched {} bars for {}", series.len(), symbol);
                }
                series
            }
            Err(e) => {
                error!(symbol = %symbol, error = %e, "Kline fetch failed for {}: {}", symbol, e);
                PriceSeries::empty()
            }
        }
    }
}
