//! Bybit v5 REST payloads

use chrono::DateTime;
use serde::Deserialize;

use crate::error::MarketDataError;
use crate::models::indicators::Candle;

/// Envelope shared by every v5 endpoint
#[derive(Debug, Deserialize)]
pub struct BybitResponse<T> {
    #[serde(rename = "retCode")]
    pub ret_code: i64,
    #[serde(rename = "retMsg", default)]
    pub ret_msg: String,
    pub result: Option<T>,
}

impl<T> BybitResponse<T> {
    /// The `result` body, or an error when `retCode != 0`
    pub fn into_result(self) -> Result<T, MarketDataError> {
        if self.ret_code != 0 {
            return Err(MarketDataError::Upstream {
                code: self.ret_code,
                message: self.ret_msg,
            });
        }
        self.result
            .ok_or_else(|| MarketDataError::Malformed("response has no result".to_string()))
    }
}

#[derive(Debug, Deserialize)]
pub struct ListResult<T> {
    #[serde(default = "Vec::new")]
    pub list: Vec<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TickerEntry {
    pub symbol: String,
    #[serde(rename = "turnover24h", default)]
    pub turnover_24h: String,
}

impl TickerEntry {
    /// 24h quote volume, `None` when missing or unparsable
    pub fn turnover(&self) -> Option<f64> {
        self.turnover_24h.parse().ok()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct InstrumentEntry {
    pub symbol: String,
    #[serde(default)]
    pub status: Option<String>,
}

impl InstrumentEntry {
    /// Listed and open for trading; entries without a status count as trading
    pub fn is_trading(&self) -> bool {
        self.status.as_deref().map_or(true, |s| s == "Trading")
    }
}

/// `[startTime, open, high, low, close, volume, turnover]`, all strings
pub type KlineRow = Vec<String>;

pub fn parse_kline_row(row: &[String]) -> Result<Candle, MarketDataError> {
    if row.len() < 6 {
        return Err(MarketDataError::Malformed(format!(
            "kline row has {} fields, expected at least 6",
            row.len()
        )));
    }

    let start_ms: i64 = parse_field(row, 0)?;
    let timestamp = DateTime::from_timestamp_millis(start_ms)
        .ok_or_else(|| MarketDataError::Malformed(format!("timestamp out of range: {}", start_ms)))?;

    let candle = Candle::new(
        parse_field(row, 1)?,
        parse_field(row, 2)?,
        parse_field(row, 3)?,
        parse_field(row, 4)?,
        parse_field(row, 5)?,
        timestamp,
    );
    let values = [candle.open, candle.high, candle.low, candle.close, candle.volume];
    if values.iter().any(|v| !v.is_finite()) || candle.volume < 0.0 {
        return Err(MarketDataError::Malformed(format!(
            "non-finite or negative kline values at {}",
            start_ms
        )));
    }
    Ok(candle)
}

fn parse_field<T: std::str::FromStr>(row: &[String], index: usize) -> Result<T, MarketDataError> {
    row[index]
        .parse()
        .map_err(|_| MarketDataError::Malformed(format!("unparsable kline field {}: '{}'", index, row[index])))
}
