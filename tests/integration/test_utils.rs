//! Mock upstream helpers shared by the integration tests
#![allow(dead_code)]

use pumpwatch::models::indicators::Candle;
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_TOKEN: &str = "123456:TEST";
pub const TEST_CHAT_ID: &str = "-1001";

/// Successful Bybit v5 envelope around `result`
pub fn bybit_ok(result: Value) -> Value {
    json!({
        "retCode": 0,
        "retMsg": "OK",
        "result": result,
        "retExtInfo": {},
        "time": 1_700_000_000_000_i64
    })
}

/// `(symbol, turnover24h)` pairs as a tickers response
pub async fn mock_tickers(server: &MockServer, tickers: &[(&str, &str)]) {
    let list: Vec<Value> = tickers
        .iter()
        .map(|(symbol, turnover)| json!({ "symbol": symbol, "lastPrice": "1.0", "turnover24h": turnover }))
        .collect();

    Mock::given(method("GET"))
        .and(path("/v5/market/tickers"))
        .and(query_param("category", "linear"))
        .respond_with(ResponseTemplate::new(200).set_body_json(bybit_ok(json!({
            "category": "linear",
            "list": list
        }))))
        .mount(server)
        .await;
}

pub async fn mock_instrument(server: &MockServer, symbol: &str) {
    Mock::given(method("GET"))
        .and(path("/v5/market/instruments-info"))
        .and(query_param("symbol", symbol))
        .respond_with(ResponseTemplate::new(200).set_body_json(bybit_ok(json!({
            "category": "linear",
            "list": [{ "symbol": symbol, "status": "Trading" }]
        }))))
        .mount(server)
        .await;
}

/// Kline rows newest-first, the order Bybit returns them in
pub fn kline_rows(candles: &[Candle]) -> Vec<Value> {
    candles
        .iter()
        .rev()
        .map(|c| {
            json!([
                c.timestamp.timestamp_millis().to_string(),
                c.open.to_string(),
                c.high.to_string(),
                c.low.to_string(),
                c.close.to_string(),
                c.volume.to_string(),
                (c.volume * c.close).to_string()
            ])
        })
        .collect()
}

pub async fn mock_klines(server: &MockServer, symbol: &str, candles: &[Candle]) {
    Mock::given(method("GET"))
        .and(path("/v5/market/kline"))
        .and(query_param("symbol", symbol))
        .respond_with(ResponseTemplate::new(200).set_body_json(bybit_ok(json!({
            "category": "linear",
            "symbol": symbol,
            "list": kline_rows(candles)
        }))))
        .mount(server)
        .await;
}

/// Accept every sendMessage call for [`TEST_TOKEN`]
pub async fn mock_telegram_ok(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(format!("/bot{}/sendMessage", TEST_TOKEN)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "result": { "message_id": 1 }
        })))
        .mount(server)
        .await;
}

/// JSON bodies of every request the mock server received
pub async fn received_json(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter_map(|r| serde_json::from_slice(&r.body).ok())
        .collect()
}
