//! Unit tests for Bybit payload parsing

use pumpwatch::error::MarketDataError;
use pumpwatch::services::bybit::messages::{
    parse_kline_row, BybitResponse, InstrumentEntry, KlineRow, ListResult, TickerEntry,
};

fn row(fields: &[&str]) -> KlineRow {
    fields.iter().map(|f| f.to_string()).collect()
}

#[test]
fn test_parse_kline_row() {
    let candle = parse_kline_row(&row(&[
        "1700000000000",
        "100.5",
        "101",
        "99.5",
        "100.8",
        "1234.5",
        "124000",
    ]))
    .unwrap();
    assert_eq!(candle.open, 100.5);
    assert_eq!(candle.high, 101.0);
    assert_eq!(candle.low, 99.5);
    assert_eq!(candle.close, 100.8);
    assert_eq!(candle.volume, 1234.5);
    assert_eq!(candle.timestamp.timestamp(), 1_700_000_000);
}

#[test]
fn test_parse_kline_row_rejects_short_rows() {
    let result = parse_kline_row(&row(&["1700000000000", "1", "1", "1", "1"]));
    assert!(matches!(result, Err(MarketDataError::Malformed(_))));
}

#[test]
fn test_parse_kline_row_rejects_bad_numbers() {
    assert!(parse_kline_row(&row(&["1700000000000", "x", "1", "1", "1", "1"])).is_err());
    assert!(parse_kline_row(&row(&["1700000000000", "NaN", "1", "1", "1", "1"])).is_err());
    assert!(parse_kline_row(&row(&["1700000000000", "1", "1", "1", "1", "-5"])).is_err());
}

#[test]
fn test_envelope_error_code() {
    let response: BybitResponse<ListResult<TickerEntry>> =
        serde_json::from_str(r#"{"retCode": 10001, "retMsg": "params error", "result": {}}"#).unwrap();
    match response.into_result() {
        Err(MarketDataError::Upstream { code, message }) => {
            assert_eq!(code, 10001);
            assert_eq!(message, "params error");
        }
        other => panic!("unexpected result {:?}", other.map(|r| r.list.len())),
    }
}

#[test]
fn test_ticker_turnover() {
    let response: BybitResponse<ListResult<TickerEntry>> = serde_json::from_str(
        r#"{"retCode": 0, "retMsg": "OK", "result": {"category": "linear", "list": [
            {"symbol": "BTCUSDT", "turnover24h": "123456.5"},
            {"symbol": "ODDUSDT", "turnover24h": ""}
        ]}}"#,
    )
    .unwrap();
    let list = response.into_result().unwrap().list;
    assert_eq!(list[0].turnover(), Some(123456.5));
    assert_eq!(list[1].turnover(), None);
}

#[test]
fn test_instrument_trading_status() {
    let parsed: ListResult<InstrumentEntry> = serde_json::from_str(
        r#"{"list":[{"symbol":"AUSDT","status":"Trading"},{"symbol":"BUSDT","status":"Settling"},{"symbol":"CUSDT"}]}"#,
    )
    .unwrap();
    let trading: Vec<bool> = parsed.list.iter().map(InstrumentEntry::is_trading).collect();
    assert_eq!(trading, vec![true, false, true]);
}
