//! Unit tests for alert formatting

use pumpwatch::config::{IndicatorConfig, Timeframe};
use pumpwatch::services::notifier::{escape_html, format_alert, tradingview_url, SignalAlert};
use pumpwatch::signals::SignalEngine;

use crate::support::{dump_closes, pump_closes, series_from_closes};

fn alert_for(closes: &[f64], symbol: &str) -> SignalAlert {
    let config = IndicatorConfig::default().with_min_indicators(2);
    let (evaluation, verdict) = SignalEngine::run(&series_from_closes(closes), &config, symbol).unwrap();
    SignalAlert {
        symbol: symbol.to_string(),
        timeframe: Timeframe::M5,
        evaluation,
        verdict,
    }
}

#[test]
fn test_tradingview_url() {
    assert_eq!(
        tradingview_url("btcusdt"),
        "https://www.tradingview.com/chart/?symbol=BYBIT:BTCUSDT.P"
    );
}

#[test]
fn test_escape_html() {
    assert_eq!(escape_html("a<b>&c"), "a&lt;b&gt;&amp;c");
}

#[test]
fn test_pump_alert_layout() {
    let text = format_alert(&alert_for(&pump_closes(), "PUMPUSDT"));
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "<b>🚀 PUMP</b> | <b>+2.64%</b> (5m)");
    assert_eq!(lines[1], "<b>Symbol:</b> PUMPUSDT");
    assert_eq!(lines[2], "<b>Price:</b> 77.872000");
    assert_eq!(lines[3], "<b>Triggered 5 of 11 indicators</b>");
    assert_eq!(lines[4], "✅ Price Change: +2.64%");
    assert_eq!(lines[5], "✅ RSI: 24.3 (oversold)");
    assert!(lines.contains(&"• Bollinger: inside bands"));
    assert!(lines.contains(&"• Candle Patterns: none"));
    assert_eq!(
        lines.last().copied(),
        Some("<a href=\"https://www.tradingview.com/chart/?symbol=BYBIT:PUMPUSDT.P\">Open chart on TradingView</a>")
    );
    assert!(lines.iter().any(|l| l.starts_with("<i>Price Change=+2.64%")));
}

#[test]
fn test_dump_alert_header() {
    let text = format_alert(&alert_for(&dump_closes(), "DUMPUSDT"));
    assert!(text.starts_with("<b>📉 DUMP</b> | <b>-1.61%</b> (5m)"));
    assert!(text.contains("✅ RSI: 75.7 (overbought)"));
    assert!(text.contains("• Volume Surge: x1.00"));
}
