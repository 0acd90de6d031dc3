//! HTML alert text

use crate::models::signal::SignalDirection;

use super::SignalAlert;

pub fn tradingview_url(symbol: &str) -> String {
    format!(
        "https://www.tradingview.com/chart/?symbol=BYBIT:{}.P",
        symbol.to_uppercase()
    )
}

/// Escape the characters Telegram's HTML parse mode treats as markup
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

pub fn format_alert(alert: &SignalAlert) -> String {
    let (icon, label) = match alert.verdict.direction {
        SignalDirection::Pump => ("🚀", "PUMP"),
        SignalDirection::Dump => ("📉", "DUMP"),
        SignalDirection::None => ("⚪", "SIGNAL"),
    };
    let symbol = escape_html(&alert.symbol);

    let mut lines = vec![
        format!(
            "<b>{} {}</b> | <b>{:+.2}%</b> ({})",
            icon, label, alert.evaluation.price_change_pct, alert.timeframe
        ),
        format!("<b>Symbol:</b> {}", symbol),
        format!("<b>Price:</b> {:.6}", alert.evaluation.last_close),
        format!(
            "<b>Triggered {} of {} indicators</b>",
            alert.verdict.triggered_count, alert.verdict.total_enabled
        ),
    ];

    for reading in &alert.evaluation.readings {
        let fired = alert.verdict.triggered.contains(&reading.kind);
        lines.push(format!(
            "{} {}: {}",
            if fired { "✅" } else { "•" },
            escape_html(reading.kind.label()),
            escape_html(&reading.reading.describe())
        ));
    }

    lines.push(format!("<i>{}</i>", escape_html(&alert.verdict.comment)));
    lines.push(format!(
        "<a href=\"{}\">Open chart on TradingView</a>",
        tradingview_url(&alert.symbol)
    ));
    lines.join("\n")
}
