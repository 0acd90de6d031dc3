//! Two-point RSI/MACD divergence

use crate::common::math;
use crate::models::indicators::Divergence;

/// Bars between the two compared points
pub const DIVERGENCE_LOOKBACK: usize = 2;

/// Compare price, RSI and MACD at the latest bar against `DIVERGENCE_LOOKBACK` bars earlier.
///
/// Bullish when price fell while either oscillator rose, bearish when price
/// rose while either oscillator fell. Both oscillators must be defined at
/// both points, otherwise no divergence is reported.
pub fn detect_divergence(closes: &[f64], rsi: &[Option<f64>], macd: &[Option<f64>]) -> Divergence {
    if closes.len() < DIVERGENCE_LOOKBACK + 1 {
        return Divergence::None;
    }

    let (Some(rsi_now), Some(rsi_then), Some(macd_now), Some(macd_then)) = (
        math::latest(rsi),
        math::nth_back(rsi, DIVERGENCE_LOOKBACK),
        math::latest(macd),
        math::nth_back(macd, DIVERGENCE_LOOKBACK),
    ) else {
        return Divergence::None;
    };

    let last = closes.len() - 1;
    let price_diff = closes[last] - closes[last - DIVERGENCE_LOOKBACK];
    let rsi_diff = rsi_now - rsi_then;
    let macd_diff = macd_now - macd_then;

    if price_diff < 0.0 && (rsi_diff > 0.0 || macd_diff > 0.0) {
        Divergence::Bullish
    } else if price_diff > 0.0 && (rsi_diff < 0.0 || macd_diff < 0.0) {
        Divergence::Bearish
    } else {
        Divergence::None
    }
}
