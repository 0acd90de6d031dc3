//! Unit tests for candlestick pattern detection

use pumpwatch::indicators::patterns::{detect_candle_pattern, is_hammer, is_shooting_star};
use pumpwatch::models::indicators::{Candle, CandlePattern};

use crate::support::ts;

fn prior_bars(count: usize) -> Vec<Candle> {
    (0..count)
        .map(|i| Candle::new(100.0, 101.5, 99.5, 101.0, 1000.0, ts(i)))
        .collect()
}

fn with_last(count: usize, open: f64, high: f64, low: f64, close: f64) -> Vec<Candle> {
    let mut candles = prior_bars(count);
    candles.push(Candle::new(open, high, low, close, 1000.0, ts(count)));
    candles
}

#[test]
fn test_hammer_detected() {
    let candles = with_last(12, 99.6, 99.85, 98.5, 99.8);
    assert!(is_hammer(&candles));
    assert!(!is_shooting_star(&candles));
    assert_eq!(detect_candle_pattern(&candles), CandlePattern::Hammer);
}

#[test]
fn test_shooting_star_detected() {
    let candles = with_last(12, 101.6, 103.0, 101.55, 101.8);
    assert!(is_shooting_star(&candles));
    assert!(!is_hammer(&candles));
    assert_eq!(detect_candle_pattern(&candles), CandlePattern::ShootingStar);
}

#[test]
fn test_pattern_needs_eleven_bars() {
    let candles = with_last(9, 99.6, 99.85, 98.5, 99.8);
    assert_eq!(candles.len(), 10);
    assert_eq!(detect_candle_pattern(&candles), CandlePattern::None);

    let candles = with_last(10, 99.6, 99.85, 98.5, 99.8);
    assert_eq!(detect_candle_pattern(&candles), CandlePattern::Hammer);
}

#[test]
fn test_large_body_is_not_a_pattern() {
    let candles = with_last(12, 97.0, 99.1, 95.0, 99.0);
    assert_eq!(detect_candle_pattern(&candles), CandlePattern::None);
}

#[test]
fn test_hammer_with_upper_shadow_rejected() {
    let candles = with_last(12, 99.6, 100.3, 98.5, 99.8);
    assert!(!is_hammer(&candles));
}
