//! Unit tests for MACD indicator

use pumpwatch::common::math::latest;
use pumpwatch::indicators::momentum::macd_series_default;
use pumpwatch::models::indicators::Crossover;

use crate::support::{dump_closes, pump_closes, rising_closes};

#[test]
fn test_macd_warmup_windows() {
    let series = macd_series_default(&rising_closes(40));
    assert!(series.macd[24].is_none());
    assert!(series.macd[25].is_some());
    assert!(series.signal[32].is_none());
    assert!(series.signal[33].is_some());
    assert!(series.histogram[33].is_some());
}

#[test]
fn test_macd_needs_34_bars_for_signal() {
    assert!(latest(&macd_series_default(&rising_closes(33)).signal).is_none());

    let series = macd_series_default(&rising_closes(34));
    let macd = latest(&series.macd).unwrap();
    let signal = latest(&series.signal).unwrap();
    let histogram = latest(&series.histogram).unwrap();
    assert!((histogram - (macd - signal)).abs() < 1e-12);
}

#[test]
fn test_macd_bullish_cross_on_final_bar() {
    let series = macd_series_default(&pump_closes());
    assert_eq!(series.crossover(), Crossover::Bullish);
}

#[test]
fn test_macd_bearish_cross_on_final_bar() {
    let series = macd_series_default(&dump_closes());
    assert_eq!(series.crossover(), Crossover::Bearish);
}

#[test]
fn test_macd_no_cross_during_warmup() {
    let series = macd_series_default(&rising_closes(30));
    assert_eq!(series.crossover(), Crossover::None);
}
