//! Unit tests for ADX indicator

use pumpwatch::indicators::trend::{adx_series, calculate_adx_default, ADX_PERIOD};

use crate::support::{assert_close, candles_from_closes, flat_closes, pump_closes, rising_closes};

#[test]
fn test_adx_needs_two_periods() {
    assert!(calculate_adx_default(&candles_from_closes(&rising_closes(27))).is_none());
    assert!(calculate_adx_default(&candles_from_closes(&rising_closes(28))).is_some());
}

#[test]
fn test_adx_first_value_index() {
    let series = adx_series(&candles_from_closes(&rising_closes(40)), ADX_PERIOD);
    assert!(series.adx[26].is_none());
    assert!(series.adx[27].is_some());
    assert!(series.plus_di[14].is_some());
}

#[test]
fn test_adx_one_way_trend_is_maximal() {
    let adx = calculate_adx_default(&candles_from_closes(&rising_closes(60))).unwrap();
    assert_close(adx.value, 100.0, 1e-9);
    assert!(adx.plus_di > adx.minus_di);
}

#[test]
fn test_adx_flat_series_is_zero() {
    let adx = calculate_adx_default(&candles_from_closes(&flat_closes(60))).unwrap();
    assert_eq!(adx.value, 0.0);
}

#[test]
fn test_adx_scenario_strong_trend() {
    let adx = calculate_adx_default(&candles_from_closes(&pump_closes())).unwrap();
    assert_close(adx.value, 97.27, 0.01);
    assert!(adx.minus_di > adx.plus_di);
}
