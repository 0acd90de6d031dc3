//! Unit tests for OBV

use pumpwatch::indicators::volume::{obv_delta, obv_series};

#[test]
fn test_obv_series_accumulates_flow() {
    let closes = [1.0, 2.0, 2.0, 1.0];
    let volumes = [10.0, 20.0, 30.0, 40.0];
    assert_eq!(obv_series(&closes, &volumes), vec![10.0, 30.0, 30.0, -10.0]);
    assert_eq!(obv_delta(&closes, &volumes), Some(-40.0));
}

#[test]
fn test_obv_delta_unchanged_close() {
    assert_eq!(obv_delta(&[5.0, 5.0], &[10.0, 99.0]), Some(0.0));
}

#[test]
fn test_obv_delta_needs_two_bars() {
    assert_eq!(obv_delta(&[5.0], &[10.0]), None);
    assert!(obv_series(&[], &[]).is_empty());
}
