//! Unit tests for shared numeric kernels

use pumpwatch::common::math::*;

#[test]
fn test_sma_uses_trailing_window() {
    let values = [1.0, 2.0, 3.0, 4.0, 5.0];
    assert_eq!(sma(&values, 2), Some(4.5));
    assert_eq!(sma(&values, 6), None);
    assert_eq!(sma(&values, 0), None);
}

#[test]
fn test_sma_series_alignment() {
    let series = sma_series(&[1.0, 2.0, 3.0, 4.0], 3);
    assert_eq!(series, vec![None, None, Some(2.0), Some(3.0)]);
}

#[test]
fn test_ema_series_seeded_with_sma() {
    let series = ema_series(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);
    assert_eq!(series, vec![None, None, Some(2.0), Some(3.0), Some(4.0)]);
}

#[test]
fn test_ema_series_opt_skips_warmup_prefix() {
    let values = [None, None, Some(2.0), Some(4.0), Some(6.0)];
    let series = ema_series_opt(&values, 2);
    assert_eq!(series, vec![None, None, None, Some(3.0), Some(5.0)]);
}

#[test]
fn test_ema_series_opt_all_undefined() {
    let series = ema_series_opt(&[None, None, None], 2);
    assert!(series.iter().all(Option::is_none));
}

#[test]
fn test_standard_deviation_is_population() {
    let series = standard_deviation_series(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0], 8);
    assert!(series[6].is_none());
    assert!((series[7].unwrap() - 2.0).abs() < 1e-12);
}

#[test]
fn test_true_range_uses_previous_close_gaps() {
    assert_eq!(true_range(10.0, 9.0, 9.5), 1.0);
    assert_eq!(true_range(10.0, 9.0, 12.0), 3.0);
    assert_eq!(true_range(10.0, 9.0, 7.0), 3.0);
}

#[test]
fn test_percent_change_guards_zero_base() {
    assert_eq!(percent_change(100.0, 110.0), Some(10.0));
    assert_eq!(percent_change(0.0, 10.0), None);
}

#[test]
fn test_mean_of_empty_slice() {
    assert_eq!(mean(&[]), None);
    assert_eq!(mean(&[1.0, 3.0]), Some(2.0));
}

#[test]
fn test_latest_and_nth_back() {
    let series = [Some(1.0), None, Some(3.0)];
    assert_eq!(latest(&series), Some(3.0));
    assert_eq!(nth_back(&series, 1), None);
    assert_eq!(nth_back(&series, 2), Some(1.0));
    assert_eq!(nth_back(&series, 3), None);
}
