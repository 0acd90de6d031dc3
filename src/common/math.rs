//! Numeric kernels shared by the indicator library.
//!
//! Series helpers return a vector aligned to the input, with `None` for the
//! warm-up window and for any position whose value cannot be computed.

/// Simple moving average of the last `period` values
pub fn sma(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    let window = &values[values.len() - period..];
    Some(window.iter().sum::<f64>() / period as f64)
}

/// Rolling simple moving average, first defined at index `period - 1`
pub fn sma_series(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if period == 0 || values.len() < period {
        return out;
    }
    for i in (period - 1)..values.len() {
        let window = &values[i + 1 - period..=i];
        out[i] = Some(window.iter().sum::<f64>() / period as f64);
    }
    out
}

/// One EMA step from the previous EMA value
pub fn ema_from_previous(value: f64, previous: f64, period: usize) -> f64 {
    let k = 2.0 / (period as f64 + 1.0);
    value * k + previous * (1.0 - k)
}

/// Rolling EMA seeded with the SMA of the first `period` values
pub fn ema_series(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let wrapped: Vec<Option<f64>> = values.iter().copied().map(Some).collect();
    ema_series_opt(&wrapped, period)
}

/// Rolling EMA over a series that may carry a warm-up prefix of `None`.
///
/// Seeding starts at the first defined value. A hole after the seed leaves
/// that position undefined and the smoothing resumes on the next value.
pub fn ema_series_opt(values: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if period == 0 {
        return out;
    }
    let Some(start) = values.iter().position(Option::is_some) else {
        return out;
    };
    if values.len() - start < period {
        return out;
    }

    let seed_window = &values[start..start + period];
    if seed_window.iter().any(Option::is_none) {
        return out;
    }
    let seed = seed_window.iter().flatten().sum::<f64>() / period as f64;
    let seed_index = start + period - 1;
    out[seed_index] = Some(seed);

    let mut previous = seed;
    for i in (seed_index + 1)..values.len() {
        if let Some(value) = values[i] {
            previous = ema_from_previous(value, previous, period);
            out[i] = Some(previous);
        }
    }
    out
}

/// Rolling population standard deviation, aligned like [`sma_series`]
pub fn standard_deviation_series(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if period == 0 || values.len() < period {
        return out;
    }
    for i in (period - 1)..values.len() {
        out[i] = population_std(&values[i + 1 - period..=i]);
    }
    out
}

fn population_std(window: &[f64]) -> Option<f64> {
    let mean = mean(window)?;
    let variance = window.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / window.len() as f64;
    Some(variance.sqrt())
}

/// True range of a bar given the previous close
pub fn true_range(high: f64, low: f64, prev_close: f64) -> f64 {
    (high - low)
        .max((high - prev_close).abs())
        .max((low - prev_close).abs())
}

/// Arithmetic mean, `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Percent change from `from` to `to`; `None` when `from` is zero or the result is not finite
pub fn percent_change(from: f64, to: f64) -> Option<f64> {
    if from == 0.0 {
        return None;
    }
    let change = (to - from) / from * 100.0;
    change.is_finite().then_some(change)
}

/// Last value of an aligned series
pub fn latest(series: &[Option<f64>]) -> Option<f64> {
    series.last().copied().flatten()
}

/// Value `offset` positions before the last one (`offset = 0` is the latest)
pub fn nth_back(series: &[Option<f64>], offset: usize) -> Option<f64> {
    if offset >= series.len() {
        return None;
    }
    series[series.len() - 1 - offset]
}
