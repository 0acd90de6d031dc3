//! ADX (Average Directional Index) indicator

use crate::common::math;
use crate::models::indicators::{AdxIndicator, Candle};

pub const ADX_PERIOD: usize = 14;
pub const ADX_STRONG_TREND: f64 = 25.0;

/// Aligned ADX line with the directional indicators it was derived from
#[derive(Debug, Clone, PartialEq)]
pub struct AdxSeries {
    pub adx: Vec<Option<f64>>,
    pub plus_di: Vec<Option<f64>>,
    pub minus_di: Vec<Option<f64>>,
}

/// ADX with Wilder smoothing.
///
/// ADX measures trend strength regardless of direction. TR, +DM and -DM are
/// summed over the first `period` moves and then smoothed as
/// `prev - prev / period + current`. DX is 0 whenever the smoothed TR or the
/// DI sum is zero. The first ADX is the mean of the first `period` DX values
/// and lands at index `2 * period - 1`.
pub fn adx_series(candles: &[Candle], period: usize) -> AdxSeries {
    let len = candles.len();
    let mut result = AdxSeries {
        adx: vec![None; len],
        plus_di: vec![None; len],
        minus_di: vec![None; len],
    };
    if period == 0 || len < 2 * period {
        return result;
    }

    let mut tr_values = vec![0.0; len];
    let mut plus_dm_values = vec![0.0; len];
    let mut minus_dm_values = vec![0.0; len];

    for i in 1..len {
        tr_values[i] = math::true_range(candles[i].high, candles[i].low, candles[i - 1].close);

        let up_move = candles[i].high - candles[i - 1].high;
        let down_move = candles[i - 1].low - candles[i].low;
        if up_move > down_move && up_move > 0.0 {
            plus_dm_values[i] = up_move;
        }
        if down_move > up_move && down_move > 0.0 {
            minus_dm_values[i] = down_move;
        }
    }

    let n = period as f64;
    let mut smoothed_tr: f64 = tr_values[1..=period].iter().sum();
    let mut smoothed_plus: f64 = plus_dm_values[1..=period].iter().sum();
    let mut smoothed_minus: f64 = minus_dm_values[1..=period].iter().sum();

    let mut dx_values = vec![0.0; len];
    for i in period..len {
        if i > period {
            smoothed_tr = smoothed_tr - smoothed_tr / n + tr_values[i];
            smoothed_plus = smoothed_plus - smoothed_plus / n + plus_dm_values[i];
            smoothed_minus = smoothed_minus - smoothed_minus / n + minus_dm_values[i];
        }

        let (plus_di, minus_di) = if smoothed_tr > 0.0 {
            (
                100.0 * smoothed_plus / smoothed_tr,
                100.0 * smoothed_minus / smoothed_tr,
            )
        } else {
            (0.0, 0.0)
        };
        result.plus_di[i] = Some(plus_di);
        result.minus_di[i] = Some(minus_di);

        let di_sum = plus_di + minus_di;
        dx_values[i] = if di_sum > 0.0 {
            100.0 * (plus_di - minus_di).abs() / di_sum
        } else {
            0.0
        };
    }

    let first = 2 * period - 1;
    let mut adx = dx_values[period..=first].iter().sum::<f64>() / n;
    result.adx[first] = Some(adx);
    for i in (first + 1)..len {
        adx = (adx * (n - 1.0) + dx_values[i]) / n;
        result.adx[i] = Some(adx);
    }
    result
}

/// Calculate the latest ADX indicator
pub fn calculate_adx(candles: &[Candle], period: u32) -> Option<AdxIndicator> {
    let series = adx_series(candles, period as usize);

    Some(AdxIndicator {
        value: math::latest(&series.adx)?,
        plus_di: math::latest(&series.plus_di)?,
        minus_di: math::latest(&series.minus_di)?,
        period,
    })
}

/// Calculate ADX with default period (14)
pub fn calculate_adx_default(candles: &[Candle]) -> Option<AdxIndicator> {
    calculate_adx(candles, ADX_PERIOD as u32)
}
