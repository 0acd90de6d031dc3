//! Bollinger Bands on close

use crate::common::math;
use crate::models::indicators::{BollingerBandsIndicator, Candle};

pub const BOLLINGER_PERIOD: usize = 20;
pub const BOLLINGER_STD_DEV: f64 = 2.0;

/// Aligned band series, first defined at index `period - 1`
#[derive(Debug, Clone, PartialEq)]
pub struct BollingerSeries {
    pub upper: Vec<Option<f64>>,
    pub middle: Vec<Option<f64>>,
    pub lower: Vec<Option<f64>>,
}

/// Middle = SMA(period), outer bands at `width` population standard deviations
pub fn bollinger_series(closes: &[f64], period: usize, width: f64) -> BollingerSeries {
    let middle = math::sma_series(closes, period);
    let deviation = math::standard_deviation_series(closes, period);

    let band = |sign: f64| -> Vec<Option<f64>> {
        middle
            .iter()
            .zip(&deviation)
            .map(|(m, d)| Some((*m)? + sign * width * (*d)?))
            .collect()
    };
    let upper = band(1.0);
    let lower = band(-1.0);

    BollingerSeries {
        upper,
        middle,
        lower,
    }
}

/// Latest bands over `period` closes
pub fn calculate_bollinger_bands(
    candles: &[Candle],
    period: u32,
    std_dev: f64,
) -> Option<BollingerBandsIndicator> {
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let series = bollinger_series(&closes, period as usize, std_dev);

    Some(BollingerBandsIndicator {
        upper: math::latest(&series.upper)?,
        middle: math::latest(&series.middle)?,
        lower: math::latest(&series.lower)?,
        period,
        std_dev,
    })
}

/// Calculate Bollinger Bands with default parameters (20 SMA, 2σ)
pub fn calculate_bollinger_bands_default(candles: &[Candle]) -> Option<BollingerBandsIndicator> {
    calculate_bollinger_bands(candles, BOLLINGER_PERIOD as u32, BOLLINGER_STD_DEV)
}
