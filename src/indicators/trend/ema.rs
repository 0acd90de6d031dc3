//! EMA (Exponential Moving Average) indicator and two-line crossover

use crate::common::math;
use crate::models::indicators::Crossover;

pub const EMA_FAST: usize = 12;
pub const EMA_SLOW: usize = 26;

/// Cross of `fast` over `slow` between the previous and the latest bar.
///
/// Bullish when fast is above slow now and was at or below it on the previous
/// bar; bearish is the mirror. Any undefined value means no cross.
pub fn detect_crossover(fast: &[Option<f64>], slow: &[Option<f64>]) -> Crossover {
    let (Some(fast_now), Some(fast_prev), Some(slow_now), Some(slow_prev)) = (
        math::latest(fast),
        math::nth_back(fast, 1),
        math::latest(slow),
        math::nth_back(slow, 1),
    ) else {
        return Crossover::None;
    };

    if fast_now > slow_now && fast_prev <= slow_prev {
        Crossover::Bullish
    } else if fast_now < slow_now && fast_prev >= slow_prev {
        Crossover::Bearish
    } else {
        Crossover::None
    }
}

/// Latest fast/slow EMA pair and their crossover state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmaCross {
    pub fast: Option<f64>,
    pub slow: Option<f64>,
    pub cross: Crossover,
}

pub fn ema_crossover(closes: &[f64], fast_period: usize, slow_period: usize) -> EmaCross {
    let fast = math::ema_series(closes, fast_period);
    let slow = math::ema_series(closes, slow_period);

    EmaCross {
        fast: math::latest(&fast),
        slow: math::latest(&slow),
        cross: detect_crossover(&fast, &slow),
    }
}

/// EMA 12 / EMA 26 crossover on close
pub fn ema_crossover_default(closes: &[f64]) -> EmaCross {
    ema_crossover(closes, EMA_FAST, EMA_SLOW)
}
