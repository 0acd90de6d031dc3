//! Hammer and shooting star detection.
//!
//! Body and shadow sizes are judged against averages of the bars before the
//! latest one: the real body over 10 bars, the high-low range over 10 bars for
//! "very short" shadows and over 5 bars for "near" prices.

use crate::models::indicators::{Candle, CandlePattern};

const BODY_SHORT_PERIOD: usize = 10;
const SHADOW_VERY_SHORT_PERIOD: usize = 10;
const SHADOW_VERY_SHORT_FACTOR: f64 = 0.1;
const NEAR_PERIOD: usize = 5;
const NEAR_FACTOR: f64 = 0.2;

/// Bars needed before a pattern can be recognised
pub const PATTERN_MIN_BARS: usize = BODY_SHORT_PERIOD + 1;

fn average_body(window: &[Candle]) -> f64 {
    window.iter().map(Candle::body).sum::<f64>() / window.len() as f64
}

fn average_range(window: &[Candle]) -> f64 {
    window.iter().map(Candle::range).sum::<f64>() / window.len() as f64
}

/// Small body, long lower shadow, almost no upper shadow, body at or near the prior low
pub fn is_hammer(candles: &[Candle]) -> bool {
    let Some(ctx) = PatternContext::new(candles) else {
        return false;
    };
    let bar = ctx.bar;

    bar.body() < ctx.body_short
        && bar.lower_shadow() > bar.body()
        && bar.upper_shadow() < ctx.shadow_very_short
        && bar.open.min(bar.close) <= ctx.previous.low + ctx.near
}

/// Small body, long upper shadow, almost no lower shadow, body gapping above the prior body
pub fn is_shooting_star(candles: &[Candle]) -> bool {
    let Some(ctx) = PatternContext::new(candles) else {
        return false;
    };
    let bar = ctx.bar;

    bar.body() < ctx.body_short
        && bar.upper_shadow() > bar.body()
        && bar.lower_shadow() < ctx.shadow_very_short
        && bar.open.min(bar.close) > ctx.previous.open.max(ctx.previous.close)
}

/// Pattern present on the latest bar
pub fn detect_candle_pattern(candles: &[Candle]) -> CandlePattern {
    if is_hammer(candles) {
        CandlePattern::Hammer
    } else if is_shooting_star(candles) {
        CandlePattern::ShootingStar
    } else {
        CandlePattern::None
    }
}

struct PatternContext<'a> {
    bar: &'a Candle,
    previous: &'a Candle,
    body_short: f64,
    shadow_very_short: f64,
    near: f64,
}

impl<'a> PatternContext<'a> {
    fn new(candles: &'a [Candle]) -> Option<Self> {
        if candles.len() < PATTERN_MIN_BARS {
            return None;
        }
        let (bar, prior) = candles.split_last()?;
        let previous = prior.last()?;

        Some(Self {
            bar,
            previous,
            body_short: average_body(&prior[prior.len() - BODY_SHORT_PERIOD..]),
            shadow_very_short: average_range(&prior[prior.len() - SHADOW_VERY_SHORT_PERIOD..])
                * SHADOW_VERY_SHORT_FACTOR,
            near: average_range(&prior[prior.len() - NEAR_PERIOD..]) * NEAR_FACTOR,
        })
    }
}
