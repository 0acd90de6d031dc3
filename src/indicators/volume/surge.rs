//! Volume surge and volume pre-surge detection

use crate::common::math;

pub const VOLUME_AVERAGE_PERIOD: usize = 20;
pub const VOLUME_SURGE_RATIO: f64 = 1.5;

pub const PRE_SURGE_WINDOW: usize = 5;
pub const PRE_SURGE_MIN_GROWTH: f64 = 20.0;
pub const PRE_SURGE_MAX_GROWTH: f64 = 50.0;
pub const PRE_SURGE_MAX_PRICE_MOVE: f64 = 1.0;

/// Latest volume divided by its `period` simple average.
///
/// `None` during warm-up or when the average volume is not positive.
pub fn volume_surge_ratio(volumes: &[f64], period: usize) -> Option<f64> {
    let current = *volumes.last()?;
    let average = math::sma(volumes, period)?;
    if average <= 0.0 {
        return None;
    }
    Some(current / average)
}

/// Quiet accumulation check over the last `PRE_SURGE_WINDOW` bars
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreSurge {
    /// Growth of mean volume, recent window against the window before it
    pub growth_percent: Option<f64>,
    /// Absolute close-to-close move over the recent window
    pub price_move_percent: Option<f64>,
    pub detected: bool,
}

impl PreSurge {
    fn none() -> Self {
        Self {
            growth_percent: None,
            price_move_percent: None,
            detected: false,
        }
    }
}

/// Volume pre-surge: mean volume of the last 5 bars against the 5 bars before
/// them (all earlier bars when fewer than 10 exist), while the close moved
/// less than 1% since 4 bars ago.
pub fn volume_pre_surge(closes: &[f64], volumes: &[f64]) -> PreSurge {
    let len = volumes.len().min(closes.len());
    if len < PRE_SURGE_WINDOW {
        return PreSurge::none();
    }
    let volumes = &volumes[volumes.len() - len..];
    let closes = &closes[closes.len() - len..];

    let recent_start = len - PRE_SURGE_WINDOW;
    let previous_start = recent_start.saturating_sub(PRE_SURGE_WINDOW);
    let recent = math::mean(&volumes[recent_start..]);
    let previous = math::mean(&volumes[previous_start..recent_start]);

    let growth_percent = match (recent, previous) {
        (Some(recent), Some(previous)) if previous > 0.0 => Some((recent / previous - 1.0) * 100.0),
        _ => None,
    };
    let price_move_percent =
        math::percent_change(closes[recent_start], closes[len - 1]).map(f64::abs);

    let detected = match (growth_percent, price_move_percent) {
        (Some(growth), Some(price_move)) => {
            (PRE_SURGE_MIN_GROWTH..=PRE_SURGE_MAX_GROWTH).contains(&growth)
                && price_move < PRE_SURGE_MAX_PRICE_MOVE
        }
        _ => false,
    };

    PreSurge {
        growth_percent,
        price_move_percent,
        detected,
    }
}
