//! Indicator registry: the closed set of indicators and one table row per indicator.
//!
//! Each row carries the config key, display label, compute function and the
//! pump/dump predicates. Config handling, evaluation and explanations all
//! iterate this table, so adding an indicator means adding a variant and a row.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::math;
use crate::config::IndicatorConfig;
use crate::indicators::momentum::{
    calculate_rsi_default, detect_divergence, macd_series_default, rsi_series, RSI_OVERBOUGHT,
    RSI_OVERSOLD, RSI_PERIOD,
};
use crate::indicators::patterns::detect_candle_pattern;
use crate::indicators::trend::{calculate_adx_default, ema_crossover_default, ADX_STRONG_TREND};
use crate::indicators::volatility::calculate_bollinger_bands_default;
use crate::indicators::volume::{
    obv_delta, volume_pre_surge, volume_surge_ratio, VOLUME_AVERAGE_PERIOD, VOLUME_SURGE_RATIO,
};
use crate::models::indicators::{CandlePattern, Crossover, Divergence, IndicatorReading, PriceSeries};

/// Indicator category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorCategory {
    Price,
    Momentum,
    Trend,
    Volatility,
    Volume,
    Pattern,
}

/// The fixed set of indicators a config can enable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorKind {
    PriceChange,
    Rsi,
    Macd,
    VolumeSurge,
    Bollinger,
    Adx,
    RsiMacdDivergence,
    CandlePatterns,
    VolumePreSurge,
    EmaCrossover,
    Obv,
}

impl IndicatorKind {
    /// All indicators in table order
    pub const ALL: [IndicatorKind; 11] = [
        IndicatorKind::PriceChange,
        IndicatorKind::Rsi,
        IndicatorKind::Macd,
        IndicatorKind::VolumeSurge,
        IndicatorKind::Bollinger,
        IndicatorKind::Adx,
        IndicatorKind::RsiMacdDivergence,
        IndicatorKind::CandlePatterns,
        IndicatorKind::VolumePreSurge,
        IndicatorKind::EmaCrossover,
        IndicatorKind::Obv,
    ];

    pub const COUNT: usize = Self::ALL.len();

    pub fn definition(self) -> &'static IndicatorDef {
        &INDICATORS[self as usize]
    }

    /// Config key, e.g. `rsi_macd_divergence`
    pub fn key(self) -> &'static str {
        self.definition().key
    }

    pub fn label(self) -> &'static str {
        self.definition().label
    }

    pub fn category(self) -> IndicatorCategory {
        self.definition().category
    }

    pub fn from_key(key: &str) -> Option<Self> {
        INDICATORS.iter().find(|def| def.key == key).map(|def| def.kind)
    }
}

impl fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for IndicatorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s.trim()).ok_or_else(|| format!("unknown indicator '{}'", s))
    }
}

pub type ComputeFn = fn(&PriceSeries) -> IndicatorReading;
pub type TriggerFn = fn(&IndicatorReading, &IndicatorConfig) -> bool;

/// One row of the indicator table
pub struct IndicatorDef {
    pub kind: IndicatorKind,
    pub key: &'static str,
    pub label: &'static str,
    pub category: IndicatorCategory,
    pub compute: ComputeFn,
    pub pump: TriggerFn,
    pub dump: TriggerFn,
}

impl IndicatorDef {
    pub fn compute(&self, series: &PriceSeries) -> IndicatorReading {
        (self.compute)(series)
    }

    pub fn pump_triggered(&self, reading: &IndicatorReading, config: &IndicatorConfig) -> bool {
        (self.pump)(reading, config)
    }

    pub fn dump_triggered(&self, reading: &IndicatorReading, config: &IndicatorConfig) -> bool {
        (self.dump)(reading, config)
    }
}

/// Indexed by `IndicatorKind as usize`
pub static INDICATORS: [IndicatorDef; IndicatorKind::COUNT] = [
    IndicatorDef {
        kind: IndicatorKind::PriceChange,
        key: "price_change",
        label: "Price Change",
        category: IndicatorCategory::Price,
        compute: compute_price_change,
        pump: |r, c| matches!(r, IndicatorReading::PriceChange { percent } if *percent > c.price_change_threshold),
        dump: |r, c| matches!(r, IndicatorReading::PriceChange { percent } if *percent < -c.price_change_threshold),
    },
    IndicatorDef {
        kind: IndicatorKind::Rsi,
        key: "rsi",
        label: "RSI",
        category: IndicatorCategory::Momentum,
        compute: compute_rsi,
        pump: |r, _| matches!(r, IndicatorReading::Rsi { value: Some(v) } if *v < RSI_OVERSOLD),
        dump: |r, _| matches!(r, IndicatorReading::Rsi { value: Some(v) } if *v > RSI_OVERBOUGHT),
    },
    IndicatorDef {
        kind: IndicatorKind::Macd,
        key: "macd",
        label: "MACD",
        category: IndicatorCategory::Momentum,
        compute: compute_macd,
        pump: |r, _| matches!(r, IndicatorReading::Macd { cross: Crossover::Bullish, .. }),
        dump: |r, _| matches!(r, IndicatorReading::Macd { cross: Crossover::Bearish, .. }),
    },
    IndicatorDef {
        kind: IndicatorKind::VolumeSurge,
        key: "volume_surge",
        label: "Volume Surge",
        category: IndicatorCategory::Volume,
        compute: compute_volume_surge,
        pump: volume_surge_triggered,
        dump: volume_surge_triggered,
    },
    IndicatorDef {
        kind: IndicatorKind::Bollinger,
        key: "bollinger",
        label: "Bollinger",
        category: IndicatorCategory::Volatility,
        compute: compute_bollinger,
        pump: |r, _| {
            matches!(r, IndicatorReading::Bollinger { close, upper: Some(upper), .. } if close > upper)
        },
        dump: |r, _| {
            matches!(r, IndicatorReading::Bollinger { close, lower: Some(lower), .. } if close < lower)
        },
    },
    IndicatorDef {
        kind: IndicatorKind::Adx,
        key: "adx",
        label: "ADX",
        category: IndicatorCategory::Trend,
        compute: compute_adx,
        pump: strong_trend,
        dump: strong_trend,
    },
    IndicatorDef {
        kind: IndicatorKind::RsiMacdDivergence,
        key: "rsi_macd_divergence",
        label: "RSI/MACD Divergence",
        category: IndicatorCategory::Momentum,
        compute: compute_divergence,
        pump: |r, _| matches!(r, IndicatorReading::Divergence { divergence: Divergence::Bullish }),
        dump: |r, _| matches!(r, IndicatorReading::Divergence { divergence: Divergence::Bearish }),
    },
    IndicatorDef {
        kind: IndicatorKind::CandlePatterns,
        key: "candle_patterns",
        label: "Candle Patterns",
        category: IndicatorCategory::Pattern,
        compute: compute_candle_pattern,
        pump: |r, _| matches!(r, IndicatorReading::CandlePattern { pattern: CandlePattern::Hammer }),
        dump: |r, _| {
            matches!(r, IndicatorReading::CandlePattern { pattern: CandlePattern::ShootingStar })
        },
    },
    IndicatorDef {
        kind: IndicatorKind::VolumePreSurge,
        key: "volume_pre_surge",
        label: "Volume Pre-Surge",
        category: IndicatorCategory::Volume,
        compute: compute_volume_pre_surge,
        pump: pre_surge_detected,
        dump: pre_surge_detected,
    },
    IndicatorDef {
        kind: IndicatorKind::EmaCrossover,
        key: "ema_crossover",
        label: "EMA Crossover",
        category: IndicatorCategory::Trend,
        compute: compute_ema_crossover,
        pump: |r, _| matches!(r, IndicatorReading::EmaCrossover { cross: Crossover::Bullish, .. }),
        dump: |r, _| matches!(r, IndicatorReading::EmaCrossover { cross: Crossover::Bearish, .. }),
    },
    IndicatorDef {
        kind: IndicatorKind::Obv,
        key: "obv",
        label: "OBV",
        category: IndicatorCategory::Volume,
        compute: compute_obv,
        pump: |r, _| matches!(r, IndicatorReading::Obv { delta: Some(d) } if *d > 0.0),
        dump: |r, _| matches!(r, IndicatorReading::Obv { delta: Some(d) } if *d < 0.0),
    },
];

fn volume_surge_triggered(reading: &IndicatorReading, _: &IndicatorConfig) -> bool {
    matches!(reading, IndicatorReading::VolumeSurge { ratio: Some(r) } if *r > VOLUME_SURGE_RATIO)
}

fn strong_trend(reading: &IndicatorReading, _: &IndicatorConfig) -> bool {
    matches!(reading, IndicatorReading::Adx { value: Some(v) } if *v > ADX_STRONG_TREND)
}

fn pre_surge_detected(reading: &IndicatorReading, _: &IndicatorConfig) -> bool {
    matches!(reading, IndicatorReading::VolumePreSurge { detected: true, .. })
}

/// Bar-over-bar close change in percent; 0 with fewer than 2 bars or a zero previous close
pub fn price_change_percent(series: &PriceSeries) -> f64 {
    match series.candles() {
        [.., previous, last] => math::percent_change(previous.close, last.close).unwrap_or(0.0),
        _ => 0.0,
    }
}

fn compute_price_change(series: &PriceSeries) -> IndicatorReading {
    IndicatorReading::PriceChange {
        percent: price_change_percent(series),
    }
}

fn compute_rsi(series: &PriceSeries) -> IndicatorReading {
    IndicatorReading::Rsi {
        value: calculate_rsi_default(series.candles()).map(|rsi| rsi.value),
    }
}

fn compute_macd(series: &PriceSeries) -> IndicatorReading {
    let macd = macd_series_default(&series.closes());
    IndicatorReading::Macd {
        macd: math::latest(&macd.macd),
        signal: math::latest(&macd.signal),
        histogram: math::latest(&macd.histogram),
        cross: macd.crossover(),
    }
}

fn compute_volume_surge(series: &PriceSeries) -> IndicatorReading {
    IndicatorReading::VolumeSurge {
        ratio: volume_surge_ratio(&series.volumes(), VOLUME_AVERAGE_PERIOD),
    }
}

fn compute_bollinger(series: &PriceSeries) -> IndicatorReading {
    let close = series.last().map(|c| c.close).unwrap_or(0.0);
    let bands = calculate_bollinger_bands_default(series.candles());
    IndicatorReading::Bollinger {
        close,
        upper: bands.as_ref().map(|b| b.upper),
        middle: bands.as_ref().map(|b| b.middle),
        lower: bands.as_ref().map(|b| b.lower),
    }
}

fn compute_adx(series: &PriceSeries) -> IndicatorReading {
    IndicatorReading::Adx {
        value: calculate_adx_default(series.candles()).map(|adx| adx.value),
    }
}

fn compute_divergence(series: &PriceSeries) -> IndicatorReading {
    let closes = series.closes();
    let rsi = rsi_series(&closes, RSI_PERIOD);
    let macd = macd_series_default(&closes);
    IndicatorReading::Divergence {
        divergence: detect_divergence(&closes, &rsi, &macd.macd),
    }
}

fn compute_candle_pattern(series: &PriceSeries) -> IndicatorReading {
    IndicatorReading::CandlePattern {
        pattern: detect_candle_pattern(series.candles()),
    }
}

fn compute_volume_pre_surge(series: &PriceSeries) -> IndicatorReading {
    let pre_surge = volume_pre_surge(&series.closes(), &series.volumes());
    IndicatorReading::VolumePreSurge {
        growth_percent: pre_surge.growth_percent,
        price_move_percent: pre_surge.price_move_percent,
        detected: pre_surge.detected,
    }
}

fn compute_ema_crossover(series: &PriceSeries) -> IndicatorReading {
    let ema = ema_crossover_default(&series.closes());
    IndicatorReading::EmaCrossover {
        fast: ema.fast,
        slow: ema.slow,
        cross: ema.cross,
    }
}

fn compute_obv(series: &PriceSeries) -> IndicatorReading {
    IndicatorReading::Obv {
        delta: obv_delta(&series.closes(), &series.volumes()),
    }
}
