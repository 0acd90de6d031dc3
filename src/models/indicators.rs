use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One OHLCV bar
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub timestamp: DateTime<Utc>,
}

impl Candle {
    pub fn new(
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            open,
            high,
            low,
            close,
            volume,
            timestamp,
        }
    }

    pub fn body(&self) -> f64 {
        (self.close - self.open).abs()
    }

    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    pub fn upper_shadow(&self) -> f64 {
        self.high - self.open.max(self.close)
    }

    pub fn lower_shadow(&self) -> f64 {
        self.open.min(self.close) - self.low
    }
}

/// Oldest-first bar history for one instrument.
///
/// Construction sorts by timestamp and keeps the last bar seen for a
/// duplicated timestamp, so timestamps are strictly increasing. An empty
/// series means "no data this cycle".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    candles: Vec<Candle>,
}

impl PriceSeries {
    pub fn new(mut candles: Vec<Candle>) -> Self {
        candles.sort_by_key(|c| c.timestamp);
        let mut deduped: Vec<Candle> = Vec::with_capacity(candles.len());
        for candle in candles {
            match deduped.last_mut() {
                Some(last) if last.timestamp == candle.timestamp => *last = candle,
                _ => deduped.push(candle),
            }
        }
        Self { candles: deduped }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn last(&self) -> Option<&Candle> {
        self.candles.last()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.close).collect()
    }

    pub fn volumes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.volume).collect()
    }
}

impl From<Vec<Candle>> for PriceSeries {
    fn from(candles: Vec<Candle>) -> Self {
        Self::new(candles)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RsiIndicator {
    pub value: f64,
    pub period: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BollingerBandsIndicator {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
    pub period: u32,
    pub std_dev: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdxIndicator {
    pub value: f64,
    pub plus_di: f64,
    pub minus_di: f64,
    pub period: u32,
}

/// Direction of a two-line cross between the previous and the current bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Crossover {
    Bullish,
    Bearish,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Divergence {
    Bullish,
    Bearish,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandlePattern {
    Hammer,
    ShootingStar,
    None,
}

/// Latest reading of one indicator for one instrument.
///
/// `None` fields mean "not computed" (warm-up or degenerate input).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IndicatorReading {
    PriceChange {
        percent: f64,
    },
    Rsi {
        value: Option<f64>,
    },
    Macd {
        macd: Option<f64>,
        signal: Option<f64>,
        histogram: Option<f64>,
        cross: Crossover,
    },
    VolumeSurge {
        ratio: Option<f64>,
    },
    Bollinger {
        close: f64,
        upper: Option<f64>,
        middle: Option<f64>,
        lower: Option<f64>,
    },
    Adx {
        value: Option<f64>,
    },
    Divergence {
        divergence: Divergence,
    },
    CandlePattern {
        pattern: CandlePattern,
    },
    VolumePreSurge {
        growth_percent: Option<f64>,
        price_move_percent: Option<f64>,
        detected: bool,
    },
    EmaCrossover {
        fast: Option<f64>,
        slow: Option<f64>,
        cross: Crossover,
    },
    Obv {
        delta: Option<f64>,
    },
}

impl IndicatorReading {
    /// Qualitative reading used in explanations and alerts
    pub fn describe(&self) -> String {
        match self {
            Self::PriceChange { percent } => format!("{:+.2}%", percent),
            Self::Rsi { value: Some(v) } => {
                let zone = if *v < 30.0 {
                    " (oversold)"
                } else if *v > 70.0 {
                    " (overbought)"
                } else {
                    ""
                };
                format!("{:.1}{}", v, zone)
            }
            Self::Rsi { value: None } => "n/a".to_string(),
            Self::Macd { macd: None, .. } => "n/a".to_string(),
            Self::Macd { cross, .. } => cross_label(*cross).to_string(),
            Self::VolumeSurge { ratio: Some(r) } => format!("x{:.2}", r),
            Self::VolumeSurge { ratio: None } => "n/a".to_string(),
            Self::Bollinger {
                close,
                upper: Some(upper),
                lower: Some(lower),
                ..
            } => {
                if close > upper {
                    "above upper band".to_string()
                } else if close < lower {
                    "below lower band".to_string()
                } else {
                    "inside bands".to_string()
                }
            }
            Self::Bollinger { .. } => "n/a".to_string(),
            Self::Adx { value: Some(v) } => {
                if *v > 25.0 {
                    format!("{:.1} (strong trend)", v)
                } else {
                    format!("{:.1}", v)
                }
            }
            Self::Adx { value: None } => "n/a".to_string(),
            Self::Divergence { divergence } => match divergence {
                Divergence::Bullish => "bullish",
                Divergence::Bearish => "bearish",
                Divergence::None => "none",
            }
            .to_string(),
            Self::CandlePattern { pattern } => match pattern {
                CandlePattern::Hammer => "Hammer",
                CandlePattern::ShootingStar => "Shooting Star",
                CandlePattern::None => "none",
            }
            .to_string(),
            Self::VolumePreSurge { detected: true, .. } => "yes".to_string(),
            Self::VolumePreSurge { detected: false, .. } => "no".to_string(),
            Self::EmaCrossover { fast: None, .. } => "n/a".to_string(),
            Self::EmaCrossover { cross, .. } => cross_label(*cross).to_string(),
            Self::Obv { delta: Some(d) } => {
                let trend = if *d > 0.0 {
                    "rising"
                } else if *d < 0.0 {
                    "falling"
                } else {
                    "stable"
                };
                trend.to_string()
            }
            Self::Obv { delta: None } => "n/a".to_string(),
        }
    }
}

fn cross_label(cross: Crossover) -> &'static str {
    match cross {
        Crossover::Bullish => "bullish cross",
        Crossover::Bearish => "bearish cross",
        Crossover::None => "neutral",
    }
}
