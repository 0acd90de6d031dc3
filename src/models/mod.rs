//! Shared data models spanning the engine layers.

pub mod indicators;
pub mod signal;

pub use indicators::{Candle, CandlePattern, Crossover, Divergence, IndicatorReading, PriceSeries};
pub use signal::{EvaluationResult, IndicatorEvaluation, SignalDirection, Verdict};
