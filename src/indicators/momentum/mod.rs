//! Momentum indicators: RSI, MACD, divergence

pub mod divergence;
pub mod macd;
pub mod rsi;

pub use divergence::*;
pub use macd::*;
pub use rsi::*;
