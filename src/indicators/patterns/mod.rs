//! Candlestick reversal patterns evaluated on the latest bar

pub mod candles;

pub use candles::*;
