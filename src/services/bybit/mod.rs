//! Bybit v5 REST market data (linear USDT perpetuals)

pub mod client;
pub mod messages;

pub use client::*;
