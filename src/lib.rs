//! Pumpwatch: periodic pump/dump scanner for linear futures.
//!
//! Every cycle the scanner pulls the tradable universe, fetches recent candles
//! per instrument, evaluates the enabled indicators and notifies a chat channel
//! when the configured quorum of indicators agrees on a direction.

pub mod common;
pub mod config;
pub mod core;
pub mod error;
pub mod indicators;
pub mod jobs;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod signals;
