//! Shared numeric helpers used across the indicator library and config layer.

pub mod math;
pub mod numbers;
