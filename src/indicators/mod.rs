//! Indicator library: stateless functions over a price series.
//!
//! Every series function returns values aligned to its input with `None` for
//! positions that cannot be computed; nothing here returns an error.

pub mod momentum;
pub mod patterns;
pub mod registry;
pub mod trend;
pub mod volatility;
pub mod volume;

pub use registry::*;
