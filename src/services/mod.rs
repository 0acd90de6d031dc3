//! External collaborators: market data and notifications.

pub mod bybit;
pub mod market_data;
pub mod notifier;

pub use market_data::*;
