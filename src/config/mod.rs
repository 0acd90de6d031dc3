//! Configuration: process settings from the environment and the hot-reloaded
//! runtime config persisted by a [`ConfigStore`].

pub mod env;
pub mod settings;
pub mod store;

pub use env::*;
pub use settings::*;
pub use store::*;
