//! Signal evaluation: indicator triggers and the pump/dump decision.

pub mod decision;
pub mod engine;
pub mod evaluator;

pub use decision::*;
pub use engine::*;
pub use evaluator::*;
