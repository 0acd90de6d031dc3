//! Core application primitives (orchestrator, scheduler, status server)

pub mod http;
pub mod orchestrator;
pub mod scheduler;

pub use http::*;
pub use orchestrator::*;
pub use scheduler::*;
