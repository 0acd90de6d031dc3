//! Per-instrument pipeline jobs

pub mod context;
pub mod handlers;
pub mod types;

pub use context::JobContext;
pub use handlers::process_instrument;
pub use types::{InstrumentJob, InstrumentOutcome, PipelineStage, SkipReason};
