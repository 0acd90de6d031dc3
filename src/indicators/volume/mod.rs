//! Volume indicators: volume surge, volume pre-surge, OBV

pub mod obv;
pub mod surge;

pub use obv::*;
pub use surge::*;
