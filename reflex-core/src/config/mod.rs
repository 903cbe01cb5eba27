//! Configuration
//!
//! Everything here is compiled in; there is no persisted configuration.

pub mod difficulty;
pub mod engine;

pub use difficulty::*;
pub use engine::*;
