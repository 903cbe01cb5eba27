//! Collaborator traits
//!
//! These traits define the narrow interface between the engine and the
//! hardware it runs on. Implementations live in the driver and display
//! crates; tests use in-module mocks.

pub mod display;
pub mod indicator;
pub mod sensor;

pub use display::{TextDisplay, LINE_COUNT};
pub use indicator::{Color, IndicatorLight};
pub use sensor::Accelerometer;
