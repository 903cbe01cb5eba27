//! Session state machine
//!
//! Defines the top-level game states and the events that move between
//! them. The transition table is explicit, finite, and deterministic.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::State;
