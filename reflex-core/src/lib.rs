//! Board-agnostic engine for the Reflex handheld game
//!
//! This crate contains all game logic that does not depend on specific
//! hardware:
//!
//! - Input fusion (quadrature decoding, button debounce, motion filtering)
//! - Fixed-priority action arbitration
//! - Level/time-limit progression and the session state machine
//! - Collaborator traits (text display, indicator light, accelerometer)
//! - View model turning engine state into display frames
//!
//! Time is injected as a millisecond timestamp on every call; nothing in
//! here sleeps except the one-off accelerometer calibration.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod arbiter;
pub mod config;
pub mod game;
pub mod input;
pub mod state;
pub mod traits;
pub mod view;

pub use arbiter::ActionArbiter;
pub use game::{GameSession, GameStateMachine, LevelChallenge, Outcome, PlayerAction, Transition};
pub use input::{InputFusion, RawInputs, TickInputs};
