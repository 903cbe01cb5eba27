//! Game logic
//!
//! - [`PlayerAction`]: the four inputs a level can ask for
//! - [`LevelChallenge`]: one level's target, time budget and outcome
//! - [`GameSession`]: level progression on top of the state machine
//! - [`GameStateMachine`]: per-tick driver tying inputs to the session

pub mod action;
pub mod challenge;
pub mod engine;
pub mod session;

pub use action::PlayerAction;
pub use challenge::{LevelChallenge, Outcome};
pub use engine::GameStateMachine;
pub use session::{GameSession, Transition};
