//! State machine definition
//!
//! What the engine polls and how often is a function of the current
//! state; outcomes arrive as events.

use super::events::Event;
use crate::config::{MENU_TICK_MS, PLAY_TICK_MS};

/// Session states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Difficulty selection
    #[default]
    Menu,
    /// A level is running or about to start
    Playing,
    /// Wrong action or timeout; waiting for restart
    GameOver,
    /// Final level passed; waiting for restart
    Win,
}

impl State {
    /// Check if this is an end screen waiting for restart
    pub fn is_terminal(&self) -> bool {
        matches!(self, State::GameOver | State::Win)
    }

    /// Tick period the caller should use in this state (ms)
    pub fn tick_interval_ms(&self) -> u32 {
        match self {
            State::Playing => PLAY_TICK_MS,
            _ => MENU_TICK_MS,
        }
    }

    /// Process an event and return the next state
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use State::*;

        match (self, event) {
            // Menu transitions
            (Menu, DifficultyConfirmed) => Playing,

            // Playing transitions
            (Playing, LevelPassed) => Playing,
            (Playing, FinalLevelPassed) => Win,
            (Playing, LevelFailed) => GameOver,
            (Playing, LevelTimedOut) => GameOver,

            // End-screen transitions
            (GameOver, RestartConfirmed) => Menu,
            (Win, RestartConfirmed) => Menu,

            // Default: stay in current state
            _ => self,
        }
    }
}
