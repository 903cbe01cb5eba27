//! Game session
//!
//! Holds the session state, the current level, the chosen difficulty, and
//! the running challenge. Level outcomes are turned into state-machine
//! events here and reported back as [`Transition`]s.

use rand_core::RngCore;

use super::action::PlayerAction;
use super::challenge::{LevelChallenge, Outcome};
use crate::config::{DifficultyProfile, MAX_LEVEL};
use crate::state::{Event, State};

/// What changed during one tick, for the caller to act on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Transition {
    /// Nothing the caller needs to react to
    None,
    /// Menu cursor moved to this profile index
    CursorMoved(u8),
    /// Difficulty confirmed; level 1 starts on the next playing tick
    Started(DifficultyProfile),
    /// A new challenge began and is still pending
    LevelStarted {
        level: u8,
        target: PlayerAction,
        time_limit_ms: u32,
    },
    /// Level passed; the session moved on to `next_level`
    LevelPassed { next_level: u8 },
    /// Wrong action or timeout at `level`
    GameOver { level: u8, outcome: Outcome },
    /// Final level passed
    Won,
    /// Back on the menu
    Restarted,
}

/// Top-level session data
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GameSession {
    state: State,
    level: u8,
    difficulty: DifficultyProfile,
    challenge: Option<LevelChallenge>,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    /// New session on the menu
    pub fn new() -> Self {
        Self {
            state: State::Menu,
            level: 1,
            difficulty: DifficultyProfile::default(),
            challenge: None,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Current level (the level reached, once the session has ended)
    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn difficulty(&self) -> DifficultyProfile {
        self.difficulty
    }

    /// Running challenge, if the current level has started
    pub fn challenge(&self) -> Option<&LevelChallenge> {
        self.challenge.as_ref()
    }

    /// Time limit for the current level (ms)
    pub fn time_limit_ms(&self) -> u32 {
        self.difficulty.time_limit_ms(self.level)
    }

    fn apply(&mut self, event: Event) -> State {
        self.state = self.state.transition(event);
        self.state
    }

    /// Confirm a difficulty on the menu
    ///
    /// Returns false (and changes nothing) outside the menu.
    pub fn start(&mut self, difficulty: DifficultyProfile) -> bool {
        if self.state != State::Menu {
            return false;
        }
        self.apply(Event::DifficultyConfirmed);
        self.difficulty = difficulty;
        self.level = 1;
        self.challenge = None;
        true
    }

    /// Start the current level's challenge if one is not already running
    pub fn begin_level<R: RngCore + ?Sized>(
        &mut self,
        rng: &mut R,
        now_ms: u32,
    ) -> Option<&LevelChallenge> {
        if self.state != State::Playing {
            return None;
        }
        if self.challenge.is_none() {
            self.challenge = Some(LevelChallenge::begin(
                self.level,
                &self.difficulty,
                rng,
                now_ms,
            ));
        }
        self.challenge.as_ref()
    }

    /// Evaluate the running challenge against one tick's action
    pub fn evaluate(&mut self, action: Option<PlayerAction>, now_ms: u32) -> Transition {
        if self.state != State::Playing {
            return Transition::None;
        }
        match self.challenge.as_mut() {
            Some(challenge) => {
                let outcome = challenge.evaluate(action, now_ms);
                self.record(outcome)
            }
            None => Transition::None,
        }
    }

    /// Apply a level outcome
    fn record(&mut self, outcome: Outcome) -> Transition {
        if !outcome.is_resolved() {
            return Transition::None;
        }

        self.challenge = None;

        match outcome {
            Outcome::Success if self.level >= MAX_LEVEL => {
                self.apply(Event::FinalLevelPassed);
                Transition::Won
            }
            Outcome::Success => {
                self.apply(Event::LevelPassed);
                self.level += 1;
                Transition::LevelPassed {
                    next_level: self.level,
                }
            }
            Outcome::Failure(_) => {
                self.apply(Event::LevelFailed);
                Transition::GameOver {
                    level: self.level,
                    outcome,
                }
            }
            Outcome::Timeout => {
                self.apply(Event::LevelTimedOut);
                Transition::GameOver {
                    level: self.level,
                    outcome,
                }
            }
            Outcome::Pending => Transition::None,
        }
    }

    /// Leave an end screen for the menu
    ///
    /// Returns false (and changes nothing) outside GameOver/Win.
    pub fn restart(&mut self) -> bool {
        if !self.state.is_terminal() {
            return false;
        }
        self.apply(Event::RestartConfirmed);
        self.challenge = None;
        true
    }
}
