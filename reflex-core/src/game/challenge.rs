//! Per-level challenge
//!
//! A challenge is created when a level starts and dropped once it has an
//! outcome.

use rand_core::RngCore;

use super::action::PlayerAction;
use crate::config::DifficultyProfile;

/// Result of a level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// No action yet and time remains
    Pending,
    /// Target action performed in time
    Success,
    /// A different action was performed
    Failure(PlayerAction),
    /// Time limit exceeded with no action
    Timeout,
}

impl Outcome {
    pub fn is_resolved(&self) -> bool {
        !matches!(self, Outcome::Pending)
    }

    /// Failure and timeout both end the session
    pub fn is_loss(&self) -> bool {
        matches!(self, Outcome::Failure(_) | Outcome::Timeout)
    }
}

/// One level's target, budget, and outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LevelChallenge {
    level: u8,
    target: PlayerAction,
    time_limit_ms: u32,
    started_at_ms: u32,
    outcome: Outcome,
}

impl LevelChallenge {
    pub fn new(level: u8, target: PlayerAction, time_limit_ms: u32, started_at_ms: u32) -> Self {
        Self {
            level,
            target,
            time_limit_ms,
            started_at_ms,
            outcome: Outcome::Pending,
        }
    }

    /// Start a level: random target, limit from the profile, timer at `now_ms`
    pub fn begin<R: RngCore + ?Sized>(
        level: u8,
        profile: &DifficultyProfile,
        rng: &mut R,
        now_ms: u32,
    ) -> Self {
        Self::new(
            level,
            PlayerAction::random(rng),
            profile.time_limit_ms(level),
            now_ms,
        )
    }

    /// Evaluate one tick's resolved action
    ///
    /// The action is checked before the clock, so an action in the tick
    /// that crosses the limit still counts. Once resolved, the outcome is
    /// fixed.
    pub fn evaluate(&mut self, action: Option<PlayerAction>, now_ms: u32) -> Outcome {
        if self.outcome.is_resolved() {
            return self.outcome;
        }

        self.outcome = match action {
            Some(action) if action == self.target => Outcome::Success,
            Some(action) => Outcome::Failure(action),
            None if self.elapsed_ms(now_ms) > self.time_limit_ms => Outcome::Timeout,
            None => Outcome::Pending,
        };
        self.outcome
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn target(&self) -> PlayerAction {
        self.target
    }

    pub fn time_limit_ms(&self) -> u32 {
        self.time_limit_ms
    }

    pub fn started_at_ms(&self) -> u32 {
        self.started_at_ms
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Time since the level started (ms)
    pub fn elapsed_ms(&self, now_ms: u32) -> u32 {
        now_ms.wrapping_sub(self.started_at_ms)
    }

    /// Time left before timeout, floored at zero (ms)
    pub fn remaining_ms(&self, now_ms: u32) -> u32 {
        self.time_limit_ms.saturating_sub(self.elapsed_ms(now_ms))
    }
}
