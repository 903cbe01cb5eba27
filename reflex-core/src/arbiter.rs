//! Action arbitration
//!
//! Resolves one tick's [`TickInputs`] into at most one [`PlayerAction`].
//! Rules are checked in a fixed order and the first match wins; later
//! rules are skipped even when they would also match. The order is part of
//! the contract: a right turn and a button press in the same tick is
//! always a right turn.

use crate::game::PlayerAction;
use crate::input::TickInputs;

/// One condition → action rule
#[derive(Clone, Copy)]
pub struct Rule {
    /// Action produced when the rule fires
    pub action: PlayerAction,
    /// Condition over the tick's inputs
    pub fires: fn(&TickInputs) -> bool,
}

fn turned_left(inputs: &TickInputs) -> bool {
    inputs.encoder_delta < 0
}

fn turned_right(inputs: &TickInputs) -> bool {
    inputs.encoder_delta > 0
}

fn pressed(inputs: &TickInputs) -> bool {
    inputs.button_just_pressed
}

fn shaken(inputs: &TickInputs) -> bool {
    inputs.is_shake
}

/// Default rule order: left, right, button, shake
pub const PRIORITY: [Rule; 4] = [
    Rule {
        action: PlayerAction::TurnLeft,
        fires: turned_left,
    },
    Rule {
        action: PlayerAction::TurnRight,
        fires: turned_right,
    },
    Rule {
        action: PlayerAction::PressButton,
        fires: pressed,
    },
    Rule {
        action: PlayerAction::Shake,
        fires: shaken,
    },
];

/// First-match rule evaluator
#[derive(Clone, Copy)]
pub struct ActionArbiter {
    rules: &'static [Rule],
}

impl Default for ActionArbiter {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionArbiter {
    /// Arbiter using [`PRIORITY`]
    pub const fn new() -> Self {
        Self { rules: &PRIORITY }
    }

    /// Arbiter using a custom rule order
    pub const fn with_rules(rules: &'static [Rule]) -> Self {
        Self { rules }
    }

    /// Resolve one tick from its individual signals
    pub fn decide(
        &self,
        encoder_delta: i32,
        button_just_pressed: bool,
        is_shake: bool,
    ) -> Option<PlayerAction> {
        self.resolve(&TickInputs {
            encoder_delta,
            button_just_pressed,
            is_shake,
        })
    }

    /// Resolve one tick
    pub fn resolve(&self, inputs: &TickInputs) -> Option<PlayerAction> {
        self.rules
            .iter()
            .find(|rule| (rule.fires)(inputs))
            .map(|rule| rule.action)
    }

    /// Rules in evaluation order
    pub fn rules(&self) -> &'static [Rule] {
        self.rules
    }
}
