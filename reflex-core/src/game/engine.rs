//! Tick-driven game engine
//!
//! [`GameStateMachine`] owns the input components, the arbiter, the
//! session, and the randomness source. The caller runs the loop: sample the
//! hardware, call [`update`](GameStateMachine::update) with the current
//! time, render, then wait for the state's tick period. Nothing in here
//! sleeps, so the whole engine runs deterministically under test.

use rand_core::RngCore;

use super::session::{GameSession, Transition};
use crate::arbiter::ActionArbiter;
use crate::config::{DifficultyProfile, DIFFICULTIES};
use crate::input::{InputFusion, RawInputs};
use crate::state::State;
use crate::view::Frame;

/// Game engine driven one tick at a time
pub struct GameStateMachine<R> {
    session: GameSession,
    inputs: InputFusion,
    arbiter: ActionArbiter,
    rng: R,
    /// Highlighted profile on the menu
    cursor: u8,
}

impl<R: RngCore> GameStateMachine<R> {
    /// Create an engine on the menu
    pub fn new(inputs: InputFusion, rng: R) -> Self {
        Self::with_arbiter(inputs, ActionArbiter::new(), rng)
    }

    /// Create an engine with a custom arbiter
    pub fn with_arbiter(inputs: InputFusion, arbiter: ActionArbiter, rng: R) -> Self {
        Self {
            session: GameSession::new(),
            inputs,
            arbiter,
            rng,
            cursor: 0,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn inputs(&self) -> &InputFusion {
        &self.inputs
    }

    pub fn state(&self) -> State {
        self.session.state()
    }

    /// Highlighted menu entry
    pub fn cursor(&self) -> u8 {
        self.cursor
    }

    /// Profile under the menu cursor
    pub fn selected_difficulty(&self) -> DifficultyProfile {
        DIFFICULTIES[usize::from(self.cursor)]
    }

    /// Tick period for the current state (ms)
    pub fn tick_interval_ms(&self) -> u32 {
        self.session.state().tick_interval_ms()
    }

    /// Display frame for the current state
    pub fn frame(&self, now_ms: u32) -> Frame {
        Frame::for_session(&self.session, self.cursor, now_ms)
    }

    /// Run one tick
    pub fn update(&mut self, now_ms: u32, raw: &RawInputs) -> Transition {
        match self.session.state() {
            State::Menu => self.update_menu(now_ms, raw),
            State::Playing => self.update_playing(now_ms, raw),
            State::GameOver | State::Win => self.update_finished(now_ms, raw),
        }
    }

    fn update_menu(&mut self, now_ms: u32, raw: &RawInputs) -> Transition {
        let polled = self.inputs.poll_controls(now_ms, raw);

        let moved = if polled.encoder_delta != 0 {
            self.move_cursor(polled.encoder_delta)
        } else {
            false
        };

        if polled.button_just_pressed {
            let difficulty = self.selected_difficulty();
            if self.session.start(difficulty) {
                return Transition::Started(difficulty);
            }
        }

        if moved {
            Transition::CursorMoved(self.cursor)
        } else {
            Transition::None
        }
    }

    /// Step the cursor one entry toward the delta's sign, clamped
    fn move_cursor(&mut self, delta: i32) -> bool {
        let last = DIFFICULTIES.len() as u8 - 1;
        let next = if delta > 0 {
            self.cursor.saturating_add(1).min(last)
        } else {
            self.cursor.saturating_sub(1)
        };
        let moved = next != self.cursor;
        self.cursor = next;
        moved
    }

    fn update_playing(&mut self, now_ms: u32, raw: &RawInputs) -> Transition {
        let started = if self.session.challenge().is_none() {
            self.inputs.discard_motion_sample(raw.acceleration);
            self.session.begin_level(&mut self.rng, now_ms).copied()
        } else {
            None
        };

        let polled = self.inputs.poll(now_ms, raw);
        let action = self.arbiter.resolve(&polled);
        let transition = self.session.evaluate(action, now_ms);

        match (transition, started) {
            (Transition::None, Some(challenge)) => Transition::LevelStarted {
                level: challenge.level(),
                target: challenge.target(),
                time_limit_ms: challenge.time_limit_ms(),
            },
            (transition, _) => transition,
        }
    }

    fn update_finished(&mut self, now_ms: u32, raw: &RawInputs) -> Transition {
        // Rotation is polled only to drain it
        let polled = self.inputs.poll_controls(now_ms, raw);

        if polled.button_just_pressed && self.session.restart() {
            self.cursor = 0;
            return Transition::Restarted;
        }
        Transition::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EngineConfig, EASY, HARD, MAX_LEVEL, MEDIUM};
    use crate::game::{Outcome, PlayerAction};
    use crate::input::{MotionFilter, Vector3};
    use crate::testing::ScriptedRng;

    const GRAVITY: Vector3 = Vector3::new(0.0, 0.0, 9.8);

    /// Pulled-up lines at rest: both phases high, button released
    fn idle() -> RawInputs {
        RawInputs {
            phase_a: true,
            phase_b: true,
            button_pressed: false,
            acceleration: GRAVITY,
        }
    }

    fn engine(script: &'static [u32]) -> GameStateMachine<ScriptedRng> {
        let config = EngineConfig::default();
        let inputs = InputFusion::from_config(
            &idle(),
            0,
            MotionFilter::from_config(GRAVITY, &config),
            &config,
        );
        GameStateMachine::new(inputs, ScriptedRng::new(script))
    }

    /// Press and hold the button until the engine reports something
    fn press(engine: &mut GameStateMachine<ScriptedRng>, now: &mut u32) -> Transition {
        let held = RawInputs {
            button_pressed: true,
            ..idle()
        };
        for _ in 0..5 {
            *now += 20;
            let t = engine.update(*now, &held);
            if t != Transition::None {
                return t;
            }
        }
        Transition::None
    }

    fn release(engine: &mut GameStateMachine<ScriptedRng>, now: &mut u32) {
        for _ in 0..3 {
            *now += 20;
            engine.update(*now, &idle());
        }
    }

    #[test]
    fn test_menu_cursor_clamps() {
        let mut engine = engine(&[0]);
        // 11 -> 10 -> 00 -> 01 -> 11 is one clockwise cycle
        let cw = [(true, false), (false, false), (false, true), (true, true)];
        let mut now = 0;
        let mut moves = Vec::new();
        for _ in 0..2 {
            for (a, b) in cw {
                now += 50;
                let raw = RawInputs {
                    phase_a: a,
                    phase_b: b,
                    ..idle()
                };
                moves.push(engine.update(now, &raw));
            }
        }
        assert_eq!(engine.cursor(), 2);
        assert_eq!(engine.selected_difficulty(), HARD);
        assert_eq!(moves[0], Transition::CursorMoved(1));
        assert_eq!(moves[1], Transition::CursorMoved(2));
        assert!(moves[2..].iter().all(|t| *t == Transition::None));

        // One counter-clockwise step: 11 -> 01
        now += 50;
        let raw = RawInputs {
            phase_a: false,
            ..idle()
        };
        assert_eq!(engine.update(now, &raw), Transition::CursorMoved(1));
        assert_eq!(engine.selected_difficulty(), MEDIUM);
    }

    #[test]
    fn test_confirm_starts_game() {
        let mut engine = engine(&[0]);
        let mut now = 0;
        assert_eq!(press(&mut engine, &mut now), Transition::Started(EASY));
        assert_eq!(engine.state(), State::Playing);
        assert_eq!(engine.tick_interval_ms(), 20);
    }

    #[test]
    fn test_first_playing_tick_starts_level() {
        let mut engine = engine(&[3]);
        let mut now = 0;
        press(&mut engine, &mut now);
        release(&mut engine, &mut now);

        let challenge = engine.session().challenge().unwrap();
        assert_eq!(challenge.level(), 1);
        assert_eq!(challenge.target(), PlayerAction::PressButton);
        assert_eq!(challenge.started_at_ms(), 60);
    }

    #[test]
    fn test_level_started_is_reported() {
        let mut engine = engine(&[2]);
        let mut now = 0;
        press(&mut engine, &mut now);
        now += 1000;
        let held = RawInputs {
            button_pressed: true,
            ..idle()
        };
        assert_eq!(
            engine.update(now, &held),
            Transition::LevelStarted {
                level: 1,
                target: PlayerAction::Shake,
                time_limit_ms: 5000
            }
        );
    }

    /// Level 1 passes by a left turn 1 s in; level 2 times out after 4.8 s
    #[test]
    fn test_easy_scenario_left_turn_then_timeout() {
        let mut engine = engine(&[0, 3]);
        let mut now = 0;
        assert_eq!(press(&mut engine, &mut now), Transition::Started(EASY));

        // Release while the level runs; nothing resolves
        let level_start = now + 20;
        release(&mut engine, &mut now);
        assert_eq!(
            engine.session().challenge().unwrap().started_at_ms(),
            level_start
        );

        // Left turn exactly 1.0 s after the level started: 11 -> 01
        let left = RawInputs {
            phase_a: false,
            ..idle()
        };
        let t = engine.update(level_start + 1000, &left);
        assert_eq!(t, Transition::LevelPassed { next_level: 2 });
        assert_eq!(engine.session().level(), 2);
        assert_eq!(engine.session().time_limit_ms(), 4800);

        // Level 2 starts on the next tick; no further input
        let level2_start = level_start + 1020;
        let t = engine.update(level2_start, &left);
        assert!(matches!(t, Transition::LevelStarted { level: 2, time_limit_ms: 4800, .. }));

        let mut now = level2_start;
        let outcome = loop {
            now += 20;
            match engine.update(now, &left) {
                Transition::None => continue,
                other => break other,
            }
        };

        assert_eq!(now - level2_start, 4820);
        assert_eq!(
            outcome,
            Transition::GameOver {
                level: 2,
                outcome: Outcome::Timeout
            }
        );
        assert_eq!(engine.state(), State::GameOver);
        assert_eq!(engine.session().level(), 2);
    }

    #[test]
    fn test_wrong_action_ends_game() {
        // Target is a left turn; a right turn fails immediately
        let mut engine = engine(&[0]);
        let mut now = 0;
        press(&mut engine, &mut now);
        release(&mut engine, &mut now);

        let right = RawInputs {
            phase_b: false,
            ..idle()
        };
        now += 20;
        assert_eq!(
            engine.update(now, &right),
            Transition::GameOver {
                level: 1,
                outcome: Outcome::Failure(PlayerAction::TurnRight)
            }
        );
    }

    #[test]
    fn test_shake_resolves_shake_target() {
        let mut engine = engine(&[2]);
        let mut now = 0;
        press(&mut engine, &mut now);
        release(&mut engine, &mut now);

        let shaking = RawInputs {
            acceleration: GRAVITY + Vector3::new(20.0, 0.0, 0.0),
            ..idle()
        };
        now += 20;
        assert_eq!(
            engine.update(now, &shaking),
            Transition::LevelPassed { next_level: 2 }
        );
    }

    #[test]
    fn test_right_turn_wins_over_button_in_same_tick() {
        let mut engine = engine(&[1]);
        let mut now = 0;
        press(&mut engine, &mut now);
        release(&mut engine, &mut now);

        // Button goes down one tick early so its edge lands with the turn
        let held = RawInputs {
            button_pressed: true,
            ..idle()
        };
        now += 20;
        engine.update(now, &held);
        let both = RawInputs {
            phase_b: false,
            ..held
        };
        now += 20;
        assert_eq!(
            engine.update(now, &both),
            Transition::LevelPassed { next_level: 2 }
        );
    }

    #[test]
    fn test_win_and_restart() {
        // Every target is a press
        let mut engine = engine(&[3]);
        let mut now = 0;
        press(&mut engine, &mut now);
        release(&mut engine, &mut now);

        for level in 1..=MAX_LEVEL {
            let t = press(&mut engine, &mut now);
            if level < MAX_LEVEL {
                assert_eq!(t, Transition::LevelPassed { next_level: level + 1 });
                assert_eq!(engine.state(), State::Playing);
            } else {
                assert_eq!(t, Transition::Won);
            }
            release(&mut engine, &mut now);
        }

        assert_eq!(engine.state(), State::Win);
        assert_eq!(press(&mut engine, &mut now), Transition::Restarted);
        assert_eq!(engine.state(), State::Menu);
    }

    #[test]
    fn test_rotation_on_end_screen_does_not_restart() {
        let mut engine = engine(&[0]);
        let mut now = 0;
        press(&mut engine, &mut now);
        release(&mut engine, &mut now);
        now += 20;
        let right = RawInputs {
            phase_b: false,
            ..idle()
        };
        engine.update(now, &right);
        assert_eq!(engine.state(), State::GameOver);

        now += 50;
        assert_eq!(engine.update(now, &idle()), Transition::None);
        assert_eq!(engine.state(), State::GameOver);
    }

    #[test]
    fn test_restart_returns_cursor_to_easy() {
        let mut engine = engine(&[0]);
        let mut now = 0;
        let cw = [(true, false), (false, false), (false, true), (true, true)];
        for _ in 0..2 {
            for (a, b) in cw {
                now += 50;
                let raw = RawInputs {
                    phase_a: a,
                    phase_b: b,
                    ..idle()
                };
                engine.update(now, &raw);
            }
        }
        assert_eq!(engine.selected_difficulty(), HARD);
        assert_eq!(press(&mut engine, &mut now), Transition::Started(HARD));
        release(&mut engine, &mut now);

        // Target is a left turn; a right turn ends the game
        let right = RawInputs {
            phase_b: false,
            ..idle()
        };
        now += 20;
        engine.update(now, &right);
        assert_eq!(engine.state(), State::GameOver);
        release(&mut engine, &mut now);

        assert_eq!(press(&mut engine, &mut now), Transition::Restarted);
        assert_eq!(engine.state(), State::Menu);
        assert_eq!(engine.cursor(), 0);
        assert_eq!(engine.selected_difficulty(), EASY);
    }
}
