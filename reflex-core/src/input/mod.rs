//! Input fusion
//!
//! Three independent components turn raw hardware samples into clean
//! per-tick signals:
//!
//! - [`QuadratureDecoder`]: phase lines → signed detent delta
//! - [`DebouncedButton`]: button line → one-shot press edge
//! - [`MotionFilter`]: acceleration → binary shake flag
//!
//! [`InputFusion`] owns all three and produces a [`TickInputs`] record for
//! the arbiter on every tick.

pub mod button;
pub mod motion;
pub mod quadrature;

pub use button::DebouncedButton;
pub use motion::{calibrate_baseline, is_shake, MotionFilter, Vector3};
pub use quadrature::{phase, transition_step, Phase, QuadratureDecoder};

use crate::config::EngineConfig;

/// Raw hardware sample for one tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawInputs {
    /// Encoder phase A line level
    pub phase_a: bool,
    /// Encoder phase B line level
    pub phase_b: bool,
    /// Button is held (already converted from the active-low line)
    pub button_pressed: bool,
    /// Accelerometer reading (m/s²)
    pub acceleration: Vector3,
}

/// Clean per-tick signals consumed by the arbiter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickInputs {
    /// Detents turned since the previous tick (negative = left)
    pub encoder_delta: i32,
    /// Button press edge seen this tick
    pub button_just_pressed: bool,
    /// Filtered motion is above the shake threshold
    pub is_shake: bool,
}

/// Owns the input components for the whole session
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputFusion {
    encoder: QuadratureDecoder,
    button: DebouncedButton,
    motion: MotionFilter,
    /// Encoder position reported at the previous delta read
    last_position: i32,
}

impl InputFusion {
    /// Assemble from already-built components
    pub fn new(encoder: QuadratureDecoder, button: DebouncedButton, motion: MotionFilter) -> Self {
        let last_position = encoder.position();
        Self {
            encoder,
            button,
            motion,
            last_position,
        }
    }

    /// Build decoder and button from the current line levels
    ///
    /// Takes a calibrated [`MotionFilter`], so no gameplay tick can run
    /// before the baseline exists.
    pub fn from_config(
        initial: &RawInputs,
        now_ms: u32,
        motion: MotionFilter,
        config: &EngineConfig,
    ) -> Self {
        Self::new(
            QuadratureDecoder::from_config(initial.phase_a, initial.phase_b, now_ms, config),
            DebouncedButton::from_config(initial.button_pressed, now_ms, config),
            motion,
        )
    }

    /// Poll all three components
    pub fn poll(&mut self, now_ms: u32, raw: &RawInputs) -> TickInputs {
        let mut inputs = self.poll_controls(now_ms, raw);
        inputs.is_shake = self.motion.sample_shake(raw.acceleration);
        inputs
    }

    /// Poll encoder and button only
    ///
    /// Used on menu and end screens where motion is not read.
    pub fn poll_controls(&mut self, now_ms: u32, raw: &RawInputs) -> TickInputs {
        self.button.update(raw.button_pressed, now_ms);
        let encoder_delta = self.encoder_delta(raw.phase_a, raw.phase_b, now_ms);

        TickInputs {
            encoder_delta,
            button_just_pressed: self.button.just_pressed(),
            is_shake: false,
        }
    }

    /// Feed one motion reading and drop the result
    ///
    /// Taken at the start of each level so a reading carried over from the
    /// previous level is not acted on. The filter is not reset.
    pub fn discard_motion_sample(&mut self, acceleration: Vector3) {
        self.motion.sample(acceleration);
    }

    fn encoder_delta(&mut self, a: bool, b: bool, now_ms: u32) -> i32 {
        if !self.encoder.update(a, b, now_ms) {
            return 0;
        }
        let position = self.encoder.position();
        let delta = position - self.last_position;
        self.last_position = position;
        delta
    }

    pub fn encoder(&self) -> &QuadratureDecoder {
        &self.encoder
    }

    pub fn button(&self) -> &DebouncedButton {
        &self.button
    }

    pub fn motion(&self) -> &MotionFilter {
        &self.motion
    }
}
