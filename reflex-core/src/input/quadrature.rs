//! Quadrature rotary encoder decoding
//!
//! Turns the two phase lines of a mechanical encoder into signed detent
//! counts. Only the eight single-step Gray-code transitions move the
//! count; same-state reads are ignored and every other transition is
//! contact noise that contributes nothing.

use crate::config::EngineConfig;

/// 2-bit phase state, `(A << 1) | B`
pub type Phase = u8;

/// Pack two phase levels into a [`Phase`]
pub const fn phase(a: bool, b: bool) -> Phase {
    ((a as u8) << 1) | (b as u8)
}

/// Step per (previous, next) phase
///
/// Clockwise runs 00 → 01 → 11 → 10 → 00 and counts +1 per transition;
/// the reverse order counts −1. Diagonal moves (both bits flipped) are
/// missed or bounced edges and count 0.
const STEP_TABLE: [[i8; 4]; 4] = [
    // to: 00  01  10  11
    [0, 1, -1, 0],  // from 00
    [-1, 0, 0, 1],  // from 01
    [1, 0, 0, -1],  // from 10
    [0, -1, 1, 0],  // from 11
];

/// Signed step for a phase transition
pub const fn transition_step(prev: Phase, next: Phase) -> i8 {
    STEP_TABLE[(prev & 0b11) as usize][(next & 0b11) as usize]
}

/// Quadrature decoder with detent accumulation
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct QuadratureDecoder {
    /// Detent count
    position: i32,
    /// Sub-detent pulse accumulator
    pulses: i32,
    /// Pulses per detent (≥ 1)
    pulses_per_detent: i32,
    /// Minimum spacing between processed phase changes (ms)
    debounce_ms: u32,
    /// Last phase that was processed
    last_phase: Phase,
    /// Time of the last processed phase change (ms)
    last_change_ms: u32,
}

impl QuadratureDecoder {
    /// Create a decoder from the current line levels
    ///
    /// `now_ms` seeds the debounce timer, so changes within the debounce
    /// window of construction are not processed.
    pub fn new(a: bool, b: bool, now_ms: u32, pulses_per_detent: u8, debounce_ms: u32) -> Self {
        Self {
            position: 0,
            pulses: 0,
            pulses_per_detent: i32::from(pulses_per_detent.max(1)),
            debounce_ms,
            last_phase: phase(a, b),
            last_change_ms: now_ms,
        }
    }

    /// Create a decoder using the encoder settings from `config`
    pub fn from_config(a: bool, b: bool, now_ms: u32, config: &EngineConfig) -> Self {
        Self::new(
            a,
            b,
            now_ms,
            config.pulses_per_detent,
            config.encoder_debounce_ms,
        )
    }

    /// Feed one sample of both lines
    ///
    /// Returns true if [`position`](Self::position) changed.
    ///
    /// Samples arriving within the debounce window of the last processed
    /// phase change are skipped entirely. The window restarts on every
    /// phase change, valid or not, rather than on each detent.
    pub fn update(&mut self, a: bool, b: bool, now_ms: u32) -> bool {
        if now_ms.wrapping_sub(self.last_change_ms) < self.debounce_ms {
            return false;
        }

        let next = phase(a, b);
        if next == self.last_phase {
            return false;
        }

        let step = transition_step(self.last_phase, next);
        self.last_phase = next;
        self.last_change_ms = now_ms;

        if step == 0 {
            return false;
        }

        self.pulses += i32::from(step);

        let mut changed = false;
        while self.pulses >= self.pulses_per_detent {
            self.position += 1;
            self.pulses -= self.pulses_per_detent;
            changed = true;
        }
        while self.pulses <= -self.pulses_per_detent {
            self.position -= 1;
            self.pulses += self.pulses_per_detent;
            changed = true;
        }

        changed
    }

    /// Current detent count
    pub fn position(&self) -> i32 {
        self.position
    }

    /// Last processed phase
    pub fn phase(&self) -> Phase {
        self.last_phase
    }

    /// Pulses accumulated toward the next detent
    pub fn pending_pulses(&self) -> i32 {
        self.pulses
    }
}
