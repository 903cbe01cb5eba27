//! Push-button debouncing
//!
//! A raw level becomes the stable level only after it has held for the
//! debounce window. A press edge is reported for exactly one update.

use crate::config::EngineConfig;

/// Debounced push-button
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DebouncedButton {
    /// Last raw level (true = pressed)
    raw: bool,
    /// Accepted level
    stable: bool,
    /// Stable level went to pressed on the last update
    just_pressed: bool,
    /// Time the raw level last changed (ms)
    raw_changed_ms: u32,
    /// Hold time before a raw level is accepted (ms)
    debounce_ms: u32,
}

impl DebouncedButton {
    /// Create a button whose stable level starts at `pressed`
    pub fn new(pressed: bool, now_ms: u32, debounce_ms: u32) -> Self {
        Self {
            raw: pressed,
            stable: pressed,
            just_pressed: false,
            raw_changed_ms: now_ms,
            debounce_ms,
        }
    }

    /// Create a button using the debounce window from `config`
    pub fn from_config(pressed: bool, now_ms: u32, config: &EngineConfig) -> Self {
        Self::new(pressed, now_ms, config.button_debounce_ms)
    }

    /// Feed one raw sample (true = pressed)
    pub fn update(&mut self, raw_pressed: bool, now_ms: u32) {
        self.just_pressed = false;

        if raw_pressed != self.raw {
            self.raw = raw_pressed;
            self.raw_changed_ms = now_ms;
            return;
        }

        if self.stable != self.raw && now_ms.wrapping_sub(self.raw_changed_ms) >= self.debounce_ms
        {
            self.stable = self.raw;
            self.just_pressed = self.stable;
        }
    }

    /// Current debounced level
    pub fn pressed(&self) -> bool {
        self.stable
    }

    /// True for the one update that accepted a press
    pub fn just_pressed(&self) -> bool {
        self.just_pressed
    }
}
