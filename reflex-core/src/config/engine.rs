//! Engine tunables
//!
//! Compiled-in constants and the [`EngineConfig`] bundle used to build the
//! input components.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Highest level; success here wins the game
pub const MAX_LEVEL: u8 = 10;

/// Floor for the per-level time limit (ms)
pub const MIN_TIME_LIMIT_MS: u32 = 1500;

/// EMA smoothing factor for filtered acceleration
pub const EMA_ALPHA: f32 = 0.3;

/// Filtered magnitude above which motion is a shake (m/s²)
pub const SHAKE_THRESHOLD: f32 = 3.0;

/// Minimum spacing between processed encoder phase changes (ms)
pub const ENCODER_DEBOUNCE_MS: u32 = 3;

/// Valid quadrature transitions per detent
pub const PULSES_PER_DETENT: u8 = 1;

/// Time a button level must hold before it is accepted (ms)
pub const BUTTON_DEBOUNCE_MS: u32 = 10;

/// Tick period while a level is running (ms)
pub const PLAY_TICK_MS: u32 = 20;

/// Tick period on menu and end screens (ms)
pub const MENU_TICK_MS: u32 = 50;

/// Accelerometer readings averaged into the baseline
pub const CALIBRATION_SAMPLES: u16 = 40;

/// Spacing between calibration readings (ms)
pub const CALIBRATION_INTERVAL_MS: u32 = 20;

/// Input-side tunables
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EngineConfig {
    /// Valid quadrature transitions per detent (clamped to ≥ 1)
    pub pulses_per_detent: u8,
    /// Encoder debounce window (ms)
    pub encoder_debounce_ms: u32,
    /// Button debounce window (ms)
    pub button_debounce_ms: u32,
    /// EMA smoothing factor
    pub ema_alpha: f32,
    /// Shake threshold (m/s²)
    pub shake_threshold: f32,
    /// Calibration sample count
    pub calibration_samples: u16,
    /// Calibration sample spacing (ms)
    pub calibration_interval_ms: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            pulses_per_detent: PULSES_PER_DETENT,
            encoder_debounce_ms: ENCODER_DEBOUNCE_MS,
            button_debounce_ms: BUTTON_DEBOUNCE_MS,
            ema_alpha: EMA_ALPHA,
            shake_threshold: SHAKE_THRESHOLD,
            calibration_samples: CALIBRATION_SAMPLES,
            calibration_interval_ms: CALIBRATION_INTERVAL_MS,
        }
    }
}
