//! Text screen for the Reflex handheld
//!
//! This crate provides:
//! - `DisplayBackend` trait for character displays
//! - `Screen`, a three-line buffer that implements the engine's
//!   `TextDisplay` and renders centred text to any backend
//! - `Ssd1306`, the 128x64 I2C OLED backend
//!
//! The engine only ever calls `TextDisplay::show`; the firmware decides
//! when the buffer is pushed to the panel.

#![no_std]

pub mod backend;
pub mod screen;
pub mod ssd1306;

// Re-export key types
pub use backend::{DisplayBackend, DisplayError};
pub use screen::{Screen, SCREEN_COLS, SCREEN_ROWS};
pub use ssd1306::Ssd1306;
