//! Board-level collaborators
//!
//! [`RgbLed`] drives the XIAO's onboard three-colour LED as the indicator.

use core::convert::Infallible;

use embassy_rp::gpio::{Level, Output};
use reflex_core::traits::{Color, IndicatorLight};

/// Onboard RGB LED, one active-low pin per channel
///
/// The pins are on/off only, so any non-zero channel lights fully.
pub struct RgbLed {
    red: Output<'static>,
    green: Output<'static>,
    blue: Output<'static>,
}

/// Pin level for one channel (active-low)
fn channel_level(value: u8) -> Level {
    if value > 0 {
        Level::Low
    } else {
        Level::High
    }
}

impl RgbLed {
    pub fn new(red: Output<'static>, green: Output<'static>, blue: Output<'static>) -> Self {
        Self { red, green, blue }
    }
}

impl IndicatorLight for RgbLed {
    type Error = Infallible;

    fn set(&mut self, color: Color) -> Result<(), Self::Error> {
        self.red.set_level(channel_level(color.r));
        self.green.set_level(channel_level(color.g));
        self.blue.set_level(channel_level(color.b));
        Ok(())
    }
}
