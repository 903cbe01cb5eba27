//! Encoder and button lines
//!
//! Samples the two encoder phase lines, the push-button and the
//! accelerometer into one [`RawInputs`] record per tick. All three lines
//! use pull-ups: a phase line reads high as 1 and the button pulls its
//! line low when pressed.

use embedded_hal::digital::InputPin;
use reflex_core::input::RawInputs;
use reflex_core::traits::Accelerometer;

/// The handheld's digital input lines
pub struct ControlPins<A, B, BTN> {
    phase_a: A,
    phase_b: B,
    button: BTN,
}

impl<A, B, BTN> ControlPins<A, B, BTN>
where
    A: InputPin,
    B: InputPin<Error = A::Error>,
    BTN: InputPin<Error = A::Error>,
{
    pub fn new(phase_a: A, phase_b: B, button: BTN) -> Self {
        Self {
            phase_a,
            phase_b,
            button,
        }
    }

    /// Read the lines and the accelerometer once
    pub fn sample<S: Accelerometer + ?Sized>(
        &mut self,
        sensor: &mut S,
    ) -> Result<RawInputs, A::Error> {
        Ok(RawInputs {
            phase_a: self.phase_a.is_high()?,
            phase_b: self.phase_b.is_high()?,
            button_pressed: self.button.is_low()?,
            acceleration: sensor.acceleration(),
        })
    }
}
