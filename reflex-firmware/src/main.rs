//! Reflex - handheld reflex game firmware
//!
//! Main firmware binary for a Seeed XIAO RP2040 with a rotary encoder,
//! a push-button and an ADXL345 accelerometer. The game asks for one of
//! four actions per level and the time allowed shrinks as levels go by.
//!
//! Pin map:
//! - D3 (GPIO29): encoder phase A, pulled up
//! - D2 (GPIO28): encoder phase B, pulled up
//! - D6 (GPIO0): push-button to ground, pulled up
//! - D4/D5 (GPIO6/GPIO7): I2C1 SDA/SCL to the ADXL345 and the SSD1306 OLED
//! - GPIO17/16/25: onboard RGB LED (active-low)

#![no_std]
#![no_main]

use core::cell::RefCell;

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, I2c};
use embedded_hal_bus::i2c::RefCellDevice;
use {defmt_rtt as _, panic_probe as _};

use reflex_display::Ssd1306;
use reflex_drivers::{Adxl345, ControlPins};

mod board;
mod game;

/// I2C bus speed for the accelerometer and the OLED
const I2C_FREQUENCY_HZ: u32 = 400_000;

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Reflex firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Indicator off until the first frame
    let led = board::RgbLed::new(
        Output::new(p.PIN_17, Level::High),
        Output::new(p.PIN_16, Level::High),
        Output::new(p.PIN_25, Level::High),
    );

    let controls = ControlPins::new(
        Input::new(p.PIN_29, Pull::Up),
        Input::new(p.PIN_28, Pull::Up),
        Input::new(p.PIN_0, Pull::Up),
    );

    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = I2C_FREQUENCY_HZ;
    let bus = RefCell::new(I2c::new_blocking(p.I2C1, p.PIN_7, p.PIN_6, i2c_config));

    let sensor = match Adxl345::new(RefCellDevice::new(&bus)) {
        Ok(sensor) => sensor,
        Err(e) => defmt::panic!("ADXL345 init failed: {}", e),
    };
    info!("ADXL345 ready");

    let mut panel = Ssd1306::new(RefCellDevice::new(&bus));
    if let Err(e) = panel.init() {
        defmt::panic!("SSD1306 init failed: {}", e);
    }
    info!("SSD1306 ready");

    game::run(controls, sensor, panel, led).await
}
