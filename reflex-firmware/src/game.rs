//! Game loop
//!
//! Calibrates the accelerometer, then runs the engine one tick at a time:
//! sample the hardware, update, present the frame, wait. The wait depends
//! on what the tick produced; all game timing comes from the engine's
//! millisecond clock.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_rp::i2c::{Blocking, I2c};
use embassy_rp::peripherals::I2C1;
use embassy_time::{Delay, Instant, Timer};
use embedded_hal_bus::i2c::RefCellDevice;
use rand_core::SeedableRng;
use rand_pcg::Pcg32;

use reflex_core::config::EngineConfig;
use reflex_core::input::{InputFusion, MotionFilter, RawInputs, Vector3};
use reflex_core::traits::IndicatorLight;
use reflex_core::view::{present, Frame, CELEBRATION};
use reflex_core::{GameStateMachine, Outcome, Transition};
use reflex_display::{Screen, Ssd1306};
use reflex_drivers::{Adxl345, ControlPins};

use crate::board::RgbLed;

pub type Controls = ControlPins<Input<'static>, Input<'static>, Input<'static>>;

/// I2C1 handle; the accelerometer and the OLED share the bus
pub type SharedI2c<'a> = RefCellDevice<'a, I2c<'static, I2C1, Blocking>>;
pub type Sensor<'a> = Adxl345<SharedI2c<'a>>;
pub type Panel<'a> = Ssd1306<SharedI2c<'a>>;

/// Hold before and after calibration (ms)
const CALIBRATION_HOLD_MS: u64 = 500;

/// Settle time after a confirm or restart press (ms)
const PRESS_SETTLE_MS: u64 = 200;

/// "READY?" hold before level 1 (ms)
const READY_MS: u64 = 1000;

/// "GOOD!" hold between levels (ms)
const LEVEL_PASSED_MS: u64 = 500;

/// Time each celebration colour is shown (ms)
const CELEBRATION_STEP_MS: u64 = 200;

/// Times the celebration palette is cycled
const CELEBRATION_ROUNDS: usize = 3;

fn now_ms() -> u32 {
    Instant::now().as_millis() as u32
}

/// Outputs the engine frames are pushed to
struct Outputs<'a> {
    screen: Screen,
    panel: Panel<'a>,
    led: RgbLed,
}

impl Outputs<'_> {
    fn show(&mut self, frame: &Frame) {
        // Screen and LED are infallible
        let _ = present(frame, &mut self.screen, &mut self.led);
        if let Err(e) = self.screen.render(&mut self.panel) {
            warn!("Display render failed: {:?}", e);
        }
    }
}

/// Seed from the low mantissa bits of the baseline, which carry sensor noise
fn seed_from(baseline: Vector3) -> u64 {
    let bits = baseline.x.to_bits()
        ^ baseline.y.to_bits().rotate_left(11)
        ^ baseline.z.to_bits().rotate_left(22);
    (u64::from(bits) << 32) | u64::from(now_ms())
}

fn sample(controls: &mut Controls, sensor: &mut Sensor<'_>) -> RawInputs {
    match controls.sample(sensor) {
        Ok(raw) => raw,
        Err(e) => match e {},
    }
}

/// Run the game forever
pub async fn run(
    mut controls: Controls,
    mut sensor: Sensor<'_>,
    panel: Panel<'_>,
    led: RgbLed,
) -> ! {
    info!("Game loop started");

    let config = EngineConfig::default();
    let mut out = Outputs {
        screen: Screen::new(),
        panel,
        led,
    };

    // Calibration blocks for samples × interval
    out.show(&Frame::calibrating());
    Timer::after_millis(CALIBRATION_HOLD_MS).await;
    let motion = MotionFilter::calibrate(&mut sensor, &mut Delay, &config);
    let baseline = motion.baseline();
    info!(
        "Baseline: x={} y={} z={} m/s2",
        baseline.x, baseline.y, baseline.z
    );
    out.show(&Frame::calibrated());
    Timer::after_millis(CALIBRATION_HOLD_MS).await;

    let rng = Pcg32::seed_from_u64(seed_from(baseline));
    let initial = sample(&mut controls, &mut sensor);
    let inputs = InputFusion::from_config(&initial, now_ms(), motion, &config);
    let mut engine = GameStateMachine::new(inputs, rng);

    loop {
        let now = now_ms();
        let raw = sample(&mut controls, &mut sensor);
        let transition = engine.update(now, &raw);
        let frame = match transition {
            Transition::Won => Frame::celebrating(),
            _ => engine.frame(now),
        };
        out.show(&frame);

        let pause_ms = match transition {
            Transition::Started(difficulty) => {
                info!("Difficulty: {=str}", difficulty.name);
                Timer::after_millis(PRESS_SETTLE_MS).await;
                READY_MS
            }
            Transition::CursorMoved(index) => {
                debug!("Menu cursor: {}", index);
                u64::from(engine.tick_interval_ms())
            }
            Transition::LevelStarted {
                level,
                target,
                time_limit_ms,
            } => {
                info!(
                    "Level {}: {=str} within {} ms",
                    level,
                    target.label(),
                    time_limit_ms
                );
                u64::from(engine.tick_interval_ms())
            }
            Transition::LevelPassed { next_level } => {
                info!("Level passed, next {}", next_level);
                LEVEL_PASSED_MS
            }
            Transition::GameOver { level, outcome } => {
                match outcome {
                    Outcome::Failure(action) => {
                        info!("Game over at level {}: {=str}", level, action.label())
                    }
                    _ => info!("Game over at level {}: timeout", level),
                }
                u64::from(engine.tick_interval_ms())
            }
            Transition::Won => {
                info!("All levels cleared");
                celebrate(&mut out).await;
                out.show(&engine.frame(now_ms()));
                u64::from(engine.tick_interval_ms())
            }
            Transition::Restarted => {
                info!("Back to menu");
                PRESS_SETTLE_MS
            }
            Transition::None => u64::from(engine.tick_interval_ms()),
        };

        Timer::after_millis(pause_ms).await;
    }
}

/// Cycle the indicator through the celebration palette
async fn celebrate(out: &mut Outputs<'_>) {
    for _ in 0..CELEBRATION_ROUNDS {
        for color in CELEBRATION {
            let _ = out.led.set(color);
            Timer::after_millis(CELEBRATION_STEP_MS).await;
        }
    }
}
