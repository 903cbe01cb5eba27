//! Accelerometer filtering and shake detection
//!
//! Raw readings have the calibrated resting baseline removed per axis and
//! are then smoothed with an exponential moving average:
//!
//! ```text
//! filtered = α·(raw − baseline) + (1 − α)·filtered_prev
//! ```
//!
//! A shake is a filtered magnitude strictly above the threshold.

use core::ops::{Add, Sub};

use embedded_hal::delay::DelayNs;

use crate::config::EngineConfig;
use crate::traits::Accelerometer;

/// Tri-axis acceleration (m/s²)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Euclidean norm
    pub fn magnitude(&self) -> f32 {
        libm::sqrtf(self.x * self.x + self.y * self.y + self.z * self.z)
    }

    /// Multiply every axis by `k`
    pub fn scale(self, k: f32) -> Self {
        Self::new(self.x * k, self.y * k, self.z * k)
    }
}

impl Add for Vector3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vector3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

/// Strict shake test: a magnitude equal to the threshold is not a shake
pub fn is_shake(magnitude: f32, threshold: f32) -> bool {
    magnitude > threshold
}

/// Average `samples` readings taken `interval_ms` apart
///
/// Blocks for `samples × interval_ms`. There is no check that the device
/// was actually still; a disturbed calibration biases the whole session.
/// A sample count of zero is treated as one.
pub fn calibrate_baseline<A, D>(
    sensor: &mut A,
    delay: &mut D,
    samples: u16,
    interval_ms: u32,
) -> Vector3
where
    A: Accelerometer + ?Sized,
    D: DelayNs + ?Sized,
{
    let count = samples.max(1);
    let mut sum = Vector3::ZERO;

    for _ in 0..count {
        sum = sum + sensor.acceleration();
        delay.delay_ms(interval_ms);
    }

    sum.scale(1.0 / f32::from(count))
}

/// Baseline-corrected EMA filter over accelerometer readings
///
/// The baseline is fixed at construction; filter state carries across
/// levels for the whole session.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionFilter {
    baseline: Vector3,
    filtered: Vector3,
    alpha: f32,
    threshold: f32,
}

impl MotionFilter {
    /// Create a filter around a known baseline
    pub fn new(baseline: Vector3, alpha: f32, threshold: f32) -> Self {
        Self {
            baseline,
            filtered: Vector3::ZERO,
            alpha,
            threshold,
        }
    }

    /// Create a filter around a known baseline with `config` tunables
    pub fn from_config(baseline: Vector3, config: &EngineConfig) -> Self {
        Self::new(baseline, config.ema_alpha, config.shake_threshold)
    }

    /// Run the blocking calibration and build a filter from it
    pub fn calibrate<A, D>(sensor: &mut A, delay: &mut D, config: &EngineConfig) -> Self
    where
        A: Accelerometer + ?Sized,
        D: DelayNs + ?Sized,
    {
        let baseline = calibrate_baseline(
            sensor,
            delay,
            config.calibration_samples,
            config.calibration_interval_ms,
        );
        Self::from_config(baseline, config)
    }

    /// Feed one raw reading and return the new filtered vector
    pub fn sample(&mut self, raw: Vector3) -> Vector3 {
        let corrected = raw - self.baseline;
        self.filtered = corrected.scale(self.alpha) + self.filtered.scale(1.0 - self.alpha);
        self.filtered
    }

    /// Feed one raw reading and report whether it reads as a shake
    pub fn sample_shake(&mut self, raw: Vector3) -> bool {
        self.sample(raw);
        self.is_shake()
    }

    /// Resting offset subtracted from every reading
    pub fn baseline(&self) -> Vector3 {
        self.baseline
    }

    /// Last filtered vector
    pub fn filtered(&self) -> Vector3 {
        self.filtered
    }

    /// Magnitude of the last filtered vector
    pub fn magnitude(&self) -> f32 {
        self.filtered.magnitude()
    }

    /// Whether the last filtered vector is a shake
    pub fn is_shake(&self) -> bool {
        is_shake(self.magnitude(), self.threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockSensor {
        readings: &'static [Vector3],
        next: usize,
    }

    impl Accelerometer for MockSensor {
        fn acceleration(&mut self) -> Vector3 {
            let v = self.readings[self.next % self.readings.len()];
            self.next += 1;
            v
        }
    }

    #[derive(Default)]
    struct MockDelay {
        total_ms: u32,
        calls: u32,
    }

    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ms += ns / 1_000_000;
        }

        fn delay_ms(&mut self, ms: u32) {
            self.total_ms += ms;
            self.calls += 1;
        }
    }

    #[test]
    fn test_calibration_averages() {
        static READINGS: [Vector3; 2] = [Vector3::new(0.0, 1.0, 9.0), Vector3::new(0.2, 1.0, 10.0)];
        let mut sensor = MockSensor {
            readings: &READINGS,
            next: 0,
        };
        let mut delay = MockDelay::default();

        let baseline = calibrate_baseline(&mut sensor, &mut delay, 40, 20);

        assert!((baseline.x - 0.1).abs() < 1e-5);
        assert!((baseline.y - 1.0).abs() < 1e-5);
        assert!((baseline.z - 9.5).abs() < 1e-5);
        assert_eq!(sensor.next, 40);
        assert_eq!(delay.calls, 40);
        assert_eq!(delay.total_ms, 800);
    }

    #[test]
    fn test_calibration_zero_samples() {
        static READINGS: [Vector3; 1] = [Vector3::new(1.0, 2.0, 3.0)];
        let mut sensor = MockSensor {
            readings: &READINGS,
            next: 0,
        };
        let mut delay = MockDelay::default();
        let baseline = calibrate_baseline(&mut sensor, &mut delay, 0, 20);
        assert_eq!(baseline, Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_calibrated_filter_uses_config() {
        static READINGS: [Vector3; 1] = [Vector3::new(0.5, -0.5, 9.8)];
        let mut sensor = MockSensor {
            readings: &READINGS,
            next: 0,
        };
        let mut delay = MockDelay::default();
        let filter = MotionFilter::calibrate(&mut sensor, &mut delay, &EngineConfig::default());
        let error = (filter.baseline() - Vector3::new(0.5, -0.5, 9.8)).magnitude();
        assert!(error < 1e-4);
        assert_eq!(delay.total_ms, 800);
    }

    #[test]
    fn test_resting_reading_stays_zero() {
        let baseline = Vector3::new(0.1, -0.2, 9.8);
        let mut filter = MotionFilter::new(baseline, 0.3, 3.0);
        for _ in 0..10 {
            let out = filter.sample(baseline);
            assert_eq!(out, Vector3::ZERO);
        }
        assert!(!filter.is_shake());
    }

    #[test]
    fn test_first_sample_is_alpha_weighted() {
        let mut filter = MotionFilter::new(Vector3::ZERO, 0.3, 3.0);
        let out = filter.sample(Vector3::new(10.0, 0.0, -10.0));
        assert!((out.x - 3.0).abs() < 1e-5);
        assert!((out.z + 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_ema_converges_monotonically() {
        let alpha = 0.3f32;
        let target = 10.0f32;
        let epsilon = 1e-3f32;
        let mut filter = MotionFilter::new(Vector3::ZERO, alpha, 3.0);

        // Residual after n steps is target·(1 − α)^n
        let n = ((epsilon / target).ln() / (1.0 - alpha).ln()).ceil() as usize + 1;

        let mut prev = 0.0f32;
        for _ in 0..n {
            let x = filter.sample(Vector3::new(target, 0.0, 0.0)).x;
            assert!(x >= prev, "not monotone: {} < {}", x, prev);
            assert!(x <= target, "overshoot: {}", x);
            prev = x;
        }
        assert!((target - prev).abs() < epsilon);
    }

    #[test]
    fn test_state_persists_between_samples() {
        let mut filter = MotionFilter::new(Vector3::ZERO, 0.5, 3.0);
        filter.sample(Vector3::new(8.0, 0.0, 0.0));
        let out = filter.sample(Vector3::ZERO);
        assert!((out.x - 2.0).abs() < 1e-5);
        assert_eq!(filter.filtered(), out);
    }

    #[test]
    fn test_threshold_is_strict() {
        assert!(!is_shake(3.0, 3.0));
        assert!(is_shake(3.0001, 3.0));
        assert!(!is_shake(2.9, 3.0));
        assert_eq!(Vector3::new(3.0, 0.0, 0.0).magnitude(), 3.0);
        assert_eq!(Vector3::new(0.0, 3.0, 4.0).magnitude(), 5.0);
    }

    #[test]
    fn test_filtered_magnitude_at_threshold() {
        // α = 1 passes readings straight through
        let mut filter = MotionFilter::new(Vector3::ZERO, 1.0, 3.0);
        assert!(!filter.sample_shake(Vector3::new(0.0, 3.0, 0.0)));
        assert!(filter.sample_shake(Vector3::new(0.0, 3.01, 0.0)));
    }

    #[test]
    fn test_single_spike_is_damped() {
        let mut filter = MotionFilter::new(Vector3::ZERO, 0.3, 3.0);
        // 0.3 × 9 = 2.7, still under the threshold
        assert!(!filter.sample_shake(Vector3::new(9.0, 0.0, 0.0)));
        // 0.3 × 9 + 0.7 × 2.7 = 4.59
        assert!(filter.sample_shake(Vector3::new(9.0, 0.0, 0.0)));
    }
}
