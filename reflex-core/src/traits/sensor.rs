//! Accelerometer trait

use crate::input::Vector3;

/// Tri-axis accelerometer
///
/// Reads are treated as instantaneous and always successful. A driver that
/// can fail is expected to absorb the fault, for example by returning its
/// last good reading.
pub trait Accelerometer {
    /// Current acceleration (m/s²)
    fn acceleration(&mut self) -> Vector3;
}
