//! ADXL345 accelerometer (I2C)
//!
//! Three-axis accelerometer in its power-on ±2 g range. Each axis is a
//! little-endian i16 at 4 mg/LSB, converted here to m/s².
//!
//! # Bring-up
//!
//! 1. Read DEVID and check for 0xE5
//! 2. Set the Measure bit in POWER_CTL (the part powers up in standby)

use embedded_hal::i2c::I2c;
use reflex_core::input::Vector3;
use reflex_core::traits::Accelerometer;

/// ADXL345 register addresses
pub mod reg {
    /// Device ID (reads 0xE5)
    pub const DEVID: u8 = 0x00;
    /// Power-saving features control
    pub const POWER_CTL: u8 = 0x2D;
    /// First of six data registers (X0, X1, Y0, Y1, Z0, Z1)
    pub const DATAX0: u8 = 0x32;
}

/// Default I2C address (ALT ADDRESS pin low)
pub const DEFAULT_ADDRESS: u8 = 0x53;

/// Value of DEVID on a genuine part
pub const DEVICE_ID: u8 = 0xE5;

/// POWER_CTL Measure bit
const MEASURE: u8 = 0x08;

/// Scale factor at full resolution or ±2 g (g/LSB)
const G_PER_LSB: f32 = 0.004;

/// Standard gravity (m/s²)
const STANDARD_GRAVITY: f32 = 9.80665;

/// ADXL345 driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Adxl345Error<E> {
    /// I2C transfer failed
    Bus(E),
    /// DEVID did not read 0xE5
    UnknownDevice(u8),
}

/// Convert one raw axis count to m/s²
fn to_ms2(raw: i16) -> f32 {
    f32::from(raw) * G_PER_LSB * STANDARD_GRAVITY
}

/// ADXL345 on an I2C bus
pub struct Adxl345<I2C> {
    i2c: I2C,
    address: u8,
    /// Last successful reading, returned when a read fails
    last: Vector3,
}

impl<I2C: I2c> Adxl345<I2C> {
    /// Probe and start measuring at the default address
    pub fn new(i2c: I2C) -> Result<Self, Adxl345Error<I2C::Error>> {
        Self::with_address(i2c, DEFAULT_ADDRESS)
    }

    /// Probe and start measuring at `address`
    pub fn with_address(i2c: I2C, address: u8) -> Result<Self, Adxl345Error<I2C::Error>> {
        let mut dev = Self {
            i2c,
            address,
            last: Vector3::ZERO,
        };

        let id = dev
            .read_register(reg::DEVID)
            .map_err(Adxl345Error::Bus)?;
        if id != DEVICE_ID {
            return Err(Adxl345Error::UnknownDevice(id));
        }

        dev.i2c
            .write(address, &[reg::POWER_CTL, MEASURE])
            .map_err(Adxl345Error::Bus)?;
        Ok(dev)
    }

    fn read_register(&mut self, register: u8) -> Result<u8, I2C::Error> {
        let mut buf = [0u8; 1];
        self.i2c.write_read(self.address, &[register], &mut buf)?;
        Ok(buf[0])
    }

    /// Read all three axes in one burst (m/s²)
    pub fn read(&mut self) -> Result<Vector3, Adxl345Error<I2C::Error>> {
        let mut buf = [0u8; 6];
        self.i2c
            .write_read(self.address, &[reg::DATAX0], &mut buf)
            .map_err(Adxl345Error::Bus)?;

        let x = i16::from_le_bytes([buf[0], buf[1]]);
        let y = i16::from_le_bytes([buf[2], buf[3]]);
        let z = i16::from_le_bytes([buf[4], buf[5]]);

        let v = Vector3::new(to_ms2(x), to_ms2(y), to_ms2(z));
        self.last = v;
        Ok(v)
    }

    /// Last successful reading
    pub fn last(&self) -> Vector3 {
        self.last
    }

    /// Give the bus back
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> Accelerometer for Adxl345<I2C> {
    fn acceleration(&mut self) -> Vector3 {
        match self.read() {
            Ok(v) => v,
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!(
                    "ADXL345 read failed, reusing last sample: {}",
                    defmt::Debug2Format(&_e)
                );
                self.last
            }
        }
    }
}
