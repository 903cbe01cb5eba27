//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in reflex-core for the handheld's input hardware:
//!
//! - ADXL345 accelerometer over I2C
//! - Encoder phase lines and push-button over GPIO

#![no_std]
#![deny(unsafe_code)]

pub mod adxl345;
pub mod controls;

pub use adxl345::{Adxl345, Adxl345Error};
pub use controls::ControlPins;
