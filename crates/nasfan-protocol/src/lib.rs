//! Wire codec for the enclosure microcontroller protocol.
//!
//! Pure and stateless: this crate only shapes and validates bytes. It knows
//! nothing about serial ports, timeouts or retries; those live in
//! `nasfan-hardware`.
//!
//! # Layers
//!
//! - [`frame`] holds the fixed 7-byte [`CommandFrame`]/[`ResponseFrame`]
//!   pair with marker validation.
//! - [`commands`] holds typed constructors for every command the device
//!   understands: tri-state LED, ten-step fan speed, temperature request.
//! - [`thermal`] holds the calibration table mapping raw sensor codes to
//!   degrees Celsius.

pub mod commands;
pub mod frame;
pub mod thermal;

pub use frame::{CommandFrame, ResponseFrame};
pub use thermal::temperature_for;
