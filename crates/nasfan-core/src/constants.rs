//! Protocol and control-loop constants.
//!
//! # Wire Format
//!
//! Every command and response is exactly [`FRAME_LEN`] bytes:
//!
//! ```text
//! [0xFA, opcode, subopcode, param_hi, param_lo, reserved, 0xFB]
//!  ^^^^                                                   ^^^^
//!  start marker                                           end marker
//! ```
//!
//! Anything that is not exactly 7 bytes bracketed by the two markers is
//! noise and is discarded, never repaired.
//!
//! These values come from the WD enclosure microcontroller firmware and are
//! not negotiable at runtime; changing them breaks compatibility with the
//! device.

// ============================================================================
// Frame layout
// ============================================================================

/// Fixed length of every command and response frame in bytes.
pub const FRAME_LEN: usize = 7;

/// Start-of-frame marker, first byte of every valid frame.
pub const START_BYTE: u8 = 0xFA;

/// End-of-frame marker, last byte of every valid frame.
pub const END_BYTE: u8 = 0xFB;

/// Byte index of the raw sensor code in a temperature response.
pub const TEMP_CODE_INDEX: usize = 5;

// ============================================================================
// Command classes
// ============================================================================

/// Opcode of the fan command class (speed control).
pub const OPCODE_FAN: u8 = 0x02;

/// Opcode of the system command class (LED, temperature).
pub const OPCODE_SYSTEM: u8 = 0x03;

/// Subopcode selecting a fan speed write within [`OPCODE_FAN`].
pub const SUBOP_FAN_SET: u8 = 0x00;

/// Subopcode selecting the power LED within [`OPCODE_SYSTEM`].
pub const SUBOP_LED: u8 = 0x06;

/// Subopcode of a temperature request/response within [`OPCODE_SYSTEM`].
pub const SUBOP_TEMP: u8 = 0x08;

// ============================================================================
// Serial link
// ============================================================================

/// Link speed. The microcontroller only talks 19200 baud.
pub const BAUD_RATE: u32 = 19_200;

/// Base channel timeout for a single read attempt, in milliseconds.
///
/// A frame read polls the channel repeatedly with this timeout until the
/// caller's deadline expires, discarding malformed or short reads.
pub const CHANNEL_TIMEOUT_MS: u64 = 100;

/// Default deadline for receiving one reply frame, in seconds.
pub const READ_TIMEOUT_SECS: u64 = 5;

// ============================================================================
// Control loop
// ============================================================================

/// Sampling period of the control loop, in seconds.
pub const CONTROL_PERIOD_SECS: u64 = 20;

/// Below this temperature (degrees Celsius) the fan is switched off.
pub const LOW_TEMP: u8 = 40;

/// Above this temperature (degrees Celsius) the fan is forced to maximum.
///
/// Only consulted when the temperature is holding steady; a rising
/// temperature already steps the fan up every cycle.
pub const HIGH_TEMP: u8 = 50;

/// Initial value of the hysteresis counter guarding downward fan steps.
///
/// The counter decrements on every cycle with a falling temperature and is
/// reset to this value after each downward step, so the fan only slows down
/// once the temperature has fallen consistently.
pub const HYSTERESIS: i16 = 2;

// ============================================================================
// Tables
// ============================================================================

/// Number of fan speed steps (step 0 = off, step 9 = maximum).
pub const FAN_STEP_COUNT: usize = 10;

/// Number of valid raw sensor codes in the thermal calibration table.
///
/// Codes 0..=200 map to calibrated readings; anything larger is an invalid
/// reading.
pub const THERMAL_TABLE_LEN: usize = 201;
