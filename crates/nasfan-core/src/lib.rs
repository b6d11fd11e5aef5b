//! Shared types, constants and the error type for the nasfan thermal
//! controller.
//!
//! The enclosure microcontroller speaks a fixed 7-byte command/response
//! protocol over a 19200-baud serial link. This crate holds everything the
//! other layers agree on: the wire constants, the control thresholds, the
//! clamped [`FanStep`] type, the tri-state [`LedState`], and the protocol
//! error taxonomy.

pub mod constants;
pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{Celsius, FanStep, LedState};

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
