//! Serial transport and device driver for the enclosure microcontroller.
//!
//! This crate owns everything that touches bytes on a real channel:
//!
//! - [`FrameTransport`] is the seam between the driver and the physical
//!   link: blocking frame write, deadline-bounded frame read.
//! - [`SerialTransport`] is the real implementation on top of the
//!   `serialport` crate, fixed at 19200 8N1.
//! - [`MockTransport`] is a scripted stand-in for tests and development
//!   without hardware, paired with a [`MockHandle`] for inspection.
//! - [`driver`] holds the typed operations the control loop actually
//!   calls: set the power LED, read a calibrated temperature, set a fan
//!   speed step. Each issues one command frame and consumes the
//!   corresponding reply pattern.
//!
//! # Fault model
//!
//! Channel faults (open, write, unexpected I/O errors) surface as
//! [`TransportError`]. A missing, malformed or mismatched reply is not an
//! error: it surfaces as an absent value (`None`) from the read path, and
//! callers treat it as "no data this cycle".

pub mod driver;
pub mod error;
pub mod mock;
pub mod transport;

pub use error::{Result, TransportError};
pub use mock::{MockHandle, MockTransport};
pub use transport::{FrameTransport, SerialTransport};
