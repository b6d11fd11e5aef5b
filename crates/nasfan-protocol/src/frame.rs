//! Fixed 7-byte frame types.
//!
//! # Wire Format
//!
//! ```text
//! [0xFA, opcode, subopcode, param_hi, param_lo, reserved, 0xFB]
//! ```
//!
//! Commands and responses share the same layout. A [`CommandFrame`] is
//! immutable once built; a [`ResponseFrame`] only exists after validation,
//! so holding one is proof the markers and length were correct. Byte
//! sequences that fail validation are treated as absent data, never as
//! partial frames to be repaired.

use std::fmt;

use nasfan_core::constants::{END_BYTE, FRAME_LEN, START_BYTE};
use nasfan_core::{Error, Result};

/// An outgoing command frame.
///
/// One instance is built per request and written to the wire verbatim;
/// building the same command twice yields identical bytes.
///
/// # Examples
///
/// ```
/// use nasfan_protocol::CommandFrame;
///
/// let frame = CommandFrame::new(0x03, 0x08, [0x00, 0x00], 0x00);
/// assert_eq!(frame.as_bytes(), &[0xFA, 0x03, 0x08, 0x00, 0x00, 0x00, 0xFB]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandFrame([u8; FRAME_LEN]);

impl CommandFrame {
    /// Build a command frame from its fields.
    ///
    /// `param` fills the two payload bytes (`param_hi`, `param_lo`);
    /// `reserved` fills byte 5. The markers are fixed.
    pub const fn new(opcode: u8, subopcode: u8, param: [u8; 2], reserved: u8) -> Self {
        Self([
            START_BYTE, opcode, subopcode, param[0], param[1], reserved, END_BYTE,
        ])
    }

    /// Raw wire bytes of the frame.
    pub const fn as_bytes(&self) -> &[u8; FRAME_LEN] {
        &self.0
    }

    /// Command class byte.
    pub const fn opcode(&self) -> u8 {
        self.0[1]
    }

    /// Command sub-class byte.
    pub const fn subopcode(&self) -> u8 {
        self.0[2]
    }
}

impl fmt::Display for CommandFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cmd[{}]", hex(&self.0))
    }
}

/// A validated incoming response frame.
///
/// Produced by [`ResponseFrame::parse`]; consumed once by the device
/// driver and never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseFrame([u8; FRAME_LEN]);

impl ResponseFrame {
    /// Validate a byte sequence as a response frame.
    ///
    /// # Errors
    ///
    /// Returns an error if the sequence is not exactly 7 bytes, does not
    /// start with `0xFA`, or does not end with `0xFB`.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != FRAME_LEN {
            return Err(Error::InvalidFrameLength(bytes.len()));
        }
        if bytes[0] != START_BYTE {
            return Err(Error::InvalidStartMarker(bytes[0]));
        }
        if bytes[FRAME_LEN - 1] != END_BYTE {
            return Err(Error::InvalidEndMarker(bytes[FRAME_LEN - 1]));
        }

        let mut data = [0u8; FRAME_LEN];
        data.copy_from_slice(bytes);
        Ok(Self(data))
    }

    /// Build a response frame from its fields.
    ///
    /// Used by mock transports to emulate the device; the result is always
    /// valid by construction. `payload` fills bytes 3..6.
    pub const fn from_parts(opcode: u8, subopcode: u8, payload: [u8; 3]) -> Self {
        Self([
            START_BYTE, opcode, subopcode, payload[0], payload[1], payload[2], END_BYTE,
        ])
    }

    /// Raw wire bytes of the frame.
    pub const fn as_bytes(&self) -> &[u8; FRAME_LEN] {
        &self.0
    }

    /// Response class byte.
    pub const fn opcode(&self) -> u8 {
        self.0[1]
    }

    /// Response sub-class byte.
    pub const fn subopcode(&self) -> u8 {
        self.0[2]
    }

    /// Check that this response belongs to the given command class.
    pub const fn is_reply_to(&self, opcode: u8, subopcode: u8) -> bool {
        self.opcode() == opcode && self.subopcode() == subopcode
    }
}

impl fmt::Display for ResponseFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rsp[{}]", hex(&self.0))
    }
}

fn hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}
