//! Error types for transport operations.

use nasfan_core::constants::FRAME_LEN;

/// Result type alias for transport and driver operations.
pub type Result<T> = std::result::Result<T, TransportError>;

/// Errors raised by the serial channel.
///
/// An [`Open`](TransportError::Open) failure is fatal at startup; every
/// other variant is caught at the control-loop boundary and treated as a
/// transient "no data" condition for that cycle.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The serial device could not be opened.
    #[error("failed to open serial device {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: serialport::Error,
    },

    /// The channel accepted fewer bytes than a whole frame.
    #[error("short write: channel accepted {written} of {FRAME_LEN} bytes")]
    ShortWrite { written: usize },

    /// Generic I/O error on the open channel.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TransportError {
    /// Create a new open error.
    pub fn open(path: impl Into<String>, source: serialport::Error) -> Self {
        Self::Open {
            path: path.into(),
            source,
        }
    }

    /// Create a new short-write error.
    pub fn short_write(written: usize) -> Self {
        Self::ShortWrite { written }
    }
}
