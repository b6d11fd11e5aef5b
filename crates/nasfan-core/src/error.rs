use thiserror::Error;

use crate::constants::FRAME_LEN;

#[derive(Error, Debug)]
pub enum Error {
    // Frame errors
    #[error("invalid frame length: expected {FRAME_LEN} bytes, got {0}")]
    InvalidFrameLength(usize),

    #[error("invalid start marker: {0:#04x}")]
    InvalidStartMarker(u8),

    #[error("invalid end marker: {0:#04x}")]
    InvalidEndMarker(u8),

    // Contract errors
    #[error("fan speed step {0} is out of range (valid steps are 0-9)")]
    InvalidFanStep(u8),
}

pub type Result<T> = std::result::Result<T, Error>;
