//! Core value types shared across the controller.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::FAN_STEP_COUNT;
use crate::error::{Error, Result};

/// A calibrated chassis temperature in whole degrees Celsius.
///
/// The calibration table only produces values in 0..=116, so a byte is the
/// natural representation.
pub type Celsius = u8;

/// Maximum valid fan speed step.
const MAX_STEP: u8 = (FAN_STEP_COUNT - 1) as u8;

/// A fan speed step: an index into the fixed ten-entry speed table.
///
/// Step 0 is off, step 9 is maximum. The type makes out-of-range steps
/// unrepresentable; step arithmetic saturates at both ends, so control
/// logic can step up and down freely without driving the actuator outside
/// the table.
///
/// # Examples
///
/// ```
/// use nasfan_core::FanStep;
///
/// let step = FanStep::new(4).unwrap();
/// assert_eq!(step.up().as_u8(), 5);
/// assert_eq!(FanStep::MAX.up(), FanStep::MAX);
/// assert_eq!(FanStep::MIN.down(), FanStep::MIN);
///
/// assert!(FanStep::new(10).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FanStep(u8);

impl FanStep {
    /// Lowest step (fan off).
    pub const MIN: FanStep = FanStep(0);

    /// Highest step (maximum speed).
    pub const MAX: FanStep = FanStep(MAX_STEP);

    /// Create a fan step from a raw index.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFanStep`] if the index is greater than 9.
    pub fn new(step: u8) -> Result<Self> {
        if step > MAX_STEP {
            return Err(Error::InvalidFanStep(step));
        }
        Ok(Self(step))
    }

    /// Get the raw step index (0..=9).
    pub const fn as_u8(self) -> u8 {
        self.0
    }

    /// Get the step as a table index.
    pub const fn as_index(self) -> usize {
        self.0 as usize
    }

    /// One step faster, saturating at [`FanStep::MAX`].
    pub const fn up(self) -> FanStep {
        if self.0 >= MAX_STEP {
            FanStep::MAX
        } else {
            FanStep(self.0 + 1)
        }
    }

    /// One step slower, saturating at [`FanStep::MIN`].
    pub const fn down(self) -> FanStep {
        if self.0 == 0 {
            FanStep::MIN
        } else {
            FanStep(self.0 - 1)
        }
    }
}

impl fmt::Display for FanStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// State of the enclosure power LED.
///
/// Each state maps to a fixed command frame; there is no way to request an
/// LED state the device does not know.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedState {
    /// LED dark.
    Off,

    /// LED solid on. Set at startup while the controller is running.
    On,

    /// LED blinking. Set on shutdown to show the fan is unmanaged.
    Blink,
}

impl LedState {
    /// Wire code of this state (the `param_hi` byte of the LED command).
    pub const fn code(self) -> u8 {
        match self {
            LedState::Off => 0x00,
            LedState::On => 0x01,
            LedState::Blink => 0x02,
        }
    }
}

impl fmt::Display for LedState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LedState::Off => "off",
            LedState::On => "on",
            LedState::Blink => "blink",
        };
        write!(f, "{}", s)
    }
}
