//! The hysteresis decision core.

use nasfan_core::constants::{HIGH_TEMP, HYSTERESIS, LOW_TEMP};
use nasfan_core::{Celsius, FanStep};

/// Working memory of the control loop.
///
/// Holds the last commanded speed step (`None` until the first command),
/// the previously sampled temperature, and the hysteresis counter guarding
/// downward steps.
///
/// # Decision rules
///
/// [`plan`](ControlState::plan) applies the first matching rule, in this
/// exact order:
///
/// 1. Below [`LOW_TEMP`]: target step 0 (commanded only if not already
///    there).
/// 2. Temperature falling: decrement the hysteresis counter; once the
///    drop exceeds the counter, step down one and reset the counter.
/// 3. Temperature rising: step up one, commanded immediately; there is
///    no hysteresis on the way up.
/// 4. Temperature steady and above [`HIGH_TEMP`]: force step 9. This rule
///    sits below the rising rule, so it is only reachable when the
///    temperature holds exactly, an asymmetry inherited from the
///    device's stock controller and kept deliberately.
/// 5. Otherwise: hold.
///
/// Step arithmetic saturates into the valid table range, so the planned
/// step can never leave [0, 9] no matter what temperature sequence comes
/// in. Stepping up from the unset state lands on step 0.
///
/// # Examples
///
/// ```
/// use nasfan_core::FanStep;
/// use nasfan_control::ControlState;
///
/// let mut state = ControlState::new();
///
/// // First sample, rising from the initial 0: spin up to step 0.
/// assert_eq!(state.plan(55), Some(FanStep::MIN));
/// // Holding hot: force maximum.
/// assert_eq!(state.plan(55), Some(FanStep::MAX));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlState {
    speed: Option<FanStep>,
    prev_temp: Celsius,
    hysteresis: i16,
}

impl ControlState {
    /// Fresh state: speed unset, previous temperature 0, counter full.
    pub fn new() -> Self {
        Self {
            speed: None,
            prev_temp: 0,
            hysteresis: HYSTERESIS,
        }
    }

    /// The last planned speed step, if any cycle has produced one.
    pub fn speed(&self) -> Option<FanStep> {
        self.speed
    }

    /// The previously sampled temperature.
    pub fn prev_temp(&self) -> Celsius {
        self.prev_temp
    }

    /// Decide the next fan speed step for a sampled temperature.
    ///
    /// Returns `Some(step)` when the fan should be commanded this cycle,
    /// `None` to hold. The returned step is committed to the state before
    /// returning; whether the subsequent device write succeeds does not
    /// roll it back.
    ///
    /// Call this only with an available reading; a cycle without one must
    /// leave the state untouched.
    pub fn plan(&mut self, temp: Celsius) -> Option<FanStep> {
        let target = if temp < LOW_TEMP {
            if self.speed != Some(FanStep::MIN) {
                Some(FanStep::MIN)
            } else {
                None
            }
        } else if temp < self.prev_temp {
            self.hysteresis -= 1;
            if i16::from(temp) < i16::from(self.prev_temp) - self.hysteresis {
                self.hysteresis = HYSTERESIS;
                Some(self.step_down())
            } else {
                None
            }
        } else if temp > self.prev_temp {
            Some(self.step_up())
        } else if temp > HIGH_TEMP {
            if self.speed != Some(FanStep::MAX) {
                Some(FanStep::MAX)
            } else {
                None
            }
        } else {
            None
        };

        if let Some(step) = target {
            self.speed = Some(step);
        }
        self.prev_temp = temp;
        target
    }

    fn step_up(&self) -> FanStep {
        self.speed.map_or(FanStep::MIN, FanStep::up)
    }

    fn step_down(&self) -> FanStep {
        self.speed.map_or(FanStep::MIN, FanStep::down)
    }
}

impl Default for ControlState {
    fn default() -> Self {
        Self::new()
    }
}
