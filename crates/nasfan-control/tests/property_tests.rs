//! Property-based tests for the hysteresis decision core.
//!
//! Whatever temperature sequence the sensor produces, the planned fan
//! speed must stay inside the ten-entry table.

use proptest::prelude::*;

use nasfan_control::ControlState;
use nasfan_core::FanStep;

/// Strategy for plausible-and-hostile sample sequences: anything a byte
/// sensor could report, including wild swings.
fn temperature_sequence() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(0u8..=120, 1..200)
}

proptest! {
    /// Property: no sequence of readings can plan a step outside [0, 9].
    #[test]
    fn prop_planned_speed_stays_in_range(temps in temperature_sequence()) {
        let mut state = ControlState::new();

        for temp in temps {
            if let Some(step) = state.plan(temp) {
                prop_assert!(step.as_u8() <= FanStep::MAX.as_u8());
            }
            if let Some(speed) = state.speed() {
                prop_assert!(speed.as_u8() <= FanStep::MAX.as_u8());
            }
        }
    }

    /// Property: the previous-temperature register always tracks the last
    /// available sample.
    #[test]
    fn prop_prev_temp_tracks_last_sample(temps in temperature_sequence()) {
        let mut state = ControlState::new();

        for temp in temps.iter().copied() {
            state.plan(temp);
            prop_assert_eq!(state.prev_temp(), temp);
        }
    }

    /// Property: once any cycle has planned a step, the speed stays set;
    /// the loop never falls back to the uninitialized state.
    #[test]
    fn prop_speed_never_unsets(temps in temperature_sequence()) {
        let mut state = ControlState::new();
        let mut initialized = false;

        for temp in temps {
            if state.plan(temp).is_some() {
                initialized = true;
            }
            if initialized {
                prop_assert!(state.speed().is_some());
            }
        }
    }
}
