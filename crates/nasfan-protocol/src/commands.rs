//! Typed constructors for the device command set.
//!
//! The microcontroller understands two command classes: fan control
//! (opcode 0x02) and system control (opcode 0x03, covering the power LED
//! and the temperature sensor). Every operation maps an enumerated value
//! to one fixed frame, so an invalid command is unrepresentable.
//!
//! The fan class also has an RPM-read subopcode on the wire, but the
//! readout format was never reverse engineered and no working consumer
//! exists, so it is deliberately not exposed here.

use nasfan_core::constants::{
    FAN_STEP_COUNT, OPCODE_FAN, OPCODE_SYSTEM, SUBOP_FAN_SET, SUBOP_LED, SUBOP_TEMP,
};
use nasfan_core::{FanStep, LedState};

use crate::frame::CommandFrame;

/// Fan duty payload for each speed step, step 0 (off) through 9 (maximum).
///
/// The curve is the firmware's own, not linear.
const FAN_DUTY: [u8; FAN_STEP_COUNT] = [
    0x00, 0x20, 0x35, 0x40, 0x50, 0x60, 0x80, 0xA0, 0xC0, 0xD2,
];

/// Build the command frame that puts the power LED into `state`.
pub const fn set_led(state: LedState) -> CommandFrame {
    CommandFrame::new(OPCODE_SYSTEM, SUBOP_LED, [state.code(), 0x00], 0x01)
}

/// Build the command frame that requests a temperature reading.
///
/// The device answers with two frames (a reply and a duplicate/ack); the
/// reply carries the raw sensor code in byte 5.
pub const fn read_temperature() -> CommandFrame {
    CommandFrame::new(OPCODE_SYSTEM, SUBOP_TEMP, [0x00, 0x00], 0x00)
}

/// Build the command frame that sets the fan to the given speed step.
pub const fn set_fan_speed(step: FanStep) -> CommandFrame {
    CommandFrame::new(
        OPCODE_FAN,
        SUBOP_FAN_SET,
        [FAN_DUTY[step.as_index()], 0x00],
        0x00,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_led_frames_match_device_tables() {
        assert_eq!(
            set_led(LedState::Off).as_bytes(),
            &[0xFA, 0x03, 0x06, 0x00, 0x00, 0x01, 0xFB]
        );
        assert_eq!(
            set_led(LedState::On).as_bytes(),
            &[0xFA, 0x03, 0x06, 0x01, 0x00, 0x01, 0xFB]
        );
        assert_eq!(
            set_led(LedState::Blink).as_bytes(),
            &[0xFA, 0x03, 0x06, 0x02, 0x00, 0x01, 0xFB]
        );
    }

    #[test]
    fn test_temperature_request_frame() {
        assert_eq!(
            read_temperature().as_bytes(),
            &[0xFA, 0x03, 0x08, 0x00, 0x00, 0x00, 0xFB]
        );
    }

    #[test]
    fn test_fan_speed_boundary_frames() {
        assert_eq!(
            set_fan_speed(FanStep::MIN).as_bytes(),
            &[0xFA, 0x02, 0x00, 0x00, 0x00, 0x00, 0xFB]
        );
        assert_eq!(
            set_fan_speed(FanStep::MAX).as_bytes(),
            &[0xFA, 0x02, 0x00, 0xD2, 0x00, 0x00, 0xFB]
        );
    }

    #[test]
    fn test_fan_duty_curve_is_monotonic() {
        for pair in FAN_DUTY.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_same_step_builds_identical_frame() {
        let step = FanStep::new(5).unwrap();
        assert_eq!(set_fan_speed(step), set_fan_speed(step));
        assert_eq!(
            set_fan_speed(step).as_bytes(),
            set_fan_speed(step).as_bytes()
        );
    }
}
