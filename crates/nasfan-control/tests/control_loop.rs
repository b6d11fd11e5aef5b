//! Integration tests for the control loop against the mock transport.
//!
//! These drive whole cycles through the driver and codec, checking the
//! frames that actually reach the wire.

use std::sync::atomic::AtomicBool;
use std::time::Duration;

use nasfan_control::Controller;
use nasfan_core::constants::{OPCODE_FAN, OPCODE_SYSTEM, SUBOP_TEMP};
use nasfan_hardware::{MockHandle, MockTransport};
use nasfan_protocol::ResponseFrame;
use nasfan_protocol::thermal::THERMAL_TABLE;

/// Raw sensor code whose calibrated value is `temp`.
fn code_for(temp: u8) -> u8 {
    THERMAL_TABLE
        .iter()
        .position(|&t| t == temp)
        .expect("temperature not in calibration table") as u8
}

/// Script one temperature sample: the reply and its duplicate/ack.
fn script_sample(handle: &MockHandle, temp: u8) {
    let reply = ResponseFrame::from_parts(OPCODE_SYSTEM, SUBOP_TEMP, [0, 0, code_for(temp)]);
    handle.push_reply(reply);
    handle.push_reply(reply);
}

/// Fan duty bytes written to the wire, in order.
fn fan_duties(handle: &MockHandle) -> Vec<u8> {
    handle
        .written()
        .iter()
        .filter(|frame| frame[1] == OPCODE_FAN)
        .map(|frame| frame[3])
        .collect()
}

#[test]
fn test_reference_temperature_sequence_on_the_wire() {
    let (transport, handle) = MockTransport::new();
    let mut controller = Controller::new(transport);

    for temp in [55, 55, 45, 35] {
        script_sample(&handle, temp);
        controller.cycle();
    }

    // Steps [0, 9, 8, 0] as duty bytes.
    assert_eq!(fan_duties(&handle), vec![0x00, 0xD2, 0xC0, 0x00]);
}

#[test]
fn test_unavailable_reading_commands_nothing_and_holds_state() {
    let (transport, handle) = MockTransport::new();
    let mut controller = Controller::new(transport);

    script_sample(&handle, 55);
    controller.cycle();
    let speed_before = controller.state().speed();
    let prev_before = controller.state().prev_temp();

    // Silent device: both reply reads time out.
    controller.cycle();

    assert_eq!(controller.state().speed(), speed_before);
    assert_eq!(controller.state().prev_temp(), prev_before);
    assert_eq!(fan_duties(&handle).len(), 1);
}

#[test]
fn test_channel_fault_is_absorbed_by_the_cycle() {
    let (transport, handle) = MockTransport::new();
    let mut controller = Controller::new(transport);

    script_sample(&handle, 55);
    controller.cycle();

    handle.fail_writes(true);
    controller.cycle(); // must not panic or propagate
    handle.fail_writes(false);

    // The loop keeps going afterwards as if nothing happened.
    script_sample(&handle, 55);
    controller.cycle();
    assert_eq!(fan_duties(&handle), vec![0x00, 0xD2]);
}

#[test]
fn test_shutdown_flag_stops_the_loop() {
    let (transport, _handle) = MockTransport::new();
    let mut controller =
        Controller::new(transport).with_period(Duration::from_millis(1));

    let shutdown = AtomicBool::new(true);
    controller.run(&shutdown).unwrap();
}

#[test]
fn test_shutdown_sequence_fires_exactly_once_after_mid_loop_fault() {
    let (transport, handle) = MockTransport::new();
    let mut controller = Controller::new(transport);

    // A faulted cycle (silent device), then drop the controller.
    controller.cycle();
    drop(controller);

    let written = handle.written();
    let fan_off = [0xFA, 0x02, 0x00, 0x00, 0x00, 0x00, 0xFB];
    let led_blink = [0xFA, 0x03, 0x06, 0x02, 0x00, 0x01, 0xFB];

    assert_eq!(written.iter().filter(|f| **f == fan_off).count(), 1);
    assert_eq!(written.iter().filter(|f| **f == led_blink).count(), 1);
    // And they are the last two frames, in order.
    assert_eq!(written[written.len() - 2], fan_off);
    assert_eq!(written[written.len() - 1], led_blink);
}

#[test]
fn test_startup_lights_the_led() {
    let (transport, handle) = MockTransport::new();
    let mut controller = Controller::new(transport);

    controller.start().unwrap();

    assert_eq!(
        handle.written(),
        vec![[0xFA, 0x03, 0x06, 0x01, 0x00, 0x01, 0xFB]]
    );
}
