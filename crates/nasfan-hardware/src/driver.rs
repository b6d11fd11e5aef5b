//! Typed device operations built on the frame codec.
//!
//! Each operation writes exactly one command frame and consumes the reply
//! pattern the device is known to produce. Replies are acknowledgements;
//! except for the temperature read, their content is discarded.
//!
//! There is no RPM read here. The device has a fan-status subopcode on the
//! wire, but its readout format is unknown and the historical read routine
//! never produced a usable value, so the operation is deliberately not
//! part of the driver contract.

use std::time::Duration;

use tracing::{debug, trace};

use nasfan_core::constants::{OPCODE_SYSTEM, READ_TIMEOUT_SECS, SUBOP_TEMP, TEMP_CODE_INDEX};
use nasfan_core::{Celsius, FanStep, LedState};
use nasfan_protocol::{commands, thermal};

use crate::error::Result;
use crate::transport::FrameTransport;

/// Deadline for each reply frame.
const REPLY_TIMEOUT: Duration = Duration::from_secs(READ_TIMEOUT_SECS);

/// Put the power LED into the given state.
///
/// Consumes and discards one acknowledgement frame; a silent device is
/// tolerated.
///
/// # Errors
///
/// Returns an error only on a channel fault.
pub fn set_power_led<T: FrameTransport>(transport: &mut T, state: LedState) -> Result<LedState> {
    transport.write_frame(&commands::set_led(state))?;
    let _ = transport.read_frame(REPLY_TIMEOUT)?;
    debug!(%state, "power LED set");
    Ok(state)
}

/// Read the chassis temperature.
///
/// The device answers a temperature request with two frames in sequence (a
/// reply and a duplicate/ack); both are consumed. The first must carry the
/// temperature class (opcode 3, subopcode 8) and the raw sensor code in
/// byte 5, which is then resolved through the calibration table.
///
/// Returns `Ok(None)`, meaning the reading is unavailable this cycle,
/// when either reply is missing, the first is of the wrong class, or the
/// code falls outside the calibration table. None of these are channel
/// faults.
///
/// # Errors
///
/// Returns an error only on a channel fault.
pub fn read_temperature<T: FrameTransport>(transport: &mut T) -> Result<Option<Celsius>> {
    transport.write_frame(&commands::read_temperature())?;

    let first = transport.read_frame(REPLY_TIMEOUT)?;
    let second = transport.read_frame(REPLY_TIMEOUT)?;

    let Some(reply) = first else {
        trace!("temperature reply missing");
        return Ok(None);
    };
    if second.is_none() {
        trace!("temperature duplicate/ack missing");
        return Ok(None);
    }
    if !reply.is_reply_to(OPCODE_SYSTEM, SUBOP_TEMP) {
        trace!(
            opcode = reply.opcode(),
            subopcode = reply.subopcode(),
            "temperature reply has wrong class"
        );
        return Ok(None);
    }

    let code = reply.as_bytes()[TEMP_CODE_INDEX];
    let temp = thermal::temperature_for(code);
    if temp.is_none() {
        trace!(code, "sensor code outside calibration table");
    }
    Ok(temp)
}

/// Set the fan to the given speed step.
///
/// Consumes and discards one acknowledgement frame. The same step always
/// puts identical bytes on the wire.
///
/// # Errors
///
/// Returns an error only on a channel fault.
pub fn set_fan_speed<T: FrameTransport>(transport: &mut T, step: FanStep) -> Result<FanStep> {
    transport.write_frame(&commands::set_fan_speed(step))?;
    let _ = transport.read_frame(REPLY_TIMEOUT)?;
    debug!(%step, "fan speed set");
    Ok(step)
}
