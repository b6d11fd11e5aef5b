//! Thermal calibration table.
//!
//! The enclosure sensor reports a raw code, not a temperature; the
//! microcontroller firmware's NTC linearisation table maps codes 0..=200
//! to whole degrees Celsius. Higher codes mean lower temperatures. The
//! table is copied from the device firmware verbatim, including its known
//! irregularities such as the jump at code 133; correcting them would
//! diverge from what the hardware actually reports.

use nasfan_core::Celsius;
use nasfan_core::constants::THERMAL_TABLE_LEN;

/// Calibrated temperature for each raw sensor code.
#[rustfmt::skip]
pub const THERMAL_TABLE: [Celsius; THERMAL_TABLE_LEN] = [
    0x74, 0x73, 0x72, 0x71, 0x70, 0x6F, 0x6E, 0x6D, 0x6C, 0x6B,
    0x6A, 0x69, 0x68, 0x67, 0x66, 0x65, 0x64, 0x63, 0x62, 0x61,
    0x60, 0x5F, 0x5E, 0x5D, 0x5C, 0x5B, 0x5A, 0x59, 0x58, 0x57,
    0x56, 0x55, 0x54, 0x53, 0x52, 0x51, 0x50, 0x4F, 0x4E, 0x4D,
    0x4C, 0x4B, 0x4A, 0x49, 0x48, 0x47, 0x46, 0x45, 0x44, 0x43,
    0x42, 0x41, 0x41, 0x40, 0x3F, 0x3E, 0x3E, 0x3D, 0x3D, 0x3C,
    0x3B, 0x3A, 0x3A, 0x39, 0x38, 0x38, 0x37, 0x36, 0x36, 0x35,
    0x34, 0x34, 0x33, 0x33, 0x32, 0x31, 0x31, 0x30, 0x30, 0x2F,
    0x2F, 0x2E, 0x2E, 0x2D, 0x2C, 0x2C, 0x2B, 0x2B, 0x2A, 0x2A,
    0x29, 0x29, 0x28, 0x28, 0x27, 0x27, 0x27, 0x26, 0x26, 0x25,
    0x25, 0x24, 0x24, 0x23, 0x23, 0x22, 0x22, 0x21, 0x21, 0x21,
    0x20, 0x20, 0x1F, 0x1F, 0x1E, 0x1E, 0x1E, 0x1D, 0x1D, 0x1C,
    0x1C, 0x1B, 0x1B, 0x1B, 0x1B, 0x1A, 0x19, 0x19, 0x19, 0x18,
    0x18, 0x17, 0x17, 0x25, 0x1B, 0x1B, 0x19, 0x19, 0x19, 0x18,
    0x18, 0x17, 0x17, 0x16, 0x16, 0x16, 0x15, 0x15, 0x14, 0x14,
    0x14, 0x13, 0x13, 0x12, 0x12, 0x12, 0x11, 0x11, 0x10, 0x10,
    0x10, 0x0F, 0x0F, 0x0E, 0x0E, 0x0E, 0x0D, 0x0D, 0x0C, 0x0C,
    0x0C, 0x0B, 0x0B, 0x0A, 0x0A, 0x09, 0x09, 0x09, 0x08, 0x08,
    0x07, 0x07, 0x07, 0x06, 0x06, 0x05, 0x05, 0x04, 0x04, 0x04,
    0x03, 0x03, 0x02, 0x02, 0x01, 0x01, 0x00, 0x00, 0x00, 0x00,
    0x00,
];

/// Look up the calibrated temperature for a raw sensor code.
///
/// Returns `None` for codes beyond the table: an invalid reading, not a
/// temperature.
///
/// # Examples
///
/// ```
/// use nasfan_protocol::thermal::temperature_for;
///
/// assert_eq!(temperature_for(0), Some(116));
/// assert_eq!(temperature_for(201), None);
/// ```
pub fn temperature_for(code: u8) -> Option<Celsius> {
    THERMAL_TABLE.get(code as usize).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_valid_code_resolves() {
        for code in 0..THERMAL_TABLE_LEN as u8 {
            assert_eq!(temperature_for(code), Some(THERMAL_TABLE[code as usize]));
        }
    }

    #[test]
    fn test_codes_beyond_table_are_invalid() {
        for code in THERMAL_TABLE_LEN as u8..=u8::MAX {
            assert_eq!(temperature_for(code), None);
        }
    }

    #[test]
    fn test_known_calibration_points() {
        // Hottest and coldest ends of the sensor range.
        assert_eq!(temperature_for(0), Some(0x74));
        assert_eq!(temperature_for(200), Some(0x00));
        // Around the control band: 55C, 45C, 35C.
        assert_eq!(temperature_for(66), Some(55));
        assert_eq!(temperature_for(83), Some(45));
        assert_eq!(temperature_for(103), Some(35));
    }

    #[test]
    fn test_firmware_irregularity_is_preserved() {
        // The firmware table jumps back up at code 133; keep it that way.
        assert_eq!(temperature_for(132), Some(0x17));
        assert_eq!(temperature_for(133), Some(0x25));
        assert_eq!(temperature_for(134), Some(0x1B));
    }
}
