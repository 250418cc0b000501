//! Chakram thumb-joystick report parsing.
//!
//! Two fixed-length shapes carry the deflection axes as unsigned bytes:
//!
//! | Length | X | Y | Framing     |
//! |--------|---|---|-------------|
//! | 6      | 4 | 5 | wired       |
//! | 9      | 7 | 8 | RF receiver |
//!
//! Axes are re-centered (`raw - 128`) and a symmetric deadzone clamps small
//! deflections to exactly zero so a worn stick cannot scroll on its own.

use crate::ParseError;
use openmouse_hid_common::ReportReader;

/// Wired report length.
pub const REPORT_LEN_WIRED: usize = 6;

/// Report length behind the 2.4 GHz RF receiver framing.
pub const REPORT_LEN_WIRELESS: usize = 9;

/// Deflections with magnitude strictly below this clamp to zero.
pub const JOYSTICK_DEADZONE: i16 = 10;

/// Clamp a re-centered axis value into the deadzone.
///
/// `|value| < JOYSTICK_DEADZONE` becomes exactly 0; values at or beyond the
/// threshold pass through unchanged.
pub fn apply_deadzone(value: i16) -> i16 {
    if value.abs() < JOYSTICK_DEADZONE {
        0
    } else {
        value
    }
}

/// Decoded joystick deflection, deadzone already applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JoystickInputReport {
    /// Signed X deflection, positive right, in [-128, 127].
    pub x: i16,
    /// Signed Y deflection, positive towards the user, in [-128, 127].
    pub y: i16,
}

impl JoystickInputReport {
    /// Parse a raw gamepad-class report, selecting the layout by exact length.
    pub fn parse(data: &[u8]) -> Result<Self, ParseError> {
        let x_at = match data.len() {
            REPORT_LEN_WIRED => 4,
            REPORT_LEN_WIRELESS => 7,
            got => return Err(ParseError::UnknownLength { got }),
        };

        let reader = ReportReader::new(data);
        let x = reader
            .at(x_at)
            .map_err(|_| ParseError::UnknownLength { got: data.len() })?;
        let y = reader
            .at(x_at + 1)
            .map_err(|_| ParseError::UnknownLength { got: data.len() })?;

        Ok(Self {
            x: apply_deadzone(recenter(x)),
            y: apply_deadzone(recenter(y)),
        })
    }

    /// True when both axes rest at zero after the deadzone.
    pub fn is_centered(&self) -> bool {
        self.x == 0 && self.y == 0
    }
}

/// Convert a raw unsigned axis byte to a signed deflection.
fn recenter(raw: u8) -> i16 {
    raw as i16 - 128
}
