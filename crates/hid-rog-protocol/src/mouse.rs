//! Mouse-class input report parsing.
//!
//! Three fixed-length shapes carry the same fields at different offsets:
//!
//! | Length | Buttons | X (i16 LE) | Y (i16 LE) | Wheel (i8) | Framing        |
//! |--------|---------|------------|------------|------------|----------------|
//! | 6      | 0       | 1–2        | 3–4        | 5          | wired          |
//! | 8      | 1       | 2–3        | 4–5        | 6          | report-id byte |
//! | 12     | 3       | 4–5        | 6–7        | 8          | RF receiver    |
//!
//! Button mask bits 0..4 map to left, right, middle, forward, back.

use crate::keymap::Key;
use crate::ParseError;
use openmouse_hid_common::ReportReader;

/// Wired report length.
pub const REPORT_LEN_WIRED: usize = 6;

/// Report length with a leading report-id byte.
pub const REPORT_LEN_STANDARD: usize = 8;

/// Report length behind the 2.4 GHz RF receiver framing.
pub const REPORT_LEN_WIRELESS: usize = 12;

/// High-resolution scroll units per wheel detent.
pub const WHEEL_RESOLUTION: i32 = 120;

/// Mask of the button bits carried in a mouse report.
pub const BUTTON_MASK: u8 = 0x1F;

/// Primary mouse buttons, in button-mask bit order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Forward,
    Back,
}

impl MouseButton {
    /// All buttons, ordered by mask bit.
    pub const ALL: [MouseButton; 5] = [
        MouseButton::Left,
        MouseButton::Right,
        MouseButton::Middle,
        MouseButton::Forward,
        MouseButton::Back,
    ];

    /// Bit of this button in the report's button mask.
    pub const fn bit(self) -> u8 {
        match self {
            MouseButton::Left => 1 << 0,
            MouseButton::Right => 1 << 1,
            MouseButton::Middle => 1 << 2,
            MouseButton::Forward => 1 << 3,
            MouseButton::Back => 1 << 4,
        }
    }

    /// Abstract key identifier for this button.
    pub const fn key(self) -> Key {
        match self {
            MouseButton::Left => Key::ButtonLeft,
            MouseButton::Right => Key::ButtonRight,
            MouseButton::Middle => Key::ButtonMiddle,
            MouseButton::Forward => Key::ButtonForward,
            MouseButton::Back => Key::ButtonBack,
        }
    }
}

/// Decoded mouse-class report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseInputReport {
    /// Button mask, bits 0..4 (see [`MouseButton`]).
    pub buttons: u8,
    /// Relative X motion.
    pub dx: i16,
    /// Relative Y motion.
    pub dy: i16,
    /// Wheel detents, positive away from the user.
    pub wheel: i8,
}

impl MouseInputReport {
    /// Parse a raw mouse-class report, selecting the layout by exact length.
    pub fn parse(data: &[u8]) -> Result<Self, ParseError> {
        let (buttons_at, x_at, y_at, wheel_at) = match data.len() {
            REPORT_LEN_WIRED => (0, 1, 3, 5),
            REPORT_LEN_STANDARD => (1, 2, 4, 6),
            REPORT_LEN_WIRELESS => (3, 4, 6, 8),
            got => return Err(ParseError::UnknownLength { got }),
        };

        let reader = ReportReader::new(data);
        let buttons = reader.at(buttons_at).map_err(|_| ParseError::UnknownLength {
            got: data.len(),
        })? & BUTTON_MASK;
        let dx = reader
            .i16_le_at(x_at)
            .map_err(|_| ParseError::UnknownLength { got: data.len() })?;
        let dy = reader
            .i16_le_at(y_at)
            .map_err(|_| ParseError::UnknownLength { got: data.len() })?;
        let wheel = reader
            .i8_at(wheel_at)
            .map_err(|_| ParseError::UnknownLength { got: data.len() })?;

        Ok(Self {
            buttons,
            dx,
            dy,
            wheel,
        })
    }

    /// Whether a button is held in this report.
    pub fn button(&self, button: MouseButton) -> bool {
        self.buttons & button.bit() != 0
    }

    /// Wheel delta scaled to high-resolution scroll units.
    pub fn wheel_hi_res(&self) -> i32 {
        self.wheel as i32 * WHEEL_RESOLUTION
    }
}
