//! Report classification by interface class and byte length.
//!
//! The collaborator tags each raw report with the logical interface class it
//! arrived on (from the HID application usage). Classification then selects
//! the decoding routine from the exact byte length. An unknown class/length
//! pair yields `None` and the report is dropped without an error: firmware
//! revisions are known to emit minor length variants.

use crate::{joystick, mouse};

/// Logical interface class a report arrived on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportClass {
    /// Relative-motion mouse interface.
    Mouse,
    /// Keyboard-like macro/side button interface.
    Keyboard,
    /// Analog joystick interface (Chakram).
    Gamepad,
}

/// Decoding routine selected for a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportLayout {
    /// Sparse active-key-code array starting at `first_code_offset`.
    KeyArray { first_code_offset: usize },
    /// Dense 17-byte key bitmask.
    KeyBitmask,
    /// Mouse buttons/motion/wheel report.
    Mouse,
    /// Joystick deflection report.
    Joystick,
}

/// Sparse keyboard report lengths using the default code-array offset.
pub const KEY_ARRAY_LEN_LEGACY: usize = 6;
pub const KEY_ARRAY_LEN: usize = 9;

/// Sparse keyboard report length whose code array starts one byte earlier.
pub const KEY_ARRAY_LEN_COMPACT: usize = 8;

/// Select the decoder for a report, or `None` to drop it.
pub fn classify(class: ReportClass, len: usize) -> Option<ReportLayout> {
    match (class, len) {
        (ReportClass::Keyboard, KEY_ARRAY_LEN_LEGACY | KEY_ARRAY_LEN) => {
            Some(ReportLayout::KeyArray {
                first_code_offset: 3,
            })
        }
        (ReportClass::Keyboard, KEY_ARRAY_LEN_COMPACT) => Some(ReportLayout::KeyArray {
            first_code_offset: 2,
        }),
        (ReportClass::Keyboard, crate::bitmap::DENSE_REPORT_LEN) => Some(ReportLayout::KeyBitmask),
        (
            ReportClass::Mouse,
            mouse::REPORT_LEN_WIRED | mouse::REPORT_LEN_STANDARD | mouse::REPORT_LEN_WIRELESS,
        ) => Some(ReportLayout::Mouse),
        (
            ReportClass::Gamepad,
            joystick::REPORT_LEN_WIRED | joystick::REPORT_LEN_WIRELESS,
        ) => Some(ReportLayout::Joystick),
        _ => None,
    }
}
