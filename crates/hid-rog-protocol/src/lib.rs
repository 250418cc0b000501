//! ASUS ROG gaming mouse USB HID report decoding.
//!
//! ROG mice (Spatha, Gladius II, Pugio, Chakram, Keris, Strix families)
//! expose a composite HID device: a keyboard-like interface for the
//! programmable macro/side buttons, a relative-motion mouse interface, and
//! (on the Chakram) an analog thumb joystick. Firmware revisions differ in
//! report framing, so every decoder here selects its field layout by exact
//! report length and treats unknown lengths as a no-op.
//!
//! # Report classes
//! - **Keyboard**: active-key reports in two physical encodings, a sparse
//!   array of active key codes (6/8/9 bytes) and a dense 17-byte bitmask
//!   (see [`bitmap`]).
//! - **Mouse**: button mask, signed 16-bit X/Y deltas, signed wheel delta in
//!   one of three fixed-length shapes (see [`mouse`]).
//! - **Gamepad**: Chakram joystick deflection in two shapes (see
//!   [`joystick`]).
//!
//! This crate is I/O-free: it never talks to hidraw or registers input
//! devices. Callers hand it raw report bytes tagged with the interface class
//! and consume the decoded values.
//!
//! # Sources
//! - USB captures from Gladius II, Pugio, and Chakram (wired + 2.4 GHz RF)
//! - The out-of-tree `hid-asus-mouse` Linux driver report tables

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(static_mut_refs)]
#![deny(clippy::unwrap_used)]

pub mod bitmap;
pub mod classify;
pub mod joystick;
pub mod keymap;
pub mod mouse;

pub use bitmap::{
    key_bit_position, KeyBitPosition, KeyStateBitmap, DENSE_REPORT_LEN, KEY_STATE_BITS,
    KEY_STATE_CAPACITY, KEY_STATE_WORDS,
};
pub use classify::{classify, ReportClass, ReportLayout};
pub use joystick::{apply_deadzone, JoystickInputReport, JOYSTICK_DEADZONE};
pub use keymap::{map_key, Key, KEY_MAPPING_SIZE};
pub use mouse::{MouseButton, MouseInputReport, WHEEL_RESOLUTION};

/// Errors returned by the fixed-shape report parsers.
///
/// The driver layer treats every variant as "drop the report": firmware
/// variants are known to emit off-spec lengths and the decode path must stay
/// live regardless.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// No known layout for this report class and byte length.
    UnknownLength { got: usize },
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ParseError::UnknownLength { got } => {
                write!(f, "no known report layout for {got}-byte report")
            }
        }
    }
}

impl std::error::Error for ParseError {}
