//! Report-to-event engine for ASUS ROG gaming mice.
//!
//! This crate turns raw HID reports, decoded field-wise by
//! `gaming-mouse-hid-rog-protocol`, into a normalized stream of key edges,
//! relative motion, and high-resolution scroll events, and synthesizes
//! continuous scroll from held directional keys and joystick deflection.
//!
//! The engine owns all persistent state (the per-device key bitmap, the
//! mouse button mask, the repeat/joystick state) and is driven entirely by
//! the collaborator through three seams defined in [`traits`]: an
//! [`InputSink`] for normalized events, a monotonic [`Clock`], and a
//! reschedulable [`RepeatTimer`]. It performs no I/O, never blocks, and
//! never surfaces an error from the ingest path: malformed reports are
//! dropped and the driver stays live.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(static_mut_refs)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod differ;
pub mod driver;
pub mod events;
pub mod repeat;
pub mod shared;
pub mod traits;

pub use config::{ConfigError, RepeatConfig};
pub use differ::{apply_key_transitions, KeyDiffOutcome};
pub use driver::MouseDriver;
pub use events::{DeviceId, InputEvent, ScrollAxis};
pub use repeat::{JoystickState, RepeatEngine, ScrollDirection};
pub use shared::SharedMouseDriver;
pub use traits::{Clock, InputSink, MonotonicClock, RepeatTimer};

// Protocol-level types callers need alongside the engine.
pub use gaming_mouse_hid_rog_protocol::{Key, ReportClass};
