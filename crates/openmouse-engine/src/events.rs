//! Normalized events handed to the collaborator's input sink.

use gaming_mouse_hid_rog_protocol::Key;

/// Opaque identifier for one logical device instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceId(pub u32);

/// Scroll axis for synthesized and wheel-driven scroll events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollAxis {
    Horizontal,
    Vertical,
}

/// One normalized input event.
///
/// Events are transient: the driver produces them and hands them to the sink
/// immediately, it never stores them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Press or release edge of an abstract key.
    KeyEdge { key: Key, pressed: bool },
    /// Relative motion delta.
    Motion { dx: i32, dy: i32 },
    /// High-resolution scroll delta (120 units per detent).
    Scroll { axis: ScrollAxis, delta: i32 },
}
