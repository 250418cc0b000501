//! Native key code to abstract key mapping.
//!
//! Keyboard-class reports carry firmware-native key codes. The table below
//! maps each native code to the abstract [`Key`] the driver exposes;
//! unmapped and out-of-range codes are dropped silently, which is how the
//! hardware's off-spec firmware variants stay harmless.

/// Abstract key identifiers exposed by ROG mice.
///
/// The four `Scroll*` identifiers are never forwarded as key edges: holding
/// them drives the synthesized-scroll repeat engine instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    // Primary mouse buttons (mouse-class reports).
    ButtonLeft,
    ButtonRight,
    ButtonMiddle,
    ButtonForward,
    ButtonBack,

    // Side-panel buttons.
    Side1,
    Side2,
    Side3,
    Side4,
    Side5,
    Side6,

    // DPI / profile cluster.
    DpiUp,
    DpiDown,
    DpiTarget,
    ProfileNext,
    ProfilePrev,

    // Media cluster (keyboard-interface firmware).
    PlayPause,
    VolumeUp,
    VolumeDown,
    Mute,

    // Directional scroll identifiers, consumed by the repeat engine.
    ScrollUp,
    ScrollDown,
    ScrollLeft,
    ScrollRight,

    // Programmable macro bank.
    Macro1,
    Macro2,
    Macro3,
    Macro4,
    Macro5,
    Macro6,
    Macro7,
    Macro8,
}

/// Number of native codes covered by the mapping table.
///
/// Codes at or above this value can still be tracked in the key bitmap but
/// never produce an event.
pub const KEY_MAPPING_SIZE: usize = 96;

static KEY_MAPPING: [Option<Key>; KEY_MAPPING_SIZE] = build_key_mapping();

const fn build_key_mapping() -> [Option<Key>; KEY_MAPPING_SIZE] {
    let mut map = [None; KEY_MAPPING_SIZE];

    // Side panel, codes observed on Spatha and Gladius II.
    map[0x04] = Some(Key::Side1);
    map[0x05] = Some(Key::Side2);
    map[0x06] = Some(Key::Side3);
    map[0x07] = Some(Key::Side4);
    map[0x08] = Some(Key::Side5);
    map[0x09] = Some(Key::Side6);

    // DPI / profile cluster.
    map[0x10] = Some(Key::DpiUp);
    map[0x11] = Some(Key::DpiDown);
    map[0x12] = Some(Key::DpiTarget);
    map[0x13] = Some(Key::ProfileNext);
    map[0x14] = Some(Key::ProfilePrev);

    // Media cluster.
    map[0x20] = Some(Key::PlayPause);
    map[0x21] = Some(Key::VolumeUp);
    map[0x22] = Some(Key::VolumeDown);
    map[0x23] = Some(Key::Mute);

    // Scroll cluster; the Chakram firmware reports wheel tilt here.
    map[0x28] = Some(Key::ScrollUp);
    map[0x29] = Some(Key::ScrollDown);
    map[0x2A] = Some(Key::ScrollLeft);
    map[0x2B] = Some(Key::ScrollRight);

    // Macro bank.
    map[0x40] = Some(Key::Macro1);
    map[0x41] = Some(Key::Macro2);
    map[0x42] = Some(Key::Macro3);
    map[0x43] = Some(Key::Macro4);
    map[0x44] = Some(Key::Macro5);
    map[0x45] = Some(Key::Macro6);
    map[0x46] = Some(Key::Macro7);
    map[0x47] = Some(Key::Macro8);

    map
}

/// Look up the abstract key for a native code.
///
/// Returns `None` for unmapped codes and for codes outside the table; both
/// are silently dropped by the caller.
pub fn map_key(code: u8) -> Option<Key> {
    KEY_MAPPING.get(code as usize).copied().flatten()
}
