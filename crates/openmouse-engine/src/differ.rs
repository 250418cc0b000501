//! Key-state diffing between consecutive keyboard-class reports.
//!
//! Keyboard-class reports carry absolute held-key state, so edges come from
//! comparing each fresh bitmap against the stored one. Transitions of the
//! four directional scroll identifiers arm or disarm the repeat engine
//! instead of producing key edges.

use crate::events::{DeviceId, InputEvent};
use crate::repeat::{RepeatEngine, ScrollDirection};
use crate::traits::InputSink;
use gaming_mouse_hid_rog_protocol::{map_key, KeyStateBitmap};
use std::time::Instant;
use tracing::trace;

/// What a key diff did, beyond the events already emitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyDiffOutcome {
    /// A directional scroll identifier was pressed; the caller must run one
    /// immediate repeat tick.
    pub directional_pressed: bool,
}

/// Emit edges for every mapped code whose state changed between `previous`
/// and `current`.
///
/// Transitions are visited in ascending native-code order; each plain edge
/// is emitted and flushed individually. Unmapped codes update no state and
/// produce no event.
pub fn apply_key_transitions(
    previous: &KeyStateBitmap,
    current: &KeyStateBitmap,
    repeat: &mut RepeatEngine,
    now: Instant,
    device: DeviceId,
    sink: &mut impl InputSink,
) -> KeyDiffOutcome {
    let mut outcome = KeyDiffOutcome::default();

    for (code, pressed) in previous.transitions(current) {
        let Some(key) = map_key(code) else {
            trace!(code, "dropping unmapped key code");
            continue;
        };

        match ScrollDirection::from_key(key) {
            Some(direction) => {
                if pressed {
                    repeat.arm(direction, now);
                    outcome.directional_pressed = true;
                } else {
                    repeat.disarm(direction);
                }
            }
            None => {
                sink.emit(device, InputEvent::KeyEdge { key, pressed });
                sink.flush(device);
            }
        }
    }

    outcome
}
