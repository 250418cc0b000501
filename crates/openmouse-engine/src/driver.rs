//! Per-device driver: ingest raw reports, emit normalized events, drive the
//! repeat engine through the collaborator's timer.

use crate::config::{ConfigError, RepeatConfig};
use crate::differ;
use crate::events::{DeviceId, InputEvent, ScrollAxis};
use crate::repeat::RepeatEngine;
use crate::traits::{Clock, InputSink, RepeatTimer};
use gaming_mouse_hid_rog_protocol::{
    classify, JoystickInputReport, KeyStateBitmap, MouseButton, MouseInputReport, ReportClass,
    ReportLayout,
};
use tracing::trace;

/// Driver for one logical ROG mouse.
///
/// `handle_report` is the ingest path, called once per raw report;
/// [`MouseDriver::tick`] is the timer path, called by the collaborator when
/// the scheduled repeat timer fires. Neither fails: malformed or unknown
/// input is dropped and the driver stays live. When both paths run on
/// different threads, wrap the driver in
/// [`crate::shared::SharedMouseDriver`] so they serialize on one lock.
pub struct MouseDriver<S, C, T> {
    device: DeviceId,
    sink: S,
    clock: C,
    timer: T,
    key_state: KeyStateBitmap,
    button_state: u8,
    repeat: RepeatEngine,
}

impl<S, C, T> MouseDriver<S, C, T>
where
    S: InputSink,
    C: Clock,
    T: RepeatTimer,
{
    /// Create a driver with zeroed key/button/joystick state.
    pub fn new(
        device: DeviceId,
        config: RepeatConfig,
        sink: S,
        clock: C,
        timer: T,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            device,
            sink,
            clock,
            timer,
            key_state: KeyStateBitmap::empty(),
            button_state: 0,
            repeat: RepeatEngine::new(config),
        })
    }

    /// Ingest one raw report. Unrecognized class/length pairs and truncated
    /// reports are dropped silently.
    pub fn handle_report(&mut self, class: ReportClass, data: &[u8]) {
        let Some(layout) = classify(class, data.len()) else {
            trace!(?class, len = data.len(), "dropping unclassified report");
            return;
        };

        match layout {
            ReportLayout::KeyArray { first_code_offset } => {
                self.apply_key_bitmap(KeyStateBitmap::decode_sparse(data, first_code_offset));
            }
            ReportLayout::KeyBitmask => {
                self.apply_key_bitmap(KeyStateBitmap::decode_dense(data));
            }
            ReportLayout::Mouse => match MouseInputReport::parse(data) {
                Ok(report) => self.apply_mouse(report),
                Err(err) => trace!(%err, "dropping mouse report"),
            },
            ReportLayout::Joystick => match JoystickInputReport::parse(data) {
                Ok(report) => self.apply_joystick(report),
                Err(err) => trace!(%err, "dropping joystick report"),
            },
        }
    }

    /// Timer-path entry point: run one repeat tick and reschedule or cancel
    /// the collaborator's timer accordingly.
    pub fn tick(&mut self) {
        self.run_tick();
    }

    fn apply_key_bitmap(&mut self, fresh: KeyStateBitmap) {
        let now = self.clock.now();
        let outcome = differ::apply_key_transitions(
            &self.key_state,
            &fresh,
            &mut self.repeat,
            now,
            self.device,
            &mut self.sink,
        );

        // History is replaced even when no transition produced an event, so
        // unmapped codes cannot re-fire on the next report.
        self.key_state = fresh;

        if outcome.directional_pressed {
            self.run_tick();
        }
    }

    fn apply_mouse(&mut self, report: MouseInputReport) {
        let changed = self.button_state ^ report.buttons;
        for button in MouseButton::ALL {
            if changed & button.bit() != 0 {
                self.sink.emit(
                    self.device,
                    InputEvent::KeyEdge {
                        key: button.key(),
                        pressed: report.button(button),
                    },
                );
            }
        }
        self.button_state = report.buttons;

        self.sink.emit(
            self.device,
            InputEvent::Motion {
                dx: report.dx as i32,
                dy: report.dy as i32,
            },
        );

        if report.wheel != 0 {
            self.sink.emit(
                self.device,
                InputEvent::Scroll {
                    axis: ScrollAxis::Vertical,
                    delta: report.wheel_hi_res(),
                },
            );
        }

        self.sink.flush(self.device);
    }

    fn apply_joystick(&mut self, report: JoystickInputReport) {
        if self.repeat.set_joystick(report.x, report.y) {
            self.run_tick();
        }
    }

    fn run_tick(&mut self) {
        let now = self.clock.now();
        match self.repeat.tick(now, self.device, &mut self.sink) {
            Some(period) => self.timer.schedule(period),
            None => self.timer.cancel(),
        }
    }

    pub fn device(&self) -> DeviceId {
        self.device
    }

    /// Stored key bitmap (previous keyboard-class report).
    pub fn key_state(&self) -> &KeyStateBitmap {
        &self.key_state
    }

    /// Stored mouse button mask (previous mouse-class report).
    pub fn button_state(&self) -> u8 {
        self.button_state
    }

    pub fn repeat(&self) -> &RepeatEngine {
        &self.repeat
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
