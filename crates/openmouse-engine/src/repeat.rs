//! Timer-driven scroll synthesis from held directional keys and joystick
//! deflection.
//!
//! The engine is a rate-emulation state machine with two states, idle and
//! running. Arming it (directional key press, or the joystick leaving
//! center) triggers one immediate tick; every tick emits the current scroll
//! deltas and decides whether the collaborator's timer should fire again.
//! One [`RepeatEngine::tick`] serves both triggers, so the edge-triggered
//! and periodic paths cannot drift apart.

use crate::config::RepeatConfig;
use crate::events::{DeviceId, InputEvent, ScrollAxis};
use crate::traits::InputSink;
use gaming_mouse_hid_rog_protocol::Key;
use std::time::{Duration, Instant};
use tracing::debug;

/// Direction of a held directional scroll key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
    Left,
    Right,
}

impl ScrollDirection {
    /// The directional scroll identifier for this key, if it is one.
    pub fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::ScrollUp => Some(ScrollDirection::Up),
            Key::ScrollDown => Some(ScrollDirection::Down),
            Key::ScrollLeft => Some(ScrollDirection::Left),
            Key::ScrollRight => Some(ScrollDirection::Right),
            _ => None,
        }
    }

    fn axis(self) -> ScrollAxis {
        match self {
            ScrollDirection::Up | ScrollDirection::Down => ScrollAxis::Vertical,
            ScrollDirection::Left | ScrollDirection::Right => ScrollAxis::Horizontal,
        }
    }

    fn sign(self) -> i32 {
        match self {
            ScrollDirection::Up | ScrollDirection::Right => 1,
            ScrollDirection::Down | ScrollDirection::Left => -1,
        }
    }
}

/// Held directional key, if any, and when it was pressed.
#[derive(Debug, Clone, Copy, Default)]
struct RepeatState {
    direction: Option<ScrollDirection>,
    activated_at: Option<Instant>,
}

/// Joystick deflection as of the last gamepad-class report, deadzone
/// already applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JoystickState {
    pub x: i16,
    pub y: i16,
}

/// Synthesized-scroll engine. See the module docs.
#[derive(Debug)]
pub struct RepeatEngine {
    config: RepeatConfig,
    state: RepeatState,
    joystick: JoystickState,
}

impl RepeatEngine {
    pub fn new(config: RepeatConfig) -> Self {
        Self {
            config,
            state: RepeatState::default(),
            joystick: JoystickState::default(),
        }
    }

    pub fn config(&self) -> &RepeatConfig {
        &self.config
    }

    /// Arm for a direction. Overwrites any previously held direction and
    /// restarts the acceleration ramp.
    pub fn arm(&mut self, direction: ScrollDirection, now: Instant) {
        debug!(?direction, "repeat engine armed");
        self.state.direction = Some(direction);
        self.state.activated_at = Some(now);
    }

    /// Disarm, but only when the released direction is the one currently
    /// held; releasing a stale direction after an overwrite is a no-op.
    pub fn disarm(&mut self, direction: ScrollDirection) {
        if self.state.direction == Some(direction) {
            debug!(?direction, "repeat engine disarmed");
            self.state.direction = None;
            self.state.activated_at = None;
        }
    }

    /// Record new joystick deflection.
    ///
    /// Returns true on the idle-to-active edge (both stored axes were zero
    /// and at least one new axis is not): the caller must run one immediate
    /// tick so scrolling starts without waiting for the timer.
    pub fn set_joystick(&mut self, x: i16, y: i16) -> bool {
        let was_centered = self.joystick == JoystickState::default();
        self.joystick = JoystickState { x, y };
        was_centered && !(x == 0 && y == 0)
    }

    pub fn joystick(&self) -> JoystickState {
        self.joystick
    }

    /// Direction currently held, if any.
    pub fn direction(&self) -> Option<ScrollDirection> {
        self.state.direction
    }

    /// Whether any scroll source is active.
    pub fn is_active(&self) -> bool {
        self.state.direction.is_some() || self.joystick.x != 0 || self.joystick.y != 0
    }

    /// One synthesis tick: emit the current scroll deltas and report when
    /// the next tick is due, or `None` when the engine goes idle.
    ///
    /// Callable both from the timer expiry and directly on an activation
    /// edge.
    pub fn tick(
        &mut self,
        now: Instant,
        device: DeviceId,
        sink: &mut impl InputSink,
    ) -> Option<Duration> {
        let mut emitted = false;

        if let (Some(direction), Some(activated_at)) =
            (self.state.direction, self.state.activated_at)
        {
            let elapsed_ms = now.saturating_duration_since(activated_at).as_millis() as u64;
            let step = self.config.step_for_elapsed(elapsed_ms);
            sink.emit(
                device,
                InputEvent::Scroll {
                    axis: direction.axis(),
                    delta: direction.sign() * step,
                },
            );
            emitted = true;
        }

        if self.joystick.x != 0 {
            sink.emit(
                device,
                InputEvent::Scroll {
                    axis: ScrollAxis::Horizontal,
                    delta: self.joystick.x as i32 / self.config.joystick_divisor,
                },
            );
            emitted = true;
        }
        if self.joystick.y != 0 {
            sink.emit(
                device,
                InputEvent::Scroll {
                    axis: ScrollAxis::Vertical,
                    delta: -(self.joystick.y as i32) / self.config.joystick_divisor,
                },
            );
            emitted = true;
        }

        if emitted {
            sink.flush(device);
        }

        if self.config.period_ms != 0 && self.is_active() {
            Some(Duration::from_millis(self.config.period_ms))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_MAX_STEP, DEFAULT_MIN_STEP, DEFAULT_RAMP_MS};
    use crate::traits::mock::{MockClock, MockSink};
    use crate::traits::Clock;

    const DEVICE: DeviceId = DeviceId(7);

    fn scroll_events(sink: &MockSink) -> Vec<(ScrollAxis, i32)> {
        sink.events()
            .into_iter()
            .filter_map(|(_, event)| match event {
                InputEvent::Scroll { axis, delta } => Some((axis, delta)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn idle_tick_emits_nothing_and_does_not_reschedule() {
        let mut engine = RepeatEngine::new(RepeatConfig::default());
        let mut sink = MockSink::new();
        let clock = MockClock::new();

        let next = engine.tick(clock.now(), DEVICE, &mut sink);

        assert_eq!(next, None);
        assert!(sink.events().is_empty());
        assert_eq!(sink.flush_count(), 0);
    }

    #[test]
    fn armed_tick_emits_minimum_step_immediately() {
        let mut engine = RepeatEngine::new(RepeatConfig::default());
        let mut sink = MockSink::new();
        let clock = MockClock::new();

        engine.arm(ScrollDirection::Up, clock.now());
        let next = engine.tick(clock.now(), DEVICE, &mut sink);

        assert_eq!(next, Some(Duration::from_millis(16)));
        assert_eq!(
            scroll_events(&sink),
            vec![(ScrollAxis::Vertical, DEFAULT_MIN_STEP)]
        );
        assert_eq!(sink.flush_count(), 1);
    }

    #[test]
    fn fully_ramped_tick_emits_maximum_step() {
        let mut engine = RepeatEngine::new(RepeatConfig::default());
        let mut sink = MockSink::new();
        let clock = MockClock::new();

        engine.arm(ScrollDirection::Down, clock.now());
        clock.advance(Duration::from_millis(DEFAULT_RAMP_MS));
        engine.tick(clock.now(), DEVICE, &mut sink);

        assert_eq!(
            scroll_events(&sink),
            vec![(ScrollAxis::Vertical, -DEFAULT_MAX_STEP)]
        );
    }

    #[test]
    fn horizontal_directions_use_horizontal_axis() {
        let mut engine = RepeatEngine::new(RepeatConfig::default());
        let mut sink = MockSink::new();
        let clock = MockClock::new();

        engine.arm(ScrollDirection::Left, clock.now());
        engine.tick(clock.now(), DEVICE, &mut sink);
        engine.disarm(ScrollDirection::Left);
        engine.arm(ScrollDirection::Right, clock.now());
        engine.tick(clock.now(), DEVICE, &mut sink);

        assert_eq!(
            scroll_events(&sink),
            vec![
                (ScrollAxis::Horizontal, -DEFAULT_MIN_STEP),
                (ScrollAxis::Horizontal, DEFAULT_MIN_STEP),
            ]
        );
    }

    #[test]
    fn disarm_ignores_stale_direction() {
        let mut engine = RepeatEngine::new(RepeatConfig::default());
        let clock = MockClock::new();

        engine.arm(ScrollDirection::Up, clock.now());
        engine.arm(ScrollDirection::Down, clock.now());
        engine.disarm(ScrollDirection::Up);

        assert_eq!(engine.direction(), Some(ScrollDirection::Down));

        engine.disarm(ScrollDirection::Down);
        assert_eq!(engine.direction(), None);
    }

    #[test]
    fn joystick_contributes_additively_with_key() {
        let mut engine = RepeatEngine::new(RepeatConfig::default());
        let mut sink = MockSink::new();
        let clock = MockClock::new();

        engine.arm(ScrollDirection::Up, clock.now());
        engine.set_joystick(40, -20);
        engine.tick(clock.now(), DEVICE, &mut sink);

        assert_eq!(
            scroll_events(&sink),
            vec![
                (ScrollAxis::Vertical, DEFAULT_MIN_STEP),
                (ScrollAxis::Horizontal, 10),
                (ScrollAxis::Vertical, 5),
            ]
        );
        // All three deltas belong to one batch.
        assert_eq!(sink.flush_count(), 1);
    }

    #[test]
    fn joystick_edge_detection() {
        let mut engine = RepeatEngine::new(RepeatConfig::default());

        assert!(engine.set_joystick(12, 0));
        // Already active: movement is not a new edge.
        assert!(!engine.set_joystick(30, 10));
        // Return to center, then deflect again.
        assert!(!engine.set_joystick(0, 0));
        assert!(engine.set_joystick(0, -15));
    }

    #[test]
    fn engine_goes_idle_when_sources_clear() {
        let mut engine = RepeatEngine::new(RepeatConfig::default());
        let mut sink = MockSink::new();
        let clock = MockClock::new();

        engine.arm(ScrollDirection::Up, clock.now());
        assert!(engine.tick(clock.now(), DEVICE, &mut sink).is_some());

        engine.disarm(ScrollDirection::Up);
        assert_eq!(engine.tick(clock.now(), DEVICE, &mut sink), None);
    }

    #[test]
    fn zero_period_never_reschedules() {
        let mut engine = RepeatEngine::new(RepeatConfig {
            period_ms: 0,
            ..Default::default()
        });
        let mut sink = MockSink::new();
        let clock = MockClock::new();

        engine.arm(ScrollDirection::Up, clock.now());
        let next = engine.tick(clock.now(), DEVICE, &mut sink);

        // The immediate tick still emits, but the engine stays unscheduled.
        assert_eq!(next, None);
        assert_eq!(scroll_events(&sink).len(), 1);
    }

    #[test]
    fn from_key_covers_exactly_the_directional_identifiers() {
        assert_eq!(
            ScrollDirection::from_key(Key::ScrollUp),
            Some(ScrollDirection::Up)
        );
        assert_eq!(
            ScrollDirection::from_key(Key::ScrollDown),
            Some(ScrollDirection::Down)
        );
        assert_eq!(
            ScrollDirection::from_key(Key::ScrollLeft),
            Some(ScrollDirection::Left)
        );
        assert_eq!(
            ScrollDirection::from_key(Key::ScrollRight),
            Some(ScrollDirection::Right)
        );
        assert_eq!(ScrollDirection::from_key(Key::Side1), None);
        assert_eq!(ScrollDirection::from_key(Key::ButtonLeft), None);
    }
}
