//! Collaborator-facing traits: event sink, monotonic clock, repeat timer.
//!
//! The engine performs no I/O and owns no threads. The collaborator injects
//! these three seams at construction time: a sink that turns normalized
//! events into platform input, a monotonic clock, and a single reschedulable
//! timer whose callback drives [`crate::MouseDriver::tick`].

use crate::events::{DeviceId, InputEvent};
use std::time::{Duration, Instant};

/// Destination for normalized events.
///
/// Events must be applied in the order delivered; the driver calls
/// [`InputSink::flush`] exactly once per batch (one report or one timer
/// tick) after the batch's events.
pub trait InputSink: Send {
    fn emit(&mut self, device: DeviceId, event: InputEvent);

    fn flush(&mut self, device: DeviceId);
}

/// Monotonic time source.
pub trait Clock: Send {
    fn now(&self) -> Instant;
}

/// Wall-clock independent system clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Single reschedulable timer supplied by the collaborator.
///
/// `schedule` replaces any pending expiry; after it fires the collaborator
/// invokes [`crate::MouseDriver::tick`] once. `cancel` drops any pending
/// expiry.
pub trait RepeatTimer: Send {
    fn schedule(&mut self, after: Duration);

    fn cancel(&mut self);
}

pub mod mock {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Sink that records every emitted event and flush marker.
    #[derive(Clone, Default)]
    pub struct MockSink {
        events: Arc<Mutex<Vec<(DeviceId, InputEvent)>>>,
        flushes: Arc<Mutex<u32>>,
    }

    impl MockSink {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn events(&self) -> Vec<(DeviceId, InputEvent)> {
            let events = self.events.lock().unwrap_or_else(|e| e.into_inner());
            events.clone()
        }

        pub fn take_events(&self) -> Vec<(DeviceId, InputEvent)> {
            let mut events = self.events.lock().unwrap_or_else(|e| e.into_inner());
            std::mem::take(&mut *events)
        }

        pub fn flush_count(&self) -> u32 {
            *self.flushes.lock().unwrap_or_else(|e| e.into_inner())
        }
    }

    impl InputSink for MockSink {
        fn emit(&mut self, device: DeviceId, event: InputEvent) {
            let mut events = self.events.lock().unwrap_or_else(|e| e.into_inner());
            events.push((device, event));
        }

        fn flush(&mut self, _device: DeviceId) {
            let mut flushes = self.flushes.lock().unwrap_or_else(|e| e.into_inner());
            *flushes += 1;
        }
    }

    /// Manually advanced clock for deterministic timing tests.
    #[derive(Clone)]
    pub struct MockClock {
        base: Instant,
        offset: Arc<Mutex<Duration>>,
    }

    impl MockClock {
        pub fn new() -> Self {
            Self {
                base: Instant::now(),
                offset: Arc::new(Mutex::new(Duration::ZERO)),
            }
        }

        pub fn advance(&self, by: Duration) {
            let mut offset = self.offset.lock().unwrap_or_else(|e| e.into_inner());
            *offset += by;
        }
    }

    impl Default for MockClock {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Clock for MockClock {
        fn now(&self) -> Instant {
            let offset = *self.offset.lock().unwrap_or_else(|e| e.into_inner());
            self.base + offset
        }
    }

    /// Timer that records schedule/cancel calls instead of firing.
    #[derive(Clone, Default)]
    pub struct MockTimer {
        scheduled: Arc<Mutex<Vec<Duration>>>,
        cancels: Arc<Mutex<u32>>,
    }

    impl MockTimer {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn scheduled(&self) -> Vec<Duration> {
            let scheduled = self.scheduled.lock().unwrap_or_else(|e| e.into_inner());
            scheduled.clone()
        }

        pub fn last_scheduled(&self) -> Option<Duration> {
            let scheduled = self.scheduled.lock().unwrap_or_else(|e| e.into_inner());
            scheduled.last().copied()
        }

        pub fn cancel_count(&self) -> u32 {
            *self.cancels.lock().unwrap_or_else(|e| e.into_inner())
        }
    }

    impl RepeatTimer for MockTimer {
        fn schedule(&mut self, after: Duration) {
            let mut scheduled = self.scheduled.lock().unwrap_or_else(|e| e.into_inner());
            scheduled.push(after);
        }

        fn cancel(&mut self) {
            let mut cancels = self.cancels.lock().unwrap_or_else(|e| e.into_inner());
            *cancels += 1;
        }
    }
}
