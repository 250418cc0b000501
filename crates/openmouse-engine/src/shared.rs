//! Shared-driver wrapper serializing the ingest and timer paths.
//!
//! Raw reports arrive on the collaborator's read loop while the repeat
//! timer fires on its own context; both mutate the same key, button, and
//! joystick state. This wrapper puts the whole driver behind one
//! short-held mutex so the two paths can never interleave inside a batch.

use crate::driver::MouseDriver;
use crate::traits::{Clock, InputSink, RepeatTimer};
use gaming_mouse_hid_rog_protocol::ReportClass;
use parking_lot::Mutex;
use std::sync::Arc;

/// Cloneable handle to a mutex-guarded [`MouseDriver`].
pub struct SharedMouseDriver<S, C, T> {
    inner: Arc<Mutex<MouseDriver<S, C, T>>>,
}

impl<S, C, T> Clone for SharedMouseDriver<S, C, T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S, C, T> SharedMouseDriver<S, C, T>
where
    S: InputSink,
    C: Clock,
    T: RepeatTimer,
{
    pub fn new(driver: MouseDriver<S, C, T>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(driver)),
        }
    }

    /// Ingest-path entry point.
    pub fn handle_report(&self, class: ReportClass, data: &[u8]) {
        self.inner.lock().handle_report(class, data);
    }

    /// Timer-path entry point.
    pub fn tick(&self) {
        self.inner.lock().tick();
    }

    /// Run a closure under the driver lock, for inspection and tests.
    pub fn with_driver<R>(&self, f: impl FnOnce(&mut MouseDriver<S, C, T>) -> R) -> R {
        f(&mut self.inner.lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RepeatConfig;
    use crate::events::DeviceId;
    use crate::traits::mock::{MockClock, MockSink, MockTimer};

    #[test]
    fn both_paths_share_one_driver() {
        let sink = MockSink::new();
        let driver = MouseDriver::new(
            DeviceId(1),
            RepeatConfig::default(),
            sink.clone(),
            MockClock::new(),
            MockTimer::new(),
        )
        .expect("default config is valid");
        let shared = SharedMouseDriver::new(driver);
        let timer_handle = shared.clone();

        let mut press = [0u8; 9];
        press[3] = 0x28; // ScrollUp
        shared.handle_report(ReportClass::Keyboard, &press);
        timer_handle.tick();

        // Immediate tick plus the explicit timer tick.
        let scrolls = sink
            .events()
            .into_iter()
            .filter(|(_, event)| matches!(event, crate::events::InputEvent::Scroll { .. }))
            .count();
        assert_eq!(scrolls, 2);

        shared.with_driver(|driver| {
            assert!(driver.repeat().is_active());
        });
    }
}
