//! Repeat-engine configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default tick period, matching the device's input repeat period.
pub const DEFAULT_PERIOD_MS: u64 = 16;

/// Default acceleration ramp window.
pub const DEFAULT_RAMP_MS: u64 = 2000;

/// Scroll step at the instant a directional key is pressed (hi-res units).
pub const DEFAULT_MIN_STEP: i32 = 8;

/// Scroll step once the ramp window has fully elapsed (hi-res units).
pub const DEFAULT_MAX_STEP: i32 = 120;

/// Divisor applied to joystick deflection per tick.
pub const DEFAULT_JOYSTICK_DIVISOR: i32 = 4;

/// Tuning for the synthesized-scroll repeat engine.
///
/// `period_ms = 0` disables rescheduling entirely: an armed engine emits at
/// most the immediate edge-triggered tick and then stays idle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RepeatConfig {
    /// Tick period in milliseconds; 0 disables periodic ticks.
    pub period_ms: u64,
    /// Time to ramp from `min_step` to `max_step`, in milliseconds.
    pub ramp_ms: u64,
    /// Scroll magnitude at zero elapsed hold time.
    pub min_step: i32,
    /// Scroll magnitude at or beyond the full ramp window.
    pub max_step: i32,
    /// Joystick deflection divisor per tick.
    pub joystick_divisor: i32,
}

impl Default for RepeatConfig {
    fn default() -> Self {
        Self {
            period_ms: DEFAULT_PERIOD_MS,
            ramp_ms: DEFAULT_RAMP_MS,
            min_step: DEFAULT_MIN_STEP,
            max_step: DEFAULT_MAX_STEP,
            joystick_divisor: DEFAULT_JOYSTICK_DIVISOR,
        }
    }
}

/// Errors from [`RepeatConfig::validate`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("ramp_ms must be nonzero")]
    ZeroRamp,

    #[error("invalid step range: min {min} .. max {max}")]
    InvalidStepRange { min: i32, max: i32 },

    #[error("joystick_divisor must be positive, got {0}")]
    InvalidJoystickDivisor(i32),
}

impl RepeatConfig {
    /// Validate the configuration before handing it to a driver.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ramp_ms == 0 {
            return Err(ConfigError::ZeroRamp);
        }
        if self.min_step <= 0 || self.max_step < self.min_step {
            return Err(ConfigError::InvalidStepRange {
                min: self.min_step,
                max: self.max_step,
            });
        }
        if self.joystick_divisor <= 0 {
            return Err(ConfigError::InvalidJoystickDivisor(self.joystick_divisor));
        }
        Ok(())
    }

    /// Eased scroll magnitude for a directional key held for `elapsed_ms`.
    ///
    /// Linear in elapsed time, clamped to the ramp window: exactly
    /// `min_step` at 0 elapsed and exactly `max_step` at or beyond
    /// `ramp_ms`.
    pub fn step_for_elapsed(&self, elapsed_ms: u64) -> i32 {
        let clamped = elapsed_ms.min(self.ramp_ms);
        let span = (self.max_step - self.min_step) as i64;
        self.min_step + (span * clamped as i64 / self.ramp_ms as i64) as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = RepeatConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.period_ms, 16);
    }

    #[test]
    fn zero_period_is_valid() {
        // Disabling periodic ticks is a supported configuration.
        let config = RepeatConfig {
            period_ms: 0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_zero_ramp() {
        let config = RepeatConfig {
            ramp_ms: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroRamp));
    }

    #[test]
    fn rejects_inverted_step_range() {
        let config = RepeatConfig {
            min_step: 100,
            max_step: 10,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidStepRange { .. })
        ));
    }

    #[test]
    fn rejects_nonpositive_divisor() {
        let config = RepeatConfig {
            joystick_divisor: 0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidJoystickDivisor(0))
        );
    }

    #[test]
    fn easing_boundaries() {
        let config = RepeatConfig::default();

        assert_eq!(config.step_for_elapsed(0), DEFAULT_MIN_STEP);
        assert_eq!(config.step_for_elapsed(DEFAULT_RAMP_MS), DEFAULT_MAX_STEP);
        assert_eq!(
            config.step_for_elapsed(DEFAULT_RAMP_MS * 10),
            DEFAULT_MAX_STEP
        );
    }

    #[test]
    fn easing_midpoint_is_linear() {
        let config = RepeatConfig::default();
        let mid = config.step_for_elapsed(DEFAULT_RAMP_MS / 2);
        assert_eq!(mid, DEFAULT_MIN_STEP + (DEFAULT_MAX_STEP - DEFAULT_MIN_STEP) / 2);
    }

    #[test]
    fn serde_round_trip() {
        let config = RepeatConfig {
            period_ms: 8,
            ..Default::default()
        };
        let json = serde_json::to_string(&config).expect("serialize");
        let back: RepeatConfig = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, config);
    }

    #[test]
    fn serde_fills_defaults() {
        let config: RepeatConfig = serde_json::from_str("{}").expect("deserialize");
        assert_eq!(config, RepeatConfig::default());
    }
}
