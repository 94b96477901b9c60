//! # Security Camera
//!
//! Binary device: either recording (value 100) or idle (value 0), driven by
//! the motion signal of its zone. While switched on it always draws power —
//! 50 W when recording, 10 W on standby.

use super::device::{DeviceCore, DeviceKind, SmartDevice};
use super::inputs::EnvInputs;

/// Power draw while recording, in watts.
const RECORDING_POWER_W: f64 = 50.0;

/// Power draw on standby, in watts.
const STANDBY_POWER_W: f64 = 10.0;

/// Measured value while recording.
const RECORDING: f64 = 100.0;

/// Measured value while idle.
const IDLE: f64 = 0.0;

/// Valid sensitivity range.
pub const SENSITIVITY_RANGE: (f64, f64) = (0.0, 100.0);

/// A motion-triggered security camera watching a named zone.
#[derive(Debug, Clone)]
pub struct SecurityCamera {
    core: DeviceCore,
    zone: String,
}

impl SecurityCamera {
    /// `sensitivity` becomes the target value. It is kept for configuration
    /// compatibility but does not gate detection: motion always triggers
    /// recording.
    pub fn new(name: impl Into<String>, zone: impl Into<String>, sensitivity: f64) -> Self {
        let mut core = DeviceCore::new(name, IDLE, RECORDING);
        core.set_target_clamped(sensitivity, SENSITIVITY_RANGE.0, SENSITIVITY_RANGE.1);
        Self {
            core,
            zone: zone.into(),
        }
    }

    pub fn is_recording(&self) -> bool {
        self.core.current_value == RECORDING
    }
}

impl SmartDevice for SecurityCamera {
    fn name(&self) -> &str {
        &self.core.name
    }

    fn kind(&self) -> DeviceKind {
        DeviceKind::Camera
    }

    fn zone(&self) -> Option<&str> {
        Some(&self.zone)
    }

    fn is_on(&self) -> bool {
        self.core.is_on
    }

    fn set_on(&mut self, on: bool) {
        self.core.set_on(on);
    }

    fn current_value(&self) -> f64 {
        self.core.current_value
    }

    fn target_value(&self) -> f64 {
        self.core.target_value
    }

    fn set_target_value(&mut self, target: f64) {
        self.core
            .set_target_clamped(target, SENSITIVITY_RANGE.0, SENSITIVITY_RANGE.1);
    }

    fn power_w(&self) -> f64 {
        self.core.power_w
    }

    /// The configured sensitivity. Unused by the control policy.
    fn threshold(&self) -> f64 {
        self.core.target_value
    }

    fn max_power(&self) -> f64 {
        if self.is_recording() {
            RECORDING_POWER_W
        } else {
            STANDBY_POWER_W
        }
    }

    fn update_current_value(&mut self, env: &EnvInputs) {
        if !self.core.is_on {
            self.core.current_value = IDLE;
            return;
        }
        self.core.current_value = if env.motion_in(&self.zone) {
            RECORDING
        } else {
            IDLE
        };
    }

    fn analyze_and_adjust(&mut self) {
        if !self.core.is_on {
            self.core.power_w = 0.0;
            return;
        }
        // A powered camera always draws: recording or standby.
        self.core.power_w = self.max_power();
    }

    /// No continuous tracking; switching happens in `update_current_value`.
    fn adjust_value(&mut self) {}
}
