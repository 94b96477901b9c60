//! # Smart Device Contract
//!
//! Every simulated device implements [`SmartDevice`]: a tick-driven state
//! machine that owns its measured value, its setpoint, and its own control
//! policy. The simulation loop calls, once per tick and in this order:
//!
//! 1. [`SmartDevice::update_current_value`] — environment-driven drift
//!    (natural cooling, ambient daylight, motion detection), applied whether
//!    or not the device is switched on.
//! 2. [`SmartDevice::analyze_and_adjust`] — the control decision: compare
//!    current vs. target, set the instantaneous power draw, and optionally
//!    step the value toward the setpoint.
//!
//! Each variant fully owns its control logic; there is no shared routine
//! that branches on device type.

use serde::{Deserialize, Serialize};

use super::inputs::EnvInputs;

/// Device variant discriminator, used for configuration and target routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DeviceKind {
    Thermostat,
    Light,
    Camera,
}

/// Read-only snapshot of a device, suitable for logging and display layers.
#[derive(Debug, Clone, Serialize)]
pub struct DeviceSnapshot {
    pub name: String,
    pub kind: DeviceKind,
    pub is_on: bool,
    pub current_value: f64,
    pub target_value: f64,
    pub power_w: f64,
}

/// Behavior shared by all simulated devices.
///
/// Invariants upheld by every implementation:
/// - `is_on() == false` implies `power_w() == 0.0`, immediately after
///   `set_on(false)` and after every tick.
/// - `power_w()` is never negative and only ever `0.0` or the variant's
///   current `max_power()` at tick boundaries.
pub trait SmartDevice: Send {
    /// Immutable identifier.
    fn name(&self) -> &str;

    fn kind(&self) -> DeviceKind;

    /// Motion zone this device watches, if any. Only cameras report one.
    fn zone(&self) -> Option<&str> {
        None
    }

    fn is_on(&self) -> bool;

    /// Manual override. Turning a device off forces its power draw to zero
    /// on the same call, without waiting for the next tick.
    fn set_on(&mut self, on: bool);

    fn current_value(&self) -> f64;

    fn target_value(&self) -> f64;

    /// Sets the setpoint, clamped to the variant's physical range. Input
    /// originates from free-text parsing upstream, so out-of-range values
    /// are silently corrected rather than rejected.
    fn set_target_value(&mut self, target: f64);

    /// Instantaneous power draw in watts.
    fn power_w(&self) -> f64;

    /// Hysteresis band size used by the control policy.
    fn threshold(&self) -> f64;

    /// Power draw in watts while actively working.
    fn max_power(&self) -> f64;

    /// Simulates environment-driven drift of the measured value. Runs once
    /// per tick regardless of `is_on`.
    fn update_current_value(&mut self, env: &EnvInputs);

    /// The control decision: recomputes `power_w` and may step the value
    /// toward the setpoint.
    fn analyze_and_adjust(&mut self);

    /// Moves the measured value one tick's worth toward the setpoint.
    fn adjust_value(&mut self);

    fn snapshot(&self) -> DeviceSnapshot {
        DeviceSnapshot {
            name: self.name().to_owned(),
            kind: self.kind(),
            is_on: self.is_on(),
            current_value: self.current_value(),
            target_value: self.target_value(),
            power_w: self.power_w(),
        }
    }
}

/// State shared by all device variants.
#[derive(Debug, Clone)]
pub(crate) struct DeviceCore {
    pub(crate) name: String,
    pub(crate) is_on: bool,
    pub(crate) current_value: f64,
    pub(crate) target_value: f64,
    pub(crate) power_w: f64,
}

impl DeviceCore {
    pub(crate) fn new(name: impl Into<String>, initial_value: f64, target_value: f64) -> Self {
        Self {
            name: name.into(),
            is_on: false,
            current_value: initial_value,
            target_value,
            power_w: 0.0,
        }
    }

    pub(crate) fn set_on(&mut self, on: bool) {
        self.is_on = on;
        if !on {
            self.power_w = 0.0;
        }
    }

    pub(crate) fn set_target_clamped(&mut self, target: f64, min: f64, max: f64) {
        self.target_value = target.clamp(min, max);
    }
}

/// Moves `current` toward `target` by at most `step`, never overshooting.
pub(crate) fn step_toward(current: f64, target: f64, step: f64) -> f64 {
    if current < target {
        (current + step).min(target)
    } else if current > target {
        (current - step).max(target)
    } else {
        current
    }
}
