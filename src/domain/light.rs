//! # Smart Light
//!
//! Dims toward a brightness setpoint (0–100 %). Power draw is proportional
//! to the current brightness, and unlike a heater the light keeps drawing
//! power once settled: a lit lamp is steadily illuminated, not done working.
//! Ambient daylight, derived from the global time of day, can assist an
//! active light toward its goal but never push it past the setpoint.

use std::f64::consts::PI;

use super::device::{step_toward, DeviceCore, DeviceKind, SmartDevice};
use super::inputs::EnvInputs;

/// Dimming rate in brightness % per tick.
const BRIGHTNESS_STEP: f64 = 2.0;

/// Settle tolerance in brightness %.
const THRESHOLD_PCT: f64 = 0.1;

/// Power draw at full brightness, in watts.
const FULL_POWER_W: f64 = 100.0;

/// Valid setpoint range in brightness %.
pub const TARGET_RANGE_PCT: (f64, f64) = (0.0, 100.0);

/// Natural daylight level (brightness %) for a time of day in hours.
///
/// Follows a half-sine arc between 06:00 and 18:00, peaking at 50 % around
/// noon; outside that window it is dark.
pub fn day_light(time_of_day_hours: f64) -> f64 {
    if (6.0..=18.0).contains(&time_of_day_hours) {
        30.0 + 20.0 * ((time_of_day_hours - 6.0) / 12.0 * PI).sin()
    } else {
        0.0
    }
}

/// A dimmable smart light.
#[derive(Debug, Clone)]
pub struct Light {
    core: DeviceCore,
}

impl Light {
    pub fn new(name: impl Into<String>, target_pct: f64) -> Self {
        let mut core = DeviceCore::new(name, 0.0, 0.0);
        core.set_target_clamped(target_pct, TARGET_RANGE_PCT.0, TARGET_RANGE_PCT.1);
        Self { core }
    }
}

impl SmartDevice for Light {
    fn name(&self) -> &str {
        &self.core.name
    }

    fn kind(&self) -> DeviceKind {
        DeviceKind::Light
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
            .set_target_clamped(target, TARGET_RANGE_PCT.0, TARGET_RANGE_PCT.1);
    }

    fn power_w(&self) -> f64 {
        self.core.power_w
    }

    fn threshold(&self) -> f64 {
        THRESHOLD_PCT
    }

    fn max_power(&self) -> f64 {
        FULL_POWER_W * (self.core.current_value / 100.0)
    }

    fn update_current_value(&mut self, env: &EnvInputs) {
        if !self.core.is_on {
            // An unlit room tracks ambient daylight.
            self.core.current_value = day_light(env.time_of_day_hours());
            return;
        }

        // Daylight may lift an active light toward its goal, but only if the
        // natural level sits between the current brightness and the target.
        let diff = (self.core.current_value - self.core.target_value).abs();
        if diff > THRESHOLD_PCT {
            let natural = day_light(env.time_of_day_hours());
            if natural > self.core.current_value && natural <= self.core.target_value {
                self.core.current_value = natural;
            }
        }
    }

    fn analyze_and_adjust(&mut self) {
        if !self.core.is_on {
            self.core.power_w = 0.0;
            return;
        }

        let diff = (self.core.current_value - self.core.target_value).abs();
        if diff > THRESHOLD_PCT {
            self.core.power_w = self.max_power();
            self.adjust_value();
        } else {
            // Settled, still illuminated: the draw stays proportional to
            // brightness rather than dropping to zero.
            self.core.power_w = self.max_power();
        }
    }

    fn adjust_value(&mut self) {
        self.core.current_value = step_toward(
            self.core.current_value,
            self.core.target_value,
            BRIGHTNESS_STEP,
        );
    }
}
