//! # Thermostat
//!
//! Heats a room toward a setpoint with dead-band hysteresis. Heating kicks
//! in once the temperature has fallen more than half a degree below the
//! setpoint and, once started, keeps going through the dead band until the
//! setpoint is crossed. This prevents rapid on/off cycling around the
//! target temperature.

use super::device::{step_toward, DeviceCore, DeviceKind, SmartDevice};
use super::inputs::EnvInputs;

/// Heating rate in °C per tick while actively heating.
const TEMPERATURE_STEP_C: f64 = 0.05;

/// Natural drift rate in °C per tick (heat loss, ambient equalization).
const NATURAL_DRIFT_C: f64 = 0.01;

/// Ambient temperature the room settles at when the thermostat is off.
const BASELINE_C: f64 = 17.0;

/// Dead-band size: heating starts only once the temperature has dropped
/// this far below the setpoint.
const THRESHOLD_C: f64 = 0.5;

/// Heater power draw while heating, in watts.
const MAX_POWER_W: f64 = 500.0;

/// Valid setpoint range in °C.
pub const TARGET_RANGE_C: (f64, f64) = (0.0, 30.0);

/// A room thermostat driving an electric heater.
#[derive(Debug, Clone)]
pub struct Thermostat {
    core: DeviceCore,
}

impl Thermostat {
    pub fn new(name: impl Into<String>, target_c: f64) -> Self {
        let mut core = DeviceCore::new(name, BASELINE_C, BASELINE_C);
        core.set_target_clamped(target_c, TARGET_RANGE_C.0, TARGET_RANGE_C.1);
        Self { core }
    }
}

impl SmartDevice for Thermostat {
    fn name(&self) -> &str {
        &self.core.name
    }

    fn kind(&self) -> DeviceKind {
        DeviceKind::Thermostat
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
            .set_target_clamped(target, TARGET_RANGE_C.0, TARGET_RANGE_C.1);
    }

    fn power_w(&self) -> f64 {
        self.core.power_w
    }

    fn threshold(&self) -> f64 {
        THRESHOLD_C
    }

    fn max_power(&self) -> f64 {
        MAX_POWER_W
    }

    fn update_current_value(&mut self, _env: &EnvInputs) {
        if !self.core.is_on {
            // Unmanaged rooms settle toward the ambient baseline.
            self.core.current_value =
                step_toward(self.core.current_value, BASELINE_C, NATURAL_DRIFT_C);
        } else if self.core.current_value > self.core.target_value - THRESHOLD_C {
            // Heat loss while actively managed: the room keeps leaking heat
            // near and above the setpoint.
            self.core.current_value -= NATURAL_DRIFT_C;
        }
    }

    fn analyze_and_adjust(&mut self) {
        if !self.core.is_on {
            self.core.power_w = 0.0;
            return;
        }

        let diff = self.core.current_value - self.core.target_value;
        if diff < -THRESHOLD_C {
            // Too cold: heat.
            self.core.power_w = MAX_POWER_W;
            self.adjust_value();
        } else if diff > 0.0 {
            // Too hot: stop drawing power but keep cooling toward the target.
            self.core.power_w = 0.0;
            self.adjust_value();
        } else if diff.abs() < 0.01 {
            // At the setpoint.
            self.core.power_w = 0.0;
        } else if self.core.power_w > 0.0 {
            // Dead band: keep heating only if we already were. Once heating
            // starts it continues until the setpoint is crossed.
            self.core.power_w = MAX_POWER_W;
            self.adjust_value();
        }
    }

    fn adjust_value(&mut self) {
        // Full steps, no clamp: crossing the setpoint is what ends a heating
        // run (the too-hot branch then cuts power), so the temperature may
        // overshoot by at most one step.
        if self.core.current_value < self.core.target_value {
            self.core.current_value += TEMPERATURE_STEP_C;
        } else if self.core.current_value > self.core.target_value {
            self.core.current_value -= TEMPERATURE_STEP_C;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticked(device: &mut Thermostat, env: &EnvInputs) {
        device.update_current_value(env);
        device.analyze_and_adjust();
    }

    #[test]
    fn test_off_draws_no_power() {
        let mut t = Thermostat::new("living-room", 20.0);
        let env = EnvInputs::new(12.0);
        ticked(&mut t, &env);
        assert_eq!(t.power_w(), 0.0);
    }

    #[test]
    fn test_heating_starts_below_dead_band() {
        let mut t = Thermostat::new("living-room", 20.0);
        t.set_on(true);
        // 17.0 is 3 degrees below target, well past the 0.5 threshold.
        t.analyze_and_adjust();
        assert_eq!(t.power_w(), 500.0);
        assert!(t.current_value() > 17.0);
    }

    #[test]
    fn test_hysteresis_continues_through_dead_band() {
        let mut t = Thermostat::new("living-room", 20.0);
        t.set_on(true);
        let env = EnvInputs::new(12.0);

        let mut reached_dead_band = false;
        let mut stop_tick = None;
        for i in 0..400 {
            ticked(&mut t, &env);
            let diff = t.current_value() - t.target_value();
            if stop_tick.is_none() {
                if t.power_w() == 0.0 {
                    stop_tick = Some(i);
                    // Heating ends only once the setpoint was crossed; the
                    // same tick steps back down, so at most one adjustment
                    // below target.
                    assert!(t.current_value() > 20.0 - TEMPERATURE_STEP_C - 1e-9);
                } else if diff > -0.5 && diff < 0.0 {
                    reached_dead_band = true;
                    // Heating must not drop out inside the dead band.
                    assert_eq!(t.power_w(), 500.0);
                }
            }
        }
        assert!(reached_dead_band);
        let stop_tick = stop_tick.expect("heating never stopped");

        // After stopping, the room cools and heating eventually resumes.
        let mut resumed = false;
        for _ in 0..100 {
            ticked(&mut t, &env);
            if t.power_w() == 500.0 {
                resumed = true;
                break;
            }
        }
        assert!(resumed, "heating did not resume after cooling (stopped at tick {stop_tick})");
    }

    #[test]
    fn test_idle_within_dead_band_when_not_already_heating() {
        let mut t = Thermostat::new("living-room", 17.2);
        t.set_on(true);
        // current 17.0, diff -0.2: inside the dead band, never heated yet.
        t.analyze_and_adjust();
        assert_eq!(t.power_w(), 0.0);
        assert_eq!(t.current_value(), 17.0);
    }

    #[test]
    fn test_cools_naturally_when_above_target() {
        let mut t = Thermostat::new("living-room", 20.0);
        t.set_on(true);
        t.core.current_value = 21.0;
        t.analyze_and_adjust();
        assert_eq!(t.power_w(), 0.0);
        assert!(t.current_value() < 21.0);
    }

    #[test]
    fn test_drifts_to_baseline_when_off() {
        let mut t = Thermostat::new("living-room", 20.0);
        t.core.current_value = 17.5;
        let env = EnvInputs::new(0.0);
        for _ in 0..100 {
            t.update_current_value(&env);
        }
        assert!((t.current_value() - 17.0).abs() < 1e-9);
    }

    #[test]
    fn test_target_clamped_to_physical_range() {
        let mut t = Thermostat::new("living-room", 99.0);
        assert_eq!(t.target_value(), 30.0);
        t.set_target_value(-10.0);
        assert_eq!(t.target_value(), 0.0);
    }

    #[test]
    fn test_turning_off_resets_power_immediately() {
        let mut t = Thermostat::new("living-room", 25.0);
        t.set_on(true);
        t.analyze_and_adjust();
        assert_eq!(t.power_w(), 500.0);
        t.set_on(false);
        assert_eq!(t.power_w(), 0.0);
    }
}
