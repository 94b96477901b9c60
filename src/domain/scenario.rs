//! # Scenarios
//!
//! A scenario is a named bundle of target values applied atomically to a
//! group of devices, plus an energy accumulator that integrates the group's
//! power draw over elapsed time. Devices are shared between scenarios, so a
//! scenario references its members by name instead of owning them.

use std::time::Duration;

use serde::Serialize;

use super::device::{DeviceKind, SmartDevice};

/// Thermostat/light targets for the built-in "Night" scenario.
const NIGHT_TARGETS: (f64, f64) = (19.0, 25.0);

/// Thermostat/light targets for the built-in "Day" scenario.
const DAY_TARGETS: (f64, f64) = (22.0, 75.0);

/// Serializable per-scenario status.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioSnapshot {
    pub name: String,
    pub thermostat_target: f64,
    pub light_target: f64,
    pub total_energy_wh: f64,
}

/// A named device group with fixed targets and accumulated energy.
#[derive(Debug, Clone)]
pub struct Scenario {
    name: String,
    thermostat_target: f64,
    light_target: f64,
    members: Vec<String>,
    total_energy_wh: f64,
}

impl Scenario {
    pub fn new(
        name: impl Into<String>,
        thermostat_target: f64,
        light_target: f64,
        members: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            thermostat_target,
            light_target,
            members,
            total_energy_wh: 0.0,
        }
    }

    /// The two predefined scenarios, both referencing the full device set.
    pub fn builtin(members: Vec<String>) -> Vec<Self> {
        vec![
            Self::new("Night", NIGHT_TARGETS.0, NIGHT_TARGETS.1, members.clone()),
            Self::new("Day", DAY_TARGETS.0, DAY_TARGETS.1, members),
        ]
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Accumulated energy in watt-hours since construction. Monotonically
    /// non-decreasing.
    pub fn total_energy_wh(&self) -> f64 {
        self.total_energy_wh
    }

    fn is_member(&self, name: &str) -> bool {
        self.members.iter().any(|m| m == name)
    }

    /// Turns every member on and pushes the scenario targets into matching
    /// variants: thermostats receive the thermostat target, lights the light
    /// target, cameras only power state. Idempotent.
    pub fn activate(&self, devices: &mut [Box<dyn SmartDevice>]) {
        for device in devices.iter_mut().filter(|d| self.is_member(d.name())) {
            device.set_on(true);
            match device.kind() {
                DeviceKind::Thermostat => device.set_target_value(self.thermostat_target),
                DeviceKind::Light => device.set_target_value(self.light_target),
                DeviceKind::Camera => {}
            }
        }
    }

    /// Integrates member power draw over `dt` into the accumulator,
    /// converting watts to watt-hours.
    pub fn integrate_energy(&mut self, devices: &[Box<dyn SmartDevice>], dt: Duration) {
        let dt_secs = dt.as_secs_f64();
        for device in devices.iter() {
            if !self.is_member(device.name()) {
                continue;
            }
            if device.power_w() > 0.0 {
                self.total_energy_wh += device.power_w() * dt_secs / 3600.0;
            }
        }
    }

    /// Sum of member power draw in watts. Pure read.
    pub fn current_power_w(&self, devices: &[Box<dyn SmartDevice>]) -> f64 {
        devices
            .iter()
            .filter(|d| self.is_member(d.name()))
            .map(|d| d.power_w())
            .sum()
    }

    pub fn snapshot(&self) -> ScenarioSnapshot {
        ScenarioSnapshot {
            name: self.name.clone(),
            thermostat_target: self.thermostat_target,
            light_target: self.light_target,
            total_energy_wh: self.total_energy_wh,
        }
    }
}
