//! # Home Orchestrator
//!
//! The master simulation component: owns the device set, the scenarios, the
//! simulated time-of-day clock, and the motion signals, and advances them
//! all on each tick. Single-threaded and tick-driven; the external driver
//! decides the cadence and passes the elapsed time explicitly so energy
//! totals do not depend on an assumed tick length.

use std::collections::BTreeSet;
use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use crate::config::Config;
use crate::domain::{
    DeviceKind, DeviceSnapshot, EnvInputs, Light, Scenario, ScenarioSnapshot, SecurityCamera,
    SmartDevice, Thermostat,
};

const HOURS_PER_DAY: f64 = 24.0;

/// Errors surfaced at the orchestrator boundary. Numeric inputs are clamped
/// rather than rejected; only unknown identifiers are errors.
#[derive(Debug, thiserror::Error)]
pub enum HomeError {
    #[error("unknown device: {0}")]
    UnknownDevice(String),
    #[error("unknown scenario: {0}")]
    UnknownScenario(String),
    #[error("unknown motion zone: {0}")]
    UnknownZone(String),
    #[error("duplicate device name: {0}")]
    DuplicateDevice(String),
    #[error("camera {0} has no motion zone configured")]
    MissingZone(String),
}

/// Complete home state snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct HomeState {
    pub time_of_day_hours: f64,
    pub active_scenario: Option<String>,
    pub devices: Vec<DeviceSnapshot>,
    pub scenarios: Vec<ScenarioSnapshot>,
    /// Sum of device power draw in watts.
    pub current_power_w: f64,
    /// Sum of scenario energy accumulators in watt-hours.
    pub total_energy_wh: f64,
}

/// Master simulator owning devices and scenarios.
pub struct Home {
    devices: Vec<Box<dyn SmartDevice>>,
    scenarios: Vec<Scenario>,
    time_of_day_hours: f64,
    hours_per_tick: f64,
    motion_zones: BTreeSet<String>,
    active_scenario: Option<String>,
}

impl Home {
    pub fn new(
        devices: Vec<Box<dyn SmartDevice>>,
        scenarios: Vec<Scenario>,
        hours_per_tick: f64,
    ) -> Self {
        Self {
            devices,
            scenarios,
            time_of_day_hours: 0.0,
            hours_per_tick,
            motion_zones: BTreeSet::new(),
            active_scenario: None,
        }
    }

    /// Builds the device roster and scenario list from configuration.
    pub fn from_config(cfg: &Config) -> Result<Self, HomeError> {
        let mut devices: Vec<Box<dyn SmartDevice>> = Vec::with_capacity(cfg.devices.len());
        for spec in &cfg.devices {
            if devices.iter().any(|d| d.name() == spec.name) {
                return Err(HomeError::DuplicateDevice(spec.name.clone()));
            }
            let device: Box<dyn SmartDevice> = match spec.kind {
                DeviceKind::Thermostat => Box::new(Thermostat::new(&spec.name, spec.target)),
                DeviceKind::Light => Box::new(Light::new(&spec.name, spec.target)),
                DeviceKind::Camera => {
                    let zone = spec
                        .zone
                        .clone()
                        .ok_or_else(|| HomeError::MissingZone(spec.name.clone()))?;
                    Box::new(SecurityCamera::new(&spec.name, zone, spec.target))
                }
            };
            devices.push(device);
        }

        let names: Vec<String> = devices.iter().map(|d| d.name().to_owned()).collect();
        let scenarios = if cfg.scenarios.is_empty() {
            Scenario::builtin(names)
        } else {
            cfg.scenarios
                .iter()
                .map(|s| {
                    Scenario::new(
                        &s.name,
                        s.thermostat_target,
                        s.light_target,
                        names.clone(),
                    )
                })
                .collect()
        };

        Ok(Self::new(devices, scenarios, cfg.sim.hours_per_tick))
    }

    pub fn time_of_day_hours(&self) -> f64 {
        self.time_of_day_hours
    }

    /// Overrides the simulated clock; wraps into [0, 24).
    pub fn set_time_of_day(&mut self, hours: f64) {
        self.time_of_day_hours = hours.rem_euclid(HOURS_PER_DAY);
    }

    pub fn active_scenario(&self) -> Option<&str> {
        self.active_scenario.as_deref()
    }

    /// Zones watched by the configured cameras.
    pub fn camera_zones(&self) -> Vec<String> {
        self.devices
            .iter()
            .filter_map(|d| d.zone().map(str::to_owned))
            .collect()
    }

    pub fn device(&self, name: &str) -> Option<&dyn SmartDevice> {
        self.devices
            .iter()
            .find(|d| d.name() == name)
            .map(|d| d.as_ref())
    }

    fn device_mut(&mut self, name: &str) -> Result<&mut Box<dyn SmartDevice>, HomeError> {
        self.devices
            .iter_mut()
            .find(|d| d.name() == name)
            .ok_or_else(|| HomeError::UnknownDevice(name.to_owned()))
    }

    /// Manual on/off override. Clears the active scenario, since the home no
    /// longer matches any scenario's prescribed state.
    pub fn set_device_on(&mut self, name: &str, on: bool) -> Result<(), HomeError> {
        self.device_mut(name)?.set_on(on);
        self.active_scenario = None;
        Ok(())
    }

    /// Manual setpoint override; the device clamps to its physical range.
    pub fn set_target_value(&mut self, name: &str, target: f64) -> Result<(), HomeError> {
        self.device_mut(name)?.set_target_value(target);
        self.active_scenario = None;
        Ok(())
    }

    /// Asserts or clears the motion signal for a camera zone. Takes effect
    /// at the next tick's environment update.
    pub fn set_motion_in_zone(&mut self, zone: &str, active: bool) -> Result<(), HomeError> {
        if !self.devices.iter().any(|d| d.zone() == Some(zone)) {
            return Err(HomeError::UnknownZone(zone.to_owned()));
        }
        if active {
            self.motion_zones.insert(zone.to_owned());
        } else {
            self.motion_zones.remove(zone);
        }
        Ok(())
    }

    /// Activates a named scenario: members switch on and receive the
    /// scenario targets.
    pub fn activate_scenario(&mut self, name: &str) -> Result<(), HomeError> {
        let scenario = self
            .scenarios
            .iter()
            .find(|s| s.name() == name)
            .ok_or_else(|| HomeError::UnknownScenario(name.to_owned()))?
            .clone();
        scenario.activate(&mut self.devices);
        self.active_scenario = Some(name.to_owned());
        Ok(())
    }

    /// Advances the simulation by one tick of `dt` elapsed time.
    ///
    /// Advances the clock, applies environment drift and the control policy
    /// to every device, then integrates scenario energy over `dt`.
    pub fn tick(&mut self, dt: Duration) {
        self.time_of_day_hours =
            (self.time_of_day_hours + self.hours_per_tick).rem_euclid(HOURS_PER_DAY);

        let env = EnvInputs::new(self.time_of_day_hours)
            .with_motion_zones(self.motion_zones.iter().cloned());

        for device in self.devices.iter_mut() {
            device.update_current_value(&env);
            device.analyze_and_adjust();
            debug!(
                device = device.name(),
                value = device.current_value(),
                power_w = device.power_w(),
                "device tick"
            );
        }

        for scenario in self.scenarios.iter_mut() {
            scenario.integrate_energy(&self.devices, dt);
        }
    }

    /// Sum of device power draw in watts.
    pub fn current_power_w(&self) -> f64 {
        self.devices.iter().map(|d| d.power_w()).sum()
    }

    /// Sum of scenario energy accumulators in watt-hours. Devices shared by
    /// several scenarios are counted in each accumulator.
    pub fn total_energy_wh(&self) -> f64 {
        self.scenarios.iter().map(Scenario::total_energy_wh).sum()
    }

    pub fn state(&self) -> HomeState {
        HomeState {
            time_of_day_hours: self.time_of_day_hours,
            active_scenario: self.active_scenario.clone(),
            devices: self.devices.iter().map(|d| d.snapshot()).collect(),
            scenarios: self.scenarios.iter().map(Scenario::snapshot).collect(),
            current_power_w: self.current_power_w(),
            total_energy_wh: self.total_energy_wh(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_home() -> Home {
        let devices: Vec<Box<dyn SmartDevice>> = vec![
            Box::new(Thermostat::new("thermostat", 17.0)),
            Box::new(Light::new("light", 0.0)),
            Box::new(SecurityCamera::new("camera", "front-door", 100.0)),
        ];
        let names = vec![
            "thermostat".to_owned(),
            "light".to_owned(),
            "camera".to_owned(),
        ];
        Home::new(devices, Scenario::builtin(names), 0.1)
    }

    #[test]
    fn test_clock_advances_and_wraps() {
        let mut home = test_home();
        home.set_time_of_day(23.95);
        home.tick(Duration::from_millis(500));
        assert!(home.time_of_day_hours() < 0.1);
    }

    #[test]
    fn test_set_time_of_day_wraps_input() {
        let mut home = test_home();
        home.set_time_of_day(25.5);
        assert!((home.time_of_day_hours() - 1.5).abs() < 1e-9);
        home.set_time_of_day(-1.0);
        assert!((home.time_of_day_hours() - 23.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_device_is_an_error() {
        let mut home = test_home();
        assert!(matches!(
            home.set_device_on("fridge", true),
            Err(HomeError::UnknownDevice(_))
        ));
        assert!(matches!(
            home.set_target_value("fridge", 1.0),
            Err(HomeError::UnknownDevice(_))
        ));
    }

    #[test]
    fn test_unknown_zone_is_an_error() {
        let mut home = test_home();
        assert!(matches!(
            home.set_motion_in_zone("garage", true),
            Err(HomeError::UnknownZone(_))
        ));
    }

    #[test]
    fn test_unknown_scenario_is_an_error() {
        let mut home = test_home();
        assert!(matches!(
            home.activate_scenario("Party"),
            Err(HomeError::UnknownScenario(_))
        ));
    }

    #[test]
    fn test_scenario_activation_sets_active_name() {
        let mut home = test_home();
        home.activate_scenario("Night").unwrap();
        assert_eq!(home.active_scenario(), Some("Night"));
        let thermostat = home.device("thermostat").unwrap();
        assert!(thermostat.is_on());
        assert_eq!(thermostat.target_value(), 19.0);
    }

    #[test]
    fn test_manual_override_clears_active_scenario() {
        let mut home = test_home();
        home.activate_scenario("Day").unwrap();
        home.set_device_on("light", false).unwrap();
        assert_eq!(home.active_scenario(), None);
    }

    #[test]
    fn test_motion_feeds_next_tick() {
        let mut home = test_home();
        home.set_device_on("camera", true).unwrap();
        home.set_motion_in_zone("front-door", true).unwrap();
        home.tick(Duration::from_millis(500));
        let camera = home.device("camera").unwrap();
        assert_eq!(camera.current_value(), 100.0);
        assert_eq!(camera.power_w(), 50.0);

        home.set_motion_in_zone("front-door", false).unwrap();
        home.tick(Duration::from_millis(500));
        let camera = home.device("camera").unwrap();
        assert_eq!(camera.current_value(), 0.0);
        assert_eq!(camera.power_w(), 10.0);
    }

    #[test]
    fn test_off_devices_never_draw_power() {
        let mut home = test_home();
        for _ in 0..50 {
            home.tick(Duration::from_millis(500));
        }
        assert_eq!(home.current_power_w(), 0.0);
        assert_eq!(home.total_energy_wh(), 0.0);
    }

    #[test]
    fn test_shared_devices_count_in_each_scenario_accumulator() {
        let mut home = test_home();
        home.activate_scenario("Day").unwrap();
        home.tick(Duration::from_secs(1));
        let state = home.state();
        // Both built-in scenarios reference the full device set, so both
        // accumulate the same energy.
        assert_eq!(state.scenarios.len(), 2);
        assert!(state.scenarios[0].total_energy_wh > 0.0);
        assert!(
            (state.scenarios[0].total_energy_wh - state.scenarios[1].total_energy_wh).abs() < 1e-9
        );
    }

    #[test]
    fn test_from_config_rejects_duplicate_names() {
        use crate::config::{Config, DeviceConfig};

        let mut cfg = Config::default();
        cfg.devices = vec![
            DeviceConfig {
                kind: DeviceKind::Light,
                name: "light".to_owned(),
                target: 0.0,
                zone: None,
            },
            DeviceConfig {
                kind: DeviceKind::Light,
                name: "light".to_owned(),
                target: 0.0,
                zone: None,
            },
        ];
        assert!(matches!(
            Home::from_config(&cfg),
            Err(HomeError::DuplicateDevice(_))
        ));
    }

    #[test]
    fn test_from_config_requires_camera_zone() {
        use crate::config::{Config, DeviceConfig};

        let mut cfg = Config::default();
        cfg.devices = vec![DeviceConfig {
            kind: DeviceKind::Camera,
            name: "camera".to_owned(),
            target: 100.0,
            zone: None,
        }];
        assert!(matches!(
            Home::from_config(&cfg),
            Err(HomeError::MissingZone(_))
        ));
    }

    #[test]
    fn test_default_config_builds() {
        let home = Home::from_config(&Config::default()).unwrap();
        assert_eq!(home.state().devices.len(), 6);
        assert_eq!(home.state().scenarios.len(), 2);
        assert_eq!(home.camera_zones().len(), 2);
    }
}
