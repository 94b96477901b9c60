use anyhow::Result;
use figment::{providers::{Env, Format, Toml}, Figment};
use serde::Deserialize;

use crate::domain::DeviceKind;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub sim: SimConfig,
    pub devices: Vec<DeviceConfig>,
    #[serde(default)]
    pub scenarios: Vec<ScenarioConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimConfig {
    /// Wall-clock milliseconds between simulation ticks.
    pub tick_millis: u64,
    /// Simulated hours the clock advances per tick.
    pub hours_per_tick: f64,
    /// Seed for the motion driver; `None` draws from entropy.
    pub random_seed: Option<u64>,
    /// Per-tick chance that a camera zone sees motion.
    pub motion_probability: f64,
    /// Ticks a motion assertion stays up before clearing.
    pub motion_hold_ticks: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_millis: 500,
            hours_per_tick: 0.1,
            random_seed: None,
            motion_probability: 0.05,
            motion_hold_ticks: 1,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeviceConfig {
    pub kind: DeviceKind,
    pub name: String,
    /// Initial setpoint (°C, brightness %, or camera sensitivity).
    pub target: f64,
    /// Motion zone; required for cameras, ignored otherwise.
    pub zone: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioConfig {
    pub name: String,
    pub thermostat_target: f64,
    pub light_target: f64,
}

impl Config {
    pub fn load() -> Result<Self> {
        let figment = Figment::new()
            .merge(Toml::file("config/default.toml"))
            .merge(Env::prefixed("HOMESIM__").split("__"));
        Ok(figment.extract()?)
    }
}

impl Default for Config {
    /// The reference roster: two cameras, two thermostats, two lights, and
    /// the built-in Night/Day scenarios.
    fn default() -> Self {
        let device = |kind, name: &str, target, zone: Option<&str>| DeviceConfig {
            kind,
            name: name.to_owned(),
            target,
            zone: zone.map(str::to_owned),
        };

        Self {
            sim: SimConfig::default(),
            devices: vec![
                device(
                    DeviceKind::Camera,
                    "front-door-camera",
                    100.0,
                    Some("front-door"),
                ),
                device(DeviceKind::Thermostat, "living-room-thermostat", 17.0, None),
                device(DeviceKind::Thermostat, "bedroom-thermostat", 17.0, None),
                device(DeviceKind::Light, "living-room-light", 0.0, None),
                device(DeviceKind::Light, "bedroom-light", 0.0, None),
                device(
                    DeviceKind::Camera,
                    "back-door-camera",
                    100.0,
                    Some("back-door"),
                ),
            ],
            scenarios: Vec::new(),
        }
    }
}
