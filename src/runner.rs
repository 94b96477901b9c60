//! # Simulation Runner
//!
//! Headless driver loop: ticks the [`Home`] on a fixed wall-clock cadence,
//! feeds randomized motion events into the camera zones, and logs a status
//! line per tick. Replaces the interactive front end of the reference
//! system; the core itself never self-schedules.

use std::collections::HashMap;
use std::time::Duration;

use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::config::Config;
use crate::simulation::Home;
use crate::telemetry;

/// Generates motion events for camera zones.
///
/// Each tick, every zone has a configured chance of seeing motion; an
/// asserted signal stays up for a fixed number of ticks before clearing,
/// mirroring how a real sensor holds its line for a debounce window.
pub struct MotionDriver {
    rng: StdRng,
    zones: Vec<String>,
    probability: f64,
    hold_ticks: u32,
    active: HashMap<String, u32>,
}

impl MotionDriver {
    pub fn new(zones: Vec<String>, probability: f64, hold_ticks: u32, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            zones,
            probability: probability.clamp(0.0, 1.0),
            hold_ticks: hold_ticks.max(1),
            active: HashMap::new(),
        }
    }

    /// Advances the driver one tick: expires held signals, rolls for new
    /// motion, and pushes the changes into the home.
    pub fn tick(&mut self, home: &mut Home) -> Result<()> {
        let mut expired = Vec::new();
        for (zone, remaining) in self.active.iter_mut() {
            *remaining -= 1;
            if *remaining == 0 {
                expired.push(zone.clone());
            }
        }
        for zone in expired {
            self.active.remove(&zone);
            home.set_motion_in_zone(&zone, false)?;
        }

        for zone in &self.zones {
            if !self.active.contains_key(zone) && self.rng.gen_bool(self.probability) {
                self.active.insert(zone.clone(), self.hold_ticks);
                home.set_motion_in_zone(zone, true)?;
                info!(zone = %zone, "motion detected");
            }
        }
        Ok(())
    }
}

/// Runs the tick loop until a shutdown signal arrives.
pub async fn run(mut home: Home, cfg: &Config) -> Result<()> {
    let tick = Duration::from_millis(cfg.sim.tick_millis.max(1));
    let mut interval = tokio::time::interval(tick);

    let mut motion = MotionDriver::new(
        home.camera_zones(),
        cfg.sim.motion_probability,
        cfg.sim.motion_hold_ticks,
        cfg.sim.random_seed,
    );

    let shutdown = telemetry::shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                motion.tick(&mut home)?;
                home.tick(tick);
                let state = home.state();
                info!(
                    time_of_day_hours = state.time_of_day_hours,
                    power_w = state.current_power_w,
                    energy_wh = state.total_energy_wh,
                    active_scenario = state.active_scenario.as_deref().unwrap_or("none"),
                    "simulation tick"
                );
            }
            _ = &mut shutdown => break,
        }
    }
    Ok(())
}
