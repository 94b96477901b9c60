//! # Simulation Module
//!
//! Orchestrates the smart-home simulation: the [`Home`] owns the device set
//! and scenarios, ticks the time-of-day clock, feeds motion signals into the
//! environment update, and integrates power into scenario energy.
//!
//! ## Usage
//!
//! ```rust
//! use std::time::Duration;
//! use smart_home_sim::config::Config;
//! use smart_home_sim::simulation::Home;
//!
//! let mut home = Home::from_config(&Config::default()).unwrap();
//! home.activate_scenario("Night").unwrap();
//!
//! // Advance the simulation by one 500 ms tick.
//! home.tick(Duration::from_millis(500));
//!
//! let state = home.state();
//! println!("{:.1} W, {:.3} Wh", state.current_power_w, state.total_energy_wh);
//! ```

pub mod home;

pub use home::{Home, HomeError, HomeState};
