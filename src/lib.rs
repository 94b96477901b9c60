//! # Smart Home Simulator
//!
//! Tick-driven simulation of a small set of smart-home devices —
//! thermostats, lights, and security cameras — whose readings drift with
//! the environment and whose power draw is governed by per-device control
//! policies. Scenarios bundle target values and account energy across the
//! device group.
//!
//! The core advances on discrete ticks supplied by the caller; see
//! [`simulation::Home::tick`]. The [`runner`] module provides a headless
//! tokio driver with a randomized motion source.

pub mod config;
pub mod domain;
pub mod runner;
pub mod simulation;
pub mod telemetry;
