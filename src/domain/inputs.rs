//! Per-tick environment inputs.
//!
//! Time-of-day and motion signals are pushed into the tick as explicit
//! inputs rather than mutated on devices from the outside, so the control
//! step stays a function of (state, inputs).

use std::collections::BTreeSet;

/// Snapshot of the external environment for one simulation tick.
#[derive(Debug, Clone, Default)]
pub struct EnvInputs {
    time_of_day_hours: f64,
    motion_zones: BTreeSet<String>,
}

impl EnvInputs {
    /// Create inputs for a given time of day (hours, 0–24).
    pub fn new(time_of_day_hours: f64) -> Self {
        Self {
            time_of_day_hours,
            motion_zones: BTreeSet::new(),
        }
    }

    /// Assert motion in a single zone.
    pub fn with_motion(mut self, zone: impl Into<String>) -> Self {
        self.motion_zones.insert(zone.into());
        self
    }

    /// Assert motion in every zone of the iterator.
    pub fn with_motion_zones<I, S>(mut self, zones: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.motion_zones.extend(zones.into_iter().map(Into::into));
        self
    }

    pub fn time_of_day_hours(&self) -> f64 {
        self.time_of_day_hours
    }

    /// Whether motion is currently asserted in the given zone.
    pub fn motion_in(&self, zone: &str) -> bool {
        self.motion_zones.contains(zone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_motion_lookup() {
        let env = EnvInputs::new(12.0).with_motion("front-door");
        assert!(env.motion_in("front-door"));
        assert!(!env.motion_in("back-door"));
    }

    #[test]
    fn test_default_has_no_motion() {
        let env = EnvInputs::default();
        assert_eq!(env.time_of_day_hours(), 0.0);
        assert!(!env.motion_in("front-door"));
    }
}
