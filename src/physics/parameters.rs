use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Physical and integration parameters, read once per tick as a snapshot.
///
/// Every field is mandatory; callers build a complete value up front.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    pub m1: f64,
    pub m2: f64,
    pub l1: f64,
    pub l2: f64,
    pub g: f64,
    /// Base time step per tick.
    pub dt: f64,
    /// Playback multiplier on `dt`.
    pub speed: f64,
    /// Substep multiplier; rounded, at least one substep.
    pub accuracy: f64,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            m1: 10.0,
            m2: 10.0,
            l1: 150.0,
            l2: 150.0,
            g: 1.0,
            dt: 0.2,
            speed: 1.0,
            accuracy: 1.0,
        }
    }
}

/// Allowed domain of one parameter, as exposed by the slider panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterRange {
    pub name: &'static str,
    pub label: &'static str,
    pub unit: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl ParameterRange {
    const fn new(name: &'static str, label: &'static str, unit: &'static str, min: f64, max: f64, step: f64) -> Self {
        Self { name, label, unit, min, max, step }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Clamps into `[min, max]`; non-finite values fall back to `min`.
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_finite() { value.clamp(self.min, self.max) } else { self.min }
    }

    fn check(&self, value: f64) -> Result<()> {
        if !value.is_finite() {
            return Err(ConfigError::non_finite(self.name));
        }
        if !self.contains(value) {
            return Err(ConfigError::out_of_range(self.name, value, self.min, self.max));
        }
        Ok(())
    }
}

/// Slider domains, in field order m1, m2, l1, l2, g, dt, speed, accuracy.
pub const PARAMETER_RANGES: [ParameterRange; 8] = [
    ParameterRange::new("m1", "Mass m1", "kg", 1.0, 30.0, 0.5),
    ParameterRange::new("m2", "Mass m2", "kg", 1.0, 30.0, 0.5),
    ParameterRange::new("l1", "Length l1", "px", 50.0, 250.0, 5.0),
    ParameterRange::new("l2", "Length l2", "px", 50.0, 250.0, 5.0),
    ParameterRange::new("g", "Gravity g", "m/s²", 0.1, 3.0, 0.1),
    ParameterRange::new("dt", "Time Step dt", "s", 0.05, 0.5, 0.01),
    ParameterRange::new("speed", "Sim Speed", "x", 0.25, 4.0, 0.25),
    ParameterRange::new("accuracy", "Model Accuracy", "x", 0.1, 3.0, 0.5),
];

impl SimulationParameters {
    /// Field values in [`PARAMETER_RANGES`] order.
    pub fn values(&self) -> [f64; 8] {
        [self.m1, self.m2, self.l1, self.l2, self.g, self.dt, self.speed, self.accuracy]
    }

    /// Inverse of [`values`](Self::values).
    pub fn from_values(v: [f64; 8]) -> Self {
        Self {
            m1: v[0],
            m2: v[1],
            l1: v[2],
            l2: v[3],
            g: v[4],
            dt: v[5],
            speed: v[6],
            accuracy: v[7],
        }
    }

    /// Rejects non-finite or out-of-range fields, reporting the first offender.
    pub fn validate(&self) -> Result<()> {
        PARAMETER_RANGES
            .iter()
            .zip(self.values())
            .try_for_each(|(range, value)| range.check(value))
    }

    /// Every field projected onto its range.
    pub fn clamped(&self) -> Self {
        let mut v = self.values();
        for (value, range) in v.iter_mut().zip(PARAMETER_RANGES.iter()) {
            *value = range.clamp(*value);
        }
        Self::from_values(v)
    }

    /// Elapsed simulated time per tick.
    pub fn effective_dt(&self) -> f64 {
        self.dt * self.speed
    }

    /// `round(accuracy)`, never less than one.
    pub fn substeps(&self) -> u32 {
        let rounded = self.accuracy.round();
        if rounded.is_finite() && rounded > 1.0 { rounded as u32 } else { 1 }
    }
}
