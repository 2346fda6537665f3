//! Simulation parameters, supplied once at construction.
//!
//! [`SimulationConfig`] is the single parameter surface shared by the library,
//! the `reactgas` binary (optionally loaded from YAML) and the Python binding.
//! Missing fields fall back to the defaults below.
//!
//! ```yaml
//! num_particles: 100
//! box_size: 200.0
//! radius: 1.0
//! mass: 1.2e-23
//! reactivity: 1.0          # mean pair reactivity is compared with a uniform draw
//! max_speed: 20.0          # initial speeds are uniform in [0, max_speed)
//! total_time: 10.0
//! steps: 1000              # dt = total_time / steps
//! seed: 42                 # omit for a nondeterministic run
//! max_placement_attempts: 1000000
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Number of particles placed at start; the arena never grows or shrinks.
    pub num_particles: usize,
    /// Edge length of the square box `[0, box_size]^2`.
    pub box_size: f64,
    /// Initial radius of every particle.
    pub radius: f64,
    /// Initial mass of every particle.
    pub mass: f64,
    /// Reactivity in [0, 1] shared by every particle.
    pub reactivity: f64,
    /// Initial speeds are uniform in [0, max_speed).
    pub max_speed: f64,
    /// Simulated time covered by `steps` steps.
    pub total_time: f64,
    /// Number of fixed steps; `dt = total_time / steps`.
    pub steps: usize,
    /// RNG seed for a reproducible run; `None` seeds from the thread RNG.
    pub seed: Option<u64>,
    /// Rejection-sampling cap per particle before placement gives up.
    pub max_placement_attempts: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_particles: 100,
            box_size: 200.0,
            radius: 1.0,
            mass: 1.2e-23,
            reactivity: 1.0,
            max_speed: 20.0,
            total_time: 10.0,
            steps: 1000,
            seed: None,
            max_placement_attempts: 1_000_000,
        }
    }
}

impl SimulationConfig {
    /// Fixed timestep: total simulated time divided into `steps` steps.
    #[inline]
    pub fn dt(&self) -> f64 {
        self.total_time / self.steps as f64
    }

    /// Check every parameter; the first violation is reported.
    pub fn validate(&self) -> Result<()> {
        if self.num_particles == 0 {
            return Err(Error::InvalidParam("num_particles must be > 0".into()));
        }
        if self.num_particles > u32::MAX as usize {
            return Err(Error::InvalidParam("num_particles must fit in u32".into()));
        }
        if !self.box_size.is_finite() || self.box_size <= 0.0 {
            return Err(Error::InvalidParam("box_size must be finite and > 0".into()));
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(Error::InvalidParam("radius must be finite and > 0".into()));
        }
        if self.box_size <= 2.0 * self.radius {
            return Err(Error::InvalidParam(
                "box_size must exceed 2 * radius".into(),
            ));
        }
        if !self.mass.is_finite() || self.mass <= 0.0 {
            return Err(Error::InvalidParam("mass must be finite and > 0".into()));
        }
        if !(0.0..=1.0).contains(&self.reactivity) {
            return Err(Error::InvalidParam("reactivity must lie in [0, 1]".into()));
        }
        if !self.max_speed.is_finite() || self.max_speed < 0.0 {
            return Err(Error::InvalidParam(
                "max_speed must be finite and >= 0".into(),
            ));
        }
        if !self.total_time.is_finite() || self.total_time <= 0.0 {
            return Err(Error::InvalidParam(
                "total_time must be finite and > 0".into(),
            ));
        }
        if self.steps == 0 {
            return Err(Error::InvalidParam("steps must be > 0".into()));
        }
        if self.max_placement_attempts == 0 {
            return Err(Error::InvalidParam(
                "max_placement_attempts must be > 0".into(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a YAML scenario.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let cfg: Self = serde_yaml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a YAML scenario file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }
}
