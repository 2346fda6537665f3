//! reactgas: a 2-D reactive ideal gas of hard disks.
//!
//! Disks move ballistically in a square box, reflect off its walls and collide
//! either elastically or, with a reactivity-weighted probability, merge as
//! `A + A -> B`. Every particle records its full trajectory so an external
//! visualization or analysis layer can consume it.
//!
//! ```no_run
//! use reactgas::{Simulation, SimulationConfig};
//!
//! # fn main() -> reactgas::Result<()> {
//! let cfg = SimulationConfig { seed: Some(42), ..Default::default() };
//! let mut sim = Simulation::new(&cfg)?;
//! sim.run(cfg.steps)?;
//! let population = sim.population(sim.steps_taken())?;
//! println!("A = {}, B = {}", population.a, population.b);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod core;
pub mod error;

#[cfg(feature = "python")]
mod python;

pub use crate::config::SimulationConfig;
pub use crate::core::{
    place_particles, step, CollisionOutcome, Particle, Population, Simulation, Snapshot,
    Species, StepReport, K_BOLTZMANN,
};
pub use crate::error::{Error, Result};
