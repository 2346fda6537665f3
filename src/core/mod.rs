//! Kinetics core: particle state, the fixed-timestep collision engine and the
//! read-only energy/population views built on the recorded trajectories.
//!
//! Layering is strict: [`sim`] drives [`particle`]; nothing else mutates particles.

pub mod particle;
pub mod sim;
pub mod snapshot;
pub mod thermo;

pub use particle::{CollisionOutcome, Particle};
pub use sim::{place_particles, step, Simulation, StepReport};
pub use snapshot::{Snapshot, Species};
pub use thermo::{population, temperature, total_energy, Population, K_BOLTZMANN};
