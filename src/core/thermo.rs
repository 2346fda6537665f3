//! Read-only views derived from recorded trajectories: kinetic energy, effective
//! temperature and species populations at a given history index.

use super::particle::Particle;
use super::snapshot::{Snapshot, Species};
use crate::error::{Error, Result};

/// Boltzmann constant (J/K) used to turn kinetic energy into an effective temperature.
pub const K_BOLTZMANN: f64 = 1.38064852e-23;

/// Alive particle counts per species at one history index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Population {
    pub a: usize,
    pub b: usize,
    /// Particles consumed by a merge.
    pub dead: usize,
}

fn entry(p: &Particle, step: usize) -> Result<&Snapshot> {
    let history = p.history();
    history.get(step).ok_or(Error::StepOutOfRange {
        step,
        len: history.len(),
    })
}

/// Total kinetic energy at history index `step`: `sum(m_i / 2 * |v_i(step)|^2)`.
///
/// Sums over every particle, dead ones included, with each particle's current mass.
pub fn total_energy(particles: &[Particle], step: usize) -> Result<f64> {
    let mut total = 0.0;
    for p in particles {
        let speed = entry(p, step)?.speed;
        total += p.mass() / 2.0 * speed.powi(2);
    }
    Ok(total)
}

/// Effective 2-D temperature `T = E / (N k_B)` at history index `step`.
pub fn temperature(particles: &[Particle], step: usize) -> Result<f64> {
    if particles.is_empty() {
        return Err(Error::InvalidParam(
            "temperature of an empty collection is undefined".into(),
        ));
    }
    let mean_energy = total_energy(particles, step)? / particles.len() as f64;
    Ok(2.0 * mean_energy / (2.0 * K_BOLTZMANN))
}

/// Species populations at history index `step`.
pub fn population(particles: &[Particle], step: usize) -> Result<Population> {
    let mut counts = Population::default();
    for p in particles {
        let s = entry(p, step)?;
        match (s.alive, s.species) {
            (false, _) => counts.dead += 1,
            (true, Species::A) => counts.a += 1,
            (true, Species::B) => counts.b += 1,
        }
    }
    Ok(counts)
}
