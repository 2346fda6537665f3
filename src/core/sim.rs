use crate::config::SimulationConfig;
use crate::core::particle::{contact_gap, ensure_distinct, CollisionOutcome, Particle, DIM};
use crate::core::thermo::{self, Population};
use crate::error::{Error, Result};
use log::{debug, trace};
use rand::{rng, rngs::StdRng, Rng, SeedableRng};
use std::f64::consts::PI;

/// Pairwise resolutions performed by one or more steps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    pub elastic: usize,
    pub merged: usize,
}

/// Place `cfg.num_particles` species-`A` particles at random, mutually non-colliding
/// positions inside `[radius, box_size - radius]^2`.
///
/// Per particle the generator is drawn for speed (uniform in `[0, max_speed)`), heading
/// (uniform in `[0, 2pi)`) and then candidate positions until one clears every
/// particle placed so far.
///
/// Errors: `Error::PackingFailed` once a particle exhausts `max_placement_attempts`.
pub fn place_particles<R: Rng + ?Sized>(
    cfg: &SimulationConfig,
    rng: &mut R,
) -> Result<Vec<Particle>> {
    cfg.validate()?;
    let radius = cfg.radius;
    let span = cfg.box_size - 2.0 * radius;

    let mut particles: Vec<Particle> = Vec::with_capacity(cfg.num_particles);
    let mut rejected = 0usize;
    for id in 0..(cfg.num_particles as u32) {
        let speed = rng.random::<f64>() * cfg.max_speed;
        let heading = rng.random::<f64>() * 2.0 * PI;
        let velocity = [speed * heading.cos(), speed * heading.sin()];

        let mut attempts = 0usize;
        let position = loop {
            if attempts >= cfg.max_placement_attempts {
                return Err(Error::PackingFailed { id, attempts });
            }
            attempts += 1;
            let mut candidate = [0.0_f64; DIM];
            for x in candidate.iter_mut() {
                *x = radius + rng.random::<f64>() * span;
            }
            if !overlaps_existing(&particles, &candidate, radius) {
                break candidate;
            }
        };
        rejected += attempts - 1;

        particles.push(Particle::new(
            id,
            position,
            velocity,
            radius,
            cfg.mass,
            cfg.reactivity,
        )?);
    }

    debug!(
        "placed {} particles in a {} box ({} candidates rejected)",
        particles.len(),
        cfg.box_size,
        rejected
    );
    Ok(particles)
}

/// Advance the collection by one fixed step of size `dt`.
///
/// Phases, in this order:
/// 1. wall reflection for every particle, ascending index;
/// 2. pairwise resolution for every `(i, j)` with `i < j` in lexicographic order,
///    so later pairings see velocities already updated earlier in the same step;
/// 3. integration and history recording for every particle.
///
/// Positions do not move before phase 3 and particles only ever die, so coincident
/// alive centres are rejected up front with `Error::MathError`: a failed step leaves
/// particles and `rng` untouched.
pub fn step<R: Rng + ?Sized>(
    particles: &mut [Particle],
    dt: f64,
    box_size: f64,
    rng: &mut R,
) -> Result<StepReport> {
    for i in 0..particles.len() {
        for j in (i + 1)..particles.len() {
            ensure_distinct(&particles[i], &particles[j])?;
        }
    }

    for p in particles.iter_mut() {
        p.reflect_walls(dt, box_size);
    }

    let mut report = StepReport::default();
    let n = particles.len();
    for i in 0..n {
        for j in (i + 1)..n {
            let (head, tail) = particles.split_at_mut(j);
            let (pi, pj) = (&mut head[i], &mut tail[0]);
            match pi.resolve_collision(pj, dt, &mut *rng)? {
                CollisionOutcome::Missed => {}
                CollisionOutcome::Elastic => report.elastic += 1,
                CollisionOutcome::Merged => {
                    report.merged += 1;
                    trace!("particle {} absorbed particle {}", pi.id, pj.id);
                }
            }
        }
    }

    for p in particles.iter_mut() {
        p.advance(dt);
    }
    Ok(report)
}

/// Simulation state: a fixed-size particle arena in a static square box, stepped
/// with a fixed timestep.
///
/// Dead particles stay in the arena so indices and trajectory lengths never change.
#[derive(Debug)]
pub struct Simulation {
    steps_taken: usize,
    box_size: f64,
    dt: f64,
    particles: Vec<Particle>,
    rng: StdRng,
}

impl Simulation {
    /// Create a simulation from `cfg`, placing particles with [`place_particles`].
    ///
    /// The same seeded generator later drives the reaction draws, so a fixed
    /// `cfg.seed` reproduces the whole run.
    pub fn new(cfg: &SimulationConfig) -> Result<Self> {
        cfg.validate()?;
        let mut rng = seeded_rng(cfg.seed);
        let particles = place_particles(cfg, &mut rng)?;
        Ok(Self {
            steps_taken: 0,
            box_size: cfg.box_size,
            dt: cfg.dt(),
            particles,
            rng,
        })
    }

    /// Wrap an explicit particle set (e.g. a hand-built scenario).
    ///
    /// Pairs may start inside the contact margin; they are resolved on the first step.
    ///
    /// Errors: `Error::InvalidParam` for a non-positive `box_size`/`dt`, particles
    /// whose histories have different lengths, a centre outside
    /// `[radius, box_size - radius]`, or two alive particles sharing a centre.
    pub fn from_particles(
        particles: Vec<Particle>,
        box_size: f64,
        dt: f64,
        seed: Option<u64>,
    ) -> Result<Self> {
        if !box_size.is_finite() || box_size <= 0.0 {
            return Err(Error::InvalidParam("box_size must be finite and > 0".into()));
        }
        if !dt.is_finite() || dt <= 0.0 {
            return Err(Error::InvalidParam("dt must be finite and > 0".into()));
        }
        let len = particles.first().map_or(1, |p| p.history().len());
        if particles.iter().any(|p| p.history().len() != len) {
            return Err(Error::InvalidParam(
                "all particles must carry histories of equal length".into(),
            ));
        }
        for p in &particles {
            let (lo, hi) = (p.radius(), box_size - p.radius());
            if p.position.iter().any(|&x| x < lo || x > hi) {
                return Err(Error::InvalidParam(format!(
                    "particle {} lies outside the box",
                    p.id
                )));
            }
        }
        for i in 0..particles.len() {
            for j in (i + 1)..particles.len() {
                ensure_distinct(&particles[i], &particles[j]).map_err(|_| {
                    Error::InvalidParam(format!(
                        "particles {} and {} share a centre",
                        particles[i].id, particles[j].id
                    ))
                })?;
            }
        }
        Ok(Self {
            steps_taken: len - 1,
            box_size,
            dt,
            particles,
            rng: seeded_rng(seed),
        })
    }

    /// Advance by one step.
    pub fn step(&mut self) -> Result<StepReport> {
        let report = step(&mut self.particles, self.dt, self.box_size, &mut self.rng)?;
        self.steps_taken += 1;
        Ok(report)
    }

    /// Advance by `steps` steps and return the accumulated resolution counts.
    pub fn run(&mut self, steps: usize) -> Result<StepReport> {
        let mut total = StepReport::default();
        for _ in 0..steps {
            let report = self.step()?;
            total.elastic += report.elastic;
            total.merged += report.merged;
        }
        debug!(
            "ran {} steps (t = {}): {} elastic collisions, {} merges",
            steps,
            self.time(),
            total.elastic,
            total.merged
        );
        Ok(total)
    }

    /// Number of completed steps; every history holds `steps_taken() + 1` entries.
    pub fn steps_taken(&self) -> usize {
        self.steps_taken
    }

    /// Simulated time elapsed.
    pub fn time(&self) -> f64 {
        self.steps_taken as f64 * self.dt
    }

    /// Fixed timestep.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Edge length of the square box.
    pub fn box_size(&self) -> f64 {
        self.box_size
    }

    /// Arena size, dead particles included.
    pub fn num_particles(&self) -> usize {
        self.particles.len()
    }

    /// Read-only view of the particle arena.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Elastic collision counters in index order (diagnostic).
    pub fn collision_counts(&self) -> Vec<u64> {
        self.particles.iter().map(|p| p.collision_count()).collect()
    }

    /// Current total kinetic energy.
    pub fn kinetic_energy(&self) -> f64 {
        self.particles.iter().map(|p| p.kinetic_energy()).sum()
    }

    /// See [`thermo::total_energy`].
    pub fn total_energy(&self, step: usize) -> Result<f64> {
        thermo::total_energy(&self.particles, step)
    }

    /// See [`thermo::temperature`].
    pub fn temperature(&self, step: usize) -> Result<f64> {
        thermo::temperature(&self.particles, step)
    }

    /// See [`thermo::population`].
    pub fn population(&self, step: usize) -> Result<Population> {
        thermo::population(&self.particles, step)
    }
}

// ============ Utility helpers ============

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::seed_from_u64(rng().random()),
    }
}

fn overlaps_existing(existing: &[Particle], r: &[f64; DIM], radius: f64) -> bool {
    existing
        .iter()
        .any(|p| contact_gap(&p.position, p.radius(), r, radius) < 0.0)
}
