use super::snapshot::{Snapshot, Species};
use crate::error::{Error, Result};
use rand::Rng;

/// Fixed spatial dimension (2D).
pub const DIM: usize = 2;

/// Contact fires at this multiple of the summed radii to make up for discrete stepping.
pub const CONTACT_MARGIN: f64 = 1.1;

/// Centre separations below this are treated as coincident.
const MIN_SEPARATION: f64 = 1e-12;

/// What a pairwise resolution did to the two participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionOutcome {
    /// The pair was not resolved this step (dead participant or not approaching in time).
    Missed,
    /// Mass-weighted elastic impulse exchange along the line of centres.
    Elastic,
    /// Reactive A+A merge: the caller survives as `B`, the partner dies.
    Merged,
}

/// A gas-phase disk in D=2.
///
/// Kinematic state (`position`, `velocity`) is public; mass, radius, species and the
/// alive flag only change through [`Particle::resolve_collision`] so that the
/// merge invariants (growth only, `A -> B` only, dead stays dead) hold.
#[derive(Debug, Clone)]
pub struct Particle {
    /// Stable particle identifier (index in the driver's collection).
    pub id: u32,
    /// Position (x, y).
    pub position: [f64; DIM],
    /// Velocity (vx, vy).
    pub velocity: [f64; DIM],
    radius: f64,
    mass: f64,
    reactivity: f64,
    species: Species,
    alive: bool,
    collision_count: u64,
    history: Vec<Snapshot>,
}

impl Particle {
    /// Create a new species-`A` particle after validating invariants. The initial
    /// state is recorded as history entry 0.
    ///
    /// Errors:
    /// - `Error::InvalidParam` if `radius` or `mass` is non-positive, `reactivity` lies
    ///   outside [0, 1], or any component is NaN/inf.
    pub fn new(
        id: u32,
        position: [f64; DIM],
        velocity: [f64; DIM],
        radius: f64,
        mass: f64,
        reactivity: f64,
    ) -> Result<Self> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(Error::InvalidParam("radius must be finite and > 0".into()));
        }
        if !mass.is_finite() || mass <= 0.0 {
            return Err(Error::InvalidParam("mass must be finite and > 0".into()));
        }
        if !(0.0..=1.0).contains(&reactivity) {
            return Err(Error::InvalidParam("reactivity must lie in [0, 1]".into()));
        }
        if !position.iter().all(|x| x.is_finite()) {
            return Err(Error::InvalidParam("position must be finite".into()));
        }
        if !velocity.iter().all(|x| x.is_finite()) {
            return Err(Error::InvalidParam("velocity must be finite".into()));
        }
        let species = Species::A;
        Ok(Self {
            id,
            position,
            velocity,
            radius,
            mass,
            reactivity,
            species,
            alive: true,
            collision_count: 0,
            history: vec![Snapshot::record(position, velocity, species, true)],
        })
    }

    /// Current radius; grows only when this particle survives a merge.
    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Current mass; grows only when this particle survives a merge.
    #[inline]
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Reactivity in [0, 1], averaged with the partner's on contact.
    #[inline]
    pub fn reactivity(&self) -> f64 {
        self.reactivity
    }

    /// Current species (`A` until this particle survives a merge).
    #[inline]
    pub fn species(&self) -> Species {
        self.species
    }

    /// False once the particle has been consumed by a merge.
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Number of elastic resolutions this particle took part in (diagnostic).
    #[inline]
    pub fn collision_count(&self) -> u64 {
        self.collision_count
    }

    /// Full trajectory, one entry per completed step plus the initial state.
    #[inline]
    pub fn history(&self) -> &[Snapshot] {
        &self.history
    }

    /// Current |velocity|.
    #[inline]
    pub fn speed(&self) -> f64 {
        dot(self.velocity, self.velocity).sqrt()
    }

    /// Returns the particle's kinetic energy: 1/2 m |v|^2.
    #[inline]
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * dot(self.velocity, self.velocity)
    }

    #[inline]
    fn bump_collision_count(&mut self) {
        self.collision_count = self.collision_count.saturating_add(1);
    }

    /// Look-ahead wall reflection inside the square box `[0, box_size]^2`.
    ///
    /// Per axis, if the gap to either wall (minus the radius) is smaller than the
    /// distance the particle would cover next step, the velocity component flips.
    /// Positions are never clamped. Dead particles keep their frozen velocity.
    pub fn reflect_walls(&mut self, dt: f64, box_size: f64) {
        if !self.alive {
            return;
        }
        for k in 0..DIM {
            let reach = dt * self.velocity[k].abs();
            let x = self.position[k];
            if x.abs() - self.radius < reach || (box_size - x).abs() - self.radius < reach {
                self.velocity[k] = -self.velocity[k];
            }
        }
    }

    /// Proximity test: both alive and centres closer than `CONTACT_MARGIN` times the
    /// summed radii.
    pub fn is_colliding(&self, other: &Particle) -> bool {
        self.alive
            && other.alive
            && contact_gap(&self.position, self.radius, &other.position, other.radius) < 0.0
    }

    /// Look-ahead resolution test: the contact gap is smaller than `dt` times the
    /// relative velocity projected on the line of centres.
    ///
    /// Errors: `Error::MathError` for coincident centres.
    pub fn approaches_within(&self, other: &Particle, dt: f64) -> Result<bool> {
        let d = sub(other.position, self.position);
        let dist = separation(d)?;
        let reach = dt * dot(sub(self.velocity, other.velocity), d).abs() / dist;
        Ok(dist - (self.radius + other.radius) * CONTACT_MARGIN < reach)
    }

    /// Resolve a possible collision with `other` during a step of size `dt`.
    ///
    /// Nothing happens unless both particles are alive and the look-ahead test holds;
    /// only then is one uniform draw in [0, 1) taken from `rng` and handed to
    /// [`Particle::apply_collision`].
    pub fn resolve_collision<R: Rng + ?Sized>(
        &mut self,
        other: &mut Particle,
        dt: f64,
        rng: &mut R,
    ) -> Result<CollisionOutcome> {
        if !self.alive || !other.alive {
            return Ok(CollisionOutcome::Missed);
        }
        if !self.approaches_within(other, dt)? {
            return Ok(CollisionOutcome::Missed);
        }
        let react: f64 = rng.random();
        self.apply_collision(other, react)
    }

    /// Apply the collision rule for a given reaction draw `react`.
    ///
    /// The elastic and reactive branches are two independent checks, both working
    /// from the pre-collision state:
    /// - elastic when the mean reactivity is below `react` or either side is `B`;
    /// - reactive merge when the mean reactivity is at least `react` and both are `A`.
    ///
    /// If both were ever to hold, the merge's absolute velocity overrides the elastic
    /// update and `Merged` is reported. All new values are computed before either
    /// particle is written.
    pub fn apply_collision(&mut self, other: &mut Particle, react: f64) -> Result<CollisionOutcome> {
        if !self.alive || !other.alive {
            return Ok(CollisionOutcome::Missed);
        }
        let d = sub(other.position, self.position);
        let dist = separation(d)?;

        let (m1, m2) = (self.mass, other.mass);
        let (r1, r2) = (self.radius, other.radius);
        let (v1, v2) = (self.velocity, other.velocity);
        let mean_reactivity = (self.reactivity + other.reactivity) / 2.0;
        let mut outcome = CollisionOutcome::Missed;

        if mean_reactivity < react || self.species.is_product() || other.species.is_product() {
            let d2 = dist.powi(2);
            let back = [-d[0], -d[1]];
            let k1 = 2.0 * m2 / (m1 + m2) * dot(sub(v1, v2), d) / d2;
            let k2 = 2.0 * m1 / (m2 + m1) * dot(sub(v2, v1), back) / d2;
            self.velocity = [v1[0] - k1 * d[0], v1[1] - k1 * d[1]];
            other.velocity = [v2[0] - k2 * back[0], v2[1] - k2 * back[1]];
            self.bump_collision_count();
            other.bump_collision_count();
            outcome = CollisionOutcome::Elastic;
        }

        if mean_reactivity >= react && self.species == Species::A && other.species == Species::A {
            let m = m1 + m2;
            self.species = Species::B;
            self.mass = m;
            self.radius = (r1.powi(2) + r2.powi(2)).sqrt();
            self.velocity = [
                (m1 * v1[0] + m2 * v2[0]) / m,
                (m1 * v1[1] + m2 * v2[1]) / m,
            ];
            other.alive = false;
            outcome = CollisionOutcome::Merged;
        }

        Ok(outcome)
    }

    /// Integrate one step (`position += dt * velocity`) and append a history entry.
    /// Runs for dead particles too so every trajectory has the same length.
    pub fn advance(&mut self, dt: f64) {
        for k in 0..DIM {
            self.position[k] += dt * self.velocity[k];
        }
        self.history.push(Snapshot::record(
            self.position,
            self.velocity,
            self.species,
            self.alive,
        ));
    }
}

// ============ Utility helpers ============

#[inline]
pub(crate) fn dot(a: [f64; DIM], b: [f64; DIM]) -> f64 {
    a[0] * b[0] + a[1] * b[1]
}

#[inline]
fn sub(a: [f64; DIM], b: [f64; DIM]) -> [f64; DIM] {
    [a[0] - b[0], a[1] - b[1]]
}

/// Centre distance minus the margin-scaled summed radii; negative means contact.
#[inline]
pub(crate) fn contact_gap(a: &[f64; DIM], ra: f64, b: &[f64; DIM], rb: f64) -> f64 {
    dot(sub(*b, *a), sub(*b, *a)).sqrt() - (ra + rb) * CONTACT_MARGIN
}

/// Errors with `MathError` if two alive particles share (nearly) the same centre.
pub(crate) fn ensure_distinct(a: &Particle, b: &Particle) -> Result<()> {
    if a.alive && b.alive {
        separation(sub(b.position, a.position))?;
    }
    Ok(())
}

fn separation(d: [f64; DIM]) -> Result<f64> {
    let dist = dot(d, d).sqrt();
    if !dist.is_finite() || dist <= MIN_SEPARATION {
        return Err(Error::MathError(
            "coincident particle centres in pairwise collision".into(),
        ));
    }
    Ok(dist)
}
