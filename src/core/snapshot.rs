use super::particle::DIM;

/// Chemical species of a particle.
///
/// Every particle starts as `A`. The survivor of a reactive A+A merge becomes `B`,
/// and `B` is terminal: nothing turns it back into `A`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Species {
    /// Reactive precursor.
    #[default]
    A,
    /// Inert merge product.
    B,
}

impl Species {
    /// Hex colour used by renderers for this species.
    pub fn color(self) -> &'static str {
        match self {
            Species::A => "#96C3EB",
            Species::B => "#9A32CD",
        }
    }

    /// Compact numeric code (A = 0, B = 1) for array exports.
    pub fn code(self) -> u8 {
        match self {
            Species::A => 0,
            Species::B => 1,
        }
    }

    /// True for the merge product.
    #[inline]
    pub fn is_product(self) -> bool {
        matches!(self, Species::B)
    }
}

/// One history entry: the state of a particle at the end of a completed step
/// (index 0 holds the initial state).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    pub position: [f64; DIM],
    pub velocity: [f64; DIM],
    /// |velocity| at the time of recording.
    pub speed: f64,
    pub species: Species,
    pub alive: bool,
}

impl Snapshot {
    pub(crate) fn record(
        position: [f64; DIM],
        velocity: [f64; DIM],
        species: Species,
        alive: bool,
    ) -> Self {
        let speed = (velocity[0] * velocity[0] + velocity[1] * velocity[1]).sqrt();
        Self {
            position,
            velocity,
            speed,
            species,
            alive,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn species_defaults_to_precursor() {
        assert_eq!(Species::default(), Species::A);
        assert!(!Species::A.is_product());
        assert!(Species::B.is_product());
    }

    #[test]
    fn species_codes_and_colors() {
        assert_eq!(Species::A.code(), 0);
        assert_eq!(Species::B.code(), 1);
        assert_eq!(Species::A.color(), "#96C3EB");
        assert_eq!(Species::B.color(), "#9A32CD");
    }

    #[test]
    fn record_computes_speed() {
        let s = Snapshot::record([1.0, 2.0], [3.0, -4.0], Species::A, true);
        assert!((s.speed - 5.0).abs() < 1e-12);
        assert_eq!(s.position, [1.0, 2.0]);
        assert!(s.alive);
    }
}
