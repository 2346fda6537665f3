use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the kinetics core and its configuration layer.
///
/// Every fallible operation returns one of these instead of panicking, so a bad
/// parameter or a degenerate collision surfaces as a value the caller can act on.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid user or API parameter.
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// Numerical or geometric issue (e.g., coincident centres in a pairwise collision).
    #[error("numerical error: {0}")]
    MathError(String),

    /// Rejection sampling could not find a free spot for a particle.
    #[error(
        "cannot pack particles: particle {id} found no collision-free position after {attempts} attempts; try fewer particles, a smaller radius or a larger box"
    )]
    PackingFailed { id: u32, attempts: usize },

    /// A derived view asked for a history index past the recorded trajectory.
    #[error("step index {step} out of range (history holds {len} entries)")]
    StepOutOfRange { step: usize, len: usize },

    /// Malformed YAML scenario.
    #[error(transparent)]
    Config(#[from] serde_yaml::Error),

    /// Propagated I/O errors (e.g., reading a scenario file).
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
