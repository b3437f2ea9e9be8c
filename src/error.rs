use thiserror::Error;

use crate::sim::ParticleId;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised at the edges of the simulator: constructors, arena
/// bookkeeping and configuration loading.
///
/// The numeric core (collision resolution, wall bounces, ticking) never
/// returns these; degenerate numbers propagate as NaN/inf instead.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid user or API parameter.
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// No particle with this id lives in the arena.
    #[error("unknown particle {0}")]
    UnknownParticle(ParticleId),

    /// Configuration JSON could not be parsed or produced.
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),

    /// Propagated I/O errors (config files).
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
