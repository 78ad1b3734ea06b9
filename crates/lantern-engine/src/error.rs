//! Error types for the rule engine.

use thiserror::Error;

use lantern_core::{ArtifactId, CoreError};

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that prevent a session from being created.
///
/// Once a session exists, every command produces a plain response string.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The world could not be loaded.
    #[error(transparent)]
    Load(#[from] CoreError),

    /// A session was asked to start somewhere that is not an area.
    #[error("cannot start in \"{0}\": not an area")]
    InvalidStart(ArtifactId),
}
