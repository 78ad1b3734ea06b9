use std::path::PathBuf;

use crate::artifact::{ArtifactId, ArtifactKind};

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that abort construction of a game state.
///
/// Problems that only affect a single trigger, interaction, or containment
/// reference are logged and skipped instead; they never surface here.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Two artifacts share the same identifier.
    #[error("duplicate artifact id: \"{0}\"")]
    DuplicateId(ArtifactId),

    /// The declared start area is not among the loaded artifacts.
    #[error("start area not found: \"{0}\"")]
    MissingStartArea(ArtifactId),

    /// An artifact referenced as an area has another kind.
    #[error("artifact \"{id}\" is not an area (found {found})")]
    NotAnArea {
        /// The offending artifact id.
        id: ArtifactId,
        /// The kind the artifact actually has.
        found: ArtifactKind,
    },

    /// A textual key (interaction or trigger) could not be parsed.
    #[error("malformed key \"{key}\": {reason}")]
    MalformedKey {
        /// The raw key text.
        key: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A property name is not one the engine knows.
    #[error("unknown property: \"{0}\"")]
    UnknownProperty(String),

    /// The world document is not valid JSON for the expected layout.
    #[error("invalid world document: {0}")]
    Json(#[from] serde_json::Error),

    /// The world document could not be read from disk.
    #[error("cannot read {path}: {source}")]
    Io {
        /// The path that failed.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}
