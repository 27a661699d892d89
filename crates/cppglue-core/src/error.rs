//! Error types for reading AST Provider output.

use thiserror::Error;

/// Result type alias for sighting operations
pub type SightingResult<T> = Result<T, SightingError>;

/// Errors raised while loading a sightings document.
#[derive(Debug, Error)]
pub enum SightingError {
    /// The document could not be read.
    #[error("failed to read sightings from {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid sightings JSON.
    #[error("malformed sightings document: {0}")]
    Malformed(#[from] serde_json::Error),
}
