//! Error types for transcript loading.

use thiserror::Error;

/// Errors raised while loading or querying a transcript.
#[derive(Debug, Error)]
pub enum TranscriptError {
    /// A query ran before any transcript was read.
    #[error("transcript not loaded; call read_transcript first")]
    NotLoaded,

    /// The transcript has no precomputed query answers.
    #[error("transcript has no general query answers")]
    MissingReferenceSummary,

    /// File could not be opened or read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// File content is not a valid transcript document.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience result alias for transcript operations.
pub type TranscriptResult<T> = Result<T, TranscriptError>;
