//! Error types for the summarization subsystem.

use thiserror::Error;

/// Summarization error type.
#[derive(Debug, Error)]
pub enum SummarizerError {
    /// Invalid configuration or unsupported values.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// Tokenizer failure (encoding, decoding or vocabulary lookup).
    #[error("tokenizer error: {0}")]
    Tokenizer(String),
    /// Completion error from the generation backend.
    #[error("completion error: {0}")]
    Completion(#[from] rig::completion::CompletionError),
    /// HTTP client error from Rig.
    #[error("http client error: {0}")]
    HttpClient(#[from] rig::http_client::Error),
    /// Caller supplied inconsistent arguments.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Regex compilation error.
    #[error("regex error: {0}")]
    Regex(#[from] regex::Error),
    /// URL parse error.
    #[error("url parse error: {0}")]
    Url(#[from] url::ParseError),
    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SummarizerError {
    /// Wrap any displayable tokenizer failure.
    #[must_use]
    pub fn tokenizer(err: impl std::fmt::Display) -> Self {
        Self::Tokenizer(err.to_string())
    }
}

/// Convenience result alias for summarization operations.
pub type SummarizerResult<T> = Result<T, SummarizerError>;
