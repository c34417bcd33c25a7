//! Core summarizer configuration and errors.

pub mod config;
pub mod errors;

pub use config::{
    BackendConfig, GenerationConfig, LlmConfig, SummarizerConfig, SummaryLengths,
    DEFAULT_MAX_TOKEN_LENGTH, DEFAULT_MIN_LENGTH, DEFAULT_OVERLAP,
};
pub use errors::{SummarizerError, SummarizerResult};
