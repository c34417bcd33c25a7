//! Configuration for the summarization subsystem.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::summarizer::core::errors::{SummarizerError, SummarizerResult};

/// Default model input window in tokens.
pub const DEFAULT_MAX_TOKEN_LENGTH: usize = 1024;
/// Default overlap between consecutive segments in tokens.
pub const DEFAULT_OVERLAP: usize = 10;
/// Floor applied to every per-call output budget.
pub const DEFAULT_MIN_LENGTH: usize = 30;

/// Top-level configuration for the segmenting summarizer.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizerConfig {
    /// Maximum number of tokens the model accepts in one call.
    pub max_token_length: usize,
    /// Tokens shared between consecutive segments.
    pub overlap: usize,
    /// Dispatch segment summaries concurrently instead of one after another.
    pub concurrent_segments: bool,
    /// Beam search settings.
    pub generation: GenerationConfig,
    /// Default output budgets.
    pub lengths: SummaryLengths,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            max_token_length: DEFAULT_MAX_TOKEN_LENGTH,
            overlap: DEFAULT_OVERLAP,
            concurrent_segments: false,
            generation: GenerationConfig::default(),
            lengths: SummaryLengths::default(),
        }
    }
}

impl SummarizerConfig {
    /// Create a new config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the model input window.
    #[must_use]
    pub const fn with_max_token_length(mut self, max_token_length: usize) -> Self {
        self.max_token_length = max_token_length;
        self
    }

    /// Set the segment overlap.
    #[must_use]
    pub const fn with_overlap(mut self, overlap: usize) -> Self {
        self.overlap = overlap;
        self
    }

    /// Enable or disable concurrent segment dispatch.
    #[must_use]
    pub const fn with_concurrent_segments(mut self, enabled: bool) -> Self {
        self.concurrent_segments = enabled;
        self
    }

    /// Replace the generation settings.
    #[must_use]
    pub const fn with_generation(mut self, generation: GenerationConfig) -> Self {
        self.generation = generation;
        self
    }

    /// Load a config from a JSON file. Missing fields fall back to defaults.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or fails validation.
    pub fn from_json_file(path: impl AsRef<Path>) -> SummarizerResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Distance between the starts of consecutive segments.
    #[must_use]
    pub const fn stride(&self) -> usize {
        self.max_token_length.saturating_sub(self.overlap)
    }

    /// Validate configuration invariants.
    ///
    /// # Errors
    /// Returns an error if any values are out of range.
    pub fn validate(&self) -> SummarizerResult<()> {
        if self.max_token_length == 0 {
            return Err(SummarizerError::InvalidConfig(
                "max_token_length must be > 0".to_string(),
            ));
        }

        if self.overlap >= self.max_token_length {
            return Err(SummarizerError::InvalidConfig(format!(
                "overlap ({}) must be < max_token_length ({})",
                self.overlap, self.max_token_length
            )));
        }

        if self.generation.num_beams == 0 {
            return Err(SummarizerError::InvalidConfig(
                "generation.num_beams must be > 0".to_string(),
            ));
        }

        if self.lengths.num_points == 0 {
            return Err(SummarizerError::InvalidConfig(
                "lengths.num_points must be > 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Beam search settings passed to the generator on every call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Minimum generated length, also the floor for per-call budgets.
    pub min_length: usize,
    /// Beam width.
    pub num_beams: usize,
    /// Exponential length penalty used by beam scoring.
    pub length_penalty: f32,
    /// Stop beams as soon as enough finished candidates exist.
    pub early_stopping: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_MIN_LENGTH,
            num_beams: 4,
            length_penalty: 2.0,
            early_stopping: true,
        }
    }
}

/// Default output budgets for each summary shape.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryLengths {
    /// Budget for a plain summary.
    pub summary: usize,
    /// Budget per bullet point.
    pub point: usize,
    /// Number of bullet points.
    pub num_points: usize,
    /// Budget for a headline.
    pub headline: usize,
}

impl Default for SummaryLengths {
    fn default() -> Self {
        Self {
            summary: 150,
            point: 50,
            num_points: 3,
            headline: 30,
        }
    }
}

/// Completion model settings for the Ollama generator.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Ollama completion model name.
    pub model: String,
    /// Temperature for generation.
    pub temperature: f64,
    /// Optional custom base URL.
    pub base_url: Option<String>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "mistral:7b-instruct-q8_0".to_string(),
            temperature: 0.0,
            base_url: None,
        }
    }
}

impl LlmConfig {
    /// Validate configuration invariants.
    ///
    /// # Errors
    /// Returns an error if the base URL does not parse or the temperature is negative.
    pub fn validate(&self) -> SummarizerResult<()> {
        if self.model.trim().is_empty() {
            return Err(SummarizerError::InvalidConfig(
                "llm.model must not be empty".to_string(),
            ));
        }

        if self.temperature < 0.0 {
            return Err(SummarizerError::InvalidConfig(
                "llm.temperature must be >= 0".to_string(),
            ));
        }

        if let Some(base_url) = &self.base_url {
            Url::parse(base_url)?;
        }

        Ok(())
    }
}

/// Locations of the model artifacts used by the binary.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Path to a Hugging Face `tokenizer.json`.
    pub tokenizer_path: PathBuf,
    /// Completion model settings.
    pub llm: LlmConfig,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            tokenizer_path: PathBuf::from("tokenizer.json"),
            llm: LlmConfig::default(),
        }
    }
}
