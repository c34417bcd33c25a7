//! Startup helpers for the `summarize` binary.
//!
//! Wires the Hugging Face tokenizer and the Ollama generator into a
//! [`SegmentingSummarizer`] and runs every summary shape over one transcript.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::summarizer::core::config::{BackendConfig, SummarizerConfig};
use crate::summarizer::evaluation::ScoreMap;
use crate::summarizer::model::{Generator, HfTokenizer, OllamaGenerator, Tokenizer};
use crate::summarizer::segmenting::SegmentingSummarizer;
use crate::transcript::{TranscriptError, TranscriptLoader};

/// Environment variable for a custom Ollama URL.
pub const OLLAMA_URL_ENV: &str = "SUMMARIZER_OLLAMA_URL";
/// Environment variable for the Ollama model name.
pub const MODEL_ENV: &str = "SUMMARIZER_MODEL";
/// Environment variable for the `tokenizer.json` path.
pub const TOKENIZER_ENV: &str = "SUMMARIZER_TOKENIZER";
/// Environment variable for an optional summarizer config JSON file.
pub const CONFIG_ENV: &str = "SUMMARIZER_CONFIG";

/// Initialize tracing from `RUST_LOG`, falling back to `info` when unset or invalid.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .try_init();
}

fn env_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|raw| !raw.trim().is_empty())
        .and_then(|raw| EnvFilter::try_new(raw).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// Build the backend config from defaults and environment overrides.
#[must_use]
pub fn backend_config_from_env() -> BackendConfig {
    let mut config = BackendConfig::default();
    if let Ok(url) = std::env::var(OLLAMA_URL_ENV) {
        config.llm.base_url = Some(url);
    }
    if let Ok(model) = std::env::var(MODEL_ENV) {
        config.llm.model = model;
    }
    if let Ok(path) = std::env::var(TOKENIZER_ENV) {
        config.tokenizer_path = PathBuf::from(path);
    }
    config
}

/// Load the summarizer config from `SUMMARIZER_CONFIG`, or use defaults.
///
/// # Errors
/// Returns an error if the configured file cannot be read or is invalid.
pub fn summarizer_config_from_env() -> anyhow::Result<SummarizerConfig> {
    match std::env::var(CONFIG_ENV) {
        Ok(path) => SummarizerConfig::from_json_file(&path)
            .with_context(|| format!("failed to load summarizer config from {path}")),
        Err(_) => Ok(SummarizerConfig::default()),
    }
}

/// Every summary shape produced for one conversation.
#[derive(Clone, Debug, Serialize)]
pub struct SummaryReport {
    /// Speaker whose speech was summarized, or `None` for the whole meeting.
    pub speaker: Option<String>,
    /// Distinct speakers found in the transcript.
    pub speakers: Vec<String>,
    /// Plain summary.
    pub summary: String,
    /// Single-sentence headline.
    pub headline: String,
    /// Bulleted key points.
    pub points: String,
    /// ROUGE scores of the plain summary against the transcript's reference.
    pub scores: Option<ScoreMap>,
}

/// Build a summarizer over the configured backends.
///
/// # Errors
/// Returns an error if the tokenizer cannot be loaded or a config is invalid.
pub fn build_summarizer(
    backend: &BackendConfig,
    config: SummarizerConfig,
) -> anyhow::Result<SegmentingSummarizer> {
    let tokenizer: Arc<dyn Tokenizer> = Arc::new(
        HfTokenizer::from_file(&backend.tokenizer_path).with_context(|| {
            format!(
                "failed to load tokenizer from {}",
                backend.tokenizer_path.display()
            )
        })?,
    );
    let generator: Arc<dyn Generator> =
        Arc::new(OllamaGenerator::new(&backend.llm, Arc::clone(&tokenizer))?);
    Ok(SegmentingSummarizer::new(tokenizer, generator, config)?)
}

/// Summarize a transcript file, for one speaker or the whole meeting.
///
/// # Errors
/// Returns an error if the transcript cannot be loaded or any model call fails.
pub async fn summarize_transcript(
    summarizer: &SegmentingSummarizer,
    transcript_path: &Path,
    speaker: Option<&str>,
) -> anyhow::Result<SummaryReport> {
    let loader = TranscriptLoader::open(transcript_path)
        .with_context(|| format!("failed to load {}", transcript_path.display()))?;
    let speakers = loader.identify_speakers()?;
    let conversation = match speaker {
        Some(name) => loader.get_conversation_of(name)?,
        None => loader.get_meeting_conversation()?,
    };

    info!(
        "Summarizing {} ({} speakers, {} chars)",
        speaker.unwrap_or("whole meeting"),
        speakers.len(),
        conversation.len()
    );

    let summary = summarizer.summarize_default(&conversation).await?;
    let headline = summarizer
        .summarize_to_headline_default(&conversation)
        .await?;
    let points = summarizer.summarize_to_points_default(&conversation).await?;

    let scores = match loader.get_meeting_summary() {
        Ok(reference) if speaker.is_none() => {
            Some(summarizer.evaluate(&[summary.clone()], &[reference])?)
        }
        Ok(_) | Err(TranscriptError::MissingReferenceSummary) => None,
        Err(err) => return Err(err.into()),
    };

    Ok(SummaryReport {
        speaker: speaker.map(str::to_string),
        speakers,
        summary,
        headline,
        points,
        scores,
    })
}
