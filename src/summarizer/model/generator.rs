//! Generative model capability and its Ollama backend.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use reqwest::Client as ReqwestClient;
use rig::client::{CompletionClient, Nothing};
use rig::completion::CompletionModel;
use rig::message::AssistantContent;
use rig::providers::ollama;
use tracing::{debug, warn};

use crate::summarizer::core::config::{GenerationConfig, LlmConfig};
use crate::summarizer::core::errors::{SummarizerError, SummarizerResult};
use crate::summarizer::model::tokenizer::Tokenizer;

/// Boxed future type for generator operations.
pub type GenerateFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Decoding parameters for a single generation call.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationParams {
    /// Maximum generated length in tokens.
    pub max_length: usize,
    /// Minimum generated length in tokens.
    pub min_length: usize,
    /// Exponential length penalty for beam scoring.
    pub length_penalty: f32,
    /// Beam width.
    pub num_beams: usize,
    /// Stop once `num_beams` finished candidates exist.
    pub early_stopping: bool,
}

impl GenerationParams {
    /// Build parameters for one call from the configured beam settings.
    #[must_use]
    pub const fn from_config(config: &GenerationConfig, max_length: usize) -> Self {
        Self {
            max_length,
            min_length: config.min_length,
            length_penalty: config.length_penalty,
            num_beams: config.num_beams,
            early_stopping: config.early_stopping,
        }
    }
}

/// Trait abstraction over sequence-to-sequence generators.
pub trait Generator: Send + Sync {
    /// Generate output ids for the given input ids.
    ///
    /// # Errors
    /// Returns an error if the backend call fails.
    fn generate<'a>(
        &'a self,
        input_ids: &'a [u32],
        params: &'a GenerationParams,
    ) -> GenerateFuture<'a, SummarizerResult<Vec<u32>>>;
}

/// System prompt for the Ollama-backed generator.
const SUMMARY_SYSTEM_PROMPT: &str = "You summarize meeting conversations. \
Write plain declarative sentences separated by '. '. \
Do not use lists, headings or quotation marks. \
Only use facts stated in the conversation.";

/// Generator that prompts an Ollama completion model through Rig.
///
/// Ollama works on text, so input ids are decoded with the shared tokenizer
/// and the answer is re-encoded and clamped to `max_length` ids. Beam
/// settings have no Ollama equivalent and are ignored.
pub struct OllamaGenerator {
    model: ollama::CompletionModel,
    tokenizer: Arc<dyn Tokenizer>,
    temperature: f64,
}

impl OllamaGenerator {
    /// Create a new Ollama generator from config.
    ///
    /// # Errors
    /// Returns an error if the config is invalid or the client cannot be built.
    pub fn new(config: &LlmConfig, tokenizer: Arc<dyn Tokenizer>) -> SummarizerResult<Self> {
        config.validate()?;
        let builder = ollama::Client::<ReqwestClient>::builder().api_key(Nothing);
        let builder = if let Some(base_url) = &config.base_url {
            builder.base_url(base_url)
        } else {
            builder
        };
        let client = builder.build().map_err(SummarizerError::from)?;
        let model = client.completion_model(config.model.clone());

        Ok(Self {
            model,
            tokenizer,
            temperature: config.temperature,
        })
    }
}

impl Generator for OllamaGenerator {
    fn generate<'a>(
        &'a self,
        input_ids: &'a [u32],
        params: &'a GenerationParams,
    ) -> GenerateFuture<'a, SummarizerResult<Vec<u32>>> {
        Box::pin(async move {
            if params.num_beams > 1 {
                warn!(
                    num_beams = params.num_beams,
                    "Ollama has no beam search, decoding greedily"
                );
            }

            let conversation = self.tokenizer.decode(input_ids, true)?;
            let prompt = format!(
                "Summarize the following conversation in at least {} and at most {} tokens:\n\n{conversation}",
                params.min_length, params.max_length
            );

            debug!(
                "Generating summary for {} input ids (max_length={})",
                input_ids.len(),
                params.max_length
            );

            let request = self
                .model
                .completion_request(prompt)
                .preamble(SUMMARY_SYSTEM_PROMPT.to_string())
                .temperature(self.temperature)
                .max_tokens_opt(u64::try_from(params.max_length).ok())
                .build();

            let response = self.model.completion(request).await?;
            let text = extract_text(&response.choice);
            let mut ids = self.tokenizer.encode(text.trim(), None)?;
            ids.truncate(params.max_length);
            Ok(ids)
        })
    }
}

/// Extract text from assistant response.
fn extract_text(choice: &rig::OneOrMany<AssistantContent>) -> String {
    let mut out = String::new();
    for content in choice.iter() {
        if let AssistantContent::Text(text) = content {
            out.push_str(&text.text);
        }
    }
    out
}
