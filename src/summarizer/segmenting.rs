//! Segmenting summarizer for conversations longer than the model window.
//!
//! Long inputs are cut into overlapping token windows, each window is
//! summarized with its share of the output budget, and the partial summaries
//! are joined with a single space. There is no cross-segment coherence pass
//! and segment cuts ignore sentence boundaries.

use std::sync::Arc;

use futures::future::try_join_all;
use tracing::debug;

use crate::summarizer::core::config::SummarizerConfig;
use crate::summarizer::core::errors::SummarizerResult;
use crate::summarizer::evaluation::{RougeScorer, ScoreMap, SummaryScorer};
use crate::summarizer::model::generator::{GenerationParams, Generator};
use crate::summarizer::model::tokenizer::Tokenizer;
use crate::summarizer::postprocess;

/// Summarizer that windows long conversations to fit the model.
pub struct SegmentingSummarizer {
    tokenizer: Arc<dyn Tokenizer>,
    generator: Arc<dyn Generator>,
    scorer: Arc<dyn SummaryScorer>,
    config: SummarizerConfig,
}

impl SegmentingSummarizer {
    /// Create a summarizer over shared model capabilities.
    ///
    /// # Errors
    /// Returns an error if the config is invalid or the default scorer cannot be built.
    pub fn new(
        tokenizer: Arc<dyn Tokenizer>,
        generator: Arc<dyn Generator>,
        config: SummarizerConfig,
    ) -> SummarizerResult<Self> {
        config.validate()?;
        Ok(Self {
            tokenizer,
            generator,
            scorer: Arc::new(RougeScorer::new()?),
            config,
        })
    }

    /// Replace the scorer used by [`Self::evaluate`].
    #[must_use]
    pub fn with_scorer(mut self, scorer: Arc<dyn SummaryScorer>) -> Self {
        self.scorer = scorer;
        self
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &SummarizerConfig {
        &self.config
    }

    /// Split a conversation into overlapping windows of at most
    /// `max_token_length` tokens.
    ///
    /// Consecutive windows share exactly `overlap` tokens. The last window may
    /// be shorter; splitting stops once a window reaches the final token.
    ///
    /// # Errors
    /// Returns an error if tokenization fails.
    pub fn split_into_segments(&self, conversation: &str) -> SummarizerResult<Vec<String>> {
        let tokens = self.tokenizer.tokenize(conversation)?;
        let window = self.config.max_token_length;
        let stride = self.config.stride();

        let mut segments = Vec::new();
        let mut start = 0;
        while start < tokens.len() {
            let end = (start + window).min(tokens.len());
            segments.push(self.tokenizer.convert_tokens_to_string(&tokens[start..end])?);
            if end == tokens.len() {
                break;
            }
            start += stride;
        }

        debug!(
            "Split {} tokens into {} segments (window={window}, overlap={})",
            tokens.len(),
            segments.len(),
            self.config.overlap
        );
        Ok(segments)
    }

    /// Summarize text that is expected to fit the model window.
    ///
    /// Longer input is truncated to `max_token_length` ids without error.
    ///
    /// # Errors
    /// Returns an error if encoding, generation or decoding fails.
    pub async fn get_summary(&self, text: &str, target_length: usize) -> SummarizerResult<String> {
        let window = self.config.max_token_length;
        let input_ids = self.tokenizer.encode(text, Some(window))?;
        if input_ids.len() == window {
            debug!("Input reached the {window}-token window and may have been truncated");
        }

        let num_segments = input_ids.len().div_ceil(window).max(1);
        let max_length = (target_length / num_segments).max(self.config.generation.min_length);
        let params = GenerationParams::from_config(&self.config.generation, max_length);

        let output_ids = self.generator.generate(&input_ids, &params).await?;
        self.tokenizer.decode(&output_ids, true)
    }

    /// Summarize a conversation of any length within `target_length` tokens.
    ///
    /// # Errors
    /// Returns an error if any tokenizer or generator call fails.
    pub async fn summarize(
        &self,
        conversation: &str,
        target_length: usize,
    ) -> SummarizerResult<String> {
        let token_count = self.tokenizer.encode(conversation, None)?.len();
        if token_count <= self.config.max_token_length {
            return self.get_summary(conversation, target_length).await;
        }

        let segments = self.split_into_segments(conversation)?;
        let per_segment = target_length / segments.len().max(1);
        debug!(
            "Summarizing {token_count} tokens as {} segments with {per_segment} tokens each",
            segments.len()
        );

        let summaries = if self.config.concurrent_segments {
            try_join_all(
                segments
                    .iter()
                    .map(|segment| self.get_summary(segment, per_segment)),
            )
            .await?
        } else {
            let mut summaries = Vec::with_capacity(segments.len());
            for segment in &segments {
                summaries.push(self.get_summary(segment, per_segment).await?);
            }
            summaries
        };

        Ok(summaries.join(" "))
    }

    /// Summarize with the configured default budget.
    ///
    /// # Errors
    /// Returns an error if any tokenizer or generator call fails.
    pub async fn summarize_default(&self, conversation: &str) -> SummarizerResult<String> {
        self.summarize(conversation, self.config.lengths.summary)
            .await
    }

    /// Summarize into at most `num_points` `"- "` prefixed lines.
    ///
    /// # Errors
    /// Returns an error if summarization fails.
    pub async fn summarize_to_points(
        &self,
        conversation: &str,
        max_length: usize,
        num_points: usize,
    ) -> SummarizerResult<String> {
        let summary = self
            .summarize(conversation, max_length.saturating_mul(num_points))
            .await?;
        Ok(postprocess::to_points(&summary, num_points))
    }

    /// Bullet points with the configured default budget and count.
    ///
    /// # Errors
    /// Returns an error if summarization fails.
    pub async fn summarize_to_points_default(&self, conversation: &str) -> SummarizerResult<String> {
        let lengths = &self.config.lengths;
        self.summarize_to_points(conversation, lengths.point, lengths.num_points)
            .await
    }

    /// Summarize into a single headline sentence.
    ///
    /// # Errors
    /// Returns an error if summarization fails.
    pub async fn summarize_to_headline(
        &self,
        conversation: &str,
        max_length: usize,
    ) -> SummarizerResult<String> {
        let summary = self.summarize(conversation, max_length).await?;
        Ok(postprocess::to_headline(&summary).to_string())
    }

    /// Headline with the configured default budget.
    ///
    /// # Errors
    /// Returns an error if summarization fails.
    pub async fn summarize_to_headline_default(&self, conversation: &str) -> SummarizerResult<String> {
        self.summarize_to_headline(conversation, self.config.lengths.headline)
            .await
    }

    /// Score summaries against references with the configured scorer.
    ///
    /// # Errors
    /// Returns an error if the scorer rejects the inputs.
    pub fn evaluate(&self, summaries: &[String], references: &[String]) -> SummarizerResult<ScoreMap> {
        self.scorer.score(summaries, references)
    }
}
