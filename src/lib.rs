//! Summarization of long speaker-tagged meeting transcripts with a pretrained
//! sequence-to-sequence model.

// Strict policy on unsafe and undocumented public items
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(unused_must_use)]
#![deny(nonstandard_style)]
#![forbid(unsafe_op_in_unsafe_fn)]
// Clippy discipline
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::print_stdout)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
#![deny(clippy::redundant_clone)]
#![deny(clippy::shadow_unrelated)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::float_cmp))]
#![allow(clippy::module_name_repetitions)]

/// Entry helpers for the `summarize` binary.
pub mod start_summarizer;
/// Segmenting summarizer, model capabilities and evaluation.
pub mod summarizer;
/// Transcript documents and the transcript loader.
pub mod transcript;

pub use summarizer::{
    GenerationParams, Generator, HfTokenizer, OllamaGenerator, RougeScorer, SegmentingSummarizer,
    SummarizerConfig, SummarizerError, SummarizerResult, SummaryScorer, Tokenizer,
};
pub use transcript::{Transcript, TranscriptError, TranscriptLoader, TranscriptResult};
