//! Conversation summarization over a pretrained sequence-to-sequence model.
//!
//! - `core`: configuration and errors
//! - `model`: tokenizer and generator capabilities with concrete backends
//! - `segmenting`: window splitting, budget allocation and stitching
//! - `postprocess`: headline and bullet point shaping
//! - `evaluation`: ROUGE scoring against reference summaries

pub mod core;
pub mod evaluation;
pub mod model;
pub mod postprocess;
pub mod segmenting;

pub use self::core::{
    BackendConfig, GenerationConfig, LlmConfig, SummarizerConfig, SummarizerError,
    SummarizerResult, SummaryLengths,
};
pub use evaluation::{RougeScore, RougeScorer, ScoreMap, SummaryScorer};
pub use model::{GenerationParams, Generator, HfTokenizer, OllamaGenerator, Tokenizer};
pub use segmenting::SegmentingSummarizer;
