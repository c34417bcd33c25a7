//! Structured meeting transcripts.
//!
//! Reads `meeting_transcripts` / `general_query_list` JSON documents and
//! extracts per-speaker or whole-meeting text for summarization.

pub mod error;
pub mod loader;
pub mod model;

pub use error::{TranscriptError, TranscriptResult};
pub use loader::TranscriptLoader;
pub use model::{QueryAnswer, Transcript, Utterance};
