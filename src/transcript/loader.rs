//! Transcript file loading and per-speaker extraction.

use std::path::Path;

use tracing::debug;

use crate::transcript::error::{TranscriptError, TranscriptResult};
use crate::transcript::model::Transcript;

/// Loads a transcript file and answers speaker queries against it.
#[derive(Clone, Debug, Default)]
pub struct TranscriptLoader {
    transcript: Option<Transcript>,
}

impl TranscriptLoader {
    /// Create a loader with no transcript.
    #[must_use]
    pub const fn new() -> Self {
        Self { transcript: None }
    }

    /// Create a loader and immediately read `path`.
    ///
    /// # Errors
    /// Returns an error if the file is missing or malformed.
    pub fn open(path: impl AsRef<Path>) -> TranscriptResult<Self> {
        let mut loader = Self::new();
        loader.read_transcript(path)?;
        Ok(loader)
    }

    /// Read a transcript file, replacing any previously loaded one.
    ///
    /// # Errors
    /// Returns an error if the file is missing or malformed. The previous
    /// transcript is kept on failure.
    pub fn read_transcript(&mut self, path: impl AsRef<Path>) -> TranscriptResult<()> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let transcript: Transcript = serde_json::from_str(&raw)?;
        debug!(
            "Loaded transcript {} with {} utterances",
            path.display(),
            transcript.meeting_transcripts.len()
        );
        self.transcript = Some(transcript);
        Ok(())
    }

    /// The loaded transcript, if any.
    #[must_use]
    pub const fn transcript(&self) -> Option<&Transcript> {
        self.transcript.as_ref()
    }

    fn loaded(&self) -> TranscriptResult<&Transcript> {
        self.transcript.as_ref().ok_or(TranscriptError::NotLoaded)
    }

    /// Distinct speakers in order of first appearance.
    ///
    /// # Errors
    /// Returns [`TranscriptError::NotLoaded`] if no transcript was read.
    pub fn identify_speakers(&self) -> TranscriptResult<Vec<String>> {
        Ok(self.loaded()?.speakers())
    }

    /// Everything `speaker` said, space-joined in order. Empty for unknown speakers.
    ///
    /// # Errors
    /// Returns [`TranscriptError::NotLoaded`] if no transcript was read.
    pub fn get_conversation_of(&self, speaker: &str) -> TranscriptResult<String> {
        Ok(self.loaded()?.conversation_of(speaker))
    }

    /// The whole meeting, space-joined in order.
    ///
    /// # Errors
    /// Returns [`TranscriptError::NotLoaded`] if no transcript was read.
    pub fn get_meeting_conversation(&self) -> TranscriptResult<String> {
        Ok(self.loaded()?.full_conversation())
    }

    /// The first general query answer, used as the reference summary.
    ///
    /// # Errors
    /// Returns [`TranscriptError::NotLoaded`] if no transcript was read, or
    /// [`TranscriptError::MissingReferenceSummary`] if the answer list is empty.
    pub fn get_meeting_summary(&self) -> TranscriptResult<String> {
        self.loaded()?
            .reference_summary()
            .map(str::to_string)
            .ok_or(TranscriptError::MissingReferenceSummary)
    }
}
