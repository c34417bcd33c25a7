//! Transcript document model.

use serde::{Deserialize, Serialize};

/// A single speaker turn.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Utterance {
    /// Speaker identifier.
    pub speaker: String,
    /// Spoken text.
    pub content: String,
}

impl Utterance {
    /// Build an utterance.
    #[must_use]
    pub fn new(speaker: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            content: content.into(),
        }
    }
}

/// A precomputed question and answer about the meeting.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct QueryAnswer {
    /// Question text, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Reference answer.
    pub answer: String,
}

/// A meeting transcript with its reference query answers.
///
/// Other top-level fields found in meeting corpora (topic lists, specific
/// queries) are ignored on load.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    /// Utterances in spoken order.
    pub meeting_transcripts: Vec<Utterance>,
    /// General questions about the whole meeting.
    pub general_query_list: Vec<QueryAnswer>,
}

impl Transcript {
    /// Distinct speakers in order of first appearance.
    #[must_use]
    pub fn speakers(&self) -> Vec<String> {
        let mut speakers: Vec<String> = Vec::new();
        for utterance in &self.meeting_transcripts {
            if !speakers.contains(&utterance.speaker) {
                speakers.push(utterance.speaker.clone());
            }
        }
        speakers
    }

    /// Contents of one speaker's utterances, space-joined in order.
    #[must_use]
    pub fn conversation_of(&self, speaker: &str) -> String {
        self.meeting_transcripts
            .iter()
            .filter(|utterance| utterance.speaker == speaker)
            .map(|utterance| utterance.content.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Contents of every utterance, space-joined in order.
    #[must_use]
    pub fn full_conversation(&self) -> String {
        self.meeting_transcripts
            .iter()
            .map(|utterance| utterance.content.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// First general query answer, if any.
    #[must_use]
    pub fn reference_summary(&self) -> Option<&str> {
        self.general_query_list
            .first()
            .map(|entry| entry.answer.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ignores_unknown_fields() {
        let raw = r#"{
            "topic_list": [{"topic": "Budget"}],
            "meeting_transcripts": [{"speaker": "PM", "content": "Okay."}],
            "general_query_list": [{"query": "Summarize", "answer": "Short."}],
            "specific_query_list": []
        }"#;
        let transcript: Transcript = serde_json::from_str(raw).unwrap();
        assert_eq!(transcript.meeting_transcripts[0], Utterance::new("PM", "Okay."));
        assert_eq!(transcript.general_query_list[0].query.as_deref(), Some("Summarize"));
    }

    #[test]
    fn test_missing_required_field_fails() {
        let raw = r#"{"meeting_transcripts": []}"#;
        assert!(serde_json::from_str::<Transcript>(raw).is_err());
    }

    #[test]
    fn test_speakers_first_occurrence() {
        let transcript = Transcript {
            meeting_transcripts: vec![
                Utterance::new("B", "one"),
                Utterance::new("A", "two"),
                Utterance::new("B", "three"),
            ],
            general_query_list: Vec::new(),
        };
        assert_eq!(transcript.speakers(), vec!["B", "A"]);
        assert_eq!(transcript.full_conversation(), "one two three");
        assert_eq!(transcript.reference_summary(), None);
    }
}
