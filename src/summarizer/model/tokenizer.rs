//! Tokenizer capability and its Hugging Face backend.

use std::path::Path;

use tracing::debug;

use crate::summarizer::core::errors::{SummarizerError, SummarizerResult};

/// Trait abstraction over subword tokenizers.
///
/// Implementations are loaded once and shared by reference; every method is
/// pure with respect to the tokenizer state.
pub trait Tokenizer: Send + Sync {
    /// Split text into token strings, without special tokens.
    ///
    /// # Errors
    /// Returns an error if the text cannot be tokenized.
    fn tokenize(&self, text: &str) -> SummarizerResult<Vec<String>>;

    /// Rebuild text from a slice of token strings.
    ///
    /// # Errors
    /// Returns an error if a token is not part of the vocabulary.
    fn convert_tokens_to_string(&self, tokens: &[String]) -> SummarizerResult<String>;

    /// Encode text into model input ids, special tokens included.
    ///
    /// When `truncate_to` is set, ids beyond that length are dropped silently.
    ///
    /// # Errors
    /// Returns an error if the text cannot be encoded.
    fn encode(&self, text: &str, truncate_to: Option<usize>) -> SummarizerResult<Vec<u32>>;

    /// Decode ids back into text.
    ///
    /// # Errors
    /// Returns an error if an id is outside the vocabulary.
    fn decode(&self, ids: &[u32], skip_special_tokens: bool) -> SummarizerResult<String>;
}

/// Tokenizer backed by a Hugging Face `tokenizer.json`.
#[derive(Clone)]
pub struct HfTokenizer {
    inner: tokenizers::Tokenizer,
}

impl HfTokenizer {
    /// Load a tokenizer definition from disk.
    ///
    /// # Errors
    /// Returns an error if the file is missing or not a valid tokenizer definition.
    pub fn from_file(path: impl AsRef<Path>) -> SummarizerResult<Self> {
        let path = path.as_ref();
        debug!("Loading tokenizer from {}", path.display());
        let inner = tokenizers::Tokenizer::from_file(path).map_err(SummarizerError::tokenizer)?;
        Self::from_inner(inner)
    }

    /// Load a tokenizer definition from raw JSON bytes.
    ///
    /// # Errors
    /// Returns an error if the bytes are not a valid tokenizer definition.
    pub fn from_bytes(bytes: impl AsRef<[u8]>) -> SummarizerResult<Self> {
        let inner = tokenizers::Tokenizer::from_bytes(bytes).map_err(SummarizerError::tokenizer)?;
        Self::from_inner(inner)
    }

    // Truncation and padding stored in the definition would cap or pad the
    // token stream; windowing and truncation are applied by the caller.
    fn from_inner(mut inner: tokenizers::Tokenizer) -> SummarizerResult<Self> {
        inner
            .with_truncation(None)
            .map_err(SummarizerError::tokenizer)?;
        inner.with_padding(None);
        Ok(Self { inner })
    }
}

impl Tokenizer for HfTokenizer {
    fn tokenize(&self, text: &str) -> SummarizerResult<Vec<String>> {
        let encoding = self
            .inner
            .encode(text, false)
            .map_err(SummarizerError::tokenizer)?;
        Ok(encoding.get_tokens().to_vec())
    }

    fn convert_tokens_to_string(&self, tokens: &[String]) -> SummarizerResult<String> {
        let ids = tokens
            .iter()
            .map(|token| {
                self.inner
                    .token_to_id(token)
                    .ok_or_else(|| SummarizerError::Tokenizer(format!("unknown token: {token}")))
            })
            .collect::<SummarizerResult<Vec<u32>>>()?;
        self.inner
            .decode(&ids, false)
            .map_err(SummarizerError::tokenizer)
    }

    fn encode(&self, text: &str, truncate_to: Option<usize>) -> SummarizerResult<Vec<u32>> {
        let encoding = self
            .inner
            .encode(text, true)
            .map_err(SummarizerError::tokenizer)?;
        let mut ids = encoding.get_ids().to_vec();
        if let Some(limit) = truncate_to {
            ids.truncate(limit);
        }
        Ok(ids)
    }

    fn decode(&self, ids: &[u32], skip_special_tokens: bool) -> SummarizerResult<String> {
        self.inner
            .decode(ids, skip_special_tokens)
            .map_err(SummarizerError::tokenizer)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::summarizer::core::config::SummarizerConfig;
    use crate::summarizer::model::mocks::EchoGenerator;
    use crate::summarizer::segmenting::SegmentingSummarizer;

    // Word-level vocabulary with a whitespace pre-tokenizer and a `</s>` suffix.
    const WORD_LEVEL_JSON: &str = r#"{
        "version": "1.0",
        "truncation": null,
        "padding": null,
        "added_tokens": [
            {"id": 0, "content": "[UNK]", "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true},
            {"id": 1, "content": "</s>", "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true}
        ],
        "normalizer": null,
        "pre_tokenizer": {"type": "Whitespace"},
        "post_processor": {
            "type": "TemplateProcessing",
            "single": [{"Sequence": {"id": "A", "type_id": 0}}, {"SpecialToken": {"id": "</s>", "type_id": 0}}],
            "pair": [{"Sequence": {"id": "A", "type_id": 0}}, {"Sequence": {"id": "B", "type_id": 1}}],
            "special_tokens": {"</s>": {"id": "</s>", "ids": [1], "tokens": ["</s>"]}}
        },
        "decoder": null,
        "model": {
            "type": "WordLevel",
            "vocab": {"[UNK]": 0, "</s>": 1, "we": 2, "ship": 3, "on": 4, "friday": 5},
            "unk_token": "[UNK]"
        }
    }"#;

    fn tokenizer() -> HfTokenizer {
        HfTokenizer::from_bytes(WORD_LEVEL_JSON).unwrap()
    }

    #[test]
    fn test_tokenize_skips_special_tokens() {
        let tokens = tokenizer().tokenize("we ship on friday").unwrap();
        assert_eq!(tokens, vec!["we", "ship", "on", "friday"]);
    }

    #[test]
    fn test_encode_adds_suffix_and_truncates() {
        let tok = tokenizer();
        assert_eq!(tok.encode("we ship", None).unwrap(), vec![2, 3, 1]);
        assert_eq!(tok.encode("we ship on friday", Some(2)).unwrap(), vec![2, 3]);
    }

    #[test]
    fn test_decode_skips_special_tokens() {
        let text = tokenizer().decode(&[2, 3, 1], true).unwrap();
        assert_eq!(text, "we ship");
    }

    #[test]
    fn test_convert_unknown_token_fails() {
        let result = tokenizer().convert_tokens_to_string(&["nope".to_string()]);
        assert!(matches!(result, Err(SummarizerError::Tokenizer(_))));
    }

    #[test]
    fn test_stored_truncation_is_ignored() {
        let json = WORD_LEVEL_JSON.replace(
            r#""truncation": null"#,
            r#""truncation": {"direction": "Right", "max_length": 3, "strategy": "LongestFirst", "stride": 0}"#,
        );
        let tok = HfTokenizer::from_bytes(json).unwrap();
        let text = "we ship on friday we ship";
        assert_eq!(tok.tokenize(text).unwrap().len(), 6);
        assert_eq!(tok.encode(text, None).unwrap(), vec![2, 3, 4, 5, 2, 3, 1]);
    }

    #[test]
    fn test_segments_cover_every_word() {
        let summarizer = SegmentingSummarizer::new(
            Arc::new(tokenizer()),
            Arc::new(EchoGenerator::new()),
            SummarizerConfig::new().with_max_token_length(4).with_overlap(1),
        )
        .unwrap();
        let text = "we ship on friday on friday we ship on friday";
        let segments = summarizer.split_into_segments(text).unwrap();
        assert_eq!(
            segments,
            vec!["we ship on friday", "friday on friday we", "we ship on friday"]
        );

        let mut rebuilt: Vec<&str> = segments[0].split_whitespace().collect();
        for segment in &segments[1..] {
            rebuilt.extend(segment.split_whitespace().skip(1));
        }
        assert_eq!(rebuilt, text.split_whitespace().collect::<Vec<_>>());
    }

    #[test]
    fn test_missing_file_is_tokenizer_error() {
        let result = HfTokenizer::from_file("/definitely/not/here/tokenizer.json");
        assert!(result.is_err());
    }
}
