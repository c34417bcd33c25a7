//! Mock model capabilities for testing.

#![allow(missing_docs, clippy::unwrap_used, clippy::new_without_default)]

use std::collections::HashMap;
use std::sync::Mutex;

use crate::summarizer::core::errors::{SummarizerError, SummarizerResult};
use crate::summarizer::model::generator::{GenerateFuture, GenerationParams, Generator};
use crate::summarizer::model::tokenizer::Tokenizer;

/// End-of-sequence id appended by `encode`.
pub const EOS_ID: u32 = 0;
const EOS_TOKEN: &str = "</s>";

#[derive(Default)]
struct Vocab {
    ids: HashMap<String, u32>,
    tokens: Vec<String>,
}

/// Tokenizer that treats every whitespace-separated word as one token.
///
/// Ids are interned on first sight, so any text round-trips.
pub struct WhitespaceTokenizer {
    vocab: Mutex<Vocab>,
}

impl WhitespaceTokenizer {
    pub fn new() -> Self {
        let vocab = Vocab {
            ids: HashMap::from([(EOS_TOKEN.to_string(), EOS_ID)]),
            tokens: vec![EOS_TOKEN.to_string()],
        };
        Self {
            vocab: Mutex::new(vocab),
        }
    }

    fn intern(&self, token: &str) -> u32 {
        let mut vocab = self.vocab.lock().unwrap();
        if let Some(id) = vocab.ids.get(token) {
            return *id;
        }
        let id = u32::try_from(vocab.tokens.len()).unwrap();
        vocab.tokens.push(token.to_string());
        vocab.ids.insert(token.to_string(), id);
        id
    }
}

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> SummarizerResult<Vec<String>> {
        Ok(text.split_whitespace().map(str::to_string).collect())
    }

    fn convert_tokens_to_string(&self, tokens: &[String]) -> SummarizerResult<String> {
        Ok(tokens.join(" "))
    }

    fn encode(&self, text: &str, truncate_to: Option<usize>) -> SummarizerResult<Vec<u32>> {
        let mut ids: Vec<u32> = text.split_whitespace().map(|t| self.intern(t)).collect();
        ids.push(EOS_ID);
        if let Some(limit) = truncate_to {
            ids.truncate(limit);
        }
        Ok(ids)
    }

    fn decode(&self, ids: &[u32], skip_special_tokens: bool) -> SummarizerResult<String> {
        let vocab = self.vocab.lock().unwrap();
        let mut words = Vec::with_capacity(ids.len());
        for id in ids {
            if skip_special_tokens && *id == EOS_ID {
                continue;
            }
            let word = vocab
                .tokens
                .get(*id as usize)
                .ok_or_else(|| SummarizerError::Tokenizer(format!("unknown id: {id}")))?;
            words.push(word.clone());
        }
        Ok(words.join(" "))
    }
}

/// A recorded generator invocation.
#[derive(Clone, Debug)]
pub struct GenerateCall {
    pub input_ids: Vec<u32>,
    pub params: GenerationParams,
}

/// Generator that echoes its input, clamped to `max_length`, and records every call.
#[derive(Default)]
pub struct EchoGenerator {
    calls: Mutex<Vec<GenerateCall>>,
}

impl EchoGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<GenerateCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl Generator for EchoGenerator {
    fn generate<'a>(
        &'a self,
        input_ids: &'a [u32],
        params: &'a GenerationParams,
    ) -> GenerateFuture<'a, SummarizerResult<Vec<u32>>> {
        Box::pin(async move {
            self.calls.lock().unwrap().push(GenerateCall {
                input_ids: input_ids.to_vec(),
                params: params.clone(),
            });
            Ok(input_ids.iter().copied().take(params.max_length).collect())
        })
    }
}

/// Generator that always fails.
pub struct FailingGenerator;

impl Generator for FailingGenerator {
    fn generate<'a>(
        &'a self,
        _input_ids: &'a [u32],
        _params: &'a GenerationParams,
    ) -> GenerateFuture<'a, SummarizerResult<Vec<u32>>> {
        Box::pin(async move { Err(SummarizerError::InvalidInput("model unavailable".to_string())) })
    }
}
