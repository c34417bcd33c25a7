//! Model capabilities consumed by the summarizer.

pub mod generator;
pub mod tokenizer;

#[cfg(test)]
pub mod mocks;

pub use generator::{GenerateFuture, GenerationParams, Generator, OllamaGenerator};
pub use tokenizer::{HfTokenizer, Tokenizer};
