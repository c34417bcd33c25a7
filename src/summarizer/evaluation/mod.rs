//! Summary evaluation against reference summaries.

pub mod rouge;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::summarizer::core::errors::SummarizerResult;

pub use rouge::RougeScorer;

/// Precision, recall and F-measure for one metric variant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RougeScore {
    /// Share of predicted units found in the reference.
    pub precision: f64,
    /// Share of reference units found in the prediction.
    pub recall: f64,
    /// Harmonic mean of precision and recall.
    pub fmeasure: f64,
}

impl RougeScore {
    /// Build a score from precision and recall.
    #[must_use]
    pub fn from_precision_recall(precision: f64, recall: f64) -> Self {
        let fmeasure = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };
        Self {
            precision,
            recall,
            fmeasure,
        }
    }
}

/// Scores keyed by metric variant name (e.g. `rouge1`).
pub type ScoreMap = BTreeMap<String, RougeScore>;

/// Trait abstraction over summary scoring metrics.
pub trait SummaryScorer: Send + Sync {
    /// Score predictions against references, pairwise and in order.
    ///
    /// # Errors
    /// Returns an error if the inputs cannot be paired.
    fn score(&self, predictions: &[String], references: &[String]) -> SummarizerResult<ScoreMap>;
}
