//! ROUGE-1, ROUGE-2, ROUGE-L and ROUGE-Lsum scoring.

use std::collections::{BTreeSet, HashMap};

use regex::Regex;
use tracing::debug;

use crate::summarizer::core::errors::{SummarizerError, SummarizerResult};
use crate::summarizer::evaluation::{RougeScore, ScoreMap, SummaryScorer};

/// Metric variants produced by [`RougeScorer`], in output order.
pub const ROUGE_TYPES: [&str; 4] = ["rouge1", "rouge2", "rougeL", "rougeLsum"];

/// ROUGE scorer without stemming.
///
/// Text is lowercased and every run of characters outside `[a-z0-9]` is
/// treated as a separator. `rougeLsum` splits both texts on newlines and uses
/// the union LCS across sentences. Corpus scores are the mean of the
/// per-pair scores.
pub struct RougeScorer {
    separators: Regex,
}

impl RougeScorer {
    /// Create a scorer.
    ///
    /// # Errors
    /// Returns an error if the tokenizer pattern fails to compile.
    pub fn new() -> SummarizerResult<Self> {
        Ok(Self {
            separators: Regex::new(r"[^a-z0-9]+")?,
        })
    }

    /// Score a single prediction against a single reference.
    #[must_use]
    pub fn score_pair(&self, prediction: &str, reference: &str) -> ScoreMap {
        let pred_tokens = self.tokenize(prediction);
        let ref_tokens = self.tokenize(reference);

        let pred_sents = self.tokenize_sentences(prediction);
        let ref_sents = self.tokenize_sentences(reference);

        let mut scores = ScoreMap::new();
        scores.insert(
            ROUGE_TYPES[0].to_string(),
            ngram_score(&pred_tokens, &ref_tokens, 1),
        );
        scores.insert(
            ROUGE_TYPES[1].to_string(),
            ngram_score(&pred_tokens, &ref_tokens, 2),
        );
        scores.insert(ROUGE_TYPES[2].to_string(), lcs_score(&pred_tokens, &ref_tokens));
        scores.insert(
            ROUGE_TYPES[3].to_string(),
            summary_level_lcs_score(&pred_sents, &ref_sents),
        );
        scores
    }

    fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        self.separators
            .replace_all(&lowered, " ")
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }

    fn tokenize_sentences(&self, text: &str) -> Vec<Vec<String>> {
        text.split('\n')
            .filter(|line| !line.is_empty())
            .map(|line| self.tokenize(line))
            .collect()
    }
}

impl SummaryScorer for RougeScorer {
    fn score(&self, predictions: &[String], references: &[String]) -> SummarizerResult<ScoreMap> {
        if predictions.len() != references.len() {
            return Err(SummarizerError::InvalidInput(format!(
                "{} predictions but {} references",
                predictions.len(),
                references.len()
            )));
        }

        let mut totals: ScoreMap = ROUGE_TYPES
            .iter()
            .map(|name| ((*name).to_string(), RougeScore::default()))
            .collect();

        if predictions.is_empty() {
            return Ok(totals);
        }

        debug!("Scoring {} summary pairs", predictions.len());

        for (prediction, reference) in predictions.iter().zip(references) {
            for (name, score) in self.score_pair(prediction, reference) {
                let total = totals.entry(name).or_default();
                total.precision += score.precision;
                total.recall += score.recall;
                total.fmeasure += score.fmeasure;
            }
        }

        let count = ratio(1, predictions.len());
        for total in totals.values_mut() {
            total.precision *= count;
            total.recall *= count;
            total.fmeasure *= count;
        }

        Ok(totals)
    }
}

#[allow(clippy::cast_precision_loss)]
fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

fn ngram_counts(tokens: &[String], n: usize) -> HashMap<&[String], usize> {
    let mut counts = HashMap::new();
    if n == 0 || tokens.len() < n {
        return counts;
    }
    for gram in tokens.windows(n) {
        *counts.entry(gram).or_insert(0) += 1;
    }
    counts
}

fn ngram_score(prediction: &[String], reference: &[String], n: usize) -> RougeScore {
    let pred_counts = ngram_counts(prediction, n);
    let ref_counts = ngram_counts(reference, n);

    let overlap: usize = ref_counts
        .iter()
        .map(|(gram, ref_count)| pred_counts.get(gram).map_or(0, |c| (*c).min(*ref_count)))
        .sum();
    let pred_total: usize = pred_counts.values().sum();
    let ref_total: usize = ref_counts.values().sum();

    RougeScore::from_precision_recall(
        ratio(overlap, pred_total.max(1)),
        ratio(overlap, ref_total.max(1)),
    )
}

fn lcs_table(reference: &[String], candidate: &[String]) -> Vec<Vec<usize>> {
    let mut table = vec![vec![0_usize; candidate.len() + 1]; reference.len() + 1];
    for i in 1..=reference.len() {
        for j in 1..=candidate.len() {
            table[i][j] = if reference[i - 1] == candidate[j - 1] {
                table[i - 1][j - 1] + 1
            } else {
                table[i - 1][j].max(table[i][j - 1])
            };
        }
    }
    table
}

fn lcs_score(prediction: &[String], reference: &[String]) -> RougeScore {
    if prediction.is_empty() || reference.is_empty() {
        return RougeScore::default();
    }
    let table = lcs_table(reference, prediction);
    let lcs = table[reference.len()][prediction.len()];
    RougeScore::from_precision_recall(ratio(lcs, prediction.len()), ratio(lcs, reference.len()))
}

/// Indices into `reference` of one longest common subsequence with `candidate`.
fn lcs_indices(reference: &[String], candidate: &[String]) -> Vec<usize> {
    let table = lcs_table(reference, candidate);
    let (mut i, mut j) = (reference.len(), candidate.len());
    let mut indices = Vec::new();
    while i > 0 && j > 0 {
        if reference[i - 1] == candidate[j - 1] {
            indices.push(i - 1);
            i -= 1;
            j -= 1;
        } else if table[i][j - 1] > table[i - 1][j] {
            j -= 1;
        } else {
            i -= 1;
        }
    }
    indices.reverse();
    indices
}

fn token_counts<'a>(sentences: &'a [Vec<String>]) -> HashMap<&'a str, usize> {
    let mut counts = HashMap::new();
    for token in sentences.iter().flatten() {
        *counts.entry(token.as_str()).or_insert(0) += 1;
    }
    counts
}

fn summary_level_lcs_score(prediction: &[Vec<String>], reference: &[Vec<String>]) -> RougeScore {
    let ref_len: usize = reference.iter().map(Vec::len).sum();
    let pred_len: usize = prediction.iter().map(Vec::len).sum();
    if ref_len == 0 || pred_len == 0 {
        return RougeScore::default();
    }

    let mut ref_counts = token_counts(reference);
    let mut pred_counts = token_counts(prediction);
    let mut hits = 0_usize;

    for ref_sentence in reference {
        let union: BTreeSet<usize> = prediction
            .iter()
            .flat_map(|pred_sentence| lcs_indices(ref_sentence, pred_sentence))
            .collect();

        for index in union {
            let token = ref_sentence[index].as_str();
            let (Some(pred_left), Some(ref_left)) =
                (pred_counts.get_mut(token), ref_counts.get_mut(token))
            else {
                continue;
            };
            if *pred_left > 0 && *ref_left > 0 {
                hits += 1;
                *pred_left -= 1;
                *ref_left -= 1;
            }
        }
    }

    RougeScore::from_precision_recall(ratio(hits, pred_len), ratio(hits, ref_len))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_identical_texts_score_one() {
        let scorer = RougeScorer::new().unwrap();
        let scores = scorer.score_pair("The team ships on Friday.", "the team ships on friday");
        for name in ROUGE_TYPES {
            assert!(approx(scores[name].fmeasure, 1.0), "{name}");
        }
    }

    #[test]
    fn test_disjoint_texts_score_zero() {
        let scorer = RougeScorer::new().unwrap();
        let scores = scorer.score_pair("alpha beta", "gamma delta");
        for name in ROUGE_TYPES {
            assert!(approx(scores[name].fmeasure, 0.0), "{name}");
        }
    }

    #[test]
    fn test_known_values() {
        let scorer = RougeScorer::new().unwrap();
        let scores = scorer.score_pair("the cat was found under the bed", "the cat was under the bed");

        assert!(approx(scores["rouge1"].precision, 6.0 / 7.0));
        assert!(approx(scores["rouge1"].recall, 1.0));
        assert!(approx(scores["rouge2"].precision, 4.0 / 6.0));
        assert!(approx(scores["rouge2"].recall, 4.0 / 5.0));
        assert!(approx(scores["rougeL"].precision, 6.0 / 7.0));
        assert!(approx(scores["rougeL"].recall, 1.0));
    }

    #[test]
    fn test_rouge_lsum_uses_sentence_union() {
        let scorer = RougeScorer::new().unwrap();
        // Sentence order is swapped: plain LCS loses one sentence, the union LCS does not.
        let scores = scorer.score_pair("budget approved\nhiring paused", "hiring paused\nbudget approved");
        assert!(approx(scores["rougeLsum"].fmeasure, 1.0));
        assert!(scores["rougeL"].fmeasure < 1.0);
    }

    #[test]
    fn test_corpus_score_is_mean() {
        let scorer = RougeScorer::new().unwrap();
        let predictions = vec!["a b".to_string(), "c d".to_string()];
        let references = vec!["a b".to_string(), "x y".to_string()];
        let scores = scorer.score(&predictions, &references).unwrap();
        assert!(approx(scores["rouge1"].fmeasure, 0.5));
        assert_eq!(scores.len(), 4);
    }

    #[test]
    fn test_length_mismatch_is_error() {
        let scorer = RougeScorer::new().unwrap();
        let result = scorer.score(&["a".to_string()], &[]);
        assert!(matches!(result, Err(SummarizerError::InvalidInput(_))));
    }

    #[test]
    fn test_empty_prediction_scores_zero() {
        let scorer = RougeScorer::new().unwrap();
        let scores = scorer.score_pair("", "some reference");
        assert!(approx(scores["rougeL"].fmeasure, 0.0));
        assert!(approx(scores["rougeLsum"].fmeasure, 0.0));
    }
}
