//! Summary post-processing into headlines and bullet points.
//!
//! Sentences are split on the literal `". "` delimiter. This is an
//! approximation: abbreviations ("e.g. this") split early and a final
//! sentence without trailing whitespace is never split off.

/// Literal delimiter separating sentences in generated summaries.
pub const SENTENCE_DELIMITER: &str = ". ";

/// Prefix rendered before each bullet point.
pub const POINT_PREFIX: &str = "- ";

/// Split a summary into sentence pieces on [`SENTENCE_DELIMITER`].
///
/// Always yields at least one piece; an empty summary yields `[""]`.
#[must_use]
pub fn split_sentences(summary: &str) -> Vec<&str> {
    summary.split(SENTENCE_DELIMITER).collect()
}

/// Render the first `num_points` sentences as `"- "` prefixed lines.
#[must_use]
pub fn to_points(summary: &str, num_points: usize) -> String {
    split_sentences(summary)
        .into_iter()
        .take(num_points)
        .map(|sentence| format!("{POINT_PREFIX}{sentence}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Return the text before the first delimiter, or the whole summary.
#[must_use]
pub fn to_headline(summary: &str) -> &str {
    summary
        .split_once(SENTENCE_DELIMITER)
        .map_or(summary, |(head, _)| head)
}
