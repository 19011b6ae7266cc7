use std::collections::BTreeMap;

use surveysynth_core::identifier::normalize_label;

use crate::model::FormQuestion;

/// Minimum similarity ratio for a column/question binding.
pub const MATCH_THRESHOLD: f64 = 0.65;

/// Bind canonical column identifiers to form questions.
///
/// Each column is compared against the canonicalized question texts; the
/// single best match at or above [`MATCH_THRESHOLD`] wins, with ties broken
/// by the first candidate in input order. Columns scoring below threshold
/// against every candidate are absent from the result and fall back to
/// generic generation downstream. Computed once per table.
pub fn bind_columns(
    columns: &[String],
    questions: &[FormQuestion],
) -> BTreeMap<String, FormQuestion> {
    let candidates: Vec<String> = questions
        .iter()
        .map(|question| normalize_label(&question.question))
        .collect();

    let mut bindings = BTreeMap::new();
    for column in columns {
        let mut best: Option<(usize, f64)> = None;
        for (index, candidate) in candidates.iter().enumerate() {
            let score = similarity_ratio(column, candidate);
            if score >= MATCH_THRESHOLD && best.map(|(_, top)| score > top).unwrap_or(true) {
                best = Some((index, score));
            }
        }
        if let Some((index, _)) = best {
            bindings.insert(column.clone(), questions[index].clone());
        }
    }
    bindings
}

/// Sequence similarity ratio in `[0, 1]`.
///
/// Twice the matched character count over the combined length, with matches
/// accumulated from recursively located longest common blocks.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matching_len(&a, &b) as f64 / total as f64
}

fn matching_len(a: &[char], b: &[char]) -> usize {
    let (start_a, start_b, len) = longest_block(a, b);
    if len == 0 {
        return 0;
    }
    len + matching_len(&a[..start_a], &b[..start_b])
        + matching_len(&a[start_a + len..], &b[start_b + len..])
}

/// Longest common contiguous block, earliest positions on ties.
fn longest_block(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0, 0, 0);
    // suffix_len[j + 1] = common suffix length ending at a[i], b[j]
    let mut suffix_len = vec![0usize; b.len() + 1];

    for (i, &ch) in a.iter().enumerate() {
        let mut diagonal = 0;
        for j in 0..b.len() {
            let previous = suffix_len[j + 1];
            suffix_len[j + 1] = if ch == b[j] { diagonal + 1 } else { 0 };
            if suffix_len[j + 1] > best.2 {
                best = (i + 1 - suffix_len[j + 1], j + 1 - suffix_len[j + 1], suffix_len[j + 1]);
            }
            diagonal = previous;
        }
    }

    best
}
