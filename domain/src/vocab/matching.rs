//! Fuzzy candidate filter.
//!
//! Narrows a controlled list down to the top-N entries most similar to a
//! free-form query, so the semantic filter mapper never has to send a full
//! vocabulary to the language model. Pure functions only: deterministic,
//! no I/O, never fails.

use crate::vocab::entities::ControlledList;

/// A controlled-list entry paired with its similarity score (0–100).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub entry: String,
    pub score: u8,
}

/// A bounded, ordered shortlist of controlled-list entries ranked by
/// similarity to a query. Derived, never persisted.
#[derive(Debug, Clone, Default)]
pub struct CandidateSet {
    candidates: Vec<Candidate>,
}

impl CandidateSet {
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn entries(&self) -> Vec<&str> {
        self.candidates.iter().map(|c| c.entry.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn contains(&self, value: &str) -> bool {
        let key = value.to_lowercase();
        self.candidates
            .iter()
            .any(|c| c.entry.to_lowercase() == key)
    }
}

/// Lowercase alphanumeric tokens of a string.
fn tokens(s: &str) -> Vec<String> {
    s.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
        .collect()
}

/// Whether two tokens count as overlapping: equal, or one contains the
/// other (so "data" matches "datascience"). Single characters only match
/// exactly to avoid noise.
fn tokens_overlap(a: &str, b: &str) -> bool {
    if a == b {
        return true;
    }
    (a.len() >= 2 && b.contains(a)) || (b.len() >= 2 && a.contains(b))
}

/// Order-independent token overlap ratio between two strings, 0–100.
///
/// Counts how many tokens on each side overlap with any token on the other
/// side, normalized by the total token count. Token order never affects the
/// score.
pub fn token_set_ratio(query: &str, candidate: &str) -> u8 {
    let q_tokens = tokens(query);
    let c_tokens = tokens(candidate);
    if q_tokens.is_empty() || c_tokens.is_empty() {
        return 0;
    }

    let q_matched = q_tokens
        .iter()
        .filter(|q| c_tokens.iter().any(|c| tokens_overlap(q, c)))
        .count();
    let c_matched = c_tokens
        .iter()
        .filter(|c| q_tokens.iter().any(|q| tokens_overlap(q, c)))
        .count();

    let ratio = (q_matched + c_matched) as f64 / (q_tokens.len() + c_tokens.len()) as f64;
    (ratio * 100.0).round() as u8
}

/// Rank every entry of `list` by similarity to `query` and keep the best
/// `top_n`.
///
/// The sort is descending by score and stable: entries with equal scores
/// keep their original list order. Returns an empty set for an empty list;
/// never fails.
pub fn rank(query: &str, list: &ControlledList, top_n: usize) -> CandidateSet {
    let mut candidates: Vec<Candidate> = list
        .iter()
        .map(|entry| Candidate {
            entry: entry.to_string(),
            score: token_set_ratio(query, entry),
        })
        .collect();

    // Stable sort keeps list order on ties
    candidates.sort_by(|a, b| b.score.cmp(&a.score));
    candidates.truncate(top_n);

    CandidateSet { candidates }
}
