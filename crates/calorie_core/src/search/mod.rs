//! Autocomplete search over previously logged item names.
//!
//! # Invariants
//! - Each non-empty name appears at most once, carrying the calories of its
//!   newest row.
//! - Results are ordered by skim score, ties broken newest first.
//! - Matched positions are character indices into the name.

use crate::model::suggestion::SuggestionResult;
use crate::repo::item_repo::NameCandidate;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Default number of suggestions returned per query.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

static MATCHER: Lazy<SkimMatcherV2> = Lazy::new(|| SkimMatcherV2::default().ignore_case());

/// Ranks `candidates` (newest first) against `query`, keeping `limit` hits.
pub fn rank_suggestions(
    candidates: &[NameCandidate],
    query: &str,
    limit: usize,
) -> Vec<SuggestionResult> {
    let mut seen = HashSet::new();
    let mut hits: Vec<_> = candidates
        .iter()
        .filter(|candidate| !candidate.name.is_empty() && seen.insert(candidate.name.as_str()))
        .enumerate()
        .filter_map(|(recency, candidate)| {
            MATCHER
                .fuzzy_indices(&candidate.name, query)
                .map(|(score, positions)| (score, recency, candidate, positions))
        })
        .collect();

    hits.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
    hits.into_iter()
        .take(limit)
        .map(|(_, _, candidate, positions)| {
            SuggestionResult::new(candidate.name.clone(), candidate.calories, positions)
        })
        .collect()
}
