//! Autocomplete suggestion record.

use serde::{Deserialize, Serialize};

/// One search hit: a previously logged name with its per-serving calories.
///
/// `matched_positions` are strictly ascending character indices into `name`
/// marking which characters satisfied the fuzzy match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionResult {
    pub name: String,
    pub calories: f64,
    #[serde(rename = "positions")]
    pub matched_positions: Vec<usize>,
}

impl SuggestionResult {
    pub fn new(name: impl Into<String>, calories: f64, matched_positions: Vec<usize>) -> Self {
        Self {
            name: name.into(),
            calories,
            matched_positions,
        }
    }
}
