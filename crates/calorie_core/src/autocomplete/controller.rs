//! Search-as-you-type controller.
//!
//! # Responsibility
//! - Turn text edits into tagged search requests.
//! - Drop replies that belong to a superseded query.
//! - Track keyboard focus over the visible suggestions.
//!
//! # Invariants
//! - Empty text never produces a request.
//! - The visible list always belongs to the most recently issued query.
//! - A newly applied list, a closed list and a new query all reset focus.

use crate::autocomplete::navigation::Focus;
use crate::channel::{Sequence, Ticket};
use crate::model::suggestion::SuggestionResult;

/// Search request tagged with the sequence number it was issued under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub ticket: Ticket,
    pub query: String,
}

/// What committing the entry field should do.
#[derive(Debug, Clone, PartialEq)]
pub enum CommitAction {
    /// A focused suggestion was chosen.
    Suggestion { name: String, calories: f64 },
    /// Nothing focused: add directly from the raw text.
    RawText(String),
}

#[derive(Debug, Clone)]
pub struct Autocomplete {
    text: String,
    sequence: Sequence,
    suggestions: Vec<SuggestionResult>,
    focus: Focus,
    limit: usize,
}

impl Default for Autocomplete {
    fn default() -> Self {
        Self::with_limit(usize::MAX)
    }
}

impl Autocomplete {
    pub fn new() -> Self {
        Self::default()
    }

    /// Caps how many suggestions from one reply are shown.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            text: String::new(),
            sequence: Sequence::new(),
            suggestions: Vec::new(),
            focus: Focus::Unfocused,
            limit,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn suggestions(&self) -> &[SuggestionResult] {
        &self.suggestions
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn is_open(&self) -> bool {
        !self.suggestions.is_empty()
    }

    /// Records the new entry text and returns the search to issue, if any.
    pub fn on_text_changed(&mut self, text: impl Into<String>) -> Option<SearchRequest> {
        self.text = text.into();
        self.close();
        if self.text.is_empty() {
            return None;
        }

        Some(SearchRequest {
            ticket: self.sequence.issue(),
            query: self.text.clone(),
        })
    }

    /// Applies a search reply. Returns `false` when the reply is stale.
    pub fn on_results(&mut self, ticket: Ticket, mut results: Vec<SuggestionResult>) -> bool {
        if !self.sequence.is_current(ticket) {
            return false;
        }
        results.truncate(self.limit);
        self.suggestions = results;
        self.focus = Focus::Unfocused;
        true
    }

    /// Whether a reply for `ticket` would still be applied.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.sequence.is_current(ticket)
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next(self.suggestions.len());
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous(self.suggestions.len());
    }

    /// Resolves what a commit keypress means right now. Does not mutate.
    pub fn commit_action(&self) -> CommitAction {
        match self.focus.index().and_then(|index| self.suggestions.get(index)) {
            Some(suggestion) => CommitAction::Suggestion {
                name: suggestion.name.clone(),
                calories: suggestion.calories,
            },
            None => CommitAction::RawText(self.text.clone()),
        }
    }

    /// Hides the list and makes any in-flight search stale.
    pub fn close(&mut self) {
        self.suggestions.clear();
        self.focus = Focus::Unfocused;
        self.sequence.invalidate();
    }

    /// Clears the entry text after a successful commit.
    pub fn reset(&mut self) {
        self.text.clear();
        self.close();
    }
}
