//! Autocomplete for the item entry field.
//!
//! # Responsibility
//! - Issue sequence-tagged searches and suppress stale replies.
//! - Run the keyboard focus state machine over suggestions.
//! - Split suggestion names into highlighted runs.

pub mod controller;
pub mod highlight;
pub mod navigation;

pub use controller::{Autocomplete, CommitAction, SearchRequest};
pub use highlight::{highlight, render_marked, Segment};
pub use navigation::Focus;
