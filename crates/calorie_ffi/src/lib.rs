//! Flutter bridge for the calorie tracker core.

pub mod api;
