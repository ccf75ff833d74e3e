//! Domain model for the calorie/weight tracking client.
//!
//! # Responsibility
//! - Define the records exchanged with the calorie service.
//! - Keep calendar-month arithmetic in one place.
//!
//! # Invariants
//! - An item's effective value is always `calories * multiplier`.
//! - Daily totals are sparse: a missing date means "no data", not zero.

pub mod day;
pub mod item;
pub mod month;
pub mod suggestion;
