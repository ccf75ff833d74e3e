//! Calendar aggregation: month grid, daily and weekly loss estimates.
//!
//! # Responsibility
//! - Lay out a Monday-first grid for the displayed month.
//! - Derive weight-loss badges from sparse daily totals and the committed
//!   metabolism.

pub mod grid;
pub mod loss;

pub use grid::{grid_bounds, render, CalendarGrid, CellHighlight, DayCell, GridRow, WeekRow};
pub use loss::{weight_loss_grams, LossBadge, LossColor, CALORIES_PER_GRAM};
