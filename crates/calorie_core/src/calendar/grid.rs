//! Month-aligned calendar grid with per-day and per-week loss badges.
//!
//! # Invariants
//! - Every week row holds exactly seven days, Monday first.
//! - The grid covers the whole month, starting on a Monday and ending on a Sunday.
//! - Grids of five or fewer weeks get one trailing blank row.
//! - A week badge compares the week total against metabolism scaled by the
//!   number of days that have data.

use crate::calendar::loss::LossBadge;
use crate::model::day::{CalendarData, Configuration};
use crate::model::month::MonthCursor;
use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

const DAYS_PER_WEEK: u64 = 7;
const MIN_WEEKS_WITHOUT_PADDING: usize = 6;

/// Highlight priority of a cell: selected beats today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CellHighlight {
    None,
    Today,
    Selected,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayCell {
    pub date: NaiveDate,
    /// `false` for leading/trailing days of neighboring months (dimmed).
    pub in_month: bool,
    pub highlight: CellHighlight,
    /// Present only when the date has data.
    pub loss: Option<LossBadge>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekRow {
    pub days: Vec<DayCell>,
    /// `None` when no day of the week has data.
    pub summary: Option<LossBadge>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GridRow {
    Week(WeekRow),
    Blank,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarGrid {
    pub month: MonthCursor,
    pub rows: Vec<GridRow>,
}

impl CalendarGrid {
    pub fn weeks(&self) -> impl Iterator<Item = &WeekRow> {
        self.rows.iter().filter_map(|row| match row {
            GridRow::Week(week) => Some(week),
            GridRow::Blank => None,
        })
    }

    pub fn days(&self) -> impl Iterator<Item = &DayCell> {
        self.weeks().flat_map(|week| week.days.iter())
    }

    pub fn cell(&self, date: NaiveDate) -> Option<&DayCell> {
        self.days().find(|cell| cell.date == date)
    }
}

/// First and last date painted for `month`: the Monday on or before the 1st
/// and the Sunday on or after the last day.
pub fn grid_bounds(month: MonthCursor) -> (NaiveDate, NaiveDate) {
    let first = month.first_day();
    let last = month.last_day();
    // num_days_from_monday == (weekday with Sunday=0 + 6) mod 7
    let lead = u64::from(first.weekday().num_days_from_monday());
    let trail = 6 - u64::from(last.weekday().num_days_from_monday());
    (first - Days::new(lead), last + Days::new(trail))
}

/// Builds the decorated grid for `month`.
pub fn render(
    month: MonthCursor,
    data: &CalendarData,
    conf: &Configuration,
    selected: NaiveDate,
    today: NaiveDate,
) -> CalendarGrid {
    let (start, end) = grid_bounds(month);
    let mut rows = Vec::new();
    let mut week_start = start;

    while week_start <= end {
        rows.push(GridRow::Week(build_week(
            week_start, month, data, conf, selected, today,
        )));
        week_start = week_start + Days::new(DAYS_PER_WEEK);
    }

    if rows.len() < MIN_WEEKS_WITHOUT_PADDING {
        rows.push(GridRow::Blank);
    }

    CalendarGrid { month, rows }
}

fn build_week(
    monday: NaiveDate,
    month: MonthCursor,
    data: &CalendarData,
    conf: &Configuration,
    selected: NaiveDate,
    today: NaiveDate,
) -> WeekRow {
    let mut days = Vec::with_capacity(DAYS_PER_WEEK as usize);
    let mut week_total = 0.0;
    let mut days_with_data = 0u32;

    for offset in 0..DAYS_PER_WEEK {
        let date = monday + Days::new(offset);
        let total = data.get(&date).copied();
        if let Some(total) = total {
            week_total += total;
            days_with_data += 1;
        }

        days.push(DayCell {
            date,
            in_month: month.contains(date),
            highlight: cell_highlight(date, selected, today),
            loss: total.map(|total| LossBadge::from_totals(total, conf.metabolism)),
        });
    }

    let summary = (days_with_data > 0).then(|| {
        LossBadge::from_totals(week_total, conf.metabolism * f64::from(days_with_data))
    });

    WeekRow { days, summary }
}

fn cell_highlight(date: NaiveDate, selected: NaiveDate, today: NaiveDate) -> CellHighlight {
    if date == selected {
        CellHighlight::Selected
    } else if date == today {
        CellHighlight::Today
    } else {
        CellHighlight::None
    }
}
