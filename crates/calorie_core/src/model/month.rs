//! Calendar month cursor and date formatting helpers.
//!
//! # Invariants
//! - A `MonthCursor` always names a real month with a four-digit year.
//! - `previous`/`next` roll over the year at January/December.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Wire format for calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const MIN_YEAR: i32 = 1000;
const MAX_YEAR: i32 = 9999;

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).ok()
}

/// Formats a date as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// The month painted by the calendar grid, as `(year, month)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawMonthCursor")]
pub struct MonthCursor {
    year: i32,
    month: u32,
}

#[derive(Deserialize)]
struct RawMonthCursor {
    year: i32,
    month: u32,
}

impl TryFrom<RawMonthCursor> for MonthCursor {
    type Error = String;

    fn try_from(raw: RawMonthCursor) -> Result<Self, Self::Error> {
        Self::new(raw.year, raw.month)
            .ok_or_else(|| format!("no such month: {}-{:02}", raw.year, raw.month))
    }
}

impl MonthCursor {
    /// Returns `None` for months outside `1..=12` or years outside `1000..=9999`.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) || !(1..=12).contains(&month) {
            return None;
        }
        Some(Self { year, month })
    }

    /// The month containing `date`, clamped into the supported year range.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year().clamp(MIN_YEAR, MAX_YEAR),
            month: date.month(),
        }
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month(self) -> u32 {
        self.month
    }

    /// January rolls back to December of the previous year.
    ///
    /// The earliest supported month has no predecessor and returns itself.
    pub fn previous(self) -> Self {
        let (year, month) = if self.month == 1 {
            (self.year - 1, 12)
        } else {
            (self.year, self.month - 1)
        };
        Self::new(year, month).unwrap_or(self)
    }

    /// December rolls forward to January of the next year.
    ///
    /// The latest supported month has no successor and returns itself.
    pub fn next(self) -> Self {
        let (year, month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        Self::new(year, month).unwrap_or(self)
    }

    pub fn first_day(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .expect("month cursor always holds a valid year and month")
    }

    /// Day before the first of the following month.
    pub fn last_day(self) -> NaiveDate {
        let (year, month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(year, month, 1)
            .and_then(|next| next.pred_opt())
            .expect("month cursor always holds a valid year and month")
    }

    pub fn days_in_month(self) -> u32 {
        self.last_day().day()
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Parses `YYYY-MM`.
    pub fn parse(text: &str) -> Option<Self> {
        let (year, month) = text.trim().split_once('-')?;
        if year.len() != 4 || month.len() != 2 {
            return None;
        }
        Self::new(year.parse().ok()?, month.parse().ok()?)
    }
}

impl Display for MonthCursor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::{format_date, parse_date, MonthCursor};
    use chrono::NaiveDate;

    #[test]
    fn previous_from_january_rolls_back_the_year() {
        let january = MonthCursor::new(2024, 1).unwrap();
        assert_eq!(january.previous(), MonthCursor::new(2023, 12).unwrap());
    }

    #[test]
    fn next_from_december_rolls_forward_the_year() {
        let december = MonthCursor::new(2023, 12).unwrap();
        assert_eq!(december.next(), MonthCursor::new(2024, 1).unwrap());
    }

    #[test]
    fn last_day_handles_leap_years() {
        assert_eq!(
            MonthCursor::new(2024, 2).unwrap().last_day(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert_eq!(
            MonthCursor::new(1900, 2).unwrap().last_day(),
            NaiveDate::from_ymd_opt(1900, 2, 28).unwrap()
        );
        assert_eq!(
            MonthCursor::new(2000, 2).unwrap().last_day(),
            NaiveDate::from_ymd_opt(2000, 2, 29).unwrap()
        );
    }

    #[test]
    fn parse_and_display_use_year_month_format() {
        let cursor = MonthCursor::parse("2021-03").unwrap();
        assert_eq!(cursor.year(), 2021);
        assert_eq!(cursor.month(), 3);
        assert_eq!(cursor.to_string(), "2021-03");
        assert!(MonthCursor::parse("2021-13").is_none());
        assert!(MonthCursor::parse("21-03").is_none());
        assert!(MonthCursor::parse("0999-01").is_none());
    }

    #[test]
    fn range_edges_do_not_move() {
        let first = MonthCursor::new(1000, 1).unwrap();
        assert_eq!(first.previous(), first);
        let last = MonthCursor::new(9999, 12).unwrap();
        assert_eq!(last.next(), last);
    }

    #[test]
    fn deserializing_rejects_impossible_months() {
        let cursor: MonthCursor = serde_json::from_str(r#"{"year":2024,"month":2}"#).unwrap();
        assert_eq!(cursor.days_in_month(), 29);
        assert!(serde_json::from_str::<MonthCursor>(r#"{"year":2024,"month":13}"#).is_err());
        assert!(serde_json::from_str::<MonthCursor>(r#"{"year":999,"month":1}"#).is_err());
    }

    #[test]
    fn date_helpers_use_iso_format() {
        let date = parse_date("2021-01-31").unwrap();
        assert_eq!(format_date(date), "2021-01-31");
        assert!(parse_date("2021-1-31x").is_none());
    }
}
