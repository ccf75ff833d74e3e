//! Selected day and displayed calendar month.

use crate::model::month::MonthCursor;
use chrono::NaiveDate;
use serde::Serialize;

/// `month_cursor` may name a month that does not contain `selected_date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ViewState {
    pub selected_date: NaiveDate,
    pub month_cursor: MonthCursor,
}

impl ViewState {
    /// Starts on `today`, showing its month.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            selected_date: today,
            month_cursor: MonthCursor::from_date(today),
        }
    }

    /// Leaves the displayed month alone.
    pub fn select_date(&mut self, date: NaiveDate) {
        self.selected_date = date;
    }

    pub fn previous_month(&mut self) -> MonthCursor {
        self.month_cursor = self.month_cursor.previous();
        self.month_cursor
    }

    pub fn next_month(&mut self) -> MonthCursor {
        self.month_cursor = self.month_cursor.next();
        self.month_cursor
    }
}

#[cfg(test)]
mod tests {
    use super::ViewState;
    use crate::model::month::MonthCursor;
    use chrono::NaiveDate;

    #[test]
    fn navigation_rolls_over_years_and_keeps_selection() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let mut view = ViewState::new(today);

        assert_eq!(view.previous_month(), MonthCursor::new(2023, 12).unwrap());
        assert_eq!(view.selected_date, today);
        assert_eq!(view.next_month(), MonthCursor::new(2024, 1).unwrap());
    }

    #[test]
    fn selecting_another_month_day_keeps_cursor() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let mut view = ViewState::new(today);
        view.select_date(NaiveDate::from_ymd_opt(2024, 2, 26).unwrap());
        assert_eq!(view.month_cursor, MonthCursor::new(2024, 3).unwrap());
    }
}
