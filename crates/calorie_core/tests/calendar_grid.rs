use calorie_core::calendar::{grid_bounds, render, GridRow};
use calorie_core::{CalendarData, Configuration, MonthCursor};
use chrono::{Datelike, NaiveDate, Weekday};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[test]
fn every_month_grid_is_complete_and_aligned() {
    let mut month = MonthCursor::new(1999, 1).unwrap();
    for _ in 0..(12 * 40) {
        let selected = month.first_day();
        let grid = render(
            month,
            &CalendarData::new(),
            &Configuration::default(),
            selected,
            selected,
        );

        let cells: Vec<_> = grid.days().collect();
        assert_eq!(cells.len() % 7, 0, "{month}");
        assert_eq!(cells[0].date.weekday(), Weekday::Mon, "{month}");
        assert_eq!(cells[cells.len() - 1].date.weekday(), Weekday::Sun, "{month}");

        let in_month: Vec<_> = cells.iter().filter(|cell| cell.in_month).collect();
        assert_eq!(in_month.len() as u32, month.days_in_month(), "{month}");
        for (offset, cell) in in_month.iter().enumerate() {
            assert_eq!(cell.date.day() as usize, offset + 1, "{month}");
        }

        let weeks = grid.weeks().count();
        let blanks = grid
            .rows
            .iter()
            .filter(|row| matches!(row, GridRow::Blank))
            .count();
        assert_eq!(blanks, usize::from(weeks <= 5), "{month}");

        month = month.next();
    }
}

#[test]
fn grid_bounds_match_cells() {
    let month = MonthCursor::new(2024, 9).unwrap();
    let (start, end) = grid_bounds(month);
    let grid = render(
        month,
        &CalendarData::new(),
        &Configuration::default(),
        start,
        start,
    );
    assert_eq!(grid.days().next().map(|cell| cell.date), Some(start));
    assert_eq!(grid.days().last().map(|cell| cell.date), Some(end));
}

#[test]
fn week_summary_scales_metabolism_by_days_with_data() {
    // 2024-03-04 is a Monday.
    let mut data = CalendarData::new();
    data.insert(date(2024, 3, 4), 500.0);
    data.insert(date(2024, 3, 6), 600.0);
    data.insert(date(2024, 3, 9), 700.0);

    let grid = render(
        MonthCursor::new(2024, 3).unwrap(),
        &data,
        &Configuration::default(),
        date(2024, 3, 1),
        date(2024, 3, 1),
    );
    let week = grid
        .weeks()
        .find(|week| week.days[0].date == date(2024, 3, 4))
        .unwrap();
    let summary = week.summary.unwrap();
    assert_eq!(summary.grams, 545);
    assert_eq!(summary.color.saturation, 100);
}

#[test]
fn week_without_data_has_no_summary_but_zero_sum_week_does() {
    let mut data = CalendarData::new();
    data.insert(date(2024, 3, 12), 50.0);
    data.insert(date(2024, 3, 13), -50.0);

    let grid = render(
        MonthCursor::new(2024, 3).unwrap(),
        &data,
        &Configuration::default(),
        date(2024, 3, 1),
        date(2024, 3, 1),
    );
    let summaries: Vec<_> = grid.weeks().map(|week| week.summary).collect();
    assert!(summaries[0].is_none());
    // Week of Monday 2024-03-11: 0 kcal against 2 x 2000.
    assert_eq!(summaries[2].map(|badge| badge.grams), Some(519));
}

#[test]
fn dates_outside_month_are_dimmed_but_keep_their_data() {
    let mut data = CalendarData::new();
    data.insert(date(2024, 2, 27), 2000.0);
    let grid = render(
        MonthCursor::new(2024, 3).unwrap(),
        &data,
        &Configuration::default(),
        date(2024, 3, 1),
        date(2024, 3, 1),
    );
    let cell = grid.cell(date(2024, 2, 27)).unwrap();
    assert!(!cell.in_month);
    assert_eq!(cell.loss.map(|badge| badge.grams), Some(0));
}
