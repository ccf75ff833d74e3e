//! Plain-text rendering of screen sections.

use calorie_core::autocomplete::render_marked;
use calorie_core::calendar::{CellHighlight, GridRow};
use calorie_core::model::month::format_date;
use calorie_core::Screen;
use chrono::Datelike;
use std::io::{self, Write};

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

pub fn day(screen: &Screen, out: &mut impl Write) -> io::Result<()> {
    let Some(day) = &screen.day else {
        return writeln!(out, "{}: loading", format_date(screen.selected_date));
    };
    writeln!(out, "{}", format_date(day.date))?;
    for item in &day.items {
        writeln!(
            out,
            "  #{:<4} {:<24} {:>7} x{:<4} = {:>7}",
            item.id,
            item.name,
            number(item.calories),
            number(item.multiplier),
            number(item.effective_calories)
        )?;
    }
    writeln!(out, "total {}", number(day.total))?;
    writeln!(out, "left {}", number(day.budget_left))?;
    writeln!(out, "loss {}g", day.loss.grams)?;
    if let Some(weight) = day.weight {
        writeln!(out, "weight {}", number(weight))?;
    }
    Ok(())
}

/// Month grid; `*` marks today, `>` the selected day, `()` days outside the month.
pub fn calendar(screen: &Screen, out: &mut impl Write) -> io::Result<()> {
    let grid = &screen.calendar;
    writeln!(out, "{}", grid.month)?;
    writeln!(out, "{} | week", WEEKDAYS.map(|d| format!("{d:>9}")).join(""))?;
    for row in &grid.rows {
        match row {
            GridRow::Blank => writeln!(out)?,
            GridRow::Week(week) => {
                let mut line = String::new();
                for cell in &week.days {
                    let mark = match cell.highlight {
                        CellHighlight::Today => "*",
                        CellHighlight::Selected => ">",
                        CellHighlight::None => " ",
                    };
                    let label = if cell.in_month {
                        format!("{mark}{:>2}", cell.date.day())
                    } else {
                        format!("({:>2})", cell.date.day())
                    };
                    let loss = cell
                        .loss
                        .map(|badge| format!("{}g", badge.grams))
                        .unwrap_or_default();
                    line.push_str(&format!("{label:>4}{loss:>5}"));
                }
                let summary = week
                    .summary
                    .map(|badge| format!("{}g", badge.grams))
                    .unwrap_or_default();
                writeln!(out, "{line} | {summary}")?;
            }
        }
    }
    Ok(())
}

pub fn suggestions(screen: &Screen, out: &mut impl Write) -> io::Result<()> {
    if screen.entry.suggestions.is_empty() {
        return writeln!(out, "no suggestions");
    }
    for (index, row) in screen.entry.suggestions.iter().enumerate() {
        writeln!(
            out,
            "{}. {} {}",
            index + 1,
            render_marked(&row.segments, "[", "]"),
            number(row.calories)
        )?;
    }
    Ok(())
}

pub fn settings(screen: &Screen, out: &mut impl Write) -> io::Result<()> {
    for field in &screen.settings {
        writeln!(out, "{} {}", field.key.as_str(), number(field.committed))?;
    }
    Ok(())
}

pub fn history(screen: &Screen, out: &mut impl Write) -> io::Result<()> {
    if screen.weight_history.is_empty() {
        return writeln!(out, "no weights recorded");
    }
    for point in &screen.weight_history {
        writeln!(out, "{} {}", format_date(point.date), number(point.weight))?;
    }
    Ok(())
}

/// Whole numbers print without a fraction.
fn number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}
