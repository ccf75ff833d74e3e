//! Raw text field parsing. Failures here are silent no-ops for the user.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static QUICK_ENTRY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:(?P<name>.*?)\s+)?(?P<calories>[-+]?\d+(?:[.,]\d+)?)\s*$")
        .expect("valid quick entry regex")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    Empty,
    NotANumber(String),
    MissingCalories,
}

impl Display for InputError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "input is empty"),
            Self::NotANumber(raw) => write!(f, "`{raw}` is not a number"),
            Self::MissingCalories => write!(f, "entry must end with a calorie value"),
        }
    }
}

impl Error for InputError {}

/// Parses a finite number, accepting a decimal comma.
pub fn parse_number(text: &str) -> Result<f64, InputError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(InputError::Empty);
    }
    match trimmed.replace(',', ".").parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(InputError::NotANumber(trimmed.to_string())),
    }
}

/// Item typed straight into the entry field.
#[derive(Debug, Clone, PartialEq)]
pub struct QuickEntry {
    pub name: String,
    pub calories: f64,
}

/// Parses `"<name> <calories>"` or a bare `"<calories>"` (empty name).
pub fn parse_quick_entry(text: &str) -> Result<QuickEntry, InputError> {
    if text.trim().is_empty() {
        return Err(InputError::Empty);
    }
    let captures = QUICK_ENTRY_RE
        .captures(text)
        .ok_or(InputError::MissingCalories)?;
    let calories = parse_number(&captures["calories"])?;
    let name = captures
        .name("name")
        .map(|name| name.as_str().trim().to_string())
        .unwrap_or_default();
    Ok(QuickEntry { name, calories })
}
