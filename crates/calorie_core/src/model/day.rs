//! Day-level records: configuration, day summary, month totals, weights.
//!
//! # Responsibility
//! - Define the shapes returned by the day-view, calendar and weight exchanges.
//! - Normalize service-side configuration strings into typed settings.
//!
//! # Invariants
//! - `DaySummary.total` equals the sum of its items' effective calories.
//! - `CalendarData` only holds dates that have data.

use crate::model::item::Item;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_METABOLISM: f64 = 2000.0;
pub const DEFAULT_BUDGET: f64 = 2000.0;

/// Keys of the two user-editable scalar settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfKey {
    /// Daily calorie burn baseline.
    Metabolism,
    /// Daily intake target.
    Budget,
}

impl ConfKey {
    pub const ALL: [ConfKey; 2] = [ConfKey::Metabolism, ConfKey::Budget];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Metabolism => "metabolism",
            Self::Budget => "budget",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "metabolism" => Some(Self::Metabolism),
            "budget" => Some(Self::Budget),
            _ => None,
        }
    }
}

/// Committed settings shared by loss and budget computations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    pub metabolism: f64,
    pub budget: f64,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            metabolism: DEFAULT_METABOLISM,
            budget: DEFAULT_BUDGET,
        }
    }
}

impl Configuration {
    pub fn get(&self, key: ConfKey) -> f64 {
        match key {
            ConfKey::Metabolism => self.metabolism,
            ConfKey::Budget => self.budget,
        }
    }

    pub fn set(&mut self, key: ConfKey, value: f64) {
        match key {
            ConfKey::Metabolism => self.metabolism = value,
            ConfKey::Budget => self.budget = value,
        }
    }

    /// Builds settings from the service's string key/value store.
    ///
    /// Unknown keys are ignored; missing or non-numeric values keep defaults.
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut conf = Self::default();
        for (key, value) in entries {
            let Some(key) = ConfKey::parse(key) else {
                continue;
            };
            match value.trim().parse::<f64>() {
                Ok(parsed) if parsed.is_finite() => conf.set(key, parsed),
                _ => {}
            }
        }
        conf
    }
}

/// Everything the day view shows for one date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub conf: Configuration,
    pub weight: Option<f64>,
    pub total: f64,
    /// Ordered by insertion timestamp.
    pub items: Vec<Item>,
}

impl DaySummary {
    /// Sorts items by timestamp and derives the total from them.
    pub fn from_items(
        date: NaiveDate,
        conf: Configuration,
        weight: Option<f64>,
        mut items: Vec<Item>,
    ) -> Self {
        items.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then(a.id.cmp(&b.id)));
        let total = items.iter().map(Item::effective_calories).sum();
        Self {
            date,
            conf,
            weight,
            total,
            items,
        }
    }

    pub fn item(&self, id: u64) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }
}

/// Sparse per-date calorie totals for one month.
pub type CalendarData = BTreeMap<NaiveDate, f64>;

/// One recorded body weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightPoint {
    pub date: NaiveDate,
    pub weight: f64,
}
