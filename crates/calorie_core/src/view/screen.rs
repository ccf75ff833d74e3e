//! Serializable view model handed to whatever draws the screen.

use crate::autocomplete::{highlight, Focus, Segment};
use crate::calendar::{CalendarGrid, LossBadge};
use crate::model::day::{ConfKey, Configuration, DaySummary, WeightPoint};
use crate::model::item::{Item, ItemId};
use crate::model::suggestion::SuggestionResult;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Screen {
    pub today: NaiveDate,
    pub selected_date: NaiveDate,
    /// `None` while the selected day is loading.
    pub day: Option<DayPanel>,
    pub calendar: CalendarGrid,
    pub entry: EntryPanel,
    pub settings: Vec<SettingField>,
    pub weight_history: Vec<WeightPoint>,
    pub banner: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayPanel {
    pub date: NaiveDate,
    pub total: f64,
    pub budget_left: f64,
    /// Loss estimate against the committed metabolism.
    pub loss: LossBadge,
    pub weight: Option<f64>,
    pub items: Vec<ItemRow>,
}

impl DayPanel {
    /// Budget and loss come from `committed`, not from the loaded summary.
    pub fn new(summary: &DaySummary, committed: &Configuration) -> Self {
        Self {
            date: summary.date,
            total: summary.total,
            budget_left: committed.budget - summary.total,
            loss: LossBadge::from_totals(summary.total, committed.metabolism),
            weight: summary.weight,
            items: summary.items.iter().map(ItemRow::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemRow {
    pub id: ItemId,
    pub name: String,
    pub calories: f64,
    pub multiplier: f64,
    pub effective_calories: f64,
}

impl From<&Item> for ItemRow {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            calories: item.calories,
            multiplier: item.multiplier,
            effective_calories: item.effective_calories(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryPanel {
    pub text: String,
    pub multiplier: String,
    pub focus: Focus,
    /// Empty when the list is closed.
    pub suggestions: Vec<SuggestionRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuggestionRow {
    pub name: String,
    pub calories: f64,
    pub segments: Vec<Segment>,
    pub focused: bool,
}

impl SuggestionRow {
    pub fn new(suggestion: &SuggestionResult, focused: bool) -> Self {
        Self {
            name: suggestion.name.clone(),
            calories: suggestion.calories,
            segments: highlight(&suggestion.name, &suggestion.matched_positions),
            focused,
        }
    }
}

/// A settings input next to the value actually used in computations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettingField {
    pub key: ConfKey,
    /// What the user typed, or the committed value when untouched.
    pub input: String,
    pub committed: f64,
}
