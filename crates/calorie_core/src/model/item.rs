//! Logged food item model.
//!
//! # Responsibility
//! - Define the item record shown and summed in the day view.
//! - Validate new and edited items before any request is issued.
//!
//! # Invariants
//! - `calories` and `multiplier` are finite numbers.
//! - `multiplier` is strictly positive.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service-assigned item identifier.
pub type ItemId = u64;

/// One logged food entry as stored by the calorie service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    /// Calories of a single serving.
    pub calories: f64,
    /// Number of servings.
    pub multiplier: f64,
    pub date: NaiveDate,
    /// Unix epoch seconds at insertion time.
    pub timestamp: i64,
}

impl Item {
    /// Value shown next to the item and summed into the day total.
    pub fn effective_calories(&self) -> f64 {
        self.calories * self.multiplier
    }
}

/// Validation error for item writes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ItemValidationError {
    NonFiniteCalories(f64),
    NonFiniteMultiplier(f64),
    NonPositiveMultiplier(f64),
    EmptyPatch,
}

impl Display for ItemValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonFiniteCalories(value) => write!(f, "calories must be finite, got {value}"),
            Self::NonFiniteMultiplier(value) => {
                write!(f, "multiplier must be finite, got {value}")
            }
            Self::NonPositiveMultiplier(value) => {
                write!(f, "multiplier must be > 0, got {value}")
            }
            Self::EmptyPatch => write!(f, "item edit must change at least one field"),
        }
    }
}

impl Error for ItemValidationError {}

/// Add-item request payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewItem {
    pub name: String,
    pub calories: f64,
    pub multiplier: f64,
    pub date: NaiveDate,
}

impl NewItem {
    /// Creates a single-serving item for `date`.
    pub fn new(name: impl Into<String>, calories: f64, date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            calories,
            multiplier: 1.0,
            date,
        }
    }

    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    pub fn validate(&self) -> Result<(), ItemValidationError> {
        check_calories(self.calories)?;
        check_multiplier(self.multiplier)
    }
}

/// Partial update for an existing item. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiplier: Option<f64>,
}

impl ItemPatch {
    /// The "+1" action: one more serving of an already logged item.
    pub fn plus_one(item: &Item) -> Self {
        Self {
            multiplier: Some(item.multiplier + 1.0),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.calories.is_none() && self.multiplier.is_none()
    }

    pub fn validate(&self) -> Result<(), ItemValidationError> {
        if self.is_empty() {
            return Err(ItemValidationError::EmptyPatch);
        }
        if let Some(calories) = self.calories {
            check_calories(calories)?;
        }
        if let Some(multiplier) = self.multiplier {
            check_multiplier(multiplier)?;
        }
        Ok(())
    }

    /// Applies the patch to a local copy of `item`.
    pub fn apply(&self, item: &mut Item) {
        if let Some(name) = &self.name {
            item.name = name.clone();
        }
        if let Some(calories) = self.calories {
            item.calories = calories;
        }
        if let Some(multiplier) = self.multiplier {
            item.multiplier = multiplier;
        }
    }
}

fn check_calories(value: f64) -> Result<(), ItemValidationError> {
    if !value.is_finite() {
        return Err(ItemValidationError::NonFiniteCalories(value));
    }
    Ok(())
}

fn check_multiplier(value: f64) -> Result<(), ItemValidationError> {
    if !value.is_finite() {
        return Err(ItemValidationError::NonFiniteMultiplier(value));
    }
    if value <= 0.0 {
        return Err(ItemValidationError::NonPositiveMultiplier(value));
    }
    Ok(())
}
