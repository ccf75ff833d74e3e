//! The calorie service the view controller talks to.
//!
//! # Responsibility
//! - Name one method per request/response exchange.
//! - Classify failures so the controller can decide what to surface.
//!
//! # Invariants
//! - Implementations never panic on bad input; they return `ServiceError`.

use crate::model::day::{CalendarData, ConfKey, DaySummary, WeightPoint};
use crate::model::item::{ItemId, ItemPatch, NewItem};
use crate::model::month::MonthCursor;
use crate::model::suggestion::SuggestionResult;
use crate::repo::RepoError;
use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod driver;
pub mod local;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug)]
pub enum ServiceError {
    /// The exchange never produced a response.
    Transport(String),
    /// Non-success HTTP status.
    Status(u16),
    /// A response body did not have the expected shape.
    Decode(String),
    /// The request was rejected as invalid.
    Validation(String),
    NotFound(ItemId),
    Storage(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(message) => write!(f, "transport failure: {message}"),
            Self::Status(code) => write!(f, "service responded with status {code}"),
            Self::Decode(message) => write!(f, "malformed response: {message}"),
            Self::Validation(message) => write!(f, "invalid request: {message}"),
            Self::NotFound(id) => write!(f, "item not found: {id}"),
            Self::Storage(err) => write!(f, "storage failure: {err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
            RepoError::Validation(err) => Self::Validation(err.to_string()),
            other => Self::Storage(other),
        }
    }
}

impl From<crate::db::DbError> for ServiceError {
    fn from(value: crate::db::DbError) -> Self {
        Self::Storage(RepoError::Db(value))
    }
}

/// One method per exchange with the calorie service.
pub trait CalorieService {
    /// Items, committed settings and recorded weight for `date`.
    fn fetch_day(&self, date: NaiveDate) -> ServiceResult<DaySummary>;
    /// Totals for dates with data in `month`.
    fn fetch_month(&self, month: MonthCursor) -> ServiceResult<CalendarData>;
    /// Ranked suggestions for a non-empty query.
    fn search(&self, query: &str) -> ServiceResult<Vec<SuggestionResult>>;
    fn write_conf(&self, key: ConfKey, value: f64) -> ServiceResult<()>;
    fn add_item(&self, item: &NewItem) -> ServiceResult<ItemId>;
    fn edit_item(&self, id: ItemId, patch: &ItemPatch) -> ServiceResult<()>;
    fn remove_item(&self, id: ItemId) -> ServiceResult<()>;
    fn record_weight(&self, point: WeightPoint) -> ServiceResult<()>;
    /// Recorded weights on or after `since`, oldest first.
    fn weight_history(&self, since: NaiveDate) -> ServiceResult<Vec<WeightPoint>>;
}
