//! Table-level access for the local calorie store.
//!
//! # Responsibility
//! - Keep SQL for `items`, `conf` and `weight` behind small repository traits.
//!
//! # Invariants
//! - Item writes run `validate()` before touching SQL.
//! - Rows that fail to decode surface as `InvalidData`, never as defaults.

use crate::db::DbError;
use crate::model::item::{ItemId, ItemValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod conf_repo;
pub mod item_repo;
pub mod weight_repo;

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug)]
pub enum RepoError {
    Validation(ItemValidationError),
    Db(DbError),
    NotFound(ItemId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "item not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid stored data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<ItemValidationError> for RepoError {
    fn from(value: ItemValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

pub(crate) fn decode_date(raw: &str) -> RepoResult<chrono::NaiveDate> {
    crate::model::month::parse_date(raw)
        .ok_or_else(|| RepoError::InvalidData(format!("bad date `{raw}`")))
}
