//! SQLite-backed calorie service.
//!
//! # Responsibility
//! - Serve every exchange from one local connection.
//! - Stamp new items with the insertion time.
//!
//! # Invariants
//! - Settings are stored as strings and normalized on read.
//! - Search never returns more than the configured limit.

use crate::db::{open_db, open_db_in_memory};
use crate::model::day::{CalendarData, ConfKey, Configuration, DaySummary, WeightPoint};
use crate::model::item::{ItemId, ItemPatch, NewItem};
use crate::model::month::MonthCursor;
use crate::model::suggestion::SuggestionResult;
use crate::repo::conf_repo::{ConfRepository, SqliteConfRepository};
use crate::repo::item_repo::{ItemRepository, SqliteItemRepository};
use crate::repo::weight_repo::{SqliteWeightRepository, WeightRepository};
use crate::search::{rank_suggestions, DEFAULT_SUGGESTION_LIMIT};
use crate::service::{CalorieService, ServiceError, ServiceResult};
use chrono::NaiveDate;
use log::{debug, info};
use rusqlite::Connection;
use std::path::Path;

/// Source of insertion timestamps in unix seconds.
pub type Clock = fn() -> i64;

fn system_clock() -> i64 {
    chrono::Utc::now().timestamp()
}

pub struct LocalCalorieService {
    conn: Connection,
    clock: Clock,
    suggestion_limit: usize,
}

impl LocalCalorieService {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn,
            clock: system_clock,
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
        }
    }

    pub fn open(path: impl AsRef<Path>) -> ServiceResult<Self> {
        Ok(Self::new(open_db(path)?))
    }

    pub fn open_in_memory() -> ServiceResult<Self> {
        Ok(Self::new(open_db_in_memory()?))
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_suggestion_limit(mut self, limit: usize) -> Self {
        self.suggestion_limit = limit;
        self
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn items(&self) -> SqliteItemRepository<'_> {
        SqliteItemRepository::new(&self.conn)
    }

    fn weights(&self) -> SqliteWeightRepository<'_> {
        SqliteWeightRepository::new(&self.conn)
    }

    fn conf(&self) -> SqliteConfRepository<'_> {
        SqliteConfRepository::new(&self.conn)
    }
}

impl CalorieService for LocalCalorieService {
    fn fetch_day(&self, date: NaiveDate) -> ServiceResult<DaySummary> {
        let items = self.items().items_on(date)?;
        let entries = self.conf().entries()?;
        let conf = Configuration::from_entries(
            entries
                .iter()
                .map(|(key, value)| (key.as_str(), value.as_str())),
        );
        let weight = self.weights().weight_on(date)?;
        Ok(DaySummary::from_items(date, conf, weight, items))
    }

    fn fetch_month(&self, month: MonthCursor) -> ServiceResult<CalendarData> {
        Ok(self.items().daily_totals(month)?)
    }

    fn search(&self, query: &str) -> ServiceResult<Vec<SuggestionResult>> {
        let candidates = self.items().name_candidates()?;
        let results = rank_suggestions(&candidates, query, self.suggestion_limit);
        debug!(
            "event=search module=local_store status=ok query_chars={} candidates={} results={}",
            query.chars().count(),
            candidates.len(),
            results.len()
        );
        Ok(results)
    }

    fn write_conf(&self, key: ConfKey, value: f64) -> ServiceResult<()> {
        if !value.is_finite() {
            return Err(ServiceError::Validation(format!(
                "{} must be finite, got {value}",
                key.as_str()
            )));
        }
        self.conf().upsert(key.as_str(), &value.to_string())?;
        info!(
            "event=conf_write module=local_store status=ok key={}",
            key.as_str()
        );
        Ok(())
    }

    fn add_item(&self, item: &NewItem) -> ServiceResult<ItemId> {
        let id = self.items().insert_item(item, (self.clock)())?;
        info!("event=item_add module=local_store status=ok id={id}");
        Ok(id)
    }

    fn edit_item(&self, id: ItemId, patch: &ItemPatch) -> ServiceResult<()> {
        self.items().update_item(id, patch)?;
        info!("event=item_edit module=local_store status=ok id={id}");
        Ok(())
    }

    fn remove_item(&self, id: ItemId) -> ServiceResult<()> {
        self.items().delete_item(id)?;
        info!("event=item_remove module=local_store status=ok id={id}");
        Ok(())
    }

    fn record_weight(&self, point: WeightPoint) -> ServiceResult<()> {
        if !point.weight.is_finite() || point.weight <= 0.0 {
            return Err(ServiceError::Validation(format!(
                "weight must be > 0, got {}",
                point.weight
            )));
        }
        self.weights().record(point)?;
        info!(
            "event=weight_record module=local_store status=ok date={}",
            point.date
        );
        Ok(())
    }

    fn weight_history(&self, since: NaiveDate) -> ServiceResult<Vec<WeightPoint>> {
        Ok(self.weights().history_since(since)?)
    }
}
