//! Logged items: CRUD, per-day listing and per-month totals.

use crate::model::day::CalendarData;
use crate::model::item::{Item, ItemId, ItemPatch, NewItem};
use crate::model::month::{format_date, MonthCursor};
use crate::repo::{decode_date, RepoError, RepoResult};
use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};

const ITEM_SELECT_SQL: &str =
    "SELECT id, name, calories, multiplier, date, timestamp FROM items";

/// Distinct-name candidate for the autocomplete matcher.
#[derive(Debug, Clone, PartialEq)]
pub struct NameCandidate {
    pub id: ItemId,
    pub name: String,
    pub calories: f64,
}

pub trait ItemRepository {
    fn insert_item(&self, item: &NewItem, timestamp: i64) -> RepoResult<ItemId>;
    fn update_item(&self, id: ItemId, patch: &ItemPatch) -> RepoResult<()>;
    fn delete_item(&self, id: ItemId) -> RepoResult<()>;
    fn get_item(&self, id: ItemId) -> RepoResult<Option<Item>>;
    /// Items logged on `date`, ordered by timestamp then id.
    fn items_on(&self, date: NaiveDate) -> RepoResult<Vec<Item>>;
    /// Sum of effective calories per date with data in `month`.
    fn daily_totals(&self, month: MonthCursor) -> RepoResult<CalendarData>;
    /// Every logged row, newest id first.
    fn name_candidates(&self) -> RepoResult<Vec<NameCandidate>>;
}

pub struct SqliteItemRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteItemRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ItemRepository for SqliteItemRepository<'_> {
    fn insert_item(&self, item: &NewItem, timestamp: i64) -> RepoResult<ItemId> {
        item.validate()?;
        self.conn.execute(
            "INSERT INTO items (name, calories, multiplier, date, timestamp)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                item.name.as_str(),
                item.calories,
                item.multiplier,
                format_date(item.date),
                timestamp,
            ],
        )?;
        id_from_rowid(self.conn.last_insert_rowid())
    }

    fn update_item(&self, id: ItemId, patch: &ItemPatch) -> RepoResult<()> {
        patch.validate()?;
        let changed = self.conn.execute(
            "UPDATE items SET
                name = COALESCE(?1, name),
                calories = COALESCE(?2, calories),
                multiplier = COALESCE(?3, multiplier)
             WHERE id = ?4;",
            params![
                patch.name.as_deref(),
                patch.calories,
                patch.multiplier,
                rowid_from_id(id)?,
            ],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }

    fn delete_item(&self, id: ItemId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM items WHERE id = ?1;", [rowid_from_id(id)?])?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }

    fn get_item(&self, id: ItemId) -> RepoResult<Option<Item>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ITEM_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([rowid_from_id(id)?])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_item_row(row)?)),
            None => Ok(None),
        }
    }

    fn items_on(&self, date: NaiveDate) -> RepoResult<Vec<Item>> {
        let mut stmt = self.conn.prepare_cached(&format!(
            "{ITEM_SELECT_SQL} WHERE date = ?1 ORDER BY timestamp ASC, id ASC;"
        ))?;
        let mut rows = stmt.query([format_date(date)])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_item_row(row)?);
        }
        Ok(items)
    }

    fn daily_totals(&self, month: MonthCursor) -> RepoResult<CalendarData> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT date, SUM(calories * multiplier) FROM items
             WHERE date BETWEEN ?1 AND ?2
             GROUP BY date;",
        )?;
        let mut rows = stmt.query(params![
            format_date(month.first_day()),
            format_date(month.last_day()),
        ])?;

        let mut totals = CalendarData::new();
        while let Some(row) = rows.next()? {
            let raw_date: String = row.get(0)?;
            totals.insert(decode_date(&raw_date)?, row.get(1)?);
        }
        Ok(totals)
    }

    fn name_candidates(&self) -> RepoResult<Vec<NameCandidate>> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT id, name, calories FROM items ORDER BY id DESC;")?;
        let mut rows = stmt.query([])?;
        let mut candidates = Vec::new();
        while let Some(row) = rows.next()? {
            candidates.push(NameCandidate {
                id: id_from_rowid(row.get(0)?)?,
                name: row.get(1)?,
                calories: row.get(2)?,
            });
        }
        Ok(candidates)
    }
}

fn parse_item_row(row: &Row<'_>) -> RepoResult<Item> {
    let raw_date: String = row.get(4)?;
    Ok(Item {
        id: id_from_rowid(row.get(0)?)?,
        name: row.get(1)?,
        calories: row.get(2)?,
        multiplier: row.get(3)?,
        date: decode_date(&raw_date)?,
        timestamp: row.get(5)?,
    })
}

fn id_from_rowid(rowid: i64) -> RepoResult<ItemId> {
    ItemId::try_from(rowid).map_err(|_| RepoError::InvalidData(format!("negative id {rowid}")))
}

fn rowid_from_id(id: ItemId) -> RepoResult<i64> {
    i64::try_from(id).map_err(|_| RepoError::NotFound(id))
}
