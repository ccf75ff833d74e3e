//! One body weight per date.

use crate::model::day::WeightPoint;
use crate::model::month::format_date;
use crate::repo::{decode_date, RepoResult};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};

pub trait WeightRepository {
    /// Inserts or replaces the weight for `point.date`.
    fn record(&self, point: WeightPoint) -> RepoResult<()>;
    fn weight_on(&self, date: NaiveDate) -> RepoResult<Option<f64>>;
    /// Points on or after `since`, oldest first.
    fn history_since(&self, since: NaiveDate) -> RepoResult<Vec<WeightPoint>>;
}

pub struct SqliteWeightRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteWeightRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl WeightRepository for SqliteWeightRepository<'_> {
    fn record(&self, point: WeightPoint) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO weight (date, weight) VALUES (?1, ?2)
             ON CONFLICT (date) DO UPDATE SET weight = excluded.weight;",
            params![format_date(point.date), point.weight],
        )?;
        Ok(())
    }

    fn weight_on(&self, date: NaiveDate) -> RepoResult<Option<f64>> {
        Ok(self
            .conn
            .query_row(
                "SELECT weight FROM weight WHERE date = ?1;",
                [format_date(date)],
                |row| row.get(0),
            )
            .optional()?)
    }

    fn history_since(&self, since: NaiveDate) -> RepoResult<Vec<WeightPoint>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT date, weight FROM weight WHERE date >= ?1 ORDER BY date ASC;",
        )?;
        let mut rows = stmt.query([format_date(since)])?;
        let mut points = Vec::new();
        while let Some(row) = rows.next()? {
            let raw_date: String = row.get(0)?;
            points.push(WeightPoint {
                date: decode_date(&raw_date)?,
                weight: row.get(1)?,
            });
        }
        Ok(points)
    }
}
