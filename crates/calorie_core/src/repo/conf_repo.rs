//! String key/value settings table.

use crate::repo::RepoResult;
use rusqlite::{params, Connection};

pub trait ConfRepository {
    /// All stored pairs, ordered by key.
    fn entries(&self) -> RepoResult<Vec<(String, String)>>;
    /// Inserts or replaces `key`.
    fn upsert(&self, key: &str, value: &str) -> RepoResult<()>;
}

pub struct SqliteConfRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteConfRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ConfRepository for SqliteConfRepository<'_> {
    fn entries(&self) -> RepoResult<Vec<(String, String)>> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT key, value FROM conf ORDER BY key;")?;
        let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn upsert(&self, key: &str, value: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO conf (key, value) VALUES (?1, ?2)
             ON CONFLICT (key) DO UPDATE SET value = excluded.value;",
            params![key, value],
        )?;
        Ok(())
    }
}
