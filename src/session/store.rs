//! Key-value store backing the session
//!
//! A single SQLite table `ItemTable(key, value)`, the same layout editors use
//! for their local state databases.

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::fs;
use std::path::Path;

const UPSERT: &str = "INSERT INTO ItemTable (key, value) VALUES (?1, ?2)
     ON CONFLICT(key) DO UPDATE SET value = excluded.value";

const DELETE: &str = "DELETE FROM ItemTable WHERE key = ?1";

pub struct KvStore {
    conn: Connection,
}

impl KvStore {
    /// Open (or create) the store at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create: {}", parent.display()))?;
        }
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open: {}", path.display()))?;
        Self::init(conn)
    }

    /// Store that lives only as long as the value
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS ItemTable (key TEXT PRIMARY KEY, value TEXT NOT NULL)",
            [],
        )
        .context("Failed to create ItemTable")?;
        Ok(Self { conn })
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        self.conn
            .query_row(
                "SELECT value FROM ItemTable WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .with_context(|| format!("Failed to read key: {}", key))
    }

    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        self.conn
            .execute(UPSERT, params![key, value])
            .with_context(|| format!("Failed to write key: {}", key))?;
        Ok(())
    }

    /// Write several keys in one transaction; `None` removes the key
    ///
    /// Nothing is written if any entry fails.
    pub fn set_many(&self, entries: &[(&str, Option<&str>)]) -> Result<()> {
        let tx = self
            .conn
            .unchecked_transaction()
            .context("Failed to start transaction")?;
        for (key, value) in entries {
            match value {
                Some(v) => tx.execute(UPSERT, params![key, v]),
                None => tx.execute(DELETE, params![key]),
            }
            .with_context(|| format!("Failed to write key: {}", key))?;
        }
        tx.commit().context("Failed to commit session")?;
        Ok(())
    }

    /// Write the value, or remove the key when `None`
    pub fn set_opt(&self, key: &str, value: Option<&str>) -> Result<()> {
        match value {
            Some(v) => self.set(key, v),
            None => self.remove(key),
        }
    }

    pub fn remove(&self, key: &str) -> Result<()> {
        self.conn
            .execute(DELETE, params![key])
            .with_context(|| format!("Failed to remove key: {}", key))?;
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        self.conn
            .execute("DELETE FROM ItemTable", [])
            .context("Failed to clear ItemTable")?;
        Ok(())
    }

    pub fn keys(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT key FROM ItemTable ORDER BY key")?;
        let keys = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(keys)
    }
}
