//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the PageSink trait.

use crate::storage::schema::initialize_schema;
use crate::storage::traits::{PageRecord, PageSink, StorageError, StorageResult};
use chrono::Utc;
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::Mutex;

/// SQLite page sink
///
/// The connection sits behind a mutex so worker-pool tasks can share one
/// sink; inserts are independent, so ordering does not matter.
pub struct SqliteSink {
    conn: Mutex<Connection>,
}

impl SqliteSink {
    /// Opens (or creates) the database and clears pages from earlier runs
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    pub fn open(path: &Path) -> StorageResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        Self::from_connection(conn)
    }

    /// Creates an in-memory database (for testing)
    pub fn open_in_memory() -> StorageResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> StorageResult<Self> {
        initialize_schema(&conn)?;
        let cleared = conn.execute("DELETE FROM pages", [])?;
        if cleared > 0 {
            tracing::debug!("Cleared {} pages from a previous benchmark", cleared);
        }

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Number of stored pages
    pub fn count_pages(&self) -> StorageResult<u64> {
        let conn = self.conn.lock().map_err(|_| StorageError::Poisoned)?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM pages", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Number of stored pages fetched by one strategy
    pub fn count_pages_for(&self, strategy: &str) -> StorageResult<u64> {
        let conn = self.conn.lock().map_err(|_| StorageError::Poisoned)?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM pages WHERE strategy = ?1",
            params![strategy],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    /// Loads every stored page in insertion order
    pub fn load_pages(&self) -> StorageResult<Vec<PageRecord>> {
        let conn = self.conn.lock().map_err(|_| StorageError::Poisoned)?;
        let mut stmt =
            conn.prepare("SELECT url, title, content, strategy FROM pages ORDER BY id")?;

        let pages = stmt
            .query_map([], |row| {
                Ok(PageRecord {
                    url: row.get(0)?,
                    title: row.get(1)?,
                    content: row.get(2)?,
                    strategy: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(pages)
    }
}

impl PageSink for SqliteSink {
    fn save(&self, record: &PageRecord) -> StorageResult<()> {
        let conn = self.conn.lock().map_err(|_| StorageError::Poisoned)?;
        conn.execute(
            "INSERT INTO pages (url, title, content, strategy, fetched_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                record.url,
                record.title,
                record.content,
                record.strategy,
                Utc::now().to_rfc3339()
            ],
        )?;
        Ok(())
    }
}
