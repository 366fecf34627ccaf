//! SQLite Keyed Database
//!
//! File-based record store. One table:
//!
//! ```text
//! entries(id INTEGER PRIMARY KEY, key TEXT NOT NULL UNIQUE, data TEXT NOT NULL)
//! ```
//!
//! `id` is the dense key index; `key` is the class or function name.
use rusqlite::{params, Connection, OpenFlags, OptionalExtension};
use std::path::Path;
use std::sync::Mutex;
use tracing::debug;

use crate::domain::KeyedDatabase;
use crate::{Result, StorageError};

/// SQLite-backed keyed database
pub struct SqliteKeyedDatabase {
    conn: Mutex<Connection>,
    min_key: u64,
    max_key: u64,
}

impl SqliteKeyedDatabase {
    /// Open an existing database read-only
    ///
    /// A missing file is an error; SQLite would otherwise create an empty
    /// database and the load would silently see no records.
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self> {
        let path = db_path.as_ref();
        if !path.is_file() {
            return Err(StorageError::open(path.display(), "no such file"));
        }

        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
            .map_err(|e| StorageError::open(path.display(), e.to_string()).with_source(e))?;

        let (min_key, max_key) = Self::read_bounds(&conn)
            .map_err(|e| StorageError::open(path.display(), e.to_string()))?;

        debug!(path = %path.display(), min_key, max_key, "opened keyed database");

        Ok(Self {
            conn: Mutex::new(conn),
            min_key,
            max_key,
        })
    }

    /// Create (or truncate) a writable database at `db_path`
    pub fn create(db_path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(db_path)?;
        conn.execute("DROP TABLE IF EXISTS entries", [])?;
        Self::init_schema(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
            min_key: 1,
            max_key: 0,
        })
    }

    /// Create an in-memory database (for testing)
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_schema(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
            min_key: 1,
            max_key: 0,
        })
    }

    fn init_schema(conn: &Connection) -> Result<()> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS entries (
                id INTEGER PRIMARY KEY,
                key TEXT NOT NULL UNIQUE,
                data TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    fn read_bounds(conn: &Connection) -> Result<(u64, u64)> {
        let (min, max): (Option<i64>, Option<i64>) = conn.query_row(
            "SELECT MIN(id), MAX(id) FROM entries",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        match (min, max) {
            (Some(min), Some(max)) => Ok((min as u64, max as u64)),
            _ => Ok((1, 0)),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| StorageError::database("connection mutex poisoned"))
    }

    /// Append a record; the new key gets the next dense index
    pub fn insert(&mut self, key: &str, data: &str) -> Result<u64> {
        let id = self.max_key + 1;
        {
            let conn = self.lock()?;
            conn.execute(
                "INSERT INTO entries (id, key, data) VALUES (?1, ?2, ?3)",
                params![id as i64, key, data],
            )?;
        }
        self.max_key = id;
        Ok(id)
    }
}

impl KeyedDatabase for SqliteKeyedDatabase {
    fn min_key(&self) -> u64 {
        self.min_key
    }

    fn max_key(&self) -> u64 {
        self.max_key
    }

    fn read_key(&self, index: u64) -> Result<String> {
        if index < self.min_key || index > self.max_key {
            return Err(StorageError::key_out_of_range(
                index,
                self.min_key,
                self.max_key,
            ));
        }

        let conn = self.lock()?;
        conn.query_row(
            "SELECT key FROM entries WHERE id = ?1",
            params![index as i64],
            |row| row.get(0),
        )
        .optional()?
        .ok_or_else(|| StorageError::record_not_found(format!("#{}", index)))
    }

    fn read_record(&self, key: &str) -> Result<String> {
        let conn = self.lock()?;
        conn.query_row(
            "SELECT data FROM entries WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()?
        .ok_or_else(|| StorageError::record_not_found(key))
    }
}
