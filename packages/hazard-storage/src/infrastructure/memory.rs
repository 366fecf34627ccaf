//! In-memory keyed database

use std::collections::HashMap;

use crate::domain::KeyedDatabase;
use crate::{Result, StorageError};

/// HashMap-backed keyed database
///
/// Keys are numbered from 1 in insertion order. Re-inserting an existing key
/// replaces its record and keeps its index.
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyedDatabase {
    keys: Vec<String>,
    records: HashMap<String, String>,
}

impl MemoryKeyedDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the record stored under `key`
    pub fn insert(&mut self, key: impl Into<String>, record: impl Into<String>) {
        let key = key.into();
        if !self.records.contains_key(&key) {
            self.keys.push(key.clone());
        }
        self.records.insert(key, record.into());
    }
}

impl<K: Into<String>, R: Into<String>> FromIterator<(K, R)> for MemoryKeyedDatabase {
    fn from_iter<I: IntoIterator<Item = (K, R)>>(iter: I) -> Self {
        let mut db = Self::new();
        for (key, record) in iter {
            db.insert(key, record);
        }
        db
    }
}

impl KeyedDatabase for MemoryKeyedDatabase {
    fn min_key(&self) -> u64 {
        1
    }

    fn max_key(&self) -> u64 {
        self.keys.len() as u64
    }

    fn read_key(&self, index: u64) -> Result<String> {
        if index < self.min_key() || index > self.max_key() {
            return Err(StorageError::key_out_of_range(
                index,
                self.min_key(),
                self.max_key(),
            ));
        }
        Ok(self.keys[(index - 1) as usize].clone())
    }

    fn read_record(&self, key: &str) -> Result<String> {
        self.records
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::record_not_found(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_insertion_order_indices() {
        let db: MemoryKeyedDatabase = [("Base", "[1]"), ("Derived", "[2]")].into_iter().collect();

        assert_eq!(db.read_key(1).unwrap(), "Base");
        assert_eq!(db.read_key(2).unwrap(), "Derived");
        assert_eq!(db.read_record("Derived").unwrap(), "[2]");
    }

    #[test]
    fn test_replace_keeps_index() {
        let mut db = MemoryKeyedDatabase::new();
        db.insert("Base", "old");
        db.insert("Base", "new");

        assert_eq!(db.len(), 1);
        assert_eq!(db.read_record("Base").unwrap(), "new");
    }

    #[test]
    fn test_out_of_range() {
        let db = MemoryKeyedDatabase::new();
        let err = db.read_key(1).unwrap_err();
        assert_eq!(err.kind, ErrorKind::KeyOutOfRange);
    }

    #[test]
    fn test_missing_record() {
        let db = MemoryKeyedDatabase::new();
        let err = db.read_record("nsISupports").unwrap_err();
        assert_eq!(err.kind, ErrorKind::RecordNotFound);
    }
}
