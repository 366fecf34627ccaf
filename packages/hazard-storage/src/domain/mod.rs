//! Domain layer: the keyed record database port
//!
//! The extraction pass ships per-class descriptions and per-function bodies
//! in paginated, range-addressable stores. Every store exposes the same four
//! operations: a dense integer index range, index → key, and key → record.
//!
//! # Examples
//!
//! ```rust
//! use hazard_storage::{KeyedDatabase, MemoryKeyedDatabase};
//!
//! let mut db = MemoryKeyedDatabase::new();
//! db.insert("js::Shape", r#"[{"Name": "js::Shape"}]"#);
//!
//! for index in db.key_range() {
//!     let key = db.read_key(index).unwrap();
//!     let record = db.read_record(&key).unwrap();
//!     assert!(record.contains("js::Shape"));
//! }
//! ```

use std::ops::RangeInclusive;

use crate::Result;

/// Keyed, range-addressable record store
///
/// Indices are dense in `[min_key, max_key]`. An empty store reports a
/// range whose `max_key` is below its `min_key`.
pub trait KeyedDatabase: Send + Sync {
    /// Smallest valid key index
    fn min_key(&self) -> u64;

    /// Largest valid key index
    fn max_key(&self) -> u64;

    /// Key stored at `index`
    fn read_key(&self, index: u64) -> Result<String>;

    /// Raw record text stored under `key`
    fn read_record(&self, key: &str) -> Result<String>;

    /// All valid key indices
    fn key_range(&self) -> RangeInclusive<u64> {
        self.min_key()..=self.max_key()
    }

    /// Number of keys in the store
    fn len(&self) -> u64 {
        let (min, max) = (self.min_key(), self.max_key());
        if max < min {
            0
        } else {
            max - min + 1
        }
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
