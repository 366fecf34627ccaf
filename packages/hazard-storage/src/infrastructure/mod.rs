//! Infrastructure layer - Keyed database adapters
//!
//! - `memory`: in-process store, used by tests and by callers that already
//!   hold decoded records
//! - `sqlite`: file-backed store (`entries(id, key, data)`)

pub mod memory;

#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use memory::MemoryKeyedDatabase;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteKeyedDatabase;
