//! Keyed record storage for the hazard call-graph engine
//!
//! The extraction pass writes one record per class (`src_comp`) and one
//! record per function (`src_body`) into keyed databases. This crate owns
//! the port every consumer reads through and the adapters behind it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use hazard_storage::{KeyedDatabase, SqliteKeyedDatabase};
//!
//! let db = SqliteKeyedDatabase::open("src_comp.db")?;
//! for index in db.key_range() {
//!     let key = db.read_key(index)?;
//!     let record = db.read_record(&key)?;
//!     // decode record ...
//! }
//! ```

pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::{ErrorKind, Result, StorageError};

pub use domain::KeyedDatabase;
pub use infrastructure::MemoryKeyedDatabase;

#[cfg(feature = "sqlite")]
pub use infrastructure::SqliteKeyedDatabase;
