/// Type Database Loader Feature
///
/// Reads the keyed database of CSU records into a frozen
/// [`Registry`](crate::features::class_hierarchy::Registry), optionally
/// through a binary snapshot that skips reparsing on later runs.
pub mod application;
pub mod infrastructure;

// Re-export application layer (primary interface)
pub use application::*;

pub use infrastructure::{CacheError, CacheResult};
