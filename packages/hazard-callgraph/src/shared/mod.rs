//! Shared module - Common types and utilities
//!
//! Record shapes produced by the extraction pass and the name helpers that
//! every feature uses to read them.

#[macro_use]
pub mod macros;
pub mod models;
pub mod utils;

// Re-exports for convenience
pub use models::*;
pub use utils::names::{mangled_name, readable_name, simplify_variable_name, split_function};
