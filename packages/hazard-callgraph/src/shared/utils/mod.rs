//! Utility modules shared across features
//!
//! - `names`: `mangled$readable` splitting and variable name simplification

pub mod names;

pub use names::{mangled_name, readable_name, simplify_variable_name, split_function};
