//! Common test utilities for hazard-callgraph
//!
//! Record fixtures shaped like the extraction pass's output, plus helpers
//! that write them into real SQLite keyed databases.

#![allow(dead_code)]

mod builders;
mod fixtures;

pub use builders::*;
pub use fixtures::*;
