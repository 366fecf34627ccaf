/// GC Policy Feature
///
/// Curated knowledge the analysis cannot derive on its own:
/// - function pointer calls, fields and whole functions known not to GC
/// - stack types that root the pointer they hold
/// - RAII guards that suppress GC for their lifetime
/// - interfaces whose methods script may implement
///
/// Configuration can add entries but never removes built-in ones.
pub mod domain;
pub mod infrastructure;

pub use domain::strip_ucs_and_namespace;
pub use infrastructure::*;
