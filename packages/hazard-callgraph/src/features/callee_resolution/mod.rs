/// Callee Resolution Feature
///
/// Turns one call edge into tagged candidate callees plus an attribute
/// mask. Field calls produce a single `Field` candidate; `flatten()` adds
/// the synthetic direct alias for consumers that only want names.
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use domain::*;
pub use infrastructure::*;
pub use ports::*;
