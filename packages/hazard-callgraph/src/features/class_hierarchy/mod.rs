/// Class Hierarchy Feature
///
/// CSU super/subclass maps, per-CSU virtual method declarations and
/// per-slot concrete definitions, rebuilt from the extraction pass's CSU
/// records.
///
/// ## Keys
/// - signature key: `name:arity`
/// - field key: `Csu:name:arity` (also the synthetic name of a method slot
///   with no concrete definition)
pub mod domain;
pub mod infrastructure;

pub use domain::*;
pub use infrastructure::*;
