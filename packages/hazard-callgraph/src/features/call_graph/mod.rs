/// Call Graph Feature
///
/// Resolves every call edge of every function body against the class
/// registry and GC policy, then assembles the results (plus synthetic
/// destructor edges) into a [`CallGraph`].
pub mod application;
pub mod domain;
pub mod ports;

pub use application::*;
pub use domain::*;
pub use ports::CallGraphProvider;
