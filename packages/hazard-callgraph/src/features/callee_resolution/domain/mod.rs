pub mod attrs;
pub mod candidate;

pub use attrs::CallAttrs;
pub use candidate::{CalleeCandidate, ResolvedCallee};
