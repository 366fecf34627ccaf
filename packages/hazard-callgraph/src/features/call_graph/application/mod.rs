pub mod builder;
pub mod load_bodies;

pub use builder::{CallGraphBuilder, ResolvedBody, SUPPRESS_GC_ANNOTATION};
pub use load_bodies::{load_bodies, load_bodies_from_path, write_json_lines, write_json_lines_to_path};
