pub mod registry;
pub mod tables;

pub use registry::{Registry, RegistryBuilder, SyntheticDestructorEdge};
pub use tables::HierarchyTables;
