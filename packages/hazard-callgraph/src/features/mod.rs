//! Feature modules - Each feature follows Hexagonal Architecture
//!
//! Each feature contains:
//! - domain/     - Pure business logic (no external dependencies)
//! - ports/      - Interface definitions (traits)
//! - application/ - Use cases
//! - infrastructure/ - External dependency implementations
//!
//! Data flows type_loader → class_hierarchy → callee_resolution → call_graph,
//! with gc_policy consulted during resolution.

pub mod class_hierarchy;
pub mod type_loader;

pub mod callee_resolution;
pub mod gc_policy;

pub mod call_graph;
