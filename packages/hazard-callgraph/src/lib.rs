/*
 * Hazard Callgraph - GC rooting hazard call graph engine
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Record models (CSU descriptions, body edges) and name helpers
 * - features/    : Vertical slices (type loading → class hierarchy → callee
 *                  resolution → call graph, with the GC policy tables)
 * - config/      : YAML analysis configuration
 *
 * Performance:
 * - Registry is immutable after load and shared across Rayon workers
 * - Transitive hierarchy closures are memoized
 * - Optional msgpack snapshot skips reparsing the type database
 */

#![allow(clippy::module_inception)] // Module naming intentional
#![allow(clippy::new_without_default)] // Default impl not always needed
#![allow(clippy::unnecessary_map_or)] // map_or style for compatibility

// ════════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ════════════════════════════════════════════════════════════════════════════

/// Shared models, macros and utilities
#[macro_use]
pub mod shared;

/// Configuration system
pub mod config;

/// Error types
pub mod errors;

/// Feature modules
pub mod features;

// ════════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ════════════════════════════════════════════════════════════════════════════

pub use config::AnalysisConfig;
pub use errors::{CallgraphError, Result};

pub use features::call_graph::{
    load_bodies, load_bodies_from_path, write_json_lines, write_json_lines_to_path, CallGraph,
    CallGraphBuilder, CallGraphProvider, CallGraphRecord, VirtualTargets,
};
pub use features::callee_resolution::{
    get_callees, resolve_callees, resolve_callees_flat, CallAttrs, CalleeCandidate,
    EdgeProperties, EdgePropertiesOracle, ExtraCall, NoEdgeProperties, ResolvedCallee,
    RuleBasedOracle,
};
pub use features::class_hierarchy::{field_key, signature_key, Registry, RegistryBuilder};
pub use features::gc_policy::{
    is_rooted_pointer_type_name, is_rooted_type_name, is_suppression_constructor_name, GcPolicy,
};
pub use features::type_loader::{load_types, load_types_from_path, load_types_with_cache};
