//! Ports for callee resolution
//!
//! Which edges carry extra attributes (and which get replaced by other
//! calls) is decided outside the resolver.

use crate::features::callee_resolution::domain::CallAttrs;
use crate::shared::{CallEdge, FunctionBody};

/// An extra direct call emitted for a replaced edge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraCall {
    pub name: String,
    pub attrs: CallAttrs,
}

impl ExtraCall {
    pub fn new(name: impl Into<String>, attrs: CallAttrs) -> Self {
        Self {
            name: name.into(),
            attrs,
        }
    }
}

/// Per-edge properties for one direct callee
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeProperties {
    pub attrs: CallAttrs,
    pub extra_calls: Vec<ExtraCall>,
}

/// Source of per-edge attributes and replacements
///
/// Only consulted for direct candidates.
pub trait EdgePropertiesOracle: Send + Sync {
    fn edge_properties(&self, body: &FunctionBody, edge: &CallEdge, callee: &str) -> EdgeProperties;
}

/// Oracle that never adds anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEdgeProperties;

impl EdgePropertiesOracle for NoEdgeProperties {
    fn edge_properties(&self, _body: &FunctionBody, _edge: &CallEdge, _callee: &str) -> EdgeProperties {
        EdgeProperties::default()
    }
}
