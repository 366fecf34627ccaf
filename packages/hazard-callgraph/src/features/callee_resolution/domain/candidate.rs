//! Callee candidates

use serde::{Deserialize, Serialize};

use super::attrs::CallAttrs;
use crate::features::class_hierarchy::field_key;

/// One possible target of a call edge
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CalleeCandidate {
    /// Named function (full `mangled$readable` name, or a field key)
    Direct { name: String },

    /// Call through a function-typed field, virtual or not
    Field {
        /// CSU that declares the field
        declaring_csu: String,
        /// Static type of the instance at this call site
        static_csu: String,
        field_name: String,
        /// `name:arity`
        signature: String,
        is_virtual: bool,
    },

    /// Call through a function pointer variable
    Indirect {
        /// Simplified variable name
        variable: String,
        /// Dereference depth of the callee expression (1 or 2)
        indirection: u8,
    },

    /// Callee expression of an unrecognized shape
    Unknown,
}

impl CalleeCandidate {
    pub fn direct(name: impl Into<String>) -> Self {
        CalleeCandidate::Direct { name: name.into() }
    }

    /// Name of a direct candidate
    pub fn direct_name(&self) -> Option<&str> {
        match self {
            CalleeCandidate::Direct { name } => Some(name),
            _ => None,
        }
    }

    /// Synthetic direct target of a field call: the `(static_csu, field)`
    /// slot's field key
    pub fn direct_alias(&self) -> Option<CalleeCandidate> {
        match self {
            CalleeCandidate::Field {
                static_csu,
                signature,
                ..
            } => Some(CalleeCandidate::direct(field_key(static_csu, signature))),
            _ => None,
        }
    }

    /// This candidate followed by its direct alias, if any
    pub fn flatten(self) -> Vec<CalleeCandidate> {
        match self.direct_alias() {
            Some(alias) => vec![self, alias],
            None => vec![self],
        }
    }

    pub fn is_direct(&self) -> bool {
        matches!(self, CalleeCandidate::Direct { .. })
    }
}

/// A candidate together with the attributes of the edge that reaches it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedCallee {
    #[serde(flatten)]
    pub callee: CalleeCandidate,
    pub attrs: CallAttrs,
}

impl ResolvedCallee {
    pub fn new(callee: CalleeCandidate, attrs: CallAttrs) -> Self {
        Self { callee, attrs }
    }
}
