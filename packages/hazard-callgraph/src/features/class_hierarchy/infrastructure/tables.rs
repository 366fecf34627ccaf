//! Hierarchy tables
//!
//! Plain data: what the loader fills, what the snapshot cache stores and
//! what a [`Registry`](super::Registry) wraps.

use std::collections::BTreeSet;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::features::class_hierarchy::domain::VirtualMethod;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyTables {
    /// CSU -> immediate bases
    pub superclasses: FxHashMap<String, BTreeSet<String>>,

    /// CSU -> immediate derived classes
    pub subclasses: FxHashMap<String, BTreeSet<String>>,

    /// CSU -> function-field declarations, in record order
    pub virtual_methods: FxHashMap<String, Vec<VirtualMethod>>,

    /// field key -> concrete definitions
    pub virtual_definitions: FxHashMap<String, BTreeSet<String>>,
}

impl HierarchyTables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `csu` a known CSU (no-op if already known)
    pub(crate) fn touch(&mut self, csu: &str) {
        if !self.superclasses.contains_key(csu) {
            self.superclasses.insert(csu.to_string(), BTreeSet::new());
        }
        if !self.subclasses.contains_key(csu) {
            self.subclasses.insert(csu.to_string(), BTreeSet::new());
        }
    }

    pub(crate) fn add_base(&mut self, csu: &str, base: &str) {
        self.touch(csu);
        self.touch(base);
        if let Some(bases) = self.superclasses.get_mut(csu) {
            bases.insert(base.to_string());
        }
        if let Some(derived) = self.subclasses.get_mut(base) {
            derived.insert(csu.to_string());
        }
    }

    pub(crate) fn add_method(&mut self, csu: &str, method: VirtualMethod) {
        let methods = self.virtual_methods.entry(csu.to_string()).or_default();
        if !methods.contains(&method) {
            methods.push(method);
        }
    }

    pub(crate) fn add_definition(&mut self, key: String, symbol: &str) {
        self.virtual_definitions
            .entry(key)
            .or_default()
            .insert(symbol.to_string());
    }

    /// Number of known CSUs
    pub fn csu_count(&self) -> usize {
        self.superclasses.len()
    }

    pub fn method_count(&self) -> usize {
        self.virtual_methods.values().map(Vec::len).sum()
    }

    /// Known CSU names, sorted
    pub fn csu_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.superclasses.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
