//! Class hierarchy and virtual method registry
//!
//! Built in two phases: a [`RegistryBuilder`] ingests CSU records one at a
//! time, then [`RegistryBuilder::build`] freezes the tables into a
//! [`Registry`] and synthesizes destructor chaining edges. The frozen
//! registry is never mutated again; transitive sub/superclass queries are
//! computed on first use and memoized.

use std::collections::{BTreeSet, VecDeque};
use std::sync::Arc;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::tables::HierarchyTables;
use crate::errors::{CallgraphError, Result};
use crate::features::class_hierarchy::domain::{field_key, VirtualMethod};
use crate::shared::CsuDescription;

/// Compiler-generated call from a derived destructor to a base destructor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntheticDestructorEdge {
    pub derived: String,
    pub base: String,
    /// Derived destructor symbol, or its field key when undefined
    pub caller: String,
    /// Base destructor symbol, or its field key when undefined
    pub callee: String,
}

/// Mutable half of the registry, used only while loading
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    tables: HierarchyTables,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume from previously built tables (cache restore)
    pub fn from_tables(tables: HierarchyTables) -> Self {
        Self { tables }
    }

    /// Add one CSU record
    ///
    /// A `FunctionField` entry without a named field is a malformed record.
    pub fn ingest_csu(&mut self, name: &str, description: &CsuDescription) -> Result<()> {
        self.tables.touch(name);

        for base in &description.base_classes {
            self.tables.add_base(name, &base.base);
        }

        for entry in &description.function_fields {
            let method = VirtualMethod::from_entry(name, entry).ok_or_else(|| {
                CallgraphError::malformed(name, "FunctionField entry without a named Field")
            })?;

            if let Some(variable) = &entry.variable {
                let key = field_key(name, &method.signature);
                self.tables.add_definition(key, variable.full_name());
            }
            self.tables.add_method(name, method);
        }

        Ok(())
    }

    pub fn tables(&self) -> &HierarchyTables {
        &self.tables
    }

    /// Freeze into a read-only registry
    pub fn build(self) -> Registry {
        let synthetic_edges = synthesize_destructor_edges(&self.tables);
        debug!(
            csus = self.tables.csu_count(),
            methods = self.tables.method_count(),
            synthetic_edges = synthetic_edges.len(),
            "Registry frozen"
        );

        Registry {
            tables: self.tables,
            synthetic_edges,
            ancestors: DashMap::new(),
            descendants: DashMap::new(),
        }
    }
}

/// One edge per (derived, immediate base) pair where the base has a
/// destructor slot
fn synthesize_destructor_edges(tables: &HierarchyTables) -> Vec<SyntheticDestructorEdge> {
    let mut edges = Vec::new();

    for derived in tables.csu_names() {
        let Some(bases) = tables.superclasses.get(derived) else {
            continue;
        };
        for base in bases {
            let Some(base_dtor) = own_destructor(tables, base) else {
                continue;
            };

            let callee = base_dtor
                .dtor
                .clone()
                .unwrap_or_else(|| field_key(base, &base_dtor.signature));
            let caller = own_destructor(tables, derived)
                .and_then(|m| m.dtor.clone())
                .unwrap_or_else(|| field_key(derived, &base_dtor.signature));

            edges.push(SyntheticDestructorEdge {
                derived: derived.to_string(),
                base: base.clone(),
                caller,
                callee,
            });
        }
    }

    edges
}

/// Destructor slot of `csu`, preferring one that carries a symbol
fn own_destructor<'a>(tables: &'a HierarchyTables, csu: &str) -> Option<&'a VirtualMethod> {
    let methods = tables.virtual_methods.get(csu)?;
    let mut dtors = methods.iter().filter(|m| m.is_destructor());
    let first = dtors.next()?;
    if first.dtor.is_some() {
        return Some(first);
    }
    Some(dtors.find(|m| m.dtor.is_some()).unwrap_or(first))
}

/// Frozen class hierarchy
///
/// `Send + Sync`; share it by reference across resolution threads.
#[derive(Debug)]
pub struct Registry {
    tables: HierarchyTables,
    synthetic_edges: Vec<SyntheticDestructorEdge>,
    ancestors: DashMap<String, Arc<BTreeSet<String>>>,
    descendants: DashMap<String, Arc<BTreeSet<String>>>,
}

impl Registry {
    /// Freeze a set of tables directly
    pub fn from_tables(tables: HierarchyTables) -> Self {
        RegistryBuilder::from_tables(tables).build()
    }

    pub fn tables(&self) -> &HierarchyTables {
        &self.tables
    }

    pub fn contains_csu(&self, csu: &str) -> bool {
        self.tables.superclasses.contains_key(csu)
    }

    /// Immediate bases (empty for unknown CSUs)
    pub fn superclasses(&self, csu: &str) -> impl Iterator<Item = &str> {
        self.tables
            .superclasses
            .get(csu)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    /// Immediate derived classes (empty for unknown CSUs)
    pub fn subclasses(&self, csu: &str) -> impl Iterator<Item = &str> {
        self.tables
            .subclasses
            .get(csu)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    /// Every transitive base of `csu`, excluding `csu` itself
    pub fn all_superclasses(&self, csu: &str) -> Arc<BTreeSet<String>> {
        if let Some(hit) = self.ancestors.get(csu) {
            return Arc::clone(hit.value());
        }
        let closure = Arc::new(closure(csu, |c| self.superclasses(c)));
        self.ancestors.insert(csu.to_string(), Arc::clone(&closure));
        closure
    }

    /// Every transitive derived class of `csu`, excluding `csu` itself
    pub fn all_subclasses(&self, csu: &str) -> Arc<BTreeSet<String>> {
        if let Some(hit) = self.descendants.get(csu) {
            return Arc::clone(hit.value());
        }
        let closure = Arc::new(closure(csu, |c| self.subclasses(c)));
        self.descendants.insert(csu.to_string(), Arc::clone(&closure));
        closure
    }

    pub fn virtual_declarations(&self, csu: &str) -> &[VirtualMethod] {
        self.tables
            .virtual_methods
            .get(csu)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Concrete definitions registered under a field key
    pub fn virtual_definitions(&self, key: &str) -> impl Iterator<Item = &str> {
        self.tables
            .virtual_definitions
            .get(key)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    /// Declaration of `field_name` as seen from `csu`
    pub fn find_virtual_method(&self, csu: &str, field_name: &str) -> Option<&VirtualMethod> {
        self.virtual_declarations(csu)
            .iter()
            .find(|m| m.name == field_name)
    }

    /// Closest concrete destructor for `csu`, searching bases breadth-first
    pub fn nearest_destructor(&self, csu: &str) -> Option<&str> {
        let mut queue = VecDeque::from([csu]);
        let mut seen = BTreeSet::new();
        while let Some(current) = queue.pop_front() {
            if !seen.insert(current) {
                continue;
            }
            if let Some(symbol) = own_destructor(&self.tables, current).and_then(|m| m.dtor.as_deref()) {
                return Some(symbol);
            }
            queue.extend(self.superclasses(current));
        }
        None
    }

    pub fn synthetic_destructor_edges(&self) -> &[SyntheticDestructorEdge] {
        &self.synthetic_edges
    }
}

impl PartialEq for Registry {
    fn eq(&self, other: &Self) -> bool {
        self.tables == other.tables
    }
}

fn closure<'a, F, I>(start: &'a str, next: F) -> BTreeSet<String>
where
    F: Fn(&'a str) -> I,
    I: Iterator<Item = &'a str>,
{
    let mut result = BTreeSet::new();
    let mut stack: Vec<&str> = next(start).collect();
    while let Some(csu) = stack.pop() {
        if csu == start || !result.insert(csu.to_string()) {
            continue;
        }
        stack.extend(next(csu));
    }
    result
}
