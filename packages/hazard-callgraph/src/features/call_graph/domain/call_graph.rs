//! Assembled call graph

use std::collections::{BTreeMap, BTreeSet};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::features::call_graph::ports::CallGraphProvider;
use crate::features::callee_resolution::{CalleeCandidate, ResolvedCallee};

/// Concrete implementations a virtual call may reach
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualTargets {
    /// Definitions in the static CSU and every descendant
    pub targets: BTreeSet<String>,

    /// Script may provide the implementation
    pub can_run_arbitrary_code: bool,

    /// Asserted GC-free regardless of implementation (`targets` is empty)
    pub suppressed: bool,
}

impl VirtualTargets {
    pub fn suppressed() -> Self {
        Self {
            suppressed: true,
            ..Self::default()
        }
    }
}

/// One line of the JSON lines output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "record", rename_all = "snake_case")]
pub enum CallGraphRecord {
    Call {
        caller: String,
        #[serde(flatten)]
        callee: ResolvedCallee,
    },
    Virtual {
        field_key: String,
        #[serde(flatten)]
        targets: VirtualTargets,
    },
    IgnoredCaller {
        function: String,
    },
    GcGuarded {
        function: String,
    },
}

/// Outgoing calls of every function, plus what downstream analysis needs
/// to interpret them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallGraph {
    calls: BTreeMap<String, Vec<ResolvedCallee>>,
    virtual_resolutions: BTreeMap<String, VirtualTargets>,
    ignored_callers: BTreeSet<String>,
    gc_guarded: BTreeSet<String>,
    callers: FxHashMap<String, BTreeSet<String>>,
}

impl CallGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an edge, keeping the reverse index current
    pub fn add_call(&mut self, caller: &str, callee: ResolvedCallee) {
        if let Some(name) = callee.callee.direct_name() {
            self.callers
                .entry(name.to_string())
                .or_default()
                .insert(caller.to_string());
        }
        self.calls.entry(caller.to_string()).or_default().push(callee);
    }

    /// Register a function with no calls
    pub fn add_function(&mut self, function: &str) {
        self.calls.entry(function.to_string()).or_default();
    }

    pub fn add_virtual_resolution(&mut self, field_key: String, targets: VirtualTargets) {
        self.virtual_resolutions.insert(field_key, targets);
    }

    pub fn mark_ignored_caller(&mut self, function: &str) {
        self.ignored_callers.insert(function.to_string());
    }

    pub fn mark_gc_guarded(&mut self, function: &str) {
        self.gc_guarded.insert(function.to_string());
    }

    /// Outgoing calls of `function`
    pub fn callees(&self, function: &str) -> &[ResolvedCallee] {
        self.calls.get(function).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Functions with a direct (or slot-alias) call to `function`
    pub fn callers(&self, function: &str) -> impl Iterator<Item = &str> {
        self.callers
            .get(function)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    pub fn virtual_resolution(&self, field_key: &str) -> Option<&VirtualTargets> {
        self.virtual_resolutions.get(field_key)
    }

    pub fn virtual_resolutions(&self) -> &BTreeMap<String, VirtualTargets> {
        &self.virtual_resolutions
    }

    pub fn ignored_callers(&self) -> &BTreeSet<String> {
        &self.ignored_callers
    }

    /// Functions that construct a GC suppression guard
    pub fn gc_guarded(&self) -> &BTreeSet<String> {
        &self.gc_guarded
    }

    /// Call sites through a function pointer or of unknown shape
    pub fn unresolved_calls(&self) -> impl Iterator<Item = (&str, &ResolvedCallee)> {
        self.calls.iter().flat_map(|(caller, callees)| {
            callees
                .iter()
                .filter(|c| {
                    matches!(
                        c.callee,
                        CalleeCandidate::Indirect { .. } | CalleeCandidate::Unknown
                    )
                })
                .map(move |c| (caller.as_str(), c))
        })
    }

    pub fn edge_count(&self) -> usize {
        self.calls.values().map(Vec::len).sum()
    }

    /// Every caller's outgoing calls, in caller order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ResolvedCallee])> {
        self.calls.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Flatten into output records: calls, then virtual resolutions, then
    /// function lists
    pub fn records(&self) -> impl Iterator<Item = CallGraphRecord> + '_ {
        let calls = self.calls.iter().flat_map(|(caller, callees)| {
            callees.iter().map(move |callee| CallGraphRecord::Call {
                caller: caller.clone(),
                callee: callee.clone(),
            })
        });
        let virtuals = self
            .virtual_resolutions
            .iter()
            .map(|(key, targets)| CallGraphRecord::Virtual {
                field_key: key.clone(),
                targets: targets.clone(),
            });
        let ignored = self
            .ignored_callers
            .iter()
            .map(|f| CallGraphRecord::IgnoredCaller { function: f.clone() });
        let guarded = self
            .gc_guarded
            .iter()
            .map(|f| CallGraphRecord::GcGuarded { function: f.clone() });

        calls.chain(virtuals).chain(ignored).chain(guarded)
    }
}

impl CallGraphProvider for CallGraph {
    fn get_callees(&self, func_name: &str) -> Vec<String> {
        self.callees(func_name)
            .iter()
            .filter_map(|c| c.callee.direct_name())
            .map(str::to_string)
            .collect()
    }

    fn get_functions(&self) -> Vec<String> {
        let functions: BTreeSet<&str> = self
            .calls
            .keys()
            .map(String::as_str)
            .chain(self.callers.keys().map(String::as_str))
            .collect();
        functions.into_iter().map(str::to_string).collect()
    }

    fn get_callers(&self, func_name: &str) -> Vec<String> {
        self.callers(func_name).map(str::to_string).collect()
    }

    fn contains_function(&self, func_name: &str) -> bool {
        self.calls.contains_key(func_name) || self.callers.contains_key(func_name)
    }
}
