//! Call graph assembly
//!
//! # Usage
//!
//! ```rust,ignore
//! let registry = load_types_from_path("src_comp.db")?;
//! let bodies = load_bodies_from_path("src_body.db")?;
//! let policy = GcPolicy::builtin();
//!
//! let graph = CallGraphBuilder::new(&registry, &policy, &NoEdgeProperties).build(&bodies);
//! ```

use std::time::Instant;

use rayon::prelude::*;
use tracing::info;

use crate::features::call_graph::domain::{CallGraph, VirtualTargets};
use crate::features::callee_resolution::{
    get_callees, CallAttrs, CalleeCandidate, EdgePropertiesOracle, ResolvedCallee,
};
use crate::features::class_hierarchy::{field_key, Registry};
use crate::features::gc_policy::{is_suppression_constructor_name, GcPolicy};
use crate::shared::FunctionBody;

/// Declarations carrying this annotation never GC
pub const SUPPRESS_GC_ANNOTATION: (&str, &str) = ("annotate", "Suppress GC");

/// Everything resolved for one body
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedBody {
    pub function: String,
    pub calls: Vec<ResolvedCallee>,
    /// Field key -> targets, for each virtual call in the body
    pub virtual_resolutions: Vec<(String, VirtualTargets)>,
    pub ignored_caller: bool,
    pub gc_guarded: bool,
}

pub struct CallGraphBuilder<'a> {
    registry: &'a Registry,
    policy: &'a GcPolicy,
    oracle: &'a dyn EdgePropertiesOracle,
    parallel: bool,
}

impl<'a> CallGraphBuilder<'a> {
    pub fn new(
        registry: &'a Registry,
        policy: &'a GcPolicy,
        oracle: &'a dyn EdgePropertiesOracle,
    ) -> Self {
        Self {
            registry,
            policy,
            oracle,
            parallel: true,
        }
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Resolve every call edge of one body
    pub fn resolve_body(&self, body: &FunctionBody, scope: CallAttrs) -> ResolvedBody {
        let function = body.function_name();
        let mut resolved = ResolvedBody {
            function: function.to_string(),
            ignored_caller: self.policy.is_ignored_caller(function),
            ..ResolvedBody::default()
        };

        for edge in body.call_edges() {
            let mut callees = get_callees(body, edge, scope, self.oracle);

            // Suppression found on a field call also applies to its alias
            let mut alias_extra: Option<(String, CallAttrs)> = None;

            for callee in callees.iter_mut() {
                match &callee.callee {
                    CalleeCandidate::Direct { name } => {
                        if let Some((alias, extra)) = &alias_extra {
                            if alias == name {
                                callee.attrs |= *extra;
                            }
                        }
                        if self.policy.is_ignored_caller(name) {
                            callee.attrs |= CallAttrs::GC_SUPPRESSED;
                        }
                        if is_suppression_constructor_name(name) {
                            resolved.gc_guarded = true;
                        }
                    }
                    CalleeCandidate::Field {
                        declaring_csu,
                        static_csu,
                        field_name,
                        signature,
                        is_virtual,
                    } => {
                        let mut extra = CallAttrs::empty();
                        if self.policy.is_ignored_field_name(declaring_csu, field_name)
                            || self.policy.is_ignored_field_name(static_csu, field_name)
                            || self.is_suppress_gc_annotated(static_csu, declaring_csu, field_name)
                        {
                            extra |= CallAttrs::GC_SUPPRESSED;
                        }

                        if *is_virtual {
                            let targets = self.find_virtual_functions(static_csu, signature);
                            if targets.suppressed {
                                extra |= CallAttrs::GC_SUPPRESSED;
                            }
                            resolved
                                .virtual_resolutions
                                .push((field_key(static_csu, signature), targets));
                        }

                        callee.attrs |= extra;
                        alias_extra = Some((field_key(static_csu, signature), extra));
                    }
                    CalleeCandidate::Indirect { variable, .. } => {
                        if self.policy.is_ignored_indirect_target(function, variable) {
                            callee.attrs |= CallAttrs::GC_SUPPRESSED;
                        }
                    }
                    CalleeCandidate::Unknown => {}
                }
            }

            trace_edge!(caller = function, callees = callees.len(), "resolved edge");
            resolved.calls.extend(callees);
        }

        resolved
    }

    fn is_suppress_gc_annotated(&self, static_csu: &str, declaring_csu: &str, field_name: &str) -> bool {
        let (ty, value) = SUPPRESS_GC_ANNOTATION;
        [static_csu, declaring_csu].iter().any(|csu| {
            self.registry
                .find_virtual_method(csu, field_name)
                .map_or(false, |m| m.has_annotation(ty, value))
        })
    }

    /// Implementations a virtual call through `static_csu` may reach
    ///
    /// Walks up from `static_csu` first: a suppressed method ends the
    /// search with no targets, and an overridable one marks the call as
    /// able to run arbitrary code. Then collects definitions from
    /// `static_csu` and every descendant.
    pub fn find_virtual_functions(&self, static_csu: &str, signature: &str) -> VirtualTargets {
        let field_name = signature
            .rsplit_once(':')
            .map_or(signature, |(name, _)| name);

        let mut result = VirtualTargets::default();

        let ancestors = self.registry.all_superclasses(static_csu);
        for csu in std::iter::once(static_csu).chain(ancestors.iter().map(String::as_str)) {
            if self.policy.is_suppressed_virtual_method(csu, field_name) {
                return VirtualTargets::suppressed();
            }
            if self.policy.is_overridable_field(static_csu, csu, field_name) {
                result.can_run_arbitrary_code = true;
            }
        }

        let descendants = self.registry.all_subclasses(static_csu);
        for csu in std::iter::once(static_csu).chain(descendants.iter().map(String::as_str)) {
            result.targets.extend(
                self.registry
                    .virtual_definitions(&field_key(csu, signature))
                    .map(str::to_string),
            );
        }

        result
    }

    /// Resolve every body and assemble the graph
    pub fn build(&self, bodies: &[FunctionBody]) -> CallGraph {
        let start = Instant::now();

        let resolved: Vec<ResolvedBody> = if self.parallel {
            bodies
                .par_iter()
                .map(|body| self.resolve_body(body, CallAttrs::empty()))
                .collect()
        } else {
            bodies
                .iter()
                .map(|body| self.resolve_body(body, CallAttrs::empty()))
                .collect()
        };

        let mut graph = CallGraph::new();
        for body in resolved {
            graph.add_function(&body.function);
            for callee in body.calls {
                graph.add_call(&body.function, callee);
            }
            for (key, targets) in body.virtual_resolutions {
                graph.add_virtual_resolution(key, targets);
            }
            if body.ignored_caller {
                graph.mark_ignored_caller(&body.function);
            }
            if body.gc_guarded {
                graph.mark_gc_guarded(&body.function);
            }
        }

        for edge in self.registry.synthetic_destructor_edges() {
            graph.add_call(
                &edge.caller,
                ResolvedCallee::new(
                    CalleeCandidate::direct(edge.callee.as_str()),
                    CallAttrs::SYNTHETIC,
                ),
            );
        }

        info!(
            bodies = bodies.len(),
            edges = graph.edge_count(),
            virtual_calls = graph.virtual_resolutions().len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Call graph assembled"
        );
        graph
    }
}
