//! End-to-end callee resolution scenarios
//!
//! Each test loads a small hierarchy, resolves one kind of call and checks
//! the candidates and attributes a downstream hazard analysis would see.

mod common;

use common::*;
use hazard_callgraph::config::AnalysisConfig;
use hazard_callgraph::features::call_graph::CallGraphBuilder;
use hazard_callgraph::features::class_hierarchy::RegistryBuilder;
use hazard_callgraph::shared::{CallEdge, CsuDescription, Expression, FunctionBody};
use hazard_callgraph::{
    get_callees, resolve_callees, resolve_callees_flat, CallAttrs, CalleeCandidate, GcPolicy,
    NoEdgeProperties, Registry, RuleBasedOracle, VirtualTargets,
};
use pretty_assertions::assert_eq;

fn registry(records: &[(&str, &str)]) -> Registry {
    let mut builder = RegistryBuilder::new();
    for (key, text) in records {
        let mut descriptions: Vec<CsuDescription> = serde_json::from_str(text).unwrap();
        builder.ingest_csu(key, &descriptions.remove(0)).unwrap();
    }
    builder.build()
}

#[test]
fn test_direct_call_resolves_to_one_callee() {
    let edge = direct_call("_Z2gcv$void gc()");
    assert_eq!(
        resolve_callees_flat(&edge),
        vec![CalleeCandidate::direct("_Z2gcv$void gc()")]
    );
}

#[test]
fn test_field_call_flattens_to_field_and_alias() {
    let edge = method_call("Base", method_field("Base", "foo", 1));

    let compact = resolve_callees(&edge);
    assert_eq!(compact.len(), 1);

    let flat = resolve_callees_flat(&edge);
    assert_eq!(
        flat,
        vec![
            CalleeCandidate::Field {
                declaring_csu: "Base".to_string(),
                static_csu: "Base".to_string(),
                field_name: "foo".to_string(),
                signature: "foo:1".to_string(),
                is_virtual: true,
            },
            CalleeCandidate::direct("Base:foo:1"),
        ]
    );
}

#[test]
fn test_call_through_derived_pointer_uses_static_type() {
    // Field declared on Base, called through a Derived*
    let edge = method_call("Derived", method_field("Base", "foo", 1));
    let flat = resolve_callees_flat(&edge);
    assert_eq!(flat[1], CalleeCandidate::direct("Derived:foo:1"));
    match &flat[0] {
        CalleeCandidate::Field {
            declaring_csu,
            static_csu,
            ..
        } => {
            assert_eq!(declaring_csu, "Base");
            assert_eq!(static_csu, "Derived");
        }
        other => panic!("expected field candidate, got {:?}", other),
    }
}

#[test]
fn test_integer_callee_is_crash_and_dereferenced_integer_is_unknown() {
    let zero = || Expression::Int {
        value: Some("0".to_string()),
    };
    assert!(resolve_callees(&CallEdge::call(zero())).is_empty());

    // *0 is an unknown call, not a crash
    assert_eq!(
        resolve_callees(&CallEdge::call(Expression::deref(zero()))),
        vec![CalleeCandidate::Unknown]
    );
    assert_eq!(
        resolve_callees_flat(&CallEdge::call(Expression::deref(Expression::deref(zero())))),
        vec![CalleeCandidate::Unknown]
    );
}

#[test]
fn test_function_pointer_indirection() {
    let single = CallEdge::call(Expression::deref(local("callback")));
    let double = CallEdge::call(Expression::deref(Expression::deref(local("callback"))));

    assert_eq!(
        resolve_callees(&single),
        vec![CalleeCandidate::Indirect {
            variable: "callback".to_string(),
            indirection: 1,
        }]
    );
    assert_eq!(
        resolve_callees(&double),
        vec![CalleeCandidate::Indirect {
            variable: "callback".to_string(),
            indirection: 2,
        }]
    );
}

#[test]
fn test_unrecognized_callee_is_unknown() {
    let edge = CallEdge::call(Expression::Other);
    assert_eq!(resolve_callees(&edge), vec![CalleeCandidate::Unknown]);
}

#[test]
fn test_get_callees_applies_scope_and_rules() {
    let config = AnalysisConfig::from_yaml_str(
        r#"
version: 1
resolution:
  replacement_rules:
    - callee_contains: "nsCycleCollectingAutoRefCnt::decr"
      attrs: [NONRELEASING]
      replace_with: ["void nsCycleCollector_suspect()"]
"#,
    )
    .unwrap();
    let oracle = RuleBasedOracle::from_config(&config.resolution.replacement_rules).unwrap();

    let callee = "_ZN28nsCycleCollectingAutoRefCnt4decrEv$uint64 nsCycleCollectingAutoRefCnt::decr()";
    let edge = direct_call(callee);
    let body = FunctionBody::new("caller", vec![edge.clone()]);

    let callees = get_callees(&body, &edge, CallAttrs::DOM_ITERATING, &oracle);
    assert_eq!(callees.len(), 2);

    assert_eq!(callees[0].callee, CalleeCandidate::direct(callee));
    assert_eq!(
        callees[0].attrs,
        CallAttrs::DOM_ITERATING | CallAttrs::NONRELEASING | CallAttrs::REPLACED
    );

    assert_eq!(
        callees[1].callee,
        CalleeCandidate::direct("void nsCycleCollector_suspect()")
    );
    assert_eq!(callees[1].attrs, CallAttrs::DOM_ITERATING | CallAttrs::NONRELEASING);

    // Non-direct candidates only carry the scope
    let indirect = CallEdge::call(Expression::deref(local("hook")));
    let callees = get_callees(&body, &indirect, CallAttrs::GC_SUPPRESSED, &oracle);
    assert_eq!(callees.len(), 1);
    assert_eq!(callees[0].attrs, CallAttrs::GC_SUPPRESSED);
}

#[test]
fn test_rules_do_not_apply_to_field_alias() {
    let config = AnalysisConfig::from_yaml_str(
        r#"
version: 1
resolution:
  replacement_rules:
    - callee_contains: "Base:foo:1"
      attrs: [NONRELEASING]
      replace_with: ["void replacement()"]
"#,
    )
    .unwrap();
    let oracle = RuleBasedOracle::from_config(&config.resolution.replacement_rules).unwrap();

    let edge = method_call("Base", method_field("Base", "foo", 1));
    let body = FunctionBody::new("caller", vec![edge.clone()]);

    let callees = get_callees(&body, &edge, CallAttrs::DOM_ITERATING, &oracle);
    assert_eq!(callees.len(), 2);
    assert!(matches!(callees[0].callee, CalleeCandidate::Field { .. }));
    assert_eq!(callees[1].callee, CalleeCandidate::direct("Base:foo:1"));
    assert_eq!(callees[1].attrs, CallAttrs::DOM_ITERATING);
}

#[test]
fn test_malloc_size_of_is_ignored_everywhere() {
    let policy = GcPolicy::builtin();
    assert!(policy.is_ignored_indirect_target("_Z1fv$void f()", "mallocSizeOf"));
    assert!(policy.is_ignored_indirect_target("anything", "aMallocSizeOf"));
    assert!(!policy.is_ignored_indirect_target("_Z1fv$void f()", "callback"));
}

#[test]
fn test_synthetic_destructor_edges() {
    let registry = registry(BASE_DERIVED_TYPES);
    let edges = registry.synthetic_destructor_edges();

    let derived = edges.iter().find(|e| e.derived == "Derived").unwrap();
    assert_eq!(derived.base, "Base");
    assert_eq!(derived.caller, DERIVED_DTOR);
    assert_eq!(derived.callee, BASE_DTOR);

    // Leaf has no destructor of its own: caller is its synthetic slot
    let leaf = edges.iter().find(|e| e.derived == "Leaf").unwrap();
    assert_eq!(leaf.base, "Derived");
    assert_eq!(leaf.caller, "Leaf:~Derived:0");
    assert_eq!(leaf.callee, DERIVED_DTOR);

    assert_eq!(registry.nearest_destructor("Leaf"), Some(DERIVED_DTOR));
}

#[test]
fn test_find_virtual_functions_across_descendants() {
    let registry = registry(BASE_DERIVED_TYPES);
    let policy = GcPolicy::builtin();
    let builder = CallGraphBuilder::new(&registry, &policy, &NoEdgeProperties);

    let from_base = builder.find_virtual_functions("Base", "foo:1");
    assert_eq!(
        from_base.targets.iter().map(String::as_str).collect::<Vec<_>>(),
        vec![DERIVED_FOO]
    );
    assert!(!from_base.can_run_arbitrary_code);

    // No definitions at or below Leaf
    assert!(builder.find_virtual_functions("Leaf", "foo:1").targets.is_empty());

    // Unknown CSU is not an error
    assert_eq!(
        builder.find_virtual_functions("Nowhere", "foo:1"),
        VirtualTargets::default()
    );
}

#[test]
fn test_xpcom_release_is_suppressed_and_others_can_run_script() {
    let registry = registry(XPCOM_TYPES);
    let policy = GcPolicy::builtin();
    let builder = CallGraphBuilder::new(&registry, &policy, &NoEdgeProperties);

    assert_eq!(
        builder.find_virtual_functions("nsIObserver", "Release:0"),
        VirtualTargets::suppressed()
    );
    assert!(builder.find_virtual_functions("nsIObserver", "AddRef:0").suppressed);

    let observe = builder.find_virtual_functions("nsIObserver", "Observe:3");
    assert!(observe.can_run_arbitrary_code);
    assert!(!observe.suppressed);

    // Builtin-class methods are not script-implementable
    let scheme = builder.find_virtual_functions("nsIObserver", "GetScheme:1");
    assert!(!scheme.can_run_arbitrary_code);
}
