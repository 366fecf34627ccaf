//! Classification policy database
//!
//! Built-in tables merged with configured additions. All predicates are
//! pure; a `GcPolicy` is shared by reference across resolution threads.

use lazy_static::lazy_static;
use rustc_hash::FxHashSet;

use crate::config::PolicyConfig;
use crate::features::gc_policy::domain::tables::{
    strip_ucs_and_namespace, CALLER_RULES, ERROR_RESULT_TYPES, IGNORED_CALLEES, IGNORED_CLASSES,
    IGNORED_FUNCTIONS, IGNORED_INDIRECT_VARIABLES, INDIRECT_CALL_RULES, MAYBE_ROOTED_CAN_GC,
    NON_OVERRIDABLE_FIELDS, NON_OVERRIDABLE_ROOT_FIELDS, ROOTED_POINTER_PREFIXES,
    ROOTED_TYPE_NAMES, SUPPRESSED_VIRTUAL_METHODS, SUPPRESSION_GUARDS,
};
use crate::shared::{readable_name, simplify_variable_name, split_function, FieldDescriptor};

/// Classification tables consulted by call resolution and hazard analysis
#[derive(Debug, Clone)]
pub struct GcPolicy {
    ignored_indirect: FxHashSet<String>,
    ignored_classes: FxHashSet<String>,
    ignored_callees: FxHashSet<String>,
    ignored_functions: FxHashSet<String>,
    overridable_roots: FxHashSet<String>,
}

impl GcPolicy {
    /// Built-in tables only
    pub fn builtin() -> Self {
        Self::with_config(&PolicyConfig::default())
    }

    /// Built-in tables plus the configured additions
    pub fn with_config(config: &PolicyConfig) -> Self {
        fn merge(builtin: &[&str], extra: &[String]) -> FxHashSet<String> {
            builtin
                .iter()
                .map(|s| s.to_string())
                .chain(extra.iter().cloned())
                .collect()
        }

        Self {
            ignored_indirect: merge(IGNORED_INDIRECT_VARIABLES, &config.extra_ignored_indirect),
            ignored_classes: merge(IGNORED_CLASSES, &config.extra_ignored_classes),
            ignored_callees: merge(IGNORED_CALLEES, &config.extra_ignored_fields),
            ignored_functions: merge(IGNORED_FUNCTIONS, &config.extra_ignored_functions),
            overridable_roots: config.overridable_roots.iter().cloned().collect(),
        }
    }

    /// Whether a call through function pointer `variable` inside `caller`
    /// is known not to GC
    ///
    /// Both names may be full (`mangled$readable`) or readable.
    pub fn is_ignored_indirect_target(&self, caller: &str, variable: &str) -> bool {
        let name = simplify_variable_name(variable);
        if self.ignored_indirect.contains(&name)
            || self.ignored_indirect.contains(readable_name(variable))
        {
            return true;
        }

        let caller = readable_name(caller);
        INDIRECT_CALL_RULES.iter().any(|rule| {
            rule.variable.map_or(true, |v| v == name) && rule.caller.matches(caller)
        })
    }

    /// Whether calling through `csu.field` is known not to GC
    pub fn is_ignored_field_callee(&self, csu: &str, field: &FieldDescriptor) -> bool {
        self.is_ignored_field_name(csu, field.name())
    }

    pub fn is_ignored_field_name(&self, csu: &str, field_name: &str) -> bool {
        if self.ignored_classes.contains(csu) {
            return true;
        }
        self.ignored_callees
            .contains(&format!("{}.{}", csu, field_name))
    }

    /// Whether a function is excluded from GC analysis as a caller
    pub fn is_ignored_caller(&self, name: &str) -> bool {
        let (mangled, readable) = split_function(name);
        if self.ignored_functions.contains(name)
            || self.ignored_functions.contains(mangled)
            || self.ignored_functions.contains(readable)
        {
            return true;
        }
        CALLER_RULES.iter().any(|rule| rule.matches(readable))
    }

    /// Virtual methods asserted never to GC regardless of override
    pub fn is_suppressed_virtual_method(&self, csu: &str, field_name: &str) -> bool {
        SUPPRESSED_VIRTUAL_METHODS
            .iter()
            .any(|(c, f)| *c == csu && *f == field_name)
    }

    /// Whether script may provide the implementation of `field`, reached
    /// from `root_csu` while walking up to `current_csu`
    pub fn is_overridable_field(&self, root_csu: &str, current_csu: &str, field_name: &str) -> bool {
        if !self.overridable_roots.contains(current_csu) {
            return false;
        }
        if NON_OVERRIDABLE_FIELDS.contains(&field_name) {
            return false;
        }
        !NON_OVERRIDABLE_ROOT_FIELDS
            .iter()
            .any(|(c, f)| *c == root_csu && *f == field_name)
    }
}

impl Default for GcPolicy {
    fn default() -> Self {
        Self::builtin()
    }
}

lazy_static! {
    /// Built-in policy
    pub static ref BUILTIN_POLICY: GcPolicy = GcPolicy::builtin();
}

/// Types that are always rooted
pub fn is_rooted_type_name(name: &str) -> bool {
    ROOTED_TYPE_NAMES.contains(&name)
}

/// Stack wrappers that keep the pointer they hold rooted
pub fn is_rooted_pointer_type_name(name: &str) -> bool {
    let name = strip_ucs_and_namespace(name);

    if name.starts_with("MaybeRooted<") {
        return MAYBE_ROOTED_CAN_GC.is_match(&name);
    }

    if ERROR_RESULT_TYPES.contains(&name.as_str()) {
        return true;
    }

    ROOTED_POINTER_PREFIXES
        .iter()
        .any(|prefix| name.starts_with(prefix))
}

/// Constructor of a GC suppression guard (`Guard::Guard(..)`, never `~Guard`)
pub fn is_suppression_constructor_name(name: &str) -> bool {
    let readable = readable_name(name);
    if readable.contains('~') {
        return false;
    }
    SUPPRESSION_GUARDS.iter().any(|guard| {
        let ctor = format!("{}::{}(", guard, guard);
        readable.contains(&ctor)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ignored_indirect_any_caller() {
        let policy = GcPolicy::builtin();
        assert!(policy.is_ignored_indirect_target("_Z3foov$void foo()", "mallocSizeOf"));
        assert!(policy.is_ignored_indirect_target("", "mallocSizeOf"));
        assert!(policy.is_ignored_indirect_target(
            "anything",
            "_ZL13gAbortHandler$mozalloc_oom.cpp:void (* gAbortHandler)(size_t)"
        ));
        assert!(!policy.is_ignored_indirect_target("anything", "callback"));
    }

    #[test]
    fn test_caller_qualified_indirect() {
        let policy = GcPolicy::builtin();
        assert!(policy.is_ignored_indirect_target("ptio.c:pt_MapError", "mapper"));
        assert!(!policy.is_ignored_indirect_target("other", "mapper"));
        assert!(policy.is_ignored_indirect_target("PR_CallOnce", "func"));
        assert!(policy.is_ignored_indirect_target("PR_CallOnceWithArg", "func"));
        assert!(policy.is_ignored_indirect_target(
            "_ZN2js16ErrorToExceptionEv$bool js::ErrorToException(JSContext*)",
            "callback"
        ));
        assert!(policy.is_ignored_indirect_target(
            "void js::CallDestroyScriptHook(JSFreeOp*, JSScript*)",
            "hook"
        ));
    }

    #[test]
    fn test_ignored_fields() {
        let policy = GcPolicy::builtin();
        assert!(policy.is_ignored_field_name("PRIOMethods", "read"));
        assert!(policy.is_ignored_field_name("JSClassOps", "trace"));
        assert!(!policy.is_ignored_field_name("JSClassOps", "resolve"));
    }

    #[test]
    fn test_ignored_callers() {
        let policy = GcPolicy::builtin();
        assert!(policy.is_ignored_caller("malloc"));
        assert!(policy.is_ignored_caller("_Z15NS_IsMainThreadv$uint8 NS_IsMainThread()"));
        assert!(policy.is_ignored_caller("_ZN6google8protobuf7Message5ClearEv$void google::protobuf::Message::Clear()"));
        assert!(!policy.is_ignored_caller("_Z2gcv$void js::gc()"));
    }

    #[test]
    fn test_config_extends_tables() {
        let config = PolicyConfig {
            extra_ignored_indirect: vec!["gLogHook".to_string()],
            extra_ignored_fields: vec!["MyOps.onFree".to_string()],
            extra_ignored_classes: vec!["MyAllocator".to_string()],
            extra_ignored_functions: vec!["void my_abort()".to_string()],
            overridable_roots: vec!["nsISupports".to_string(), "nsIScriptable".to_string()],
        };
        let policy = GcPolicy::with_config(&config);
        assert!(policy.is_ignored_indirect_target("x", "gLogHook"));
        assert!(policy.is_ignored_field_name("MyOps", "onFree"));
        assert!(policy.is_ignored_field_name("MyAllocator", "anything"));
        assert!(policy.is_ignored_caller("_Z8my_abortv$void my_abort()"));
        assert!(policy.is_overridable_field("nsIScriptable", "nsIScriptable", "Run"));
        // Built-ins survive
        assert!(policy.is_ignored_indirect_target("x", "mallocSizeOf"));
    }

    #[test]
    fn test_overridable_field() {
        let policy = GcPolicy::builtin();
        assert!(policy.is_overridable_field("nsIObserver", "nsISupports", "Observe"));
        assert!(!policy.is_overridable_field("nsIObserver", "nsIObserver", "Observe"));
        assert!(!policy.is_overridable_field("nsIThread", "nsISupports", "IsOnCurrentThread"));
        assert!(!policy.is_overridable_field(
            "nsIXPConnect",
            "nsISupports",
            "GetSafeJSContext"
        ));
        assert!(policy.is_overridable_field("nsIFoo", "nsISupports", "GetSafeJSContext"));
    }

    #[test]
    fn test_suppressed_virtual_methods() {
        let policy = GcPolicy::builtin();
        assert!(policy.is_suppressed_virtual_method("nsISupports", "Release"));
        assert!(policy.is_suppressed_virtual_method("nsISupports", "AddRef"));
        assert!(!policy.is_suppressed_virtual_method("nsISupports", "QueryInterface"));
    }

    #[test]
    fn test_rooted_type_names() {
        assert!(is_rooted_type_name("JSAddonId"));
        assert!(!is_rooted_type_name("JSObject"));

        assert!(is_rooted_pointer_type_name("class JS::Rooted<JSObject*>"));
        assert!(is_rooted_pointer_type_name("js::PersistentRooted<JS::Value>"));
        assert!(is_rooted_pointer_type_name("mozilla::ErrorResult"));
        assert!(is_rooted_pointer_type_name(
            "mozilla::dom::binding_detail::FastErrorResult"
        ));
        assert!(is_rooted_pointer_type_name(
            "js::MaybeRooted<JSObject*, (js::AllowGC)1u>::RootType"
        ));
        assert!(!is_rooted_pointer_type_name(
            "js::MaybeRooted<JSObject*, (js::AllowGC)0u>::RootType"
        ));
        assert!(!is_rooted_pointer_type_name("JS::Handle<JSObject*>"));
    }

    #[test]
    fn test_suppression_constructor() {
        assert!(is_suppression_constructor_name(
            "_ZN2js14AutoSuppressGCC1EP9JSContext$void js::AutoSuppressGC::AutoSuppressGC(JSContext*)"
        ));
        assert!(is_suppression_constructor_name(
            "void JS::AutoAssertNoGC::AutoAssertNoGC(JSContext*)"
        ));
        assert!(!is_suppression_constructor_name(
            "void js::AutoSuppressGC::~AutoSuppressGC()"
        ));
        assert!(!is_suppression_constructor_name("void js::AutoSuppressGC::restore()"));
    }

    #[test]
    fn test_builtin_global() {
        assert!(BUILTIN_POLICY.is_ignored_caller("free"));
    }
}
