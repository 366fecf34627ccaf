//! Built-in classification tables
//!
//! Hand-curated: every entry is a call the analysis cannot see through but
//! which is known not to GC, or a type with a known rooting role.

use lazy_static::lazy_static;
use regex::Regex;

/// How a caller is matched by an indirect-call rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameMatch {
    Exact(&'static str),
    Contains(&'static str),
}

impl NameMatch {
    pub fn matches(&self, name: &str) -> bool {
        match self {
            NameMatch::Exact(s) => name == *s,
            NameMatch::Contains(s) => name.contains(s),
        }
    }
}

/// Calls through `variable` (any variable when `None`) inside a matching
/// caller cannot GC
#[derive(Debug, Clone, Copy)]
pub struct IndirectCallRule {
    pub variable: Option<&'static str>,
    pub caller: NameMatch,
}

/// Function pointer variables that never GC, in any caller
pub const IGNORED_INDIRECT_VARIABLES: &[&str] = &[
    "mallocSizeOf",
    "aMallocSizeOf",
    "__conv",
    "__convf",
    "callback_newtable",
    "gAbortHandler",
    "_malloc_message",
    "je_malloc_message",
    "chunk_dalloc",
    "chunk_alloc",
];

pub const INDIRECT_CALL_RULES: &[IndirectCallRule] = &[
    IndirectCallRule {
        variable: Some("mapper"),
        caller: NameMatch::Contains("pt_MapError"),
    },
    IndirectCallRule {
        variable: Some("params"),
        caller: NameMatch::Exact("PR_ExplodeTime"),
    },
    // Script finalization hook
    IndirectCallRule {
        variable: None,
        caller: NameMatch::Contains("CallDestroyScriptHook"),
    },
    // About to throw anyway
    IndirectCallRule {
        variable: Some("callback"),
        caller: NameMatch::Contains("js::ErrorToException"),
    },
    // Only ever called with math functions
    IndirectCallRule {
        variable: Some("f"),
        caller: NameMatch::Contains("js::MathCache::lookup"),
    },
    IndirectCallRule {
        variable: Some("func"),
        caller: NameMatch::Exact("PR_CallOnce"),
    },
    IndirectCallRule {
        variable: Some("func"),
        caller: NameMatch::Exact("PR_CallOnceWithArg"),
    },
];

/// CSUs whose function pointer fields never GC
pub const IGNORED_CLASSES: &[&str] = &[
    "JSStringFinalizer",
    "SprintfState",
    "SprintfStateStr",
    "JSLocaleCallbacks",
    "JSC::ExecutableAllocator",
    "PRIOMethods",
    "_MD_IOVector",
    "malloc_table_t",
    "malloc_hook_table_t",
    "mozilla::MallocSizeOf",
    "MozMallocSizeOf",
];

/// `Csu.field` function pointer fields that never GC
pub const IGNORED_CALLEES: &[&str] = &[
    "js::Class.trace",
    "js::Class.finalize",
    "JSClassOps.trace",
    "JSClassOps.finalize",
    "JSRuntime.destroyPrincipals",
    "icu_50::UObject.__deleting_dtor",
    "mozilla::CycleCollectedJSRuntime.DescribeCustomObjects",
    "mozilla::CycleCollectedJSRuntime.NoteCustomGCThingXPCOMChildren",
    "PLDHashTableOps.hashKey",
    "PLDHashTableOps.clearEntry",
    "z_stream_s.zfree",
    "z_stream_s.zalloc",
    "GrGLInterface.fCallback",
    "std::strstreambuf._M_alloc_fun",
    "std::strstreambuf._M_free_fun",
    "mozilla::ThreadSharedFloatArrayBufferList::Storage.mFree",
    "mozilla::SizeOfState.mMallocSizeOf",
    "mozilla::gfx::SourceSurfaceRawData.mDeallocator",
];

/// Functions never treated as GC-capable callers, by mangled or readable name
pub const IGNORED_FUNCTIONS: &[&str] = &[
    "ptio.c:pt_MapError",
    "je_malloc_printf",
    "malloc_usable_size",
    "vprintf_stderr",
    "PR_ExplodeTime",
    "PR_ErrorInstallTable",
    "PR_SetThreadPrivate",
    "uint8 NS_IsMainThread()",
    "uint32 nsXPConnect::Release()",
    "uint32 nsAtom::Release()",
    "malloc",
    "calloc",
    "realloc",
    "free",
    "NS_LogInit",
    "NS_LogTerm",
    "NS_LogAddRef",
    "NS_LogRelease",
    "NS_LogCtor",
    "NS_LogDtor",
    "NS_LogCOMPtrAddRef",
    "NS_LogCOMPtrRelease",
    "NS_DebugBreak",
    "float64 JS_GetCurrentEmbedderTime()",
    "void js::Nursery::freeMallocedBuffers()",
    "JSObject* js::TenuringTracer::moveToTenuredSlow(JSObject*)",
    "void js::AutoEnterOOMUnsafeRegion::crash(uint64, int8*)",
    "void mozilla::dom::WorkerPrivate::AssertIsOnWorkerThread() const",
];

/// Ordered caller pattern rules, checked against the readable name
#[derive(Debug)]
pub enum CallerRule {
    Contains(&'static str),
    ContainsAll(&'static [&'static str]),
    RegexPair(&'static Regex, &'static Regex),
}

impl CallerRule {
    pub fn matches(&self, name: &str) -> bool {
        match self {
            CallerRule::Contains(s) => name.contains(s),
            CallerRule::ContainsAll(parts) => parts.iter().all(|p| name.contains(p)),
            CallerRule::RegexPair(a, b) => a.is_match(name) && b.is_match(name),
        }
    }
}

lazy_static! {
    static ref REFILL_OR_TRY_NEW: Regex = Regex::new(r"refillFreeList|tryNew").expect("valid regex");
    static ref NO_GC_ARG: Regex = Regex::new(r"= js::NoGC").expect("valid regex");

    pub static ref CALLER_RULES: Vec<CallerRule> = vec![
        CallerRule::Contains("google::protobuf"),
        CallerRule::Contains("void nsCOMPtr<T>::Assert_NoQueryNeeded()"),
        // Template parameter lost in extraction makes the CFG impossible
        CallerRule::ContainsAll(&["UnwrapObjectInternal", "mayBeWrapper = false"]),
        // Calls through an 'op' function pointer
        CallerRule::Contains("js::WeakMap<Key, Value, HashPolicy>::getDelegate("),
        // NoGC instantiations; needs data flow to see they cannot GC
        CallerRule::RegexPair(&*REFILL_OR_TRY_NEW, &*NO_GC_ARG),
        // Heap snapshot test mocks
        CallerRule::Contains("MockDeserializedNode::"),
        CallerRule::Contains("MockWriter::"),
        CallerRule::Contains("_Test::TestBody()"),
    ];

    /// `MaybeRooted<T, AllowGC::CanGC>::RootType`, with or without the
    /// namespace left on the enum
    pub static ref MAYBE_ROOTED_CAN_GC: Regex =
        Regex::new(r"\((?:js::)?AllowGC\)1u>::RootType").expect("valid regex");

    static ref UCS_KEYWORD: Regex = Regex::new(r"(?:struct|class|union|const) ").expect("valid regex");
    static ref KNOWN_NAMESPACE: Regex =
        Regex::new(r"js::ctypes::|js::|JS::|mozilla::dom::|mozilla::").expect("valid regex");
}

/// Types that are rooted by construction
pub const ROOTED_TYPE_NAMES: &[&str] = &["JSAddonId"];

/// Stack types that root the pointer they hold
pub const ERROR_RESULT_TYPES: &[&str] = &[
    "ErrorResult",
    "JSErrorResult",
    "WarningOnlyErrorResult",
    "binding_detail::FastErrorResult",
    "IgnoredErrorResult",
    "binding_detail::IgnoredErrorResult",
];

pub const ROOTED_POINTER_PREFIXES: &[&str] = &["Rooted", "PersistentRooted"];

/// RAII guards whose lifetime suppresses GC
pub const SUPPRESSION_GUARDS: &[&str] = &[
    "AutoSuppressGC",
    "AutoAssertNoGC",
    "AutoSuppressGCAnalysis",
    "AutoIgnoreRootingHazards",
    "AutoEnterAnalysis",
    "AutoAssertGCCallback",
    "AutoCheckCannotGC",
];

/// Virtual methods asserted GC-free on the given interface
pub const SUPPRESSED_VIRTUAL_METHODS: &[(&str, &str)] =
    &[("nsISupports", "AddRef"), ("nsISupports", "Release")];

/// Methods of dynamically overridable interfaces that script cannot implement
pub const NON_OVERRIDABLE_FIELDS: &[&str] = &[
    "GetCurrentJSContext",
    "IsOnCurrentThread",
    "GetNativeContext",
    "GetGlobalJSObject",
    "GetIsMainThread",
    "GetThreadFromPRThread",
    "DocAddSizeOfIncludingThis",
    "ConstructUbiNode",
    // builtinclass nsIPrincipal / nsIURI
    "GetSiteOrigin",
    "GetDomain",
    "GetBaseDomain",
    "GetOriginNoSuffix",
    "GetScheme",
    "GetAsciiHostPort",
    "GetAsciiSpec",
    "SchemeIs",
];

/// `(root interface, field)` pairs script cannot implement
pub const NON_OVERRIDABLE_ROOT_FIELDS: &[(&str, &str)] = &[
    ("nsIXPCScriptable", "GetScriptableFlags"),
    ("nsIXPConnectJSObjectHolder", "GetJSObject"),
    ("nsIXPConnect", "GetSafeJSContext"),
    ("nsIScriptSecurityManager", "IsSystemPrincipal"),
    ("nsIScriptContext", "GetWindowProxy"),
    ("nsIScriptContext", "GetWindowProxyPreserveColor"),
];

/// Drop `struct `/`class `/`union `/`const ` and the well known namespaces
pub fn strip_ucs_and_namespace(name: &str) -> String {
    let without_keywords = UCS_KEYWORD.replace_all(name, "");
    KNOWN_NAMESPACE
        .replace_all(&without_keywords, "")
        .into_owned()
}
