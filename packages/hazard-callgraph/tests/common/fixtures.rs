//! Record fixtures
//!
//! Type database records use the `[{"Name": .., "CSUBaseClass": ..,
//! "FunctionField": ..}]` shape; body records are arrays of bodies.

/// `Base` declares pure virtual `foo(int)` and defines its destructor;
/// `Derived` overrides both; `Leaf` derives from `Derived` and defines
/// nothing.
pub const BASE_DERIVED_TYPES: &[(&str, &str)] = &[
    (
        "Base",
        r#"[{
            "Name": "Base",
            "FunctionField": [
                {"Field": [{"Name": ["foo", "Base::foo"],
                            "FieldCSU": {"Type": {"Kind": "CSU", "Name": "Base"}},
                            "Type": {"Kind": "Function", "TypeFunctionArguments": {"Type": [{"Kind": "Int"}]}},
                            "FieldInstanceFunction": true}]},
                {"Field": [{"Name": ["~Base", "Base::~Base"],
                            "FieldCSU": {"Type": {"Kind": "CSU", "Name": "Base"}},
                            "FieldInstanceFunction": true}],
                 "Variable": {"Kind": "Func", "Name": ["_ZN4BaseD2Ev$Base::~Base()"]}}
            ]
        }]"#,
    ),
    (
        "Derived",
        r#"[{
            "Name": "Derived",
            "CSUBaseClass": [{"Base": "Base"}],
            "FunctionField": [
                {"Field": [{"Name": ["foo", "Derived::foo"],
                            "FieldCSU": {"Type": {"Kind": "CSU", "Name": "Derived"}},
                            "Type": {"Kind": "Function", "TypeFunctionArguments": {"Type": [{"Kind": "Int"}]}},
                            "FieldInstanceFunction": true}],
                 "Variable": {"Kind": "Func", "Name": ["_ZN7Derived3fooEi$void Derived::foo(int)"]}},
                {"Field": [{"Name": ["~Derived", "Derived::~Derived"],
                            "FieldCSU": {"Type": {"Kind": "CSU", "Name": "Derived"}},
                            "FieldInstanceFunction": true}],
                 "Variable": {"Kind": "Func", "Name": ["_ZN7DerivedD2Ev$Derived::~Derived()"]}}
            ]
        }]"#,
    ),
    (
        "Leaf",
        r#"[{
            "Name": "Leaf",
            "CSUBaseClass": [{"Base": "Derived"}]
        }]"#,
    ),
];

/// XPCOM-style interface with a script-implementable descendant
pub const XPCOM_TYPES: &[(&str, &str)] = &[
    ("nsISupports", r#"[{"Name": "nsISupports"}]"#),
    (
        "nsIObserver",
        r#"[{"Name": "nsIObserver", "CSUBaseClass": [{"Base": "nsISupports"}]}]"#,
    ),
];

/// `Mixin` lists `Base::foo` without overriding it
pub const INHERITED_TYPES: &[(&str, &str)] = &[(
    "Mixin",
    r#"[{
        "Name": "Mixin",
        "CSUBaseClass": [{"Base": "Base"}],
        "FunctionField": [
            {"Field": [{"Name": ["foo", "Base::foo"],
                        "FieldCSU": {"Type": {"Kind": "CSU", "Name": "Base"}},
                        "Type": {"Kind": "Function", "TypeFunctionArguments": {"Type": [{"Kind": "Int"}]}},
                        "FieldInstanceFunction": true}]}
        ]
    }]"#,
)];

pub const DERIVED_FOO: &str = "_ZN7Derived3fooEi$void Derived::foo(int)";
pub const BASE_DTOR: &str = "_ZN4BaseD2Ev$Base::~Base()";
pub const DERIVED_DTOR: &str = "_ZN7DerivedD2Ev$Derived::~Derived()";

/// Body record for `void caller(Base*)` calling `b->foo(1)`, `gc()` and
/// `*mallocSizeOf`
pub const CALLER_BODY: (&str, &str) = (
    "_Z6callerP4Base$void caller(Base*)",
    r#"[{
        "BlockId": {"Kind": "Function", "Variable": {"Kind": "Func", "Name": ["_Z6callerP4Base$void caller(Base*)"]}},
        "PEdge": [
            {"Kind": "Call", "Index": [1, 2],
             "Exp": [{"Kind": "Drf", "Exp": [{"Kind": "Fld",
                      "Field": {"Name": ["foo", "Base::foo"],
                                "FieldCSU": {"Type": {"Kind": "CSU", "Name": "Base"}},
                                "Type": {"Kind": "Function", "TypeFunctionArguments": {"Type": [{"Kind": "Int"}]}},
                                "FieldInstanceFunction": true},
                      "Exp": [{"Kind": "Drf", "Exp": [{"Kind": "Var", "Variable": {"Kind": "Arg", "Name": ["b"]}}]}]}]}],
             "PEdgeCallInstance": {"Exp": {"Kind": "Var", "Variable": {"Kind": "Arg", "Name": ["b"]}},
                                   "Type": {"Kind": "Pointer", "Type": {"Kind": "CSU", "Name": "Base"}}}},
            {"Kind": "Call", "Index": [2, 3],
             "Exp": [{"Kind": "Var", "Variable": {"Kind": "Func", "Name": ["_Z2gcv$void gc()", "gc"]}}]},
            {"Kind": "Assign", "Index": [3, 4], "Exp": []},
            {"Kind": "Call", "Index": [4, 5],
             "Exp": [{"Kind": "Drf", "Exp": [{"Kind": "Var", "Variable": {"Kind": "Local", "Name": ["mallocSizeOf"]}}]}]}
        ]
    }]"#,
);
