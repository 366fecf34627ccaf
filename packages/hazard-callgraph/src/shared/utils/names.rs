//! Function and variable name helpers
//!
//! Function symbols arrive as `mangled$readable` (older databases use `|` as
//! the separator). Variables referenced through a function pointer arrive
//! with whatever decoration the front end attached: a file scope prefix for
//! statics, a full declarator for function pointer members, namespace
//! qualification. Policy tables are keyed on the bare name, so everything
//! that consults them goes through [`simplify_variable_name`].

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// `jsgc.cpp:` style prefix on file-static names
    static ref FILE_SCOPE: Regex =
        Regex::new(r"^[\w.+-]+\.(?:c|cc|cpp|cxx|h|hh|hpp|C):").expect("valid regex");

    /// `R (* name)(args)` or `R (Class::* name)(args)` declarator
    static ref DECLARATOR: Regex =
        Regex::new(r"\(\s*(?:[\w:]+::)?\*\s*([\w:~]+)\s*\)\s*\(").expect("valid regex");
}

/// Split a full function name into `(mangled, readable)`
///
/// A name without a separator is returned as both halves.
pub fn split_function(full: &str) -> (&str, &str) {
    if let Some(idx) = full.find('$') {
        return (&full[..idx], &full[idx + 1..]);
    }
    if let Some(idx) = full.find('|') {
        return (&full[..idx], &full[idx + 1..]);
    }
    (full, full)
}

/// Readable half of a full function name
pub fn readable_name(full: &str) -> &str {
    split_function(full).1
}

/// Mangled half of a full function name
pub fn mangled_name(full: &str) -> &str {
    split_function(full).0
}

/// Reduce a variable name to the bare identifier policy tables are keyed on
///
/// ```
/// use hazard_callgraph::shared::simplify_variable_name;
///
/// assert_eq!(simplify_variable_name("jsgc.cpp:gAbortHandler"), "gAbortHandler");
/// assert_eq!(simplify_variable_name("void (* mapper)(int32)"), "mapper");
/// assert_eq!(simplify_variable_name("js::gc::callback"), "callback");
/// ```
pub fn simplify_variable_name(name: &str) -> String {
    let mut name = readable_name(name);

    if let Some(m) = FILE_SCOPE.find(name) {
        name = &name[m.end()..];
    }

    if let Some(caps) = DECLARATOR.captures(name) {
        if let Some(inner) = caps.get(1) {
            name = inner.as_str();
        }
    }

    strip_qualification(name).trim().to_string()
}

/// Part after the last top-level `::` (template and parameter lists are
/// skipped over, so `Foo<a::b>::bar` yields `bar`)
pub fn strip_qualification(name: &str) -> &str {
    let bytes = name.as_bytes();
    let mut depth = 0i32;
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'<' | b'(' => depth += 1,
            b'>' | b')' => depth -= 1,
            b':' if depth == 0 && bytes.get(i + 1) == Some(&b':') => {
                start = i + 2;
                i += 1;
            }
            _ => {}
        }
        i += 1;
    }
    &name[start..]
}
