//! Virtual method declarations

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::signature::{field_signature, is_destructor_name};
use crate::shared::{FieldDescriptor, FunctionFieldEntry};

/// One function-field declaration as seen from a particular CSU
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualMethod {
    pub name: String,

    /// `name:arity`
    pub signature: String,

    pub field: FieldDescriptor,

    /// `(annotation type, annotation value)`
    pub annotations: BTreeSet<(String, String)>,

    /// Declared by an ancestor rather than by this CSU
    pub inherited: bool,

    /// Declared here with no definition here
    pub pure_virtual: bool,

    /// Concrete destructor symbol (destructors only, set even when inherited)
    pub dtor: Option<String>,
}

impl VirtualMethod {
    /// Build the declaration `csu` carries for `entry`
    ///
    /// Returns `None` for entries with no field or an unnamed field.
    pub fn from_entry(csu: &str, entry: &FunctionFieldEntry) -> Option<Self> {
        let field = entry.field()?;
        let name = field.name();
        if name.is_empty() {
            return None;
        }

        let inherited = field.declaring_csu() != csu;
        let definition = entry.variable.as_ref().map(|v| v.full_name().to_string());
        let dtor = if is_destructor_name(name) {
            definition.clone()
        } else {
            None
        };

        Some(Self {
            name: name.to_string(),
            signature: field_signature(field),
            field: field.clone(),
            annotations: field
                .annotation_pairs()
                .map(|(t, v)| (t.to_string(), v.to_string()))
                .collect(),
            inherited,
            pure_virtual: !inherited && definition.is_none(),
            dtor,
        })
    }

    pub fn is_destructor(&self) -> bool {
        is_destructor_name(&self.name)
    }

    pub fn has_annotation(&self, ty: &str, value: &str) -> bool {
        self.annotations
            .iter()
            .any(|(t, v)| t == ty && v == value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(json: &str) -> FunctionFieldEntry {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_pure_virtual_declaration() {
        let e = entry(
            r#"{"Field": [{"Name": ["foo"], "FieldCSU": {"Type": {"Kind": "CSU", "Name": "Base"}}, "FieldInstanceFunction": true}]}"#,
        );
        let m = VirtualMethod::from_entry("Base", &e).unwrap();
        assert_eq!(m.name, "foo");
        assert_eq!(m.signature, "foo:0");
        assert!(!m.inherited);
        assert!(m.pure_virtual);
        assert_eq!(m.dtor, None);
    }

    #[test]
    fn test_override_is_not_inherited() {
        let e = entry(
            r#"{"Field": [{"Name": ["foo"], "FieldCSU": {"Type": {"Kind": "CSU", "Name": "Derived"}}}],
                "Variable": {"Kind": "Func", "Name": ["_ZN7Derived3fooEv$void Derived::foo()"]}}"#,
        );
        let m = VirtualMethod::from_entry("Derived", &e).unwrap();
        assert!(!m.inherited);
        assert!(!m.pure_virtual);
    }

    #[test]
    fn test_base_declared_entry_is_inherited() {
        let e = entry(
            r#"{"Field": [{"Name": ["foo"], "FieldCSU": {"Type": {"Kind": "CSU", "Name": "Base"}}}],
                "Variable": {"Kind": "Func", "Name": ["_ZN7Derived3fooEv$void Derived::foo()"]}}"#,
        );
        let m = VirtualMethod::from_entry("Derived", &e).unwrap();
        assert!(m.inherited);
        assert!(!m.pure_virtual);
    }

    #[test]
    fn test_inherited_destructor_keeps_symbol() {
        let e = entry(
            r#"{"Field": [{"Name": ["~Base"], "FieldCSU": {"Type": {"Kind": "CSU", "Name": "Base"}}}],
                "Variable": {"Kind": "Func", "Name": ["_ZN7DerivedD0Ev$Derived::~Derived()"]}}"#,
        );
        let m = VirtualMethod::from_entry("Derived", &e).unwrap();
        assert!(m.is_destructor());
        assert!(m.inherited);
        assert_eq!(m.dtor.as_deref(), Some("_ZN7DerivedD0Ev$Derived::~Derived()"));
    }

    #[test]
    fn test_annotations() {
        let e = entry(
            r#"{"Field": [{"Name": ["run"], "FieldCSU": {"Type": {"Kind": "CSU", "Name": "R"}},
                "Annotation": [{"Name": ["annotate", "Suppress GC"]}]}]}"#,
        );
        let m = VirtualMethod::from_entry("R", &e).unwrap();
        assert!(m.has_annotation("annotate", "Suppress GC"));
        assert!(!m.has_annotation("annotate", "GC Call"));
    }

    #[test]
    fn test_unnamed_field_rejected() {
        let e = entry(r#"{"Field": [{"Name": [], "FieldCSU": {"Type": {"Kind": "CSU", "Name": "R"}}}]}"#);
        assert!(VirtualMethod::from_entry("R", &e).is_none());
        let empty = entry(r#"{"Field": []}"#);
        assert!(VirtualMethod::from_entry("R", &empty).is_none());
    }
}
