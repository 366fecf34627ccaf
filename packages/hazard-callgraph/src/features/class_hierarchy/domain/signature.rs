//! Signature and field keys
//!
//! Overrides are matched by name and parameter count rather than by exact
//! mangled type, so `Base::foo(int)` and `Derived::foo(int32_t)` share a key.

use crate::shared::FieldDescriptor;

/// `"{name}:{arity}"`
pub fn signature_key(name: &str, arity: usize) -> String {
    format!("{}:{}", name, arity)
}

/// Signature key of a field descriptor
pub fn field_signature(field: &FieldDescriptor) -> String {
    signature_key(field.name(), field.arity())
}

/// `"{csu}:{signature}"`, the synthetic function identity of a method slot
pub fn field_key(csu: &str, signature: &str) -> String {
    format!("{}:{}", csu, signature)
}

/// Destructor slots are named `~Class`
pub fn is_destructor_name(name: &str) -> bool {
    name.starts_with('~')
}
