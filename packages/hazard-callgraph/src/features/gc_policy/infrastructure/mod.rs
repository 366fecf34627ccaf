pub mod policy;

pub use policy::{
    is_rooted_pointer_type_name, is_rooted_type_name, is_suppression_constructor_name, GcPolicy,
    BUILTIN_POLICY,
};
