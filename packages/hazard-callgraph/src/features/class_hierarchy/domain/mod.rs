pub mod signature;
pub mod virtual_method;

pub use signature::{field_key, field_signature, is_destructor_name, signature_key};
pub use virtual_method::VirtualMethod;
