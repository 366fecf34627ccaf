pub mod tables;

pub use tables::{strip_ucs_and_namespace, CallerRule, IndirectCallRule, NameMatch};
