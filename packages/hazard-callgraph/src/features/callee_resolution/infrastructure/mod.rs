pub mod resolver;
pub mod rule_oracle;

pub use resolver::{field_call_instance_csu, get_callees, resolve_callees, resolve_callees_flat};
pub use rule_oracle::{ReplacementRule, RuleBasedOracle};
