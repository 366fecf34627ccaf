//! Configuration-driven edge properties

use tracing::debug;

use crate::config::{ConfigResult, ReplacementRuleConfig};
use crate::features::callee_resolution::domain::CallAttrs;
use crate::features::callee_resolution::ports::{EdgeProperties, EdgePropertiesOracle, ExtraCall};
use crate::shared::{CallEdge, FunctionBody};

/// Attributes and replacement calls for callees containing a pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplacementRule {
    pub callee_contains: String,
    pub attrs: CallAttrs,
    pub replace_with: Vec<String>,
}

impl ReplacementRule {
    pub fn from_config(config: &ReplacementRuleConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self {
            callee_contains: config.callee_contains.clone(),
            attrs: config.parsed_attrs()?,
            replace_with: config.replace_with.clone(),
        })
    }

    pub fn matches(&self, callee: &str) -> bool {
        callee.contains(&self.callee_contains)
    }
}

/// Applies every matching rule in order
///
/// A matching rule ORs its attributes into the edge. A rule with
/// replacements also marks the edge `REPLACED` and emits one extra direct
/// call per replacement, carrying the rule's attributes.
#[derive(Debug, Clone, Default)]
pub struct RuleBasedOracle {
    rules: Vec<ReplacementRule>,
}

impl RuleBasedOracle {
    pub fn new(rules: Vec<ReplacementRule>) -> Self {
        Self { rules }
    }

    pub fn from_config(rules: &[ReplacementRuleConfig]) -> ConfigResult<Self> {
        let rules = rules
            .iter()
            .map(ReplacementRule::from_config)
            .collect::<ConfigResult<Vec<_>>>()?;
        debug!(rules = rules.len(), "Loaded edge replacement rules");
        Ok(Self::new(rules))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl EdgePropertiesOracle for RuleBasedOracle {
    fn edge_properties(&self, _body: &FunctionBody, _edge: &CallEdge, callee: &str) -> EdgeProperties {
        let mut properties = EdgeProperties::default();

        for rule in self.rules.iter().filter(|r| r.matches(callee)) {
            properties.attrs |= rule.attrs;
            if !rule.replace_with.is_empty() {
                properties.attrs |= CallAttrs::REPLACED;
                properties.extra_calls.extend(
                    rule.replace_with
                        .iter()
                        .map(|name| ExtraCall::new(name.as_str(), rule.attrs)),
                );
            }
        }

        properties
    }
}
