//! Analysis configuration (YAML schema v1)
//!
//! Every section is optional in the file; missing sections take their
//! defaults. Policy lists only ever add to the built-in tables.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};
use crate::features::callee_resolution::CallAttrs;

/// Supported schema versions
pub const SUPPORTED_VERSIONS: &[u32] = &[1];

/// Root of the YAML file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Schema version (always 1 for v1)
    pub version: u32,

    #[serde(default)]
    pub inputs: InputConfig,

    #[serde(default)]
    pub policy: PolicyConfig,

    #[serde(default)]
    pub resolution: ResolutionConfig,
}

/// Database and cache locations
///
/// Command line flags override these.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputConfig {
    /// Keyed database of CSU records
    #[serde(default)]
    pub types_db: Option<PathBuf>,

    /// Keyed database of function bodies
    #[serde(default)]
    pub bodies_db: Option<PathBuf>,

    /// Registry snapshot cache
    #[serde(default)]
    pub cache: Option<PathBuf>,
}

/// Additions to the built-in classification tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyConfig {
    /// Function pointer variable names whose calls never GC
    #[serde(default)]
    pub extra_ignored_indirect: Vec<String>,

    /// `Csu.field` names whose calls never GC
    #[serde(default)]
    pub extra_ignored_fields: Vec<String>,

    /// CSUs all of whose function pointer fields never GC
    #[serde(default)]
    pub extra_ignored_classes: Vec<String>,

    /// Functions (mangled or readable) never treated as callers
    #[serde(default)]
    pub extra_ignored_functions: Vec<String>,

    /// Interfaces whose methods may be implemented by script
    #[serde(default = "default_overridable_roots")]
    pub overridable_roots: Vec<String>,
}

fn default_overridable_roots() -> Vec<String> {
    vec!["nsISupports".to_string()]
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            extra_ignored_indirect: Vec::new(),
            extra_ignored_fields: Vec::new(),
            extra_ignored_classes: Vec::new(),
            extra_ignored_functions: Vec::new(),
            overridable_roots: default_overridable_roots(),
        }
    }
}

impl PolicyConfig {
    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        let lists: [(&str, &[String]); 5] = [
            ("policy.extra_ignored_indirect", &self.extra_ignored_indirect),
            ("policy.extra_ignored_fields", &self.extra_ignored_fields),
            ("policy.extra_ignored_classes", &self.extra_ignored_classes),
            ("policy.extra_ignored_functions", &self.extra_ignored_functions),
            ("policy.overridable_roots", &self.overridable_roots),
        ];
        for (field, entries) in lists {
            if entries.iter().any(|e| e.trim().is_empty()) {
                return Err(ConfigError::empty_entry(field, "Remove the blank list item"));
            }
        }

        if let Some(bad) = self
            .extra_ignored_fields
            .iter()
            .find(|f| !f.contains('.'))
        {
            return Err(ConfigError::Custom(format!(
                "policy.extra_ignored_fields entry '{}' must have the form 'Csu.field'",
                bad
            )));
        }

        Ok(())
    }
}

/// Call resolution settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResolutionConfig {
    /// Resolve bodies with the rayon pool
    #[serde(default = "default_parallel")]
    pub parallel: bool,

    /// Worker threads (0=auto, 1..=256)
    #[serde(default)]
    pub num_workers: usize,

    /// Edge replacement rules, applied in order to direct callees
    #[serde(default)]
    pub replacement_rules: Vec<ReplacementRuleConfig>,
}

fn default_parallel() -> bool {
    true
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self {
            parallel: default_parallel(),
            num_workers: 0,
            replacement_rules: Vec::new(),
        }
    }
}

impl ResolutionConfig {
    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.num_workers > 256 {
            return Err(ConfigError::range_with_hint(
                "resolution.num_workers",
                self.num_workers,
                0,
                256,
                "Number of workers must be reasonable (0=auto)",
            ));
        }

        for rule in &self.replacement_rules {
            rule.validate()?;
        }

        Ok(())
    }
}

/// One edge replacement rule
///
/// ```yaml
/// - callee_contains: "nsCycleCollectingAutoRefCnt::decr"
///   attrs: [NONRELEASING]
///   replace_with: ["void nsCycleCollector_suspect()"]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReplacementRuleConfig {
    /// Substring of the full callee name
    pub callee_contains: String,

    /// Attribute names (`GC_SUPPRESSED`, `NONRELEASING`, ...)
    #[serde(default)]
    pub attrs: Vec<String>,

    /// Extra direct callees to emit for a matching edge
    #[serde(default)]
    pub replace_with: Vec<String>,
}

impl ReplacementRuleConfig {
    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.callee_contains.is_empty() {
            return Err(ConfigError::empty_entry(
                "resolution.replacement_rules.callee_contains",
                "An empty pattern would match every call",
            ));
        }
        self.parsed_attrs().map(|_| ())
    }

    /// Attribute names folded into one mask
    pub fn parsed_attrs(&self) -> ConfigResult<CallAttrs> {
        let mut attrs = CallAttrs::empty();
        for name in &self.attrs {
            let flag = CallAttrs::from_name(name).ok_or_else(|| {
                let valid: Vec<&str> = CallAttrs::all().iter_names().map(|(n, _)| n).collect();
                ConfigError::unknown_attribute_with_suggestion(
                    name.as_str(),
                    self.callee_contains.as_str(),
                    &valid,
                )
            })?;
            attrs |= flag;
        }
        Ok(attrs)
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            version: 1,
            inputs: InputConfig::default(),
            policy: PolicyConfig::default(),
            resolution: ResolutionConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Load and validate a YAML configuration file
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&content).map_err(|e| e.in_file(path))
    }

    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        // Checked before the typed decode so a missing version gets its own error
        let raw: serde_yaml::Value = serde_yaml::from_str(content)?;
        if raw.get("version").is_none() {
            return Err(ConfigError::MissingVersion);
        }

        let config: AnalysisConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> ConfigResult<String> {
        serde_yaml::to_string(self).map_err(ConfigError::Yaml)
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if !SUPPORTED_VERSIONS.contains(&self.version) {
            return Err(ConfigError::UnsupportedVersion {
                found: self.version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }
        self.policy.validate()?;
        self.resolution.validate()?;
        Ok(())
    }
}
