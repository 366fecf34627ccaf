//! Configuration
//!
//! A single versioned YAML file (schema v1) covering input locations,
//! additions to the classification tables and call resolution settings.
//!
//! # Examples
//!
//! ```rust,ignore
//! use hazard_callgraph::config::AnalysisConfig;
//!
//! let config = AnalysisConfig::from_yaml("hazards.yaml")?;
//! let policy = GcPolicy::with_config(&config.policy);
//! ```
//!
//! ```yaml
//! version: 1
//! inputs:
//!   types_db: src_comp.db
//!   bodies_db: src_body.db
//!   cache: types.hzcg
//! policy:
//!   extra_ignored_indirect: [gLogHook]
//! resolution:
//!   parallel: true
//! ```

pub mod analysis_config;
pub mod error;

// Re-exports
pub use analysis_config::{
    AnalysisConfig, InputConfig, PolicyConfig, ReplacementRuleConfig, ResolutionConfig,
    SUPPORTED_VERSIONS,
};
pub use error::{ConfigError, ConfigResult};
