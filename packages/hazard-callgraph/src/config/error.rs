//! Configuration error types

use thiserror::Error;

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Range validation error
    #[error("Invalid range for field '{field}': {value} not in {min}..={max}. {hint}")]
    Range {
        field: String,
        value: String,
        min: String,
        max: String,
        hint: String,
    },

    /// Missing version field in YAML
    #[error("Missing 'version' field in configuration file. Add 'version: 1' to the top of your YAML file.")]
    MissingVersion,

    /// Unsupported version
    #[error("Unsupported configuration version {found}. Supported versions: {}", supported.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(", "))]
    UnsupportedVersion { found: u32, supported: Vec<u32> },

    /// Replacement rule names an attribute that does not exist
    #[error("Unknown call attribute '{name}' in replacement rule '{rule}'. {suggestion}")]
    UnknownAttribute {
        name: String,
        rule: String,
        suggestion: String,
    },

    /// A pattern or table entry that would match everything
    #[error("Empty entry in '{field}'. {hint}")]
    EmptyEntry { field: String, hint: String },

    /// Configuration file could not be read
    #[error("Cannot read configuration file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file was read but is invalid
    #[error("Invalid configuration file {path}: {source}")]
    InFile {
        path: String,
        #[source]
        source: Box<ConfigError>,
    },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Custom error
    #[error("{0}")]
    Custom(String),
}

/// Configuration result type
pub type ConfigResult<T> = Result<T, ConfigError>;

impl ConfigError {
    /// Create a range error with a hint
    pub fn range_with_hint(
        field: impl Into<String>,
        value: impl ToString,
        min: impl ToString,
        max: impl ToString,
        hint: impl Into<String>,
    ) -> Self {
        Self::Range {
            field: field.into(),
            value: value.to_string(),
            min: min.to_string(),
            max: max.to_string(),
            hint: hint.into(),
        }
    }

    /// Create an unknown attribute error with suggestion
    pub fn unknown_attribute_with_suggestion(
        name: impl Into<String>,
        rule: impl Into<String>,
        valid_names: &[&str],
    ) -> Self {
        let name = name.into();
        let suggestion = find_closest_match(&name, valid_names);

        Self::UnknownAttribute {
            name,
            rule: rule.into(),
            suggestion,
        }
    }

    /// Attach the configuration file's path
    pub fn in_file(self, path: impl AsRef<std::path::Path>) -> Self {
        Self::InFile {
            path: path.as_ref().display().to_string(),
            source: Box::new(self),
        }
    }

    pub fn empty_entry(field: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::EmptyEntry {
            field: field.into(),
            hint: hint.into(),
        }
    }
}

/// Find closest match using simple edit distance
fn find_closest_match(target: &str, candidates: &[&str]) -> String {
    match candidates
        .iter()
        .min_by_key(|candidate| levenshtein_distance(target, candidate))
    {
        Some(closest) => format!("Did you mean '{}'?", closest),
        None => "No valid names available".to_string(),
    }
}

/// Simple Levenshtein distance implementation
fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let a: Vec<char> = s1.chars().collect();
    let b: Vec<char> = s2.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut cur = vec![0; b.len() + 1];

    for (i, c1) in a.iter().enumerate() {
        cur[0] = i + 1;
        for (j, c2) in b.iter().enumerate() {
            let cost = if c1 == c2 { 0 } else { 1 };
            cur[j + 1] = (prev[j + 1] + 1) // deletion
                .min(cur[j] + 1) // insertion
                .min(prev[j] + cost); // substitution
        }
        std::mem::swap(&mut prev, &mut cur);
    }

    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_error_message() {
        let err = ConfigError::range_with_hint("num_workers", 300, 0, 256, "0 means one per core");
        let msg = err.to_string();
        assert!(msg.contains("num_workers"));
        assert!(msg.contains("300"));
        assert!(msg.contains("0..=256"));
        assert!(msg.contains("0 means one per core"));
    }

    #[test]
    fn test_unknown_attribute_suggestion() {
        let err = ConfigError::unknown_attribute_with_suggestion(
            "GC_SUPRESSED",
            "Release",
            &["GC_SUPPRESSED", "REPLACED", "SYNTHETIC"],
        );
        assert!(err.to_string().contains("Did you mean 'GC_SUPPRESSED'?"));
    }

    #[test]
    fn test_in_file_names_path() {
        let err = ConfigError::MissingVersion.in_file("/etc/hazards.yaml");
        assert!(err.to_string().starts_with("Invalid configuration file /etc/hazards.yaml: "));
        let source = std::error::Error::source(&err).unwrap();
        assert!(source.to_string().starts_with("Missing 'version' field"));
    }

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("", "abc"), 3);
        assert_eq!(levenshtein_distance("same", "same"), 0);
    }

    #[test]
    fn test_unsupported_version_lists_supported() {
        let err = ConfigError::UnsupportedVersion {
            found: 2,
            supported: vec![1],
        };
        assert_eq!(
            err.to_string(),
            "Unsupported configuration version 2. Supported versions: 1"
        );
    }
}
