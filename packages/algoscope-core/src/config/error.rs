//! Configuration errors

use std::fmt::Display;
use std::ops::RangeInclusive;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Numeric knob outside its accepted range
    #[error("{field} = {value} is outside {min}..={max} ({hint})")]
    Range {
        field: &'static str,
        value: String,
        min: String,
        max: String,
        hint: &'static str,
    },

    #[error("configuration file has no 'version' key (expected 'version: 1')")]
    MissingVersion,

    #[error("configuration version {found} is not supported (supported: {})", join(supported))]
    UnsupportedVersion { found: u32, supported: Vec<u32> },

    #[error("unknown preset '{0}' (expected fast, balanced or thorough)")]
    UnknownPreset(String),

    /// A name rule whose pattern is not a valid regex
    #[error("name rule '{rule}' does not compile: {reason}")]
    InvalidRule { rule: String, reason: String },

    #[error("cannot read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid configuration: {0}")]
    Validation(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

fn join(versions: &[u32]) -> String {
    versions
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl ConfigError {
    /// `field` must lie in `range`
    pub fn out_of_range<T: Display>(
        field: &'static str,
        value: T,
        range: RangeInclusive<T>,
        hint: &'static str,
    ) -> Self {
        Self::Range {
            field,
            value: value.to_string(),
            min: range.start().to_string(),
            max: range.end().to_string(),
            hint,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_message() {
        let err = ConfigError::out_of_range("max_structural_depth", 0, 1..=64, "searches need a cap of at least 1");
        assert_eq!(
            err.to_string(),
            "max_structural_depth = 0 is outside 1..=64 (searches need a cap of at least 1)"
        );
    }

    #[test]
    fn test_unsupported_version_lists_supported() {
        let err = ConfigError::UnsupportedVersion {
            found: 3,
            supported: vec![1, 2],
        };
        assert_eq!(
            err.to_string(),
            "configuration version 3 is not supported (supported: 1, 2)"
        );
    }
}
