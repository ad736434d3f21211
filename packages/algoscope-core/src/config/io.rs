//! Configuration I/O
//!
//! Defines the YAML schema types. Loading lives on
//! [`super::AnalysisConfig::from_yaml`].

use super::rules::HeuristicRules;
use serde::{Deserialize, Serialize};

pub(crate) const SUPPORTED_VERSIONS: &[u32] = &[1];

/// YAML Schema v1
///
/// ```yaml
/// version: 1
/// preset: balanced
/// analysis:
///   max_structural_depth: 12
///   enable_patterns: false
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFileV1 {
    /// Schema version (always 1 for v1)
    #[serde(default)]
    pub version: Option<u32>,

    /// Base preset
    #[serde(default = "default_preset")]
    pub preset: String,

    /// Fine-grained overrides on top of the preset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<AnalysisOverrides>,
}

fn default_preset() -> String {
    "balanced".to_string()
}

/// Configuration overrides
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalysisOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_structural_depth: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integer_tolerance: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_patterns: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_callees_for_combining_work: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<HeuristicRules>,
}
