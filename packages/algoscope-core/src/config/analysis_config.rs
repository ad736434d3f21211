//! Analysis configuration
//!
//! Built from a [`Preset`], then adjusted through the builder methods or a
//! YAML file (see [`super::io`]).

use super::error::{ConfigError, ConfigResult};
use super::io::{AnalysisOverrides, ConfigFileV1, SUPPORTED_VERSIONS};
use super::preset::Preset;
use super::rules::HeuristicRules;
use super::validation::Validatable;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Knobs shared by every analysis stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Preset this config was seeded from
    #[serde(skip)]
    pub preset: Preset,

    /// Depth cap for every structural search (early exit, variable updates,
    /// combining work, callee cost estimation)
    pub max_structural_depth: usize,

    /// Tolerance when treating log_b(a) or a degree as an integer
    pub integer_tolerance: f64,

    /// Run pattern classification after complexity analysis
    pub enable_patterns: bool,

    /// Look for the merge-phase signature inside non-recursive callees too
    pub search_callees_for_combining_work: bool,

    pub rules: HeuristicRules,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self::from_preset(Preset::Balanced)
    }
}

impl AnalysisConfig {
    /// Get preset configuration
    pub fn from_preset(preset: Preset) -> Self {
        let base = Self {
            preset,
            max_structural_depth: 10,
            integer_tolerance: 0.01,
            enable_patterns: true,
            search_callees_for_combining_work: true,
            rules: HeuristicRules::default(),
        };
        match preset {
            Preset::Fast => Self {
                max_structural_depth: 6,
                enable_patterns: false,
                search_callees_for_combining_work: false,
                ..base
            },
            Preset::Balanced => base,
            Preset::Thorough => Self {
                max_structural_depth: 16,
                ..base
            },
        }
    }

    /// Builder: Set max_structural_depth
    pub fn max_structural_depth(mut self, v: usize) -> Self {
        self.max_structural_depth = v;
        self
    }

    /// Builder: Set integer_tolerance
    pub fn integer_tolerance(mut self, v: f64) -> Self {
        self.integer_tolerance = v;
        self
    }

    /// Builder: Enable/disable pattern classification
    pub fn enable_patterns(mut self, v: bool) -> Self {
        self.enable_patterns = v;
        self
    }

    /// Builder: Enable/disable combining-work search through callees
    pub fn search_callees_for_combining_work(mut self, v: bool) -> Self {
        self.search_callees_for_combining_work = v;
        self
    }

    /// Builder: Replace the name rules
    pub fn rules(mut self, v: HeuristicRules) -> Self {
        self.rules = v;
        self
    }

    fn apply(mut self, overrides: AnalysisOverrides) -> Self {
        if let Some(v) = overrides.max_structural_depth {
            self.max_structural_depth = v;
        }
        if let Some(v) = overrides.integer_tolerance {
            self.integer_tolerance = v;
        }
        if let Some(v) = overrides.enable_patterns {
            self.enable_patterns = v;
        }
        if let Some(v) = overrides.search_callees_for_combining_work {
            self.search_callees_for_combining_work = v;
        }
        if let Some(v) = overrides.rules {
            self.rules = v;
        }
        self
    }

    /// Load and validate a v1 YAML file
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_yaml_str(&content)?;
        tracing::debug!(
            "Loaded analysis config from {} (preset={})",
            path.as_ref().display(),
            config.preset
        );
        Ok(config)
    }

    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let file: ConfigFileV1 = serde_yaml::from_str(content)?;

        // Version check
        let version = file.version.ok_or(ConfigError::MissingVersion)?;
        if !SUPPORTED_VERSIONS.contains(&version) {
            return Err(ConfigError::UnsupportedVersion {
                found: version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }

        let preset: Preset = file.preset.parse()?;

        let mut config = Self::from_preset(preset);
        if let Some(overrides) = file.analysis {
            config = config.apply(overrides);
        }

        config.validated()
    }

    /// Export as a v1 YAML document with every field spelled out
    pub fn to_yaml(&self) -> ConfigResult<String> {
        let file = ConfigFileV1 {
            version: Some(1),
            preset: self.preset.as_str().to_string(),
            analysis: Some(AnalysisOverrides {
                max_structural_depth: Some(self.max_structural_depth),
                integer_tolerance: Some(self.integer_tolerance),
                enable_patterns: Some(self.enable_patterns),
                search_callees_for_combining_work: Some(self.search_callees_for_combining_work),
                rules: Some(self.rules.clone()),
            }),
        };
        Ok(serde_yaml::to_string(&file)?)
    }
}

impl Validatable for AnalysisConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.max_structural_depth == 0 || self.max_structural_depth > 64 {
            return Err(ConfigError::out_of_range(
                "max_structural_depth",
                self.max_structural_depth,
                1..=64,
                "structural searches need a finite depth cap",
            ));
        }

        if !(self.integer_tolerance > 0.0 && self.integer_tolerance < 0.5) {
            return Err(ConfigError::Validation(format!(
                "integer_tolerance must be in (0.0, 0.5), got {}",
                self.integer_tolerance
            )));
        }

        self.rules.validate()
    }
}
