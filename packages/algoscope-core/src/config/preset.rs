//! Named starting points for [`AnalysisConfig`](super::AnalysisConfig)

use super::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Depth cap 6, no pattern classification, no callee search for combining work
    Fast,

    /// Depth cap 10 with classification and callee search
    #[default]
    Balanced,

    /// Balanced with a depth cap of 16 for deeply nested programs
    Thorough,
}

const NAMES: [(&str, Preset); 3] = [
    ("fast", Preset::Fast),
    ("balanced", Preset::Balanced),
    ("thorough", Preset::Thorough),
];

impl Preset {
    pub fn as_str(&self) -> &'static str {
        NAMES
            .iter()
            .find(|(_, p)| p == self)
            .map_or("balanced", |(name, _)| name)
    }
}

impl FromStr for Preset {
    type Err = ConfigError;

    /// Case-insensitive
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NAMES
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(s.trim()))
            .map(|(_, p)| *p)
            .ok_or_else(|| ConfigError::UnknownPreset(s.to_string()))
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for (name, preset) in NAMES {
            assert_eq!(name.parse::<Preset>().unwrap(), preset);
            assert_eq!(preset.to_string(), name);
        }
    }

    #[test]
    fn test_parse_ignores_case() {
        assert_eq!("Thorough".parse::<Preset>().unwrap(), Preset::Thorough);
        assert_eq!(" FAST ".parse::<Preset>().unwrap(), Preset::Fast);
    }

    #[test]
    fn test_unknown_name() {
        let err = "custom".parse::<Preset>().unwrap_err();
        assert!(matches!(err, ConfigError::UnknownPreset(ref p) if p == "custom"));
    }

    #[test]
    fn test_balanced_is_default() {
        assert_eq!(Preset::default(), Preset::Balanced);
    }
}
