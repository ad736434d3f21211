//! Analysis configuration
//!
//! ```text
//! Preset (fast / balanced / thorough)
//!    │
//!    ▼
//! AnalysisConfig ◄── YAML v1 overrides
//!    │
//!    ├── depth cap, tolerances, feature switches
//!    └── HeuristicRules ──► CompiledRules (regex, ranked)
//! ```

pub mod analysis_config;
pub mod error;
pub mod io;
pub mod preset;
pub mod rules;
pub mod validation;

pub use analysis_config::AnalysisConfig;
pub use error::{ConfigError, ConfigResult};
pub use io::{AnalysisOverrides, ConfigFileV1};
pub use preset::Preset;
pub use rules::{CompiledRules, HeuristicRules, NameRule, RuleMatch};
pub use validation::Validatable;
