//! Derivation trace
//!
//! Ordered, human-readable record of how a result was derived. Owned by the
//! caller and passed down explicitly; nothing in the crate keeps a global one.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalysisTrace(Vec<String>);

impl AnalysisTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, step: impl Into<String>) {
        self.0.push(step.into());
    }

    /// Push a step indented by nesting depth
    pub fn push_at(&mut self, depth: usize, step: impl AsRef<str>) {
        self.0.push(format!("{}{}", "  ".repeat(depth), step.as_ref()));
    }

    pub fn steps(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_steps(self) -> Vec<String> {
        self.0
    }
}
