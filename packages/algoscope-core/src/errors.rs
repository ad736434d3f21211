//! Error types for algoscope-core
//!
//! Provides unified error handling across the crate.

use crate::config::ConfigError;
use crate::shared::models::Span;
use thiserror::Error;

/// Main error type for algoscope-core operations
#[derive(Debug, Error)]
pub enum AlgoscopeError {
    /// A node whose shape breaks the AST contract
    #[error("Malformed {node_kind} node at {location}: {reason}")]
    MalformedNode {
        node_kind: String,
        location: Span,
        reason: String,
    },

    /// A node kind the structural analysis cannot interpret
    #[error("Unsupported {node_kind} node at {location}")]
    UnsupportedNode { node_kind: String, location: Span },

    /// Non-recursive call chain that re-enters itself during the walk.
    ///
    /// Internal invariant violation: recursion analysis should have classified
    /// every member of a cycle as recursive.
    #[error("Call cycle while analyzing '{procedure}': {}", path.join(" -> "))]
    CallCycle {
        procedure: String,
        path: Vec<String>,
    },

    #[error("Unknown procedure: {0}")]
    UnknownProcedure(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Analysis error
    #[error("Analysis error: {0}")]
    Analysis(String),
}

impl AlgoscopeError {
    /// Create a malformed-node error
    pub fn malformed(node_kind: impl Into<String>, location: Span, reason: impl Into<String>) -> Self {
        AlgoscopeError::MalformedNode {
            node_kind: node_kind.into(),
            location,
            reason: reason.into(),
        }
    }

    /// Create an unsupported-node error
    pub fn unsupported(node_kind: impl Into<String>, location: Span) -> Self {
        AlgoscopeError::UnsupportedNode {
            node_kind: node_kind.into(),
            location,
        }
    }

    /// Create an internal error (alias for analysis error)
    pub fn internal(msg: impl Into<String>) -> Self {
        AlgoscopeError::Analysis(msg.into())
    }

    /// Only a call cycle aborts a whole analysis; everything else is
    /// isolated to the procedure that produced it.
    pub fn is_fatal(&self) -> bool {
        matches!(self, AlgoscopeError::CallCycle { .. })
    }
}

/// Result type alias for algoscope operations
pub type Result<T> = std::result::Result<T, AlgoscopeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_carries_location() {
        let err = AlgoscopeError::malformed("assign", Span::new(4, 2, 4, 9), "bad target");
        assert_eq!(err.to_string(), "Malformed assign node at 4:2: bad target");
    }

    #[test]
    fn test_call_cycle_is_fatal() {
        let err = AlgoscopeError::CallCycle {
            procedure: "A".to_string(),
            path: vec!["A".to_string(), "B".to_string(), "A".to_string()],
        };
        assert!(err.is_fatal());
        assert!(err.to_string().ends_with("A -> B -> A"));
        assert!(!AlgoscopeError::internal("x").is_fatal());
    }
}
