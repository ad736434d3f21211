//! Domain models for recursion analysis
//!
//! Pure data with no analysis logic.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How a procedure recurses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecursionType {
    None,
    /// Calls itself
    Direct,
    /// Reaches itself through other procedures only
    Indirect,
    /// Direct, and every recursive call is the last action on its path
    Tail,
}

impl RecursionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Direct => "direct",
            Self::Indirect => "indirect",
            Self::Tail => "tail",
        }
    }
}

/// Shape of the recursion tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepthPattern {
    /// One call per activation, reducing by a constant
    Linear,
    /// Several calls per activation
    Tree,
    /// Input split by a constant factor
    DivideAndConquer,
    Unknown,
}

impl DepthPattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Tree => "tree",
            Self::DivideAndConquer => "divide_and_conquer",
            Self::Unknown => "unknown",
        }
    }
}

/// How a recursive call shrinks its input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subproblem {
    /// n - c for a single constant c (c = 1 is the common case)
    NMinus(u32),
    /// n / k
    NOverK(u32),
    /// A sub-range of an array whose size cannot be read off
    Slice,
    /// Several distinct constant subtractions, e.g. n-1 and n-2
    MixedConstantSubtract,
    /// An argument reduced with `mod` (Euclid)
    Modulo,
    Unknown,
}

impl Subproblem {
    pub fn describe(&self) -> String {
        match self {
            Self::NMinus(c) => format!("n-{}", c),
            Self::NOverK(k) => format!("n/{}", k),
            Self::Slice => "slice".to_string(),
            Self::MixedConstantSubtract => "n-1 and n-2".to_string(),
            Self::Modulo => "n mod m".to_string(),
            Self::Unknown => "unknown".to_string(),
        }
    }

    pub fn is_divide(&self) -> bool {
        matches!(self, Self::NOverK(_))
    }
}

/// Recursion facts about one procedure
///
/// Computed once per analysis run and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecursionInfo {
    pub is_recursive: bool,
    pub recursion_type: RecursionType,

    /// Active recursive call sites, counting if/else branches as exclusive
    pub call_count: u32,

    /// Callees in source order, duplicates preserved
    pub calls_to: Vec<String>,

    pub depth_pattern: DepthPattern,
    pub subproblem: Subproblem,

    /// Merge-phase signature found in the body or a callee
    pub has_combining_work: bool,

    /// The n/2 evidence came from splitting an index range (midpoint)
    /// rather than from dividing a scalar
    pub halves_range: bool,
}

impl RecursionInfo {
    pub fn non_recursive(calls_to: Vec<String>) -> Self {
        Self {
            is_recursive: false,
            recursion_type: RecursionType::None,
            call_count: 0,
            calls_to,
            depth_pattern: DepthPattern::Unknown,
            subproblem: Subproblem::Unknown,
            has_combining_work: false,
            halves_range: false,
        }
    }
}

/// Procedure name → recursion facts
pub type RecursionMap = BTreeMap<String, RecursionInfo>;
