//! Domain models for case analysis

use crate::shared::models::ComplexityExpr;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Loop iteration count
///
/// Ordered by growth class first; exact counts compare numerically and sit
/// below any symbolic count of the same class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bound {
    /// Statically known count
    Exact(u64),
    Symbolic(ComplexityExpr),
}

impl Bound {
    pub fn linear() -> Self {
        Self::Symbolic(ComplexityExpr::Linear)
    }

    /// Growth class (any fixed count is constant)
    pub fn class(&self) -> ComplexityExpr {
        match self {
            Self::Exact(_) => ComplexityExpr::Constant,
            Self::Symbolic(c) => *c,
        }
    }

    /// min(1, N) for an exact range, a single iteration otherwise
    pub fn first_iteration(&self) -> Self {
        match self {
            Self::Exact(n) => Self::Exact((*n).min(1)),
            Self::Symbolic(_) => Self::Exact(1),
        }
    }

    /// ⌈N/2⌉ for an exact range, same class otherwise
    pub fn half(&self) -> Self {
        match self {
            Self::Exact(n) => Self::Exact(n.div_ceil(2)),
            Self::Symbolic(c) => Self::Symbolic(*c),
        }
    }
}

impl PartialOrd for Bound {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Bound {
    fn cmp(&self, other: &Self) -> Ordering {
        self.class().cmp(&other.class()).then_with(|| match (self, other) {
            (Self::Exact(a), Self::Exact(b)) => a.cmp(b),
            (Self::Exact(_), Self::Symbolic(_)) => Ordering::Less,
            (Self::Symbolic(_), Self::Exact(_)) => Ordering::Greater,
            (Self::Symbolic(_), Self::Symbolic(_)) => Ordering::Equal,
        })
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(n) => write!(f, "{}", n),
            Self::Symbolic(c) => write!(f, "{}", c.label()),
        }
    }
}

/// Worst/best/average iteration counts of one loop (or recursion)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseComplexity {
    pub worst: Bound,
    pub best: Bound,
    pub average: Bound,
    pub differs: bool,
    pub explanation: String,
}

impl CaseComplexity {
    /// Same count in every case
    pub fn uniform(bound: Bound, explanation: impl Into<String>) -> Self {
        Self {
            worst: bound,
            best: bound,
            average: bound,
            differs: false,
            explanation: explanation.into(),
        }
    }

    /// Full range in the worst case, the first iteration in the best,
    /// half the range on average
    pub fn early_exit(range: Bound, explanation: impl Into<String>) -> Self {
        let best = range.first_iteration();
        Self {
            worst: range,
            best,
            average: range.half(),
            differs: best != range,
            explanation: explanation.into(),
        }
    }

    /// best ⪯ average ⪯ worst
    pub fn is_ordered(&self) -> bool {
        self.best <= self.average && self.average <= self.worst
    }
}
