//! Domain models for recurrence solving

use crate::shared::models::ComplexityExpr;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How each recursive call shrinks n
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReductionType {
    /// T(n/b)
    Divide,
    /// T(n-b)
    Subtract,
}

/// T(n) = a·T(n ⊘ b) + f(n)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrenceRelation {
    /// Active recursive calls per activation
    pub a: u32,
    /// Reduction factor (divisor or decrement)
    pub b: u32,
    /// Non-recursive work per activation
    pub f_complexity: ComplexityExpr,
    pub reduction_type: ReductionType,
}

impl RecurrenceRelation {
    /// Create new relation with validation
    pub fn new(
        a: u32,
        b: u32,
        f_complexity: ComplexityExpr,
        reduction_type: ReductionType,
    ) -> Result<Self, String> {
        if a < 1 {
            return Err(format!("a must be >= 1, got {}", a));
        }
        match reduction_type {
            ReductionType::Divide if b < 2 => {
                return Err(format!("divide reduction needs b >= 2, got {}", b))
            }
            ReductionType::Subtract if b < 1 => {
                return Err(format!("subtract reduction needs b >= 1, got {}", b))
            }
            _ => {}
        }
        Ok(Self {
            a,
            b,
            f_complexity,
            reduction_type,
        })
    }

    pub fn divide(a: u32, b: u32, f: ComplexityExpr) -> Result<Self, String> {
        Self::new(a, b, f, ReductionType::Divide)
    }

    pub fn subtract(a: u32, b: u32, f: ComplexityExpr) -> Result<Self, String> {
        Self::new(a, b, f, ReductionType::Subtract)
    }
}

impl fmt::Display for RecurrenceRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let a = if self.a == 1 {
            String::new()
        } else {
            self.a.to_string()
        };
        let op = match self.reduction_type {
            ReductionType::Divide => '/',
            ReductionType::Subtract => '-',
        };
        write!(
            f,
            "T(n) = {}T(n{}{}) + {}",
            a,
            op,
            self.b,
            self.f_complexity.big_o()
        )
    }
}

/// How a solution was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SolutionMethod {
    #[serde(rename = "Master Theorem - Case 1")]
    MasterCase1,
    #[serde(rename = "Master Theorem - Case 2")]
    MasterCase2,
    #[serde(rename = "Master Theorem - Case 3")]
    MasterCase3,
    #[serde(rename = "Master Theorem - special log case")]
    MasterSpecialLog,
    #[serde(rename = "Linear expansion")]
    LinearExpansion,
    #[serde(rename = "Fibonacci closed form")]
    FibonacciClosedForm,
    #[serde(rename = "Heuristic")]
    Heuristic,
}

impl SolutionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MasterCase1 => "Master Theorem - Case 1",
            Self::MasterCase2 => "Master Theorem - Case 2",
            Self::MasterCase3 => "Master Theorem - Case 3",
            Self::MasterSpecialLog => "Master Theorem - special log case",
            Self::LinearExpansion => "Linear expansion",
            Self::FibonacciClosedForm => "Fibonacci closed form",
            Self::Heuristic => "Heuristic",
        }
    }
}

impl fmt::Display for SolutionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Solved recurrence for one procedure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurrenceSolution {
    /// Rendered relation, e.g. "T(n) = 2T(n/2) + O(n)"
    pub relation: String,
    pub complexity: ComplexityExpr,
    /// Display label, e.g. "O(n log n)"
    pub label: String,
    pub method: SolutionMethod,
    pub explanation: String,
}

impl RecurrenceSolution {
    pub fn new(
        relation: impl Into<String>,
        complexity: ComplexityExpr,
        method: SolutionMethod,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            relation: relation.into(),
            complexity,
            label: complexity.big_o(),
            method,
            explanation: explanation.into(),
        }
    }

    pub fn is_heuristic(&self) -> bool {
        self.method == SolutionMethod::Heuristic
    }
}
