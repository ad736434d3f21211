//! Cost Analysis Domain Models
//!
//! Pure data structures with no analysis logic.

use crate::features::case_analysis::domain::CaseComplexity;
use crate::features::pattern_classification::domain::PatternClassification;
use crate::features::recurrence::domain::{RecurrenceRelation, RecurrenceSolution};
use crate::features::recursion_analysis::domain::RecursionInfo;
use crate::shared::models::ComplexityExpr;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Worst / best / average cost of a piece of code
///
/// Every constructor and combinator keeps `best ⪯ average ⪯ worst` as long
/// as its inputs do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostTriple {
    pub worst: ComplexityExpr,
    pub best: ComplexityExpr,
    pub average: ComplexityExpr,
}

impl Default for CostTriple {
    fn default() -> Self {
        Self::constant()
    }
}

impl CostTriple {
    pub fn constant() -> Self {
        Self::uniform(ComplexityExpr::Constant)
    }

    /// Same class in every case
    pub fn uniform(c: ComplexityExpr) -> Self {
        Self {
            worst: c,
            best: c,
            average: c,
        }
    }

    /// `self` followed by `next`: dominant term per case
    pub fn then(&self, next: &Self) -> Self {
        Self {
            worst: self.worst.dominant(&next.worst),
            best: self.best.dominant(&next.best),
            average: self.average.dominant(&next.average),
        }
    }

    /// Statements run one after another
    pub fn sequence<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        items
            .into_iter()
            .fold(Self::constant(), |acc, t| acc.then(&t))
    }

    /// Body cost repeated per case by a loop's iteration counts
    pub fn repeated(&self, case: &CaseComplexity) -> Self {
        Self {
            worst: case.worst.class().times(&self.worst),
            best: case.best.class().times(&self.best),
            average: case.average.class().times(&self.average),
        }
    }

    /// `if` / `else`: the worse branch in the worst case, the cheaper one in
    /// the best case, and the unweighted mean of both averages (which, for
    /// growth classes, is the dominant one)
    pub fn branch(then: &Self, otherwise: &Self) -> Self {
        Self {
            worst: then.worst.dominant(&otherwise.worst),
            best: then.best.min(otherwise.best),
            average: then.average.dominant(&otherwise.average),
        }
    }

    pub fn with_best(mut self, best: ComplexityExpr) -> Self {
        self.best = best;
        self
    }

    pub fn normalized(&self) -> Self {
        Self {
            worst: self.worst.normalized(),
            best: self.best.normalized(),
            average: self.average.normalized(),
        }
    }

    /// best ⪯ average ⪯ worst
    pub fn is_ordered(&self) -> bool {
        self.best <= self.average && self.average <= self.worst
    }

    pub fn is_constant(&self) -> bool {
        self.worst.is_constant()
    }

    /// "O(n) / Ω(1) / Θ(n)"
    pub fn describe(&self) -> String {
        format!(
            "{} / {} / {}",
            self.worst.big_o(),
            self.best.omega(),
            self.average.theta()
        )
    }
}

/// Everything computed about one declared procedure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcedureAnalysis {
    pub name: String,
    pub recursion_info: RecursionInfo,

    /// Formal relation, when one could be built
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation: Option<RecurrenceRelation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution: Option<RecurrenceSolution>,

    pub complexity: CostTriple,

    /// Filled in by the pipeline; best-effort
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<PatternClassification>,

    /// Analysis of this procedure failed; `complexity` is a placeholder
    #[serde(default)]
    pub failed: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<String>,
}

impl ProcedureAnalysis {
    pub fn new(name: impl Into<String>, recursion_info: RecursionInfo, complexity: CostTriple) -> Self {
        Self {
            name: name.into(),
            recursion_info,
            relation: None,
            solution: None,
            complexity,
            pattern: None,
            failed: false,
            diagnostic: None,
        }
    }

    /// Placeholder for a procedure whose analysis failed
    pub fn failed(name: impl Into<String>, recursion_info: RecursionInfo, diagnostic: impl Into<String>) -> Self {
        Self {
            failed: true,
            diagnostic: Some(diagnostic.into()),
            ..Self::new(name, recursion_info, CostTriple::constant())
        }
    }
}

/// Result of analysing a whole program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Complexity {
    /// Worst case
    pub big_o: ComplexityExpr,
    /// Best case
    pub omega: ComplexityExpr,
    /// Average case
    pub theta: ComplexityExpr,
    pub explanation: String,
    /// Ordered derivation trace
    pub steps: Vec<String>,
    pub procedures: BTreeMap<String, ProcedureAnalysis>,
}

impl Complexity {
    pub fn triple(&self) -> CostTriple {
        CostTriple {
            worst: self.big_o,
            best: self.omega,
            average: self.theta,
        }
    }

    pub fn failed_procedures(&self) -> impl Iterator<Item = &ProcedureAnalysis> {
        self.procedures.values().filter(|p| p.failed)
    }
}
