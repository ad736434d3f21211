//! Recurrence relation builder
//!
//! Turns a recursive procedure's `RecursionInfo` and body into
//! `T(n) = a·T(n ⊘ b) + f(n)`:
//! - `a` is the canonical (exclusivity-aware) call count
//! - `b` and the reduction type come from the subproblem evidence
//! - `f(n)` is the loop nesting depth of the body, dominated with the cost
//!   of called non-recursive procedures
//!
//! The n-1 / n-2 shape has no `(a, b)` form and is handed back as
//! [`RelationShape::MixedSubtract`].

use crate::config::AnalysisConfig;
use crate::features::case_analysis::domain::Bound;
use crate::features::case_analysis::infrastructure::for_bound;
use crate::features::recurrence::domain::RecurrenceRelation;
use crate::features::recursion_analysis::domain::{RecursionInfo, RecursionMap, Subproblem};
use crate::shared::models::{ComplexityExpr, Procedure, Program, Stmt, StmtKind};
use rustc_hash::FxHashSet;

/// What could be built for one procedure
#[derive(Debug, Clone, PartialEq)]
pub enum RelationShape {
    Formal(RecurrenceRelation),
    /// Several distinct constant subtractions (n-1 and n-2)
    MixedSubtract { f_complexity: ComplexityExpr },
    /// No active recursive call or no usable evidence
    Unbuildable { reason: String },
}

pub struct RelationBuilder<'p> {
    program: &'p Program,
    recursion: &'p RecursionMap,
    max_depth: usize,
}

impl<'p> RelationBuilder<'p> {
    pub fn new(program: &'p Program, recursion: &'p RecursionMap, config: &AnalysisConfig) -> Self {
        Self {
            program,
            recursion,
            max_depth: config.max_structural_depth,
        }
    }

    pub fn build(&self, proc: &Procedure, info: &RecursionInfo) -> RelationShape {
        if !info.is_recursive || info.call_count == 0 {
            return RelationShape::Unbuildable {
                reason: format!("{} has no active recursive call", proc.name),
            };
        }

        let f = self.non_recursive_work(proc);
        let a = info.call_count;

        let relation = match info.subproblem {
            Subproblem::MixedConstantSubtract if a >= 2 => {
                return RelationShape::MixedSubtract { f_complexity: f };
            }
            Subproblem::NOverK(k) => RecurrenceRelation::divide(a, k, f),
            Subproblem::Modulo => RecurrenceRelation::divide(a, 2, f),
            Subproblem::NMinus(c) => RecurrenceRelation::subtract(a, c.max(1), f),
            Subproblem::MixedConstantSubtract | Subproblem::Slice | Subproblem::Unknown => {
                RecurrenceRelation::subtract(a, 1, f)
            }
        };

        match relation {
            Ok(r) => RelationShape::Formal(r),
            Err(reason) => RelationShape::Unbuildable { reason },
        }
    }

    /// f(n): loop nesting of the body, dominated with callee cost
    pub fn non_recursive_work(&self, proc: &Procedure) -> ComplexityExpr {
        let own = ComplexityExpr::polynomial(f64::from(loop_nesting_depth(&proc.body, 0, self.max_depth)));

        let mut visited = FxHashSet::default();
        visited.insert(proc.name.clone());
        let callees = self.callee_cost(&proc.body, &mut visited, 0);

        tracing::debug!(
            "f(n) for {}: loops={} callees={}",
            proc.name,
            own.label(),
            callees.label()
        );
        own.dominant(&callees)
    }

    fn callee_cost(&self, body: &Stmt, visited: &mut FxHashSet<String>, depth: usize) -> ComplexityExpr {
        if depth >= self.max_depth {
            return ComplexityExpr::Constant;
        }

        let mut cost = ComplexityExpr::Constant;
        for site in body.call_sites() {
            if !visited.insert(site.name.to_string()) {
                continue;
            }
            // Recursive callees are solved on their own
            if self.recursion.get(site.name).is_some_and(|i| i.is_recursive) {
                continue;
            }
            let Some(callee) = self.program.procedure(site.name) else {
                continue;
            };
            let own = ComplexityExpr::polynomial(f64::from(loop_nesting_depth(
                &callee.body,
                0,
                self.max_depth,
            )));
            let nested = self.callee_cost(&callee.body, visited, depth + 1);
            cost = cost.dominant(&own.dominant(&nested));
        }
        cost
    }
}

/// Deepest nesting of loops that do not have two literal bounds
///
/// Blocks and branches do not consume depth.
pub fn loop_nesting_depth(stmt: &Stmt, depth: usize, max_depth: usize) -> u32 {
    if depth > max_depth {
        return 0;
    }
    let deepest_child = |next: usize| {
        stmt.children()
            .iter()
            .map(|c| loop_nesting_depth(c, next, max_depth))
            .max()
            .unwrap_or(0)
    };

    match &stmt.kind {
        StmtKind::Block { .. } => deepest_child(depth),
        StmtKind::For { start, end, .. } => {
            let counts = !matches!(for_bound(start, end), Bound::Exact(_));
            u32::from(counts) + deepest_child(depth + 1)
        }
        StmtKind::While { .. } | StmtKind::Repeat { .. } => 1 + deepest_child(depth + 1),
        _ => deepest_child(depth + 1),
    }
}
