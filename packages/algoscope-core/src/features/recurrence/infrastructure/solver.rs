//! Recurrence Solver
//!
//! Solving strategy:
//! 1. Divide `T(n) = aT(n/b) + f(n)`: generalised master theorem with
//!    `f = n^d · log^k n` against the critical exponent `c = log_b(a)`
//! 2. Subtract `T(n) = aT(n-b) + f(n)`: direct expansion
//! 3. n-1 / n-2 shape: Fibonacci closed form
//! 4. Anything else: heuristic label from the recursion shape
//!
//! Never fails. A relation that cannot be built degrades to a
//! method-tagged heuristic result.

use super::relation_builder::{RelationBuilder, RelationShape};
use crate::config::AnalysisConfig;
use crate::features::recurrence::domain::{
    RecurrenceRelation, RecurrenceSolution, ReductionType, SolutionMethod,
};
use crate::features::recursion_analysis::domain::{DepthPattern, RecursionInfo, RecursionMap};
use crate::shared::models::{ComplexityExpr, Procedure, Program};

pub struct RecurrenceSolver {
    tolerance: f64,
    config: AnalysisConfig,
}

impl RecurrenceSolver {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            tolerance: config.integer_tolerance,
            config: config.clone(),
        }
    }

    /// Build and solve the recurrence of one recursive procedure
    ///
    /// Returns the formal relation when one could be built (`None` for the
    /// closed-form and heuristic paths) together with its solution.
    pub fn solve_procedure(
        &self,
        proc: &Procedure,
        info: &RecursionInfo,
        program: &Program,
        recursion: &RecursionMap,
    ) -> (Option<RecurrenceRelation>, RecurrenceSolution) {
        let builder = RelationBuilder::new(program, recursion, &self.config);

        match builder.build(proc, info) {
            RelationShape::Formal(relation) => {
                let solution = self.solve(&relation);
                tracing::debug!("Solved {}: {} ⇒ {}", proc.name, solution.relation, solution.label);
                (Some(relation), solution)
            }
            RelationShape::MixedSubtract { f_complexity } => (None, fibonacci_closed_form(&f_complexity)),
            RelationShape::Unbuildable { reason } => {
                tracing::debug!("No relation for {} ({}), using heuristic", proc.name, reason);
                (None, heuristic(info))
            }
        }
    }

    /// Solve a formal relation
    pub fn solve(&self, relation: &RecurrenceRelation) -> RecurrenceSolution {
        match relation.reduction_type {
            ReductionType::Divide => self.solve_divide(relation),
            ReductionType::Subtract => solve_subtract(relation),
        }
    }

    fn snap(&self, x: f64) -> f64 {
        if (x - x.round()).abs() < self.tolerance {
            x.round()
        } else {
            x
        }
    }

    fn solve_divide(&self, r: &RecurrenceRelation) -> RecurrenceSolution {
        let c = self.snap(f64::from(r.a).ln() / f64::from(r.b).ln());
        let f = r.f_complexity;
        let relation = r.to_string();

        if f.is_exponential() {
            return RecurrenceSolution::new(
                relation,
                f,
                SolutionMethod::MasterCase3,
                format!("f(n) = {} is exponential and dominates every level", f.label()),
            );
        }

        let d = self.snap(f.degree());
        let k = f.log_power();
        let critical = ComplexityExpr::polynomial(c);
        let header = format!("a={}, b={}, log_b(a) = {}", r.a, r.b, format_exponent(c));

        if (d - c).abs() < self.tolerance {
            let complexity = ComplexityExpr::poly_log(c, k + 1);
            let method = if k > 0 {
                SolutionMethod::MasterSpecialLog
            } else {
                SolutionMethod::MasterCase2
            };
            RecurrenceSolution::new(
                relation,
                complexity,
                method,
                format!(
                    "{}; f(n) = {} matches n^{}, every level costs the same: {}",
                    header,
                    f.label(),
                    format_exponent(c),
                    complexity.theta()
                ),
            )
        } else if d < c {
            RecurrenceSolution::new(
                relation,
                critical,
                SolutionMethod::MasterCase1,
                format!(
                    "{}; f(n) = {} grows slower than n^{}, the leaves dominate: {}",
                    header,
                    f.label(),
                    format_exponent(c),
                    critical.theta()
                ),
            )
        } else {
            RecurrenceSolution::new(
                relation,
                f,
                SolutionMethod::MasterCase3,
                format!(
                    "{}; f(n) = {} grows faster than n^{}, the root dominates: {}",
                    header,
                    f.label(),
                    format_exponent(c),
                    f.theta()
                ),
            )
        }
    }
}

fn solve_subtract(r: &RecurrenceRelation) -> RecurrenceSolution {
    let f = r.f_complexity;
    let relation = r.to_string();

    if r.a == 1 {
        let complexity = f.times(&ComplexityExpr::Linear);
        return RecurrenceSolution::new(
            relation,
            complexity,
            SolutionMethod::LinearExpansion,
            format!(
                "n/{} levels of {} work each: {}",
                r.b,
                f.label(),
                complexity.theta()
            ),
        );
    }

    // a^(n/b) leaves, n^d work per level is absorbed into the degree
    let base = f64::from(r.a).powf(1.0 / f64::from(r.b));
    let complexity = ComplexityExpr::exponential(base, f.degree());
    RecurrenceSolution::new(
        relation,
        complexity,
        SolutionMethod::LinearExpansion,
        format!(
            "{} calls per level over n/{} levels, {} work per call: {}",
            r.a,
            r.b,
            f.label(),
            complexity.theta()
        ),
    )
}

/// T(n) = T(n-1) + T(n-2) + f(n)
pub fn fibonacci_closed_form(f: &ComplexityExpr) -> RecurrenceSolution {
    let complexity = ComplexityExpr::exponential(2.0, 0.0).times(f);
    RecurrenceSolution::new(
        format!("T(n) = T(n-1) + T(n-2) + {}", f.big_o()),
        complexity,
        SolutionMethod::FibonacciClosedForm,
        format!(
            "branching factor 2 over a recursion tree of height n: {} (tight bound φ^n, φ ≈ 1.618)",
            complexity.big_o()
        ),
    )
}

/// Label keyed on the recursion shape alone
pub fn heuristic(info: &RecursionInfo) -> RecurrenceSolution {
    let (complexity, why) = match info.depth_pattern {
        DepthPattern::DivideAndConquer if info.call_count <= 1 => {
            (ComplexityExpr::Logarithmic, "one call on a divided input")
        }
        DepthPattern::DivideAndConquer => (ComplexityExpr::linearithmic(), "several calls on divided inputs"),
        DepthPattern::Tree => (
            ComplexityExpr::exponential(f64::from(info.call_count.max(2)), 0.0),
            "several calls per level, recursion tree of height n",
        ),
        DepthPattern::Linear | DepthPattern::Unknown => (ComplexityExpr::Linear, "one level per unit of input"),
    };
    RecurrenceSolution::new(
        "heuristic (no formal relation)",
        complexity,
        SolutionMethod::Heuristic,
        format!(
            "{} ({} call(s), subproblem {}): {}",
            why,
            info.call_count,
            info.subproblem.describe(),
            complexity.big_o()
        ),
    )
}

fn format_exponent(c: f64) -> String {
    if c.fract() == 0.0 {
        format!("{}", c as i64)
    } else {
        format!("{:.2}", c)
    }
}
