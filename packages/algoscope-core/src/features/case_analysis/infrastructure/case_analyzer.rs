//! Case Analyzer
//!
//! Estimates whether one loop's worst/best/average iteration counts differ.
//! Purely structural: nothing is executed, and every search into a loop
//! body stops at the configured depth cap.

use super::iteration_bounds::{for_bound, infer_loop_update};
use crate::config::{AnalysisConfig, CompiledRules};
use crate::errors::{AlgoscopeError, Result};
use crate::features::case_analysis::domain::{Bound, CaseComplexity};
use crate::features::recursion_analysis::domain::{DepthPattern, RecursionInfo};
use crate::shared::models::{ComplexityExpr, Expr, ExprKind, Stmt, StmtKind};

pub struct CaseAnalyzer {
    max_depth: usize,
    rules: CompiledRules,
}

impl CaseAnalyzer {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            max_depth: config.max_structural_depth,
            rules: CompiledRules::compile_lossy(&config.rules),
        }
    }

    /// Analyze any loop statement
    pub fn analyze_loop(&self, stmt: &Stmt) -> Result<CaseComplexity> {
        match &stmt.kind {
            StmtKind::For {
                var,
                start,
                end,
                body,
            } => Ok(self.analyze_for(var, start, end, body)),
            StmtKind::While { cond, body } => Ok(self.analyze_while(cond, body)),
            StmtKind::Repeat { body, until } => Ok(self.analyze_repeat(body, until)),
            _ => Err(AlgoscopeError::unsupported(stmt.kind_name(), stmt.span)),
        }
    }

    pub fn analyze_for(&self, var: &str, start: &Expr, end: &Expr, body: &Stmt) -> CaseComplexity {
        let range = for_bound(start, end);

        match self.early_exit_reason(body, var) {
            Some(reason) => {
                tracing::debug!("FOR {}: early exit ({})", var, reason);
                CaseComplexity::early_exit(
                    range,
                    format!(
                        "FOR {} = {} to {}: {}; worst {} iterations, best {}, average {}",
                        var,
                        start,
                        end,
                        reason,
                        range,
                        range.first_iteration(),
                        range.half()
                    ),
                )
            }
            None => CaseComplexity::uniform(
                range,
                format!("FOR {} = {} to {}: {} iterations in every case", var, start, end, range),
            ),
        }
    }

    pub fn analyze_while(&self, cond: &Expr, body: &Stmt) -> CaseComplexity {
        let update = infer_loop_update(cond, body, self.max_depth);
        let iterations = Bound::Symbolic(update.iterations());

        if self.has_search_structure(body) {
            CaseComplexity::early_exit(
                iterations,
                format!(
                    "WHILE {}: comparison inside the body may stop early; {}",
                    cond,
                    update.describe()
                ),
            )
        } else {
            CaseComplexity::uniform(iterations, format!("WHILE {}: {}", cond, update.describe()))
        }
    }

    /// The body always runs once, so the best case is a single iteration
    pub fn analyze_repeat(&self, body: &Stmt, until: &Expr) -> CaseComplexity {
        let update = infer_loop_update(until, body, self.max_depth);
        let iterations = Bound::Symbolic(update.iterations());
        let search = if self.has_search_structure(body) {
            "comparison inside the body may stop early; "
        } else {
            ""
        };

        CaseComplexity::early_exit(
            iterations,
            format!(
                "REPEAT ... UNTIL {}: {}{}; at least one iteration",
                until,
                search,
                update.describe()
            ),
        )
    }

    /// Coarse per-case estimate of a recursive procedure from its depth
    /// pattern alone. Recursion has no case split at this level.
    pub fn analyze_recursive_cases(info: &RecursionInfo) -> CaseComplexity {
        let (class, why) = match info.depth_pattern {
            DepthPattern::Linear => (ComplexityExpr::Linear, "linear recursion depth"),
            DepthPattern::Tree => (ComplexityExpr::exponential(2.0, 0.0), "recursion tree"),
            DepthPattern::DivideAndConquer => {
                (ComplexityExpr::linearithmic(), "divide and conquer")
            }
            DepthPattern::Unknown => (ComplexityExpr::Linear, "unknown recursion shape"),
        };
        CaseComplexity::uniform(Bound::Symbolic(class), format!("{}: {}", why, class.big_o()))
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Structural searches
    // ═══════════════════════════════════════════════════════════════════════

    /// Why a `for` body may leave its range early, if it can
    pub fn early_exit_reason(&self, body: &Stmt, loop_var: &str) -> Option<String> {
        self.find_in_ifs(body, 0, &|then: &Stmt| self.exit_signature(then, loop_var, 0))
    }

    /// An `if` testing a comparison inside the body
    pub fn has_search_structure(&self, body: &Stmt) -> bool {
        self.has_comparison_if(body, 0)
    }

    fn has_comparison_if(&self, stmt: &Stmt, depth: usize) -> bool {
        if depth > self.max_depth {
            return false;
        }
        if let StmtKind::If { cond, .. } = &stmt.kind {
            if cond.is_comparison() {
                return true;
            }
        }
        let next = if matches!(stmt.kind, StmtKind::Block { .. }) {
            depth
        } else {
            depth + 1
        };
        stmt.children()
            .iter()
            .any(|c| self.has_comparison_if(c, next))
    }

    /// Visit each `if` (depth-capped) and ask `check` about its then-branch
    fn find_in_ifs(
        &self,
        stmt: &Stmt,
        depth: usize,
        check: &dyn Fn(&Stmt) -> Option<String>,
    ) -> Option<String> {
        if depth > self.max_depth {
            return None;
        }
        if let StmtKind::If { then, .. } = &stmt.kind {
            if let Some(reason) = check(then) {
                return Some(reason);
            }
        }
        let next = if matches!(stmt.kind, StmtKind::Block { .. }) {
            depth
        } else {
            depth + 1
        };
        stmt.children()
            .iter()
            .find_map(|c| self.find_in_ifs(c, next, check))
    }

    fn exit_signature(&self, stmt: &Stmt, loop_var: &str, depth: usize) -> Option<String> {
        if depth > self.max_depth {
            return None;
        }
        match &stmt.kind {
            StmtKind::Return { .. } => return Some("returns from inside the loop".to_string()),
            StmtKind::Assign { target, value } => {
                if let Some(reason) = self.assignment_signature(target, value, loop_var) {
                    return Some(reason);
                }
            }
            _ => {}
        }
        let next = if matches!(stmt.kind, StmtKind::Block { .. }) {
            depth
        } else {
            depth + 1
        };
        stmt.children()
            .iter()
            .find_map(|c| self.exit_signature(c, loop_var, next))
    }

    fn assignment_signature(&self, target: &Expr, value: &Expr, loop_var: &str) -> Option<String> {
        match &value.kind {
            ExprKind::Bool { .. } | ExprKind::Null => {
                return Some(format!("assigns the literal {} on a match", value));
            }
            ExprKind::Var { name } => {
                if let Some(hit) = self.rules.sentinel_match(name) {
                    return Some(format!("assigns sentinel {} (rule '{}')", name, hit.rule));
                }
            }
            _ => {}
        }

        let target_name = target.as_var()?;
        if target_name == loop_var {
            return Some(format!("overwrites loop variable {}", loop_var));
        }
        self.rules
            .flag_match(target_name)
            .map(|hit| format!("sets flag {} (rule '{}')", target_name, hit.rule))
    }
}
