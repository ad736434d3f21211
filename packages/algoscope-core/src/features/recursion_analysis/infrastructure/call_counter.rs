//! Exclusivity-aware recursive call counter
//!
//! The one counter every consumer of `call_count` goes through:
//! - sequential siblings and sub-expressions add up
//! - `if`/`else` branches are mutually exclusive, so only the larger counts
//!   (the condition itself is always evaluated and adds)
//! - a loop body counts once; iteration is the cost analysis' business

use crate::shared::models::{Expr, ExprKind, Stmt, StmtKind};
use rustc_hash::FxHashSet;

/// Count active calls to any of `targets` in `stmt`
pub fn count_recursive_calls(stmt: &Stmt, targets: &FxHashSet<String>) -> u32 {
    match &stmt.kind {
        StmtKind::Block { body } => body.iter().map(|s| count_recursive_calls(s, targets)).sum(),
        StmtKind::If {
            cond,
            then,
            else_branch,
        } => {
            let then_calls = count_recursive_calls(then, targets);
            let else_calls = else_branch
                .as_deref()
                .map(|e| count_recursive_calls(e, targets))
                .unwrap_or(0);
            count_in_expr(cond, targets) + then_calls.max(else_calls)
        }
        StmtKind::Call { name, args } => {
            let own = u32::from(targets.contains(name));
            own + args.iter().map(|a| count_in_expr(a, targets)).sum::<u32>()
        }
        _ => {
            let in_exprs: u32 = stmt.exprs().iter().map(|e| count_in_expr(e, targets)).sum();
            let in_children: u32 = stmt
                .children()
                .iter()
                .map(|s| count_recursive_calls(s, targets))
                .sum();
            in_exprs + in_children
        }
    }
}

/// Count calls to any of `targets` inside one expression
pub fn count_in_expr(expr: &Expr, targets: &FxHashSet<String>) -> u32 {
    let own = match &expr.kind {
        ExprKind::Call { name, .. } => u32::from(targets.contains(name)),
        _ => 0,
    };
    own + expr
        .children()
        .iter()
        .map(|c| count_in_expr(c, targets))
        .sum::<u32>()
}
