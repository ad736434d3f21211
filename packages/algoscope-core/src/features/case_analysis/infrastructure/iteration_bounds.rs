//! Loop iteration bounds
//!
//! `for` bounds come from the range expressions; `while`/`repeat` bounds
//! from how the condition's variables are updated inside the body.

use crate::features::case_analysis::domain::Bound;
use crate::features::recursion_analysis::infrastructure::{is_midpoint_expr, midpoint_vars};
use crate::shared::models::{BinOp, ComplexityExpr, Expr, ExprKind, Stmt, StmtKind, UnOp};
use rustc_hash::FxHashSet;

/// Growth class of a size expression
pub fn size_class(expr: &Expr) -> ComplexityExpr {
    match &expr.kind {
        ExprKind::Number { .. } | ExprKind::Bool { .. } | ExprKind::Str { .. } | ExprKind::Null => {
            ComplexityExpr::Constant
        }
        ExprKind::Var { .. }
        | ExprKind::StringFunc { .. }
        | ExprKind::ArrayAccess { .. }
        | ExprKind::ArrayRange { .. }
        | ExprKind::FieldAccess { .. }
        | ExprKind::Call { .. } => ComplexityExpr::Linear,
        ExprKind::UnOp { op, operand } => match op {
            UnOp::Neg | UnOp::Floor | UnOp::Ceil => size_class(operand),
            UnOp::Not => ComplexityExpr::Constant,
        },
        ExprKind::BinOp { op, lhs, rhs } => match op {
            BinOp::Mul => size_class(lhs).times(&size_class(rhs)),
            BinOp::Div | BinOp::IntDiv => size_class(lhs),
            BinOp::Pow => match (lhs.as_integer(), rhs.as_integer()) {
                (_, Some(k)) if k >= 0 => size_class(lhs).pow(u32::try_from(k).unwrap_or(u32::MAX)),
                (Some(base), None) if base >= 2 => ComplexityExpr::exponential(base as f64, 0.0),
                _ => size_class(lhs).dominant(&size_class(rhs)),
            },
            _ => size_class(lhs).dominant(&size_class(rhs)),
        },
    }
}

/// Iteration count of `for v = start to end`
pub fn for_bound(start: &Expr, end: &Expr) -> Bound {
    if let (Some(s), Some(e)) = (start.as_integer(), end.as_integer()) {
        let span = i128::from(e) - i128::from(s) + 1;
        let count = u64::try_from(span.max(0)).unwrap_or(u64::MAX);
        return Bound::Exact(count);
    }

    let class = size_class(start).dominant(&size_class(end));
    if class.is_constant() && !(start.is_constant() && end.is_constant()) {
        // Non-constant range we cannot size
        return Bound::linear();
    }
    Bound::Symbolic(class)
}

/// How a loop's control variable progresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LoopUpdate {
    /// No recognised update
    Unknown,
    /// v ← v ± c
    Additive,
    /// v ← v * k, v ← v / k, or narrowing to a midpoint
    Multiplicative,
    /// v ← v * v, v ← v ^ 2
    Squaring,
}

impl LoopUpdate {
    pub fn iterations(&self) -> ComplexityExpr {
        match self {
            Self::Unknown | Self::Additive => ComplexityExpr::Linear,
            Self::Multiplicative => ComplexityExpr::Logarithmic,
            Self::Squaring => ComplexityExpr::LogLog,
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Self::Unknown => "no recognised update, assuming n iterations",
            Self::Additive => "additive step, n iterations",
            Self::Multiplicative => "multiplicative step, log n iterations",
            Self::Squaring => "squaring step, log log n iterations",
        }
    }
}

fn classify_update(var: &str, value: &Expr, midpoints: &FxHashSet<String>) -> LoopUpdate {
    let is_var = |e: &Expr| e.as_var() == Some(var);
    let is_midpoint = |e: &Expr| e.as_var().is_some_and(|v| midpoints.contains(v)) || is_midpoint_expr(e);
    let const_at_least = |e: &Expr, min: i64| e.as_integer().is_some_and(|k| k >= min);

    if is_midpoint(value) {
        return LoopUpdate::Multiplicative;
    }

    let ExprKind::BinOp { op, lhs, rhs } = &value.strip_rounding().kind else {
        return LoopUpdate::Unknown;
    };

    match op {
        BinOp::Mul if is_var(lhs) && is_var(rhs) => LoopUpdate::Squaring,
        BinOp::Pow if is_var(lhs) && rhs.as_integer() == Some(2) => LoopUpdate::Squaring,
        BinOp::Mul
            if (is_var(lhs) && const_at_least(rhs, 2)) || (is_var(rhs) && const_at_least(lhs, 2)) =>
        {
            LoopUpdate::Multiplicative
        }
        op if op.is_division() && is_var(lhs) && const_at_least(rhs, 2) => LoopUpdate::Multiplicative,
        BinOp::Add | BinOp::Sub if is_midpoint(lhs) && rhs.is_constant() => LoopUpdate::Multiplicative,
        BinOp::Add if (is_var(lhs) && rhs.is_constant()) || (is_var(rhs) && lhs.is_constant()) => {
            LoopUpdate::Additive
        }
        BinOp::Sub if is_var(lhs) && rhs.is_constant() => LoopUpdate::Additive,
        // v ← v + step with a variable step still moves by a fixed amount
        BinOp::Add | BinOp::Sub if is_var(lhs) => LoopUpdate::Additive,
        _ => LoopUpdate::Unknown,
    }
}

/// Strongest update applied to a condition variable inside `body`
pub fn infer_loop_update(cond: &Expr, body: &Stmt, max_depth: usize) -> LoopUpdate {
    let control: FxHashSet<&str> = cond.vars().into_iter().collect();
    let midpoints = midpoint_vars(body);
    let mut best = LoopUpdate::Unknown;
    scan_updates(body, 0, max_depth, &mut |target, value| {
        if control.contains(target) {
            best = best.max(classify_update(target, value, &midpoints));
        }
    });
    best
}

fn scan_updates(stmt: &Stmt, depth: usize, max_depth: usize, f: &mut impl FnMut(&str, &Expr)) {
    if depth > max_depth {
        return;
    }
    match &stmt.kind {
        StmtKind::Assign { target, value } => {
            if let Some(name) = target.as_var() {
                f(name, value);
            }
        }
        StmtKind::Block { body } => {
            for s in body {
                scan_updates(s, depth, max_depth, f);
            }
        }
        _ => {
            for child in stmt.children() {
                scan_updates(child, depth + 1, max_depth, f);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(n: &str) -> Expr {
        Expr::var(n)
    }

    fn bin(op: BinOp, a: Expr, b: Expr) -> Expr {
        Expr::bin(op, a, b)
    }

    #[test]
    fn test_for_bound_exact() {
        assert_eq!(for_bound(&Expr::num(1), &Expr::num(10)), Bound::Exact(10));
        assert_eq!(for_bound(&Expr::num(3), &Expr::num(2)), Bound::Exact(0));
        assert_eq!(for_bound(&Expr::num(0), &Expr::num(0)), Bound::Exact(1));
    }

    #[test]
    fn test_for_bound_extreme_literals() {
        let low = Expr::num(i64::MIN);
        let high = Expr::num(1 << 62);
        assert_eq!(for_bound(&low, &high), Bound::Exact((1u64 << 63) + (1 << 62) + 1));
        assert_eq!(for_bound(&high, &low), Bound::Exact(0));

        // 1e19 is past i64 and is sized as a constant instead
        let huge = Expr::new(ExprKind::Number { value: 1e19 });
        assert_eq!(
            for_bound(&Expr::num(0), &huge),
            Bound::Symbolic(ComplexityExpr::Constant)
        );
        let negated = Expr::un(UnOp::Neg, Expr::un(UnOp::Neg, huge));
        assert_eq!(
            for_bound(&Expr::num(0), &negated),
            Bound::Symbolic(ComplexityExpr::Constant)
        );
    }

    #[test]
    fn test_huge_literal_exponent_is_sized_directly() {
        let bound = for_bound(&Expr::num(1), &bin(BinOp::Pow, var("n"), Expr::num(400_000_000)));
        assert_eq!(bound, Bound::Symbolic(ComplexityExpr::polynomial(400_000_000.0)));
    }

    #[test]
    fn test_for_bound_symbolic() {
        assert_eq!(for_bound(&Expr::num(1), &var("n")), Bound::linear());
        assert_eq!(
            for_bound(&Expr::num(1), &bin(BinOp::Mul, var("n"), var("n"))),
            Bound::Symbolic(ComplexityExpr::polynomial(2.0))
        );
        assert_eq!(
            for_bound(&Expr::num(1), &bin(BinOp::Pow, var("n"), Expr::num(3))),
            Bound::Symbolic(ComplexityExpr::polynomial(3.0))
        );
        assert_eq!(
            for_bound(&Expr::num(1), &bin(BinOp::Sub, Expr::length(var("A")), Expr::num(1))),
            Bound::linear()
        );
    }

    #[test]
    fn test_while_updates() {
        let cond = bin(BinOp::Lt, var("i"), var("n"));
        let step = |value: Expr| Stmt::block(vec![Stmt::assign(var("i"), value)]);

        let additive = step(bin(BinOp::Add, var("i"), Expr::num(1)));
        assert_eq!(infer_loop_update(&cond, &additive, 10), LoopUpdate::Additive);

        let doubling = step(bin(BinOp::Mul, var("i"), Expr::num(2)));
        assert_eq!(infer_loop_update(&cond, &doubling, 10), LoopUpdate::Multiplicative);

        let squaring = step(bin(BinOp::Mul, var("i"), var("i")));
        assert_eq!(infer_loop_update(&cond, &squaring, 10).iterations(), ComplexityExpr::LogLog);

        let unrelated = Stmt::block(vec![Stmt::assign(var("k"), Expr::num(0))]);
        assert_eq!(infer_loop_update(&cond, &unrelated, 10), LoopUpdate::Unknown);
    }

    #[test]
    fn test_multiplicative_outranks_additive() {
        let cond = bin(BinOp::Gt, var("n"), Expr::num(1));
        let body = Stmt::block(vec![
            Stmt::assign(var("n"), bin(BinOp::Sub, var("n"), Expr::num(1))),
            Stmt::assign(var("n"), bin(BinOp::IntDiv, var("n"), Expr::num(2))),
        ]);
        assert_eq!(infer_loop_update(&cond, &body, 10), LoopUpdate::Multiplicative);
    }

    #[test]
    fn test_binary_search_loop_narrows_to_midpoint() {
        let cond = bin(BinOp::Le, var("lo"), var("hi"));
        let mid = bin(BinOp::IntDiv, bin(BinOp::Add, var("lo"), var("hi")), Expr::num(2));
        let body = Stmt::block(vec![
            Stmt::assign(var("mid"), mid),
            Stmt::if_else(
                bin(BinOp::Lt, Expr::index(var("A"), var("mid")), var("x")),
                vec![Stmt::assign(var("lo"), bin(BinOp::Add, var("mid"), Expr::num(1)))],
                vec![Stmt::assign(var("hi"), bin(BinOp::Sub, var("mid"), Expr::num(1)))],
            ),
        ]);
        assert_eq!(
            infer_loop_update(&cond, &body, 10).iterations(),
            ComplexityExpr::Logarithmic
        );
    }

    #[test]
    fn test_depth_cap_hides_deep_updates() {
        let cond = bin(BinOp::Lt, var("i"), var("n"));
        let mut body = Stmt::assign(var("i"), bin(BinOp::Mul, var("i"), Expr::num(2)));
        for _ in 0..5 {
            body = Stmt::if_then(Expr::boolean(true), vec![body]);
        }
        assert_eq!(infer_loop_update(&cond, &body, 2), LoopUpdate::Unknown);
        assert_eq!(infer_loop_update(&cond, &body, 10), LoopUpdate::Multiplicative);
    }
}
