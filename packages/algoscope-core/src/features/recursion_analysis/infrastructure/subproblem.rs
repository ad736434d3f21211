//! Subproblem evidence
//!
//! Reads how each recursive call site shrinks its input from the shape of
//! its arguments. Precedence across all sites: divide > slice > subtract >
//! modulo.

use super::call_counter::count_recursive_calls;
use crate::features::recursion_analysis::domain::Subproblem;
use crate::shared::models::{BinOp, Expr, ExprKind, Stmt, StmtKind};
use rustc_hash::FxHashSet;
use std::collections::BTreeSet;

/// What one argument says about the subproblem size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Evidence {
    Divide { k: u32, halves_range: bool },
    Slice,
    Subtract(u32),
    Modulo,
}

impl Evidence {
    fn rank(&self) -> u8 {
        match self {
            Self::Divide { .. } => 3,
            Self::Slice => 2,
            Self::Subtract(_) => 1,
            Self::Modulo => 0,
        }
    }
}

/// Aggregated evidence for one procedure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubproblemEvidence {
    pub subproblem: Subproblem,
    pub halves_range: bool,
}

/// `(a + b) / 2` or `a + (b - a) / 2`, optionally under floor/ceil
pub fn is_midpoint_expr(expr: &Expr) -> bool {
    let ExprKind::BinOp { op, lhs, rhs } = &expr.strip_rounding().kind else {
        return false;
    };
    match op {
        op if op.is_division() && rhs.as_integer() == Some(2) => {
            matches!(&lhs.kind, ExprKind::BinOp { op: BinOp::Add, lhs: a, rhs: b }
                if !a.is_constant() && !b.is_constant())
        }
        BinOp::Add => {
            let is_half_span = |e: &Expr| {
                matches!(&e.strip_rounding().kind, ExprKind::BinOp { op, lhs, rhs }
                    if op.is_division()
                        && rhs.as_integer() == Some(2)
                        && matches!(lhs.kind, ExprKind::BinOp { op: BinOp::Sub, .. }))
            };
            is_half_span(rhs) && !lhs.is_constant()
        }
        _ => false,
    }
}

/// Variables assigned a midpoint anywhere in `body`
pub fn midpoint_vars(body: &Stmt) -> FxHashSet<String> {
    assigned_vars_where(body, is_midpoint_expr)
}

/// Variables assigned the result of a call to a procedure outside `targets`
pub fn partition_vars(body: &Stmt, targets: &FxHashSet<String>) -> FxHashSet<String> {
    assigned_vars_where(body, |value| {
        matches!(&value.kind, ExprKind::Call { name, .. } if !targets.contains(name))
    })
}

fn assigned_vars_where(body: &Stmt, pred: impl Fn(&Expr) -> bool) -> FxHashSet<String> {
    let mut out = FxHashSet::default();
    body.walk(&mut |stmt| match &stmt.kind {
        StmtKind::Assign { target, value } if pred(value) => {
            if let Some(name) = target.as_var() {
                out.insert(name.to_string());
            }
        }
        StmtKind::VarDecl {
            name,
            init: Some(init),
        } if pred(init) => {
            out.insert(name.clone());
        }
        _ => {}
    });
    out
}

struct EvidenceReader<'a> {
    midpoints: &'a FxHashSet<String>,
    partitions: &'a FxHashSet<String>,
}

impl EvidenceReader<'_> {
    fn is_midpoint_var(&self, e: &Expr) -> bool {
        e.as_var().is_some_and(|v| self.midpoints.contains(v))
    }

    fn is_partition_var(&self, e: &Expr) -> bool {
        e.as_var().is_some_and(|v| self.partitions.contains(v))
    }

    /// `x / k` with a non-constant x
    fn halving(&self, e: &Expr) -> bool {
        let mut found = false;
        e.walk(&mut |sub| {
            if let ExprKind::BinOp { op, lhs, rhs } = &sub.kind {
                if op.is_division() && rhs.as_integer().is_some_and(|k| k >= 2) && !lhs.is_constant() {
                    found = true;
                }
            }
            if self.is_midpoint_var(sub) {
                found = true;
            }
        });
        found
    }

    fn read(&self, arg: &Expr) -> Option<Evidence> {
        let arg = arg.strip_rounding();

        if self.is_midpoint_var(arg) {
            return Some(Evidence::Divide {
                k: 2,
                halves_range: true,
            });
        }

        match &arg.kind {
            ExprKind::BinOp { op, lhs, rhs } => {
                if op.is_division() {
                    if let Some(k) = rhs.as_integer().filter(|k| *k >= 2) {
                        let halves_range = matches!(&lhs.kind, ExprKind::BinOp { op: BinOp::Add, lhs: a, rhs: b }
                            if !a.is_constant() && !b.is_constant());
                        return Some(Evidence::Divide {
                            k: u32::try_from(k).unwrap_or(2),
                            halves_range,
                        });
                    }
                }

                let offset = rhs.as_integer();
                if matches!(op, BinOp::Add | BinOp::Sub) && offset.is_some() {
                    if self.is_midpoint_var(lhs) {
                        return Some(Evidence::Divide {
                            k: 2,
                            halves_range: true,
                        });
                    }
                    if self.is_partition_var(lhs) {
                        return Some(Evidence::Divide {
                            k: 2,
                            halves_range: false,
                        });
                    }
                }

                match (op, offset) {
                    (BinOp::Sub, Some(c)) if c >= 1 && !lhs.is_constant() => {
                        Some(Evidence::Subtract(u32::try_from(c).unwrap_or(1)))
                    }
                    (BinOp::Mod, _) => Some(Evidence::Modulo),
                    _ => None,
                }
            }
            ExprKind::ArrayRange { start, end, .. } => {
                if self.halving(start) || self.halving(end) {
                    Some(Evidence::Divide {
                        k: 2,
                        halves_range: true,
                    })
                } else {
                    Some(Evidence::Slice)
                }
            }
            _ => None,
        }
    }
}

/// Gather subproblem evidence over every recursive call site in `body`
pub fn infer_subproblem(body: &Stmt, targets: &FxHashSet<String>) -> SubproblemEvidence {
    let midpoints = midpoint_vars(body);
    let partitions = partition_vars(body, targets);
    let reader = EvidenceReader {
        midpoints: &midpoints,
        partitions: &partitions,
    };

    let mut divide: Option<u32> = None;
    let mut halves_range = false;
    let mut slice = false;
    let mut subtracts = BTreeSet::new();
    let mut modulo = false;

    for site in body.call_sites() {
        if !targets.contains(site.name) {
            continue;
        }
        let strongest = site
            .args
            .iter()
            .filter_map(|a| reader.read(a))
            .max_by_key(Evidence::rank);

        match strongest {
            Some(Evidence::Divide { k, halves_range: h }) => {
                divide = Some(divide.map_or(k, |prev| prev.max(k)));
                halves_range |= h;
            }
            Some(Evidence::Slice) => slice = true,
            Some(Evidence::Subtract(c)) => {
                subtracts.insert(c);
            }
            Some(Evidence::Modulo) => modulo = true,
            None => {}
        }
    }

    let subproblem = if let Some(k) = divide {
        Subproblem::NOverK(k)
    } else if slice {
        Subproblem::Slice
    } else if subtracts.len() >= 2 && count_recursive_calls(body, targets) >= 2 {
        Subproblem::MixedConstantSubtract
    } else if let Some(&c) = subtracts.iter().next() {
        // Exclusive branches: the smallest step bounds the depth
        Subproblem::NMinus(c)
    } else if modulo {
        Subproblem::Modulo
    } else {
        Subproblem::Unknown
    };

    SubproblemEvidence {
        subproblem,
        halves_range: divide.is_some() && halves_range,
    }
}
