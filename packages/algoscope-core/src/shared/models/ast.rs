//! Pseudocode AST
//!
//! Immutable tree produced by the (external) parser. Statements and
//! expressions are closed enums so every analysis matches exhaustively.
//!
//! JSON shape: every node is an object tagged with `"type"` (snake_case)
//! and an optional `"span"`:
//!
//! ```text
//! {"type": "for", "var": "i", "start": {"type": "number", "value": 1},
//!  "end": {"type": "var", "name": "n"}, "body": {"type": "block", "body": []}}
//! ```

use super::span::Span;
use crate::errors::AlgoscopeError;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 2^63, the first magnitude past `i64::MAX`
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// A whole parsed program: declared procedures plus the main body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Program {
    #[serde(default)]
    pub procedures: Vec<Procedure>,
    #[serde(default)]
    pub body: Vec<Stmt>,
}

impl Program {
    pub fn new(procedures: Vec<Procedure>, body: Vec<Stmt>) -> Self {
        Self { procedures, body }
    }

    /// Look up a declared procedure by name (first declaration wins)
    pub fn procedure(&self, name: &str) -> Option<&Procedure> {
        self.procedures.iter().find(|p| p.name == name)
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.procedure(name).is_some()
    }

    /// Structural validation
    ///
    /// Returns every malformed shape found; an empty list means the program
    /// is well formed. Problems are per procedure, so callers can keep
    /// analyzing the healthy ones.
    pub fn validate(&self) -> Vec<AlgoscopeError> {
        let mut errors = Vec::new();
        let mut seen = FxHashSet::default();

        for proc in &self.procedures {
            if !seen.insert(proc.name.as_str()) {
                errors.push(AlgoscopeError::malformed(
                    "procedure",
                    proc.span,
                    format!("duplicate procedure name '{}'", proc.name),
                ));
            }
            if let Err(e) = proc.validate() {
                errors.push(e);
            }
        }

        for stmt in &self.body {
            if let Err(e) = stmt.validate() {
                errors.push(e);
            }
        }

        errors
    }
}

/// A declared procedure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Procedure {
    pub name: String,
    #[serde(default)]
    pub params: Vec<String>,
    pub body: Stmt,
    #[serde(default)]
    pub span: Span,
}

impl Procedure {
    pub fn new(name: impl Into<String>, params: Vec<&str>, body: Vec<Stmt>) -> Self {
        Self {
            name: name.into(),
            params: params.into_iter().map(String::from).collect(),
            body: Stmt::block(body),
            span: Span::zero(),
        }
    }

    pub fn validate(&self) -> Result<(), AlgoscopeError> {
        if self.name.trim().is_empty() {
            return Err(AlgoscopeError::malformed(
                "procedure",
                self.span,
                "procedure without a name",
            ));
        }
        self.body.validate()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Statements
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stmt {
    #[serde(flatten)]
    pub kind: StmtKind,
    #[serde(default)]
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StmtKind {
    Block {
        #[serde(default)]
        body: Vec<Stmt>,
    },
    For {
        var: String,
        start: Expr,
        end: Expr,
        body: Box<Stmt>,
    },
    While {
        cond: Expr,
        body: Box<Stmt>,
    },
    /// repeat <body> until <until>
    Repeat {
        body: Box<Stmt>,
        until: Expr,
    },
    If {
        cond: Expr,
        then: Box<Stmt>,
        #[serde(default, rename = "else", skip_serializing_if = "Option::is_none")]
        else_branch: Option<Box<Stmt>>,
    },
    Call {
        name: String,
        #[serde(default)]
        args: Vec<Expr>,
    },
    Assign {
        target: Expr,
        value: Expr,
    },
    Return {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<Expr>,
    },
    VarDecl {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        init: Option<Expr>,
    },
    ArrayDecl {
        name: String,
        #[serde(default)]
        dims: Vec<Expr>,
    },
    ObjectDecl {
        name: String,
        class_name: String,
    },
}

impl Stmt {
    pub fn new(kind: StmtKind) -> Self {
        Self {
            kind,
            span: Span::zero(),
        }
    }

    pub fn at(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn block(body: Vec<Stmt>) -> Self {
        Self::new(StmtKind::Block { body })
    }

    pub fn for_loop(var: impl Into<String>, start: Expr, end: Expr, body: Vec<Stmt>) -> Self {
        Self::new(StmtKind::For {
            var: var.into(),
            start,
            end,
            body: Box::new(Self::block(body)),
        })
    }

    pub fn while_loop(cond: Expr, body: Vec<Stmt>) -> Self {
        Self::new(StmtKind::While {
            cond,
            body: Box::new(Self::block(body)),
        })
    }

    pub fn repeat(body: Vec<Stmt>, until: Expr) -> Self {
        Self::new(StmtKind::Repeat {
            body: Box::new(Self::block(body)),
            until,
        })
    }

    pub fn if_then(cond: Expr, then: Vec<Stmt>) -> Self {
        Self::new(StmtKind::If {
            cond,
            then: Box::new(Self::block(then)),
            else_branch: None,
        })
    }

    pub fn if_else(cond: Expr, then: Vec<Stmt>, otherwise: Vec<Stmt>) -> Self {
        Self::new(StmtKind::If {
            cond,
            then: Box::new(Self::block(then)),
            else_branch: Some(Box::new(Self::block(otherwise))),
        })
    }

    pub fn call(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Self::new(StmtKind::Call {
            name: name.into(),
            args,
        })
    }

    pub fn assign(target: Expr, value: Expr) -> Self {
        Self::new(StmtKind::Assign { target, value })
    }

    pub fn ret(value: Expr) -> Self {
        Self::new(StmtKind::Return { value: Some(value) })
    }

    pub fn ret_none() -> Self {
        Self::new(StmtKind::Return { value: None })
    }

    pub fn var_decl(name: impl Into<String>, init: Option<Expr>) -> Self {
        Self::new(StmtKind::VarDecl {
            name: name.into(),
            init,
        })
    }

    /// Node kind name used in diagnostics
    pub fn kind_name(&self) -> &'static str {
        match &self.kind {
            StmtKind::Block { .. } => "block",
            StmtKind::For { .. } => "for",
            StmtKind::While { .. } => "while",
            StmtKind::Repeat { .. } => "repeat",
            StmtKind::If { .. } => "if",
            StmtKind::Call { .. } => "call",
            StmtKind::Assign { .. } => "assign",
            StmtKind::Return { .. } => "return",
            StmtKind::VarDecl { .. } => "var_decl",
            StmtKind::ArrayDecl { .. } => "array_decl",
            StmtKind::ObjectDecl { .. } => "object_decl",
        }
    }

    pub fn is_loop(&self) -> bool {
        matches!(
            self.kind,
            StmtKind::For { .. } | StmtKind::While { .. } | StmtKind::Repeat { .. }
        )
    }

    /// Expressions owned directly by this statement (not by nested statements)
    pub fn exprs(&self) -> Vec<&Expr> {
        match &self.kind {
            StmtKind::Block { .. } | StmtKind::ObjectDecl { .. } => Vec::new(),
            StmtKind::For { start, end, .. } => vec![start, end],
            StmtKind::While { cond, .. } => vec![cond],
            StmtKind::Repeat { until, .. } => vec![until],
            StmtKind::If { cond, .. } => vec![cond],
            StmtKind::Call { args, .. } => args.iter().collect(),
            StmtKind::Assign { target, value } => vec![target, value],
            StmtKind::Return { value } => value.iter().collect(),
            StmtKind::VarDecl { init, .. } => init.iter().collect(),
            StmtKind::ArrayDecl { dims, .. } => dims.iter().collect(),
        }
    }

    /// Directly nested statements
    pub fn children(&self) -> Vec<&Stmt> {
        match &self.kind {
            StmtKind::Block { body } => body.iter().collect(),
            StmtKind::For { body, .. }
            | StmtKind::While { body, .. }
            | StmtKind::Repeat { body, .. } => vec![body.as_ref()],
            StmtKind::If {
                then, else_branch, ..
            } => {
                let mut out = vec![then.as_ref()];
                if let Some(other) = else_branch {
                    out.push(other.as_ref());
                }
                out
            }
            _ => Vec::new(),
        }
    }

    /// Pre-order walk over this statement and every nested statement
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a Stmt)) {
        f(self);
        for child in self.children() {
            child.walk(f);
        }
    }

    /// Every call site in this subtree, statement calls and call
    /// expressions alike, in source order
    pub fn call_sites(&self) -> Vec<CallSite<'_>> {
        let mut sites = Vec::new();
        self.walk(&mut |stmt| {
            if let StmtKind::Call { name, args } = &stmt.kind {
                sites.push(CallSite {
                    name,
                    args,
                    span: stmt.span,
                });
            }
            for expr in stmt.exprs() {
                expr.collect_call_sites(&mut sites);
            }
        });
        sites
    }

    pub fn validate(&self) -> Result<(), AlgoscopeError> {
        match &self.kind {
            StmtKind::Assign { target, .. } if !target.is_lvalue() => {
                return Err(AlgoscopeError::malformed(
                    "assign",
                    self.span,
                    format!("assignment target '{}' is not assignable", target),
                ));
            }
            StmtKind::Call { name, .. } if name.trim().is_empty() => {
                return Err(AlgoscopeError::malformed(
                    "call",
                    self.span,
                    "call without a procedure name",
                ));
            }
            StmtKind::For { var, .. } if var.trim().is_empty() => {
                return Err(AlgoscopeError::malformed(
                    "for",
                    self.span,
                    "for loop without a control variable",
                ));
            }
            _ => {}
        }

        for expr in self.exprs() {
            expr.validate(self.span)?;
        }
        for child in self.children() {
            child.validate()?;
        }
        Ok(())
    }
}

/// A statically found call site
#[derive(Debug, Clone, Copy)]
pub struct CallSite<'a> {
    pub name: &'a str,
    pub args: &'a [Expr],
    pub span: Span,
}

// ═══════════════════════════════════════════════════════════════════════════
// Expressions
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expr {
    #[serde(flatten)]
    pub kind: ExprKind,
    #[serde(default)]
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExprKind {
    Number {
        value: f64,
    },
    Bool {
        value: bool,
    },
    Str {
        value: String,
    },
    Null,
    Var {
        name: String,
    },
    BinOp {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    UnOp {
        op: UnOp,
        operand: Box<Expr>,
    },
    Call {
        name: String,
        #[serde(default)]
        args: Vec<Expr>,
    },
    ArrayAccess {
        array: Box<Expr>,
        indices: Vec<Expr>,
    },
    ArrayRange {
        array: Box<Expr>,
        start: Box<Expr>,
        end: Box<Expr>,
    },
    FieldAccess {
        object: Box<Expr>,
        field: String,
    },
    /// Built-in functions such as `length(A)`
    StringFunc {
        func: String,
        #[serde(default)]
        args: Vec<Expr>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    IntDiv,
    Mod,
    Pow,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
}

impl BinOp {
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            Self::Eq | Self::Ne | Self::Lt | Self::Le | Self::Gt | Self::Ge
        )
    }

    pub fn is_division(&self) -> bool {
        matches!(self, Self::Div | Self::IntDiv)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::IntDiv => "div",
            Self::Mod => "mod",
            Self::Pow => "^",
            Self::Eq => "=",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::And => "and",
            Self::Or => "or",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnOp {
    Neg,
    Not,
    Floor,
    Ceil,
}

impl Expr {
    pub fn new(kind: ExprKind) -> Self {
        Self {
            kind,
            span: Span::zero(),
        }
    }

    pub fn at(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn num(value: i64) -> Self {
        Self::new(ExprKind::Number {
            value: value as f64,
        })
    }

    pub fn boolean(value: bool) -> Self {
        Self::new(ExprKind::Bool { value })
    }

    pub fn null() -> Self {
        Self::new(ExprKind::Null)
    }

    pub fn var(name: impl Into<String>) -> Self {
        Self::new(ExprKind::Var { name: name.into() })
    }

    pub fn bin(op: BinOp, lhs: Expr, rhs: Expr) -> Self {
        Self::new(ExprKind::BinOp {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        })
    }

    pub fn un(op: UnOp, operand: Expr) -> Self {
        Self::new(ExprKind::UnOp {
            op,
            operand: Box::new(operand),
        })
    }

    pub fn call(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Self::new(ExprKind::Call {
            name: name.into(),
            args,
        })
    }

    pub fn index(array: Expr, index: Expr) -> Self {
        Self::new(ExprKind::ArrayAccess {
            array: Box::new(array),
            indices: vec![index],
        })
    }

    pub fn range(array: Expr, start: Expr, end: Expr) -> Self {
        Self::new(ExprKind::ArrayRange {
            array: Box::new(array),
            start: Box::new(start),
            end: Box::new(end),
        })
    }

    pub fn length(array: Expr) -> Self {
        Self::new(ExprKind::StringFunc {
            func: "length".to_string(),
            args: vec![array],
        })
    }

    pub fn kind_name(&self) -> &'static str {
        match &self.kind {
            ExprKind::Number { .. } => "number",
            ExprKind::Bool { .. } => "bool",
            ExprKind::Str { .. } => "str",
            ExprKind::Null => "null",
            ExprKind::Var { .. } => "var",
            ExprKind::BinOp { .. } => "bin_op",
            ExprKind::UnOp { .. } => "un_op",
            ExprKind::Call { .. } => "call",
            ExprKind::ArrayAccess { .. } => "array_access",
            ExprKind::ArrayRange { .. } => "array_range",
            ExprKind::FieldAccess { .. } => "field_access",
            ExprKind::StringFunc { .. } => "string_func",
        }
    }

    /// Integer literal value, if this is one
    pub fn as_integer(&self) -> Option<i64> {
        match &self.kind {
            // Literals outside the i64 range are not integers we can count with
            ExprKind::Number { value }
                if value.fract() == 0.0 && (-I64_BOUND..I64_BOUND).contains(value) =>
            {
                Some(*value as i64)
            }
            ExprKind::UnOp {
                op: UnOp::Neg,
                operand,
            } => operand.as_integer().and_then(i64::checked_neg),
            _ => None,
        }
    }

    pub fn as_var(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::Var { name } => Some(name),
            _ => None,
        }
    }

    /// Strip `floor(..)` / `ceil(..)` wrappers
    pub fn strip_rounding(&self) -> &Expr {
        match &self.kind {
            ExprKind::UnOp {
                op: UnOp::Floor | UnOp::Ceil,
                operand,
            } => operand.strip_rounding(),
            _ => self,
        }
    }

    pub fn is_constant(&self) -> bool {
        match &self.kind {
            ExprKind::Number { .. }
            | ExprKind::Bool { .. }
            | ExprKind::Str { .. }
            | ExprKind::Null => true,
            ExprKind::BinOp { lhs, rhs, .. } => lhs.is_constant() && rhs.is_constant(),
            ExprKind::UnOp { operand, .. } => operand.is_constant(),
            _ => false,
        }
    }

    pub fn is_lvalue(&self) -> bool {
        matches!(
            self.kind,
            ExprKind::Var { .. } | ExprKind::ArrayAccess { .. } | ExprKind::FieldAccess { .. }
        )
    }

    /// `and`/`or` of comparisons, or a bare comparison
    pub fn is_comparison(&self) -> bool {
        match &self.kind {
            ExprKind::BinOp { op, lhs, rhs } => match op {
                BinOp::And | BinOp::Or => lhs.is_comparison() || rhs.is_comparison(),
                op => op.is_comparison(),
            },
            ExprKind::UnOp {
                op: UnOp::Not,
                operand,
            } => operand.is_comparison(),
            _ => false,
        }
    }

    /// Direct sub-expressions
    pub fn children(&self) -> Vec<&Expr> {
        match &self.kind {
            ExprKind::Number { .. }
            | ExprKind::Bool { .. }
            | ExprKind::Str { .. }
            | ExprKind::Null
            | ExprKind::Var { .. } => Vec::new(),
            ExprKind::BinOp { lhs, rhs, .. } => vec![lhs, rhs],
            ExprKind::UnOp { operand, .. } => vec![operand],
            ExprKind::Call { args, .. } | ExprKind::StringFunc { args, .. } => {
                args.iter().collect()
            }
            ExprKind::ArrayAccess { array, indices } => {
                let mut out = vec![array.as_ref()];
                out.extend(indices.iter());
                out
            }
            ExprKind::ArrayRange { array, start, end } => vec![array, start, end],
            ExprKind::FieldAccess { object, .. } => vec![object],
        }
    }

    /// Pre-order walk
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a Expr)) {
        f(self);
        for child in self.children() {
            child.walk(f);
        }
    }

    /// Variable names referenced anywhere in this expression
    pub fn vars(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.walk(&mut |e| {
            if let ExprKind::Var { name } = &e.kind {
                out.push(name.as_str());
            }
        });
        out
    }

    pub fn references_var(&self, var: &str) -> bool {
        self.vars().contains(&var)
    }

    pub(crate) fn collect_call_sites<'a>(&'a self, sites: &mut Vec<CallSite<'a>>) {
        self.walk(&mut |e| {
            if let ExprKind::Call { name, args } = &e.kind {
                sites.push(CallSite {
                    name,
                    args,
                    span: e.span,
                });
            }
        });
    }

    pub fn call_sites(&self) -> Vec<CallSite<'_>> {
        let mut sites = Vec::new();
        self.collect_call_sites(&mut sites);
        sites
    }

    fn validate(&self, stmt_span: Span) -> Result<(), AlgoscopeError> {
        if let ExprKind::Call { name, .. } = &self.kind {
            if name.trim().is_empty() {
                let span = if self.span.is_zero() {
                    stmt_span
                } else {
                    self.span
                };
                return Err(AlgoscopeError::malformed(
                    "call",
                    span,
                    "call expression without a procedure name",
                ));
            }
        }
        for child in self.children() {
            child.validate(stmt_span)?;
        }
        Ok(())
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Number { value } => {
                if value.fract() == 0.0 {
                    write!(f, "{}", *value as i64)
                } else {
                    write!(f, "{}", value)
                }
            }
            ExprKind::Bool { value } => write!(f, "{}", if *value { "T" } else { "F" }),
            ExprKind::Str { value } => write!(f, "\"{}\"", value),
            ExprKind::Null => write!(f, "NULL"),
            ExprKind::Var { name } => write!(f, "{}", name),
            ExprKind::BinOp { op, lhs, rhs } => write!(f, "({} {} {})", lhs, op.as_str(), rhs),
            ExprKind::UnOp { op, operand } => match op {
                UnOp::Neg => write!(f, "-{}", operand),
                UnOp::Not => write!(f, "not {}", operand),
                UnOp::Floor => write!(f, "floor({})", operand),
                UnOp::Ceil => write!(f, "ceil({})", operand),
            },
            ExprKind::Call { name, args } | ExprKind::StringFunc { func: name, args } => {
                write!(f, "{}(", name)?;
                write_list(f, args)?;
                write!(f, ")")
            }
            ExprKind::ArrayAccess { array, indices } => {
                write!(f, "{}[", array)?;
                write_list(f, indices)?;
                write!(f, "]")
            }
            ExprKind::ArrayRange { array, start, end } => {
                write!(f, "{}[{}..{}]", array, start, end)
            }
            ExprKind::FieldAccess { object, field } => write!(f, "{}.{}", object, field),
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[Expr]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_call_sites_cover_statements_and_expressions() {
        let body = Stmt::block(vec![
            Stmt::call("Helper", vec![Expr::var("n")]),
            Stmt::ret(Expr::bin(
                BinOp::Add,
                Expr::call("F", vec![Expr::bin(BinOp::Sub, Expr::var("n"), Expr::num(1))]),
                Expr::call("F", vec![Expr::bin(BinOp::Sub, Expr::var("n"), Expr::num(2))]),
            )),
        ]);

        let names: Vec<_> = body.call_sites().iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Helper", "F", "F"]);
    }

    #[test]
    fn test_as_integer_rejects_out_of_range_literals() {
        let huge = || Expr::new(ExprKind::Number { value: 1e19 });
        assert_eq!(huge().as_integer(), None);
        assert_eq!(Expr::un(UnOp::Neg, Expr::un(UnOp::Neg, huge())).as_integer(), None);

        let min = Expr::new(ExprKind::Number {
            value: i64::MIN as f64,
        });
        assert_eq!(min.as_integer(), Some(i64::MIN));
        assert_eq!(Expr::un(UnOp::Neg, min).as_integer(), None);
        assert_eq!(Expr::un(UnOp::Neg, Expr::num(7)).as_integer(), Some(-7));
    }

    #[test]
    fn test_json_shape() {
        let json = r#"{
            "type": "for", "var": "i",
            "start": {"type": "number", "value": 1},
            "end": {"type": "var", "name": "n"},
            "body": {"type": "block", "body": [
                {"type": "assign",
                 "target": {"type": "var", "name": "x"},
                 "value": {"type": "null"},
                 "span": {"start_line": 2, "start_col": 4, "end_line": 2, "end_col": 12}}
            ]}
        }"#;
        let stmt: Stmt = serde_json::from_str(json).unwrap();

        let StmtKind::For { var, start, body, .. } = &stmt.kind else {
            panic!("expected a for loop, got {}", stmt.kind_name());
        };
        assert_eq!(var, "i");
        assert_eq!(start.as_integer(), Some(1));
        assert_eq!(body.children()[0].span.start_line, 2);

        let back = serde_json::to_string(&stmt).unwrap();
        let again: Stmt = serde_json::from_str(&back).unwrap();
        assert_eq!(stmt, again);
    }

    #[test]
    fn test_validate_rejects_non_lvalue_target() {
        let bad = Stmt::assign(Expr::num(3), Expr::var("x")).at(Span::line(7));
        let err = bad.validate().unwrap_err();
        match err {
            AlgoscopeError::MalformedNode {
                node_kind,
                location,
                ..
            } => {
                assert_eq!(node_kind, "assign");
                assert_eq!(location.start_line, 7);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_program_validate_reports_duplicates() {
        let p = Procedure::new("P", vec![], vec![]);
        let program = Program::new(vec![p.clone(), p], vec![]);
        assert_eq!(program.validate().len(), 1);
    }

    #[test]
    fn test_display() {
        let e = Expr::index(
            Expr::var("A"),
            Expr::bin(BinOp::IntDiv, Expr::var("n"), Expr::num(2)),
        );
        assert_eq!(e.to_string(), "A[(n div 2)]");
    }

    #[test]
    fn test_is_comparison() {
        let cmp = Expr::bin(BinOp::Le, Expr::var("i"), Expr::var("n"));
        let conj = Expr::bin(BinOp::And, cmp.clone(), Expr::boolean(true));
        assert!(cmp.is_comparison());
        assert!(conj.is_comparison());
        assert!(!Expr::var("found").is_comparison());
    }
}
