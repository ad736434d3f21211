//! Test data builders
//!
//! Short constructors for pseudocode ASTs.

use algoscope_core::{BinOp, Expr, Procedure, Program, Stmt};

pub fn var(name: &str) -> Expr {
    Expr::var(name)
}

pub fn num(value: i64) -> Expr {
    Expr::num(value)
}

pub fn bin(op: BinOp, lhs: Expr, rhs: Expr) -> Expr {
    Expr::bin(op, lhs, rhs)
}

/// `name - c`
pub fn minus(name: &str, c: i64) -> Expr {
    bin(BinOp::Sub, var(name), num(c))
}

/// `name + c`
pub fn plus(name: &str, c: i64) -> Expr {
    bin(BinOp::Add, var(name), num(c))
}

/// `A[i]`
pub fn at(array: &str, index: Expr) -> Expr {
    Expr::index(var(array), index)
}

/// `x ← x + 1`
pub fn increment(name: &str) -> Stmt {
    Stmt::assign(var(name), plus(name, 1))
}

/// `for v = 1 to n`
pub fn for_1_to_n(v: &str, body: Vec<Stmt>) -> Stmt {
    Stmt::for_loop(v, num(1), var("n"), body)
}

/// `for v = start to end` over literal bounds
pub fn for_static(v: &str, start: i64, end: i64, body: Vec<Stmt>) -> Stmt {
    Stmt::for_loop(v, num(start), num(end), body)
}

/// `depth` nested `for _ = 1 to n` loops around a constant body
pub fn loop_nest(depth: usize) -> Stmt {
    (0..depth).fold(increment("count"), |body, level| {
        for_1_to_n(&format!("i{}", level), vec![body])
    })
}

/// Builder for Program
#[derive(Debug, Default)]
pub struct ProgramBuilder {
    procedures: Vec<Procedure>,
    body: Vec<Stmt>,
}

impl ProgramBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_procedure(mut self, name: &str, params: Vec<&str>, body: Vec<Stmt>) -> Self {
        self.procedures.push(Procedure::new(name, params, body));
        self
    }

    pub fn with_statement(mut self, stmt: Stmt) -> Self {
        self.body.push(stmt);
        self
    }

    pub fn build(self) -> Program {
        Program::new(self.procedures, self.body)
    }
}
