//! Shared models used by every feature

pub mod ast;
pub mod complexity;
pub mod span;
pub mod trace;

pub use ast::{BinOp, CallSite, Expr, ExprKind, Procedure, Program, Stmt, StmtKind, UnOp};
pub use complexity::ComplexityExpr;
pub use span::Span;
pub use trace::AnalysisTrace;
