//! Recurrence Solving
//!
//! Builds `T(n) = a·T(n ⊘ b) + f(n)` for each recursive procedure and
//! solves it in closed form.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │ Domain Layer                            │
//! │  - RecurrenceRelation (a, b, f, type)   │
//! │  - RecurrenceSolution                   │
//! │  - SolutionMethod                       │
//! └─────────────────────────────────────────┘
//!                   ▲
//!                   │
//! ┌─────────────────────────────────────────┐
//! │ Infrastructure Layer                    │
//! │  - RelationBuilder (a, b, f(n))         │
//! │  - RecurrenceSolver (master theorem,    │
//! │    expansion, closed form, heuristic)   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use algoscope_core::features::recurrence::{RecurrenceRelation, RecurrenceSolver};
//!
//! let solver = RecurrenceSolver::new(&AnalysisConfig::default());
//! let relation = RecurrenceRelation::divide(2, 2, ComplexityExpr::Linear)?;
//! assert_eq!(solver.solve(&relation).label, "O(n log n)");
//! ```

pub mod domain;
pub mod infrastructure;

pub use domain::{RecurrenceRelation, RecurrenceSolution, ReductionType, SolutionMethod};
pub use infrastructure::{RecurrenceSolver, RelationBuilder, RelationShape};
