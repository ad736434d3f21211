//! Infrastructure layer for recurrence solving

pub mod relation_builder;
pub mod solver;

pub use relation_builder::{loop_nesting_depth, RelationBuilder, RelationShape};
pub use solver::{fibonacci_closed_form, heuristic, RecurrenceSolver};
