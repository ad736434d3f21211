//! Infrastructure layer for case analysis

pub mod case_analyzer;
pub mod iteration_bounds;

pub use case_analyzer::CaseAnalyzer;
pub use iteration_bounds::{for_bound, infer_loop_update, size_class, LoopUpdate};
