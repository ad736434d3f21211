//! Infrastructure layer for recursion analysis

pub mod call_counter;
pub mod call_graph;
pub mod recursion_analyzer;
pub mod subproblem;

pub use call_counter::{count_in_expr, count_recursive_calls};
pub use call_graph::CallGraph;
pub use recursion_analyzer::{has_merge_loop, is_tail_recursive, RecursionAnalyzer};
pub use subproblem::{infer_subproblem, is_midpoint_expr, midpoint_vars, SubproblemEvidence};
