//! Recursion Analysis
//!
//! Classifies every declared procedure as non-recursive, directly,
//! indirectly or tail recursive, and describes how it recurses.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │ Domain Layer                            │
//! │  - RecursionInfo / RecursionMap         │
//! │  - RecursionType, DepthPattern          │
//! │  - Subproblem (n-c, n/k, slice, ...)    │
//! └─────────────────────────────────────────┘
//!                   ▲
//!                   │
//! ┌─────────────────────────────────────────┐
//! │ Infrastructure Layer                    │
//! │  - CallGraph (petgraph, Tarjan SCC)     │
//! │  - call counter (exclusive branches)    │
//! │  - subproblem evidence                  │
//! │  - RecursionAnalyzer                    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use algoscope_core::features::recursion_analysis::RecursionAnalyzer;
//!
//! let analyzer = RecursionAnalyzer::new(&AnalysisConfig::default());
//! let map = analyzer.analyze(&program);
//! println!("{:?}", map["Factorial"].depth_pattern);
//! ```

pub mod domain;
pub mod infrastructure;

pub use domain::{DepthPattern, RecursionInfo, RecursionMap, RecursionType, Subproblem};
pub use infrastructure::{CallGraph, RecursionAnalyzer};
