//! Cost Analysis
//!
//! Infers worst / best / average complexity of a whole program by combining
//! loop case analysis, solved recurrences and structural rules for
//! sequences, branches and calls.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │ Application Layer                       │
//! │  - AnalysisPipeline (run, run_batch)    │
//! │  - AnalysisReport (render_text)         │
//! └─────────────────────────────────────────┘
//!                   │
//!                   ▼
//! ┌─────────────────────────────────────────┐
//! │ Infrastructure Layer                    │
//! │  - ComplexityAnalyzer (orchestrator)    │
//! └─────────────────────────────────────────┘
//!                   │
//!                   ▼
//! ┌─────────────────────────────────────────┐
//! │ Domain Layer                            │
//! │  - CostTriple (worst/best/average)      │
//! │  - Complexity, ProcedureAnalysis        │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use algoscope_core::features::cost_analysis::AnalysisPipeline;
//!
//! let pipeline = AnalysisPipeline::new(AnalysisConfig::default());
//! let report = pipeline.run(&program)?;
//!
//! println!("Worst case: {}", report.complexity.big_o.big_o());
//! println!("{}", report.render_text());
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-export application layer
pub use application::{AnalysisPipeline, AnalysisReport, AnalysisUseCase};

// Re-exports for convenience
pub use domain::{Complexity, CostTriple, ProcedureAnalysis};

pub use infrastructure::ComplexityAnalyzer;
