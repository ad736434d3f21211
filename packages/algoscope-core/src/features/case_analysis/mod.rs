//! Case Analysis
//!
//! Per-loop worst/best/average iteration counts:
//! - static `for` ranges are counted exactly
//! - early-exit signatures split best from worst
//! - `while`/`repeat` bounds follow the control variable's update
//!
//! # Example
//!
//! ```rust,ignore
//! use algoscope_core::features::case_analysis::CaseAnalyzer;
//!
//! let analyzer = CaseAnalyzer::new(&AnalysisConfig::default());
//! let case = analyzer.analyze_loop(&for_stmt)?;
//! println!("worst={} best={} avg={}", case.worst, case.best, case.average);
//! ```

pub mod domain;
pub mod infrastructure;

pub use domain::{Bound, CaseComplexity};
pub use infrastructure::{CaseAnalyzer, LoopUpdate};
