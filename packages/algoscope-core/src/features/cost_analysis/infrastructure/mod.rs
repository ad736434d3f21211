//! Infrastructure layer for cost analysis

pub mod complexity_analyzer;

pub use complexity_analyzer::ComplexityAnalyzer;
