//! Application layer for cost analysis

pub mod pipeline;
pub mod report;

pub use pipeline::{AnalysisPipeline, AnalysisUseCase};
pub use report::AnalysisReport;
