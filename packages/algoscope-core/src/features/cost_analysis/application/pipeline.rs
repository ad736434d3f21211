//! Analysis pipeline
//!
//! validate → recursion analysis → complexity analysis → pattern
//! classification (per procedure, best-effort).

use super::report::AnalysisReport;
use crate::config::AnalysisConfig;
use crate::errors::Result;
use crate::features::cost_analysis::infrastructure::ComplexityAnalyzer;
use crate::features::pattern_classification::infrastructure::PatternClassifier;
use crate::features::recursion_analysis::infrastructure::RecursionAnalyzer;
use crate::shared::models::{AnalysisTrace, Program};
use rayon::prelude::*;

/// Use-case seam for running a full analysis
pub trait AnalysisUseCase: Send + Sync {
    fn run(&self, program: &Program) -> Result<AnalysisReport>;
}

pub struct AnalysisPipeline {
    config: AnalysisConfig,
    recursion: RecursionAnalyzer,
    complexity: ComplexityAnalyzer,
    classifier: PatternClassifier,
}

impl AnalysisPipeline {
    pub fn new(config: AnalysisConfig) -> Self {
        tracing::info!(
            "analysis_pipeline_initialized (preset={}, patterns={})",
            config.preset,
            config.enable_patterns
        );
        Self {
            recursion: RecursionAnalyzer::new(&config),
            complexity: ComplexityAnalyzer::new(&config),
            classifier: PatternClassifier::new(&config),
            config,
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn run(&self, program: &Program) -> Result<AnalysisReport> {
        let mut trace = AnalysisTrace::new();
        self.run_with_trace(program, &mut trace)
    }

    /// Run the pipeline, appending derivation steps to `trace`
    pub fn run_with_trace(&self, program: &Program, trace: &mut AnalysisTrace) -> Result<AnalysisReport> {
        let validation_diagnostics: Vec<String> = program.validate().iter().map(|e| e.to_string()).collect();
        for diagnostic in &validation_diagnostics {
            tracing::warn!("Validation: {}", diagnostic);
        }

        let recursion = self.recursion.analyze(program);
        let mut complexity = self.complexity.analyze_with_trace(program, &recursion, trace)?;

        if self.config.enable_patterns {
            for analysis in complexity.procedures.values_mut().filter(|p| !p.failed) {
                match self.classifier.classify(
                    &analysis.name,
                    &analysis.recursion_info,
                    analysis.solution.as_ref(),
                    analysis.relation.as_ref(),
                ) {
                    Ok(pattern) => analysis.pattern = Some(pattern),
                    Err(e) => {
                        tracing::warn!("Pattern classification failed for {}: {}", analysis.name, e);
                        analysis.pattern = None;
                    }
                }
            }
        }

        let has_recursion = recursion.values().any(|i| i.is_recursive);
        Ok(AnalysisReport {
            procedure_count: program.procedures.len(),
            has_recursion,
            recursion,
            complexity,
            validation_diagnostics,
        })
    }

    /// Analyze independent programs in parallel
    ///
    /// Each program gets its own session; results keep input order.
    pub fn run_batch(&self, programs: &[Program]) -> Vec<Result<AnalysisReport>> {
        tracing::info!("Batch analysis: {} programs", programs.len());
        programs.par_iter().map(|p| self.run(p)).collect()
    }
}

impl AnalysisUseCase for AnalysisPipeline {
    fn run(&self, program: &Program) -> Result<AnalysisReport> {
        AnalysisPipeline::run(self, program)
    }
}
