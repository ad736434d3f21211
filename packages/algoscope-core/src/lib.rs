/*
 * Algoscope Core - Asymptotic Complexity Inference
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Common models (AST, ComplexityExpr, Span, AnalysisTrace)
 * - config/      : Presets, heuristic rule tables, YAML io
 * - features/    : Vertical slices (recursion → case → recurrence → cost → patterns)
 *
 * Input is an already-parsed pseudocode AST; output is worst / best / average
 * bounds plus per-procedure recurrences and algorithm patterns.
 */

#![allow(clippy::module_inception)] // Module naming intentional
#![allow(clippy::new_without_default)] // Default impl not always needed

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Configuration (presets, rule tables, YAML)
pub mod config;

/// Crate error type
pub mod errors;

/// Feature modules (vertical slices)
pub mod features;

/// Shared models and utilities
pub mod shared;

// ═══════════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use config::{AnalysisConfig, ConfigError, HeuristicRules, Preset, Validatable};
pub use errors::{AlgoscopeError, Result};

pub use shared::models::{
    AnalysisTrace, BinOp, ComplexityExpr, Expr, ExprKind, Procedure, Program, Span, Stmt,
    StmtKind, UnOp,
};

pub use features::case_analysis::{Bound, CaseAnalyzer, CaseComplexity};
pub use features::cost_analysis::{
    AnalysisPipeline, AnalysisReport, AnalysisUseCase, Complexity, ComplexityAnalyzer, CostTriple,
    ProcedureAnalysis,
};
pub use features::pattern_classification::{
    AlgorithmPattern, PatternClassification, PatternClassifier,
};
pub use features::recurrence::{
    RecurrenceRelation, RecurrenceSolution, RecurrenceSolver, ReductionType, SolutionMethod,
};
pub use features::recursion_analysis::{
    DepthPattern, RecursionAnalyzer, RecursionInfo, RecursionMap, RecursionType, Subproblem,
};

/// Analyze a program with the default (balanced) configuration
///
/// # Example
/// ```rust,ignore
/// use algoscope_core::{analyze, Program};
///
/// let program: Program = serde_json::from_str(&json)?;
/// let report = analyze(&program)?;
/// println!("{}", report.render_text());
/// ```
pub fn analyze(program: &Program) -> Result<AnalysisReport> {
    AnalysisPipeline::new(AnalysisConfig::default()).run(program)
}
