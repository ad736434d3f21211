//! Custom assertions for analysis results

use algoscope_core::{AnalysisReport, ComplexityExpr, CostTriple, ProcedureAnalysis};

/// Assert that the report carries an analysis for `name` and return it
pub fn procedure<'a>(report: &'a AnalysisReport, name: &str) -> &'a ProcedureAnalysis {
    report
        .complexity
        .procedures
        .get(name)
        .unwrap_or_else(|| {
            panic!(
                "Expected an analysis for {name}, got: {:?}",
                report.complexity.procedures.keys().collect::<Vec<_>>()
            )
        })
}

/// Assert worst / best / average of a whole program
pub fn assert_cost(report: &AnalysisReport, worst: ComplexityExpr, best: ComplexityExpr, average: ComplexityExpr) {
    let c = &report.complexity;
    assert_eq!(
        (c.big_o, c.omega, c.theta),
        (worst, best, average),
        "Expected {} / {} / {}, got {} / {} / {}",
        worst.big_o(),
        best.omega(),
        average.theta(),
        c.big_o.big_o(),
        c.omega.omega(),
        c.theta.theta()
    );
}

/// Assert best ⪯ average ⪯ worst
pub fn assert_ordered(triple: &CostTriple) {
    assert!(triple.is_ordered(), "Cases out of order: {}", triple.describe());
}

/// Assert the label of a procedure's recurrence solution
pub fn assert_solution_label(report: &AnalysisReport, name: &str, expected: &str) {
    let p = procedure(report, name);
    let solution = p
        .solution
        .as_ref()
        .unwrap_or_else(|| panic!("Expected a recurrence solution for {name}"));
    assert_eq!(solution.label, expected, "{name}: {}", solution.explanation);
}
