//! Recurrence identities and name-independent classification

mod common;

use algoscope_core::{
    AlgorithmPattern, AnalysisConfig, AnalysisPipeline, ComplexityExpr, RecurrenceRelation,
    RecurrenceSolver, SolutionMethod, Subproblem,
};
use common::*;
use pretty_assertions::assert_eq;

fn solver() -> RecurrenceSolver {
    RecurrenceSolver::new(&AnalysisConfig::default())
}

#[test]
fn test_textbook_identities() {
    let cases = [
        (
            RecurrenceRelation::divide(1, 2, ComplexityExpr::Constant),
            ComplexityExpr::Logarithmic,
            "O(log n)",
        ),
        (
            RecurrenceRelation::divide(2, 2, ComplexityExpr::Linear),
            ComplexityExpr::linearithmic(),
            "O(n log n)",
        ),
        (
            RecurrenceRelation::subtract(1, 1, ComplexityExpr::Constant),
            ComplexityExpr::Linear,
            "O(n)",
        ),
        (
            RecurrenceRelation::subtract(2, 1, ComplexityExpr::Constant),
            ComplexityExpr::exponential(2.0, 0.0),
            "O(2^n)",
        ),
    ];

    for (relation, expected, label) in cases {
        let relation = relation.expect("valid relation");
        let solution = solver().solve(&relation);
        assert_eq!(solution.complexity, expected, "{}", relation);
        assert_eq!(solution.label, label);
        assert_eq!(solution.relation, relation.to_string());
    }
}

#[test]
fn test_master_theorem_cases() {
    let n2 = ComplexityExpr::polynomial(2.0);

    let case1 = solver().solve(&RecurrenceRelation::divide(8, 2, n2).unwrap());
    assert_eq!(case1.method, SolutionMethod::MasterCase1);
    assert_eq!(case1.label, "O(n^3)");

    let case2 = solver().solve(&RecurrenceRelation::divide(4, 2, n2).unwrap());
    assert_eq!(case2.method, SolutionMethod::MasterCase2);
    assert_eq!(case2.label, "O(n^2 log n)");

    let case3 = solver().solve(&RecurrenceRelation::divide(2, 2, n2).unwrap());
    assert_eq!(case3.method, SolutionMethod::MasterCase3);
    assert_eq!(case3.label, "O(n^2)");
}

#[test]
fn test_subtract_chain_multiplies_work() {
    let solution = solver().solve(&RecurrenceRelation::subtract(1, 1, ComplexityExpr::Linear).unwrap());
    assert_eq!(solution.complexity, ComplexityExpr::polynomial(2.0));
    assert_eq!(solution.method, SolutionMethod::LinearExpansion);
}

#[test]
fn test_fibonacci_regardless_of_name() {
    let pipeline = AnalysisPipeline::new(AnalysisConfig::default());

    for name in ["Fib", "Mystery", "compute_sequence", "X"] {
        let report = pipeline.run(&fibonacci(name)).expect("analysis succeeds");
        let p = procedure(&report, name);

        assert_eq!(p.recursion_info.call_count, 2, "{name}");
        let solution = p.solution.as_ref().expect("solved");
        assert_eq!(solution.complexity, ComplexityExpr::exponential(2.0, 0.0), "{name}");
        assert_eq!(solution.method, SolutionMethod::FibonacciClosedForm);
        assert!(p.relation.is_none());

        let pattern = p.pattern.as_ref().expect("classified");
        assert_eq!(pattern.pattern, AlgorithmPattern::Fibonacci, "{name}");
        assert!(pattern.confidence >= 0.95, "{name}: {}", pattern.confidence);
    }
}

#[test]
fn test_exclusive_subtractions_stay_linear() {
    let pipeline = AnalysisPipeline::new(AnalysisConfig::default());
    let report = pipeline.run(&parity_walk("W")).expect("analysis succeeds");
    let p = procedure(&report, "W");

    assert_eq!(p.recursion_info.call_count, 1);
    assert_eq!(p.recursion_info.subproblem, Subproblem::NMinus(1));
    let solution = p.solution.as_ref().expect("solved");
    assert_eq!(solution.label, "O(n)");
    assert_eq!(solution.method, SolutionMethod::LinearExpansion);
    let pattern = p.pattern.as_ref().expect("classified");
    assert_ne!(pattern.pattern, AlgorithmPattern::Fibonacci);
}

#[test]
fn test_classification_ignores_names() {
    let pipeline = AnalysisPipeline::new(AnalysisConfig::default());
    let report = pipeline.run(&factorial("BinarySearch")).expect("analysis succeeds");
    let pattern = procedure(&report, "BinarySearch").pattern.as_ref().expect("classified");
    assert_eq!(pattern.pattern, AlgorithmPattern::Factorial);
}
