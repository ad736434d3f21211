//! Pattern Classifier
//!
//! Matches a procedure against an ordered table of classical algorithm
//! signatures. The first signature whose predicate holds wins. Predicates
//! only look at structure (call count, depth pattern, subproblem, the
//! relation's a and f, combining work, growth class of the solution).
//! A name keyword can raise the confidence of a match but never creates one.

use crate::config::{AnalysisConfig, CompiledRules};
use crate::features::pattern_classification::domain::{AlgorithmPattern, PatternClassification};
use crate::features::recurrence::domain::{RecurrenceRelation, RecurrenceSolution};
use crate::features::recurrence::infrastructure::heuristic;
use crate::features::recursion_analysis::domain::{DepthPattern, RecursionInfo, Subproblem};
use crate::shared::models::ComplexityExpr;

/// Everything a signature predicate may look at
struct Facts<'a> {
    info: &'a RecursionInfo,
    solution: &'a RecurrenceSolution,
    relation: Option<&'a RecurrenceRelation>,
}

impl Facts<'_> {
    fn calls(&self) -> u32 {
        self.info.call_count
    }

    fn halves(&self) -> bool {
        self.info.subproblem == Subproblem::NOverK(2)
    }

    fn divide_and_conquer(&self) -> bool {
        self.info.depth_pattern == DepthPattern::DivideAndConquer
    }

    fn growth(&self) -> ComplexityExpr {
        self.solution.complexity
    }

    fn relation_a(&self) -> Option<u32> {
        self.relation.map(|r| r.a)
    }
}

struct Signature {
    pattern: AlgorithmPattern,
    /// Confidence without / with a keyword match
    confidence: (f64, f64),
    /// Complexity label to report; `None` echoes the solver's label
    complexity: Option<&'static str>,
    rationale: &'static str,
    characteristics: &'static [&'static str],
    matches: fn(&Facts<'_>) -> bool,
}

static SIGNATURES: &[Signature] = &[
    Signature {
        pattern: AlgorithmPattern::BinarySearch,
        confidence: (1.0, 1.0),
        complexity: Some("O(log n)"),
        rationale: "T(n) = T(n/2) + O(1): one call on half of an index range, constant work",
        characteristics: &[
            "1 active recursive call",
            "halves the index range",
            "no combining work",
        ],
        matches: |f| {
            f.calls() == 1
                && f.divide_and_conquer()
                && f.halves()
                && f.info.halves_range
                && f.relation_a().unwrap_or(1) == 1
                && f.growth().is_logarithmic()
        },
    },
    Signature {
        pattern: AlgorithmPattern::MergeSort,
        confidence: (0.99, 1.0),
        complexity: Some("O(n log n)"),
        rationale: "T(n) = 2T(n/2) + O(n): split in halves, merge in linear time",
        characteristics: &[
            "2 recursive calls",
            "splits into exact halves",
            "linear merge phase",
        ],
        matches: |f| {
            f.divide_and_conquer()
                && f.halves()
                && f.calls() >= 2
                && f.growth().is_linearithmic()
                && f.relation.is_some_and(|r| r.a == 2 && r.f_complexity == ComplexityExpr::Linear)
                && f.info.has_combining_work
        },
    },
    Signature {
        pattern: AlgorithmPattern::QuickSort,
        confidence: (0.90, 0.98),
        complexity: Some("O(n log n) average, O(n^2) worst case"),
        rationale: "2 calls around a partition with no merge phase; an unbalanced pivot degrades to O(n^2)",
        characteristics: &[
            "2 recursive calls",
            "partition may be unbalanced",
            "no combining phase",
        ],
        matches: |f| {
            f.calls() >= 2
                && f.divide_and_conquer()
                && !f.info.has_combining_work
                && f.growth().is_linearithmic()
        },
    },
    Signature {
        pattern: AlgorithmPattern::Fibonacci,
        confidence: (1.0, 1.0),
        complexity: Some("O(2^n)"),
        rationale: "T(n) = T(n-1) + T(n-2): binary recursion tree of height n",
        characteristics: &[
            "calls on n-1 and n-2",
            "recomputes overlapping subproblems",
            "O(n) with memoisation",
        ],
        matches: |f| {
            f.calls() >= 2
                && f.info.subproblem == Subproblem::MixedConstantSubtract
                && f.growth().is_exponential()
        },
    },
    Signature {
        pattern: AlgorithmPattern::Factorial,
        confidence: (0.85, 1.0),
        complexity: Some("O(n)"),
        rationale: "T(n) = T(n-1) + O(1): simple linear recursion",
        characteristics: &[
            "1 recursive call",
            "reduces the input by 1",
            "constant work per call",
        ],
        matches: |f| {
            f.calls() == 1
                && f.info.subproblem == Subproblem::NMinus(1)
                && f.info.depth_pattern == DepthPattern::Linear
                && f.growth() == ComplexityExpr::Linear
        },
    },
    Signature {
        pattern: AlgorithmPattern::TowerOfHanoi,
        confidence: (0.80, 1.0),
        complexity: Some("O(2^n)"),
        rationale: "T(n) = 2T(n-1) + O(1): 2^n - 1 moves",
        characteristics: &[
            "2 recursive calls",
            "each on n-1",
            "constant work per call",
        ],
        matches: |f| {
            f.calls() == 2
                && f.info.subproblem == Subproblem::NMinus(1)
                && f.info.depth_pattern == DepthPattern::Tree
                && f.growth() == ComplexityExpr::exponential(2.0, 0.0)
        },
    },
    Signature {
        pattern: AlgorithmPattern::GCDEuclidean,
        confidence: (0.70, 0.95),
        complexity: Some("O(log min(a, b))"),
        rationale: "Euclid's algorithm: the remainder shrinks the arguments geometrically",
        characteristics: &[
            "1 recursive call",
            "reduces with mod",
            "logarithmic in the smaller argument",
        ],
        matches: |f| {
            f.calls() == 1
                && matches!(
                    f.info.depth_pattern,
                    DepthPattern::Linear | DepthPattern::DivideAndConquer | DepthPattern::Unknown
                )
                && matches!(f.info.subproblem, Subproblem::Modulo | Subproblem::Unknown)
                && f.growth().is_logarithmic()
        },
    },
    Signature {
        pattern: AlgorithmPattern::PowerRecursive,
        confidence: (0.75, 0.95),
        complexity: Some("O(log n)"),
        rationale: "fast exponentiation: one call on n/2, log n multiplications",
        characteristics: &["1 call on n/2", "squares the partial result"],
        matches: |f| {
            f.calls() == 1 && f.halves() && f.divide_and_conquer() && f.growth().is_logarithmic()
        },
    },
    Signature {
        pattern: AlgorithmPattern::Karatsuba,
        confidence: (0.80, 0.95),
        complexity: Some("O(n^1.58)"),
        rationale: "T(n) = 3T(n/2) + O(n): sub-quadratic multiplication",
        characteristics: &["3 recursive calls", "splits operands in halves"],
        matches: |f| f.calls() == 3 && f.halves() && f.divide_and_conquer(),
    },
    Signature {
        pattern: AlgorithmPattern::Permutations,
        confidence: (0.65, 0.90),
        complexity: None,
        rationale: "backtracking: explores many branches of a decision tree",
        characteristics: &["4+ recursive calls", "explores a decision tree"],
        matches: |f| {
            f.calls() >= 4
                && f.info.depth_pattern == DepthPattern::Tree
                && f.growth().is_exponential()
        },
    },
];

pub struct PatternClassifier {
    rules: CompiledRules,
}

impl PatternClassifier {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            rules: CompiledRules::compile_lossy(&config.rules),
        }
    }

    /// Classify one procedure
    ///
    /// A recursive procedure without a solution is classified against the
    /// heuristic solution for its recursion shape.
    pub fn classify(
        &self,
        name: &str,
        info: &RecursionInfo,
        solution: Option<&RecurrenceSolution>,
        relation: Option<&RecurrenceRelation>,
    ) -> Result<PatternClassification, String> {
        if !info.is_recursive {
            return PatternClassification::new(
                AlgorithmPattern::NonRecursive,
                "not recursive",
                1.0,
                format!("{} does not recurse", name),
            );
        }

        let fallback;
        let solution = match solution {
            Some(s) => s,
            None => {
                fallback = heuristic(info);
                &fallback
            }
        };
        let facts = Facts {
            info,
            solution,
            relation,
        };

        match SIGNATURES.iter().find(|sig| (sig.matches)(&facts)) {
            Some(sig) => self.from_signature(name, sig, &facts),
            None => unknown(info, solution),
        }
    }

    fn from_signature(
        &self,
        name: &str,
        sig: &Signature,
        facts: &Facts<'_>,
    ) -> Result<PatternClassification, String> {
        let mut pattern = sig.pattern;
        let mut keyword = self.rules.keyword_match(pattern, name);

        if pattern.is_backtracking() {
            if let Some(hit) = self.rules.keyword_match(AlgorithmPattern::NQueens, name) {
                pattern = AlgorithmPattern::NQueens;
                keyword = Some(hit);
            }
        }

        let confidence = if keyword.is_some() {
            sig.confidence.1
        } else {
            sig.confidence.0
        };
        let complexity = sig
            .complexity
            .map(str::to_string)
            .unwrap_or_else(|| facts.solution.label.clone());

        tracing::debug!(
            "Pattern: {} → {} ({:.2}{})",
            name,
            pattern.as_str(),
            confidence,
            keyword.map(|k| format!(", keyword '{}'", k.rule)).unwrap_or_default()
        );

        let mut characteristics: Vec<String> = sig.characteristics.iter().map(|c| c.to_string()).collect();
        if let (true, Some(first)) = (pattern.is_backtracking(), characteristics.first_mut()) {
            *first = format!("{} recursive calls", facts.calls());
        }

        let classification = PatternClassification::new(pattern, complexity, confidence, sig.rationale)?
            .with_characteristics(characteristics);
        Ok(match keyword {
            Some(hit) => classification.with_keyword(hit.rule),
            None => classification,
        })
    }
}

fn unknown(info: &RecursionInfo, solution: &RecurrenceSolution) -> Result<PatternClassification, String> {
    Ok(PatternClassification::new(
        AlgorithmPattern::Unknown,
        solution.label.clone(),
        0.6,
        format!("no known signature, estimated complexity {}", solution.label),
    )?
    .with_characteristics(vec![
        format!("type: {}", info.recursion_type.as_str()),
        format!("pattern: {}", info.depth_pattern.as_str()),
        format!("{} recursive call(s)", info.call_count),
        format!("subproblem: {}", info.subproblem.describe()),
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::recurrence::domain::SolutionMethod;
    use crate::features::recursion_analysis::domain::RecursionType;

    fn info(calls: u32, depth: DepthPattern, subproblem: Subproblem) -> RecursionInfo {
        RecursionInfo {
            is_recursive: true,
            recursion_type: RecursionType::Direct,
            call_count: calls,
            calls_to: vec![],
            depth_pattern: depth,
            subproblem,
            has_combining_work: false,
            halves_range: false,
        }
    }

    fn solution(c: ComplexityExpr) -> RecurrenceSolution {
        RecurrenceSolution::new("T(n)", c, SolutionMethod::MasterCase2, "")
    }

    fn classify(name: &str, info: &RecursionInfo, c: ComplexityExpr, rel: Option<RecurrenceRelation>) -> PatternClassification {
        PatternClassifier::new(&AnalysisConfig::default())
            .classify(name, info, Some(&solution(c)), rel.as_ref())
            .unwrap()
    }

    #[test]
    fn test_binary_search_needs_range_halving() {
        let mut i = info(1, DepthPattern::DivideAndConquer, Subproblem::NOverK(2));
        let rel = RecurrenceRelation::divide(1, 2, ComplexityExpr::Constant).ok();

        let scalar = classify("X", &i, ComplexityExpr::Logarithmic, rel);
        assert_eq!(scalar.pattern, AlgorithmPattern::PowerRecursive);
        assert_eq!(scalar.confidence, 0.75);

        i.halves_range = true;
        let range = classify("X", &i, ComplexityExpr::Logarithmic, rel);
        assert_eq!(range.pattern, AlgorithmPattern::BinarySearch);
        assert_eq!(range.confidence, 1.0);
    }

    #[test]
    fn test_merge_versus_quick() {
        let mut i = info(2, DepthPattern::DivideAndConquer, Subproblem::NOverK(2));
        let rel = RecurrenceRelation::divide(2, 2, ComplexityExpr::Linear).ok();

        let quick = classify("Proc", &i, ComplexityExpr::linearithmic(), rel);
        assert_eq!(quick.pattern, AlgorithmPattern::QuickSort);
        assert!(quick.rationale.contains("O(n^2)"));

        i.has_combining_work = true;
        let merge = classify("Proc", &i, ComplexityExpr::linearithmic(), rel);
        assert_eq!(merge.pattern, AlgorithmPattern::MergeSort);
        assert_eq!(merge.confidence, 0.99);

        let named = classify("MergeSort", &i, ComplexityExpr::linearithmic(), rel);
        assert_eq!(named.confidence, 1.0);
        assert_eq!(named.matched_keyword.as_deref(), Some("merge"));
    }

    #[test]
    fn test_fibonacci_regardless_of_name() {
        let i = info(2, DepthPattern::Tree, Subproblem::MixedConstantSubtract);
        let c = classify("Whatever", &i, ComplexityExpr::exponential(2.0, 0.0), None);
        assert_eq!(c.pattern, AlgorithmPattern::Fibonacci);
        assert!(c.confidence >= 0.95);
    }

    #[test]
    fn test_factorial_and_hanoi() {
        let i = info(1, DepthPattern::Linear, Subproblem::NMinus(1));
        let plain = classify("Compute", &i, ComplexityExpr::Linear, None);
        assert_eq!(plain.pattern, AlgorithmPattern::Factorial);
        assert_eq!(plain.confidence, 0.85);
        assert_eq!(classify("Factorial", &i, ComplexityExpr::Linear, None).confidence, 1.0);

        let i = info(2, DepthPattern::Tree, Subproblem::NMinus(1));
        let hanoi = classify("Hanoi", &i, ComplexityExpr::exponential(2.0, 0.0), None);
        assert_eq!(hanoi.pattern, AlgorithmPattern::TowerOfHanoi);
        assert_eq!(hanoi.confidence, 1.0);
    }

    #[test]
    fn test_gcd() {
        let i = info(1, DepthPattern::Linear, Subproblem::Modulo);
        let c = classify("Mcd", &i, ComplexityExpr::Logarithmic, None);
        assert_eq!(c.pattern, AlgorithmPattern::GCDEuclidean);
        assert_eq!(c.confidence, 0.95);
    }

    #[test]
    fn test_backtracking_flavour() {
        let i = info(4, DepthPattern::Tree, Subproblem::NMinus(1));
        let exp = ComplexityExpr::exponential(4.0, 0.0);
        assert_eq!(classify("Solve", &i, exp, None).pattern, AlgorithmPattern::Permutations);

        let queens = classify("PlaceQueens", &i, exp, None);
        assert_eq!(queens.pattern, AlgorithmPattern::NQueens);
        assert_eq!(queens.confidence, 0.90);
        assert_eq!(queens.complexity, "O(4^n)");
    }

    #[test]
    fn test_unknown_and_non_recursive() {
        let i = info(1, DepthPattern::Linear, Subproblem::Slice);
        let c = classify("P", &i, ComplexityExpr::polynomial(2.0), None);
        assert_eq!(c.pattern, AlgorithmPattern::Unknown);
        assert_eq!(c.confidence, 0.6);
        assert_eq!(c.complexity, "O(n^2)");

        let flat = RecursionInfo::non_recursive(vec![]);
        let c = PatternClassifier::new(&AnalysisConfig::default())
            .classify("Main", &flat, None, None)
            .unwrap();
        assert_eq!(c.pattern, AlgorithmPattern::NonRecursive);
        assert_eq!(c.confidence, 1.0);
    }
}
