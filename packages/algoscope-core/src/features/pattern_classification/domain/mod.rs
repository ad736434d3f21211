//! Domain models for pattern classification

use serde::{Deserialize, Serialize};

/// Classical algorithm signatures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlgorithmPattern {
    BinarySearch,
    MergeSort,
    QuickSort,
    Fibonacci,
    Factorial,
    TowerOfHanoi,
    #[serde(rename = "gcd_euclidean")]
    GCDEuclidean,
    PowerRecursive,
    Karatsuba,
    /// Backtracking, N-Queens flavour
    NQueens,
    /// Backtracking, permutation flavour
    Permutations,
    NonRecursive,
    Unknown,
}

impl AlgorithmPattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BinarySearch => "binary_search",
            Self::MergeSort => "merge_sort",
            Self::QuickSort => "quick_sort",
            Self::Fibonacci => "fibonacci",
            Self::Factorial => "factorial",
            Self::TowerOfHanoi => "tower_of_hanoi",
            Self::GCDEuclidean => "gcd_euclidean",
            Self::PowerRecursive => "power_recursive",
            Self::Karatsuba => "karatsuba",
            Self::NQueens => "n_queens",
            Self::Permutations => "permutations",
            Self::NonRecursive => "non_recursive",
            Self::Unknown => "unknown",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::BinarySearch => "Binary Search",
            Self::MergeSort => "Merge Sort",
            Self::QuickSort => "Quick Sort",
            Self::Fibonacci => "Fibonacci (recursive)",
            Self::Factorial => "Factorial",
            Self::TowerOfHanoi => "Tower of Hanoi",
            Self::GCDEuclidean => "GCD (Euclid)",
            Self::PowerRecursive => "Fast exponentiation",
            Self::Karatsuba => "Karatsuba multiplication",
            Self::NQueens => "N-Queens (backtracking)",
            Self::Permutations => "Permutations (backtracking)",
            Self::NonRecursive => "Non-recursive",
            Self::Unknown => "Unknown",
        }
    }

    pub fn is_backtracking(&self) -> bool {
        matches!(self, Self::NQueens | Self::Permutations)
    }
}

impl std::fmt::Display for AlgorithmPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Result of matching one procedure against the signature table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternClassification {
    pub pattern: AlgorithmPattern,

    /// Complexity label, e.g. "O(n log n)"
    pub complexity: String,

    /// Confidence: 0.0-1.0
    pub confidence: f64,

    pub rationale: String,

    #[serde(default)]
    pub characteristics: Vec<String>,

    /// Name rule that raised the confidence, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_keyword: Option<String>,
}

impl PatternClassification {
    /// Create new classification with validation
    pub fn new(
        pattern: AlgorithmPattern,
        complexity: impl Into<String>,
        confidence: f64,
        rationale: impl Into<String>,
    ) -> Result<Self, String> {
        if !(0.0..=1.0).contains(&confidence) {
            return Err(format!("confidence must be 0.0-1.0, got {}", confidence));
        }

        Ok(Self {
            pattern,
            complexity: complexity.into(),
            confidence,
            rationale: rationale.into(),
            characteristics: Vec::new(),
            matched_keyword: None,
        })
    }

    pub fn with_characteristics(mut self, characteristics: Vec<String>) -> Self {
        self.characteristics = characteristics;
        self
    }

    pub fn with_keyword(mut self, rule: impl Into<String>) -> Self {
        self.matched_keyword = Some(rule.into());
        self
    }
}
