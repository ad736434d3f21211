//! Ranked name rules
//!
//! Identifier spelling is only ever a hint: flag/sentinel names feed the
//! early-exit signature and procedure-name keywords raise classification
//! confidence. The tables are plain data so callers can override them from
//! YAML; they are compiled to regexes once per analyzer.

use super::error::{ConfigError, ConfigResult};
use super::validation::Validatable;
use crate::features::pattern_classification::domain::AlgorithmPattern;
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One name rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameRule {
    /// Regex, matched anywhere in the identifier
    pub pattern: String,

    /// Higher ranks are tried first
    #[serde(default)]
    pub rank: u8,

    #[serde(default)]
    pub case_sensitive: bool,
}

impl NameRule {
    pub fn new(pattern: impl Into<String>, rank: u8) -> Self {
        Self {
            pattern: pattern.into(),
            rank,
            case_sensitive: false,
        }
    }

    pub fn case_sensitive(mut self) -> Self {
        self.case_sensitive = true;
        self
    }

    fn compile(&self) -> ConfigResult<CompiledRule> {
        let regex = RegexBuilder::new(&self.pattern)
            .case_insensitive(!self.case_sensitive)
            .build()
            .map_err(|e| ConfigError::InvalidRule {
                rule: self.pattern.clone(),
                reason: e.to_string(),
            })?;
        Ok(CompiledRule {
            pattern: self.pattern.clone(),
            rank: self.rank,
            regex,
        })
    }
}

/// Overridable name heuristics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicRules {
    /// Variables whose assignment marks a search as finished
    pub flag_names: Vec<NameRule>,

    /// Variables standing in for boolean literals
    pub sentinel_names: Vec<NameRule>,

    /// Procedure-name keywords per pattern (confidence only)
    pub pattern_keywords: BTreeMap<AlgorithmPattern, Vec<NameRule>>,
}

static DEFAULT_RULES: Lazy<HeuristicRules> = Lazy::new(|| {
    let flag_names = vec![
        NameRule::new("encontrado", 10),
        NameRule::new("found", 10),
        NameRule::new("done", 8),
        NameRule::new("terminar", 8),
        NameRule::new("flag", 5),
    ];

    let sentinel_names = vec![
        NameRule::new("^(T|F)$", 10).case_sensitive(),
        NameRule::new("^(true|false|verdadero|falso)$", 5),
    ];

    let keywords = |words: &[(&str, u8)]| -> Vec<NameRule> {
        words.iter().map(|(w, rank)| NameRule::new(*w, *rank)).collect()
    };

    let mut pattern_keywords = BTreeMap::new();
    pattern_keywords.insert(
        AlgorithmPattern::BinarySearch,
        keywords(&[("binar", 10), ("busqueda", 5), ("search", 5)]),
    );
    pattern_keywords.insert(
        AlgorithmPattern::MergeSort,
        keywords(&[("merge", 10), ("mezcla", 10), ("ordenar", 3), ("sort", 3)]),
    );
    pattern_keywords.insert(
        AlgorithmPattern::QuickSort,
        keywords(&[("quick", 10), ("rapido", 5), ("partition", 3)]),
    );
    pattern_keywords.insert(AlgorithmPattern::Fibonacci, keywords(&[("fib", 10)]));
    pattern_keywords.insert(AlgorithmPattern::Factorial, keywords(&[("fact", 10)]));
    pattern_keywords.insert(
        AlgorithmPattern::TowerOfHanoi,
        keywords(&[("hanoi", 10), ("torre", 5), ("tower", 5)]),
    );
    pattern_keywords.insert(
        AlgorithmPattern::GCDEuclidean,
        keywords(&[("gcd", 10), ("mcd", 10), ("euclid", 8)]),
    );
    pattern_keywords.insert(
        AlgorithmPattern::PowerRecursive,
        keywords(&[("pow", 10), ("potencia", 10), ("exp", 3)]),
    );
    pattern_keywords.insert(
        AlgorithmPattern::Karatsuba,
        keywords(&[("karatsuba", 10), ("fast_?mult", 5)]),
    );
    pattern_keywords.insert(
        AlgorithmPattern::NQueens,
        keywords(&[("queen", 10), ("reina", 10)]),
    );
    pattern_keywords.insert(
        AlgorithmPattern::Permutations,
        keywords(&[("permut", 10), ("backtrack", 5)]),
    );

    HeuristicRules {
        flag_names,
        sentinel_names,
        pattern_keywords,
    }
});

impl Default for HeuristicRules {
    fn default() -> Self {
        DEFAULT_RULES.clone()
    }
}

impl HeuristicRules {
    /// Rule tables with nothing in them (name hints disabled)
    pub fn empty() -> Self {
        Self {
            flag_names: Vec::new(),
            sentinel_names: Vec::new(),
            pattern_keywords: BTreeMap::new(),
        }
    }
}

impl Validatable for HeuristicRules {
    fn validate(&self) -> ConfigResult<()> {
        CompiledRules::compile(self).map(|_| ())
    }
}

#[derive(Debug, Clone)]
struct CompiledRule {
    pattern: String,
    rank: u8,
    regex: Regex,
}

/// Which rule fired
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleMatch<'a> {
    pub rule: &'a str,
    pub rank: u8,
}

/// Compiled form of [`HeuristicRules`], each table sorted by rank
#[derive(Debug, Clone)]
pub struct CompiledRules {
    flag_names: Vec<CompiledRule>,
    sentinel_names: Vec<CompiledRule>,
    pattern_keywords: BTreeMap<AlgorithmPattern, Vec<CompiledRule>>,
}

fn compile_table(rules: &[NameRule]) -> ConfigResult<Vec<CompiledRule>> {
    let mut compiled = rules
        .iter()
        .map(NameRule::compile)
        .collect::<ConfigResult<Vec<_>>>()?;
    compiled.sort_by(|a, b| b.rank.cmp(&a.rank));
    Ok(compiled)
}

fn compile_table_lossy(rules: &[NameRule]) -> Vec<CompiledRule> {
    let mut compiled: Vec<_> = rules
        .iter()
        .filter_map(|rule| match rule.compile() {
            Ok(c) => Some(c),
            Err(e) => {
                tracing::warn!("Skipping name rule: {}", e);
                None
            }
        })
        .collect();
    compiled.sort_by(|a, b| b.rank.cmp(&a.rank));
    compiled
}

fn first_match<'a>(table: &'a [CompiledRule], name: &str) -> Option<RuleMatch<'a>> {
    table
        .iter()
        .find(|r| r.regex.is_match(name))
        .map(|r| RuleMatch {
            rule: &r.pattern,
            rank: r.rank,
        })
}

impl CompiledRules {
    /// Compile every table, failing on the first bad pattern
    pub fn compile(rules: &HeuristicRules) -> ConfigResult<Self> {
        let mut pattern_keywords = BTreeMap::new();
        for (pattern, table) in &rules.pattern_keywords {
            pattern_keywords.insert(*pattern, compile_table(table)?);
        }
        Ok(Self {
            flag_names: compile_table(&rules.flag_names)?,
            sentinel_names: compile_table(&rules.sentinel_names)?,
            pattern_keywords,
        })
    }

    /// Compile every table, dropping (and logging) patterns that fail
    pub fn compile_lossy(rules: &HeuristicRules) -> Self {
        Self {
            flag_names: compile_table_lossy(&rules.flag_names),
            sentinel_names: compile_table_lossy(&rules.sentinel_names),
            pattern_keywords: rules
                .pattern_keywords
                .iter()
                .map(|(pattern, table)| (*pattern, compile_table_lossy(table)))
                .collect(),
        }
    }

    pub fn flag_match(&self, name: &str) -> Option<RuleMatch<'_>> {
        first_match(&self.flag_names, name)
    }

    pub fn sentinel_match(&self, name: &str) -> Option<RuleMatch<'_>> {
        first_match(&self.sentinel_names, name)
    }

    pub fn keyword_match(&self, pattern: AlgorithmPattern, name: &str) -> Option<RuleMatch<'_>> {
        self.pattern_keywords
            .get(&pattern)
            .and_then(|table| first_match(table, name))
    }
}

impl Default for CompiledRules {
    fn default() -> Self {
        Self::compile_lossy(&HeuristicRules::default())
    }
}
