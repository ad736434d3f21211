//! Analysis report and its text rendering

use crate::features::cost_analysis::domain::{Complexity, ProcedureAnalysis};
use crate::features::pattern_classification::domain::{AlgorithmPattern, PatternClassification};
use crate::features::recursion_analysis::domain::RecursionMap;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

const BOX_WIDTH: usize = 68;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub complexity: Complexity,
    pub recursion: RecursionMap,
    pub has_recursion: bool,
    pub procedure_count: usize,
    /// Malformed shapes found before analysis
    #[serde(default)]
    pub validation_diagnostics: Vec<String>,
}

impl AnalysisReport {
    /// Human-readable report: totals, per-procedure summary, pattern boxes
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let c = &self.complexity;

        let _ = writeln!(out, "Complexity");
        let _ = writeln!(out, "  Worst case   : {}", c.big_o.big_o());
        let _ = writeln!(out, "  Best case    : {}", c.omega.omega());
        let _ = writeln!(out, "  Average case : {}", c.theta.theta());
        let _ = writeln!(out, "  {}", c.explanation);

        if !c.procedures.is_empty() {
            let recursive = c.procedures.values().filter(|p| p.recursion_info.is_recursive).count();
            let _ = writeln!(out);
            let _ = writeln!(out, "Procedures ({}, {} recursive)", self.procedure_count, recursive);
            for p in c.procedures.values() {
                let _ = writeln!(out, "  {}", summary_line(p));
            }
        }

        for p in c.procedures.values() {
            let pattern = p
                .pattern
                .as_ref()
                .filter(|pat| pat.pattern != AlgorithmPattern::NonRecursive);
            if let Some(pattern) = pattern {
                let _ = writeln!(out);
                render_pattern_box(&mut out, &p.name, pattern);
            }
        }

        if !self.validation_diagnostics.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "Diagnostics");
            for d in &self.validation_diagnostics {
                let _ = writeln!(out, "  - {}", d);
            }
        }

        out
    }

    /// Derivation steps, one per line
    pub fn render_steps(&self) -> String {
        self.complexity
            .steps
            .iter()
            .fold(String::new(), |mut out, step| {
                let _ = writeln!(out, "  {}", step);
                out
            })
    }
}

fn summary_line(p: &ProcedureAnalysis) -> String {
    if p.failed {
        return format!(
            "{}: FAILED ({})",
            p.name,
            p.diagnostic.as_deref().unwrap_or("no diagnostic")
        );
    }
    if !p.recursion_info.is_recursive {
        return format!("{}: non-recursive, {}", p.name, p.complexity.describe());
    }
    let info = &p.recursion_info;
    match &p.solution {
        Some(s) => format!(
            "{}: {} recursion, {} call(s), {} ⇒ {} [{}]",
            p.name,
            info.recursion_type.as_str(),
            info.call_count,
            s.relation,
            s.label,
            s.method
        ),
        None => format!(
            "{}: {} recursion, {} call(s), {}",
            p.name,
            info.recursion_type.as_str(),
            info.call_count,
            p.complexity.describe()
        ),
    }
}

fn box_line(out: &mut String, text: &str) {
    let _ = writeln!(out, "║ {:<width$} ║", text, width = BOX_WIDTH - 2);
}

fn box_rule(out: &mut String, left: char, right: char) {
    let _ = writeln!(out, "{}{}{}", left, "═".repeat(BOX_WIDTH), right);
}

/// Greedy word wrap
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && line.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

fn render_pattern_box(out: &mut String, name: &str, c: &PatternClassification) {
    box_rule(out, '╔', '╗');
    box_line(out, &format!("Pattern detected: {}", name));
    box_rule(out, '╠', '╣');
    box_line(out, &format!("Algorithm:  {}", c.pattern.display_name()));
    box_line(out, &format!("Complexity: {}", c.complexity));
    box_line(out, &format!("Confidence: {:.1}%", c.confidence * 100.0));
    box_rule(out, '╠', '╣');
    for line in wrap(&c.rationale, BOX_WIDTH - 2) {
        box_line(out, &line);
    }
    if !c.characteristics.is_empty() {
        box_rule(out, '╠', '╣');
        for ch in &c.characteristics {
            box_line(out, &format!("  • {}", ch));
        }
    }
    box_rule(out, '╚', '╝');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap() {
        assert_eq!(wrap("a bb ccc", 4), vec!["a bb", "ccc"]);
        assert!(wrap("", 10).is_empty());
    }
}
