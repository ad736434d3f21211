//! Recursion Analyzer
//!
//! Main entry point for recursion analysis.
//!
//! Algorithm:
//! 1. Build the call graph and its SCCs
//! 2. Classify each procedure (none / direct / indirect / tail)
//! 3. Count active recursive calls (exclusivity-aware)
//! 4. Read subproblem evidence from call-site arguments
//! 5. Derive the depth pattern, look for combining work
//!
//! Never fails: shapes it does not recognise come out as `Unknown`.

use super::call_counter::count_recursive_calls;
use super::call_graph::CallGraph;
use super::subproblem::infer_subproblem;
use crate::config::AnalysisConfig;
use crate::features::recursion_analysis::domain::{
    DepthPattern, RecursionInfo, RecursionMap, RecursionType, Subproblem,
};
use crate::shared::models::{BinOp, Expr, ExprKind, Procedure, Program, Stmt, StmtKind};
use rustc_hash::FxHashSet;

pub struct RecursionAnalyzer {
    max_depth: usize,
    search_callees: bool,
}

impl RecursionAnalyzer {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            max_depth: config.max_structural_depth,
            search_callees: config.search_callees_for_combining_work,
        }
    }

    /// Analyze every declared procedure
    pub fn analyze(&self, program: &Program) -> RecursionMap {
        self.analyze_with_graph(program).0
    }

    /// Same as [`Self::analyze`], also handing back the call graph
    pub fn analyze_with_graph(&self, program: &Program) -> (RecursionMap, CallGraph) {
        let graph = CallGraph::build(program);
        let mut map = RecursionMap::new();

        for proc in &program.procedures {
            if map.contains_key(&proc.name) {
                continue;
            }
            let info = self.analyze_procedure(proc, program, &graph);
            tracing::debug!(
                "Recursion: {} → type={} calls={} pattern={} subproblem={} combine={}",
                proc.name,
                info.recursion_type.as_str(),
                info.call_count,
                info.depth_pattern.as_str(),
                info.subproblem.describe(),
                info.has_combining_work
            );
            map.insert(proc.name.clone(), info);
        }

        tracing::info!(
            "Recursion analysis complete: {} procedures, {} recursive",
            map.len(),
            map.values().filter(|i| i.is_recursive).count()
        );

        (map, graph)
    }

    fn analyze_procedure(&self, proc: &Procedure, program: &Program, graph: &CallGraph) -> RecursionInfo {
        let calls_to = graph.callees(&proc.name).to_vec();
        if !graph.is_recursive(&proc.name) {
            return RecursionInfo::non_recursive(calls_to);
        }

        let targets = graph.recursive_targets(&proc.name);
        let call_count = count_recursive_calls(&proc.body, &targets);

        let recursion_type = if graph.has_self_edge(&proc.name) {
            if is_tail_recursive(&proc.body, &targets) {
                RecursionType::Tail
            } else {
                RecursionType::Direct
            }
        } else {
            RecursionType::Indirect
        };

        let evidence = infer_subproblem(&proc.body, &targets);
        let depth_pattern = depth_pattern(call_count, evidence.subproblem);

        let has_combining_work = self.has_combining_work(proc, program, graph, &targets);

        RecursionInfo {
            is_recursive: true,
            recursion_type,
            call_count,
            calls_to,
            depth_pattern,
            subproblem: evidence.subproblem,
            has_combining_work,
            halves_range: evidence.halves_range,
        }
    }

    fn has_combining_work(
        &self,
        proc: &Procedure,
        program: &Program,
        graph: &CallGraph,
        targets: &FxHashSet<String>,
    ) -> bool {
        if has_merge_loop(&proc.body, 0, self.max_depth) {
            return true;
        }
        if !self.search_callees {
            return false;
        }
        // DFS reachability is already visited-set guarded
        graph
            .reachable_from(&proc.name)
            .iter()
            .filter(|callee| !targets.contains(*callee))
            .filter_map(|callee| program.procedure(callee))
            .any(|callee| has_merge_loop(&callee.body, 0, self.max_depth))
    }
}

pub(crate) fn depth_pattern(call_count: u32, subproblem: Subproblem) -> DepthPattern {
    match (call_count, subproblem) {
        (0, _) => DepthPattern::Unknown,
        (_, Subproblem::NOverK(_)) => DepthPattern::DivideAndConquer,
        (1, _) => DepthPattern::Linear,
        _ => DepthPattern::Tree,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tail position
// ═══════════════════════════════════════════════════════════════════════════

/// Every recursive call site is a tail call, and there is at least one
pub fn is_tail_recursive(body: &Stmt, targets: &FxHashSet<String>) -> bool {
    let total = body
        .call_sites()
        .iter()
        .filter(|site| targets.contains(site.name))
        .count();
    total > 0 && tail_calls(body, true, targets) == total
}

fn is_plain_recursive_call(name: &str, args: &[Expr], targets: &FxHashSet<String>) -> bool {
    targets.contains(name)
        && args
            .iter()
            .all(|a| a.call_sites().iter().all(|s| !targets.contains(s.name)))
}

/// Number of recursive calls sitting in tail position
fn tail_calls(stmt: &Stmt, terminal: bool, targets: &FxHashSet<String>) -> usize {
    match &stmt.kind {
        StmtKind::Block { body } => {
            let last = body.len().saturating_sub(1);
            body.iter()
                .enumerate()
                .map(|(i, s)| tail_calls(s, terminal && i == last, targets))
                .sum()
        }
        StmtKind::If {
            then, else_branch, ..
        } => {
            tail_calls(then, terminal, targets)
                + else_branch
                    .as_deref()
                    .map(|e| tail_calls(e, terminal, targets))
                    .unwrap_or(0)
        }
        StmtKind::Call { name, args } => {
            usize::from(terminal && is_plain_recursive_call(name, args, targets))
        }
        StmtKind::Return {
            value: Some(value),
        } => match &value.kind {
            ExprKind::Call { name, args } => usize::from(is_plain_recursive_call(name, args, targets)),
            _ => 0,
        },
        _ => 0,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Combining work (merge phase)
// ═══════════════════════════════════════════════════════════════════════════

/// A while/repeat loop with an `and` condition whose body copies array
/// elements into an array. Blocks do not count towards the depth.
pub fn has_merge_loop(stmt: &Stmt, depth: usize, max_depth: usize) -> bool {
    if depth > max_depth {
        return false;
    }
    let (cond, body) = match &stmt.kind {
        StmtKind::Block { body } => {
            return body.iter().any(|s| has_merge_loop(s, depth, max_depth));
        }
        StmtKind::While { cond, body } => (Some(cond), Some(body)),
        StmtKind::Repeat { body, until } => (Some(until), Some(body)),
        _ => (None, None),
    };

    if let (Some(cond), Some(body)) = (cond, body) {
        let is_conjunction = matches!(cond.kind, ExprKind::BinOp { op: BinOp::And, .. });
        if is_conjunction && contains_array_copy(body, depth + 1, max_depth) {
            return true;
        }
    }

    stmt.children()
        .iter()
        .any(|c| has_merge_loop(c, depth + 1, max_depth))
}

fn contains_array_copy(stmt: &Stmt, depth: usize, max_depth: usize) -> bool {
    if depth > max_depth {
        return false;
    }
    match &stmt.kind {
        StmtKind::Assign { target, value }
            if matches!(target.kind, ExprKind::ArrayAccess { .. })
                && matches!(value.kind, ExprKind::ArrayAccess { .. }) =>
        {
            true
        }
        StmtKind::Block { body } => body.iter().any(|s| contains_array_copy(s, depth, max_depth)),
        _ => stmt
            .children()
            .iter()
            .any(|c| contains_array_copy(c, depth + 1, max_depth)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::UnOp;

    fn var(n: &str) -> Expr {
        Expr::var(n)
    }

    fn n_minus(c: i64) -> Expr {
        Expr::bin(BinOp::Sub, var("n"), Expr::num(c))
    }

    fn targets(name: &str) -> FxHashSet<String> {
        std::iter::once(name.to_string()).collect()
    }

    fn analyze(procs: Vec<Procedure>) -> RecursionMap {
        RecursionAnalyzer::new(&AnalysisConfig::default()).analyze(&Program::new(procs, vec![]))
    }

    #[test]
    fn test_factorial() {
        let fact = Procedure::new(
            "Factorial",
            vec!["n"],
            vec![Stmt::if_else(
                Expr::bin(BinOp::Le, var("n"), Expr::num(1)),
                vec![Stmt::ret(Expr::num(1))],
                vec![Stmt::ret(Expr::bin(
                    BinOp::Mul,
                    var("n"),
                    Expr::call("Factorial", vec![n_minus(1)]),
                ))],
            )],
        );
        let map = analyze(vec![fact]);
        let info = &map["Factorial"];
        assert!(info.is_recursive);
        assert_eq!(info.recursion_type, RecursionType::Direct);
        assert_eq!(info.call_count, 1);
        assert_eq!(info.depth_pattern, DepthPattern::Linear);
        assert_eq!(info.subproblem, Subproblem::NMinus(1));
    }

    #[test]
    fn test_tail_recursion() {
        // Sum(n, acc): if n = 0 then return acc else return Sum(n-1, acc+n)
        let body = Stmt::if_else(
            Expr::bin(BinOp::Eq, var("n"), Expr::num(0)),
            vec![Stmt::ret(var("acc"))],
            vec![Stmt::ret(Expr::call(
                "Sum",
                vec![n_minus(1), Expr::bin(BinOp::Add, var("acc"), var("n"))],
            ))],
        );
        assert!(is_tail_recursive(&body, &targets("Sum")));

        let map = analyze(vec![Procedure::new("Sum", vec!["n", "acc"], vec![body])]);
        assert_eq!(map["Sum"].recursion_type, RecursionType::Tail);
    }

    #[test]
    fn test_call_not_last_is_not_tail() {
        let body = Stmt::block(vec![
            Stmt::call("P", vec![n_minus(1)]),
            Stmt::call("Print", vec![var("n")]),
        ]);
        assert!(!is_tail_recursive(&body, &targets("P")));

        // Nested recursive argument is not a tail call either
        let nested = Stmt::ret(Expr::call("A", vec![Expr::call("A", vec![n_minus(1)])]));
        assert!(!is_tail_recursive(&nested, &targets("A")));
    }

    #[test]
    fn test_indirect_recursion() {
        let even = Procedure::new(
            "IsEven",
            vec!["n"],
            vec![Stmt::ret(Expr::call("IsOdd", vec![n_minus(1)]))],
        );
        let odd = Procedure::new(
            "IsOdd",
            vec!["n"],
            vec![Stmt::ret(Expr::call("IsEven", vec![n_minus(1)]))],
        );
        let map = analyze(vec![even, odd]);
        assert_eq!(map["IsEven"].recursion_type, RecursionType::Indirect);
        assert_eq!(map["IsOdd"].call_count, 1);
    }

    #[test]
    fn test_merge_loop_in_callee() {
        let merge_loop = Stmt::while_loop(
            Expr::bin(
                BinOp::And,
                Expr::bin(BinOp::Le, var("i"), var("mid")),
                Expr::bin(BinOp::Le, var("j"), var("hi")),
            ),
            vec![Stmt::assign(
                Expr::index(var("T"), var("k")),
                Expr::index(var("A"), var("i")),
            )],
        );
        let merge = Procedure::new("Merge", vec!["A", "lo", "mid", "hi"], vec![merge_loop]);
        let mid = Expr::un(
            UnOp::Floor,
            Expr::bin(BinOp::Div, Expr::bin(BinOp::Add, var("lo"), var("hi")), Expr::num(2)),
        );
        let sort = Procedure::new(
            "Sort",
            vec!["A", "lo", "hi"],
            vec![Stmt::if_then(
                Expr::bin(BinOp::Lt, var("lo"), var("hi")),
                vec![
                    Stmt::assign(var("mid"), mid),
                    Stmt::call("Sort", vec![var("A"), var("lo"), var("mid")]),
                    Stmt::call(
                        "Sort",
                        vec![var("A"), Expr::bin(BinOp::Add, var("mid"), Expr::num(1)), var("hi")],
                    ),
                    Stmt::call("Merge", vec![var("A"), var("lo"), var("mid"), var("hi")]),
                ],
            )],
        );

        let map = analyze(vec![sort.clone(), merge.clone()]);
        let info = &map["Sort"];
        assert!(info.has_combining_work);
        assert_eq!(info.call_count, 2);
        assert_eq!(info.depth_pattern, DepthPattern::DivideAndConquer);
        assert!(!map["Merge"].is_recursive);

        let no_search = AnalysisConfig::default().search_callees_for_combining_work(false);
        let map = RecursionAnalyzer::new(&no_search).analyze(&Program::new(vec![sort, merge], vec![]));
        assert!(!map["Sort"].has_combining_work);
    }

    #[test]
    fn test_depth_pattern_table() {
        assert_eq!(depth_pattern(0, Subproblem::NMinus(1)), DepthPattern::Unknown);
        assert_eq!(depth_pattern(3, Subproblem::NOverK(2)), DepthPattern::DivideAndConquer);
        assert_eq!(depth_pattern(1, Subproblem::Modulo), DepthPattern::Linear);
        assert_eq!(depth_pattern(2, Subproblem::MixedConstantSubtract), DepthPattern::Tree);
    }
}
