//! Complexity Analyzer
//!
//! Orchestrates the whole inference for one program.
//!
//! Algorithm:
//! 1. Solve the recurrence of every recursive procedure
//! 2. Walk every non-recursive procedure body, memoised
//! 3. Walk the main body
//! 4. Report worst / best / average of the main body (or of all procedures
//!    when the main body is empty)
//!
//! Combination rules:
//! - sequence: dominant term per case
//! - `for`: iteration counts from [`CaseAnalyzer`] times the body
//! - `while` / `repeat`: iterations from the control-variable update times
//!   the body; a `while` may not run at all so its best case is constant
//! - `if`: worse branch, cheaper branch, mean of the averages
//! - call: recurrence solution, memoised body cost, or constant if unknown
//!
//! The analyzer itself is immutable. Per-run state (memo, call stack,
//! solutions) lives in a session, so one analyzer can serve many threads.

use crate::config::AnalysisConfig;
use crate::errors::{AlgoscopeError, Result};
use crate::features::case_analysis::infrastructure::CaseAnalyzer;
use crate::features::cost_analysis::domain::{Complexity, CostTriple, ProcedureAnalysis};
use crate::features::recurrence::domain::{RecurrenceRelation, RecurrenceSolution};
use crate::features::recurrence::infrastructure::RecurrenceSolver;
use crate::features::recursion_analysis::domain::{DepthPattern, RecursionInfo, RecursionMap};
use crate::shared::models::{AnalysisTrace, ComplexityExpr, Expr, Procedure, Program, Stmt, StmtKind};
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;

pub struct ComplexityAnalyzer {
    cases: CaseAnalyzer,
    solver: RecurrenceSolver,
}

impl ComplexityAnalyzer {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            cases: CaseAnalyzer::new(config),
            solver: RecurrenceSolver::new(config),
        }
    }

    /// Analyze a program with a fresh trace
    pub fn analyze(&self, program: &Program, recursion: &RecursionMap) -> Result<Complexity> {
        let mut trace = AnalysisTrace::new();
        self.analyze_with_trace(program, recursion, &mut trace)
    }

    /// Analyze a program, appending derivation steps to `trace`
    ///
    /// Only an internal call cycle fails the whole run. Any other error is
    /// confined to the procedure it occurred in.
    pub fn analyze_with_trace(
        &self,
        program: &Program,
        recursion: &RecursionMap,
        trace: &mut AnalysisTrace,
    ) -> Result<Complexity> {
        let first_step = trace.len();
        let mut session = Session::new(self, program, recursion, trace);

        session.solve_recursive();
        let procedures = session.analyze_procedures()?;

        let (total, scope) = if program.body.is_empty() && !procedures.is_empty() {
            let total = CostTriple::sequence(
                procedures
                    .values()
                    .filter(|p| !p.failed)
                    .map(|p| p.complexity),
            );
            session.trace.push(format!("Empty main body, reporting procedures: {}", total.describe()));
            (total, "procedures")
        } else {
            session.trace.push("Main body:");
            let total = session.cost_of_body(&program.body, 1)?;
            session.trace.push(format!("⇒ main: {}", total.describe()));
            (total, "main body")
        };

        let total = total.normalized();
        let failed = procedures.values().filter(|p| p.failed).count();
        let mut explanation = format!(
            "Worst case {}, best case {}, average case {} (from the {})",
            total.worst.big_o(),
            total.best.omega(),
            total.average.theta(),
            scope
        );
        if failed > 0 {
            explanation.push_str(&format!("; {} procedure(s) could not be analysed", failed));
        }

        tracing::info!(
            "Complexity analysis complete: {} procedures, {} ({} failed)",
            procedures.len(),
            total.describe(),
            failed
        );

        Ok(Complexity {
            big_o: total.worst,
            omega: total.best,
            theta: total.average,
            explanation,
            steps: trace.steps()[first_step..].to_vec(),
            procedures,
        })
    }

    /// Cost of a single declared procedure
    pub fn procedure_cost(&self, program: &Program, recursion: &RecursionMap, name: &str) -> Result<CostTriple> {
        if !program.is_declared(name) {
            return Err(AlgoscopeError::UnknownProcedure(name.to_string()));
        }
        let mut trace = AnalysisTrace::new();
        let mut session = Session::new(self, program, recursion, &mut trace);
        session.solve_recursive();
        session.cost_of_call(name, 0)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Per-run state
// ═══════════════════════════════════════════════════════════════════════════

struct Session<'a> {
    analyzer: &'a ComplexityAnalyzer,
    program: &'a Program,
    recursion: &'a RecursionMap,
    solutions: FxHashMap<String, (Option<RecurrenceRelation>, RecurrenceSolution)>,
    memo: FxHashMap<String, CostTriple>,
    failed: FxHashMap<String, String>,
    stack: Vec<String>,
    trace: &'a mut AnalysisTrace,
}

impl<'a> Session<'a> {
    fn new(
        analyzer: &'a ComplexityAnalyzer,
        program: &'a Program,
        recursion: &'a RecursionMap,
        trace: &'a mut AnalysisTrace,
    ) -> Self {
        Self {
            analyzer,
            program,
            recursion,
            solutions: FxHashMap::default(),
            memo: FxHashMap::default(),
            failed: FxHashMap::default(),
            stack: Vec::new(),
            trace,
        }
    }

    fn info(&self, name: &str) -> Option<&'a RecursionInfo> {
        self.recursion.get(name)
    }

    fn is_recursive(&self, name: &str) -> bool {
        self.info(name).is_some_and(|i| i.is_recursive)
    }

    fn solve_recursive(&mut self) {
        let program = self.program;
        for proc in &program.procedures {
            let Some(info) = self.info(&proc.name).filter(|i| i.is_recursive) else {
                continue;
            };
            if self.solutions.contains_key(&proc.name) {
                continue;
            }
            let solved = self
                .analyzer
                .solver
                .solve_procedure(proc, info, program, self.recursion);
            self.solutions.insert(proc.name.clone(), solved);
        }
    }

    fn analyze_procedures(&mut self) -> Result<BTreeMap<String, ProcedureAnalysis>> {
        let mut out = BTreeMap::new();
        let program = self.program;

        for proc in &program.procedures {
            if out.contains_key(&proc.name) {
                continue;
            }
            let info = self
                .info(&proc.name)
                .cloned()
                .unwrap_or_else(|| RecursionInfo::non_recursive(Vec::new()));

            let analysis = match self.analyze_procedure(proc, &info) {
                Ok(analysis) => analysis,
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    tracing::warn!("Procedure {} could not be analysed: {}", proc.name, e);
                    self.trace.push(format!("Procedure {}: analysis failed ({})", proc.name, e));
                    self.failed.insert(proc.name.clone(), e.to_string());
                    ProcedureAnalysis::failed(&proc.name, info, e.to_string())
                }
            };
            out.insert(proc.name.clone(), analysis);
        }
        Ok(out)
    }

    fn analyze_procedure(&mut self, proc: &Procedure, info: &RecursionInfo) -> Result<ProcedureAnalysis> {
        proc.validate()?;

        if !info.is_recursive {
            self.trace.push(format!("Procedure {}: non-recursive", proc.name));
            let cost = self.cost_of_procedure(proc, 1)?;
            self.trace.push(format!("⇒ {}: {}", proc.name, cost.describe()));
            return Ok(ProcedureAnalysis::new(&proc.name, info.clone(), cost));
        }

        let (relation, solution) = match self.solutions.get(&proc.name) {
            Some((r, s)) => (*r, Some(s.clone())),
            None => (None, None),
        };
        let cost = self.recursive_cost(&proc.name);
        match &solution {
            Some(s) => self.trace.push(format!(
                "Procedure {}: {} recursion, {} ⇒ {} [{}]",
                proc.name,
                info.recursion_type.as_str(),
                s.relation,
                s.label,
                s.method
            )),
            None => self.trace.push(format!(
                "Procedure {}: {} recursion, no solution ⇒ {}",
                proc.name,
                info.recursion_type.as_str(),
                cost.describe()
            )),
        }

        let mut analysis = ProcedureAnalysis::new(&proc.name, info.clone(), cost);
        analysis.relation = relation;
        analysis.solution = solution;
        Ok(analysis)
    }

    /// Recursive calls collapse the case split to the solution's class
    fn recursive_cost(&self, name: &str) -> CostTriple {
        match self.solutions.get(name) {
            Some((_, solution)) if !solution.is_heuristic() => CostTriple::uniform(solution.complexity),
            _ => {
                let depth = self.info(name).map(|i| i.depth_pattern).unwrap_or(DepthPattern::Unknown);
                CostTriple::uniform(match depth {
                    DepthPattern::Linear => ComplexityExpr::Linear,
                    DepthPattern::Tree => ComplexityExpr::linearithmic(),
                    DepthPattern::DivideAndConquer | DepthPattern::Unknown => ComplexityExpr::Linear,
                })
            }
        }
    }

    /// Memoised body cost of a non-recursive procedure
    fn cost_of_procedure(&mut self, proc: &Procedure, depth: usize) -> Result<CostTriple> {
        if let Some(cost) = self.memo.get(&proc.name) {
            return Ok(*cost);
        }
        if self.stack.contains(&proc.name) {
            let mut path = self.stack.clone();
            path.push(proc.name.clone());
            return Err(AlgoscopeError::CallCycle {
                procedure: proc.name.clone(),
                path,
            });
        }

        self.stack.push(proc.name.clone());
        let result = self.cost_of(&proc.body, depth);
        self.stack.pop();

        let cost = result?;
        self.memo.insert(proc.name.clone(), cost);
        Ok(cost)
    }

    fn cost_of_call(&mut self, name: &str, depth: usize) -> Result<CostTriple> {
        if self.is_recursive(name) {
            let cost = self.recursive_cost(name);
            self.trace.push_at(depth, format!("call {} (recursive): {}", name, cost.describe()));
            return Ok(cost);
        }
        if let Some(reason) = self.failed.get(name) {
            self.trace
                .push_at(depth, format!("call {}: analysis failed ({}), counted as O(1)", name, reason));
            return Ok(CostTriple::constant());
        }
        let program = self.program;
        let Some(callee) = program.procedure(name) else {
            self.trace.push_at(depth, format!("call {}: unknown procedure, O(1)", name));
            return Ok(CostTriple::constant());
        };
        if let Some(cost) = self.memo.get(name) {
            let cost = *cost;
            self.trace.push_at(depth, format!("call {}: {} (memoised)", name, cost.describe()));
            return Ok(cost);
        }

        let result = callee.validate().and_then(|_| self.cost_of_procedure(callee, depth + 1));
        match result {
            Ok(cost) => {
                self.trace.push_at(depth, format!("call {}: {}", name, cost.describe()));
                Ok(cost)
            }
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => {
                tracing::warn!("Call to {} could not be costed: {}", name, e);
                self.failed.insert(name.to_string(), e.to_string());
                self.trace
                    .push_at(depth, format!("call {}: analysis failed ({}), counted as O(1)", name, e));
                Ok(CostTriple::constant())
            }
        }
    }

    fn cost_of_exprs(&mut self, exprs: &[&Expr], depth: usize) -> Result<CostTriple> {
        let mut cost = CostTriple::constant();
        for expr in exprs {
            for site in expr.call_sites() {
                cost = cost.then(&self.cost_of_call(site.name, depth)?);
            }
        }
        Ok(cost)
    }

    /// Main body statements; a malformed one is skipped with a diagnostic
    fn cost_of_body(&mut self, body: &[Stmt], depth: usize) -> Result<CostTriple> {
        let mut total = CostTriple::constant();
        for stmt in body {
            if let Err(e) = stmt.validate() {
                tracing::warn!("Skipping malformed statement: {}", e);
                self.trace.push_at(depth, format!("skipped: {}", e));
                continue;
            }
            total = total.then(&self.cost_of(stmt, depth)?);
        }
        Ok(total)
    }

    fn cost_of(&mut self, stmt: &Stmt, depth: usize) -> Result<CostTriple> {
        #[cfg(feature = "trace")]
        tracing::trace!("cost_of {} at {}", stmt.kind_name(), stmt.span);

        let in_exprs = self.cost_of_exprs(&stmt.exprs(), depth)?;

        let own = match &stmt.kind {
            StmtKind::Block { body } => {
                let mut total = CostTriple::constant();
                for s in body {
                    total = total.then(&self.cost_of(s, depth)?);
                }
                total
            }
            StmtKind::For {
                var,
                start,
                end,
                body,
            } => {
                let case = self.analyzer.cases.analyze_for(var, start, end, body);
                let inner = self.cost_of(body, depth + 1)?;
                let cost = inner.repeated(&case);
                self.trace.push_at(
                    depth,
                    format!("{} × body {} ⇒ {}", case.explanation, inner.worst.big_o(), cost.describe()),
                );
                cost
            }
            StmtKind::While { cond, body } => {
                let case = self.analyzer.cases.analyze_while(cond, body);
                let inner = self.cost_of(body, depth + 1)?;
                // The condition may be false on entry
                let cost = inner.repeated(&case).with_best(ComplexityExpr::Constant);
                self.trace.push_at(
                    depth,
                    format!("{} × body {} ⇒ {}", case.explanation, inner.worst.big_o(), cost.describe()),
                );
                cost
            }
            StmtKind::Repeat { body, until } => {
                let case = self.analyzer.cases.analyze_repeat(body, until);
                let inner = self.cost_of(body, depth + 1)?;
                let cost = inner.repeated(&case);
                self.trace.push_at(
                    depth,
                    format!("{} × body {} ⇒ {}", case.explanation, inner.worst.big_o(), cost.describe()),
                );
                cost
            }
            StmtKind::If {
                cond,
                then,
                else_branch,
            } => {
                let then_cost = self.cost_of(then, depth + 1)?;
                let else_cost = match else_branch {
                    Some(other) => self.cost_of(other, depth + 1)?,
                    None => CostTriple::constant(),
                };
                let cost = CostTriple::branch(&then_cost, &else_cost);
                if !cost.is_constant() {
                    self.trace.push_at(
                        depth,
                        format!(
                            "IF {}: then {}, else {} ⇒ {}",
                            cond,
                            then_cost.worst.big_o(),
                            else_cost.worst.big_o(),
                            cost.describe()
                        ),
                    );
                }
                cost
            }
            StmtKind::Call { name, .. } => self.cost_of_call(name, depth)?,
            StmtKind::Assign { .. }
            | StmtKind::Return { .. }
            | StmtKind::VarDecl { .. }
            | StmtKind::ArrayDecl { .. }
            | StmtKind::ObjectDecl { .. } => CostTriple::constant(),
        };

        Ok(in_exprs.then(&own))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::recursion_analysis::RecursionAnalyzer;
    use crate::shared::models::{BinOp, Span};

    fn var(n: &str) -> Expr {
        Expr::var(n)
    }

    fn n_loop(v: &str, body: Vec<Stmt>) -> Stmt {
        Stmt::for_loop(v, Expr::num(1), var("n"), body)
    }

    fn run(program: &Program) -> Result<Complexity> {
        let config = AnalysisConfig::default();
        let map = RecursionAnalyzer::new(&config).analyze(program);
        ComplexityAnalyzer::new(&config).analyze(program, &map)
    }

    fn touch() -> Stmt {
        Stmt::assign(var("x"), Expr::num(1))
    }

    #[test]
    fn test_call_cycle_without_recursion_info_is_fatal() {
        let program = Program::new(
            vec![
                Procedure::new("A", vec![], vec![Stmt::call("B", vec![])]),
                Procedure::new("B", vec![], vec![Stmt::call("A", vec![])]),
            ],
            vec![],
        );
        let analyzer = ComplexityAnalyzer::new(&AnalysisConfig::default());

        let err = analyzer
            .procedure_cost(&program, &RecursionMap::new(), "A")
            .unwrap_err();
        assert!(err.is_fatal());
        let AlgoscopeError::CallCycle { procedure, path } = err else {
            panic!("expected a call cycle, got {err}");
        };
        assert_eq!(procedure, "A");
        assert_eq!(path, vec!["A", "B", "A"]);
    }

    #[test]
    fn test_nested_loops_multiply() {
        let program = Program::new(vec![], vec![n_loop("i", vec![n_loop("j", vec![touch()])])]);
        let c = run(&program).unwrap();
        assert_eq!(c.big_o, ComplexityExpr::polynomial(2.0));
        assert_eq!(c.omega, ComplexityExpr::polynomial(2.0));
    }

    #[test]
    fn test_sequential_loops_take_dominant() {
        let program = Program::new(vec![], vec![n_loop("i", vec![touch()]), n_loop("j", vec![touch()])]);
        assert_eq!(run(&program).unwrap().big_o, ComplexityExpr::Linear);
    }

    #[test]
    fn test_while_best_is_constant() {
        let program = Program::new(
            vec![],
            vec![Stmt::while_loop(
                Expr::bin(BinOp::Gt, var("n"), Expr::num(1)),
                vec![Stmt::assign(var("n"), Expr::bin(BinOp::IntDiv, var("n"), Expr::num(2)))],
            )],
        );
        let c = run(&program).unwrap();
        assert_eq!(c.big_o, ComplexityExpr::Logarithmic);
        assert_eq!(c.omega, ComplexityExpr::Constant);
    }

    #[test]
    fn test_call_to_non_recursive_procedure_is_memoised() {
        let helper = Procedure::new("Helper", vec!["n"], vec![n_loop("i", vec![touch()])]);
        let program = Program::new(
            vec![helper],
            vec![n_loop(
                "k",
                vec![Stmt::call("Helper", vec![var("n")]), Stmt::call("Helper", vec![var("n")])],
            )],
        );
        let c = run(&program).unwrap();
        assert_eq!(c.big_o, ComplexityExpr::polynomial(2.0));
        assert!(c.steps.iter().any(|s| s.contains("memoised")));
    }

    #[test]
    fn test_calls_inside_expressions_are_costed() {
        let helper = Procedure::new("Sum", vec!["n"], vec![n_loop("i", vec![touch()]), Stmt::ret(var("s"))]);
        let program = Program::new(vec![helper], vec![Stmt::assign(var("t"), Expr::call("Sum", vec![var("n")]))]);
        assert_eq!(run(&program).unwrap().big_o, ComplexityExpr::Linear);
    }

    #[test]
    fn test_unknown_call_is_constant() {
        let program = Program::new(vec![], vec![Stmt::call("Print", vec![var("x")])]);
        assert_eq!(run(&program).unwrap().big_o, ComplexityExpr::Constant);
    }

    #[test]
    fn test_failed_procedure_is_isolated() {
        let broken = Procedure::new(
            "Broken",
            vec![],
            vec![Stmt::assign(Expr::num(3), Expr::num(4)).at(Span::line(7))],
        );
        let fine = Procedure::new("Fine", vec!["n"], vec![n_loop("i", vec![touch()])]);
        let program = Program::new(vec![broken, fine], vec![]);

        let c = run(&program).unwrap();
        let broken = &c.procedures["Broken"];
        assert!(broken.failed);
        assert!(broken.diagnostic.as_deref().unwrap_or_default().contains("assign"));
        assert!(!c.procedures["Fine"].failed);
        assert_eq!(c.big_o, ComplexityExpr::Linear);
    }

    #[test]
    fn test_recursive_call_uses_solution() {
        let fact = Procedure::new(
            "Fact",
            vec!["n"],
            vec![Stmt::if_else(
                Expr::bin(BinOp::Le, var("n"), Expr::num(1)),
                vec![Stmt::ret(Expr::num(1))],
                vec![Stmt::ret(Expr::bin(
                    BinOp::Mul,
                    var("n"),
                    Expr::call("Fact", vec![Expr::bin(BinOp::Sub, var("n"), Expr::num(1))]),
                ))],
            )],
        );
        let program = Program::new(vec![fact], vec![n_loop("i", vec![Stmt::call("Fact", vec![var("i")])])]);
        let c = run(&program).unwrap();
        assert_eq!(c.big_o, ComplexityExpr::polynomial(2.0));
        let fact = &c.procedures["Fact"];
        assert_eq!(fact.solution.as_ref().map(|s| s.label.as_str()), Some("O(n)"));
    }

    #[test]
    fn test_empty_main_reports_procedures() {
        let quad = Procedure::new("Quad", vec!["n"], vec![n_loop("i", vec![n_loop("j", vec![touch()])])]);
        let lin = Procedure::new("Lin", vec!["n"], vec![n_loop("i", vec![touch()])]);
        let c = run(&Program::new(vec![quad, lin], vec![])).unwrap();
        assert_eq!(c.big_o, ComplexityExpr::polynomial(2.0));
        assert!(c.explanation.contains("procedures"));
    }

    #[test]
    fn test_procedure_cost_unknown_name() {
        let config = AnalysisConfig::default();
        let program = Program::new(vec![], vec![]);
        let err = ComplexityAnalyzer::new(&config)
            .procedure_cost(&program, &RecursionMap::new(), "Nope")
            .unwrap_err();
        assert!(matches!(err, AlgoscopeError::UnknownProcedure(_)));
    }
}
