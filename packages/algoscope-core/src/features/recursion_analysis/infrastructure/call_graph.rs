//! Procedure call graph
//!
//! Nodes are declared procedures; an edge exists for each distinct
//! caller → callee pair between declared procedures. Calls to undeclared
//! names stay in the raw callee lists but never become edges.
//!
//! Recursion is read off the strongly connected components (Tarjan SCC):
//! a procedure is recursive iff it has a self edge or sits in an SCC of
//! size > 1. Merely reaching some other cycle does not count.

use crate::shared::models::Program;
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Dfs;
use rustc_hash::{FxHashMap, FxHashSet};

#[derive(Debug, Clone)]
pub struct CallGraph {
    graph: DiGraph<String, ()>,
    name_to_node: FxHashMap<String, NodeIndex>,

    /// Raw callee names per procedure, duplicates and undeclared names kept
    callees: FxHashMap<String, Vec<String>>,

    /// Node → SCC id
    component: FxHashMap<NodeIndex, usize>,
    components: Vec<Vec<NodeIndex>>,
}

impl CallGraph {
    pub fn build(program: &Program) -> Self {
        let mut graph = DiGraph::new();
        let mut name_to_node = FxHashMap::default();

        for proc in &program.procedures {
            name_to_node
                .entry(proc.name.clone())
                .or_insert_with(|| graph.add_node(proc.name.clone()));
        }

        let mut callees: FxHashMap<String, Vec<String>> = FxHashMap::default();
        for proc in &program.procedures {
            if callees.contains_key(&proc.name) {
                // Duplicate declaration; validation reports it, the first one wins
                continue;
            }
            let names: Vec<String> = proc
                .body
                .call_sites()
                .iter()
                .map(|site| site.name.to_string())
                .collect();

            if let Some(&from) = name_to_node.get(&proc.name) {
                let mut linked = FxHashSet::default();
                for callee in &names {
                    if let Some(&to) = name_to_node.get(callee) {
                        if linked.insert(to) {
                            graph.add_edge(from, to, ());
                        }
                    }
                }
            }
            callees.insert(proc.name.clone(), names);
        }

        let components = tarjan_scc(&graph);
        let mut component = FxHashMap::default();
        for (id, scc) in components.iter().enumerate() {
            for &node in scc {
                component.insert(node, id);
            }
        }

        tracing::debug!(
            "Call graph built: {} procedures, {} edges, {} SCCs",
            graph.node_count(),
            graph.edge_count(),
            components.len()
        );

        Self {
            graph,
            name_to_node,
            callees,
            component,
            components,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.name_to_node.contains_key(name)
    }

    /// Callee names in source order, duplicates preserved
    pub fn callees(&self, name: &str) -> &[String] {
        self.callees.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_self_edge(&self, name: &str) -> bool {
        self.name_to_node
            .get(name)
            .map(|&n| self.graph.contains_edge(n, n))
            .unwrap_or(false)
    }

    fn scc_members(&self, name: &str) -> &[NodeIndex] {
        self.name_to_node
            .get(name)
            .and_then(|n| self.component.get(n))
            .and_then(|&id| self.components.get(id))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn scc_size(&self, name: &str) -> usize {
        self.scc_members(name).len()
    }

    pub fn is_recursive(&self, name: &str) -> bool {
        self.has_self_edge(name) || self.scc_size(name) > 1
    }

    /// Procedures whose call from `name` is a recursive call:
    /// the members of its SCC (itself included) when it is recursive
    pub fn recursive_targets(&self, name: &str) -> FxHashSet<String> {
        if !self.is_recursive(name) {
            return FxHashSet::default();
        }
        self.scc_members(name)
            .iter()
            .map(|&n| self.graph[n].clone())
            .collect()
    }

    /// Declared procedures reachable from `name`, excluding `name` itself
    pub fn reachable_from(&self, name: &str) -> Vec<String> {
        let Some(&start) = self.name_to_node.get(name) else {
            return Vec::new();
        };
        let mut dfs = Dfs::new(&self.graph, start);
        let mut out = Vec::new();
        while let Some(node) = dfs.next(&self.graph) {
            if node != start {
                out.push(self.graph[node].clone());
            }
        }
        out
    }

    /// Every non-trivial cycle, as procedure names
    pub fn cycles(&self) -> Vec<Vec<String>> {
        self.components
            .iter()
            .filter(|scc| scc.len() > 1 || scc.iter().any(|&n| self.graph.contains_edge(n, n)))
            .map(|scc| scc.iter().map(|&n| self.graph[n].clone()).collect())
            .collect()
    }
}
