// Copyright (c) 2018 Fabian Schuiki

//! Precedence functions derived from the precedence graph.

use std::fmt;

use indexmap::map::Iter;
use indexmap::IndexMap;

use errors::BuildError;
use precedence::{PrecedenceGraph, Role};

/// A source of precedence function values.
///
/// `f` is the precedence of a terminal when it stands on the left of a
/// comparison, `g` when it stands on the right. Terminals the source knows
/// nothing about have a value of 0.
pub trait PrecedenceFunctions {
    /// The value of `f` for a terminal.
    fn f(&self, terminal: &str) -> usize;

    /// The value of `g` for a terminal.
    fn g(&self, terminal: &str) -> usize;
}

/// The graph itself evaluates the functions on demand, walking the longest
/// path every time a value is requested.
impl PrecedenceFunctions for PrecedenceGraph {
    fn f(&self, terminal: &str) -> usize {
        self.longest_path(terminal, Role::High)
    }

    fn g(&self, terminal: &str) -> usize {
        self.longest_path(terminal, Role::Low)
    }
}

/// A snapshot of the precedence functions of every terminal in the graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrecedenceTable {
    f: IndexMap<String, usize>,
    g: IndexMap<String, usize>,
}

impl PrecedenceTable {
    /// Compute the precedence functions of a graph.
    ///
    /// Fails if the graph contains a cycle, in which case no functions exist.
    pub fn compute(graph: &PrecedenceGraph) -> Result<PrecedenceTable, BuildError> {
        if graph.has_cycle() {
            return Err(BuildError::CyclicPrecedenceGraph);
        }
        let mut table = PrecedenceTable::default();
        for (id, node) in graph.nodes() {
            let value = graph.longest_path_from(id);
            trace!("{} = {}", node, value);
            let column = match node.role() {
                Role::High => &mut table.f,
                Role::Low => &mut table.g,
            };
            column.insert(node.terminal().to_owned(), value);
        }
        Ok(table)
    }

    /// The `f` values in node creation order.
    pub fn f_values(&self) -> Iter<String, usize> {
        self.f.iter()
    }

    /// The `g` values in node creation order.
    pub fn g_values(&self) -> Iter<String, usize> {
        self.g.iter()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.f.is_empty() && self.g.is_empty()
    }
}

impl PrecedenceFunctions for PrecedenceTable {
    fn f(&self, terminal: &str) -> usize {
        self.f.get(terminal).cloned().unwrap_or(0)
    }

    fn g(&self, terminal: &str) -> usize {
        self.g.get(terminal).cloned().unwrap_or(0)
    }
}

impl fmt::Display for PrecedenceTable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "f values:")?;
        for (terminal, value) in &self.f {
            write!(f, "\n{}: {}", terminal, value)?;
        }
        write!(f, "\ng values:")?;
        for (terminal, value) in &self.g {
            write!(f, "\n{}: {}", terminal, value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use precedence::Relation::*;

    fn arith() -> PrecedenceGraph {
        let mut g = PrecedenceGraph::new();
        g.add_relation("n", Greater, "+").unwrap();
        g.add_relation("n", Greater, "*").unwrap();
        g.add_relation("n", Greater, "$").unwrap();
        g.add_relation("+", Less, "n").unwrap();
        g.add_relation("+", Greater, "+").unwrap();
        g.add_relation("+", Less, "*").unwrap();
        g.add_relation("+", Greater, "$").unwrap();
        g.add_relation("*", Less, "n").unwrap();
        g.add_relation("*", Greater, "+").unwrap();
        g.add_relation("*", Greater, "*").unwrap();
        g.add_relation("*", Greater, "$").unwrap();
        g.add_relation("$", Less, "n").unwrap();
        g.add_relation("$", Less, "+").unwrap();
        g.add_relation("$", Less, "*").unwrap();
        g
    }

    #[test]
    fn arithmetic_values() {
        let table = PrecedenceTable::compute(&arith()).unwrap();
        let f: Vec<(&str, usize)> = table.f_values().map(|(t, &v)| (t.as_str(), v)).collect();
        let g: Vec<(&str, usize)> = table.g_values().map(|(t, &v)| (t.as_str(), v)).collect();
        assert_eq!(f, vec![("n", 4), ("+", 2), ("*", 4), ("$", 0)]);
        assert_eq!(g, vec![("n", 5), ("+", 1), ("*", 3), ("$", 0)]);
    }

    #[test]
    fn table_agrees_with_graph() {
        let graph = arith();
        let table = PrecedenceTable::compute(&graph).unwrap();
        for t in &["n", "+", "*", "$", "unknown"] {
            assert_eq!(table.f(t), graph.f(t));
            assert_eq!(table.g(t), graph.g(t));
        }
    }

    #[test]
    fn empty_graph_builds() {
        let table = PrecedenceTable::compute(&PrecedenceGraph::new()).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.to_string(), "f values:\ng values:");
    }

    #[test]
    fn cycle_refused() {
        let mut graph = PrecedenceGraph::new();
        graph.add_relation("a", Greater, "b").unwrap();
        graph.add_relation("a", Less, "b").unwrap();
        assert_eq!(
            PrecedenceTable::compute(&graph),
            Err(BuildError::CyclicPrecedenceGraph)
        );
    }

    #[test]
    fn display() {
        let mut graph = PrecedenceGraph::new();
        graph.add_relation("a", Greater, "b").unwrap();
        let table = PrecedenceTable::compute(&graph).unwrap();
        assert_eq!(table.to_string(), "f values:\na: 1\nb: 0\ng values:\na: 0\nb: 0");
    }
}
