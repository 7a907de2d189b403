// Copyright (c) 2018 Fabian Schuiki

//! The precedence relation graph.
//!
//! Every terminal that takes part in a precedence relation owns two nodes in
//! the graph: a high node, whose longest path yields `f`, and a low node,
//! whose longest path yields `g`. A relation `a < b` adds the edge
//! `low(b) -> high(a)`, a relation `a > b` adds the edge `high(a) -> low(b)`.
//! Equal precedence adds no edge at all.

use std::collections::HashMap;
use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use bit_set::BitSet;

use errors::GrammarError;
use symbol;

/// A precedence relation between two terminals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    /// `<`, the left terminal yields precedence to the right one.
    Less,
    /// `=`, both terminals have the same precedence.
    Equal,
    /// `>`, the left terminal takes precedence over the right one.
    Greater,
}

/// The role a node plays for its terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// The node that yields `g`, the precedence of a terminal on the right.
    Low,
    /// The node that yields `f`, the precedence of a terminal on the left.
    High,
}

/// A unique node identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

/// A node in the precedence graph.
#[derive(Debug, Clone)]
pub struct Node {
    terminal: String,
    role: Role,
    edges: Vec<NodeId>,
}

/// The precedence graph.
///
/// Nodes are created lazily when a terminal is first mentioned in a relation
/// and are never removed.
#[derive(Debug, Clone, Default)]
pub struct PrecedenceGraph {
    nodes: Vec<Node>,
    lookup: HashMap<(String, Role), NodeId>,
}

impl PrecedenceGraph {
    /// Create a new empty graph.
    pub fn new() -> PrecedenceGraph {
        PrecedenceGraph::default()
    }

    /// Apply the relation `t1 op t2` to the graph.
    ///
    /// Both symbols must be terminals. The nodes of both terminals are
    /// created if they do not exist yet, even for `=`.
    pub fn add_relation(&mut self, t1: &str, op: Relation, t2: &str) -> Result<(), GrammarError> {
        if symbol::is_nonterminal(t1) || symbol::is_nonterminal(t2) {
            return Err(GrammarError::TerminalsOnly);
        }
        let high1 = self.add_node(t1, Role::High);
        self.add_node(t1, Role::Low);
        self.add_node(t2, Role::High);
        let low2 = self.add_node(t2, Role::Low);

        match op {
            Relation::Less => self.nodes[low2.0].edges.push(high1),
            Relation::Greater => self.nodes[high1.0].edges.push(low2),
            Relation::Equal => (),
        }
        debug!("added precedence {} {} {}", t1, op, t2);
        Ok(())
    }

    fn add_node(&mut self, terminal: &str, role: Role) -> NodeId {
        let key = (terminal.to_owned(), role);
        if let Some(&id) = self.lookup.get(&key) {
            return id;
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            terminal: key.0.clone(),
            role,
            edges: Vec::new(),
        });
        self.lookup.insert(key, id);
        id
    }

    /// Find the node of a terminal in a given role.
    pub fn node(&self, terminal: &str, role: Role) -> Option<NodeId> {
        self.lookup.get(&(terminal.to_owned(), role)).cloned()
    }

    /// All nodes in the order they were created.
    pub fn nodes(&self) -> Nodes {
        Nodes(self.nodes.iter().enumerate())
    }

    /// The number of nodes in the graph.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Check whether the graph contains a cycle.
    ///
    /// Every node is used as a starting point, so cycles that are not
    /// reachable from the first node are found as well.
    pub fn has_cycle(&self) -> bool {
        let mut visited = BitSet::with_capacity(self.nodes.len());
        let mut on_stack = BitSet::with_capacity(self.nodes.len());
        (0..self.nodes.len())
            .any(|n| !visited.contains(n) && self.find_cycle(n, &mut visited, &mut on_stack))
    }

    fn find_cycle(&self, node: usize, visited: &mut BitSet, on_stack: &mut BitSet) -> bool {
        visited.insert(node);
        on_stack.insert(node);
        for &NodeId(next) in &self.nodes[node].edges {
            if on_stack.contains(next) {
                return true;
            }
            if !visited.contains(next) && self.find_cycle(next, visited, on_stack) {
                return true;
            }
        }
        on_stack.remove(node);
        false
    }

    /// The number of edges on the longest simple path starting at a node.
    ///
    /// Nodes are only guarded against revisits along the current path, so
    /// every simple path is explored and nothing is cached across calls. A
    /// missing node has no outgoing edges and yields 0.
    pub fn longest_path(&self, terminal: &str, role: Role) -> usize {
        match self.node(terminal, role) {
            Some(id) => self.longest_path_from(id),
            None => 0,
        }
    }

    /// The number of edges on the longest simple path starting at `id`.
    pub fn longest_path_from(&self, id: NodeId) -> usize {
        let mut on_path = BitSet::with_capacity(self.nodes.len());
        self.walk(id.0, &mut on_path)
    }

    fn walk(&self, node: usize, on_path: &mut BitSet) -> usize {
        on_path.insert(node);
        let mut longest = 0;
        for &NodeId(next) in &self.nodes[node].edges {
            if !on_path.contains(next) {
                longest = longest.max(self.walk(next, on_path) + 1);
            }
        }
        on_path.remove(node);
        longest
    }
}

impl Index<NodeId> for PrecedenceGraph {
    type Output = Node;

    fn index(&self, index: NodeId) -> &Node {
        &self.nodes[index.0]
    }
}

impl Node {
    /// The terminal this node belongs to.
    pub fn terminal(&self) -> &str {
        &self.terminal
    }

    /// The role of this node.
    pub fn role(&self) -> Role {
        self.role
    }

    /// The nodes this node has edges to.
    pub fn edges(&self) -> &[NodeId] {
        &self.edges
    }
}

/// An iterator over the nodes of a precedence graph.
pub struct Nodes<'a>(::std::iter::Enumerate<::std::slice::Iter<'a, Node>>);

impl<'a> Iterator for Nodes<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(i, n)| (NodeId(i), n))
    }
}

impl FromStr for Relation {
    type Err = GrammarError;

    fn from_str(s: &str) -> Result<Relation, GrammarError> {
        match s {
            "<" => Ok(Relation::Less),
            "=" => Ok(Relation::Equal),
            ">" => Ok(Relation::Greater),
            _ => Err(GrammarError::InvalidOperator(s.to_owned())),
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            Relation::Less => "<",
            Relation::Equal => "=",
            Relation::Greater => ">",
        })
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            Role::Low => "g",
            Role::High => "f",
        })
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}_{}", self.role, self.terminal)
    }
}
