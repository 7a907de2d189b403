// Copyright (c) 2018 Fabian Schuiki

//! The session that owns the grammar under construction.

use errors::{BuildError, GrammarError, ParseError};
use function::PrecedenceTable;
use grammar::{Grammar, NonterminalId, RuleId};
use machine::{Machine, ParseTrace};
use precedence::{PrecedenceGraph, Relation};
use symbol;

/// A grammar session.
///
/// Holds the grammar, the precedence graph, and whether the parser has been
/// built. Every operation runs to completion and leaves the session
/// untouched if it fails. Once built, the session stays built, even if rules
/// or relations are added afterwards.
#[derive(Debug, Clone, Default)]
pub struct Session {
    grammar: Grammar,
    graph: PrecedenceGraph,
    built: bool,
}

impl Session {
    /// Create a new empty session.
    pub fn new() -> Session {
        Session::default()
    }

    /// The grammar defined so far.
    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// The precedence graph defined so far.
    pub fn graph(&self) -> &PrecedenceGraph {
        &self.graph
    }

    /// Whether the parser has been built successfully at least once.
    pub fn is_built(&self) -> bool {
        self.built
    }

    /// Add the rule `lhs -> rhs`.
    pub fn add_rule<S: AsRef<str>>(&mut self, lhs: &str, rhs: &[S]) -> Result<RuleId, GrammarError> {
        self.grammar.add_rule(lhs, rhs)
    }

    /// Designate the initial nonterminal.
    pub fn set_initial(&mut self, name: &str) -> Result<NonterminalId, GrammarError> {
        self.grammar.set_initial(name)
    }

    /// Add the precedence relation `t1 op t2`.
    ///
    /// The operator is checked before the terminals.
    pub fn add_relation(&mut self, t1: &str, op: &str, t2: &str) -> Result<Relation, GrammarError> {
        let relation: Relation = op.parse()?;
        self.graph.add_relation(t1, relation, t2)?;
        Ok(relation)
    }

    /// Derive the precedence functions.
    ///
    /// Fails if the precedence graph has a cycle, in which case the session
    /// is not marked as built.
    pub fn build(&mut self) -> Result<PrecedenceTable, BuildError> {
        let table = PrecedenceTable::compute(&self.graph)?;
        debug!(
            "built parser over {} nodes and {} rules",
            self.graph.len(),
            self.grammar.rules().count()
        );
        self.built = true;
        Ok(table)
    }

    /// Run the parser over a token sequence.
    ///
    /// The input is validated first: the parser must have been built, the
    /// input may contain neither nonterminals nor unknown terminals, no
    /// symbol may follow itself, and it must not be empty. A string that
    /// passes validation always yields a trace, whether it is accepted or
    /// rejected.
    pub fn parse<S: AsRef<str>>(&self, input: &[S]) -> Result<ParseTrace, ParseError> {
        if !self.built {
            return Err(ParseError::NotBuilt);
        }
        let tokens: Vec<&str> = input.iter().map(|s| s.as_ref()).collect();

        let nonterminals: Vec<String> = tokens
            .iter()
            .filter(|t| symbol::is_nonterminal(t))
            .map(|t| t.to_string())
            .collect();
        if !nonterminals.is_empty() {
            return Err(ParseError::NonterminalInInput(nonterminals));
        }

        let unknown: Vec<String> = tokens
            .iter()
            .filter(|t| !self.grammar.is_terminal(t))
            .map(|t| t.to_string())
            .collect();
        if !unknown.is_empty() {
            return Err(ParseError::UnknownTerminalInInput(unknown));
        }

        if let Some(pair) = tokens.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(ParseError::RepeatedAdjacentSymbol(pair[0].to_owned()));
        }

        if tokens.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        debug!("parsing `{}`", tokens.join(" "));
        Ok(Machine::new(&self.grammar, &self.graph, &tokens[..]).run())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_requires_build() {
        let s = Session::new();
        assert_eq!(s.parse(&["n"]), Err(ParseError::NotBuilt));
    }

    #[test]
    fn operator_checked_first() {
        let mut s = Session::new();
        assert_eq!(
            s.add_relation("E", "<>", "F"),
            Err(GrammarError::InvalidOperator("<>".into()))
        );
        assert_eq!(s.add_relation("E", "<", "F"), Err(GrammarError::TerminalsOnly));
        assert!(s.graph().is_empty());
    }

    #[test]
    fn failed_build_stays_unbuilt() {
        let mut s = Session::new();
        s.add_relation("a", ">", "b").unwrap();
        s.add_relation("a", "<", "b").unwrap();
        assert_eq!(s.build(), Err(BuildError::CyclicPrecedenceGraph));
        assert!(!s.is_built());
    }

    #[test]
    fn stays_built_after_edits() {
        let mut s = Session::new();
        s.build().unwrap();
        s.add_rule("E", &["n"]).unwrap();
        assert!(s.is_built());
    }
}
