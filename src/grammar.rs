// Copyright (c) 2018 Fabian Schuiki

//! Data structures representing a grammar.

use std;
use std::collections::HashMap;
use std::fmt;

use indexmap::set::Iter as TerminalsIter;
use indexmap::IndexSet;

use errors::GrammarError;
use symbol::{self, classify};
use Pretty;

/// An operator grammar.
///
/// Rules are only ever appended. Nonterminals come into existence with their
/// first rule, terminals are registered as they appear in rules.
#[derive(Debug, Clone, Default)]
pub struct Grammar {
    rules: Vec<Rule>,
    nonterms: HashMap<String, NonterminalId>,
    nonterm_names: Vec<String>,
    nonterm_rules: Vec<Vec<RuleId>>,
    terms: IndexSet<String>,
    initial: Option<NonterminalId>,
}

/// A single rule within a grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    name: NonterminalId,
    symbols: Vec<String>,
}

/// A unique nonterminal identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NonterminalId(usize);

/// A unique rule identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RuleId(usize);

/// An iterator over the rules of a grammar, in store order.
pub struct Alternatives<'a> {
    grammar: &'a Grammar,
    outer: std::slice::Iter<'a, Vec<RuleId>>,
    inner: std::slice::Iter<'a, RuleId>,
}

impl Grammar {
    /// Create a new empty grammar.
    pub fn new() -> Grammar {
        Grammar::default()
    }

    /// Add a rule `lhs -> rhs` to the grammar.
    ///
    /// The left-hand side must be a nonterminal and the right-hand side must
    /// satisfy the operator grammar constraint. On success, every terminal in
    /// the right-hand side is registered and the rule is appended as a new
    /// alternative of `lhs`, even if an identical one already exists.
    pub fn add_rule<S: AsRef<str>>(&mut self, lhs: &str, rhs: &[S]) -> Result<RuleId, GrammarError> {
        if !symbol::is_nonterminal(lhs) {
            return Err(GrammarError::NotANonterminal(lhs.to_owned()));
        }
        if rhs.is_empty() {
            return Err(GrammarError::EmptyRightHandSide(lhs.to_owned()));
        }
        let symbols: Vec<String> = rhs.iter().map(|s| s.as_ref().to_owned()).collect();
        if !is_operator_sequence(&symbols) {
            return Err(GrammarError::NotOperatorGrammar {
                lhs: lhs.to_owned(),
                rhs: symbols,
            });
        }

        for s in &symbols {
            if classify(s).is_terminal() {
                self.terms.insert(s.clone());
            }
        }
        let name = self.add_nonterminal(lhs);
        let id = RuleId(self.rules.len());
        self.nonterm_rules[name.as_usize()].push(id);
        self.rules.push(Rule { name, symbols });
        debug!("added rule {}", id.pretty(self));
        Ok(id)
    }

    fn add_nonterminal(&mut self, name: &str) -> NonterminalId {
        if let Some(&id) = self.nonterms.get(name) {
            return id;
        }
        let id = NonterminalId(self.nonterm_names.len());
        self.nonterms.insert(name.to_owned(), id);
        self.nonterm_names.push(name.to_owned());
        self.nonterm_rules.push(Vec::new());
        id
    }

    /// Designate the initial nonterminal.
    ///
    /// Only nonterminals that already have rules can be chosen. Replaces any
    /// previous choice.
    pub fn set_initial(&mut self, name: &str) -> Result<NonterminalId, GrammarError> {
        match self.get_nonterminal(name) {
            Some(id) => {
                self.initial = Some(id);
                debug!("initial symbol is now {}", name);
                Ok(id)
            }
            None => Err(GrammarError::UnknownNonterminal(name.to_owned())),
        }
    }

    /// The initial nonterminal, if one has been designated.
    pub fn initial(&self) -> Option<NonterminalId> {
        self.initial
    }

    /// Find a nonterminal by name.
    pub fn get_nonterminal(&self, name: &str) -> Option<NonterminalId> {
        self.nonterms.get(name).cloned()
    }

    /// Get the name of a nonterminal.
    pub fn nonterminal_name(&self, id: NonterminalId) -> &str {
        &self.nonterm_names[id.as_usize()]
    }

    /// The terminals registered so far, in order of first appearance.
    pub fn terminals(&self) -> TerminalsIter<String> {
        self.terms.iter()
    }

    /// Check whether a symbol has been registered as a terminal.
    pub fn is_terminal(&self, name: &str) -> bool {
        self.terms.contains(name)
    }

    /// The rules in this grammar, in the order they were added.
    pub fn rules(&self) -> std::slice::Iter<Rule> {
        self.rules.iter()
    }

    /// Access a single rule of this grammar.
    pub fn rule(&self, id: RuleId) -> &Rule {
        &self.rules[id.as_usize()]
    }

    /// The rules grouped by nonterminal.
    ///
    /// Nonterminals are visited in the order they were first defined, and
    /// the alternatives of each nonterminal in the order they were added.
    /// Lookups and diagnostics break ties by this order.
    pub fn alternatives(&self) -> Alternatives {
        Alternatives {
            grammar: self,
            outer: self.nonterm_rules.iter(),
            inner: (&[]).iter(),
        }
    }

    /// Find the first rule whose right-hand side reads exactly `handle`.
    ///
    /// The comparison is done on the space-joined right-hand side.
    pub fn lookup(&self, handle: &str) -> Option<RuleId> {
        self.alternatives()
            .find(|&(_, rule)| rule.rhs_string() == handle)
            .map(|(id, _)| id)
    }
}

/// Check the operator grammar constraint on a right-hand side.
///
/// No two adjacent symbols may be of the same class. In addition, the end
/// marker is rejected in every position that is followed by another symbol,
/// regardless of what that symbol is.
fn is_operator_sequence(symbols: &[String]) -> bool {
    symbols.windows(2).all(|pair| {
        let (a, b) = (classify(&pair[0]), classify(&pair[1]));
        !a.same_class(b) && pair[0] != symbol::END
    })
}

impl<'a> Iterator for Alternatives<'a> {
    type Item = (RuleId, &'a Rule);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(&id) = self.inner.next() {
                return Some((id, self.grammar.rule(id)));
            }
            match self.outer.next() {
                Some(ids) => self.inner = ids.iter(),
                None => return None,
            }
        }
    }
}

impl Rule {
    /// The nonterminal this rule produces.
    pub fn name(&self) -> NonterminalId {
        self.name
    }

    /// The right-hand side joined by single spaces.
    pub fn rhs_string(&self) -> String {
        self.symbols.join(" ")
    }

    /// Get a pretty printer for this rule.
    pub fn pretty<'a>(&'a self, grammar: &'a Grammar) -> Pretty<&'a Grammar, &'a Self> {
        Pretty::new(grammar, self)
    }
}

impl<'a> fmt::Display for Pretty<&'a Grammar, &'a Rule> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ->", self.ctx.nonterminal_name(self.item.name))?;
        for symbol in &self.item.symbols {
            write!(f, " {}", symbol)?;
        }
        Ok(())
    }
}

impl NonterminalId {
    /// Obtain the id as a usize.
    pub fn as_usize(self) -> usize {
        self.0
    }
}

impl RuleId {
    /// Create a rule id from a usize.
    pub fn from_usize(id: usize) -> RuleId {
        RuleId(id)
    }

    /// Obtain the id as a usize.
    pub fn as_usize(self) -> usize {
        self.0
    }

    /// Get a pretty printer for the rule this id refers to.
    pub fn pretty(self, grammar: &Grammar) -> Pretty<&Grammar, Self> {
        Pretty::new(grammar, self)
    }
}

impl<'a> fmt::Display for Pretty<&'a Grammar, RuleId> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.ctx.rule(self.item).pretty(self.ctx))
    }
}
