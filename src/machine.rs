// Copyright (c) 2018 Fabian Schuiki

//! The shift-reduce automaton and the trace it records.
//!
//! The machine works on the annotated input sequence. A forward pass shifts
//! tokens onto the stack and performs the reductions that become possible
//! along the way. A backward pass then repeatedly looks for reducible
//! handles starting from the end of the sequence until the input is accepted
//! or rejected. Every shift, reduction, acceptance, and rejection is recorded
//! as one row of the trace.

use std::collections::HashSet;
use std::fmt;

use annotate::{annotate, Annotation, Item};
use diagnostic::nearest_rule;
use function::PrecedenceFunctions;
use grammar::{Grammar, RuleId};
use precedence::Relation;
use symbol::{classify, END};
use Pretty;

/// A shift-reduce machine over one input sequence.
pub struct Machine<'a, F: PrecedenceFunctions + ?Sized + 'a> {
    grammar: &'a Grammar,
    functions: &'a F,
    state: State,
    stack: Vec<String>,
    items: Vec<Item>,
    /// The part of the input not yet consumed by reductions.
    display: Vec<String>,
    start: isize,
    end: isize,
    seen: HashSet<(Vec<Item>, Vec<String>, usize)>,
    rows: Vec<TraceRow>,
}

/// The state of a machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    /// The forward pass, at the given position of the sequence.
    Scanning(usize),
    /// The backward pass, at the given position of the sequence.
    Reducing(usize),
    /// The input has been accepted.
    Accepted,
    /// The input has been rejected.
    Rejected,
}

/// An action taken by the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Push the next input token onto the stack.
    Shift,
    /// Replace a handle on the stack with the left-hand side of a rule.
    Reduce(RuleId),
    /// Give up. Carries the rule closest to the handle that could not be
    /// reduced, if the grammar has any rules.
    Reject(Option<RuleId>),
    /// Accept the input.
    Accept,
}

/// One recorded step of the machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceRow {
    stack: Vec<String>,
    input: Annotation,
    action: Action,
}

/// The ordered steps of one run of the machine, ending in an accept or
/// reject row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTrace {
    rows: Vec<TraceRow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pass {
    Forward,
    Backward,
}

enum Search {
    Match {
        open: usize,
        rule: RuleId,
        len: usize,
    },
    Reject(Option<RuleId>),
    Nothing,
}

impl<'a, F: PrecedenceFunctions + ?Sized> Machine<'a, F> {
    /// Create a machine for a token sequence.
    ///
    /// The tokens are annotated with `functions`, which is also used to
    /// annotate the remaining input shown in each trace row.
    pub fn new<S: AsRef<str>>(grammar: &'a Grammar, functions: &'a F, tokens: &[S]) -> Machine<'a, F> {
        Machine {
            grammar,
            functions,
            state: State::Scanning(0),
            stack: Vec::new(),
            items: annotate(tokens, functions).into_items(),
            display: tokens.iter().map(|t| t.as_ref().to_owned()).collect(),
            start: 0,
            end: 0,
            seen: HashSet::new(),
            rows: Vec::new(),
        }
    }

    /// The current state of the machine.
    pub fn state(&self) -> State {
        self.state
    }

    /// Whether the machine has reached a verdict.
    pub fn is_done(&self) -> bool {
        match self.state {
            State::Accepted | State::Rejected => true,
            State::Scanning(_) | State::Reducing(_) => false,
        }
    }

    /// Run the machine to completion and return its trace.
    pub fn run(mut self) -> ParseTrace {
        while !self.is_done() {
            self.step();
        }
        ParseTrace { rows: self.rows }
    }

    /// Advance the machine by one position of the sequence.
    pub fn step(&mut self) {
        trace!("{:?}", self.state);
        match self.state {
            State::Scanning(pos) => self.scan(pos),
            State::Reducing(pos) => self.reduce_backward(pos),
            State::Accepted | State::Rejected => (),
        }
    }

    fn scan(&mut self, pos: usize) {
        if pos >= self.items.len() {
            self.state = State::Reducing(self.items.len().saturating_sub(1));
            return;
        }
        let shifted = match self.items[pos] {
            Item::Token(ref t) if t.as_str() != END => Some(t.clone()),
            _ => None,
        };
        if let Some(token) = shifted {
            self.record(Action::Shift);
            self.stack.push(token);
            self.end += 1;
            self.start = self.end;
            self.state = State::Scanning(pos + 1);
            return;
        }
        if self.items[pos] != Item::Relation(Relation::Greater) {
            self.state = State::Scanning(pos + 1);
            return;
        }
        self.state = match self.find_handle(pos, Pass::Forward) {
            Search::Match { open, rule, len } => {
                self.reduce(pos, open, rule, len, Pass::Forward);
                State::Scanning(open + 3)
            }
            Search::Reject(nearest) => self.reject(nearest),
            Search::Nothing => State::Scanning(pos + 1),
        };
    }

    fn reduce_backward(&mut self, pos: usize) {
        if pos >= self.items.len() {
            self.state = self.reject(None);
            return;
        }
        if self.items[pos] == Item::Relation(Relation::Greater) {
            match self.find_handle(pos, Pass::Backward) {
                Search::Match { open, rule, len } => {
                    self.reduce(pos, open, rule, len, Pass::Backward);
                    let key = (self.items.clone(), self.stack.clone(), self.display.len());
                    self.state = if self.seen.insert(key) {
                        State::Reducing(self.items.len().saturating_sub(2))
                    } else {
                        // The same configuration came up before, so the
                        // reductions would cycle forever.
                        self.reject(Some(rule))
                    };
                    return;
                }
                Search::Reject(nearest) => {
                    self.state = self.reject(nearest);
                    return;
                }
                Search::Nothing => (),
            }
        } else if self.display.is_empty() && self.stack.len() == 1 {
            self.record(Action::Accept);
            self.state = State::Accepted;
            return;
        }
        self.state = if pos == 0 {
            let nearest = nearest_rule(self.grammar, &self.stack.join(" "));
            self.reject(nearest.map(|(id, _)| id))
        } else {
            State::Reducing(pos - 1)
        };
    }

    /// Collect the handle that ends just before the `>` at `pos`.
    ///
    /// Walks backwards over the tokens in front of `pos`. At every `<` the
    /// tokens collected so far are looked up as a rule. A handle that does
    /// not match keeps growing past the `<`, unless it contains two adjacent
    /// terminals, which no later reduction could ever separate.
    fn find_handle(&mut self, pos: usize, pass: Pass) -> Search {
        let mut handle: Vec<&str> = Vec::new();
        for open in (0..pos).rev() {
            match self.items[open] {
                Item::Token(ref t) if t.as_str() != END => {
                    handle.insert(0, t.as_str());
                    if pass == Pass::Forward {
                        self.start -= 1;
                    }
                }
                Item::Relation(Relation::Less) => {
                    let text = handle.join(" ");
                    if let Some(rule) = self.grammar.lookup(&text) {
                        return Search::Match {
                            open,
                            rule,
                            len: handle.len(),
                        };
                    }
                    if has_adjacent_terminals(&handle) {
                        let nearest = nearest_rule(self.grammar, &text);
                        return Search::Reject(nearest.map(|(id, _)| id));
                    }
                }
                _ => (),
            }
        }
        Search::Nothing
    }

    /// Replace the handle between the `<` at `open` and the `>` at `pos`.
    fn reduce(&mut self, pos: usize, open: usize, rule: RuleId, len: usize, pass: Pass) {
        self.record(Action::Reduce(rule));
        let lhs = self
            .grammar
            .nonterminal_name(self.grammar.rule(rule).name())
            .to_owned();

        let tail = self.items.split_off(pos);
        self.items.truncate(open + 1);
        self.items.push(Item::Token(lhs.clone()));
        self.items.extend(tail);

        if pass == Pass::Backward {
            self.start -= 1;
        }
        if !self.display.is_empty() {
            let last = self.display.len() as isize - 1;
            let at = self.start.max(0).min(last) as usize;
            self.display.remove(at);
        }
        if pass == Pass::Forward {
            self.end = self.start;
        }

        let keep = self.stack.len().saturating_sub(len);
        self.stack.truncate(keep);
        self.stack.push(lhs);
    }

    fn reject(&mut self, nearest: Option<RuleId>) -> State {
        self.record(Action::Reject(nearest));
        State::Rejected
    }

    fn record(&mut self, action: Action) {
        let input = annotate(&self.display, self.functions);
        debug!("{} | {} | {:?}", self.stack.join(" "), input, action);
        self.rows.push(TraceRow {
            stack: self.stack.clone(),
            input,
            action,
        });
    }
}

fn has_adjacent_terminals(handle: &[&str]) -> bool {
    handle
        .windows(2)
        .any(|pair| classify(pair[0]).is_operator_terminal() && classify(pair[1]).is_operator_terminal())
}

impl Action {
    /// Get a pretty printer for this action.
    pub fn pretty<'a>(&'a self, grammar: &'a Grammar) -> Pretty<&'a Grammar, &'a Self> {
        Pretty::new(grammar, self)
    }
}

impl<'a> fmt::Display for Pretty<&'a Grammar, &'a Action> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self.item {
            Action::Shift => write!(f, "shift"),
            Action::Reduce(rule) => write!(f, "reduce {}", rule.pretty(self.ctx)),
            Action::Reject(Some(rule)) => {
                write!(f, "reject, cannot reduce by {}", rule.pretty(self.ctx))
            }
            Action::Reject(None) => write!(f, "reject"),
            Action::Accept => write!(f, "accept"),
        }
    }
}

impl TraceRow {
    /// The symbols on the stack before the action, bottom first.
    pub fn stack(&self) -> &[String] {
        &self.stack
    }

    /// The remaining input before the action, annotated with precedences.
    pub fn input(&self) -> &Annotation {
        &self.input
    }

    /// The action taken.
    pub fn action(&self) -> Action {
        self.action
    }
}

impl ParseTrace {
    /// The rows of the trace in the order they were recorded.
    pub fn rows(&self) -> &[TraceRow] {
        &self.rows
    }

    /// The final action of the trace.
    pub fn verdict(&self) -> Option<Action> {
        self.rows.last().map(|r| r.action)
    }

    /// Whether the input was accepted.
    pub fn is_accepted(&self) -> bool {
        self.verdict() == Some(Action::Accept)
    }

    /// Get a pretty printer for this trace.
    pub fn pretty<'a>(&'a self, grammar: &'a Grammar) -> Pretty<&'a Grammar, &'a Self> {
        Pretty::new(grammar, self)
    }
}

/// The gap between the columns of a rendered trace.
const PADDING: usize = 5;

impl<'a> fmt::Display for Pretty<&'a Grammar, &'a ParseTrace> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut lines = vec![(
            String::from("Stack"),
            String::from("Input"),
            String::from("Action"),
        )];
        for row in &self.item.rows {
            let input = if row.input.is_empty() && row.action == Action::Accept {
                format!("{} {}", END, END)
            } else {
                row.input.to_string()
            };
            lines.push((
                row.stack.join(" "),
                input,
                row.action.pretty(self.ctx).to_string(),
            ));
        }
        let stack_width = lines.iter().map(|l| l.0.chars().count()).max().unwrap_or(0) + PADDING;
        let input_width = lines.iter().map(|l| l.1.chars().count()).max().unwrap_or(0) + PADDING;
        for (i, &(ref stack, ref input, ref action)) in lines.iter().enumerate() {
            if i > 0 {
                write!(f, "\n")?;
            }
            write!(
                f,
                "{:sw$}{:iw$}{}",
                stack,
                input,
                action,
                sw = stack_width,
                iw = input_width
            )?;
        }
        Ok(())
    }
}
