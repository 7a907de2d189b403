// Copyright (c) 2018 Fabian Schuiki

//! An interactive compiler and parser for operator-precedence grammars.
//!
//! A grammar is assembled incrementally from rules, precedence relations
//! between terminals, and an initial nonterminal. Building the grammar
//! derives the precedence functions `f` and `g` from the relation graph,
//! after which input strings can be run through a shift-reduce automaton
//! that records a trace of every step.
//!
//! All state lives in a [`Session`](session/struct.Session.html). The
//! session is not internally synchronized; callers that share one across
//! threads must serialize access themselves.

#![deny(missing_docs)]

extern crate bit_set;
extern crate indexmap;
#[macro_use]
extern crate log;

pub mod symbol;
pub mod grammar;
pub mod precedence;
pub mod function;
pub mod annotate;
pub mod diagnostic;
pub mod machine;
pub mod session;
pub mod command;
pub mod errors;

pub use session::Session;

/// A pretty printer.
pub struct Pretty<C, T> {
    ctx: C,
    item: T,
}

impl<C, T> Pretty<C, T> {
    pub(crate) fn new(ctx: C, item: T) -> Pretty<C, T> {
        Pretty { ctx, item }
    }
}
