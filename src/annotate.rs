// Copyright (c) 2018 Fabian Schuiki

//! Precedence annotation of token sequences.
//!
//! The annotator brackets a token sequence with the end marker and places
//! the precedence relation between every pair of adjacent tokens, turning
//! `n + n` into `$ < n > + < n > $`.

use std::fmt;

use function::PrecedenceFunctions;
use precedence::Relation;
use symbol::END;

/// An element of an annotated sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Item {
    /// A token of the input, or a nonterminal that replaced a handle.
    Token(String),
    /// The relation between the surrounding tokens.
    Relation(Relation),
}

/// A token sequence interleaved with precedence relations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Annotation {
    items: Vec<Item>,
}

/// Annotate a token sequence with the precedence relations between its
/// adjacent tokens.
///
/// The end marker is added at the front and back unless the sequence
/// already starts or ends with it. For each adjacent pair `a b`, the
/// relation is `>` if `f(a) > g(b)`, `<` if `f(a) < g(b)`, and `=`
/// otherwise. An empty sequence stays empty.
pub fn annotate<S, F>(tokens: &[S], functions: &F) -> Annotation
where
    S: AsRef<str>,
    F: PrecedenceFunctions + ?Sized,
{
    let mut items = Vec::new();
    if tokens.is_empty() {
        return Annotation { items };
    }

    let mut bracketed: Vec<&str> = Vec::with_capacity(tokens.len() + 2);
    if tokens[0].as_ref() != END {
        bracketed.push(END);
    }
    bracketed.extend(tokens.iter().map(|t| t.as_ref()));
    if tokens[tokens.len() - 1].as_ref() != END {
        bracketed.push(END);
    }

    for (i, &token) in bracketed.iter().enumerate() {
        items.push(Item::Token(token.to_owned()));
        if let Some(&next) = bracketed.get(i + 1) {
            items.push(Item::Relation(compare(functions.f(token), functions.g(next))));
        }
    }
    Annotation { items }
}

fn compare(f: usize, g: usize) -> Relation {
    if f > g {
        Relation::Greater
    } else if f < g {
        Relation::Less
    } else {
        Relation::Equal
    }
}

impl Annotation {
    /// The items of the sequence.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Consume the annotation and return its items.
    pub fn into_items(self) -> Vec<Item> {
        self.items
    }

    /// Whether the sequence has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Item {
    /// Whether this item is the token `name`.
    pub fn is_token(&self, name: &str) -> bool {
        match *self {
            Item::Token(ref t) => t == name,
            Item::Relation(_) => false,
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Item::Token(ref t) => write!(f, "{}", t),
            Item::Relation(r) => write!(f, "{}", r),
        }
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", item)?;
        }
        Ok(())
    }
}
