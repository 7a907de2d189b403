// Copyright (c) 2018 Fabian Schuiki

//! Classification of grammar symbols.
//!
//! Symbols are plain strings. Their kind is derived from the characters they
//! consist of every time it is needed, so it can never drift from the string
//! itself.

/// The reserved end marker that brackets every parser input.
pub const END: &str = "$";

/// The kind of a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    /// Only uppercase letters, e.g. `E`.
    Nonterminal,
    /// Only lowercase letters, e.g. `n` or `id`.
    TerminalWord,
    /// No letters at all, e.g. `+` or `(`.
    TerminalSymbol,
    /// The end marker `$`.
    EndMarker,
    /// A terminal that mixes letters with other characters or cases, e.g.
    /// `id1` or `Ab`.
    Mixed,
}

/// Classify a symbol.
pub fn classify(symbol: &str) -> SymbolKind {
    if symbol == END {
        return SymbolKind::EndMarker;
    }
    if !symbol.chars().any(char::is_alphabetic) {
        return SymbolKind::TerminalSymbol;
    }
    if symbol.chars().all(|c| c.is_alphabetic() && c.is_uppercase()) {
        SymbolKind::Nonterminal
    } else if symbol.chars().all(|c| c.is_alphabetic() && c.is_lowercase()) {
        SymbolKind::TerminalWord
    } else {
        SymbolKind::Mixed
    }
}

/// Check whether a symbol is a nonterminal.
pub fn is_nonterminal(symbol: &str) -> bool {
    classify(symbol) == SymbolKind::Nonterminal
}

impl SymbolKind {
    /// Whether this kind denotes a nonterminal.
    pub fn is_nonterminal(self) -> bool {
        self == SymbolKind::Nonterminal
    }

    /// Whether this kind denotes a terminal.
    ///
    /// Everything that is not a nonterminal is a terminal, including mixed
    /// symbols and the end marker.
    pub fn is_terminal(self) -> bool {
        !self.is_nonterminal()
    }

    /// Whether this kind takes part in operator comparisons.
    ///
    /// Only lowercase words and letter-free symbols count; two such symbols
    /// next to each other can never be reduced by an operator grammar.
    pub fn is_operator_terminal(self) -> bool {
        match self {
            SymbolKind::TerminalWord | SymbolKind::TerminalSymbol | SymbolKind::EndMarker => true,
            SymbolKind::Nonterminal | SymbolKind::Mixed => false,
        }
    }

    /// Whether two adjacent symbols of these kinds belong to the same class.
    ///
    /// The end marker counts as a letter-free symbol. Mixed symbols are never
    /// in the same class as anything.
    pub fn same_class(self, other: SymbolKind) -> bool {
        use self::SymbolKind::*;
        match (self, other) {
            (Nonterminal, Nonterminal) | (TerminalWord, TerminalWord) => true,
            (TerminalSymbol, TerminalSymbol)
            | (TerminalSymbol, EndMarker)
            | (EndMarker, TerminalSymbol)
            | (EndMarker, EndMarker) => true,
            _ => false,
        }
    }
}
