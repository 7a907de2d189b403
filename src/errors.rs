// Copyright (c) 2018 Fabian Schuiki

//! Errors reported by the grammar, build, parse, and command operations.
//!
//! None of these leave partial state behind: an operation that fails leaves
//! the session exactly as it was before the call.

use std::error::Error;
use std::fmt;

/// An error while defining the grammar or its precedence relations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    /// The left-hand side of a rule is not a nonterminal.
    NotANonterminal(String),
    /// Two adjacent symbols in a rule violate the operator grammar.
    NotOperatorGrammar {
        /// The left-hand side of the offending rule.
        lhs: String,
        /// The right-hand side of the offending rule.
        rhs: Vec<String>,
    },
    /// A rule without any symbols on its right-hand side.
    EmptyRightHandSide(String),
    /// The initial symbol names a nonterminal without rules.
    UnknownNonterminal(String),
    /// A precedence relation with an operator other than `<`, `=`, `>`.
    InvalidOperator(String),
    /// A precedence relation mentions a nonterminal.
    TerminalsOnly,
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            GrammarError::NotANonterminal(ref name) => {
                write!(f, "\"{}\" is not a nonterminal", name)
            }
            GrammarError::NotOperatorGrammar { ref lhs, ref rhs } => write!(
                f,
                "\"{} -> {}\" is not an operator grammar",
                lhs,
                rhs.join(" ")
            ),
            GrammarError::EmptyRightHandSide(ref name) => {
                write!(f, "rule for \"{}\" has an empty right-hand side", name)
            }
            GrammarError::UnknownNonterminal(ref name) => {
                write!(f, "\"{}\" is not a nonterminal of the grammar", name)
            }
            GrammarError::InvalidOperator(ref op) => write!(f, "\"{}\" is not a valid operator", op),
            GrammarError::TerminalsOnly => write!(f, "the symbols must be terminals"),
        }
    }
}

impl Error for GrammarError {}

/// An error while building the precedence functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildError {
    /// The precedence graph contains a cycle, so no functions exist.
    CyclicPrecedenceGraph,
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            BuildError::CyclicPrecedenceGraph => write!(f, "the precedence graph has cycles"),
        }
    }
}

impl Error for BuildError {}

/// An error that prevents parsing from starting.
///
/// A string that is parsed but rejected is not an error; it shows up as the
/// final row of the trace instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Parsing was requested before a successful build.
    NotBuilt,
    /// The input contains nonterminals.
    NonterminalInInput(Vec<String>),
    /// The input contains symbols that no rule mentions.
    UnknownTerminalInInput(Vec<String>),
    /// The same symbol appears twice in a row.
    RepeatedAdjacentSymbol(String),
    /// The input is empty.
    EmptyInput,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ParseError::NotBuilt => write!(f, "the parser has not been built yet"),
            ParseError::NonterminalInInput(ref symbols) => write!(
                f,
                "the following symbols are nonterminals: {}",
                quoted_list(symbols)
            ),
            ParseError::UnknownTerminalInInput(ref symbols) => write!(
                f,
                "the following symbols are not terminals of the grammar: {}",
                quoted_list(symbols)
            ),
            // Names the repeated symbol on both sides of the comparison.
            ParseError::RepeatedAdjacentSymbol(ref symbol) => {
                write!(f, "\"{}\" is not comparable with \"{}\"", symbol, symbol)
            }
            ParseError::EmptyInput => write!(f, "\"$\" is not comparable with \"$\""),
        }
    }
}

impl Error for ParseError {}

/// An error in a raw command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// A command is missing its argument.
    MissingArgument {
        /// The command keyword.
        command: &'static str,
        /// The name of the missing argument.
        argument: &'static str,
    },
    /// A command has the wrong number of arguments.
    WrongArity(&'static str),
    /// The line does not start with a known command.
    Unknown(String),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            CommandError::MissingArgument { command, argument } => write!(
                f,
                "missing argument <{}> for the {} command",
                argument, command
            ),
            CommandError::WrongArity(command) => {
                write!(f, "wrong arguments for the {} command", command)
            }
            CommandError::Unknown(ref line) => write!(f, "unrecognized command: {}", line),
        }
    }
}

impl Error for CommandError {}

/// Any error a command can produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandFailure {
    /// The command line itself is malformed.
    Command(CommandError),
    /// The grammar or a relation was refused.
    Grammar(GrammarError),
    /// The parser could not be built.
    Build(BuildError),
    /// The input could not be parsed.
    Parse(ParseError),
}

impl fmt::Display for CommandFailure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            CommandFailure::Command(ref e) => write!(f, "{}", e),
            CommandFailure::Grammar(ref e) => write!(f, "{}", e),
            CommandFailure::Build(ref e) => write!(f, "{}", e),
            CommandFailure::Parse(ref e) => write!(f, "{}", e),
        }
    }
}

impl Error for CommandFailure {
    fn source(&self) -> Option<&(Error + 'static)> {
        match *self {
            CommandFailure::Command(ref e) => Some(e),
            CommandFailure::Grammar(ref e) => Some(e),
            CommandFailure::Build(ref e) => Some(e),
            CommandFailure::Parse(ref e) => Some(e),
        }
    }
}

impl From<CommandError> for CommandFailure {
    fn from(e: CommandError) -> CommandFailure {
        CommandFailure::Command(e)
    }
}

impl From<GrammarError> for CommandFailure {
    fn from(e: GrammarError) -> CommandFailure {
        CommandFailure::Grammar(e)
    }
}

impl From<BuildError> for CommandFailure {
    fn from(e: BuildError) -> CommandFailure {
        CommandFailure::Build(e)
    }
}

impl From<ParseError> for CommandFailure {
    fn from(e: ParseError) -> CommandFailure {
        CommandFailure::Parse(e)
    }
}

fn quoted_list(symbols: &[String]) -> String {
    symbols
        .iter()
        .map(|s| format!("\"{}\"", s))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            GrammarError::NotOperatorGrammar {
                lhs: "E".into(),
                rhs: vec!["E".into(), "E".into()],
            }.to_string(),
            "\"E -> E E\" is not an operator grammar"
        );
        assert_eq!(
            ParseError::NonterminalInInput(vec!["A".into(), "B".into()]).to_string(),
            "the following symbols are nonterminals: \"A\", \"B\""
        );
        assert_eq!(
            ParseError::RepeatedAdjacentSymbol("n".into()).to_string(),
            "\"n\" is not comparable with \"n\""
        );
    }

    #[test]
    fn failure_wraps_source() {
        let failure = CommandFailure::from(BuildError::CyclicPrecedenceGraph);
        assert_eq!(failure.to_string(), "the precedence graph has cycles");
        assert!(failure.source().is_some());
    }
}
