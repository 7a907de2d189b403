// Copyright (c) 2018 Fabian Schuiki

//! The line-oriented command language of the interactive tool.
//!
//! Every line holds one command. The keyword is matched case-insensitively
//! and the arguments are separated by whitespace:
//!
//! ```text
//! RULE E E + E
//! INIT E
//! PREC n > +
//! BUILD
//! PARSE n + n
//! EXIT
//! ```

use errors::{CommandError, CommandFailure};
use precedence::Relation;
use session::Session;

/// A command of the interactive tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add the rule `lhs -> rhs`.
    Rule {
        /// The nonterminal being defined.
        lhs: String,
        /// The symbols of the alternative.
        rhs: Vec<String>,
    },
    /// Make a nonterminal the initial symbol.
    Init(String),
    /// Relate the precedence of two terminals.
    Prec(String, String, String),
    /// Build the parser.
    Build,
    /// Parse a token sequence.
    Parse(Vec<String>),
    /// Leave the tool.
    Exit,
}

/// Parse a single line into a command.
///
/// Returns `Ok(None)` for lines that contain only whitespace.
pub fn parse_line(line: &str) -> Result<Option<Command>, CommandError> {
    let mut parts = line.split_whitespace();
    let keyword = match parts.next() {
        Some(k) => k.to_uppercase(),
        None => return Ok(None),
    };
    let args: Vec<String> = parts.map(String::from).collect();

    let cmd = match keyword.as_str() {
        "RULE" => {
            let mut args = args.into_iter();
            match args.next() {
                Some(lhs) => Command::Rule {
                    lhs,
                    rhs: args.collect(),
                },
                None => return Err(missing("RULE", "nonterminal")),
            }
        }
        "INIT" => match args.len() {
            0 => return Err(missing("INIT", "nonterminal")),
            1 => Command::Init(args[0].clone()),
            _ => return Err(CommandError::WrongArity("INIT")),
        },
        "PREC" => {
            if args.len() != 3 {
                return Err(CommandError::WrongArity("PREC"));
            }
            Command::Prec(args[0].clone(), args[1].clone(), args[2].clone())
        }
        "BUILD" if args.is_empty() => Command::Build,
        "BUILD" => return Err(CommandError::WrongArity("BUILD")),
        "PARSE" if args.is_empty() => return Err(missing("PARSE", "string")),
        "PARSE" => Command::Parse(args),
        "EXIT" if args.is_empty() => Command::Exit,
        "EXIT" => return Err(CommandError::WrongArity("EXIT")),
        _ => return Err(CommandError::Unknown(line.trim().to_owned())),
    };
    Ok(Some(cmd))
}

fn missing(command: &'static str, argument: &'static str) -> CommandError {
    CommandError::MissingArgument { command, argument }
}

impl Command {
    /// Whether this command ends the session.
    pub fn is_exit(&self) -> bool {
        *self == Command::Exit
    }

    /// Run the command against a session.
    ///
    /// Returns the text to report to the user. Failures leave the session
    /// untouched.
    pub fn execute(&self, session: &mut Session) -> Result<String, CommandFailure> {
        match *self {
            Command::Rule { ref lhs, ref rhs } => {
                let id = session.add_rule(lhs, &rhs[..])?;
                Ok(format!(
                    "Rule \"{}\" added to the grammar",
                    id.pretty(session.grammar())
                ))
            }
            Command::Init(ref name) => {
                session.set_initial(name)?;
                Ok(format!("\"{}\" is now the initial symbol", name))
            }
            Command::Prec(ref t1, ref op, ref t2) => {
                let relation = session.add_relation(t1, op, t2)?;
                let phrase = match relation {
                    Relation::Less => "lower precedence than",
                    Relation::Equal => "the same precedence as",
                    Relation::Greater => "greater precedence than",
                };
                Ok(format!("\"{}\" has {} \"{}\"", t1, phrase, t2))
            }
            Command::Build => {
                let table = session.build()?;
                Ok(format!("Parser built\n{}", table))
            }
            Command::Parse(ref tokens) => {
                let trace = session.parse(&tokens[..])?;
                Ok(format!("{}", trace.pretty(session.grammar())))
            }
            Command::Exit => Ok(String::from("Exiting")),
        }
    }
}

/// Parse and execute a single line.
///
/// Returns `Ok(None)` for blank lines.
pub fn run_line(line: &str, session: &mut Session) -> Result<Option<(Command, String)>, CommandFailure> {
    let cmd = match parse_line(line)? {
        Some(cmd) => cmd,
        None => return Ok(None),
    };
    let output = cmd.execute(session)?;
    Ok(Some((cmd, output)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use errors::{GrammarError, ParseError};

    #[test]
    fn keywords_ignore_case() {
        assert_eq!(parse_line("build"), Ok(Some(Command::Build)));
        assert_eq!(parse_line("  Exit  "), Ok(Some(Command::Exit)));
        assert_eq!(
            parse_line("rule E E + E"),
            Ok(Some(Command::Rule {
                lhs: "E".into(),
                rhs: vec!["E".into(), "+".into(), "E".into()],
            }))
        );
    }

    #[test]
    fn blank_lines() {
        assert_eq!(parse_line(""), Ok(None));
        assert_eq!(parse_line(" \t "), Ok(None));
    }

    #[test]
    fn malformed_lines() {
        assert_eq!(
            parse_line("RULE"),
            Err(CommandError::MissingArgument {
                command: "RULE",
                argument: "nonterminal",
            })
        );
        assert_eq!(
            parse_line("INIT"),
            Err(CommandError::MissingArgument {
                command: "INIT",
                argument: "nonterminal",
            })
        );
        assert_eq!(parse_line("INIT E F"), Err(CommandError::WrongArity("INIT")));
        assert_eq!(parse_line("PREC n >"), Err(CommandError::WrongArity("PREC")));
        assert_eq!(
            parse_line("PARSE"),
            Err(CommandError::MissingArgument {
                command: "PARSE",
                argument: "string",
            })
        );
        assert_eq!(
            parse_line("frobnicate now "),
            Err(CommandError::Unknown("frobnicate now".into()))
        );
    }

    #[test]
    fn rule_without_symbols_reaches_the_grammar() {
        let mut s = Session::new();
        assert_eq!(
            run_line("RULE E", &mut s),
            Err(CommandFailure::Grammar(GrammarError::EmptyRightHandSide("E".into())))
        );
    }

    #[test]
    fn messages() {
        let mut s = Session::new();
        let out = |line: &str, s: &mut Session| run_line(line, s).unwrap().unwrap().1;
        assert_eq!(out("RULE E E + E", &mut s), "Rule \"E -> E + E\" added to the grammar");
        assert_eq!(out("INIT E", &mut s), "\"E\" is now the initial symbol");
        assert_eq!(out("PREC + > +", &mut s), "\"+\" has greater precedence than \"+\"");
        assert_eq!(out("PREC $ < +", &mut s), "\"$\" has lower precedence than \"+\"");
        assert_eq!(out("PREC + = $", &mut s), "\"+\" has the same precedence as \"$\"");
        assert_eq!(
            out("BUILD", &mut s),
            "Parser built\nf values:\n+: 2\n$: 0\ng values:\n+: 1\n$: 0"
        );
        assert_eq!(out("EXIT", &mut s), "Exiting");
    }

    #[test]
    fn parse_before_build() {
        let mut s = Session::new();
        run_line("RULE E n", &mut s).unwrap();
        assert_eq!(
            run_line("PARSE n", &mut s),
            Err(CommandFailure::Parse(ParseError::NotBuilt))
        );
    }

    #[test]
    fn exit() {
        assert!(Command::Exit.is_exit());
        assert!(!Command::Build.is_exit());
    }
}
