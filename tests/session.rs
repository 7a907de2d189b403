// Copyright (c) 2018 Fabian Schuiki

extern crate oprec;

use oprec::errors::{BuildError, GrammarError, ParseError};
use oprec::machine::Action;
use oprec::Session;

const ARITH_RELATIONS: &[(&str, &str, &str)] = &[
    ("n", ">", "+"),
    ("n", ">", "*"),
    ("n", ">", "$"),
    ("+", "<", "n"),
    ("+", ">", "+"),
    ("+", "<", "*"),
    ("+", ">", "$"),
    ("*", "<", "n"),
    ("*", ">", "+"),
    ("*", ">", "*"),
    ("*", ">", "$"),
    ("$", "<", "n"),
    ("$", "<", "+"),
    ("$", "<", "*"),
];

fn arith() -> Session {
    let mut s = Session::new();
    s.add_rule("E", &["E", "+", "E"]).unwrap();
    s.add_rule("E", &["E", "*", "E"]).unwrap();
    s.add_rule("E", &["n"]).unwrap();
    s.set_initial("E").unwrap();
    for &(a, op, b) in ARITH_RELATIONS {
        s.add_relation(a, op, b).unwrap();
    }
    s.build().unwrap();
    s
}

fn tokens(input: &str) -> Vec<&str> {
    input.split_whitespace().collect()
}

#[test]
fn arithmetic_build() {
    let mut s = arith();
    let table = s.build().unwrap();
    assert_eq!(
        table.to_string(),
        "f values:\nn: 4\n+: 2\n*: 4\n$: 0\ng values:\nn: 5\n+: 1\n*: 3\n$: 0"
    );
}

#[test]
fn arithmetic_accepts() {
    let s = arith();
    let trace = s.parse(&tokens("n + n * n")).unwrap();
    assert!(trace.is_accepted());
    assert_eq!(trace.verdict(), Some(Action::Accept));

    let text = trace.pretty(s.grammar()).to_string();
    let last = text.lines().last().unwrap();
    assert!(last.starts_with("E "));
    assert!(last.ends_with("accept"));
}

#[test]
fn arithmetic_rejects_adjacent_operators() {
    let s = arith();
    let trace = s.parse(&tokens("n + * n")).unwrap();
    assert!(!trace.is_accepted());
    let text = trace.pretty(s.grammar()).to_string();
    assert!(text
        .lines()
        .last()
        .unwrap()
        .ends_with("reject, cannot reduce by E -> E + E"));
}

#[test]
fn longer_expressions() {
    let s = arith();
    for input in &["n * n + n", "n + n + n", "n * n * n + n * n"] {
        assert!(s.parse(&tokens(input)).unwrap().is_accepted(), "{}", input);
    }
    for input in &["n +", "+ n", "n * + n"] {
        assert!(!s.parse(&tokens(input)).unwrap().is_accepted(), "{}", input);
    }
}

#[test]
fn input_validation() {
    let s = arith();
    assert_eq!(
        s.parse(&tokens("a + b * c")),
        Err(ParseError::UnknownTerminalInInput(vec![
            "a".into(),
            "b".into(),
            "c".into(),
        ]))
    );
    assert_eq!(
        s.parse(&tokens("E + n")),
        Err(ParseError::NonterminalInInput(vec!["E".into()]))
    );
    assert_eq!(
        s.parse(&tokens("n n")),
        Err(ParseError::RepeatedAdjacentSymbol("n".into()))
    );
    assert_eq!(s.parse(&tokens("")), Err(ParseError::EmptyInput));
}

#[test]
fn empty_session_builds() {
    let mut s = Session::new();
    assert!(s.build().unwrap().is_empty());
    assert_eq!(
        s.parse(&["n"]),
        Err(ParseError::UnknownTerminalInInput(vec!["n".into()]))
    );
}

#[test]
fn grammar_errors_leave_no_trace() {
    let mut s = Session::new();
    assert_eq!(
        s.add_rule("e", &["n"]),
        Err(GrammarError::NotANonterminal("e".into()))
    );
    assert_eq!(
        s.add_rule("E", &["E", "E"]),
        Err(GrammarError::NotOperatorGrammar {
            lhs: "E".into(),
            rhs: vec!["E".into(), "E".into()],
        })
    );
    assert_eq!(
        s.add_rule("E", &["n", "$", "+"]).unwrap_err().to_string(),
        "\"E -> n $ +\" is not an operator grammar"
    );
    assert_eq!(s.grammar().rules().count(), 0);
    assert_eq!(s.grammar().terminals().count(), 0);
    assert_eq!(
        s.set_initial("E"),
        Err(GrammarError::UnknownNonterminal("E".into()))
    );
}

#[test]
fn duplicate_rules_are_kept() {
    let mut s = Session::new();
    s.add_rule("E", &["n"]).unwrap();
    s.add_rule("E", &["n"]).unwrap();
    assert_eq!(s.grammar().rules().count(), 2);
}

#[test]
fn cyclic_relations_refuse_to_build() {
    let mut s = Session::new();
    s.add_rule("E", &["a", "E", "b"]).unwrap();
    s.add_relation("a", ">", "b").unwrap();
    s.add_relation("a", "<", "b").unwrap();
    assert_eq!(s.build(), Err(BuildError::CyclicPrecedenceGraph));
    assert_eq!(s.parse(&["a"]), Err(ParseError::NotBuilt));
}

#[test]
fn relations_added_after_build_are_used() {
    let mut s = Session::new();
    s.add_rule("E", &["n"]).unwrap();
    s.build().unwrap();
    assert!(!s.parse(&["n"]).unwrap().is_accepted());

    s.add_relation("$", "<", "n").unwrap();
    s.add_relation("n", ">", "$").unwrap();
    assert!(s.parse(&["n"]).unwrap().is_accepted());
}
