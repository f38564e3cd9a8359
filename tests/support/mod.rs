// Copyright (c) 2018 Fabian Schuiki
#![allow(dead_code)]

use std::collections::BTreeSet;
use stderrlog;

use firstfollow::{Analyzer, Config};

/// Route the crate's log output to stderr. Only the first call installs the
/// logger; later calls are no-ops.
pub fn init_logging() {
    let _ = stderrlog::new()
        .module("firstfollow")
        .verbosity(4)
        .init();
}

pub fn analyze(rules: Vec<(&str, Vec<&str>)>, terminals: Vec<&str>, config: &Config) -> Analyzer {
    init_logging();
    match Analyzer::from_rules(rules, terminals, config) {
        Ok(an) => an,
        Err(err) => panic!("invalid grammar: {}", err),
    }
}

pub fn set(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|s| s.to_string()).collect()
}

pub fn first(an: &Analyzer, name: &str) -> BTreeSet<String> {
    let g = an.grammar();
    an.first_of(name)
        .unwrap()
        .symbols()
        .map(|s| g.symbol_name(s).to_string())
        .collect()
}

pub fn follow(an: &Analyzer, name: &str) -> BTreeSet<String> {
    let g = an.grammar();
    an.follow_of(name)
        .unwrap()
        .symbols()
        .map(|s| g.symbol_name(s).to_string())
        .collect()
}

/// Rules `S -> B b | C d`, `B -> a B | o | D a`, `D -> z`, `C -> c C | o`.
pub fn letters() -> (Vec<(&'static str, Vec<&'static str>)>, Vec<&'static str>) {
    (
        vec![
            ("S", vec!["B", "b"]),
            ("S", vec!["C", "d"]),
            ("B", vec!["a", "B"]),
            ("B", vec!["o"]),
            ("B", vec!["D", "a"]),
            ("D", vec!["z"]),
            ("C", vec!["c", "C"]),
            ("C", vec!["o"]),
        ],
        vec!["a", "b", "c", "d", "o", "z"],
    )
}

/// Rules `S -> E`, `E -> T | ( E )`, `T -> n | + T | T + T`.
pub fn parens() -> (Vec<(&'static str, Vec<&'static str>)>, Vec<&'static str>) {
    (
        vec![
            ("S", vec!["E"]),
            ("E", vec!["T"]),
            ("E", vec!["(", "E", ")"]),
            ("T", vec!["n"]),
            ("T", vec!["+", "T"]),
            ("T", vec!["T", "+", "T"]),
        ],
        vec!["(", ")", "n", "+"],
    )
}

/// The classic left-recursive expression grammar.
pub fn arith() -> (Vec<(&'static str, Vec<&'static str>)>, Vec<&'static str>) {
    (
        vec![
            ("E", vec!["E", "+", "T"]),
            ("E", vec!["T"]),
            ("T", vec!["T", "*", "F"]),
            ("T", vec!["F"]),
            ("F", vec!["(", "E", ")"]),
            ("F", vec!["id"]),
        ],
        vec!["+", "*", "(", ")", "id"],
    )
}

/// Rules `S -> X`, `X -> a | epsilon`.
pub fn optional() -> (Vec<(&'static str, Vec<&'static str>)>, Vec<&'static str>) {
    (
        vec![("S", vec!["X"]), ("X", vec!["a"]), ("X", vec!["epsilon"])],
        vec!["a"],
    )
}

/// An ambiguous binary operator grammar.
pub fn operators() -> (Vec<(&'static str, Vec<&'static str>)>, Vec<&'static str>) {
    (
        vec![
            ("module", vec!["expr"]),
            ("expr", vec!["expr", "ADD", "expr"]),
            ("expr", vec!["expr", "SUB", "expr"]),
            ("expr", vec!["expr", "MUL", "expr"]),
            ("expr", vec!["expr", "DIV", "expr"]),
            ("expr", vec!["NAME"]),
            ("expr", vec!["INT"]),
        ],
        vec!["ADD", "SUB", "MUL", "DIV", "NAME", "INT"],
    )
}

/// A grammar with nullable chains, mutual recursion and a nullable trailer.
pub fn nullable_mix() -> (Vec<(&'static str, Vec<&'static str>)>, Vec<&'static str>) {
    (
        vec![
            ("S", vec!["A", "B", "s"]),
            ("S", vec!["C"]),
            ("A", vec!["B", "A", "a"]),
            ("A", vec!["epsilon"]),
            ("B", vec!["C", "b"]),
            ("B", vec!["epsilon"]),
            ("C", vec!["A", "B"]),
            ("C", vec!["c"]),
        ],
        vec!["a", "b", "c", "s"],
    )
}

/// All test grammars.
pub fn all() -> Vec<(Vec<(&'static str, Vec<&'static str>)>, Vec<&'static str>)> {
    vec![
        letters(),
        parens(),
        arith(),
        optional(),
        operators(),
        nullable_mix(),
    ]
}
