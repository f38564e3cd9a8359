// Copyright (c) 2018 Fabian Schuiki
extern crate firstfollow;
extern crate stderrlog;

mod support;

use firstfollow::{Analyzer, Config, Error, Strategy, Validation};
use support::{first, follow, set};

fn guarded() -> Config {
    Config::default().with_strategy(Strategy::Guarded)
}

#[test]
fn left_recursive_nullable() {
    // A -> A b | epsilon derives b, bb, bbb, ...; the guarded expansion cuts
    // the recursion before it can see that A vanishes.
    let rules = vec![("A", vec!["A", "b"]), ("A", vec!["epsilon"])];

    let fixed = support::analyze(rules.clone(), vec!["b"], &Config::default());
    assert_eq!(first(&fixed, "A"), set(&["b", "epsilon"]));
    assert_eq!(follow(&fixed, "A"), set(&["$", "b"]));

    let dfs = support::analyze(rules, vec!["b"], &guarded());
    assert_eq!(first(&dfs, "A"), set(&["epsilon"]));
    assert_eq!(follow(&dfs, "A"), set(&["$", "b"]));
}

#[test]
fn mutually_dependent_follow_sets() {
    // FOLLOW(A) and FOLLOW(B) each include the other. The guarded expansion
    // settles B while A is still in progress and never revisits it.
    let rules = vec![
        ("A", vec!["x", "B"]),
        ("B", vec!["y", "A"]),
        ("B", vec!["z"]),
    ];

    let fixed = support::analyze(rules.clone(), vec!["x", "y", "z"], &Config::default());
    assert_eq!(follow(&fixed, "A"), set(&["$"]));
    assert_eq!(follow(&fixed, "B"), set(&["$"]));

    let dfs = support::analyze(rules, vec!["x", "y", "z"], &guarded());
    assert_eq!(follow(&dfs, "A"), set(&["$"]));
    assert_eq!(follow(&dfs, "B"), set(&[]));
}

#[test]
fn classic_treats_unknown_symbols_as_terminals() {
    let (rules, _) = support::arith();
    let an = support::analyze(rules, vec![], &Config::classic());
    let g = an.grammar();
    for name in &["+", "*", "(", ")", "id"] {
        assert!(g.is_terminal(g.symbol(name).unwrap()));
    }
    assert_eq!(first(&an, "E"), set(&["id", "("]));
    assert_eq!(follow(&an, "T"), set(&["$", "+", ")", "*"]));
}

#[test]
fn classic_operators() {
    let (rules, _) = support::operators();
    let an = support::analyze(rules, vec![], &Config::classic());
    assert_eq!(first(&an, "expr"), set(&["NAME", "INT"]));
    assert_eq!(first(&an, "module"), set(&["NAME", "INT"]));
    assert_eq!(
        follow(&an, "expr"),
        set(&["ADD", "SUB", "MUL", "DIV", "$"])
    );
    assert_eq!(follow(&an, "module"), set(&["$"]));
}

#[test]
fn strict_validation_catches_typos() {
    let result = Analyzer::from_rules(
        vec![("S", vec!["a", "S"]), ("S", vec!["B"])],
        vec!["a"],
        &guarded(),
    );
    assert_eq!(
        result.unwrap_err(),
        Error::UndeclaredSymbol {
            nonterminal: "S".into(),
            symbol: "B".into(),
        }
    );

    let permissive = guarded().with_validation(Validation::Permissive);
    let an = Analyzer::from_rules(
        vec![("S", vec!["a", "S"]), ("S", vec!["B"])],
        vec!["a"],
        &permissive,
    ).unwrap();
    assert_eq!(first(&an, "S"), set(&["a", "B"]));
}
