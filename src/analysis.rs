// Copyright (c) 2018 Fabian Schuiki

//! FIRST and FOLLOW analysis of a grammar.
//!
//! An [`Analyzer`] owns a grammar together with its first and follow sets.
//! The sets are computed once when the analyzer is created; all queries
//! afterwards are read-only.

use std::fmt;

use Pretty;
use config::Config;
use error::{Error, Result};
use first::{FirstSet, FirstSets};
use follow::{FollowSet, FollowSets};
use grammar::{Grammar, NonterminalId, Symbol};

/// A grammar and its first and follow sets.
#[derive(Debug, Clone)]
pub struct Analyzer {
    grammar: Grammar,
    config: Config,
    first: FirstSets,
    follow: FollowSets,
}

impl Analyzer {
    /// Analyze a grammar with the default configuration.
    pub fn new(grammar: Grammar) -> Analyzer {
        Analyzer::with_config(grammar, &Config::default())
    }

    /// Analyze a grammar with the configured strategy.
    pub fn with_config(grammar: Grammar, config: &Config) -> Analyzer {
        debug!("analyzing grammar with {:?}", config.strategy);
        let first = FirstSets::with_strategy(&grammar, config.strategy);
        let follow = FollowSets::with_strategy(&grammar, &first, config.strategy);
        debug!("first sets:\n{}", first.pretty(&grammar));
        debug!("follow sets:\n{}", follow.pretty(&grammar));
        Analyzer {
            grammar: grammar,
            config: *config,
            first: first,
            follow: follow,
        }
    }

    /// Build a grammar from rules and terminals and analyze it.
    pub fn from_rules<R, T, S>(rules: R, terminals: T, config: &Config) -> Result<Analyzer>
    where
        R: IntoIterator<Item = (S, Vec<S>)>,
        T: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let grammar = Grammar::with_config(rules, terminals, config)?;
        Ok(Analyzer::with_config(grammar, config))
    }

    /// The analyzed grammar.
    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// The configuration used for the analysis.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The first sets of all symbols.
    pub fn first_sets(&self) -> &FirstSets {
        &self.first
    }

    /// The follow sets of all nonterminals.
    pub fn follow_sets(&self) -> &FollowSets {
        &self.follow
    }

    /// The first set of a symbol.
    pub fn first(&self, symbol: Symbol) -> Result<&FirstSet> {
        match self.first.get(symbol) {
            Some(set) => Ok(set),
            None if symbol == Symbol::End => Err(Error::EndMarkerQuery),
            None => Err(Error::UnknownSymbol {
                name: format!("{:?}", symbol),
            }),
        }
    }

    /// The follow set of a nonterminal.
    pub fn follow(&self, symbol: Symbol) -> Result<&FollowSet> {
        match symbol {
            Symbol::Nonterminal(_) => self.follow.get(symbol).ok_or_else(|| Error::UnknownSymbol {
                name: format!("{:?}", symbol),
            }),
            _ => Err(self.not_a_nonterminal(symbol)),
        }
    }

    /// The first set of a symbol, looked up by name.
    pub fn first_of(&self, name: &str) -> Result<&FirstSet> {
        let symbol = self.lookup(name)?;
        self.first(symbol)
    }

    /// The follow set of a nonterminal, looked up by name.
    pub fn follow_of(&self, name: &str) -> Result<&FollowSet> {
        let symbol = self.lookup(name)?;
        self.follow(symbol)
    }

    /// The first set of a sequence of symbols.
    pub fn first_of_sequence(&self, symbols: &[Symbol]) -> FirstSet {
        self.first.first_of_sequence(symbols)
    }

    /// Check whether a nonterminal can derive the empty string.
    pub fn nullable(&self, id: NonterminalId) -> bool {
        self.first.nullable(id)
    }

    fn lookup(&self, name: &str) -> Result<Symbol> {
        self.grammar
            .symbol(name)
            .ok_or_else(|| Error::UnknownSymbol { name: name.into() })
    }

    fn not_a_nonterminal(&self, symbol: Symbol) -> Error {
        let name = match symbol {
            Symbol::Terminal(id) if self.grammar.is_terminal(symbol) => {
                self.grammar.terminal_name(id).to_string()
            }
            Symbol::Epsilon | Symbol::End => self.grammar.symbol_name(symbol).to_string(),
            _ => format!("{:?}", symbol),
        };
        Error::NotANonterminal { name: name }
    }

    /// Get a pretty printer for the analysis.
    pub fn pretty(&self) -> Pretty<&Grammar, &Self> {
        Pretty::new(&self.grammar, self)
    }
}

impl<'a> fmt::Display for Pretty<&'a Grammar, &'a Analyzer> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}\n{}",
            self.item.first.pretty(self.ctx),
            self.item.follow.pretty(self.ctx)
        )
    }
}
