// Copyright (c) 2018 Fabian Schuiki

//! FIRST and FOLLOW set analysis for context-free grammars.
//!
//! A [`Grammar`] is built from an ordered list of rules and a set of
//! terminals. An [`Analyzer`] then computes, for every symbol, the terminals
//! that may begin a string derived from it (FIRST), and for every nonterminal
//! the terminals that may immediately follow it (FOLLOW). These sets are the
//! input for predictive parse table construction.
//!
//! ```
//! use firstfollow::{Analyzer, Config};
//!
//! let an = Analyzer::from_rules(
//!     vec![("S", vec!["X"]), ("X", vec!["a"]), ("X", vec!["epsilon"])],
//!     vec!["a"],
//!     &Config::default(),
//! ).unwrap();
//! assert_eq!(format!("{}", an.first_of("S").unwrap().pretty(an.grammar())), "{a, epsilon}");
//! assert_eq!(format!("{}", an.follow_of("X").unwrap().pretty(an.grammar())), "{$}");
//! ```

#![deny(missing_docs)]

extern crate bit_set;
extern crate indexmap;
#[macro_use]
extern crate log;

pub mod analysis;
pub mod config;
pub mod error;
pub mod first;
pub mod follow;
pub mod grammar;

pub use analysis::Analyzer;
pub use config::{Config, Strategy, Validation};
pub use error::{Error, Result};
pub use first::{FirstSet, FirstSets};
pub use follow::{FollowSet, FollowSets};
pub use grammar::{Grammar, NonterminalId, Rule, Symbol, TerminalId};

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
