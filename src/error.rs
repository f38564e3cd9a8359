// Copyright (c) 2018 Fabian Schuiki

//! Errors raised while building a grammar or querying its sets.

use std;
use std::fmt;

/// An error in a grammar or in a query against its analysis.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Error {
    /// The grammar has no rules, so there is no start symbol.
    EmptyGrammar,
    /// A rule has no symbols at all. Empty derivations are spelled `epsilon`.
    EmptyProduction {
        /// The left-hand side of the offending rule.
        nonterminal: String,
    },
    /// A reserved marker name was declared as a terminal, used as the
    /// left-hand side of a rule, or (for the end marker) used in a body.
    ReservedSymbol {
        /// The reserved name.
        name: String,
    },
    /// A declared terminal also appears as the left-hand side of a rule.
    TerminalOnLeftSide {
        /// The conflicting name.
        name: String,
    },
    /// A rule body references a symbol that is neither a declared terminal
    /// nor a nonterminal.
    UndeclaredSymbol {
        /// The left-hand side of the rule containing the symbol.
        nonterminal: String,
        /// The undeclared symbol.
        symbol: String,
    },
    /// A query named a symbol the grammar does not know.
    UnknownSymbol {
        /// The name that was looked up.
        name: String,
    },
    /// FOLLOW was requested for something other than a nonterminal.
    NotANonterminal {
        /// The name of the queried symbol.
        name: String,
    },
    /// FIRST was requested for the end marker.
    EndMarkerQuery,
}

/// A result with the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::EmptyGrammar => write!(f, "grammar has no rules"),
            Error::EmptyProduction { ref nonterminal } => write!(
                f,
                "rule for `{}` has no symbols; use `epsilon` for an empty production",
                nonterminal
            ),
            Error::ReservedSymbol { ref name } => {
                write!(f, "`{}` is a reserved marker and cannot be used here", name)
            }
            Error::TerminalOnLeftSide { ref name } => write!(
                f,
                "`{}` is declared as a terminal but has rules of its own",
                name
            ),
            Error::UndeclaredSymbol {
                ref nonterminal,
                ref symbol,
            } => write!(
                f,
                "rule for `{}` references undeclared symbol `{}`",
                nonterminal, symbol
            ),
            Error::UnknownSymbol { ref name } => write!(f, "unknown symbol `{}`", name),
            Error::NotANonterminal { ref name } => {
                write!(f, "FOLLOW is only defined for nonterminals, not `{}`", name)
            }
            Error::EndMarkerQuery => write!(f, "the end marker has no FIRST set"),
        }
    }
}

impl std::error::Error for Error {}
