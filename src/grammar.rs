// Copyright (c) 2018 Fabian Schuiki

//! Data structures representing a grammar.

use std;
use std::fmt;
use indexmap::IndexSet;

use Pretty;
use config::{Config, Validation};
use error::{Error, Result};

/// The reserved name of the empty string marker.
pub const EPSILON: &str = "epsilon";

/// The reserved name of the end of input marker.
pub const END: &str = "$";

/// A grammar.
///
/// Built once from a list of rules and a set of terminals, and immutable
/// thereafter. Nonterminals are the left-hand sides of the rules, in order of
/// first appearance. The start symbol is the left-hand side of the first rule.
#[derive(Debug, Clone)]
pub struct Grammar {
    rules: Vec<Rule>,
    nonterms: IndexSet<String>,
    terms: IndexSet<String>,
    nonterm_rules: Vec<Vec<RuleId>>,
}

/// A single rule within a grammar.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rule {
    name: NonterminalId,
    symbols: Vec<Symbol>,
}

/// A symbol of a production.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
    /// A terminal.
    Terminal(TerminalId),
    /// A nonterminal.
    Nonterminal(NonterminalId),
    /// The empty string.
    Epsilon,
    /// The end of input. Only ever appears in FOLLOW sets.
    End,
}

/// A unique nonterminal identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NonterminalId(usize);

/// A unique terminal identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TerminalId(usize);

/// A unique rule identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RuleId(usize);

/// An iterator over the rules of a grammar.
pub type RulesIter<'a> = std::slice::Iter<'a, Rule>;

/// An iterator over the rules of a single nonterminal, in declaration order.
pub struct Productions<'a> {
    grammar: &'a Grammar,
    ids: std::slice::Iter<'a, RuleId>,
}

impl<'a> Iterator for Productions<'a> {
    type Item = &'a Rule;

    fn next(&mut self) -> Option<Self::Item> {
        let grammar = self.grammar;
        self.ids.next().map(|&id| grammar.rule(id))
    }
}

impl Grammar {
    /// Create a grammar with the default configuration.
    ///
    /// Each rule is a pair of a left-hand nonterminal and the sequence of
    /// symbols it produces. Use [`EPSILON`] as the sole symbol of an empty
    /// production.
    pub fn new<R, T, S>(rules: R, terminals: T) -> Result<Grammar>
    where
        R: IntoIterator<Item = (S, Vec<S>)>,
        T: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Grammar::with_config(rules, terminals, &Config::default())
    }

    /// Create a grammar, validating rule bodies as configured.
    pub fn with_config<R, T, S>(rules: R, terminals: T, config: &Config) -> Result<Grammar>
    where
        R: IntoIterator<Item = (S, Vec<S>)>,
        T: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rules: Vec<(String, Vec<String>)> = rules
            .into_iter()
            .map(|(name, symbols)| {
                let symbols: Vec<String> = symbols.into_iter().map(Into::into).collect();
                (name.into(), symbols)
            })
            .collect();
        if rules.is_empty() {
            return Err(Error::EmptyGrammar);
        }

        let mut grammar = Grammar {
            rules: Vec::with_capacity(rules.len()),
            nonterms: IndexSet::new(),
            terms: IndexSet::new(),
            nonterm_rules: Vec::new(),
        };

        // Declare the terminals.
        for name in terminals {
            let name: String = name.into();
            check_reserved(&name)?;
            grammar.terms.insert(name);
        }

        // Declare the nonterminals in order of first appearance.
        for &(ref name, _) in &rules {
            check_reserved(name)?;
            if grammar.terms.contains(name) {
                return Err(Error::TerminalOnLeftSide { name: name.clone() });
            }
            if grammar.nonterms.insert(name.clone()) {
                grammar.nonterm_rules.push(Vec::new());
            }
        }

        // Resolve the rule bodies.
        for (name, body) in rules {
            if body.is_empty() {
                return Err(Error::EmptyProduction { nonterminal: name });
            }
            let lhs = grammar.nonterminal_id(&name)?;
            let mut symbols = Vec::with_capacity(body.len());
            for symbol in body {
                symbols.push(grammar.resolve(&name, symbol, config.validation)?);
            }
            grammar.add_rule(Rule::new(lhs, symbols));
        }

        debug!(
            "grammar with {} rules, {} nonterminals, {} terminals",
            grammar.rules.len(),
            grammar.nonterms.len(),
            grammar.terms.len()
        );
        Ok(grammar)
    }

    fn nonterminal_id(&self, name: &str) -> Result<NonterminalId> {
        self.nonterms
            .get_full(name)
            .map(|(index, _)| NonterminalId(index))
            .ok_or_else(|| Error::UnknownSymbol { name: name.into() })
    }

    /// Map a symbol name in the body of a rule for `lhs` to a symbol.
    fn resolve(&mut self, lhs: &str, name: String, validation: Validation) -> Result<Symbol> {
        if name == EPSILON {
            return Ok(Symbol::Epsilon);
        }
        if name == END {
            return Err(Error::ReservedSymbol { name });
        }
        if let Some((index, _)) = self.nonterms.get_full(&name) {
            return Ok(Symbol::Nonterminal(NonterminalId(index)));
        }
        if let Some((index, _)) = self.terms.get_full(&name) {
            return Ok(Symbol::Terminal(TerminalId(index)));
        }
        match validation {
            Validation::Strict => Err(Error::UndeclaredSymbol {
                nonterminal: lhs.into(),
                symbol: name,
            }),
            Validation::Permissive => {
                debug!("treating undeclared `{}` as a terminal", name);
                let (index, _) = self.terms.insert_full(name);
                Ok(Symbol::Terminal(TerminalId(index)))
            }
        }
    }

    fn add_rule(&mut self, rule: Rule) {
        self.nonterm_rules[rule.name().as_usize()].push(RuleId::from_usize(self.rules.len()));
        self.rules.push(rule);
    }

    /// Get the name of a nonterminal.
    pub fn nonterminal_name(&self, id: NonterminalId) -> &str {
        match self.nonterms.get_index(id.as_usize()) {
            Some(name) => name.as_str(),
            None => panic!("nonterminal {:?} is not part of this grammar", id),
        }
    }

    /// Get the name of a terminal.
    pub fn terminal_name(&self, id: TerminalId) -> &str {
        match self.terms.get_index(id.as_usize()) {
            Some(name) => name.as_str(),
            None => panic!("terminal {:?} is not part of this grammar", id),
        }
    }

    /// Get the name of any symbol, including the two markers.
    pub fn symbol_name(&self, symbol: Symbol) -> &str {
        match symbol {
            Symbol::Terminal(id) => self.terminal_name(id),
            Symbol::Nonterminal(id) => self.nonterminal_name(id),
            Symbol::Epsilon => EPSILON,
            Symbol::End => END,
        }
    }

    /// Look up a symbol by name.
    pub fn symbol(&self, name: &str) -> Option<Symbol> {
        if name == EPSILON {
            Some(Symbol::Epsilon)
        } else if name == END {
            Some(Symbol::End)
        } else if let Some((index, _)) = self.nonterms.get_full(name) {
            Some(Symbol::Nonterminal(NonterminalId(index)))
        } else if let Some((index, _)) = self.terms.get_full(name) {
            Some(Symbol::Terminal(TerminalId(index)))
        } else {
            None
        }
    }

    /// The upper bound on nonterminal IDs.
    ///
    /// Basically returns the largest nonterminal ID + 1. Can be used as
    /// capacity for containers that will hold nonterminals.
    pub fn nonterminal_id_bound(&self) -> usize {
        self.nonterms.len()
    }

    /// The upper bound on terminal IDs.
    ///
    /// Basically returns the largest terminal ID + 1. Can be used as capacity
    /// for containers that will hold terminals.
    pub fn terminal_id_bound(&self) -> usize {
        self.terms.len()
    }

    /// The start symbol, i.e. the left-hand side of the first rule.
    pub fn start(&self) -> NonterminalId {
        self.rules[0].name()
    }

    /// Check whether a symbol is a terminal of this grammar.
    ///
    /// The epsilon and end markers are neither terminals nor nonterminals.
    pub fn is_terminal(&self, symbol: Symbol) -> bool {
        match symbol {
            Symbol::Terminal(id) => id.as_usize() < self.terminal_id_bound(),
            _ => false,
        }
    }

    /// Check whether a symbol is a nonterminal of this grammar.
    pub fn is_nonterminal(&self, symbol: Symbol) -> bool {
        match symbol {
            Symbol::Nonterminal(id) => id.as_usize() < self.nonterminal_id_bound(),
            _ => false,
        }
    }

    /// All nonterminals, in order of first appearance.
    pub fn nonterminals(&self) -> impl Iterator<Item = NonterminalId> {
        (0..self.nonterminal_id_bound()).map(NonterminalId)
    }

    /// All terminals, in order of declaration.
    pub fn terminals(&self) -> impl Iterator<Item = TerminalId> {
        (0..self.terminal_id_bound()).map(TerminalId)
    }

    /// The rules in this grammar.
    pub fn rules(&self) -> RulesIter {
        self.rules.iter()
    }

    /// The rules for a specific nonterminal, in declaration order.
    pub fn productions_for(&self, id: NonterminalId) -> Productions {
        Productions {
            grammar: self,
            ids: self.nonterm_rules[id.as_usize()].iter(),
        }
    }

    /// Access a single rule of this grammar.
    pub fn rule(&self, id: RuleId) -> &Rule {
        &self.rules[id.as_usize()]
    }

    /// Get a pretty printer for this grammar.
    pub fn pretty(&self) -> Pretty<&Grammar, &Grammar> {
        Pretty::new(self, self)
    }
}

fn check_reserved(name: &str) -> Result<()> {
    if name == EPSILON || name == END {
        Err(Error::ReservedSymbol { name: name.into() })
    } else {
        Ok(())
    }
}

impl<'a> fmt::Display for Pretty<&'a Grammar, &'a Grammar> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (index, rule) in self.item.rules().enumerate() {
            if index > 0 {
                write!(f, "\n")?;
            }
            write!(f, "{}", rule.pretty(self.ctx))?;
        }
        Ok(())
    }
}

impl Rule {
    /// Create a new rule.
    pub fn new(name: NonterminalId, symbols: Vec<Symbol>) -> Rule {
        Rule {
            name: name,
            symbols: symbols,
        }
    }

    /// The name of this rule.
    pub fn name(&self) -> NonterminalId {
        self.name
    }

    /// The symbols in this production.
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Get a pretty printer for this rule.
    pub fn pretty<'a>(&'a self, grammar: &'a Grammar) -> Pretty<&'a Grammar, &'a Self> {
        Pretty::new(grammar, self)
    }
}

impl<'a> fmt::Display for Pretty<&'a Grammar, &'a Rule> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ->", self.item.name().pretty(self.ctx))?;
        for symbol in self.item.symbols() {
            write!(f, " {}", symbol.pretty(self.ctx))?;
        }
        Ok(())
    }
}

impl Symbol {
    /// Get a pretty printer for this symbol.
    pub fn pretty<'a>(&'a self, grammar: &'a Grammar) -> Pretty<&'a Grammar, &'a Self> {
        Pretty::new(grammar, self)
    }
}

impl From<TerminalId> for Symbol {
    fn from(id: TerminalId) -> Symbol {
        Symbol::Terminal(id)
    }
}

impl From<NonterminalId> for Symbol {
    fn from(id: NonterminalId) -> Symbol {
        Symbol::Nonterminal(id)
    }
}

impl<'a> fmt::Display for Pretty<&'a Grammar, &'a Symbol> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.ctx.symbol_name(*self.item))
    }
}

impl NonterminalId {
    /// Create a nonterminal id from a usize.
    pub fn from_usize(id: usize) -> NonterminalId {
        NonterminalId(id)
    }

    /// Obtain the id as a usize.
    pub fn as_usize(self) -> usize {
        self.0
    }

    /// Get a pretty printer for this nonterminal.
    pub fn pretty(self, grammar: &Grammar) -> Pretty<&Grammar, Self> {
        Pretty::new(grammar, self)
    }
}

impl<'a> fmt::Display for Pretty<&'a Grammar, NonterminalId> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.ctx.nonterminal_name(self.item))
    }
}

impl TerminalId {
    /// Create a terminal id from a usize.
    pub fn from_usize(id: usize) -> TerminalId {
        TerminalId(id)
    }

    /// Obtain the id as a usize.
    pub fn as_usize(self) -> usize {
        self.0
    }

    /// Get a pretty printer for this terminal.
    pub fn pretty(self, grammar: &Grammar) -> Pretty<&Grammar, Self> {
        Pretty::new(grammar, self)
    }
}

impl<'a> fmt::Display for Pretty<&'a Grammar, TerminalId> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.ctx.terminal_name(self.item))
    }
}

impl RuleId {
    /// Create a rule id from a usize.
    pub fn from_usize(id: usize) -> RuleId {
        RuleId(id)
    }

    /// Obtain the id as a usize.
    pub fn as_usize(self) -> usize {
        self.0
    }
}
