// Copyright (c) 2018 Fabian Schuiki

//! First set computation.
//!
//! This module implements computation of the first sets for a grammar. The
//! first set of a symbol states all terminals that can appear as the first
//! symbol of a string derived from it, plus epsilon if the symbol can derive
//! the empty string. Since rules may contain other rules and epsilon items,
//! computation is somewhat tricky.

use std::fmt;
use std::mem::swap;
use std::iter::repeat;
use bit_set::BitSet;

use Pretty;
use config::Strategy;
use grammar::{Grammar, NonterminalId, Symbol, TerminalId};

/// All first sets of a grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirstSets {
    nonterms: Vec<FirstSet>,
    terms: Vec<FirstSet>,
    epsilon: FirstSet,
}

/// The first set of a symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FirstSet {
    /// The first terminals.
    pub(crate) symbols: BitSet,
    /// Whether the empty string can be derived.
    pub(crate) has_epsilon: bool,
}

impl FirstSets {
    /// Compute the first sets of a grammar.
    pub fn compute(grammar: &Grammar) -> FirstSets {
        compute(grammar)
    }

    /// Compute the first sets of a grammar by guarded recursive expansion.
    pub fn compute_guarded(grammar: &Grammar) -> FirstSets {
        compute_guarded(grammar)
    }

    /// Compute the first sets of a grammar with the given strategy.
    pub fn with_strategy(grammar: &Grammar, strategy: Strategy) -> FirstSets {
        match strategy {
            Strategy::FixedPoint => compute(grammar),
            Strategy::Guarded => compute_guarded(grammar),
        }
    }

    /// Create the initial sets, with all nonterminals empty.
    fn empty(grammar: &Grammar) -> FirstSets {
        FirstSets {
            nonterms: repeat(FirstSet::new())
                .take(grammar.nonterminal_id_bound())
                .collect(),
            terms: grammar.terminals().map(FirstSet::terminal).collect(),
            epsilon: FirstSet::epsilon(),
        }
    }

    /// The first set of a symbol.
    ///
    /// Returns `None` for the end marker and for symbols outside the grammar.
    pub fn get(&self, symbol: Symbol) -> Option<&FirstSet> {
        match symbol {
            Symbol::Terminal(id) => self.terms.get(id.as_usize()),
            Symbol::Nonterminal(id) => self.nonterms.get(id.as_usize()),
            Symbol::Epsilon => Some(&self.epsilon),
            Symbol::End => None,
        }
    }

    /// The first set of a nonterminal.
    pub fn nonterminal(&self, id: NonterminalId) -> &FirstSet {
        &self.nonterms[id.as_usize()]
    }

    /// Check whether a nonterminal can derive the empty string.
    pub fn nullable(&self, id: NonterminalId) -> bool {
        self.nonterms[id.as_usize()].has_epsilon
    }

    /// Compute the first set of a sequence of symbols.
    ///
    /// The empty sequence and sequences of nullable symbols yield a set
    /// containing epsilon.
    pub fn first_of_sequence(&self, symbols: &[Symbol]) -> FirstSet {
        let mut result = FirstSet::new();
        let tight = collect_symbols(symbols, &mut |symbol: Symbol| match symbol {
            Symbol::Terminal(id) => {
                result.symbols.insert(id.as_usize());
                true
            }
            Symbol::Nonterminal(id) => {
                let first = &self.nonterms[id.as_usize()];
                result.symbols.union_with(&first.symbols);
                !first.has_epsilon
            }
            Symbol::Epsilon => false,
            Symbol::End => true,
        });
        result.has_epsilon = !tight;
        result
    }

    /// Get a pretty printer for these first sets.
    pub fn pretty<'a>(&'a self, grammar: &'a Grammar) -> Pretty<&'a Grammar, &'a Self> {
        Pretty::new(grammar, self)
    }
}

impl<'a> fmt::Display for Pretty<&'a Grammar, &'a FirstSets> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for id in self.ctx.nonterminals() {
            if id.as_usize() > 0 {
                write!(f, "\n")?;
            }
            write!(
                f,
                "FIRST({}) = {}",
                id.pretty(self.ctx),
                self.item.nonterminal(id).pretty(self.ctx)
            )?;
        }
        Ok(())
    }
}

impl FirstSet {
    /// Create an empty first set.
    pub fn new() -> FirstSet {
        FirstSet {
            symbols: BitSet::new(),
            has_epsilon: false,
        }
    }

    /// Create the first set of a terminal.
    pub fn terminal(id: TerminalId) -> FirstSet {
        let mut set = FirstSet::new();
        set.symbols.insert(id.as_usize());
        set
    }

    /// Create the first set of the empty string.
    pub fn epsilon() -> FirstSet {
        FirstSet {
            symbols: BitSet::new(),
            has_epsilon: true,
        }
    }

    /// Whether the set contains epsilon.
    pub fn has_epsilon(&self) -> bool {
        self.has_epsilon
    }

    /// Whether the set contains a symbol.
    pub fn contains(&self, symbol: Symbol) -> bool {
        match symbol {
            Symbol::Terminal(id) => self.symbols.contains(id.as_usize()),
            Symbol::Epsilon => self.has_epsilon,
            _ => false,
        }
    }

    /// The terminals in the set, in declaration order.
    pub fn terminals<'a>(&'a self) -> impl Iterator<Item = TerminalId> + 'a {
        self.symbols.iter().map(TerminalId::from_usize)
    }

    /// All symbols in the set. Epsilon comes last.
    pub fn symbols<'a>(&'a self) -> impl Iterator<Item = Symbol> + 'a {
        let epsilon = if self.has_epsilon {
            Some(Symbol::Epsilon)
        } else {
            None
        };
        self.terminals().map(Symbol::Terminal).chain(epsilon)
    }

    /// The number of symbols in the set, epsilon included.
    pub fn len(&self) -> usize {
        self.symbols.len() + self.has_epsilon as usize
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get a pretty printer for this set.
    pub fn pretty<'a>(&'a self, grammar: &'a Grammar) -> Pretty<&'a Grammar, &'a Self> {
        Pretty::new(grammar, self)
    }
}

impl<'a> fmt::Display for Pretty<&'a Grammar, &'a FirstSet> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{")?;
        for (index, symbol) in self.item.symbols().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", symbol.pretty(self.ctx))?;
        }
        write!(f, "}}")
    }
}

/// The meat of this module. Computes the first set for each rule in a grammar.
fn compute(grammar: &Grammar) -> FirstSets {
    let num_nonterm = grammar.nonterminal_id_bound();

    // Determine the sets of nonterminals to be updated.
    let mut update = BitSet::with_capacity(num_nonterm);
    let mut next_update = BitSet::with_capacity(num_nonterm);
    for id in grammar.nonterminals() {
        update.insert(id.as_usize());
    }

    // Create the initial empty first sets. These will be populated in the main
    // loop.
    let mut fs = FirstSets::empty(grammar);

    // Create a list to keep track of dependencies between the rules.
    let mut deps: Vec<BitSet> = repeat(BitSet::with_capacity(num_nonterm))
        .take(num_nonterm)
        .collect();

    // This is the main update loop which processes nonterminals in sets.
    let mut rounds = 0;
    while !update.is_empty() {
        rounds += 1;
        for current in update.iter() {
            if next_update.contains(current) {
                continue;
            }
            let mut new_fs = fs.nonterms[current].clone();

            // Update the first set and dependencies.
            for rule in grammar.productions_for(NonterminalId::from_usize(current)) {
                let tight = collect_symbols(rule.symbols(), &mut |symbol: Symbol| match symbol {
                    Symbol::Terminal(id) => {
                        new_fs.symbols.insert(id.as_usize());
                        true
                    }
                    Symbol::Nonterminal(id) => {
                        deps[id.as_usize()].insert(current);
                        let first = &fs.nonterms[id.as_usize()];
                        new_fs.symbols.union_with(&first.symbols);
                        !first.has_epsilon
                    }
                    Symbol::Epsilon => false,
                    Symbol::End => true,
                });
                new_fs.has_epsilon |= !tight;
            }

            // If the first set has grown, trigger an update of everything
            // that depends on us.
            if new_fs.len() != fs.nonterms[current].len() {
                trace!(
                    "FIRST({}) grew to {}",
                    NonterminalId::from_usize(current).pretty(grammar),
                    new_fs.pretty(grammar)
                );
                fs.nonterms[current] = new_fs;
                next_update.union_with(&deps[current]);
            }
        }

        // If we've cleared the update set, swap in the next update set.
        swap(&mut update, &mut next_update);
        next_update.clear();
    }

    debug!("first sets settled after {} rounds", rounds);
    fs
}

/// Computes the first sets by recursive expansion, visiting nonterminals in
/// declaration order.
fn compute_guarded(grammar: &Grammar) -> FirstSets {
    let mut guarded = Guarded {
        grammar: grammar,
        memo: vec![None; grammar.nonterminal_id_bound()],
        in_progress: BitSet::with_capacity(grammar.nonterminal_id_bound()),
    };
    for id in grammar.nonterminals() {
        guarded.nonterminal(id);
    }

    let mut fs = FirstSets::empty(grammar);
    for (set, memo) in fs.nonterms.iter_mut().zip(guarded.memo) {
        if let Some(memo) = memo {
            *set = memo;
        }
    }
    debug!("guarded first sets computed");
    fs
}

/// Recursive first set expansion state.
///
/// A nonterminal that is reentered while its own expansion is still in
/// progress contributes an empty set. Each nonterminal's result is memoized
/// once its outermost expansion completes.
struct Guarded<'a> {
    grammar: &'a Grammar,
    memo: Vec<Option<FirstSet>>,
    in_progress: BitSet,
}

impl<'a> Guarded<'a> {
    fn first(&mut self, symbol: Symbol) -> FirstSet {
        match symbol {
            Symbol::Terminal(id) => FirstSet::terminal(id),
            Symbol::Nonterminal(id) => self.nonterminal(id),
            Symbol::Epsilon => FirstSet::epsilon(),
            Symbol::End => FirstSet::new(),
        }
    }

    fn nonterminal(&mut self, id: NonterminalId) -> FirstSet {
        let index = id.as_usize();
        if let Some(ref memo) = self.memo[index] {
            return memo.clone();
        }
        if !self.in_progress.insert(index) {
            trace!("cut recursion into FIRST({})", id.pretty(self.grammar));
            return FirstSet::new();
        }

        let grammar = self.grammar;
        let mut result = FirstSet::new();
        for rule in grammar.productions_for(id) {
            let tight = collect_symbols(rule.symbols(), &mut |symbol: Symbol| {
                let first = self.first(symbol);
                result.symbols.union_with(&first.symbols);
                !first.has_epsilon
            });
            result.has_epsilon |= !tight;
        }

        self.in_progress.remove(index);
        self.memo[index] = Some(result.clone());
        result
    }
}

/// Call a closure on each possible first symbol.
///
/// Given a sequence of symbols, determine which ones should belong into the
/// first set. Returns `true` if the sequence is *tight*, that is, it cannot
/// derive epsilon. A sequence with a terminal is tight. Nonterminals may or
/// may not be tight, depending on their first set. The callback function `f`
/// must return `true` if the symbol causes the sequence to be tight.
fn collect_symbols<'a, I, F>(symbols: I, f: &mut F) -> bool
where
    I: IntoIterator<Item = &'a Symbol>,
    F: FnMut(Symbol) -> bool,
{
    for &symbol in symbols {
        if f(symbol) {
            return true;
        }
    }
    false
}
