// Copyright (c) 2018 Fabian Schuiki

//! Follow set computation.
//!
//! The follow set of a nonterminal contains all terminals that may appear
//! immediately after it in some derivation from the start symbol, and the end
//! marker if the nonterminal may end the input. Follow sets are derived from
//! the completed first sets of the grammar.

use std::fmt;
use std::iter::repeat;
use bit_set::BitSet;

use Pretty;
use config::Strategy;
use first::{FirstSet, FirstSets};
use grammar::{Grammar, NonterminalId, Symbol, TerminalId};

/// All follow sets of a grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowSets {
    nonterms: Vec<FollowSet>,
}

/// The follow set of a nonterminal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FollowSet {
    /// The following terminals.
    symbols: BitSet,
    /// Whether the end of input may follow.
    has_end: bool,
}

impl FollowSets {
    /// Compute the follow sets of a grammar.
    pub fn compute(grammar: &Grammar, first: &FirstSets) -> FollowSets {
        compute(grammar, first)
    }

    /// Compute the follow sets of a grammar by guarded recursive expansion.
    pub fn compute_guarded(grammar: &Grammar, first: &FirstSets) -> FollowSets {
        compute_guarded(grammar, first)
    }

    /// Compute the follow sets of a grammar with the given strategy.
    pub fn with_strategy(grammar: &Grammar, first: &FirstSets, strategy: Strategy) -> FollowSets {
        match strategy {
            Strategy::FixedPoint => compute(grammar, first),
            Strategy::Guarded => compute_guarded(grammar, first),
        }
    }

    fn empty(grammar: &Grammar) -> FollowSets {
        FollowSets {
            nonterms: repeat(FollowSet::new())
                .take(grammar.nonterminal_id_bound())
                .collect(),
        }
    }

    /// The follow set of a symbol.
    ///
    /// Returns `None` for anything but the nonterminals of the grammar.
    pub fn get(&self, symbol: Symbol) -> Option<&FollowSet> {
        match symbol {
            Symbol::Nonterminal(id) => self.nonterms.get(id.as_usize()),
            _ => None,
        }
    }

    /// The follow set of a nonterminal.
    pub fn nonterminal(&self, id: NonterminalId) -> &FollowSet {
        &self.nonterms[id.as_usize()]
    }

    /// Get a pretty printer for these follow sets.
    pub fn pretty<'a>(&'a self, grammar: &'a Grammar) -> Pretty<&'a Grammar, &'a Self> {
        Pretty::new(grammar, self)
    }
}

impl<'a> fmt::Display for Pretty<&'a Grammar, &'a FollowSets> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for id in self.ctx.nonterminals() {
            if id.as_usize() > 0 {
                write!(f, "\n")?;
            }
            write!(
                f,
                "FOLLOW({}) = {}",
                id.pretty(self.ctx),
                self.item.nonterminal(id).pretty(self.ctx)
            )?;
        }
        Ok(())
    }
}

impl FollowSet {
    /// Create an empty follow set.
    pub fn new() -> FollowSet {
        FollowSet {
            symbols: BitSet::new(),
            has_end: false,
        }
    }

    /// Whether the set contains the end marker.
    pub fn has_end(&self) -> bool {
        self.has_end
    }

    /// Whether the set contains a symbol.
    pub fn contains(&self, symbol: Symbol) -> bool {
        match symbol {
            Symbol::Terminal(id) => self.symbols.contains(id.as_usize()),
            Symbol::End => self.has_end,
            _ => false,
        }
    }

    /// The terminals in the set, in declaration order.
    pub fn terminals<'a>(&'a self) -> impl Iterator<Item = TerminalId> + 'a {
        self.symbols.iter().map(TerminalId::from_usize)
    }

    /// All symbols in the set. The end marker comes first.
    pub fn symbols<'a>(&'a self) -> impl Iterator<Item = Symbol> + 'a {
        let end = if self.has_end { Some(Symbol::End) } else { None };
        end.into_iter().chain(self.terminals().map(Symbol::Terminal))
    }

    /// The number of symbols in the set, end marker included.
    pub fn len(&self) -> usize {
        self.symbols.len() + self.has_end as usize
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Add the terminals of a first set. Epsilon is dropped.
    fn add_first(&mut self, first: &FirstSet) {
        self.symbols.union_with(&first.symbols);
    }

    /// Add everything in another follow set.
    fn add_follow(&mut self, other: &FollowSet) {
        self.symbols.union_with(&other.symbols);
        self.has_end |= other.has_end;
    }

    /// Get a pretty printer for this set.
    pub fn pretty<'a>(&'a self, grammar: &'a Grammar) -> Pretty<&'a Grammar, &'a Self> {
        Pretty::new(grammar, self)
    }
}

impl<'a> fmt::Display for Pretty<&'a Grammar, &'a FollowSet> {
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

/// An occurrence of a nonterminal within the body of a rule.
struct Occurrence {
    /// The left-hand side of the rule.
    lhs: NonterminalId,
    /// The nonterminal that occurs.
    nonterminal: NonterminalId,
    /// The first set of everything after the occurrence.
    trailer: FirstSet,
}

/// Collect all nonterminal occurrences in the grammar, together with the
/// first sets of the symbols trailing them.
fn occurrences(grammar: &Grammar, first: &FirstSets) -> Vec<Occurrence> {
    let mut result = Vec::new();
    for rule in grammar.rules() {
        let symbols = rule.symbols();
        for (index, &symbol) in symbols.iter().enumerate() {
            if let Symbol::Nonterminal(id) = symbol {
                result.push(Occurrence {
                    lhs: rule.name(),
                    nonterminal: id,
                    trailer: first.first_of_sequence(&symbols[index + 1..]),
                });
            }
        }
    }
    result
}

/// Computes the follow sets by relaxing them until none of them grows.
fn compute(grammar: &Grammar, first: &FirstSets) -> FollowSets {
    let mut fs = FollowSets::empty(grammar);
    fs.nonterms[grammar.start().as_usize()].has_end = true;
    let occurrences = occurrences(grammar, first);

    let mut rounds = 0;
    let mut changed = true;
    while changed {
        changed = false;
        rounds += 1;
        for occ in &occurrences {
            let index = occ.nonterminal.as_usize();
            let mut new_fs = fs.nonterms[index].clone();
            new_fs.add_first(&occ.trailer);
            if occ.trailer.has_epsilon {
                new_fs.add_follow(&fs.nonterms[occ.lhs.as_usize()]);
            }
            if new_fs.len() != fs.nonterms[index].len() {
                trace!(
                    "FOLLOW({}) grew to {}",
                    occ.nonterminal.pretty(grammar),
                    new_fs.pretty(grammar)
                );
                fs.nonterms[index] = new_fs;
                changed = true;
            }
        }
    }

    debug!("follow sets settled after {} rounds", rounds);
    fs
}

/// Computes the follow sets by recursive expansion, visiting nonterminals in
/// declaration order.
fn compute_guarded(grammar: &Grammar, first: &FirstSets) -> FollowSets {
    let mut guarded = Guarded {
        grammar: grammar,
        occurrences: occurrences(grammar, first),
        memo: vec![None; grammar.nonterminal_id_bound()],
        in_progress: BitSet::with_capacity(grammar.nonterminal_id_bound()),
    };
    for id in grammar.nonterminals() {
        guarded.follow(id);
    }

    let mut fs = FollowSets::empty(grammar);
    for (set, memo) in fs.nonterms.iter_mut().zip(guarded.memo) {
        if let Some(memo) = memo {
            *set = memo;
        }
    }
    debug!("guarded follow sets computed");
    fs
}

/// Recursive follow set expansion state.
///
/// Reentering a nonterminal whose expansion is in progress contributes an
/// empty set. Results are memoized once the outermost expansion completes.
struct Guarded<'a> {
    grammar: &'a Grammar,
    occurrences: Vec<Occurrence>,
    memo: Vec<Option<FollowSet>>,
    in_progress: BitSet,
}

impl<'a> Guarded<'a> {
    fn follow(&mut self, id: NonterminalId) -> FollowSet {
        let index = id.as_usize();
        if let Some(ref memo) = self.memo[index] {
            return memo.clone();
        }
        if !self.in_progress.insert(index) {
            trace!("cut recursion into FOLLOW({})", id.pretty(self.grammar));
            return FollowSet::new();
        }

        let mut result = FollowSet::new();
        result.has_end = id == self.grammar.start();
        for i in 0..self.occurrences.len() {
            if self.occurrences[i].nonterminal != id {
                continue;
            }
            result.add_first(&self.occurrences[i].trailer);
            if self.occurrences[i].trailer.has_epsilon {
                let lhs = self.occurrences[i].lhs;
                let outer = self.follow(lhs);
                result.add_follow(&outer);
            }
        }

        self.in_progress.remove(index);
        self.memo[index] = Some(result.clone());
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grammar::EPSILON;

    fn names(grammar: &Grammar, set: &FollowSet) -> Vec<String> {
        set.symbols()
            .map(|s| grammar.symbol_name(s).to_string())
            .collect()
    }

    fn follow_of(grammar: &Grammar, sets: &FollowSets, name: &str) -> Vec<String> {
        let symbol = grammar.symbol(name).unwrap();
        names(grammar, sets.get(symbol).unwrap())
    }

    #[test]
    fn start_keeps_end_marker() {
        let g = Grammar::new(
            vec![("S", vec!["a", "S", "b"]), ("S", vec!["c"])],
            vec!["a", "b", "c"],
        ).unwrap();
        let first = FirstSets::compute(&g);
        let follow = FollowSets::compute(&g, &first);
        assert_eq!(follow_of(&g, &follow, "S"), vec!["$", "b"]);
    }

    #[test]
    fn nullable_trailer_passes_follow_through() {
        let g = Grammar::new(
            vec![
                ("S", vec!["A", "B", "C", "d"]),
                ("A", vec!["a"]),
                ("B", vec!["b"]),
                ("B", vec![EPSILON]),
                ("C", vec!["c"]),
                ("C", vec![EPSILON]),
            ],
            vec!["a", "b", "c", "d"],
        ).unwrap();
        let first = FirstSets::compute(&g);
        let follow = FollowSets::compute(&g, &first);
        assert_eq!(follow_of(&g, &follow, "A"), vec!["b", "c", "d"]);
        assert_eq!(follow_of(&g, &follow, "B"), vec!["c", "d"]);
        assert_eq!(follow_of(&g, &follow, "C"), vec!["d"]);
        assert_eq!(follow_of(&g, &follow, "S"), vec!["$"]);
    }

    #[test]
    fn whole_trailer_counts() {
        // Only the symbol right after `A` is nullable; `c` still blocks
        // FOLLOW(S) from reaching FOLLOW(A).
        let g = Grammar::new(
            vec![
                ("S", vec!["A", "B", "c"]),
                ("A", vec!["a"]),
                ("B", vec![EPSILON]),
            ],
            vec!["a", "c"],
        ).unwrap();
        let first = FirstSets::compute(&g);
        let follow = FollowSets::compute(&g, &first);
        assert_eq!(follow_of(&g, &follow, "A"), vec!["c"]);
        let guarded = FollowSets::compute_guarded(&g, &first);
        assert_eq!(follow_of(&g, &guarded, "A"), vec!["c"]);
    }

    #[test]
    fn only_nonterminals_have_follow_sets() {
        let g = Grammar::new(vec![("S", vec!["a"])], vec!["a"]).unwrap();
        let first = FirstSets::compute(&g);
        let follow = FollowSets::compute(&g, &first);
        assert!(follow.get(g.symbol("a").unwrap()).is_none());
        assert!(follow.get(Symbol::Epsilon).is_none());
        assert!(follow.get(Symbol::End).is_none());
    }

    #[test]
    fn set_printing() {
        let g = Grammar::new(
            vec![("S", vec!["A", "b"]), ("A", vec!["a"])],
            vec!["a", "b"],
        ).unwrap();
        let first = FirstSets::compute(&g);
        let follow = FollowSets::compute(&g, &first);
        assert_eq!(
            format!("{}", follow.pretty(&g)),
            "FOLLOW(S) = {$}\nFOLLOW(A) = {b}"
        );
    }
}
