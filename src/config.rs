// Copyright (c) 2018 Fabian Schuiki

//! Knobs controlling grammar validation and set computation.

/// How FIRST and FOLLOW sets are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Relax all sets until none of them grows anymore. Always yields the
    /// least fixed point.
    FixedPoint,
    /// Depth-first expansion that cuts recursion at nonterminals already being
    /// expanded. Reproduces the classic recursive formulation, including its
    /// under-approximation on some recursive nullable grammars.
    Guarded,
}

/// How rule bodies referencing undeclared symbols are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Validation {
    /// Reject the grammar.
    Strict,
    /// Accept the symbol as an implicit terminal.
    Permissive,
}

/// Analysis configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Config {
    /// The set computation strategy.
    pub strategy: Strategy,
    /// The handling of undeclared symbols.
    pub validation: Validation,
}

impl Config {
    /// Create the default configuration.
    pub fn new() -> Config {
        Config {
            strategy: Strategy::FixedPoint,
            validation: Validation::Strict,
        }
    }

    /// Use a different computation strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Config {
        self.strategy = strategy;
        self
    }

    /// Use a different validation mode.
    pub fn with_validation(mut self, validation: Validation) -> Config {
        self.validation = validation;
        self
    }

    /// The configuration matching the classic recursive formulation: guarded
    /// expansion, and any symbol without rules is a terminal.
    pub fn classic() -> Config {
        Config::new()
            .with_strategy(Strategy::Guarded)
            .with_validation(Validation::Permissive)
    }
}

impl Default for Config {
    fn default() -> Config {
        Config::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.strategy, Strategy::FixedPoint);
        assert_eq!(cfg.validation, Validation::Strict);
        assert_eq!(
            Config::classic(),
            Config {
                strategy: Strategy::Guarded,
                validation: Validation::Permissive,
            }
        );
    }
}
