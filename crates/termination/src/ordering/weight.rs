//! Symbol-weight measure on terms

use std::collections::HashMap;

use super::Measure;
use crate::core::Term;

/// Weight of a term: the sum of the weights of its symbol occurrences.
///
/// Constants and function symbols are weighed by name (default 1); every
/// variable occurrence weighs `variable_weight`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Weight {
    symbol_weights: HashMap<String, usize>,
    default_weight: usize,
    variable_weight: usize,
}

impl Default for Weight {
    fn default() -> Self {
        Weight {
            symbol_weights: HashMap::new(),
            default_weight: 1,
            variable_weight: 1,
        }
    }
}

impl Weight {
    /// Unit weights for every symbol and variable
    pub fn new() -> Self {
        Weight::default()
    }

    /// Set the weight of the symbol named `name`
    pub fn with_symbol(mut self, name: impl Into<String>, weight: usize) -> Self {
        self.symbol_weights.insert(name.into(), weight);
        self
    }

    /// Set the weight of symbols without an explicit weight
    pub fn with_default_weight(mut self, weight: usize) -> Self {
        self.default_weight = weight;
        self
    }

    /// Set the weight of each variable occurrence
    pub fn with_variable_weight(mut self, weight: usize) -> Self {
        self.variable_weight = weight;
        self
    }

    fn symbol_weight(&self, name: &str) -> usize {
        self.symbol_weights
            .get(name)
            .copied()
            .unwrap_or(self.default_weight)
    }

    /// Total weight of `term`, saturating at `usize::MAX`
    pub fn term_weight(&self, term: &Term) -> usize {
        match term {
            Term::Variable(_) => self.variable_weight,
            Term::Constant(c) => self.symbol_weight(c.name()),
            Term::Application(app) => app
                .children()
                .iter()
                .map(|t| self.term_weight(t))
                .fold(self.symbol_weight(app.root().name()), usize::saturating_add),
        }
    }
}

impl Measure<Term> for Weight {
    type Key = usize;

    fn measure(&self, term: &Term) -> usize {
        self.term_weight(term)
    }
}
