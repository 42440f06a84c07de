//! termination: a substrate for first-order term rewriting
//!
//! This library provides the data model rewriting engines, unification
//! algorithms and termination provers are built on: symbols and terms,
//! positions within terms, variable collection, substitutions, pools of fresh
//! variables, and chained comparisons under configurable orderings.

pub mod config;
pub mod core;
pub mod error;
pub mod ordering;
pub mod pool;
pub mod substitution;

// Re-export commonly used types
pub use config::PoolConfig;
pub use crate::core::{
    variables, Application, Constant, Function, HasVariables, Position, Subterms, Symbol, Term,
    Variable, Variables,
};
pub use error::{Result, TermError};
pub use ordering::{ordering, Chain, Comparison, Measure, Ordered, Relation, Weight};
pub use pool::{fresh, FreshSource, VariablePool};
pub use substitution::{Substitutable, Substitution};
