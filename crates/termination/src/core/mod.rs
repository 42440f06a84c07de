//! Syntactic core: symbols, terms, positions and variable collection
//!
//! Symbols compose into terms; terms are addressed by position and queried
//! for the variables they contain.

pub mod position;
pub mod symbol;
pub mod term;
pub mod variables;


pub use position::Position;
pub use symbol::{Constant, Function, Symbol, Variable};
pub use term::{Application, Subterms, Term};
pub use variables::{variables, HasVariables, Variables};
