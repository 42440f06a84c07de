//! Error types for term construction and manipulation

use thiserror::Error;

use crate::core::Position;

/// Failures raised by the term model.
///
/// All of these are usage errors (malformed terms, bad positions, asking the
/// wrong value for a fresh variable). None of them are transient.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TermError {
    #[error("Invalid arity for function symbol {name}: arity must be 1 or greater, use a constant for arity 0")]
    InvalidArity { name: String },

    #[error("Incorrect number of child terms for {symbol}: expected {expected}, found {found}")]
    ArityMismatch {
        symbol: String,
        expected: usize,
        found: usize,
    },

    #[error("Invalid position: {position}")]
    InvalidPosition { position: Position },

    #[error("Value does not support {operation}: {operand}")]
    UnsupportedOperand {
        operation: &'static str,
        operand: String,
    },

    #[error("Value is not associated with a variable pool: {value}")]
    NotPoolBound { value: String },

    #[error("No fresh index left for variable {name}")]
    IndexExhausted { name: String },
}

impl TermError {
    pub(crate) fn invalid_position(position: &[usize]) -> Self {
        TermError::InvalidPosition {
            position: Position::from(position),
        }
    }
}

pub type Result<T> = std::result::Result<T, TermError>;
