//! Collecting the variables that occur in term-like values

use indexmap::IndexSet;
use std::slice;

use crate::core::symbol::{Constant, Symbol, Variable};
use crate::core::term::{Application, Term};
use crate::error::{Result, TermError};
use crate::substitution::Substitution;

/// Values whose variable occurrences can be enumerated.
///
/// The iterator is lazy, may repeat a variable that occurs at several
/// positions, and has no specified order.
pub trait HasVariables {
    fn variables(&self) -> Variables<'_>;

    /// Distinct variables, in first-occurrence order
    fn variable_set(&self) -> IndexSet<Variable> {
        self.variables().cloned().collect()
    }
}

/// Variables occurring in `value`
pub fn variables<V: HasVariables + ?Sized>(value: &V) -> Variables<'_> {
    value.variables()
}

/// Lazy iterator over variable occurrences
pub struct Variables<'a> {
    stack: Vec<Frame<'a>>,
}

enum Frame<'a> {
    Variable(&'a Variable),
    Terms(slice::Iter<'a, Term>),
    Keys(indexmap::map::Keys<'a, Variable, Term>),
}

impl<'a> Variables<'a> {
    fn empty() -> Self {
        Variables { stack: Vec::new() }
    }

    fn single(variable: &'a Variable) -> Self {
        Variables {
            stack: vec![Frame::Variable(variable)],
        }
    }

    fn terms(terms: &'a [Term]) -> Self {
        Variables {
            stack: vec![Frame::Terms(terms.iter())],
        }
    }
}

impl<'a> Iterator for Variables<'a> {
    type Item = &'a Variable;

    fn next(&mut self) -> Option<&'a Variable> {
        loop {
            match self.stack.last_mut()? {
                Frame::Variable(v) => {
                    let v = *v;
                    self.stack.pop();
                    return Some(v);
                }
                Frame::Keys(keys) => match keys.next() {
                    Some(v) => return Some(v),
                    None => {
                        self.stack.pop();
                    }
                },
                Frame::Terms(terms) => match terms.next() {
                    Some(Term::Variable(v)) => return Some(v),
                    Some(Term::Constant(_)) => {}
                    Some(Term::Application(app)) => {
                        self.stack.push(Frame::Terms(app.children().iter()));
                    }
                    None => {
                        self.stack.pop();
                    }
                },
            }
        }
    }
}

impl HasVariables for Constant {
    fn variables(&self) -> Variables<'_> {
        Variables::empty()
    }
}

impl HasVariables for Variable {
    fn variables(&self) -> Variables<'_> {
        Variables::single(self)
    }
}

impl HasVariables for Application {
    fn variables(&self) -> Variables<'_> {
        Variables::terms(self.children())
    }
}

impl HasVariables for Term {
    fn variables(&self) -> Variables<'_> {
        Variables::terms(std::slice::from_ref(self))
    }
}

/// The variables of a substitution are the variables it maps.
impl HasVariables for Substitution {
    fn variables(&self) -> Variables<'_> {
        Variables {
            stack: vec![Frame::Keys(self.keys())],
        }
    }
}

impl Symbol {
    /// Variables of a symbol used as a term.
    ///
    /// Function symbols are not terms, so they fail with `UnsupportedOperand`.
    pub fn variables(&self) -> Result<Variables<'_>> {
        match self {
            Symbol::Constant(c) => Ok(c.variables()),
            Symbol::Variable(v) => Ok(v.variables()),
            Symbol::Function(f) => Err(TermError::UnsupportedOperand {
                operation: "variables",
                operand: f.to_string(),
            }),
        }
    }
}
