//! Variable substitutions

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::trace;

use crate::core::{Application, Constant, Symbol, Term, Variable};
use crate::error::Result;


/// A finite mapping from variables to terms.
///
/// Unmapped variables are fixed points. The mapping keeps insertion order for
/// display; equality ignores order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<(Variable, Term)>", into = "Vec<(Variable, Term)>")]
pub struct Substitution {
    map: IndexMap<Variable, Term>,
}

impl Substitution {
    /// The empty (identity) substitution
    pub fn new() -> Self {
        Substitution {
            map: IndexMap::new(),
        }
    }

    /// Get the term bound to a variable, if any
    pub fn get(&self, var: &Variable) -> Option<&Term> {
        self.map.get(var)
    }

    /// Check if a variable is explicitly mapped
    pub fn contains(&self, var: &Variable) -> bool {
        self.map.contains_key(var)
    }

    /// Number of explicit bindings
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether this is the identity substitution
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterate over bindings in insertion order
    pub fn iter(&self) -> indexmap::map::Iter<'_, Variable, Term> {
        self.map.iter()
    }

    /// The variables this substitution maps explicitly
    pub fn domain(&self) -> impl Iterator<Item = &Variable> + '_ {
        self.map.keys()
    }

    pub(crate) fn keys(&self) -> indexmap::map::Keys<'_, Variable, Term> {
        self.map.keys()
    }

    /// Apply this substitution to a term-like value
    pub fn apply<T: Substitutable + ?Sized>(&self, value: &T) -> T::Output {
        value.substitute(self)
    }

    /// Apply to a symbol used as a term.
    ///
    /// Function symbols have no substitution behaviour and fail with
    /// `UnsupportedOperand`.
    pub fn apply_symbol(&self, symbol: &Symbol) -> Result<Term> {
        Ok(symbol.to_term()?.substitute(self))
    }

    /// Compose with `inner`, giving the substitution that applies `inner`
    /// first and then `self`.
    ///
    /// Variables mapped by `inner` go to `self` applied to their image.
    /// Variables mapped only by `self` keep their binding unchanged.
    pub fn compose(&self, inner: &Substitution) -> Substitution {
        trace!(
            inner = inner.len(),
            outer = self.len(),
            "composing substitutions"
        );

        let mut map = IndexMap::with_capacity(inner.len() + self.len());

        for (var, term) in &inner.map {
            map.insert(var.clone(), term.substitute(self));
        }

        for (var, term) in &self.map {
            if !inner.map.contains_key(var) {
                map.insert(var.clone(), term.clone());
            }
        }

        Substitution { map }
    }
}

impl<T: Into<Term>> FromIterator<(Variable, T)> for Substitution {
    fn from_iter<I: IntoIterator<Item = (Variable, T)>>(iter: I) -> Self {
        Substitution {
            map: iter
                .into_iter()
                .map(|(var, term)| (var, term.into()))
                .collect(),
        }
    }
}

impl From<IndexMap<Variable, Term>> for Substitution {
    fn from(map: IndexMap<Variable, Term>) -> Self {
        Substitution { map }
    }
}

impl From<Vec<(Variable, Term)>> for Substitution {
    fn from(pairs: Vec<(Variable, Term)>) -> Self {
        pairs.into_iter().collect()
    }
}

impl From<Substitution> for Vec<(Variable, Term)> {
    fn from(subst: Substitution) -> Self {
        subst.map.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a Substitution {
    type Item = (&'a Variable, &'a Term);
    type IntoIter = indexmap::map::Iter<'a, Variable, Term>;

    fn into_iter(self) -> Self::IntoIter {
        self.map.iter()
    }
}

/// Values a substitution can be applied to
pub trait Substitutable {
    type Output;

    fn substitute(&self, subst: &Substitution) -> Self::Output;
}

impl Substitutable for Constant {
    type Output = Constant;

    fn substitute(&self, _subst: &Substitution) -> Constant {
        self.clone()
    }
}

impl Substitutable for Variable {
    type Output = Term;

    fn substitute(&self, subst: &Substitution) -> Term {
        subst
            .get(self)
            .cloned()
            .unwrap_or_else(|| Term::Variable(self.clone()))
    }
}

impl Substitutable for Application {
    type Output = Application;

    fn substitute(&self, subst: &Substitution) -> Application {
        self.with_children(
            self.children()
                .iter()
                .map(|child| child.substitute(subst))
                .collect(),
        )
    }
}

impl Substitutable for Term {
    type Output = Term;

    fn substitute(&self, subst: &Substitution) -> Term {
        match self {
            Term::Constant(_) => self.clone(),
            Term::Variable(v) => subst.get(v).cloned().unwrap_or_else(|| self.clone()),
            // Nothing can change, so share the existing tree
            Term::Application(_) if subst.is_empty() => self.clone(),
            Term::Application(app) => Term::Application(Arc::new(app.substitute(subst))),
        }
    }
}

/// Applying a substitution to a substitution composes them.
impl Substitutable for Substitution {
    type Output = Substitution;

    fn substitute(&self, subst: &Substitution) -> Substitution {
        subst.compose(self)
    }
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (var, term)) in self.map.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} -> {}", var, term)?;
        }
        write!(f, "}}")
    }
}
