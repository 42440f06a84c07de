//! Symbols of a first-order signature
//!
//! Constants and variables are complete terms on their own. Function symbols
//! are not; they are applied to children to build a `Term`.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::core::term::Term;
use crate::error::{Result, TermError};
use crate::pool::{PoolRef, VariablePool};

/// A constant symbol (arity 0)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Constant {
    name: Arc<str>,
}

impl Constant {
    /// Create a constant symbol
    pub fn new(name: impl AsRef<str>) -> Self {
        Constant {
            name: Arc::from(name.as_ref()),
        }
    }

    /// The symbol's name
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A function symbol with arity
///
/// The arity is always at least 1; nullary symbols are `Constant`s.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "FunctionRepr")]
pub struct Function {
    name: Arc<str>,
    arity: usize,
}

#[derive(Deserialize)]
struct FunctionRepr {
    name: String,
    arity: usize,
}

impl TryFrom<FunctionRepr> for Function {
    type Error = TermError;

    fn try_from(repr: FunctionRepr) -> Result<Self> {
        Function::new(repr.name, repr.arity)
    }
}

impl Function {
    /// Create a function symbol, failing with `InvalidArity` for arity 0
    pub fn new(name: impl AsRef<str>, arity: usize) -> Result<Self> {
        if arity == 0 {
            return Err(TermError::InvalidArity {
                name: name.as_ref().to_string(),
            });
        }
        Ok(Function {
            name: Arc::from(name.as_ref()),
            arity,
        })
    }

    /// The symbol's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of children an application of this symbol takes
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Apply this symbol to children, producing a term.
    ///
    /// Validation is shared with `Term::application`, so a wrong number of
    /// children fails with the same `ArityMismatch`.
    pub fn apply<I>(&self, children: I) -> Result<Term>
    where
        I: IntoIterator,
        I::Item: Into<Term>,
    {
        Term::application(self.clone(), children)
    }
}

/// A variable, optionally indexed, optionally issued by a `VariablePool`.
///
/// Identity is `(name, index)`: a plain `?x` and an indexed `?x#1` are
/// different variables, and the pool a variable came from never affects
/// equality or hashing. Cloning is cheap and preserves instance identity
/// (see [`Variable::same_instance`]).
#[derive(Clone, Serialize, Deserialize)]
#[serde(from = "VariableRepr", into = "VariableRepr")]
pub struct Variable {
    inner: Arc<VariableData>,
}

struct VariableData {
    name: String,
    index: Option<u64>,
    pool: Option<PoolRef>,
}

#[derive(Serialize, Deserialize)]
struct VariableRepr {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    index: Option<u64>,
}

impl From<VariableRepr> for Variable {
    fn from(repr: VariableRepr) -> Self {
        Variable::with_parts(repr.name, repr.index, None)
    }
}

impl From<Variable> for VariableRepr {
    fn from(variable: Variable) -> Self {
        VariableRepr {
            name: variable.inner.name.clone(),
            index: variable.inner.index,
        }
    }
}

impl Variable {
    /// A plain variable not associated with any pool
    pub fn new(name: impl Into<String>) -> Self {
        Variable::with_parts(name.into(), None, None)
    }

    /// An indexed variable not associated with any pool
    pub fn indexed(name: impl Into<String>, index: u64) -> Self {
        Variable::with_parts(name.into(), Some(index), None)
    }

    pub(crate) fn with_parts(name: String, index: Option<u64>, pool: Option<PoolRef>) -> Self {
        Variable {
            inner: Arc::new(VariableData { name, index, pool }),
        }
    }

    /// The variable's name, without the `?` prefix or index
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// The index of an indexed variable, `None` for a plain one
    pub fn index(&self) -> Option<u64> {
        self.inner.index
    }

    /// Whether this variable carries an index
    pub fn is_indexed(&self) -> bool {
        self.inner.index.is_some()
    }

    /// The pool this variable was issued by, if that pool is still alive
    pub fn pool(&self) -> Option<VariablePool> {
        self.inner.pool.as_ref().and_then(PoolRef::upgrade)
    }

    /// Whether this variable's issuing pool is still alive
    pub fn is_pool_bound(&self) -> bool {
        self.pool().is_some()
    }

    pub(crate) fn pool_ref(&self) -> Option<&PoolRef> {
        self.inner.pool.as_ref()
    }

    /// Instance identity, as opposed to `==` which is structural.
    pub fn same_instance(&self, other: &Variable) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    fn key(&self) -> (&str, Option<u64>) {
        (&self.inner.name, self.inner.index)
    }
}

impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Variable {}

impl Hash for Variable {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for Variable {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Variable {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl fmt::Debug for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Variable");
        s.field("name", &self.inner.name);
        if let Some(index) = self.inner.index {
            s.field("index", &index);
        }
        s.finish()
    }
}

/// Any symbol of a signature
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Symbol {
    Constant(Constant),
    Function(Function),
    Variable(Variable),
}

impl Symbol {
    pub fn name(&self) -> &str {
        match self {
            Symbol::Constant(c) => c.name(),
            Symbol::Function(f) => f.name(),
            Symbol::Variable(v) => v.name(),
        }
    }

    /// Arity of the symbol; 0 for constants and variables
    pub fn arity(&self) -> usize {
        match self {
            Symbol::Function(f) => f.arity(),
            Symbol::Constant(_) | Symbol::Variable(_) => 0,
        }
    }

    /// The symbol as a zero-depth term; function symbols are not terms.
    pub fn to_term(&self) -> Result<Term> {
        match self {
            Symbol::Constant(c) => Ok(Term::Constant(c.clone())),
            Symbol::Variable(v) => Ok(Term::Variable(v.clone())),
            Symbol::Function(f) => Err(TermError::UnsupportedOperand {
                operation: "use as a term",
                operand: f.to_string(),
            }),
        }
    }
}

impl From<Constant> for Symbol {
    fn from(c: Constant) -> Self {
        Symbol::Constant(c)
    }
}

impl From<Function> for Symbol {
    fn from(f: Function) -> Self {
        Symbol::Function(f)
    }
}

impl From<Variable> for Symbol {
    fn from(v: Variable) -> Self {
        Symbol::Variable(v)
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.name, self.arity)
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.index {
            Some(index) => write!(f, "?{}#{}", self.inner.name, index),
            None => write!(f, "?{}", self.inner.name),
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Constant(c) => write!(f, "{}", c),
            Symbol::Function(func) => write!(f, "{}", func),
            Symbol::Variable(v) => write!(f, "{}", v),
        }
    }
}
