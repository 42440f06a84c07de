//! Variable pools: sources of canonical and fresh variables.
//!
//! A pool hands out one canonical plain variable per name, and indexed
//! variables whose indices are tracked per name. A "fresh" variable has an
//! index the pool has never issued or reserved before for that name.
//!
//! Variables issued by a pool keep a weak handle back to it, so
//! [`fresh`] can find the right pool from the variable alone. The handle does
//! not keep the pool alive and takes no part in variable equality.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tracing::{debug, trace};

use crate::config::PoolConfig;
use crate::core::{Symbol, Term, Variable};
use crate::error::{Result, TermError};

/// Per-name allocation state
#[derive(Debug)]
struct VariableState {
    variable: Variable,
    /// `None` once `u64::MAX` has been issued or reserved
    next_index: Option<u64>,
}

impl VariableState {
    fn reserve(&mut self, index: u64) {
        if self.next_index.is_some_and(|next| index >= next) {
            self.next_index = index.checked_add(1);
        }
    }
}

struct PoolState {
    config: PoolConfig,
    names: Mutex<HashMap<String, VariableState>>,
}

/// A source of variables with per-name fresh indices.
///
/// Cloning yields another handle to the same pool. Pools created separately
/// have independent counters. Allocation is serialised by a lock, so a pool
/// can be shared between threads without repeating an index.
#[derive(Clone)]
pub struct VariablePool {
    state: Arc<PoolState>,
}

/// Non-owning handle from an issued variable back to its pool
#[derive(Clone)]
pub(crate) struct PoolRef(Weak<PoolState>);

impl PoolRef {
    pub(crate) fn upgrade(&self) -> Option<VariablePool> {
        self.0.upgrade().map(|state| VariablePool { state })
    }
}

impl VariablePool {
    /// Create an empty pool with the default configuration
    pub fn new() -> Self {
        VariablePool::with_config(PoolConfig::default())
    }

    /// Create an empty pool with a custom configuration
    pub fn with_config(config: PoolConfig) -> Self {
        VariablePool {
            state: Arc::new(PoolState {
                config,
                names: Mutex::new(HashMap::new()),
            }),
        }
    }

    pub fn config(&self) -> &PoolConfig {
        &self.state.config
    }

    /// The canonical plain variable for `name`.
    ///
    /// Repeated calls return the same instance (see
    /// [`Variable::same_instance`]).
    pub fn get(&self, name: &str) -> Variable {
        self.with_state(name, |state| state.variable.clone())
    }

    /// An indexed variable for `(name, index)`.
    ///
    /// Reserves `index`: later fresh requests for `name` return larger indices.
    pub fn get_indexed(&self, name: &str, index: u64) -> Variable {
        self.with_state(name, |state| state.reserve(index));
        trace!(variable = name, index, "reserved variable index");
        self.issue(name, index)
    }

    /// An indexed variable for `name` with an index never returned before.
    ///
    /// Fails with `IndexExhausted` once every `u64` index for `name` has been
    /// issued or reserved.
    pub fn get_fresh(&self, name: &str) -> Result<Variable> {
        let index = self
            .with_state(name, |state| {
                let index = state.next_index?;
                state.reserve(index);
                Some(index)
            })
            .ok_or_else(|| TermError::IndexExhausted {
                name: name.to_string(),
            })?;
        debug!(variable = name, index, "issued fresh variable");
        Ok(self.issue(name, index))
    }

    /// The index the next `get_fresh(name)` will return, `None` if exhausted
    pub fn next_index(&self, name: &str) -> Option<u64> {
        self.with_state(name, |state| state.next_index)
    }

    /// Whether `variable` was issued by this pool (or a clone of its handle)
    pub fn is_issued_by(&self, variable: &Variable) -> bool {
        variable
            .pool_ref()
            .is_some_and(|pool| Weak::ptr_eq(&pool.0, &Arc::downgrade(&self.state)))
    }

    fn issue(&self, name: &str, index: u64) -> Variable {
        Variable::with_parts(name.to_string(), Some(index), Some(self.downgrade()))
    }

    fn downgrade(&self) -> PoolRef {
        PoolRef(Arc::downgrade(&self.state))
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, VariableState>> {
        // Every critical section leaves the map consistent, so a poisoned
        // lock can still be used.
        self.state
            .names
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn with_state<R>(&self, name: &str, f: impl FnOnce(&mut VariableState) -> R) -> R {
        let mut names = self.lock();
        let state = names
            .entry(name.to_string())
            .or_insert_with(|| VariableState {
                variable: Variable::with_parts(name.to_string(), None, Some(self.downgrade())),
                next_index: Some(self.state.config.first_index),
            });
        f(state)
    }
}

impl Default for VariablePool {
    fn default() -> Self {
        VariablePool::new()
    }
}

impl fmt::Debug for VariablePool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = self.lock();
        f.debug_struct("VariablePool")
            .field("config", &self.state.config)
            .field("names", &names.len())
            .finish()
    }
}

impl fmt::Debug for PoolRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PoolRef")
            .field(&(self.0.strong_count() > 0))
            .finish()
    }
}

/// Things that can produce a fresh variable
pub trait FreshSource {
    fn fresh_variable(&self) -> Result<Variable>;
}

/// A fresh variable from `source`.
///
/// - a pool-issued variable: a fresh variable of the same name from its pool
/// - a pool: a fresh variable named by `PoolConfig::anonymous_name`
///
/// Anything not tied to a live pool fails with `NotPoolBound`.
pub fn fresh<S: FreshSource + ?Sized>(source: &S) -> Result<Variable> {
    source.fresh_variable()
}

impl FreshSource for VariablePool {
    fn fresh_variable(&self) -> Result<Variable> {
        self.get_fresh(&self.state.config.anonymous_name)
    }
}

impl FreshSource for Variable {
    fn fresh_variable(&self) -> Result<Variable> {
        let pool = self.pool().ok_or_else(|| TermError::NotPoolBound {
            value: self.to_string(),
        })?;
        pool.get_fresh(self.name())
    }
}

impl FreshSource for Term {
    fn fresh_variable(&self) -> Result<Variable> {
        match self {
            Term::Variable(v) => v.fresh_variable(),
            other => Err(TermError::NotPoolBound {
                value: other.to_string(),
            }),
        }
    }
}

impl FreshSource for Symbol {
    fn fresh_variable(&self) -> Result<Variable> {
        match self {
            Symbol::Variable(v) => v.fresh_variable(),
            other => Err(TermError::NotPoolBound {
                value: other.to_string(),
            }),
        }
    }
}
