//! Chained comparisons under configurable orderings.
//!
//! An ordering is a [`Measure`]: something that maps a value to a key that can
//! be compared. Wrapping a value with a measure gives an [`Ordered`] value, and
//! comparing it against a right-hand side applies the *left* measure to both
//! sides:
//!
//! ```
//! use termination::ordering::{ordering, Chain};
//!
//! let by_len = ordering(|s: &&str| s.len());
//! assert!(by_len("ab").lt(&"abc").holds());
//!
//! // a < b < c, each link compared under its own left operand's measure
//! let by_rev = ordering(|s: &&str| std::cmp::Reverse(s.to_string()));
//! let a = by_len("a");
//! let b = by_rev("zz");
//! assert!(Chain::new(&a).lt(&b).lt(&by_len("yy")).holds());
//! ```
//!
//! If the right-hand side is itself an `Ordered` value, only its payload is
//! used; its measure is ignored. Equality (`==`) on `Ordered` values compares
//! payloads directly, never measured keys.

mod chain;
mod weight;


pub use chain::{Chain, Link};
pub use weight::Weight;

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::ops::{BitAnd, BitOr, Not};

/// A configured comparator: maps values to comparable keys.
///
/// Any `Fn(&T) -> K` with `K: PartialOrd` is a measure.
pub trait Measure<T: ?Sized> {
    type Key: PartialOrd;

    fn measure(&self, value: &T) -> Self::Key;

    fn compare(&self, left: &T, right: &T) -> Option<Ordering> {
        self.measure(left).partial_cmp(&self.measure(right))
    }
}

impl<T: ?Sized, K: PartialOrd, F: Fn(&T) -> K> Measure<T> for F {
    type Key = K;

    fn measure(&self, value: &T) -> K {
        self(value)
    }
}

/// Turn a measure into a constructor of `Ordered` values
pub fn ordering<T, M>(measure: M) -> impl Fn(T) -> Ordered<T, M>
where
    M: Measure<T> + Clone,
{
    move |value| Ordered::new(value, measure.clone())
}

/// A value paired with the measure it is compared under
#[derive(Debug, Clone)]
pub struct Ordered<T, M> {
    value: T,
    measure: M,
}

impl<T, M> Ordered<T, M> {
    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn into_value(self) -> T {
        self.value
    }

    pub fn measure(&self) -> &M {
        &self.measure
    }
}

impl<T, M: Measure<T>> Ordered<T, M> {
    pub fn new(value: T, measure: M) -> Self {
        Ordered { value, measure }
    }

    /// Compare against `right` using this value's measure on both sides
    pub fn compare_to<R: Borrow<T> + ?Sized>(&self, right: &R) -> Option<Ordering> {
        self.measure.compare(&self.value, right.borrow())
    }

    pub fn compare<R: Borrow<T> + ?Sized>(&self, relation: Relation, right: &R) -> Comparison {
        Comparison::Relation {
            relation,
            ordering: self.compare_to(right),
        }
    }

    pub fn lt<R: Borrow<T> + ?Sized>(&self, right: &R) -> Comparison {
        self.compare(Relation::Less, right)
    }

    pub fn le<R: Borrow<T> + ?Sized>(&self, right: &R) -> Comparison {
        self.compare(Relation::LessOrEqual, right)
    }

    pub fn gt<R: Borrow<T> + ?Sized>(&self, right: &R) -> Comparison {
        self.compare(Relation::Greater, right)
    }

    pub fn ge<R: Borrow<T> + ?Sized>(&self, right: &R) -> Comparison {
        self.compare(Relation::GreaterOrEqual, right)
    }
}

impl<T, M> Borrow<T> for Ordered<T, M> {
    fn borrow(&self) -> &T {
        &self.value
    }
}

impl<T: PartialEq, M, N> PartialEq<Ordered<T, N>> for Ordered<T, M> {
    fn eq(&self, other: &Ordered<T, N>) -> bool {
        self.value == other.value
    }
}

impl<T: PartialEq, M> PartialEq<T> for Ordered<T, M> {
    fn eq(&self, other: &T) -> bool {
        self.value == *other
    }
}

/// Strict and non-strict order relations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
}

impl Relation {
    /// Whether the relation holds for a comparison outcome.
    ///
    /// Incomparable values (`None`) satisfy no relation.
    pub fn holds(self, ordering: Option<Ordering>) -> bool {
        match (self, ordering) {
            (_, None) => false,
            (Relation::Less, Some(o)) => o.is_lt(),
            (Relation::LessOrEqual, Some(o)) => o.is_le(),
            (Relation::Greater, Some(o)) => o.is_gt(),
            (Relation::GreaterOrEqual, Some(o)) => o.is_ge(),
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self {
            Relation::Less => "<",
            Relation::LessOrEqual => "<=",
            Relation::Greater => ">",
            Relation::GreaterOrEqual => ">=",
        };
        write!(f, "{}", op)
    }
}

/// A boolean expression over comparison outcomes.
///
/// Leaves record the relation asked for and the ordering that was measured;
/// `&`, `|` and `!` combine them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Comparison {
    Relation {
        relation: Relation,
        ordering: Option<Ordering>,
    },
    And(Box<Comparison>, Box<Comparison>),
    Or(Box<Comparison>, Box<Comparison>),
    Not(Box<Comparison>),
}

impl Comparison {
    pub fn holds(&self) -> bool {
        match self {
            Comparison::Relation { relation, ordering } => relation.holds(*ordering),
            Comparison::And(left, right) => left.holds() && right.holds(),
            Comparison::Or(left, right) => left.holds() || right.holds(),
            Comparison::Not(inner) => !inner.holds(),
        }
    }
}

impl From<Comparison> for bool {
    fn from(comparison: Comparison) -> bool {
        comparison.holds()
    }
}

impl BitAnd for Comparison {
    type Output = Comparison;

    fn bitand(self, rhs: Comparison) -> Comparison {
        Comparison::And(Box::new(self), Box::new(rhs))
    }
}

impl BitOr for Comparison {
    type Output = Comparison;

    fn bitor(self, rhs: Comparison) -> Comparison {
        Comparison::Or(Box::new(self), Box::new(rhs))
    }
}

impl Not for Comparison {
    type Output = Comparison;

    fn not(self) -> Comparison {
        Comparison::Not(Box::new(self))
    }
}
