//! Left-to-right evaluation of `a R1 b R2 c ...` chains.

use std::cmp::Ordering;

use super::{Comparison, Measure, Ordered, Relation};

/// An operand that can sit on the left of a chain link
pub trait Link<T> {
    fn value(&self) -> &T;

    /// Compare this operand's value against `right` under its own measure
    fn compare_value(&self, right: &T) -> Option<Ordering>;
}

impl<T, M: Measure<T>> Link<T> for Ordered<T, M> {
    fn value(&self) -> &T {
        Ordered::value(self)
    }

    fn compare_value(&self, right: &T) -> Option<Ordering> {
        self.compare_to(right)
    }
}

/// A comparison chain.
///
/// `Chain::new(&a).lt(&b).le(&c)` means `a < b` under `a`'s measure and
/// `b <= c` under `b`'s measure. A raw value can end the chain with
/// [`Chain::end`].
pub struct Chain<'a, T> {
    left: &'a dyn Link<T>,
    comparison: Option<Comparison>,
}

impl<'a, T> Chain<'a, T> {
    pub fn new<L: Link<T> + 'a>(first: &'a L) -> Self {
        Chain {
            left: first,
            comparison: None,
        }
    }

    /// Add a link; `next` becomes the left operand of the following link
    pub fn then<L: Link<T> + 'a>(self, relation: Relation, next: &'a L) -> Self {
        let comparison = self.link(relation, next.value());
        Chain {
            left: next,
            comparison: Some(comparison),
        }
    }

    pub fn lt<L: Link<T> + 'a>(self, next: &'a L) -> Self {
        self.then(Relation::Less, next)
    }

    pub fn le<L: Link<T> + 'a>(self, next: &'a L) -> Self {
        self.then(Relation::LessOrEqual, next)
    }

    pub fn gt<L: Link<T> + 'a>(self, next: &'a L) -> Self {
        self.then(Relation::Greater, next)
    }

    pub fn ge<L: Link<T> + 'a>(self, next: &'a L) -> Self {
        self.then(Relation::GreaterOrEqual, next)
    }

    /// Close the chain with a raw value, compared under the last operand's
    /// measure.
    pub fn end(self, relation: Relation, value: &T) -> Comparison {
        self.link(relation, value)
    }

    /// The accumulated expression; `None` if no link was added
    pub fn into_comparison(self) -> Option<Comparison> {
        self.comparison
    }

    /// Whether every link holds. An empty chain holds trivially.
    pub fn holds(&self) -> bool {
        self.comparison.as_ref().map_or(true, Comparison::holds)
    }

    fn link(self, relation: Relation, right: &T) -> Comparison {
        let leaf = Comparison::Relation {
            relation,
            ordering: self.left.compare_value(right),
        };
        match self.comparison {
            Some(previous) => previous & leaf,
            None => leaf,
        }
    }
}
