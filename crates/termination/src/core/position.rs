//! Positions inside terms.
//!
//! A `Position` is a path of child indices from the root of a term down to one
//! of its sub-terms. The empty path is the term itself. Positions are never
//! stored on terms; they are produced by traversal (`Term::subterms`) or
//! supplied by the caller (`Term::at`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

/// A path from a term's root to one of its sub-terms.
///
/// Element `i` selects a child at depth `i`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Position(Vec<usize>);

impl Position {
    /// The empty position, denoting the whole term
    pub fn root() -> Self {
        Position(Vec::new())
    }

    /// Create a position from a path of child indices
    pub fn new(path: Vec<usize>) -> Self {
        Position(path)
    }

    /// Whether this is the root position
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// The position of the `index`-th child of the sub-term at this position
    pub fn child(&self, index: usize) -> Position {
        let mut path = Vec::with_capacity(self.0.len() + 1);
        path.extend_from_slice(&self.0);
        path.push(index);
        Position(path)
    }

    /// The position one level up, or `None` at the root
    pub fn parent(&self) -> Option<Position> {
        let (_, init) = self.0.split_last()?;
        Some(Position(init.to_vec()))
    }

    /// Whether the sub-term at `other` lies below (or at) this position
    pub fn is_prefix_of(&self, other: &Position) -> bool {
        other.0.starts_with(&self.0)
    }

    /// The child indices as a slice
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    /// Consume the position, returning its child indices
    pub fn into_vec(self) -> Vec<usize> {
        self.0
    }
}

impl Deref for Position {
    type Target = [usize];

    fn deref(&self) -> &[usize] {
        &self.0
    }
}

impl AsRef<[usize]> for Position {
    fn as_ref(&self) -> &[usize] {
        &self.0
    }
}

impl From<Vec<usize>> for Position {
    fn from(path: Vec<usize>) -> Self {
        Position(path)
    }
}

impl From<&[usize]> for Position {
    fn from(path: &[usize]) -> Self {
        Position(path.to_vec())
    }
}

impl<const N: usize> From<[usize; N]> for Position {
    fn from(path: [usize; N]) -> Self {
        Position(path.to_vec())
    }
}

impl FromIterator<usize> for Position {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Position(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Position {
    type Item = &'a usize;
    type IntoIter = std::slice::Iter<'a, usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, index) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", index)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_position() {
        let root = Position::root();
        assert!(root.is_root());
        assert_eq!(root.len(), 0);
        assert_eq!(root.parent(), None);
        assert_eq!(root.to_string(), "[]");
    }

    #[test]
    fn test_child_and_parent() {
        let p = Position::root().child(1).child(0);
        assert_eq!(p, Position::from([1, 0]));
        assert_eq!(p.parent(), Some(Position::from([1])));
        assert_eq!(p.to_string(), "[1, 0]");
    }

    #[test]
    fn test_prefix() {
        let p = Position::from([1]);
        assert!(Position::root().is_prefix_of(&p));
        assert!(p.is_prefix_of(&Position::from([1, 0, 2])));
        assert!(p.is_prefix_of(&p));
        assert!(!p.is_prefix_of(&Position::from([0, 1])));
        assert!(!Position::from([1, 0]).is_prefix_of(&p));
    }
}
