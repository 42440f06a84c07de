//! Terms in first-order logic

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::core::position::Position;
use crate::core::symbol::{Constant, Function, Variable};
use crate::error::{Result, TermError};

/// Application of a function symbol to exactly `arity` children.
///
/// Only constructible through `Term::application` (or `Function::apply`), so
/// `children.len() == root.arity()` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ApplicationRepr")]
pub struct Application {
    root: Function,
    children: Vec<Term>,
}

#[derive(Deserialize)]
struct ApplicationRepr {
    root: Function,
    children: Vec<Term>,
}

impl TryFrom<ApplicationRepr> for Application {
    type Error = TermError;

    fn try_from(repr: ApplicationRepr) -> Result<Self> {
        Application::new(repr.root, repr.children)
    }
}

impl Application {
    fn new(root: Function, children: Vec<Term>) -> Result<Self> {
        if children.len() != root.arity() {
            return Err(TermError::ArityMismatch {
                symbol: root.to_string(),
                expected: root.arity(),
                found: children.len(),
            });
        }
        Ok(Application { root, children })
    }

    /// Rebuild with the same root. Callers must preserve the child count.
    pub(crate) fn with_children(&self, children: Vec<Term>) -> Self {
        debug_assert_eq!(children.len(), self.root.arity());
        Application {
            root: self.root.clone(),
            children,
        }
    }

    pub fn root(&self) -> &Function {
        &self.root
    }

    pub fn children(&self) -> &[Term] {
        &self.children
    }
}

/// A term: a constant, a variable, or a function application.
///
/// Terms are immutable values. Cloning is O(1) since applications are shared
/// behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Term {
    Constant(Constant),
    Variable(Variable),
    Application(Arc<Application>),
}

impl Term {
    /// Apply `root` to `children`, failing with `ArityMismatch` if the child
    /// count differs from the root's arity.
    pub fn application<I>(root: Function, children: I) -> Result<Term>
    where
        I: IntoIterator,
        I::Item: Into<Term>,
    {
        let children: Vec<Term> = children.into_iter().map(Into::into).collect();
        Ok(Term::Application(Arc::new(Application::new(root, children)?)))
    }

    /// The root function symbol, for applications only
    pub fn root(&self) -> Option<&Function> {
        match self {
            Term::Application(app) => Some(app.root()),
            _ => None,
        }
    }

    /// Children of an application; terminal symbols have none
    pub fn children(&self) -> &[Term] {
        match self {
            Term::Application(app) => app.children(),
            _ => &[],
        }
    }

    /// Check if this term is a variable
    pub fn is_variable(&self) -> bool {
        matches!(self, Term::Variable(_))
    }

    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            Term::Variable(v) => Some(v),
            _ => None,
        }
    }

    /// Get the sub-term at `position`.
    ///
    /// Walks the path in a loop. Fails with `InvalidPosition` if an index is
    /// out of range or the walk would descend below a constant or variable;
    /// the error always carries the full position that was asked for.
    pub fn at(&self, position: &[usize]) -> Result<&Term> {
        let mut current = self;
        for &index in position {
            current = match current {
                Term::Application(app) => app.children.get(index),
                Term::Constant(_) | Term::Variable(_) => None,
            }
            .ok_or_else(|| TermError::invalid_position(position))?;
        }
        Ok(current)
    }

    /// Whether `position` addresses a sub-term of this term
    pub fn contains(&self, position: &[usize]) -> bool {
        self.at(position).is_ok()
    }

    /// Number of positions in this term
    pub fn size(&self) -> usize {
        match self {
            Term::Application(app) => 1 + app.children.iter().map(Term::size).sum::<usize>(),
            Term::Constant(_) | Term::Variable(_) => 1,
        }
    }

    /// Length of the longest path from the root; 0 for constants and variables
    pub fn depth(&self) -> usize {
        match self {
            Term::Application(app) => {
                1 + app.children.iter().map(Term::depth).max().unwrap_or(0)
            }
            Term::Constant(_) | Term::Variable(_) => 0,
        }
    }

    /// Iterate over every `(position, sub-term)` pair, each position once.
    ///
    /// Pre-order, though callers should not rely on the order.
    pub fn subterms(&self) -> Subterms<'_> {
        Subterms {
            stack: vec![(Position::root(), self)],
        }
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.subterms().map(|(position, _)| position)
    }

    /// A new term with the sub-term at `position` replaced by `replacement`.
    pub fn replace_at(&self, position: &[usize], replacement: Term) -> Result<Term> {
        fn go(term: &Term, path: &[usize], replacement: Term) -> Option<Term> {
            let Some((&index, rest)) = path.split_first() else {
                return Some(replacement);
            };
            let Term::Application(app) = term else {
                return None;
            };
            let replaced = go(app.children.get(index)?, rest, replacement)?;
            let mut children = app.children.clone();
            children[index] = replaced;
            Some(Term::Application(Arc::new(app.with_children(children))))
        }

        go(self, position, replacement).ok_or_else(|| TermError::invalid_position(position))
    }
}

impl From<Constant> for Term {
    fn from(c: Constant) -> Self {
        Term::Constant(c)
    }
}

impl From<Variable> for Term {
    fn from(v: Variable) -> Self {
        Term::Variable(v)
    }
}

impl From<Application> for Term {
    fn from(app: Application) -> Self {
        Term::Application(Arc::new(app))
    }
}

impl From<&Constant> for Term {
    fn from(c: &Constant) -> Self {
        Term::Constant(c.clone())
    }
}

impl From<&Variable> for Term {
    fn from(v: &Variable) -> Self {
        Term::Variable(v.clone())
    }
}

impl From<&Term> for Term {
    fn from(t: &Term) -> Self {
        t.clone()
    }
}

/// Pre-order iterator over the sub-terms of a term with their positions
pub struct Subterms<'a> {
    stack: Vec<(Position, &'a Term)>,
}

impl<'a> Iterator for Subterms<'a> {
    type Item = (Position, &'a Term);

    fn next(&mut self) -> Option<Self::Item> {
        let (position, term) = self.stack.pop()?;
        if let Term::Application(app) = term {
            for (index, child) in app.children.iter().enumerate().rev() {
                self.stack.push((position.child(index), child));
            }
        }
        Some((position, term))
    }
}

impl fmt::Display for Application {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The root's own Display includes its arity, which is redundant here
        write!(f, "{}(", self.root.name())?;
        for (i, child) in self.children.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", child)?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Constant(c) => write!(f, "{}", c),
            Term::Variable(v) => write!(f, "{}", v),
            Term::Application(app) => write!(f, "{}", app),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct Fixture {
        x: Variable,
        y: Variable,
        z: Variable,
        g_x: Term,
        f_yz: Term,
        term: Term,
    }

    /// `f(g(?x), f(?y, ?z))`
    fn fixture() -> Fixture {
        let f = Function::new("f", 2).unwrap();
        let g = Function::new("g", 1).unwrap();
        let x = Variable::new("x");
        let y = Variable::new("y");
        let z = Variable::new("z");
        let g_x = g.apply([&x]).unwrap();
        let f_yz = f.apply([&y, &z]).unwrap();
        let term = f.apply([g_x.clone(), f_yz.clone()]).unwrap();
        Fixture {
            x,
            y,
            z,
            g_x,
            f_yz,
            term,
        }
    }

    #[test]
    fn test_arity_mismatch() {
        let f = Function::new("f", 2).unwrap();
        let x = Variable::new("x");

        let expected = TermError::ArityMismatch {
            symbol: "f.2".to_string(),
            expected: 2,
            found: 1,
        };
        assert_eq!(f.apply([&x]).unwrap_err(), expected);
        assert_eq!(Term::application(f.clone(), [&x]).unwrap_err(), expected);
        assert!(matches!(
            f.apply([&x, &x, &x]),
            Err(TermError::ArityMismatch { found: 3, .. })
        ));
    }

    #[test]
    fn test_at_root() {
        let fx = fixture();
        assert_eq!(fx.term.at(&[]).unwrap(), &fx.term);

        let x = Term::from(fx.x.clone());
        assert_eq!(x.at(&[]).unwrap(), &x);
    }

    #[test]
    fn test_at_subterms() {
        let fx = fixture();
        assert_eq!(fx.term.at(&[0]).unwrap(), &fx.g_x);
        assert_eq!(fx.term.at(&[0, 0]).unwrap(), &Term::from(&fx.x));
        assert_eq!(fx.term.at(&[1]).unwrap(), &fx.f_yz);
        assert_eq!(fx.term.at(&[1, 0]).unwrap(), &Term::from(&fx.y));
        assert_eq!(fx.term.at(&[1, 1]).unwrap(), &Term::from(&fx.z));
    }

    #[test]
    fn test_at_invalid_reports_full_position() {
        let fx = fixture();
        for path in [vec![2], vec![0, 1], vec![1, 2], vec![0, 0, 1]] {
            let err = fx.term.at(&path).unwrap_err();
            assert_eq!(
                err,
                TermError::InvalidPosition {
                    position: Position::from(path.clone())
                }
            );
        }

        let err = fx.term.at(&[0, 0, 1]).unwrap_err();
        assert_eq!(err.to_string(), "Invalid position: [0, 0, 1]");
    }

    #[test]
    fn test_terminal_has_only_root_position() {
        let c = Term::from(Constant::new("c"));
        assert!(c.contains(&[]));
        assert!(!c.contains(&[0]));
        assert_eq!(c.size(), 1);
        assert_eq!(c.depth(), 0);
        let subterms: Vec<_> = c.subterms().collect();
        assert_eq!(subterms, vec![(Position::root(), &c)]);
    }

    #[test]
    fn test_subterms_cover_every_position_once() {
        let fx = fixture();
        let x = Term::from(&fx.x);
        let y = Term::from(&fx.y);
        let z = Term::from(&fx.z);
        let expected: HashSet<(Position, &Term)> = [
            (Position::root(), &fx.term),
            (Position::from([0]), &fx.g_x),
            (Position::from([0, 0]), &x),
            (Position::from([1]), &fx.f_yz),
            (Position::from([1, 0]), &y),
            (Position::from([1, 1]), &z),
        ]
        .into_iter()
        .collect();

        let actual: Vec<_> = fx.term.subterms().collect();
        assert_eq!(actual.len(), expected.len());
        assert_eq!(actual.into_iter().collect::<HashSet<_>>(), expected);
    }

    #[test]
    fn test_subterms_is_restartable() {
        let fx = fixture();
        let first: Vec<_> = fx.term.positions().collect();
        let second: Vec<_> = fx.term.positions().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_size_and_depth() {
        let fx = fixture();
        assert_eq!(fx.term.size(), 6);
        assert_eq!(fx.term.depth(), 2);
        assert_eq!(fx.g_x.size(), 2);
    }

    #[test]
    fn test_display() {
        let fx = fixture();
        assert_eq!(fx.term.to_string(), "f(g(?x), f(?y, ?z))");

        let g = Function::new("g", 1).unwrap();
        let t = g.apply([Constant::new("c")]).unwrap();
        assert_eq!(t.to_string(), "g(c)");
    }

    #[test]
    fn test_replace_at() {
        let fx = fixture();
        let a = Term::from(Constant::new("a"));

        let replaced = fx.term.replace_at(&[1, 0], a.clone()).unwrap();
        assert_eq!(replaced.to_string(), "f(g(?x), f(a, ?z))");
        // The original is untouched
        assert_eq!(fx.term.to_string(), "f(g(?x), f(?y, ?z))");

        assert_eq!(fx.term.replace_at(&[], a.clone()).unwrap(), a);
        assert_eq!(
            fx.term.replace_at(&[0, 0, 0], a).unwrap_err(),
            TermError::InvalidPosition {
                position: Position::from([0, 0, 0])
            }
        );
    }

    #[test]
    fn test_application_deserialize_validates_arity() {
        let json = r#"{"Application":{"root":{"name":"g","arity":1},"children":[{"Constant":{"name":"c"}}]}}"#;
        let t: Term = serde_json::from_str(json).unwrap();
        assert_eq!(t.to_string(), "g(c)");
        assert_eq!(serde_json::to_string(&t).unwrap(), json);

        let bad = r#"{"Application":{"root":{"name":"g","arity":1},"children":[]}}"#;
        assert!(serde_json::from_str::<Term>(bad).is_err());
    }
}
