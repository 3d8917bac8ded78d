//! The term tree
//!
//! A [`Term`] is either an atom (an immutable string) or a list of terms.
//! Both variants remember where they began in the source. Equality and
//! hashing are structural and ignore that position, so a parsed tree
//! compares equal to the same tree built by hand.
//!
//! ## Construction
//!
//! ```
//! use termpose::{Term, terms};
//!
//! let built = terms!["player", terms!["name", "ada"], terms!["score", "9"]];
//! let parsed = termpose::parse("player name:ada score:9").unwrap();
//! assert_eq!(built, parsed);
//! ```

mod query;

pub use query::QueryError;

use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;
use smol_str::SmolStr;

use crate::base::Position;

/// A node of the tree: an atom or a list
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Term {
    Atom { value: SmolStr, position: Position },
    List { items: Vec<Term>, position: Position },
}

impl Term {
    // =========================================================================
    // Construction
    // =========================================================================

    pub fn atom(value: impl Into<SmolStr>) -> Self {
        Self::atom_at(value, Position::default())
    }

    pub fn list(items: impl Into<Vec<Term>>) -> Self {
        Self::list_at(items, Position::default())
    }

    pub fn empty_list() -> Self {
        Self::list(Vec::new())
    }

    pub fn atom_at(value: impl Into<SmolStr>, position: Position) -> Self {
        Self::Atom {
            value: value.into(),
            position,
        }
    }

    pub fn list_at(items: impl Into<Vec<Term>>, position: Position) -> Self {
        Self::List {
            items: items.into(),
            position,
        }
    }

    /// The same term, recorded at another position
    pub fn with_position(mut self, at: Position) -> Self {
        match &mut self {
            Self::Atom { position, .. } | Self::List { position, .. } => *position = at,
        }
        self
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    pub fn position(&self) -> Position {
        match self {
            Self::Atom { position, .. } | Self::List { position, .. } => *position,
        }
    }

    pub fn line(&self) -> usize {
        self.position().line
    }

    pub fn column(&self) -> usize {
        self.position().column
    }

    pub fn is_atom(&self) -> bool {
        matches!(self, Self::Atom { .. })
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Self::List { .. })
    }

    pub fn is_empty_list(&self) -> bool {
        matches!(self, Self::List { items, .. } if items.is_empty())
    }

    pub fn as_atom(&self) -> Option<&str> {
        match self {
            Self::Atom { value, .. } => Some(value),
            Self::List { .. } => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Term]> {
        match self {
            Self::Atom { .. } => None,
            Self::List { items, .. } => Some(items),
        }
    }

    /// The children of a list, or [`QueryError::NotAList`] for an atom
    pub fn list_contents(&self) -> Result<&[Term], QueryError> {
        self.as_list().ok_or(QueryError::NotAList {
            position: self.position(),
        })
    }

    /// The children of a list; an atom is treated as a list containing only itself
    pub fn contents(&self) -> &[Term] {
        match self {
            Self::Atom { .. } => std::slice::from_ref(self),
            Self::List { items, .. } => items,
        }
    }

    /// Every child after the first; empty for atoms and empty lists
    pub fn tail(&self) -> &[Term] {
        match self {
            Self::List { items, .. } if !items.is_empty() => &items[1..],
            _ => &[],
        }
    }

    /// The tag of this term: the atom itself, or recursively the initial
    /// string of a list's first element (empty for an empty list)
    pub fn initial_string(&self) -> &str {
        let mut current = self;
        loop {
            match current {
                Self::Atom { value, .. } => return value,
                Self::List { items, .. } => match items.first() {
                    Some(first) => current = first,
                    None => return "",
                },
            }
        }
    }

    pub fn starts_with(&self, tag: &str) -> bool {
        self.initial_string() == tag
    }

    /// A position-independent hash, stable for equal trees within one build
    pub fn structural_hash(&self) -> u64 {
        let mut hasher = FxHasher::default();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

impl PartialEq for Term {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Atom { value: a, .. }, Self::Atom { value: b, .. }) => a == b,
            (Self::List { items: a, .. }, Self::List { items: b, .. }) => a == b,
            _ => false,
        }
    }
}

impl Eq for Term {}

impl Hash for Term {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Self::Atom { value, .. } => {
                state.write_u8(1);
                value.hash(state);
            }
            Self::List { items, .. } => {
                state.write_u8(0);
                items.hash(state);
            }
        }
    }
}

impl From<&str> for Term {
    fn from(value: &str) -> Self {
        Self::atom(value)
    }
}

impl From<String> for Term {
    fn from(value: String) -> Self {
        Self::atom(value)
    }
}

impl From<SmolStr> for Term {
    fn from(value: SmolStr) -> Self {
        Self::atom(value)
    }
}

impl From<Vec<Term>> for Term {
    fn from(items: Vec<Term>) -> Self {
        Self::list(items)
    }
}

impl std::fmt::Display for Term {
    /// The compact form under the default coding
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&crate::formatter::serialize(self))
    }
}

/// Build a list term from anything convertible into [`Term`]
///
/// ```
/// use termpose::terms;
///
/// let t = terms!["a", terms!["b", "c"], terms![]];
/// assert_eq!(t.to_string(), "(a (b c) ())");
/// ```
#[macro_export]
macro_rules! terms {
    ($($item:expr),* $(,)?) => {{
        let items: ::std::vec::Vec<$crate::Term> = ::std::vec![$($crate::Term::from($item)),*];
        $crate::Term::list(items)
    }};
}
