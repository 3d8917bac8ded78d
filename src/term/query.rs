//! Keyed lookup over a list's children
//!
//! Children are matched by [`Term::initial_string`], so `(port 80)`,
//! `((port) 80)` and the atom `port` all answer to the key `port`.
//! The `find_*` family fails with a [`QueryError`] on a miss; the
//! `seek_*` family returns `None` instead.

use thiserror::Error;

use super::Term;
use crate::base::Position;

/// Errors raised when navigating a tree by key
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// No child carries the key.
    #[error("{position}: no term tagged {key:?}")]
    KeyNotFound { key: String, position: Position },

    /// The term queried is an atom.
    #[error("{position}: expected a list, found an atom")]
    NotAList { position: Position },

    /// A child carries the key but is not a `(key value)` pair.
    #[error("{position}: term tagged {key:?} has {len} elements, expected exactly 2")]
    MalformedPair {
        key: String,
        len: usize,
        position: Position,
    },
}

impl QueryError {
    /// Create a key-not-found error.
    pub fn key_not_found(key: impl Into<String>, position: Position) -> Self {
        Self::KeyNotFound {
            key: key.into(),
            position,
        }
    }

    /// Where in the source the failed query pointed
    pub fn position(&self) -> Position {
        match self {
            Self::KeyNotFound { position, .. }
            | Self::NotAList { position }
            | Self::MalformedPair { position, .. } => *position,
        }
    }
}

impl Term {
    /// The first child whose initial string is `key`
    pub fn find_term(&self, key: &str) -> Result<&Term, QueryError> {
        self.list_contents()?
            .iter()
            .find(|t| t.starts_with(key))
            .ok_or_else(|| QueryError::key_not_found(key, self.position()))
    }

    /// Like [`find_term`](Self::find_term), but `None` on a miss or when called on an atom
    pub fn seek_term(&self, key: &str) -> Option<&Term> {
        self.find_term(key).ok()
    }

    /// The value of the first `(key value)` child
    pub fn find_sub_term(&self, key: &str) -> Result<&Term, QueryError> {
        let found = self.find_term(key)?;
        match found.as_list() {
            Some([_, value]) => Ok(value),
            Some(items) => Err(QueryError::MalformedPair {
                key: key.to_string(),
                len: items.len(),
                position: found.position(),
            }),
            None => Err(QueryError::MalformedPair {
                key: key.to_string(),
                len: 1,
                position: found.position(),
            }),
        }
    }

    /// Like [`find_sub_term`](Self::find_sub_term), but `None` on any failure,
    /// including a match that is not a `(key value)` pair
    pub fn seek_sub_term(&self, key: &str) -> Option<&Term> {
        self.find_sub_term(key).ok()
    }
}
