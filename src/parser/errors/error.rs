//! The parse error type
//!
//! A parse stops at its first error, so one [`ParseError`] describes the
//! whole failure: what went wrong, where, and a human-readable message.

use thiserror::Error;

use super::codes::ParseErrorKind;
use crate::base::{Position, TextSize};

/// A fatal parse error tagged with the position it was detected at
///
/// Renders as `line L column C: message`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{position}: {message}")]
pub struct ParseError {
    /// What stopped the parse
    pub kind: ParseErrorKind,
    /// Human-readable error message
    pub message: String,
    /// 1-based line and column (in code points) of the offending character
    pub position: Position,
    /// Byte offset of the offending character in the input
    pub offset: TextSize,
}

impl ParseError {
    /// Create an error carrying the kind's default message
    pub fn new(kind: ParseErrorKind, position: Position, offset: TextSize) -> Self {
        Self {
            kind,
            message: kind.default_message().to_string(),
            position,
            offset,
        }
    }

    /// Replace the message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn line(&self) -> usize {
        self.position.line
    }

    pub fn column(&self) -> usize {
        self.position.column
    }

    /// The kind's diagnostic code, e.g. `E0201`
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Format the error with its code for display
    pub fn format(&self) -> String {
        format!("{}: {} at {}", self.kind, self.message, self.position)
    }
}
