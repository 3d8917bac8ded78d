//! Codings: the delimiter and indentation configuration of the notation
//!
//! A [`Coding`] decides which characters open and close a bracketed list,
//! which character acts as the pairing sugar (`key: value`), and what one
//! level of indentation looks like. Parsing and serialization both consult
//! the same coding, so text written under one coding reads back under it.

use thiserror::Error;

/// What one level of indentation consists of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IndentStyle {
    /// `n` spaces per level
    Spaces(usize),
    /// One tab per level
    Tab,
}

impl IndentStyle {
    /// The character an indent is made of
    pub fn character(&self) -> char {
        match self {
            Self::Spaces(_) => ' ',
            Self::Tab => '\t',
        }
    }

    /// Number of characters in one level
    pub fn width(&self) -> usize {
        match self {
            Self::Spaces(n) => *n,
            Self::Tab => 1,
        }
    }
}

/// Errors reported by [`Coding::validate`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodingError {
    /// Open and close are not one of `()`, `[]`, `{}`
    #[error("brackets {open:?} and {close:?} are not a matching pair")]
    UnmatchedBrackets { open: char, close: char },

    /// The pairing character collides with syntax the parser already reserves
    #[error("pairing character {0:?} is reserved")]
    ReservedPairing(char),

    /// Space indentation must be between 1 and 16 spaces wide
    #[error("indentation of {0} spaces is out of range (1 to 16)")]
    IndentWidth(usize),
}

/// Delimiter and indentation configuration
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coding {
    /// Character that opens a bracketed list
    pub open: char,
    /// Character that closes a bracketed list
    pub close: char,
    /// Character that wraps the term before it and the term after it into a list
    pub pairing: char,
    /// One level of indentation
    pub indent: IndentStyle,
    /// Require every indent step to be exactly one `indent` unit
    pub strict_indent: bool,
}

impl Default for Coding {
    fn default() -> Self {
        Self::pretty()
    }
}

impl Coding {
    /// `(`, `)`, `:` with two-space soft indentation
    pub fn pretty() -> Self {
        Self {
            open: '(',
            close: ')',
            pairing: ':',
            indent: IndentStyle::Spaces(2),
            strict_indent: false,
        }
    }

    /// `[`, `]`, `;` with tab indentation
    pub fn bracketed() -> Self {
        Self {
            open: '[',
            close: ']',
            pairing: ';',
            indent: IndentStyle::Tab,
            strict_indent: false,
        }
    }

    /// `[`, `]`, `=` with two-space indentation; none of these need shell quoting
    pub fn cli() -> Self {
        Self {
            open: '[',
            close: ']',
            pairing: '=',
            indent: IndentStyle::Spaces(2),
            strict_indent: false,
        }
    }

    pub fn with_brackets(mut self, open: char, close: char) -> Self {
        self.open = open;
        self.close = close;
        self
    }

    pub fn with_pairing(mut self, pairing: char) -> Self {
        self.pairing = pairing;
        self
    }

    pub fn with_indent(mut self, indent: IndentStyle) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_strict_indent(mut self, strict: bool) -> Self {
        self.strict_indent = strict;
        self
    }

    /// Check that the parser can work with this coding
    pub fn validate(&self) -> Result<(), CodingError> {
        if !matches!((self.open, self.close), ('(', ')') | ('[', ']') | ('{', '}')) {
            return Err(CodingError::UnmatchedBrackets {
                open: self.open,
                close: self.close,
            });
        }
        let p = self.pairing;
        if p.is_whitespace() || p == '"' || p == '\\' || p == self.open || p == self.close {
            return Err(CodingError::ReservedPairing(p));
        }
        match self.indent {
            IndentStyle::Spaces(n) if !(1..=16).contains(&n) => Err(CodingError::IndentWidth(n)),
            _ => Ok(()),
        }
    }

    /// Whether `ch` is one of this coding's three delimiters
    pub fn is_delimiter(&self, ch: char) -> bool {
        ch == self.open || ch == self.close || ch == self.pairing
    }

    /// Whether an atom must be quoted to survive a round trip
    pub fn needs_escape(&self, atom: &str) -> bool {
        atom.is_empty()
            || atom
                .chars()
                .any(|c| matches!(c, ' ' | '\t' | '\n' | '\r' | '"') || self.is_delimiter(c))
    }

    /// One level of indentation
    pub fn indent_unit(&self) -> String {
        self.indent(1)
    }

    /// Generate indentation string for the given level
    pub fn indent(&self, level: usize) -> String {
        match self.indent {
            IndentStyle::Spaces(n) => " ".repeat(n * level),
            IndentStyle::Tab => "\t".repeat(level),
        }
    }
}
