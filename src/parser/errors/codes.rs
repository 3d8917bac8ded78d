//! Error kinds for parser diagnostics
//!
//! Each kind has a stable code following the convention E{category}{number}:
//! - E01xx: Lexical errors (encoding, escapes)
//! - E02xx: Structural errors (brackets, separators)
//! - E03xx: Indentation errors
//! - E04xx: Configuration errors

use std::fmt;

/// The condition that stopped a parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    // =========================================================================
    // E01xx: Lexical errors
    // =========================================================================
    /// A malformed UTF-8 byte sequence
    InvalidEncoding,
    /// End of input directly after a backslash inside a quoted atom
    UnterminatedEscape,

    // =========================================================================
    // E02xx: Structural errors
    // =========================================================================
    /// A close bracket with no bracket open on the current line
    UnbalancedBracket,
    /// A close bracket at the start of a line, before any term
    NothingToClose,
    /// A term directly followed by another character without whitespace
    MissingSeparator,
    /// Terms nested deeper than the parser's nesting limit
    NestingTooDeep,

    // =========================================================================
    // E03xx: Indentation errors
    // =========================================================================
    /// Leading whitespace that does not extend or retreat to an enclosing scope,
    /// or that breaks a strict coding's indent unit
    InconsistentIndentation,

    // =========================================================================
    // E04xx: Configuration errors
    // =========================================================================
    /// The coding handed to the parser failed validation
    InvalidCoding,
}

impl ParseErrorKind {
    /// Get the string representation of the error code (e.g., "E0201")
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidEncoding => "E0101",
            Self::UnterminatedEscape => "E0102",
            Self::UnbalancedBracket => "E0201",
            Self::NothingToClose => "E0202",
            Self::MissingSeparator => "E0203",
            Self::NestingTooDeep => "E0204",
            Self::InconsistentIndentation => "E0301",
            Self::InvalidCoding => "E0401",
        }
    }

    /// Get a short description of the error category
    pub fn category_description(&self) -> &'static str {
        match self {
            Self::InvalidEncoding | Self::UnterminatedEscape => "lexical error",
            Self::UnbalancedBracket
            | Self::NothingToClose
            | Self::MissingSeparator
            | Self::NestingTooDeep => "structural error",
            Self::InconsistentIndentation => "indentation error",
            Self::InvalidCoding => "configuration error",
        }
    }

    /// Get the default message for this kind
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::InvalidEncoding => "not valid unicode",
            Self::UnterminatedEscape => "escape sequence cut off by the end of input",
            Self::UnbalancedBracket => "unbalanced bracket",
            Self::NothingToClose => "nothing to close",
            Self::MissingSeparator => "terms must be separated by whitespace",
            Self::NestingTooDeep => "nesting too deep",
            Self::InconsistentIndentation => "inconsistent indentation",
            Self::InvalidCoding => "invalid coding",
        }
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
