//! # termpose-base
//!
//! Parser and serializer for termpose, a compact s-expression notation that
//! is sensitive to both brackets and indentation.
//!
//! ```
//! let config = termpose::parse("server\n  host localhost\n  port 8080").unwrap();
//! let port = config.find_sub_term("port").unwrap();
//! assert_eq!(port.as_atom(), Some("8080"));
//! assert_eq!(config.to_string(), "(server (host localhost) (port 8080))");
//! ```
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! parser    → State machine, node arena, ParseError
//!   ↓
//! formatter → Compact and pretty serialization
//!   ↓
//! term      → Term tree, keyed queries, QueryError
//!   ↓
//! coding    → Delimiters and indentation style
//!   ↓
//! base      → Position, UTF-8 rune decoding, TextSize
//! ```

// ============================================================================
// MODULES (dependency order: base → coding → term → formatter → parser)
// ============================================================================

/// Foundation types: Position, rune decoding, TextSize
pub mod base;

/// Coding: delimiter characters and indentation style
pub mod coding;

/// Term: the immutable tree, navigation and keyed lookup
pub mod term;

/// Formatter: compact and pretty-printed output
pub mod formatter;

/// Parser: indentation-aware state machine and parse errors
pub mod parser;

// Re-export commonly needed items
pub use coding::{Coding, CodingError, IndentStyle};
pub use formatter::{PrettyOptions, pretty_print, pretty_print_with, serialize, serialize_with};
pub use parser::{
    DEFAULT_MAX_NESTING, ParseError, ParseErrorKind, Parser, parse, parse_as_list,
    parse_as_list_with, parse_bytes, parse_bytes_as_list, parse_bytes_as_list_with,
    parse_bytes_with, parse_with,
};
pub use term::{QueryError, Term};

// Re-export foundation types
pub use base::{Position, TextSize};
