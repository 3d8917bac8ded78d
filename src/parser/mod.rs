//! Parser for the termpose notation
//!
//! A hand-rolled, single-pass state machine. It decodes UTF-8 one code point
//! at a time and builds the tree in an index-addressed arena, so a finished
//! atom can be re-tagged into a list in place when a bracket, a pairing
//! character or a quote follows it directly.
//!
//! ## Architecture
//!
//! ```text
//! bytes
//!     ↓
//! rune decoder (base::rune) → one code point, `\r\n` folded to `\n`
//!     ↓
//! Mode dispatch → attach / upgrade / collapse on the Arena
//!     ↓
//! Arena::build → immutable Term
//! ```

#[allow(clippy::module_inception)]
mod parser;

mod arena;
pub mod errors;
mod mode;

pub use errors::{ParseError, ParseErrorKind};
pub use parser::{
    DEFAULT_MAX_NESTING, Parser, parse, parse_as_list, parse_as_list_with, parse_bytes, parse_bytes_as_list,
    parse_bytes_as_list_with, parse_bytes_with, parse_with,
};
