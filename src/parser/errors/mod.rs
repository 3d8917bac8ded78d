//! Parser error handling module
//!
//! - Categorized error kinds with stable codes for filtering and documentation
//! - A single position-tagged error type, since parsing stops at the first error

mod codes;
mod error;

pub use codes::ParseErrorKind;
pub use error::ParseError;
