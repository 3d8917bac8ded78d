//! Foundation types for the termpose toolchain.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`Position`] - Line/column positions recorded on terms and errors
//! - [`rune`] - One-code-point-at-a-time UTF-8 decoding for the parser
//! - [`TextSize`] - Byte offsets into the parsed input
//!
//! This module has NO dependencies on other termpose modules.

mod position;
pub mod rune;

pub use position::Position;

// Re-export text-size types for convenience
pub use text_size;
pub use text_size::TextSize;
