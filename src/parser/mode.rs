//! Parser modes
//!
//! The parser is a character-at-a-time state machine; [`Mode`] names the
//! state that decides what the next character means.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mode {
    /// Collecting leading whitespace at the start of a line
    EatingIndentation,
    /// Between terms on a line
    SeekingTerm,
    /// Directly after a finished atom or a close bracket
    ImmediatelyAfterTerm,
    /// Inside an unquoted atom
    BuildingSymbol,
    /// Inside a quoted atom
    BuildingQuotedSymbol,
    /// After a backslash in a quoted atom; pops back once one character is consumed
    TakingEscape,
    /// After an empty quote and a line break, waiting for the block's first line
    MultiLineFirstLine,
    /// At the start of a continuation line of a block string
    MultiLineTakingIndent,
    /// Inside the text of a block string line
    MultiLineTakingText,
}

impl Mode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::EatingIndentation => "eating-indentation",
            Self::SeekingTerm => "seeking-term",
            Self::ImmediatelyAfterTerm => "immediately-after-term",
            Self::BuildingSymbol => "building-symbol",
            Self::BuildingQuotedSymbol => "building-quoted-symbol",
            Self::TakingEscape => "taking-escape",
            Self::MultiLineFirstLine => "multi-line-first-line",
            Self::MultiLineTakingIndent => "multi-line-taking-indent",
            Self::MultiLineTakingText => "multi-line-taking-text",
        }
    }
}
