/// Position tracking for terms
///
/// Stores the source location (line/column) at which a term began, for error
/// reporting and for callers that want to point back into the source text.
///
/// Parsed terms carry 1-based lines and 1-based columns counted in code points.
/// Terms built through the API carry `Position::default()`, which is (0, 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// The position of the first character of a document
    pub fn start() -> Self {
        Self::new(1, 1)
    }

    /// Whether this position was recorded by the parser, as opposed to
    /// defaulted by API construction
    pub fn is_known(&self) -> bool {
        self.line != 0
    }

    /// Advance past one code point
    pub(crate) fn advance(&mut self, ch: char) {
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {} column {}", self.line, self.column)
    }
}
