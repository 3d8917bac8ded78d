//! Pretty-printing options

/// Layout options for [`pretty_print_with`](super::pretty_print_with)
///
/// Indentation comes from the [`Coding`](crate::Coding) so that printed
/// text satisfies that coding's strictness rules when read back.
#[derive(Debug, Clone)]
pub struct PrettyOptions {
    /// Maximum line width before a list is broken over several lines
    pub print_width: usize,
    /// Terminator written after every line
    pub line_ending: String,
}

impl Default for PrettyOptions {
    fn default() -> Self {
        Self {
            print_width: 80,
            line_ending: "\n".to_string(),
        }
    }
}

impl PrettyOptions {
    pub fn with_width(print_width: usize) -> Self {
        Self {
            print_width,
            ..Self::default()
        }
    }

    pub fn with_line_ending(mut self, line_ending: impl Into<String>) -> Self {
        self.line_ending = line_ending.into();
        self
    }
}
