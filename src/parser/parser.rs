//! Indentation- and bracket-sensitive parser
//!
//! Consumes one code point at a time and assembles an in-progress tree in an
//! [`Arena`]. Three mechanisms open a list:
//! - brackets: `a (b c)`
//! - the pairing character, which wraps the term before it and the term after
//!   it: `a:b` is `(a b)`
//! - deeper indentation on the following line, which appends the indented
//!   lines to the current line
//!
//! Every line is first collected into its own line list. When a line turns out
//! to hold a single item it is collapsed away, so `a\n  b` gives `(a b)`
//! rather than `((a) b)`.
//!
//! Parsing stops at the first error.

use std::mem;

use tracing::{debug, trace};

use super::arena::{Arena, NodeId};
use super::errors::{ParseError, ParseErrorKind};
use super::mode::Mode;
use crate::base::rune::{self, Rune};
use crate::base::{Position, TextSize};
use crate::coding::{Coding, IndentStyle};
use crate::term::Term;

/// How many levels below the root a term may sit before parsing fails
pub const DEFAULT_MAX_NESTING: usize = 512;

// ============================================================================
// Entry points
// ============================================================================

/// Parse text under the default coding, unwrapping a sole root line
pub fn parse(text: &str) -> Result<Term, ParseError> {
    parse_with(text, &Coding::default())
}

/// Parse text under the default coding into a list of root lines
pub fn parse_as_list(text: &str) -> Result<Term, ParseError> {
    parse_as_list_with(text, &Coding::default())
}

pub fn parse_with(text: &str, coding: &Coding) -> Result<Term, ParseError> {
    parse_bytes_with(text.as_bytes(), coding)
}

pub fn parse_as_list_with(text: &str, coding: &Coding) -> Result<Term, ParseError> {
    parse_bytes_as_list_with(text.as_bytes(), coding)
}

/// Parse raw bytes, which must be UTF-8, unwrapping a sole root line
pub fn parse_bytes(bytes: &[u8]) -> Result<Term, ParseError> {
    parse_bytes_with(bytes, &Coding::default())
}

/// Parse raw bytes, which must be UTF-8, into a list of root lines
pub fn parse_bytes_as_list(bytes: &[u8]) -> Result<Term, ParseError> {
    parse_bytes_as_list_with(bytes, &Coding::default())
}

pub fn parse_bytes_with(bytes: &[u8], coding: &Coding) -> Result<Term, ParseError> {
    parse_bytes_as_list_with(bytes, coding).map(unwrap_sole_line)
}

pub fn parse_bytes_as_list_with(bytes: &[u8], coding: &Coding) -> Result<Term, ParseError> {
    let mut parser = Parser::with_coding(coding.clone());
    let result = parser.feed(bytes).and_then(|()| parser.finish());
    match &result {
        Ok(root) => debug!(
            bytes = bytes.len(),
            lines = root.contents().len(),
            "parsed document"
        ),
        Err(err) => debug!(
            line = err.line(),
            column = err.column(),
            code = err.code(),
            "parse failed: {}",
            err.message
        ),
    }
    result
}

fn unwrap_sole_line(root: Term) -> Term {
    match root {
        Term::List { mut items, .. } if items.len() == 1 => items.swap_remove(0),
        other => other,
    }
}

// ============================================================================
// Parser state
// ============================================================================

/// An enclosing indentation scope and the list its lines are appended to
#[derive(Debug, Clone, Copy)]
struct IndentLevel {
    depth: usize,
    container: NodeId,
}

/// Incremental parser
///
/// Input may arrive in arbitrary byte chunks through [`feed`](Self::feed); a
/// code point split across chunks is carried over. [`finish`](Self::finish)
/// runs the end-of-input step and yields the list of root lines.
///
/// ```
/// use termpose::Parser;
///
/// let mut parser = Parser::new();
/// parser.feed(b"greeting:hel").unwrap();
/// parser.feed(b"lo\n").unwrap();
/// assert_eq!(parser.finish().unwrap().to_string(), "((greeting hello))");
/// ```
#[derive(Debug)]
pub struct Parser {
    coding: Coding,
    arena: Arena,
    mode: Mode,
    mode_stack: Vec<Mode>,

    /// Symbol text, or the leading whitespace of the current line
    string_buffer: String,
    previous_indentation: String,
    salient_indentation: String,
    has_found_line: bool,

    indent_stack: Vec<IndentLevel>,
    /// The current line's list followed by any brackets open on it
    paren_stack: Vec<NodeId>,
    last_attached: Option<NodeId>,
    /// List opened by the pairing character; receives exactly the next term
    immediate_next: Option<NodeId>,

    multiline_indent_buffer: String,
    multiline_indent: String,

    position: Position,
    offset: TextSize,
    token_start: Position,
    token_offset: TextSize,
    max_nesting: usize,
    /// Leading bytes of a code point cut off at the end of the last chunk
    pending: Vec<u8>,
    /// The last character was `\r`, so a following `\n` belongs to the same break
    skip_line_feed: bool,
    error: Option<ParseError>,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    pub fn new() -> Self {
        Self::with_coding(Coding::default())
    }

    /// A parser for `coding`; an invalid coding is reported by the first
    /// call to [`feed`](Self::feed) or [`finish`](Self::finish)
    pub fn with_coding(coding: Coding) -> Self {
        let error = coding.validate().err().map(|err| {
            ParseError::new(ParseErrorKind::InvalidCoding, Position::default(), TextSize::new(0))
                .with_message(err.to_string())
        });
        Self {
            coding,
            arena: Arena::new(),
            mode: Mode::EatingIndentation,
            mode_stack: Vec::new(),
            string_buffer: String::new(),
            previous_indentation: String::new(),
            salient_indentation: String::new(),
            has_found_line: false,
            indent_stack: vec![IndentLevel {
                depth: 0,
                container: Arena::ROOT,
            }],
            paren_stack: Vec::new(),
            last_attached: None,
            immediate_next: None,
            multiline_indent_buffer: String::new(),
            multiline_indent: String::new(),
            position: Position::start(),
            offset: TextSize::new(0),
            token_start: Position::start(),
            token_offset: TextSize::new(0),
            max_nesting: DEFAULT_MAX_NESTING,
            pending: Vec::new(),
            skip_line_feed: false,
            error,
        }
    }

    /// Fail with [`ParseErrorKind::NestingTooDeep`] when a term sits more
    /// than `limit` levels below the root
    pub fn with_max_nesting(mut self, limit: usize) -> Self {
        self.max_nesting = limit;
        self
    }

    pub fn coding(&self) -> &Coding {
        &self.coding
    }

    /// Consume the next chunk of input
    pub fn feed(&mut self, bytes: &[u8]) -> Result<(), ParseError> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }

        let carried;
        let mut input = bytes;
        if !self.pending.is_empty() {
            let mut joined = mem::take(&mut self.pending);
            joined.extend_from_slice(bytes);
            carried = joined;
            input = &carried;
        }

        let mut i = 0;
        while i < input.len() {
            match rune::decode(&input[i..]) {
                Rune::Valid { ch, width } => {
                    i += width;
                    if let Err(err) = self.receive(ch, width) {
                        self.error = Some(err.clone());
                        return Err(err);
                    }
                }
                Rune::Invalid { .. } => {
                    let err = self.error_here(ParseErrorKind::InvalidEncoding);
                    self.error = Some(err.clone());
                    return Err(err);
                }
                Rune::Truncated => {
                    self.pending.extend_from_slice(&input[i..]);
                    break;
                }
            }
        }
        Ok(())
    }

    /// Run the end-of-input step and return the list of root lines
    pub fn finish(mut self) -> Result<Term, ParseError> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        if !self.pending.is_empty() {
            return Err(self.error_here(ParseErrorKind::InvalidEncoding));
        }
        self.dispatch(None)?;
        if let Some(id) = self.arena.find_deeper_than(self.max_nesting) {
            let limit = self.max_nesting;
            trace!(limit, "nesting limit exceeded");
            return Err(ParseError::new(
                ParseErrorKind::NestingTooDeep,
                self.arena.position(id),
                self.arena.offset(id),
            )
            .with_message(format!("terms nest more than {limit} levels deep")));
        }
        Ok(self.arena.build(Arena::ROOT))
    }

    fn receive(&mut self, ch: char, width: usize) -> Result<(), ParseError> {
        let width = TextSize::new(width as u32);
        if mem::take(&mut self.skip_line_feed) && ch == '\n' {
            self.offset += width;
            return Ok(());
        }
        let ch = if ch == '\r' {
            self.skip_line_feed = true;
            '\n'
        } else {
            ch
        };
        self.dispatch(Some(ch))?;
        self.position.advance(ch);
        self.offset += width;
        Ok(())
    }

    // =========================================================================
    // Mode bookkeeping
    // =========================================================================

    fn dispatch(&mut self, input: Option<char>) -> Result<(), ParseError> {
        match self.mode {
            Mode::EatingIndentation => self.eating_indentation(input),
            Mode::SeekingTerm => self.seeking_term(input),
            Mode::ImmediatelyAfterTerm => self.immediately_after_term(input),
            Mode::BuildingSymbol => self.building_symbol(input),
            Mode::BuildingQuotedSymbol => self.building_quoted_symbol(input),
            Mode::TakingEscape => self.taking_escape(input),
            Mode::MultiLineFirstLine => self.multi_line_first_line(input),
            Mode::MultiLineTakingIndent => self.multi_line_taking_indent(input),
            Mode::MultiLineTakingText => self.multi_line_taking_text(input),
        }
    }

    fn transition(&mut self, mode: Mode) {
        self.mode = mode;
    }

    fn push_mode(&mut self, mode: Mode) {
        trace!(from = self.mode.name(), to = mode.name(), "push mode");
        self.mode_stack.push(self.mode);
        self.mode = mode;
    }

    fn pop_mode(&mut self) {
        if let Some(mode) = self.mode_stack.pop() {
            trace!(from = self.mode.name(), to = mode.name(), "pop mode");
            self.mode = mode;
        }
    }

    /// Start an atom at the current character
    fn begin_token(&mut self, mode: Mode) {
        self.token_start = self.position;
        self.token_offset = self.offset;
        self.transition(mode);
    }

    fn error_here(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(kind, self.position, self.offset)
    }

    // =========================================================================
    // Tree assembly
    // =========================================================================

    fn indent_container(&self) -> NodeId {
        self.indent_stack
            .last()
            .map_or(Arena::ROOT, |level| level.container)
    }

    /// The list the next term goes into, opening a line list if the line has none yet
    fn receive_foremost_receptacle(&mut self, at: Position, offset: TextSize) -> NodeId {
        if let Some(next) = self.immediate_next.take() {
            return next;
        }
        if let Some(&top) = self.paren_stack.last() {
            return top;
        }
        let line = self.arena.list(at, offset);
        let container = self.indent_container();
        self.arena.push_child(container, line);
        self.paren_stack.push(line);
        line
    }

    fn attach(&mut self, term: NodeId) {
        let receptacle =
            self.receive_foremost_receptacle(self.arena.position(term), self.arena.offset(term));
        self.arena.push_child(receptacle, term);
        self.last_attached = Some(term);
    }

    fn attach_symbol(&mut self) {
        let value = mem::take(&mut self.string_buffer);
        let atom = self.arena.atom(value, self.token_start, self.token_offset);
        self.attach(atom);
    }

    fn attach_new_list(&mut self) -> NodeId {
        let list = self.arena.list(self.position, self.offset);
        self.attach(list);
        list
    }

    /// Turn the term just completed into the head of a new list, returning that list
    fn exude_last(&mut self) -> Option<NodeId> {
        let last = self.last_attached?;
        self.arena.upgrade(last);
        Some(last)
    }

    fn close_paren(&mut self) -> Result<(), ParseError> {
        if self.paren_stack.len() <= 1 {
            return Err(self.error_here(ParseErrorKind::UnbalancedBracket));
        }
        self.immediate_next = None;
        self.last_attached = self.paren_stack.pop();
        Ok(())
    }

    /// Replace the current line's list with its only element, if it has just one
    fn collapse_line(&mut self) {
        let Some(&line) = self.paren_stack.first() else {
            return;
        };
        let container = self.indent_container();
        if self.arena.collapse(container, line) {
            trace!(line = self.position.line, "collapsed single-item line");
        }
    }

    // =========================================================================
    // Indentation
    // =========================================================================

    /// Settle the leading whitespace in `string_buffer` as the new line's
    /// indentation and decide where the new line attaches
    fn finalize_indentation(&mut self) -> Result<(), ParseError> {
        let salient = mem::take(&mut self.string_buffer);
        self.previous_indentation = mem::replace(&mut self.salient_indentation, salient);

        if !self.has_found_line {
            self.has_found_line = true;
            if let Some(root) = self.indent_stack.first_mut() {
                root.depth = self.salient_indentation.len();
            }
            return Ok(());
        }

        let depth = self.salient_indentation.len();
        let previous_depth = self.previous_indentation.len();

        if depth > previous_depth {
            if !self.salient_indentation.starts_with(&self.previous_indentation) {
                return Err(self.error_here(ParseErrorKind::InconsistentIndentation));
            }
            if self.coding.strict_indent {
                self.check_indent_step(previous_depth)?;
            }
            // a line open to continuation hands its sole item over as the container
            if self.paren_stack.len() > 1 || self.immediate_next.is_some() {
                self.collapse_line();
            }
            let container = self.receive_foremost_receptacle(self.position, self.offset);
            trace!(depth, "enter indentation scope");
            self.indent_stack.push(IndentLevel { depth, container });
        } else {
            if !self.previous_indentation.starts_with(&self.salient_indentation) {
                return Err(self.error_here(ParseErrorKind::InconsistentIndentation));
            }
            self.collapse_line();
            self.immediate_next = None;
            if depth < previous_depth {
                self.leave_scopes(depth)?;
            }
            let unit = self.coding.indent;
            if self.coding.strict_indent && (previous_depth - depth) % unit.width() != 0 {
                return Err(self
                    .error_here(ParseErrorKind::InconsistentIndentation)
                    .with_message(format!("each indent must consist of {}", describe_unit(unit))));
            }
        }
        self.paren_stack.clear();
        Ok(())
    }

    /// Pop scopes deeper than `depth`; the line must land on a scope that exists
    fn leave_scopes(&mut self, depth: usize) -> Result<(), ParseError> {
        while self.indent_stack.len() > 1 && self.indent_stack.last().is_some_and(|l| l.depth > depth) {
            self.indent_stack.pop();
            trace!(depth, "leave indentation scope");
        }
        let landed = self.indent_stack.last().map_or(0, |l| l.depth);
        if landed < depth {
            return Err(self
                .error_here(ParseErrorKind::InconsistentIndentation)
                .with_message("dedent does not match any enclosing indentation"));
        }
        // dedenting past the first line's indentation rebases the root scope
        if let Some(level) = self.indent_stack.last_mut() {
            level.depth = depth;
        }
        Ok(())
    }

    /// Under a strict coding, a deeper line adds exactly one indent unit
    fn check_indent_step(&self, previous_depth: usize) -> Result<(), ParseError> {
        let unit = self.coding.indent;
        let added = &self.salient_indentation[previous_depth..];
        if added.chars().any(|c| c != unit.character()) {
            let message = match unit {
                IndentStyle::Tab => "no spaces allowed in indentation",
                IndentStyle::Spaces(_) => "no tabs allowed in indentation",
            };
            return Err(self
                .error_here(ParseErrorKind::InconsistentIndentation)
                .with_message(message));
        }
        if added.len() != unit.width() {
            return Err(self
                .error_here(ParseErrorKind::InconsistentIndentation)
                .with_message(format!("indentation must consist of {}", describe_unit(unit))));
        }
        Ok(())
    }

    // =========================================================================
    // Modes
    // =========================================================================

    fn eating_indentation(&mut self, input: Option<char>) -> Result<(), ParseError> {
        let Some(c) = input else {
            self.string_buffer.clear();
            return self.finalize_indentation();
        };
        match c {
            '\n' => self.string_buffer.clear(),
            c if c == self.coding.pairing || c == self.coding.open => {
                self.finalize_indentation()?;
                self.transition(Mode::SeekingTerm);
                return self.seeking_term(Some(c));
            }
            c if c == self.coding.close => {
                return Err(self.error_here(ParseErrorKind::NothingToClose));
            }
            '"' => {
                self.finalize_indentation()?;
                self.begin_token(Mode::BuildingQuotedSymbol);
            }
            ' ' | '\t' => self.string_buffer.push(c),
            c => {
                self.finalize_indentation()?;
                self.begin_token(Mode::BuildingSymbol);
                return self.building_symbol(Some(c));
            }
        }
        Ok(())
    }

    fn seeking_term(&mut self, input: Option<char>) -> Result<(), ParseError> {
        let Some(c) = input else {
            return self.finalize_indentation();
        };
        match c {
            c if c == self.coding.open => {
                let list = self.attach_new_list();
                self.paren_stack.push(list);
            }
            c if c == self.coding.close => {
                self.close_paren()?;
                self.transition(Mode::ImmediatelyAfterTerm);
            }
            c if c == self.coding.pairing => {
                let list = self.attach_new_list();
                self.immediate_next = Some(list);
            }
            '\n' => self.transition(Mode::EatingIndentation),
            ' ' | '\t' => {}
            '"' => self.begin_token(Mode::BuildingQuotedSymbol),
            c => {
                self.begin_token(Mode::BuildingSymbol);
                return self.building_symbol(Some(c));
            }
        }
        Ok(())
    }

    fn immediately_after_term(&mut self, input: Option<char>) -> Result<(), ParseError> {
        let Some(c) = input else {
            return self.finalize_indentation();
        };
        match c {
            c if c == self.coding.open => match self.exude_last() {
                Some(list) => {
                    self.paren_stack.push(list);
                    self.transition(Mode::SeekingTerm);
                }
                None => return self.reseek(c),
            },
            c if c == self.coding.close => self.close_paren()?,
            c if c == self.coding.pairing => match self.exude_last() {
                Some(list) => {
                    self.immediate_next = Some(list);
                    self.transition(Mode::SeekingTerm);
                }
                None => return self.reseek(c),
            },
            '\n' => self.transition(Mode::EatingIndentation),
            ' ' | '\t' => self.transition(Mode::SeekingTerm),
            '"' => match self.exude_last() {
                Some(list) => {
                    self.immediate_next = Some(list);
                    self.begin_token(Mode::BuildingQuotedSymbol);
                }
                None => return self.reseek(c),
            },
            _ => return Err(self.error_here(ParseErrorKind::MissingSeparator)),
        }
        Ok(())
    }

    /// Nothing has been attached yet, so there is no term to continue
    fn reseek(&mut self, c: char) -> Result<(), ParseError> {
        self.transition(Mode::SeekingTerm);
        self.seeking_term(Some(c))
    }

    fn building_symbol(&mut self, input: Option<char>) -> Result<(), ParseError> {
        let Some(c) = input else {
            self.attach_symbol();
            return self.finalize_indentation();
        };
        match c {
            ' ' | '\t' => {
                self.attach_symbol();
                self.transition(Mode::SeekingTerm);
            }
            c if c == '\n' || c == '"' || self.coding.is_delimiter(c) => {
                self.attach_symbol();
                self.transition(Mode::ImmediatelyAfterTerm);
                return self.immediately_after_term(Some(c));
            }
            c => self.string_buffer.push(c),
        }
        Ok(())
    }

    fn building_quoted_symbol(&mut self, input: Option<char>) -> Result<(), ParseError> {
        let Some(c) = input else {
            self.attach_symbol();
            return self.finalize_indentation();
        };
        match c {
            '"' => {
                self.attach_symbol();
                self.transition(Mode::ImmediatelyAfterTerm);
            }
            '\\' => self.push_mode(Mode::TakingEscape),
            '\n' if self.string_buffer.is_empty() => self.transition(Mode::MultiLineFirstLine),
            '\n' => {
                self.attach_symbol();
                self.transition(Mode::EatingIndentation);
            }
            c => self.string_buffer.push(c),
        }
        Ok(())
    }

    fn taking_escape(&mut self, input: Option<char>) -> Result<(), ParseError> {
        let Some(c) = input else {
            return Err(self.error_here(ParseErrorKind::UnterminatedEscape));
        };
        self.string_buffer.push(match c {
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            c => c,
        });
        self.pop_mode();
        Ok(())
    }

    fn multi_line_first_line(&mut self, input: Option<char>) -> Result<(), ParseError> {
        let Some(c) = input else {
            self.attach_symbol();
            return self.finalize_indentation();
        };
        match c {
            ' ' | '\t' => self.multiline_indent_buffer.push(c),
            // blank lines before the block's first line carry no indentation
            '\n' => self.multiline_indent_buffer.clear(),
            c => {
                self.multiline_indent = mem::take(&mut self.multiline_indent_buffer);
                if self.multiline_indent.len() > self.salient_indentation.len() {
                    if !self.multiline_indent.starts_with(&self.salient_indentation) {
                        return Err(self.error_here(ParseErrorKind::InconsistentIndentation));
                    }
                    trace!(indent = self.multiline_indent.len(), "block string");
                    self.transition(Mode::MultiLineTakingText);
                    return self.multi_line_taking_text(Some(c));
                }
                // not indented past the quote's line: the string is empty
                self.attach_symbol();
                self.string_buffer = mem::take(&mut self.multiline_indent);
                self.transition(Mode::EatingIndentation);
                return self.eating_indentation(Some(c));
            }
        }
        Ok(())
    }

    fn multi_line_taking_indent(&mut self, input: Option<char>) -> Result<(), ParseError> {
        let Some(c) = input else {
            self.attach_symbol();
            return self.finalize_indentation();
        };
        match c {
            ' ' | '\t' => {
                self.multiline_indent_buffer.push(c);
                if self.multiline_indent_buffer.len() == self.multiline_indent.len() {
                    if self.multiline_indent_buffer != self.multiline_indent {
                        return Err(self.error_here(ParseErrorKind::InconsistentIndentation));
                    }
                    // the block continues, so the previous line's break belongs to it
                    self.string_buffer.push('\n');
                    self.multiline_indent_buffer.clear();
                    self.transition(Mode::MultiLineTakingText);
                }
            }
            '\n' => self.multiline_indent_buffer.clear(),
            c => {
                let indent = mem::take(&mut self.multiline_indent_buffer);
                if !self.multiline_indent.starts_with(&indent) {
                    return Err(self.error_here(ParseErrorKind::InconsistentIndentation));
                }
                self.attach_symbol();
                self.string_buffer = indent;
                self.transition(Mode::EatingIndentation);
                return self.eating_indentation(Some(c));
            }
        }
        Ok(())
    }

    fn multi_line_taking_text(&mut self, input: Option<char>) -> Result<(), ParseError> {
        let Some(c) = input else {
            self.attach_symbol();
            return self.finalize_indentation();
        };
        match c {
            '\n' => self.transition(Mode::MultiLineTakingIndent),
            c => self.string_buffer.push(c),
        }
        Ok(())
    }
}

fn describe_unit(unit: IndentStyle) -> String {
    match unit {
        IndentStyle::Tab => "one tab".to_string(),
        IndentStyle::Spaces(1) => "one space".to_string(),
        IndentStyle::Spaces(n) => format!("{n} spaces"),
    }
}
