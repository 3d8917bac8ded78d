//! Serialization of term trees back to text
//!
//! Two surface styles are produced:
//! - **compact**: everything on one line, lists bracketed, e.g. `(a (b c) "d e")`
//! - **pretty**: one list per line with indentation standing in for nesting,
//!   falling back to inline form for any list that fits in the print width
//!
//! Both styles parse back to a structurally equal tree under the coding they
//! were written with.

mod options;


pub use options::PrettyOptions;

use crate::coding::Coding;
use crate::term::Term;

/// Compact form under the default coding
pub fn serialize(term: &Term) -> String {
    serialize_with(term, &Coding::default())
}

/// Compact form under `coding`
pub fn serialize_with(term: &Term, coding: &Coding) -> String {
    let mut out = String::new();
    write_compact(&mut out, term, coding);
    out
}

/// Indented form under the default coding, breaking lines wider than `print_width`
pub fn pretty_print(term: &Term, print_width: usize) -> String {
    pretty_print_with(term, &Coding::default(), &PrettyOptions::with_width(print_width))
}

/// Indented form under `coding`
pub fn pretty_print_with(term: &Term, coding: &Coding, options: &PrettyOptions) -> String {
    let mut printer = PrettyPrinter {
        coding,
        options,
        out: String::new(),
    };
    printer.term(term, 0);
    printer.out
}

// ============================================================================
// Compact form
// ============================================================================

fn write_compact(out: &mut String, term: &Term, coding: &Coding) {
    match term {
        Term::Atom { value, .. } => write_atom(out, value, coding),
        Term::List { items, .. } => {
            out.push(coding.open);
            write_inline_items(out, items, coding);
            out.push(coding.close);
        }
    }
}

fn write_inline_items(out: &mut String, items: &[Term], coding: &Coding) {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        write_compact(out, item, coding);
    }
}

fn write_atom(out: &mut String, value: &str, coding: &Coding) {
    if !coding.needs_escape(value) {
        out.push_str(value);
        return;
    }
    out.push('"');
    for ch in value.chars() {
        match escape(ch) {
            Some(code) => {
                out.push('\\');
                out.push(code);
            }
            None => out.push(ch),
        }
    }
    out.push('"');
}

/// The letter following a backslash for characters that must be escaped inside quotes
fn escape(ch: char) -> Option<char> {
    match ch {
        '\\' => Some('\\'),
        '"' => Some('"'),
        '\t' => Some('t'),
        '\n' => Some('n'),
        '\r' => Some('r'),
        _ => None,
    }
}

/// Approximate rendered width in characters; lists count their brackets and separators
fn estimate_length(term: &Term, coding: &Coding) -> usize {
    match term {
        Term::Atom { value, .. } => {
            if coding.needs_escape(value) {
                2 + value
                    .chars()
                    .map(|c| if escape(c).is_some() { 2 } else { 1 })
                    .sum::<usize>()
            } else {
                value.chars().count()
            }
        }
        Term::List { items, .. } => {
            2 + items
                .iter()
                .map(|t| 1 + estimate_length(t, coding))
                .sum::<usize>()
        }
    }
}

// ============================================================================
// Pretty form
// ============================================================================

struct PrettyPrinter<'a> {
    coding: &'a Coding,
    options: &'a PrettyOptions,
    out: String,
}

impl PrettyPrinter<'_> {
    fn term(&mut self, term: &Term, depth: usize) {
        self.out.push_str(&self.coding.indent(depth));
        match term {
            Term::Atom { value, .. } => {
                write_atom(&mut self.out, value, self.coding);
                self.end_line();
            }
            Term::List { items, .. } => self.list(term, items, depth),
        }
    }

    fn list(&mut self, whole: &Term, items: &[Term], depth: usize) {
        let width = self.options.print_width;
        let Some(first) = items.first() else {
            self.out.push(self.coding.pairing);
            self.end_line();
            return;
        };

        if estimate_length(first, self.coding) > width {
            // a bare pairing character opens a list that the indented lines fill
            self.out.push(self.coding.pairing);
            self.end_line();
            self.children(items, depth + 1);
        } else if items.len() == 1 {
            // a lone item on its own line would read back as that item, unwrapped
            write_compact(&mut self.out, whole, self.coding);
            self.end_line();
        } else if estimate_length(whole, self.coding) > width {
            write_compact(&mut self.out, first, self.coding);
            self.end_line();
            self.children(&items[1..], depth + 1);
        } else {
            write_inline_items(&mut self.out, items, self.coding);
            self.end_line();
        }
    }

    fn children(&mut self, items: &[Term], depth: usize) {
        for item in items {
            self.term(item, depth);
        }
    }

    fn end_line(&mut self) {
        self.out.push_str(&self.options.line_ending);
    }
}
