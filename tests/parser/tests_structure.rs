//! Parser Tests - Lines, Brackets, and Pairing
//!
//! How a document's lines and inline delimiters turn into nested lists.

use rstest::rstest;
use termpose::{Term, parse, parse_as_list, terms};

use crate::helpers::source_fixtures::*;
use crate::helpers::term_assertions::{assert_parses, assert_parses_as_list};

// ============================================================================
// Single vs. list entry points
// ============================================================================

#[test]
fn test_single_line_unwraps_only_for_parse() {
    assert_eq!(parse("a b c").unwrap(), terms!["a", "b", "c"]);
    assert_eq!(parse_as_list("a b c").unwrap(), terms![terms!["a", "b", "c"]]);
}

#[test]
fn test_two_lines_never_unwrap() {
    assert_eq!(parse("a\nb").unwrap(), terms!["a", "b"]);
    assert_eq!(parse_as_list("a\nb").unwrap(), terms!["a", "b"]);
}

#[test]
fn test_single_atom() {
    assert_eq!(parse("a").unwrap(), Term::atom("a"));
    assert_eq!(parse_as_list("a").unwrap(), terms!["a"]);
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("\n\n")]
#[case("  \n\t\n ")]
fn test_empty_input_is_empty_list(#[case] input: &str) {
    assert_eq!(parse(input).unwrap(), Term::empty_list());
    assert_eq!(parse_as_list(input).unwrap(), Term::empty_list());
}

// ============================================================================
// Corpus cases
// ============================================================================

#[test]
fn test_pairing_inside_line() {
    assert_parses(ONE_LINE, "(harry has (a larry) nice)");
    assert_parses_as_list(ONE_LINE, "((harry has (a larry) nice))");
}

#[test]
fn test_two_root_lines() {
    assert_parses(TWO_LINES, "((harry has (a larry) nice) (hori ana he))");
}

#[test]
fn test_indentation_is_sugar_for_brackets() {
    let indented = parse_as_list("a\n  b\n  c").unwrap();
    assert_eq!(indented, parse_as_list("a(b c)").unwrap());
    assert_eq!(indented, terms![terms!["a", "b", "c"]]);
}

#[test]
fn test_indented_children_join_the_head_line() {
    assert_parses_as_list(INDENTED_CHILDREN, "((a a (b c)))");
}

#[test]
fn test_sibling_lines() {
    assert_parses_as_list(SIBLING_LINES, "(a a (b c))");
}

#[test]
fn test_pairing_at_line_end_receives_indented_block() {
    assert_parses_as_list(PAIRED_HEAD, "((a (b c)))");
}

#[test]
fn test_deep_indentation() {
    assert_parses(
        DEEP_INDENTATION,
        "(animol (anmal (oglomere (hemisphere (ok (no more no))) heronymous)))",
    );
}

// ============================================================================
// Brackets and pairing
// ============================================================================

#[test]
fn test_pairing_sugar_matches_brackets() {
    let paired = parse("a: b").unwrap();
    assert_eq!(paired, parse("a(b)").unwrap());
    assert_eq!(paired, terms!["a", "b"]);
}

#[rstest]
#[case("a(b)(b)", "((a b) b)")]
#[case("(a b):a", "((a b) a)")]
#[case("(a)(b)", "((a) b)")]
#[case("a (b (c d)) e", "(a (b (c d)) e)")]
#[case("a:b:c", "(a (b c))")]
#[case("a:(b c)", "(a (b c))")]
#[case("a:", "(a)")]
#[case(":", "()")]
#[case("()", "()")]
#[case("(())", "(())")]
#[case("a\tb", "(a b)")]
#[case("f(x y) g", "((f x y) g)")]
fn test_inline_structure(#[case] input: &str, #[case] expected: &str) {
    assert_parses(input, expected);
}

#[test]
fn test_lone_pairing_line_is_empty_list() {
    assert_parses_as_list(":", "(())");
}

// ============================================================================
// Line endings
// ============================================================================

#[test]
fn test_windows_line_endings_parse_identically() {
    let unix = "a\n  b\nc\n";
    let windows = unix.replace('\n', "\r\n");
    assert_eq!(parse_as_list(&windows).unwrap(), parse_as_list(unix).unwrap());
    assert_parses_as_list(&windows, "((a b) c)");
}

#[test]
fn test_lone_carriage_return_breaks_line() {
    assert_parses("a\rb", "(a b)");
}

// ============================================================================
// Positions
// ============================================================================

#[test]
fn test_root_list_has_no_position() {
    let root = parse_as_list("a b\nc").unwrap();
    assert!(!root.position().is_known());
}

#[test]
fn test_line_list_starts_at_first_item() {
    let root = parse_as_list("x\n  head tail").unwrap();
    let entry = &root.contents()[0];
    let line = &entry.tail()[0];
    assert_eq!((line.line(), line.column()), (2, 3));
    assert_eq!((entry.line(), entry.column()), (1, 1));
}

#[test]
fn test_bracket_list_starts_at_bracket() {
    let root = parse("a (b c)").unwrap();
    let bracketed = &root.contents()[1];
    assert_eq!((bracketed.line(), bracketed.column()), (1, 3));
}
