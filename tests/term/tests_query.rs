//! Term Tests - Construction, Navigation and Keyed Lookup

use std::collections::HashSet;

use rstest::rstest;
use termpose::{Position, QueryError, Term, parse, parse_as_list, terms};

use crate::helpers::source_fixtures::{
    APPLICATION, INDENTED_CHILDREN, PARSED_FIXTURES, SIBLING_LINES,
};

// ============================================================================
// Construction and equality
// ============================================================================

#[test]
fn test_constructed_equals_parsed() {
    let built = terms!["harry", "has", terms!["a", "larry"], "nice"];
    assert_eq!(parse("harry has a:larry nice").unwrap(), built);
}

#[test]
fn test_parsed_trees_compare_without_positions() {
    let shallow = parse("a b c").unwrap();
    let indented = parse("\n\n    a b c").unwrap();
    assert_eq!(shallow, indented);
    assert_ne!(shallow.contents()[0].position(), indented.contents()[0].position());
    assert_eq!(shallow.structural_hash(), indented.structural_hash());
}

#[test]
fn test_hash_agrees_with_equality() {
    for (name_a, a) in PARSED_FIXTURES.iter() {
        for (name_b, b) in PARSED_FIXTURES.iter() {
            if a == b {
                assert_eq!(a.structural_hash(), b.structural_hash(), "{name_a} vs {name_b}");
            }
        }
    }
}

#[test]
fn test_indented_block_equals_flat_line() {
    // one line with an indented block reads the same as the lines laid flat
    let unique: HashSet<&Term> = PARSED_FIXTURES.iter().map(|(_, term)| term).collect();
    assert_eq!(unique.len(), PARSED_FIXTURES.len() - 1);
    assert_eq!(
        parse(INDENTED_CHILDREN).unwrap(),
        parse(SIBLING_LINES).unwrap()
    );
}

#[test]
fn test_with_position_replaces_top_position() {
    let term = Term::atom("x").with_position(Position::new(3, 9));
    assert_eq!((term.line(), term.column()), (3, 9));
    assert_eq!(term, Term::atom("x"));
}

// ============================================================================
// Navigation
// ============================================================================

#[rstest]
#[case("plain", "plain")]
#[case("(a b) c", "a")]
#[case("((deep)) x", "deep")]
#[case("() x", "")]
fn test_initial_string(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(parse(input).unwrap().initial_string(), expected);
}

#[test]
fn test_atom_acts_as_single_element_contents() {
    let atom = Term::atom("solo");
    assert_eq!(atom.contents(), &[Term::atom("solo")]);
    assert!(atom.tail().is_empty());
}

#[test]
fn test_tail_skips_head() {
    let term = parse("cmd --flag value").unwrap();
    assert_eq!(term.tail(), &[Term::atom("--flag"), Term::atom("value")]);
}

// ============================================================================
// Keyed lookup
// ============================================================================

#[rstest]
#[case("knows_javascript", "true")]
#[case("knows_C++", "true")]
fn test_find_sub_term_reads_pair_value(#[case] key: &str, #[case] value: &str) {
    let app = parse(APPLICATION).unwrap();
    assert_eq!(app.find_sub_term(key).unwrap().as_atom(), Some(value));
}

#[test]
fn test_pair_lookup_on_constructed_tree() {
    let pairs = terms![terms!["k", "v"], terms!["j", "w"]];
    assert_eq!(pairs.find_sub_term("k"), Ok(&Term::atom("v")));
    assert_eq!(pairs.seek_sub_term("missing"), None);
}

#[test]
fn test_nested_lookup() {
    let app = parse(APPLICATION).unwrap();
    let passion = app.find_term("passion").unwrap();
    assert_eq!(passion.find_sub_term("legacy").unwrap(), &Term::atom("eternal"));
    assert_eq!(passion.seek_sub_term("delusions"), Some(&Term::atom("messianic")));
}

#[test]
fn test_find_returns_first_match() {
    let config = parse_as_list("k one\nk two").unwrap();
    assert_eq!(config.find_sub_term("k").unwrap(), &Term::atom("one"));
}

#[test]
fn test_missing_key_reports_queried_term() {
    let app = parse(APPLICATION).unwrap();
    let err = app.find_term("missing").unwrap_err();
    assert_eq!(err, QueryError::key_not_found("missing", app.position()));
    assert_eq!(app.seek_term("missing"), None);
}

#[test]
fn test_missing_key_position_inside_document() {
    let doc = parse_as_list("outer\n  inner 1").unwrap();
    let outer = doc.find_term("outer").unwrap();
    let err = outer.find_term("absent").unwrap_err();
    assert_eq!(err.position(), Position::new(1, 1));
    assert_eq!(err.to_string(), "line 1 column 1: no term tagged \"absent\"");
}

#[test]
fn test_wrong_arity_pair() {
    let config = parse_as_list("k v w").unwrap();
    let err = config.find_sub_term("k").unwrap_err();
    assert_eq!(
        err,
        QueryError::MalformedPair {
            key: "k".to_string(),
            len: 3,
            position: Position::new(1, 1),
        }
    );
    assert_eq!(config.seek_sub_term("k"), None);
}

#[test]
fn test_query_on_atom() {
    let err = parse("lonely").unwrap().find_sub_term("x").unwrap_err();
    assert_eq!(err, QueryError::NotAList { position: Position::new(1, 1) });
}
