//! Round-trip Tests
//!
//! Serializing a tree and parsing the text back must give an equal tree, in
//! both surface styles and under every coding.

use proptest::prelude::*;
use rstest::rstest;
use termpose::{
    Coding, PrettyOptions, Term, parse, parse_with, pretty_print, pretty_print_with, serialize,
    serialize_with, terms,
};

use crate::helpers::source_fixtures::PARSED_FIXTURES;

// ============================================================================
// Fixtures
// ============================================================================

#[test]
fn test_fixtures_survive_compact_form() {
    for (name, term) in PARSED_FIXTURES.iter() {
        let text = serialize(term);
        assert_eq!(&parse(&text).unwrap(), term, "{name}: {text}");
    }
}

#[rstest]
fn test_fixtures_survive_pretty_form(#[values(0, 10, 20, 80)] width: usize) {
    for (name, term) in PARSED_FIXTURES.iter() {
        let text = pretty_print(term, width);
        let reparsed = parse(&text)
            .unwrap_or_else(|err| panic!("{name} at width {width}: {err}\n{text}"));
        assert_eq!(&reparsed, term, "{name} at width {width}:\n{text}");
        assert_eq!(pretty_print(&reparsed, width), text, "{name} is not idempotent");
    }
}

#[rstest]
#[case::pretty(Coding::pretty())]
#[case::bracketed(Coding::bracketed())]
#[case::cli(Coding::cli())]
fn test_fixtures_survive_every_coding(#[case] coding: Coding) {
    let options = PrettyOptions::with_width(12);
    for (name, term) in PARSED_FIXTURES.iter() {
        let compact = serialize_with(term, &coding);
        assert_eq!(&parse_with(&compact, &coding).unwrap(), term, "{name}: {compact}");

        let pretty = pretty_print_with(term, &coding, &options);
        assert_eq!(&parse_with(&pretty, &coding).unwrap(), term, "{name}:\n{pretty}");
    }
}

// ============================================================================
// Awkward atoms
// ============================================================================

#[rstest]
#[case("")]
#[case(" ")]
#[case("\"")]
#[case("\\")]
#[case("\\\"")]
#[case("tab\there")]
#[case("line\r\nbreak")]
#[case("(")]
#[case(":")]
#[case("ends with space ")]
fn test_awkward_atom_round_trips(#[case] value: &str) {
    let term = terms!["key", value, terms![value]];
    assert_eq!(parse(&serialize(&term)).unwrap(), term);
    assert_eq!(parse(&pretty_print(&term, 0)).unwrap(), term);
}

#[test]
fn test_empty_lists_round_trip() {
    let term = terms![Term::empty_list(), terms![Term::empty_list()], "x"];
    for width in [0, 3, 80] {
        assert_eq!(parse(&pretty_print(&term, width)).unwrap(), term, "width {width}");
    }
    assert_eq!(parse(&serialize(&term)).unwrap(), term);
}

// ============================================================================
// Properties
// ============================================================================

fn plain_atom() -> impl Strategy<Value = String> {
    "[a-z0-9_.+-]{1,6}"
}

fn any_atom() -> impl Strategy<Value = String> {
    "[a-zé☃ \t\r\n\"\\\\():\\[\\]=;]{0,6}"
}

fn tree(atom: BoxedStrategy<String>) -> impl Strategy<Value = Term> {
    atom.prop_map(Term::atom).prop_recursive(4, 48, 6, |inner| {
        prop::collection::vec(inner, 0..6).prop_map(Term::list)
    })
}

proptest! {
    #[test]
    fn prop_compact_round_trip(term in tree(any_atom().boxed())) {
        let text = serialize(&term);
        prop_assert_eq!(parse(&text).unwrap(), term);
    }

    #[test]
    fn prop_pretty_round_trip(term in tree(any_atom().boxed()), width in 0usize..40) {
        let text = pretty_print(&term, width);
        let reparsed = parse(&text).unwrap();
        prop_assert_eq!(&reparsed, &term);
        prop_assert_eq!(pretty_print(&reparsed, width), text);
    }

    #[test]
    fn prop_tab_coding_round_trip(term in tree(plain_atom().boxed()), width in 0usize..40) {
        let coding = Coding::bracketed();
        let text = pretty_print_with(&term, &coding, &PrettyOptions::with_width(width));
        prop_assert_eq!(parse_with(&text, &coding).unwrap(), term);
    }

    #[test]
    fn prop_wide_print_is_single_line(term in tree(plain_atom().boxed())) {
        let text = pretty_print(&term, usize::MAX);
        prop_assert_eq!(text.lines().count(), 1);
    }
}
