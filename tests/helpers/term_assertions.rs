//! Assertion helpers for parsed trees.

use termpose::{Coding, ParseError, ParseErrorKind, parse, parse_as_list, parse_with};

/// Assert `parse` yields a tree whose compact form is `expected`.
pub fn assert_parses(input: &str, expected: &str) {
    match parse(input) {
        Ok(term) => assert_eq!(
            term.to_string(),
            expected,
            "\n=== Input ===\n{}\n=== Expected ===\n{}\n=== Got ===\n{}",
            input,
            expected,
            term
        ),
        Err(err) => panic!("Failed to parse {:?}: {}", input, err),
    }
}

/// Assert `parse_as_list` yields a tree whose compact form is `expected`.
pub fn assert_parses_as_list(input: &str, expected: &str) {
    match parse_as_list(input) {
        Ok(term) => assert_eq!(
            term.to_string(),
            expected,
            "\n=== Input ===\n{}\n=== Expected ===\n{}\n=== Got ===\n{}",
            input,
            expected,
            term
        ),
        Err(err) => panic!("Failed to parse {:?}: {}", input, err),
    }
}

/// Assert parsing fails with `kind`, returning the error for further checks.
pub fn assert_parse_error(input: &str, kind: ParseErrorKind) -> ParseError {
    assert_parse_error_with(input, &Coding::default(), kind)
}

/// Assert parsing under `coding` fails with `kind`.
pub fn assert_parse_error_with(input: &str, coding: &Coding, kind: ParseErrorKind) -> ParseError {
    match parse_with(input, coding) {
        Ok(term) => panic!("Expected {:?} for {:?}, parsed {}", kind, input, term),
        Err(err) => {
            assert_eq!(err.kind, kind, "Wrong error for {:?}: {}", input, err);
            err
        }
    }
}
