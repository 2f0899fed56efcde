// Copyright (c) 2026 The Parsive Contributors
//
// This file is part of the `parsive` command-line argument parsing library.
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

//! Long-option abbreviation: a unique prefix resolves, an ambiguous one errors naming every
//! candidate.

use parsive::ArgparseError;
use parsive::Parser;

fn tokens(strs: &[&str]) -> Vec<String> {
    strs.iter().map(|s| s.to_string()).collect()
}

fn ambiguous_parser() -> Parser {
    let mut parser = Parser::new("foo");
    parser.add_argument(&["--foo"]).default("foo-default");
    parser.add_argument(&["--foobar"]).default("foobar-default");
    parser
}

#[test]
fn unambiguous_prefix_selects_the_one_matching_option() {
    let parser = ambiguous_parser();
    let ns = parser.parse_args(&tokens(&["--foob", "x"])).unwrap();
    assert_eq!(ns.get_str("foobar"), Some("x"));
    assert_eq!(ns.get_str("foo"), Some("foo-default"));
}

#[test]
fn ambiguous_prefix_errors_naming_both_candidates() {
    let parser = ambiguous_parser();
    let err = parser.parse_args(&tokens(&["--fo", "x"])).unwrap_err();
    match err {
        ArgparseError::AmbiguousOption { token, candidates } => {
            assert_eq!(token, "--fo");
            assert!(candidates.contains(&"--foo".to_string()));
            assert!(candidates.contains(&"--foobar".to_string()));
        }
        other => panic!("expected AmbiguousOption, got {:?}", other),
    }
}

#[test]
fn an_exact_match_is_preferred_over_abbreviation_candidates() {
    let parser = ambiguous_parser();
    let ns = parser.parse_args(&tokens(&["--foo", "x"])).unwrap();
    assert_eq!(ns.get_str("foo"), Some("x"));
    assert_eq!(ns.get_str("foobar"), Some("foobar-default"));
}
