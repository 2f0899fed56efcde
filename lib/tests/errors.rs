// Copyright (c) 2026 The Parsive Contributors
//
// This file is part of the `parsive` command-line argument parsing library.
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

//! Error shapes surfaced by [`parse_args`](Parser::parse_args): unrecognized arguments (with a
//! fuzzy suggestion when one is close enough), invalid choices, and missing required arguments.

use parsive::value::Value;
use parsive::ArgparseError;
use parsive::Parser;

fn tokens(strs: &[&str]) -> Vec<String> {
    strs.iter().map(|s| s.to_string()).collect()
}

#[test]
fn a_single_unrecognized_option_suggests_the_nearest_declared_one() {
    let mut parser = Parser::new("foo");
    parser.add_argument(&["--verbose"]).action_store_true();

    // Same length as the real option, so this can't accidentally resolve as a valid
    // abbreviation; it only reaches the unrecognized path, where fuzzy suggestion kicks in.
    let err = parser.parse_args(&tokens(&["--verboes"])).unwrap_err();
    match err {
        ArgparseError::UnrecognizedOption { token, suggestion } => {
            assert_eq!(token, "--verboes");
            assert_eq!(suggestion.as_deref(), Some("--verbose"));
        }
        other => panic!("expected UnrecognizedOption, got {:?}", other),
    }
}

#[test]
fn multiple_unrecognized_tokens_are_reported_together() {
    let parser = Parser::new("foo");
    let err = parser.parse_args(&tokens(&["a", "b"])).unwrap_err();
    match err {
        ArgparseError::UnrecognizedArguments(joined) => assert_eq!(joined, "a b"),
        other => panic!("expected UnrecognizedArguments, got {:?}", other),
    }
}

#[test]
fn an_invalid_choice_names_the_value_and_the_allowed_set() {
    let mut parser = Parser::new("foo");
    parser
        .add_argument(&["--level"])
        .choices(vec![Value::from("low"), Value::from("high")]);

    let err = parser.parse_args(&tokens(&["--level", "medium"])).unwrap_err();
    match err {
        ArgparseError::InvalidChoice { dest, value, choices } => {
            assert_eq!(dest, "level");
            assert_eq!(value, "medium");
            assert_eq!(choices.len(), 2);
        }
        other => panic!("expected InvalidChoice, got {:?}", other),
    }
}

#[test]
fn a_missing_required_optional_is_named_in_the_error() {
    let mut parser = Parser::new("foo");
    parser.add_argument(&["--required"]).required(true);

    let err = parser.parse_args(&[]).unwrap_err();
    match err {
        ArgparseError::MissingRequired(names) => assert!(names.contains("--required")),
        other => panic!("expected MissingRequired, got {:?}", other),
    }
}

#[test]
fn a_missing_required_positional_is_too_few_arguments() {
    let mut parser = Parser::new("foo");
    parser.add_argument(&["target"]);

    let err = parser.parse_args(&[]).unwrap_err();
    assert!(matches!(err, ArgparseError::TooFewArguments));
}

#[test]
fn an_explicit_value_on_a_zero_arity_flag_is_rejected() {
    let mut parser = Parser::new("foo");
    parser.add_argument(&["--verbose"]).action_store_true();

    let err = parser.parse_args(&tokens(&["--verbose=yes"])).unwrap_err();
    match err {
        ArgparseError::IgnoredExplicitArgument { dest, value } => {
            assert_eq!(dest, "--verbose");
            assert_eq!(value, "yes");
        }
        other => panic!("expected IgnoredExplicitArgument, got {:?}", other),
    }
}
