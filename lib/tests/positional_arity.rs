// Copyright (c) 2026 The Parsive Contributors
//
// This file is part of the `parsive` command-line argument parsing library.
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

//! Multi-value positionals: `REMAINDER` preserves everything verbatim (including a literal
//! `--`), and a `*`-arity positional falls back to its configured default when given no values.

use parsive::arity::Nargs;
use parsive::value::Value;
use parsive::Parser;

fn tokens(strs: &[&str]) -> Vec<String> {
    strs.iter().map(|s| s.to_string()).collect()
}

#[test]
fn remainder_keeps_every_token_verbatim_including_a_literal_double_dash() {
    let mut parser = Parser::new("foo");
    parser.add_argument(&["--verbose"]).action_store_true();
    parser.add_argument(&["rest"]).nargs(Nargs::Remainder);

    let ns = parser.parse_args(&tokens(&["--verbose", "--", "a", "-b"])).unwrap();
    assert_eq!(ns.get_bool("verbose"), Some(true));
    let rest = ns.get_list("rest").unwrap();
    let rendered: Vec<&str> = rest.iter().map(|v| v.as_str().unwrap()).collect();
    assert_eq!(rendered, vec!["--", "a", "-b"]);
}

#[test]
fn zero_or_more_positional_falls_back_to_its_default_when_no_tokens_are_given() {
    let mut parser = Parser::new("foo");
    parser
        .add_argument(&["names"])
        .nargs(Nargs::ZeroOrMore)
        .default(Value::List(vec![Value::from("everyone")]));

    let ns = parser.parse_args(&[]).unwrap();
    let names = ns.get_list("names").unwrap();
    assert_eq!(names.len(), 1);
    assert_eq!(names[0].as_str(), Some("everyone"));
}

#[test]
fn zero_or_more_positional_with_values_overrides_the_default_entirely() {
    let mut parser = Parser::new("foo");
    parser
        .add_argument(&["names"])
        .nargs(Nargs::ZeroOrMore)
        .default(Value::List(vec![Value::from("everyone")]));

    let ns = parser.parse_args(&tokens(&["alice", "bob"])).unwrap();
    let names = ns.get_list("names").unwrap();
    let rendered: Vec<&str> = names.iter().map(|v| v.as_str().unwrap()).collect();
    assert_eq!(rendered, vec!["alice", "bob"]);
}

#[test]
fn one_or_more_positional_requires_at_least_one_value() {
    let mut parser = Parser::new("foo");
    parser.add_argument(&["names"]).nargs(Nargs::OneOrMore);

    assert!(parser.parse_args(&[]).is_err());
    let ns = parser.parse_args(&tokens(&["alice"])).unwrap();
    assert_eq!(ns.get_list("names").unwrap().len(), 1);
}
