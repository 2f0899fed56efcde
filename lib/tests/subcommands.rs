// Copyright (c) 2026 The Parsive Contributors
//
// This file is part of the `parsive` command-line argument parsing library.
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

//! `subparsers` dispatch: the selector value lands in the parent namespace, the chosen child
//! parser's own options land alongside it, and a program given no subcommand at all is not an
//! error unless the destination was declared required.

use parsive::ArgparseError;
use parsive::Parser;

fn tokens(strs: &[&str]) -> Vec<String> {
    strs.iter().map(|s| s.to_string()).collect()
}

fn build() -> Parser {
    let mut parser = Parser::new("tool");
    parser.add_argument(&["--verbose"]).action_store_true();

    let subparsers = parser.add_subparsers(Some("command"), None, Some("the action to perform"));
    let add = subparsers.add_parser("add", Some("add two numbers"));
    add.add_argument(&["a"]);
    add.add_argument(&["b"]);

    let remove = subparsers.add_parser("remove", Some("remove an item"));
    remove.add_argument(&["--force"]).action_store_true();

    parser
}

#[test]
fn dispatches_to_the_named_child_and_merges_its_namespace() {
    let parser = build();
    let ns = parser.parse_args(&tokens(&["--verbose", "add", "1", "2"])).unwrap();
    assert_eq!(ns.get_str("command"), Some("add"));
    assert_eq!(ns.get_bool("verbose"), Some(true));
    assert_eq!(ns.get_str("a"), Some("1"));
    assert_eq!(ns.get_str("b"), Some("2"));
}

#[test]
fn each_child_keeps_its_own_options_distinct() {
    let parser = build();
    let ns = parser.parse_args(&tokens(&["remove", "--force"])).unwrap();
    assert_eq!(ns.get_str("command"), Some("remove"));
    assert_eq!(ns.get_bool("force"), Some(true));
}

#[test]
fn an_unknown_subcommand_name_is_rejected() {
    let parser = build();
    let err = parser.parse_args(&tokens(&["frobnicate"])).unwrap_err();
    match err {
        ArgparseError::UnknownSubcommand { value, .. } => assert_eq!(value, "frobnicate"),
        other => panic!("expected UnknownSubcommand, got {:?}", other),
    }
}

#[test]
fn no_subcommand_given_is_not_an_error_when_the_destination_is_not_required() {
    let parser = build();
    let ns = parser.parse_args(&[]).unwrap();
    assert_eq!(ns.get_str("command"), None);
}
