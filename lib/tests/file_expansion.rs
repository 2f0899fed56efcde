// Copyright (c) 2026 The Parsive Contributors
//
// This file is part of the `parsive` command-line argument parsing library.
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

//! `@file` argument expansion: a token beginning with a configured file-prefix character is
//! replaced by the file's lines (recursively, since a line may itself be an `@file` token), and
//! a missing file surfaces as a parse error rather than being silently dropped.

use std::io::Write;

use parsive::{ArgparseError, Parser};

fn tokens(strs: &[&str]) -> Vec<String> {
    strs.iter().map(|s| s.to_string()).collect()
}

fn write_temp_file(name: &str, contents: &str) -> std::path::PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("parsive-test-{}-{}", std::process::id(), name));
    let mut f = std::fs::File::create(&path).expect("create temp arg file");
    f.write_all(contents.as_bytes()).expect("write temp arg file");
    path
}

#[test]
fn an_at_file_token_is_replaced_by_its_lines() {
    let path = write_temp_file("basic.args", "--name\nworld\n");

    let mut parser = Parser::new("foo");
    parser.set_file_prefix_chars("@");
    parser.add_argument(&["--name"]);

    let at_token = format!("@{}", path.display());
    let ns = parser.parse_args(&tokens(&[&at_token])).unwrap();
    assert_eq!(ns.get_str("name"), Some("world"));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn an_at_file_expansion_is_recursive_over_its_own_lines() {
    let inner = write_temp_file("inner.args", "--flag\n");
    let outer_contents = format!("@{}\n", inner.display());
    let outer = write_temp_file("outer.args", &outer_contents);

    let mut parser = Parser::new("foo");
    parser.set_file_prefix_chars("@");
    parser.add_argument(&["--flag"]).action_store_true();

    let at_token = format!("@{}", outer.display());
    let ns = parser.parse_args(&tokens(&[&at_token])).unwrap();
    assert_eq!(ns.get_bool("flag"), Some(true));

    let _ = std::fs::remove_file(&inner);
    let _ = std::fs::remove_file(&outer);
}

#[test]
fn a_missing_argument_file_is_a_parse_error_not_a_silent_drop() {
    let mut parser = Parser::new("foo");
    parser.set_file_prefix_chars("@");
    parser.add_argument(&["--name"]);

    let missing = std::env::temp_dir().join("parsive-test-definitely-does-not-exist.args");
    let at_token = format!("@{}", missing.display());
    let err = parser.parse_args(&tokens(&[&at_token])).unwrap_err();
    assert!(matches!(err, ArgparseError::FileExpansionFailed { .. }));
}

#[test]
fn without_a_configured_file_prefix_an_at_sign_token_is_read_literally() {
    let mut parser = Parser::new("foo");
    parser.add_argument(&["value"]);

    let ns = parser.parse_args(&tokens(&["@whatever"])).unwrap();
    assert_eq!(ns.get_str("value"), Some("@whatever"));
}
