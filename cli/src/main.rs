// Copyright (c) 2026 The Parsive Contributors
//
// This file is part of the `parsive` command-line argument parsing library.
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

//! Playground program for exercising the `parsive` library.
//!
//! Declares a small sample parser (global `--verbose`/`--name` plus a `build`/`run` subcommand
//! pair, each with its own options) and prints the resulting [`Namespace`](parsive::Namespace)
//! for whatever arguments it's given. Run with `RUST_LOG=debug` to see the matching engine's own
//! trace/debug logging.

use parsive::value::Value;
use parsive::{Args, Namespace, Parser};

fn build_parser() -> Parser {
    let mut parser = Parser::new("playground");
    parser.set_description(
        "Sample program exercising the parsive argument parser: a couple of global flags plus a \
         `build`/`run` subcommand pair, each with its own options.",
    );

    parser.add_argument(&["-h", "--help"]).action_help();
    parser
        .add_argument(&["-v", "--verbose"])
        .action_count()
        .help("increase output verbosity (may be repeated)");
    parser
        .add_argument(&["--name"])
        .default("world")
        .help("who to greet before dispatching to the subcommand");

    let subparsers = parser.add_subparsers(Some("command"), None, Some("the action to perform"));

    let build = subparsers.add_parser("build", Some("compile the project"));
    build
        .add_argument(&["--release"])
        .action_store_true()
        .help("build with optimizations");
    build
        .add_argument(&["--target"])
        .choices(vec![Value::from("debug"), Value::from("release")])
        .default("debug")
        .help("which profile directory to write into");

    let run = subparsers.add_parser("run", Some("run the project"));
    run.add_argument(&["args"])
        .nargs(parsive::arity::Nargs::Remainder)
        .default(Value::List(Vec::new()))
        .help("arguments forwarded to the built binary");

    parser
}

fn print_namespace(ns: &Namespace) {
    for (key, value) in ns.iter() {
        println!("  {} = {}", key, value);
    }
}

fn main() {
    env_logger::init();

    let parser = build_parser();
    let args = Args::new();

    println!("[ input arguments ]\n");
    if args.is_empty() {
        println!("  (none)");
    } else {
        for (i, arg) in args.as_slice().iter().enumerate() {
            println!("  [{}]: {}", i, arg);
        }
    }

    println!("\n[ namespace ]\n");
    let namespace = parser.parse_process_args();
    match namespace {
        Ok(ns) => print_namespace(&ns),
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}
