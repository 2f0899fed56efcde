// Copyright (c) 2026 The Parsive Contributors
//
// This file is part of the `parsive` command-line argument parsing library.
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

//! A lightweight, flexible command line argument parser modeled on the well known `argparse`
//! design: declare the positional and optional arguments a program accepts, hand the parser a
//! sequence of raw tokens, and get back a flat attribute [`Namespace`](namespace::Namespace)
//! plus (for the "known" entry points) any leftover tokens it didn't recognise.
//!
//! Licensed under the MIT license or the Apache license, Version 2.0, at your option.
//!
//! # Documentation
//!
//! Most of this crate's documentation lives in its submodules. Start with [`parser`] for the
//! top-level [`Parser`](parser::Parser) type, and [`action`] for the set of behaviors an
//! argument declaration can have.
//!
//! # Example
//!
//! ```rust
//! use parsive::Parser;
//!
//! let mut parser = Parser::new("greet");
//! parser.add_argument(&["--name"]).default("world").help("who to greet");
//! parser.add_argument(&["--shout"]).action_store_true();
//!
//! let ns = parser.parse_args_from(vec!["--name".into(), "crab".into()]).unwrap();
//! assert_eq!(ns.get_str("name"), Some("crab"));
//! ```

#![deny(bare_trait_objects)]

#[cfg(feature = "suggestions")]
extern crate strsim;

pub mod action;
pub mod args;
pub mod arity;
pub mod container;
pub mod error;
pub mod group;
pub mod help;
mod matching;
pub mod namespace;
pub mod parser;
pub mod subparsers;
mod tokenize;
pub mod types;
pub mod value;

pub use action::{Action, ActionKind};
pub use args::Args;
pub use container::ActionContainer;
pub use error::{ArgparseError, Flaw};
pub use namespace::Namespace;
pub use parser::{ArgumentBuilder, ExitBehavior, Parser};
pub use value::Value;
