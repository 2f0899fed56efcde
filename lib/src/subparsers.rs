// Copyright (c) 2026 The Parsive Contributors
//
// This file is part of the `parsive` command-line argument parsing library.
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

//! The `subparsers` action: a name → child-[`Parser`] map that dispatches the rest of the
//! command line to whichever child the first value names.

use crate::error::ArgparseError;
use crate::namespace::Namespace;
use crate::parser::Parser;

/// One registered sub-command: its dispatch name, its parser, and the help text shown for it
/// in the parent's listing (kept separately since a subparsers action's own `help` describes
/// the group, not any one choice).
struct Choice {
    name: String,
    parser: Parser,
    help: Option<String>,
}

/// Owns the name→parser map for a `subparsers` action.
pub struct Subparsers {
    prog_prefix: String,
    metavar: Option<String>,
    choices: Vec<Choice>,
}

impl Subparsers {
    pub fn new(prog_prefix: impl Into<String>) -> Self {
        Self { prog_prefix: prog_prefix.into(), metavar: None, choices: Vec::new() }
    }

    pub fn set_metavar(&mut self, metavar: impl Into<String>) {
        self.metavar = Some(metavar.into());
    }

    pub fn metavar(&self) -> Option<&str> {
        self.metavar.as_deref()
    }

    /// Registers and returns a handle to a new child parser named `name`. The caller configures
    /// it (`add_argument`, nested groups, ...) through the returned reference.
    pub fn add_parser(&mut self, name: &str, help: Option<&str>) -> &mut Parser {
        let prog = format!("{} {}", self.prog_prefix, name);
        self.choices.push(Choice {
            name: name.to_string(),
            parser: Parser::new(prog),
            help: help.map(str::to_string),
        });
        &mut self.choices.last_mut().unwrap().parser
    }

    pub fn choice_names(&self) -> impl Iterator<Item = &str> {
        self.choices.iter().map(|c| c.name.as_str())
    }

    pub fn choice_help(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.choices.iter().map(|c| (c.name.as_str(), c.help.as_deref()))
    }

    fn find(&self, name: &str) -> Option<&Choice> {
        self.choices.iter().find(|c| c.name == name)
    }

    /// Dispatches `rest` (the tokens following the selector) to the named child parser, mutating
    /// `namespace` in place. Returns the child's leftover extras, which the caller folds into
    /// its own.
    pub fn dispatch(
        &self,
        name: &str,
        rest: &[String],
        namespace: &mut Namespace,
    ) -> Result<Vec<String>, ArgparseError> {
        let choice = self
            .find(name)
            .ok_or_else(|| ArgparseError::UnknownSubcommand {
                dest: "command".to_string(),
                value: name.to_string(),
                choices: self.choices.iter().map(|c| crate::value::Value::from(c.name.clone())).collect(),
            })?;
        choice.parser.parse_known_into(rest, namespace)
    }
}
