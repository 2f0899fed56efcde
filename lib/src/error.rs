// Copyright (c) 2026 The Parsive Contributors
//
// This file is part of the `parsive` command-line argument parsing library.
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

//! The error taxonomy: declaration errors (thrown at build time) and parse errors (routed
//! through the parser's single `error` boundary).

use thiserror::Error;

use crate::value::Value;

/// A single validation problem found while declaring an argument or group.
///
/// Collected (rather than returned on first failure) so that `add_argument` validation can
/// report every problem with a declaration at once, the way the container's option-string
/// conflict check does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flaw {
    EmptyOptionString,
    OptionMissingPrefix(String),
    DuplicateOptionString(String),
    EmptyDestination,
    RequiredOnPositional,
    ZeroArityWithNargs(String),
    UnknownActionName(String),
    UnknownTypeName(String),
    DuplicateGroupTitle(String),
}

impl std::fmt::Display for Flaw {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Flaw::EmptyOptionString => write!(f, "option string may not be empty"),
            Flaw::OptionMissingPrefix(s) => {
                write!(f, "option string '{}' does not start with a prefix character", s)
            }
            Flaw::DuplicateOptionString(s) => {
                write!(f, "conflicting option string: {}", s)
            }
            Flaw::EmptyDestination => write!(f, "could not derive a destination"),
            Flaw::RequiredOnPositional => {
                write!(f, "'required' is an invalid argument for positionals")
            }
            Flaw::ZeroArityWithNargs(name) => {
                write!(f, "action '{}' takes no arguments; nargs may not be set", name)
            }
            Flaw::UnknownActionName(name) => write!(f, "unknown action '{}'", name),
            Flaw::UnknownTypeName(name) => write!(f, "unknown type '{}'", name),
            Flaw::DuplicateGroupTitle(title) => {
                write!(f, "a group titled '{}' already exists", title)
            }
        }
    }
}

/// Raised immediately at declaration time: an impossible configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{}", render_flaws(.0))]
pub struct DeclarationError(pub Vec<Flaw>);

fn render_flaws(flaws: &[Flaw]) -> String {
    flaws
        .iter()
        .map(Flaw::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl DeclarationError {
    pub fn single(flaw: Flaw) -> Self {
        Self(vec![flaw])
    }
}

/// Raised during matching; every variant carries enough detail for the formatter to render
/// `argument X: ...`-style messages.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ArgparseError {
    #[error("unrecognized arguments: {0}")]
    UnrecognizedArguments(String),

    #[error("unrecognized arguments: {token}{suggestion}", suggestion = suggestion_suffix(.suggestion))]
    UnrecognizedOption { token: String, suggestion: Option<String> },

    #[error("ambiguous option: {token} could match {}", .candidates.join(", "))]
    AmbiguousOption { token: String, candidates: Vec<String> },

    #[error("argument {dest}: ignored explicit argument '{value}'")]
    IgnoredExplicitArgument { dest: String, value: String },

    #[error("argument {dest}: expected {expected}")]
    WrongArity { dest: String, expected: String },

    #[error("the following arguments are required: {0}")]
    MissingRequired(String),

    #[error("argument {dest}: not allowed with argument {other}")]
    MutexConflict { dest: String, other: String },

    #[error("one of the arguments {} is required", .0.join(" "))]
    MutexRequired(Vec<String>),

    #[error("argument {dest}: invalid {type_name} value: '{value}'")]
    InvalidType { dest: String, type_name: String, value: String },

    #[error("argument {dest}: invalid choice: '{value}' (choose from {})", render_choices(.choices))]
    InvalidChoice { dest: String, value: String, choices: Vec<Value> },

    #[error("too few arguments")]
    TooFewArguments,

    #[error("argument {dest}: invalid choice: '{value}' (choose from {})", render_choices(.choices))]
    UnknownSubcommand { dest: String, value: String, choices: Vec<Value> },

    #[error("could not read argument file '{path}': {reason}")]
    FileExpansionFailed { path: String, reason: String },

    /// Not a failure: the `help` action fired. Carries no message of its own; the parser
    /// boundary renders help text to stdout and exits with status `0`.
    #[error("help requested")]
    HelpRequested,

    /// Not a failure: the `version` action fired. The parser boundary prints `0` to stdout and
    /// exits with status `0`.
    #[error("version requested")]
    VersionRequested(String),
}

fn suggestion_suffix(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(s) => format!(" (did you mean '{}'?)", s),
        None => String::new(),
    }
}

fn render_choices(choices: &[Value]) -> String {
    choices
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl ArgparseError {
    pub fn invalid_type(dest: &str, type_name: &str, value: &str) -> Self {
        ArgparseError::InvalidType {
            dest: dest.to_string(),
            type_name: type_name.to_string(),
            value: value.to_string(),
        }
    }

    pub fn invalid_choice(dest: &str, value: &str, choices: &[Value]) -> Self {
        ArgparseError::InvalidChoice {
            dest: dest.to_string(),
            value: value.to_string(),
            choices: choices.to_vec(),
        }
    }

    /// The offending destination or option string this error should be attributed to in the
    /// formatter's `argument X: ...` rendering, if it has one.
    pub fn subject(&self) -> Option<&str> {
        match self {
            ArgparseError::IgnoredExplicitArgument { dest, .. }
            | ArgparseError::WrongArity { dest, .. }
            | ArgparseError::MutexConflict { dest, .. }
            | ArgparseError::InvalidType { dest, .. }
            | ArgparseError::InvalidChoice { dest, .. }
            | ArgparseError::UnknownSubcommand { dest, .. } => Some(dest),
            _ => None,
        }
    }
}
