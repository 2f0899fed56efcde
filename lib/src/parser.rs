// Copyright (c) 2026 The Parsive Contributors
//
// This file is part of the `parsive` command-line argument parsing library.
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

//! [`Parser`]: an [`ActionContainer`] plus the program-identity and formatting metadata needed
//! to actually run a parse and render usage/help text.
//!
//! A parser is built declaratively (`add_argument`, `add_argument_group`, `add_subparsers`);
//! parsing is a pure function of the parser and the input token sequence, producing a fresh
//! [`Namespace`] and a (possibly empty) leftover sequence. There is no runtime link between a
//! parent parser and the parsers it was built from: [`Parser::add_parent`] copies actions and
//! groups in at call time, matching the design note against retaining shared mutable state.

use log::{debug, trace};

use crate::action::{Action, ActionKind};
use crate::args::Args;
use crate::arity::Nargs;
use crate::container::{ActionContainer, ConflictHandler};
use crate::error::{ArgparseError, DeclarationError, Flaw};
use crate::help::{FormatterKind, HelpFormatter};
use crate::matching;
use crate::namespace::Namespace;
use crate::subparsers::Subparsers;
use crate::types::{TypeFn, SUPPRESS};
use crate::value::Value;

/// Governs whether a parse-time error throws (for embedding/testing) or terminates the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitBehavior {
    /// `error()` prints to stderr and calls `std::process::exit`.
    Process,
    /// `error()` returns the error instead of exiting; used by tests and library embedders.
    Debug,
}

pub struct Parser {
    pub(crate) container: ActionContainer,
    pub prog: String,
    pub usage: Option<String>,
    pub description: Option<String>,
    pub epilog: Option<String>,
    pub formatter_kind: FormatterKind,
    pub file_prefix_chars: Vec<char>,
    pub version: Option<String>,
    pub exit_behavior: ExitBehavior,
    exit_status_on_error: i32,
}

impl Parser {
    pub fn new(prog: impl Into<String>) -> Self {
        Self {
            container: ActionContainer::new(),
            prog: prog.into(),
            usage: None,
            description: None,
            epilog: None,
            formatter_kind: FormatterKind::Default,
            file_prefix_chars: Vec::new(),
            version: None,
            exit_behavior: ExitBehavior::Process,
            exit_status_on_error: 2,
        }
    }

    pub fn set_usage(&mut self, usage: impl Into<String>) -> &mut Self {
        self.usage = Some(usage.into());
        self
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> &mut Self {
        self.description = Some(description.into());
        self
    }

    pub fn set_epilog(&mut self, epilog: impl Into<String>) -> &mut Self {
        self.epilog = Some(epilog.into());
        self
    }

    pub fn set_formatter(&mut self, kind: FormatterKind) -> &mut Self {
        self.formatter_kind = kind;
        self
    }

    pub fn set_file_prefix_chars(&mut self, chars: &str) -> &mut Self {
        self.file_prefix_chars = chars.chars().collect();
        self
    }

    pub fn set_prefix_chars(&mut self, chars: &str) -> &mut Self {
        self.container.set_prefix_chars(chars);
        self
    }

    pub fn set_conflict_handler(&mut self, handler: ConflictHandler) -> &mut Self {
        self.container.set_conflict_handler(handler);
        self
    }

    /// Debug mode: `error()` returns the error to the caller instead of writing to stderr and
    /// exiting the process. Errors still carry the same exit status they would have used.
    pub fn set_debug(&mut self, debug: bool) -> &mut Self {
        self.exit_behavior = if debug { ExitBehavior::Debug } else { ExitBehavior::Process };
        self
    }

    pub fn set_defaults(&mut self, options: impl IntoIterator<Item = (String, Value)>) -> &mut Self {
        self.container.set_defaults(options);
        self
    }

    pub fn container(&self) -> &ActionContainer {
        &self.container
    }

    /// Mutable access to the underlying registry, for declaration-time calls this builder-style
    /// API doesn't itself wrap (`register_type`, `set_argument_default`, ...).
    pub fn container_mut(&mut self) -> &mut ActionContainer {
        &mut self.container
    }

    /// Begins declaring a new argument. `tokens` is either empty/a single bare name (positional)
    /// or one or more option strings (optional); finalized when the returned builder is dropped
    /// or [`ArgumentBuilder::try_finish`] is called explicitly.
    pub fn add_argument<'p>(&'p mut self, tokens: &[&str]) -> ArgumentBuilder<'p> {
        let is_positional = self
            .container
            .classify(tokens)
            .unwrap_or_else(|e| panic!("{}", e));

        let (option_strings, destination) = if is_positional {
            let dest = tokens.first().copied().unwrap_or("").to_string();
            (Vec::new(), dest)
        } else {
            let option_strings: Vec<String> = tokens.iter().map(|s| s.to_string()).collect();
            let dest = self
                .container
                .derive_destination(&option_strings)
                .unwrap_or_else(|e| panic!("{}", e));
            (option_strings, dest)
        };

        let default = self.container.defaults().get(&destination).cloned();

        let action = Action {
            option_strings,
            destination,
            nargs: None,
            constant: None,
            default,
            type_fn: TypeFn::default(),
            choices: None,
            required: false,
            required_explicit: false,
            help: None,
            metavar: None,
            kind: ActionKind::Store,
        };

        ArgumentBuilder { container: &mut self.container, action: Some(action) }
    }

    pub fn add_argument_group(&mut self, title: Option<&str>, description: Option<&str>) -> usize {
        self.container
            .add_group(title, description)
            .unwrap_or_else(|e| panic!("{}", e))
    }

    pub fn add_mutually_exclusive_group(&mut self, required: bool) -> usize {
        self.container.add_mutex_group(required)
    }

    /// Declares a `subparsers` positional. Further choices are registered on the returned
    /// [`Subparsers`] handle via [`Subparsers::add_parser`].
    pub fn add_subparsers(&mut self, dest: Option<&str>, metavar: Option<&str>, help: Option<&str>) -> &mut Subparsers {
        let mut subparsers = Subparsers::new(self.prog.clone());
        if let Some(m) = metavar {
            subparsers.set_metavar(m);
        }
        let action = Action {
            option_strings: Vec::new(),
            destination: dest.unwrap_or(SUPPRESS).to_string(),
            nargs: Some(Nargs::Parser),
            constant: None,
            default: None,
            type_fn: TypeFn::default(),
            choices: None,
            required: false,
            required_explicit: false,
            help: help.map(str::to_string),
            metavar: metavar.map(str::to_string),
            kind: ActionKind::Subparsers(subparsers),
        };
        let idx = self.container.finalize_action(action).unwrap_or_else(|e| panic!("{}", e));
        match &mut self.container.actions[idx].kind {
            ActionKind::Subparsers(s) => s,
            _ => unreachable!(),
        }
    }

    /// Flattens `other`'s declared actions and groups into `self`, as if each had been declared
    /// directly here. There is no retained link to `other` afterwards. `other`'s `subparsers` or
    /// `Custom` actions, which hold state that can't be duplicated, are rejected rather than
    /// silently downgraded to a plain `store`.
    pub fn add_parent(&mut self, other: &Parser) -> Result<(), DeclarationError> {
        for group in other.container.groups() {
            if let Some(title) = &group.title {
                if self.container.groups().iter().any(|g| g.title.as_deref() == Some(title.as_str())) {
                    return Err(DeclarationError::single(Flaw::DuplicateGroupTitle(title.clone())));
                }
            }
        }
        for action in other.container.actions() {
            let kind = match &action.kind {
                ActionKind::Store => ActionKind::Store,
                ActionKind::StoreConst => ActionKind::StoreConst,
                ActionKind::StoreTrue => ActionKind::StoreTrue,
                ActionKind::StoreFalse => ActionKind::StoreFalse,
                ActionKind::Append => ActionKind::Append,
                ActionKind::AppendConst => ActionKind::AppendConst,
                ActionKind::Count => ActionKind::Count,
                ActionKind::Help => ActionKind::Help,
                ActionKind::Version(text) => ActionKind::Version(text.clone()),
                ActionKind::Subparsers(_) | ActionKind::Custom(_) => {
                    return Err(DeclarationError::single(Flaw::UnknownActionName(action.kind.name().to_string())));
                }
            };
            let copy = Action {
                option_strings: action.option_strings.clone(),
                destination: action.destination.clone(),
                nargs: action.nargs,
                constant: action.constant.clone(),
                default: action.default.clone(),
                type_fn: action.type_fn.clone(),
                choices: action.choices.clone(),
                required: action.required,
                required_explicit: action.required_explicit,
                help: action.help.clone(),
                metavar: action.metavar.clone(),
                kind,
            };
            self.container.finalize_action(copy)?;
        }
        Ok(())
    }

    /// Parses `tokens`, returning leftover tokens the declared arguments didn't consume instead
    /// of treating them as an error.
    pub fn parse_known_args(&self, tokens: &[String]) -> Result<(Namespace, Vec<String>), ArgparseError> {
        let mut namespace = Namespace::new();
        let extras = self.parse_known_into(tokens, &mut namespace)?;
        Ok((namespace, extras))
    }

    pub(crate) fn parse_known_into(
        &self,
        tokens: &[String],
        namespace: &mut Namespace,
    ) -> Result<Vec<String>, ArgparseError> {
        trace!("parsing {} token(s) against program '{}'", tokens.len(), self.prog);
        let expanded = crate::tokenize::expand_file_args(tokens.to_vec(), &self.file_prefix_chars)?;
        matching::run(&self.container, &expanded, namespace)
    }

    /// Parses `tokens`, erroring if any are left over.
    pub fn parse_args(&self, tokens: &[String]) -> Result<Namespace, ArgparseError> {
        let (namespace, extras) = self.parse_known_args(tokens)?;
        if !extras.is_empty() {
            return Err(self.unrecognized(&extras));
        }
        Ok(namespace)
    }

    /// Convenience wrapper taking an owned `Vec<String>`, surfacing help/version/error via the
    /// `error()` boundary rather than as a bare `Result`.
    pub fn parse_args_from(&self, tokens: Vec<String>) -> Result<Namespace, ArgparseError> {
        match self.parse_args(&tokens) {
            Ok(ns) => Ok(ns),
            Err(e) => self.handle_exit(e),
        }
    }

    /// Parses the real process arguments (after the program name), per [`Args::new`].
    pub fn parse_process_args(&self) -> Result<Namespace, ArgparseError> {
        let args = Args::new();
        self.parse_args_from(args.as_slice().to_vec())
    }

    fn unrecognized(&self, extras: &[String]) -> ArgparseError {
        if let [one] = extras {
            let suggestion = self.container.suggest(one);
            return ArgparseError::UnrecognizedOption { token: one.clone(), suggestion };
        }
        ArgparseError::UnrecognizedArguments(extras.join(" "))
    }

    fn handle_exit(&self, error: ArgparseError) -> Result<Namespace, ArgparseError> {
        match &error {
            ArgparseError::HelpRequested => {
                print!("{}", self.format_help());
                if self.exit_behavior == ExitBehavior::Debug {
                    return Err(error);
                }
                std::process::exit(0);
            }
            ArgparseError::VersionRequested(text) => {
                println!("{}", text);
                if self.exit_behavior == ExitBehavior::Debug {
                    return Err(error);
                }
                std::process::exit(0);
            }
            _ => self.error(&error),
        }
    }

    /// The single error boundary: prints usage plus a one-line, program-prefixed message to
    /// stderr, then exits (or, in debug mode, returns the error instead of exiting).
    pub fn error(&self, error: &ArgparseError) -> Result<Namespace, ArgparseError> {
        debug!("parse error in '{}': {}", self.prog, error);
        eprint!("{}", self.format_usage());
        eprintln!("{}: error: {}", self.prog, error);
        if self.exit_behavior == ExitBehavior::Debug {
            return Err(error.clone());
        }
        std::process::exit(self.exit_status_on_error);
    }

    pub fn format_usage(&self) -> String {
        let formatter = HelpFormatter::new(&self.prog, self.formatter_kind);
        let all = self.container.actions();
        let optionals: Vec<&Action> = all.iter().filter(|a| !a.is_positional()).collect();
        let positionals: Vec<&Action> = all.iter().filter(|a| a.is_positional()).collect();
        formatter.format_usage(self.usage.as_deref(), &optionals, &positionals, self.container.mutex_groups(), all)
    }

    pub fn format_help(&self) -> String {
        let formatter = HelpFormatter::new(&self.prog, self.formatter_kind);
        let all = self.container.actions();

        // Actions that belong to a titled group are listed under that group's own section
        // below, not under the default "positional arguments:"/"options:" listing — otherwise
        // they'd be rendered twice.
        let grouped_indices: std::collections::HashSet<usize> = self
            .container
            .groups()
            .iter()
            .flat_map(|g| g.action_indices.iter().copied())
            .collect();

        let optionals: Vec<&Action> = all
            .iter()
            .enumerate()
            .filter(|(i, a)| !a.is_positional() && !grouped_indices.contains(i))
            .map(|(_, a)| a)
            .collect();
        let positionals: Vec<&Action> = all
            .iter()
            .enumerate()
            .filter(|(i, a)| a.is_positional() && !grouped_indices.contains(i))
            .map(|(_, a)| a)
            .collect();

        let mut out = self.format_usage();
        out.push('\n');

        if let Some(desc) = &self.description {
            let wrapped = if matches!(self.formatter_kind, FormatterKind::RawDescription | FormatterKind::RawText) {
                desc.clone()
            } else {
                textwrap::fill(desc, formatter.width)
            };
            out.push_str(&wrapped);
            out.push_str("\n\n");
        }

        let visible: Vec<&Action> = all.iter().filter(|a| !a.help_hidden()).collect();
        let help_position = formatter.compute_help_position(&visible);

        if positionals.iter().any(|a| !a.help_hidden()) {
            out.push_str("positional arguments:\n");
            for action in &positionals {
                if action.help_hidden() {
                    continue;
                }
                out.push_str(&formatter.format_action(action, help_position));
            }
            out.push('\n');
        }

        if optionals.iter().any(|a| !a.help_hidden()) {
            out.push_str("options:\n");
            for action in &optionals {
                if action.help_hidden() {
                    continue;
                }
                out.push_str(&formatter.format_action(action, help_position));
            }
            out.push('\n');
        }

        for group in self.container.groups() {
            let members: Vec<&Action> = group
                .action_indices
                .iter()
                .map(|&i| &all[i])
                .filter(|a| !a.help_hidden())
                .collect();
            if members.is_empty() {
                continue;
            }
            out.push_str(&format!("{}:\n", crate::help::group_section_title(group)));
            for action in members {
                out.push_str(&formatter.format_action(action, help_position));
            }
            out.push('\n');
        }

        if let Some(epilog) = &self.epilog {
            let wrapped = if matches!(self.formatter_kind, FormatterKind::RawDescription | FormatterKind::RawText) {
                epilog.clone()
            } else {
                textwrap::fill(epilog, formatter.width)
            };
            out.push_str(&wrapped);
            out.push('\n');
        }

        HelpFormatter::normalize_blank_lines(&out) + "\n"
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new(
            std::env::args()
                .next()
                .unwrap_or_else(|| "program".to_string()),
        )
    }
}

/// A fluent, in-progress argument declaration. Registers the action into its container when
/// dropped (or, for callers who want to handle a declaration error explicitly rather than
/// panicking, when [`try_finish`](Self::try_finish) is called).
pub struct ArgumentBuilder<'c> {
    container: &'c mut ActionContainer,
    action: Option<Action>,
}

impl<'c> ArgumentBuilder<'c> {
    fn edit(mut self, f: impl FnOnce(&mut Action)) -> Self {
        if let Some(a) = self.action.as_mut() {
            f(a);
        }
        self
    }

    pub fn dest(self, dest: impl Into<String>) -> Self {
        let dest = dest.into();
        self.edit(|a| a.destination = dest)
    }

    pub fn nargs(self, nargs: Nargs) -> Self {
        self.edit(|a| a.nargs = Some(nargs))
    }

    pub fn default(self, value: impl Into<Value>) -> Self {
        let value = value.into();
        self.edit(|a| a.default = Some(value))
    }

    pub fn constant(self, value: impl Into<Value>) -> Self {
        let value = value.into();
        self.edit(|a| a.constant = Some(value))
    }

    pub fn type_fn(self, type_fn: TypeFn) -> Self {
        self.edit(|a| a.type_fn = type_fn)
    }

    /// Resolves `name` against the container's type registry (`register_type`, plus the
    /// built-in `string`/`int`/`float`) rather than supplying a [`TypeFn`] directly. An unknown
    /// name is a declaration error: unlike an unrecognized option string at parse time, there is
    /// no way to recover from a coercion this crate doesn't know how to run.
    pub fn type_name(mut self, name: &str) -> Self {
        match self.container.resolve_type(name) {
            Some(type_fn) => self.edit(|a| a.type_fn = type_fn),
            None => {
                self.action = None;
                panic!("{}", DeclarationError::single(Flaw::UnknownTypeName(name.to_string())));
            }
        }
    }

    pub fn choices(self, choices: Vec<Value>) -> Self {
        self.edit(|a| a.choices = Some(choices))
    }

    pub fn required(self, required: bool) -> Self {
        self.edit(|a| {
            a.required = required;
            a.required_explicit = true;
        })
    }

    pub fn help(self, help: impl Into<String>) -> Self {
        let help = help.into();
        self.edit(|a| a.help = Some(help))
    }

    pub fn metavar(self, metavar: impl Into<String>) -> Self {
        let metavar = metavar.into();
        self.edit(|a| a.metavar = Some(metavar))
    }

    pub fn action_store(self) -> Self {
        self.edit(|a| a.kind = ActionKind::Store)
    }

    pub fn action_store_const(self) -> Self {
        self.edit(|a| {
            a.kind = ActionKind::StoreConst;
            a.nargs = Some(Nargs::Exact(0));
        })
    }

    pub fn action_store_true(self) -> Self {
        self.edit(|a| {
            a.kind = ActionKind::StoreTrue;
            a.nargs = Some(Nargs::Exact(0));
            a.default = Some(Value::Bool(false));
        })
    }

    pub fn action_store_false(self) -> Self {
        self.edit(|a| {
            a.kind = ActionKind::StoreFalse;
            a.nargs = Some(Nargs::Exact(0));
            a.default = Some(Value::Bool(true));
        })
    }

    pub fn action_append(self) -> Self {
        self.edit(|a| a.kind = ActionKind::Append)
    }

    pub fn action_append_const(self) -> Self {
        self.edit(|a| {
            a.kind = ActionKind::AppendConst;
            a.nargs = Some(Nargs::Exact(0));
        })
    }

    pub fn action_count(self) -> Self {
        self.edit(|a| {
            a.kind = ActionKind::Count;
            a.nargs = Some(Nargs::Exact(0));
        })
    }

    pub fn action_help(self) -> Self {
        self.edit(|a| {
            a.kind = ActionKind::Help;
            a.nargs = Some(Nargs::Exact(0));
            a.help = Some("show this help message and exit".to_string());
        })
    }

    pub fn action_version(self, version: impl Into<String>) -> Self {
        let version = version.into();
        self.edit(|a| {
            a.kind = ActionKind::Version(version.clone());
            a.nargs = Some(Nargs::Exact(0));
            a.help = Some("show program's version number and exit".to_string());
        })
    }

    pub fn add_to_group(self, group_idx: usize) -> Self {
        let idx = self.container.actions.len();
        self.container.add_action_to_group(group_idx, idx);
        self
    }

    pub fn add_to_mutex_group(self, mutex_idx: usize) -> Self {
        let idx = self.container.actions.len();
        self.container.add_action_to_mutex_group(mutex_idx, idx);
        self
    }

    pub fn try_finish(mut self) -> Result<usize, DeclarationError> {
        let action = self.action.take().expect("try_finish called twice");
        self.container.finalize_action(action)
    }
}

impl Drop for ArgumentBuilder<'_> {
    fn drop(&mut self) {
        if let Some(action) = self.action.take() {
            if let Err(e) = self.container.finalize_action(action) {
                if !std::thread::panicking() {
                    panic!("{}", e);
                }
            }
        }
    }
}

