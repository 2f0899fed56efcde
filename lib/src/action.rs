// Copyright (c) 2026 The Parsive Contributors
//
// This file is part of the `parsive` command-line argument parsing library.
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

//! Declared-argument behavior.
//!
//! `argparse`'s own implementation models each kind of argument (`store`, `store_true`,
//! `append`, `count`, a subparsers dispatcher, ...) as a subclass of a common `Action` base,
//! dispatched through a single virtual `__call__`. Rust has no open class hierarchy to reach
//! for, and doesn't need one: the set of kinds is small and closed, so [`ActionKind`] is a
//! sealed enum with one `apply` method, plus a `Custom` variant as the escape hatch for callers
//! who want their own side effect.

use crate::arity::Nargs;
use crate::error::ArgparseError;
use crate::namespace::Namespace;
use crate::subparsers::Subparsers;
use crate::types::TypeFn;
use crate::value::Value;

/// The behavior bound to a declared argument.
pub enum ActionKind {
    Store,
    StoreConst,
    StoreTrue,
    StoreFalse,
    Append,
    AppendConst,
    Count,
    Help,
    Version(String),
    Subparsers(Subparsers),
    /// Escape hatch: an arbitrary side effect, for callers who need a kind this crate doesn't
    /// have a name for.
    Custom(Box<dyn Fn(&mut Namespace, Value, Option<&str>) -> Result<(), ArgparseError>>),
}

impl ActionKind {
    pub fn nargs_if_unset(&self) -> Nargs {
        match self {
            ActionKind::Store | ActionKind::Append => Nargs::Unset,
            ActionKind::Subparsers(_) => Nargs::Parser,
            _ => Nargs::Exact(0),
        }
    }

    pub fn is_zero_arity_kind(&self) -> bool {
        matches!(
            self,
            ActionKind::StoreConst
                | ActionKind::StoreTrue
                | ActionKind::StoreFalse
                | ActionKind::AppendConst
                | ActionKind::Count
                | ActionKind::Help
                | ActionKind::Version(_)
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            ActionKind::Store => "store",
            ActionKind::StoreConst => "store_const",
            ActionKind::StoreTrue => "store_true",
            ActionKind::StoreFalse => "store_false",
            ActionKind::Append => "append",
            ActionKind::AppendConst => "append_const",
            ActionKind::Count => "count",
            ActionKind::Help => "help",
            ActionKind::Version(_) => "version",
            ActionKind::Subparsers(_) => "subparsers",
            ActionKind::Custom(_) => "custom",
        }
    }

    /// Applies the zero-arity side effect directly (no coercion, no arity shaping: these kinds
    /// never consume value tokens).
    pub(crate) fn apply_const(
        &self,
        namespace: &mut Namespace,
        dest: &str,
        constant: &Option<Value>,
    ) -> Result<(), ArgparseError> {
        match self {
            ActionKind::StoreConst | ActionKind::AppendConst => {
                let value = constant.clone().unwrap_or(Value::None);
                match self {
                    ActionKind::StoreConst => namespace.set(dest, value),
                    ActionKind::AppendConst => namespace.append(dest, value),
                    _ => unreachable!(),
                }
            }
            ActionKind::StoreTrue => namespace.set(dest, Value::Bool(true)),
            ActionKind::StoreFalse => namespace.set(dest, Value::Bool(false)),
            ActionKind::Count => namespace.increment(dest),
            _ => unreachable!("apply_const called on a non-zero-arity or special kind"),
        }
        Ok(())
    }
}

/// Cross-cutting attributes shared by every declared argument, plus its behavior.
pub struct Action {
    pub option_strings: Vec<String>,
    pub destination: String,
    pub nargs: Option<Nargs>,
    pub constant: Option<Value>,
    pub default: Option<Value>,
    pub type_fn: TypeFn,
    pub choices: Option<Vec<Value>>,
    pub required: bool,
    /// Set when a caller explicitly calls `ArgumentBuilder::required`, as opposed to
    /// `finalize_action`'s own forcing of `required` to `true` for most positionals. argparse
    /// treats `required` as meaningless (and rejects it outright) on a positional, since a
    /// positional's required-ness is derived from its arity instead.
    pub(crate) required_explicit: bool,
    pub help: Option<String>,
    pub metavar: Option<String>,
    pub kind: ActionKind,
}

impl Action {
    pub fn is_positional(&self) -> bool {
        self.option_strings.is_empty()
    }

    pub fn effective_nargs(&self) -> Nargs {
        self.nargs.unwrap_or_else(|| self.kind.nargs_if_unset())
    }

    pub fn is_zero_arity(&self) -> bool {
        self.effective_nargs().is_zero_arity()
    }

    pub fn help_hidden(&self) -> bool {
        matches!(&self.help, Some(h) if crate::types::is_suppress(h))
    }

    pub fn dest_suppressed(&self) -> bool {
        crate::types::is_suppress(&self.destination)
    }

    /// The display form used in usage and error messages: the first long option string if any,
    /// else the first short, else the destination for positionals.
    pub fn display_name(&self) -> String {
        if self.option_strings.is_empty() {
            self.destination.clone()
        } else {
            self.option_strings.join("/")
        }
    }
}
