// Copyright (c) 2026 The Parsive Contributors
//
// This file is part of the `parsive` command-line argument parsing library.
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

//! Shared sentinels and the coercion/choice machinery hung off a declared argument's `type`.

use std::fmt;
use std::sync::Arc;

use crate::error::ArgparseError;
use crate::value::Value;

/// Sentinel value: suppresses default materialization into the namespace, and hides the
/// argument from help output when used as a `help` string.
pub const SUPPRESS: &str = "==SUPPRESS==";

pub fn is_suppress(s: &str) -> bool {
    s == SUPPRESS
}

/// A coercion function applied to each raw token an action consumes.
///
/// Built-ins (`identity`, `int`, `float`, `string`) are provided as constructors; a caller may
/// also supply an arbitrary closure, which is the escape hatch referred to throughout this
/// crate's declaration-time APIs.
#[derive(Clone)]
pub struct TypeFn {
    name: &'static str,
    f: Arc<dyn Fn(&str) -> Result<Value, String> + Send + Sync>,
}

impl TypeFn {
    pub fn new(
        name: &'static str,
        f: impl Fn(&str) -> Result<Value, String> + Send + Sync + 'static,
    ) -> Self {
        Self { name, f: Arc::new(f) }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn call(&self, raw: &str) -> Result<Value, String> {
        (self.f)(raw)
    }

    pub fn identity() -> Self {
        Self::new("string", |s| Ok(Value::Str(s.to_string())))
    }

    pub fn int() -> Self {
        Self::new("int", |s| {
            s.parse::<i64>().map(Value::Int).map_err(|_| s.to_string())
        })
    }

    pub fn float() -> Self {
        Self::new("float", |s| {
            s.parse::<f64>().map(Value::Float).map_err(|_| s.to_string())
        })
    }

    pub fn string() -> Self {
        Self::identity()
    }
}

impl Default for TypeFn {
    fn default() -> Self {
        Self::identity()
    }
}

impl fmt::Debug for TypeFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeFn").field("name", &self.name).finish()
    }
}

/// Coerces `raw` through `type_fn`, then validates the result against `choices` if present.
pub(crate) fn coerce_and_check(
    type_fn: &TypeFn,
    choices: &Option<Vec<Value>>,
    dest: &str,
    raw: &str,
) -> Result<Value, ArgparseError> {
    let value = type_fn
        .call(raw)
        .map_err(|bad| ArgparseError::invalid_type(dest, type_fn.name(), &bad))?;
    if let Some(choices) = choices {
        if !choices.contains(&value) {
            return Err(ArgparseError::invalid_choice(dest, raw, choices));
        }
    }
    Ok(value)
}
