// Copyright (c) 2026 The Parsive Contributors
//
// This file is part of the `parsive` command-line argument parsing library.
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

//! The result attribute bag produced by a parse.
//!
//! A [`Namespace`] is a flat, insertion-ordered key→value map. Declarations are resolved at
//! runtime, so there is no way to conjure static struct fields out of them; rather than reaching
//! for `Box<dyn Any>`, the map is closed over [`Value`](crate::value::Value), the small set of
//! shapes the matching engine actually produces.
//!
//! Equality is deep over the full attribute set, which the engine's test suite leans on heavily
//! (comparing the namespace produced by one token sequence against another's).

use std::collections::BTreeMap;

use crate::value::Value;

/// Flat attribute bag keyed by argument destination.
///
/// `SUPPRESS`-destined attributes are never written here; see
/// [`SUPPRESS`](crate::types::SUPPRESS).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Namespace {
    attrs: BTreeMap<String, Value>,
}

impl Namespace {
    pub fn new() -> Self {
        Self {
            attrs: BTreeMap::new(),
        }
    }

    pub fn set(&mut self, dest: impl Into<String>, value: Value) {
        self.attrs.insert(dest.into(), value);
    }

    pub fn get(&self, dest: &str) -> Option<&Value> {
        self.attrs.get(dest)
    }

    pub fn get_str(&self, dest: &str) -> Option<&str> {
        self.attrs.get(dest).and_then(Value::as_str)
    }

    pub fn get_bool(&self, dest: &str) -> Option<bool> {
        self.attrs.get(dest).and_then(Value::as_bool)
    }

    pub fn get_int(&self, dest: &str) -> Option<i64> {
        self.attrs.get(dest).and_then(Value::as_int)
    }

    pub fn get_list(&self, dest: &str) -> Option<&[Value]> {
        self.attrs.get(dest).and_then(Value::as_list)
    }

    pub fn contains(&self, dest: &str) -> bool {
        self.attrs.contains_key(dest)
    }

    pub fn unset(&mut self, dest: &str) -> Option<Value> {
        self.attrs.remove(dest)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.attrs.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.attrs.values()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Appends `value` to the list at `dest`, creating the list if absent.
    ///
    /// Used by the `append` and `append-const` action kinds.
    pub fn append(&mut self, dest: impl Into<String>, value: Value) {
        let dest = dest.into();
        match self.attrs.get_mut(&dest) {
            Some(Value::List(items)) => items.push(value),
            Some(_) | None => {
                self.attrs.insert(dest, Value::List(vec![value]));
            }
        }
    }

    /// Increments the integer at `dest`, seeding it at `0` if absent.
    ///
    /// Used by the `count` action kind.
    pub fn increment(&mut self, dest: impl Into<String>) {
        let dest = dest.into();
        match self.attrs.get_mut(&dest) {
            Some(Value::Int(n)) => *n += 1,
            Some(_) | None => {
                self.attrs.insert(dest, Value::Int(1));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_creates_list_then_grows_it() {
        let mut ns = Namespace::new();
        ns.append("foo", Value::from("bar"));
        ns.append("foo", Value::from("baz"));
        assert_eq!(
            ns.get_list("foo").unwrap(),
            &[Value::from("bar"), Value::from("baz")]
        );
    }

    #[test]
    fn increment_seeds_at_zero_then_counts() {
        let mut ns = Namespace::new();
        ns.increment("v");
        ns.increment("v");
        assert_eq!(ns.get_int("v"), Some(2));
    }

    #[test]
    fn equality_is_deep_over_attributes() {
        let mut a = Namespace::new();
        a.set("x", Value::from(1i64));
        let mut b = Namespace::new();
        b.set("x", Value::from(1i64));
        assert_eq!(a, b);
        b.set("x", Value::from(2i64));
        assert_ne!(a, b);
    }
}
