// Copyright (c) 2026 The Parsive Contributors
//
// This file is part of the `parsive` command-line argument parsing library.
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

//! The token source: an ordered sequence of strings to parse. Most callers want the process's
//! own argument list, minus the entry itself; [`Args::new`] does that, while a [`Parser`] will
//! happily accept any `Vec<String>`/`&[String]` a caller assembles itself (tests build their
//! token lists directly, without going through this type at all).
//!
//! `std::env::args()` panics on the first argument that isn't valid Unicode. That's the right
//! default for a CLI whose whole job is to interpret its own argument list as text, so we don't
//! route around it the way a byte-oriented parser would with `args_os()`.

/// The process's argument list, with the program name already stripped off.
pub struct Args {
    tokens: Vec<String>,
}

impl Args {
    /// Reads `std::env::args()`, skipping the first entry (the program path).
    pub fn new() -> Self {
        Self { tokens: std::env::args().skip(1).collect() }
    }

    /// Wraps an already-collected token list, e.g. one assembled in a test.
    pub fn from_vec(tokens: Vec<String>) -> Self {
        Self { tokens }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.tokens
    }

    pub fn into_vec(self) -> Vec<String> {
        self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }
}

impl Default for Args {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vec<String>> for Args {
    fn from(tokens: Vec<String>) -> Self {
        Self::from_vec(tokens)
    }
}
