// Copyright (c) 2026 The Parsive Contributors
//
// This file is part of the `parsive` command-line argument parsing library.
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

//! Argument arity (`nargs`) and the regex fragments it compiles to.
//!
//! The matching engine never hand-rolls a state machine for "how many tokens does this action
//! eat". Instead every token is first classified into a pattern string over the alphabet
//! `{O, A, -}` (option / value / the literal `--`), and every action's arity compiles to a
//! fragment matched against a slice of that pattern. This keeps the greedy-with-backoff
//! consumption rules (see [`crate::matching`]) declarative instead of baked into nested loops.
//! This is a deliberate design choice, not a straightforward translation of the spec prose, and
//! should not be replaced by a hand-written scanner even though one would "work" for the common
//! cases.

use std::fmt;

/// How many value tokens a declared argument consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nargs {
    /// No `nargs` given: consumes exactly one token and yields a scalar (not a one-element list).
    Unset,
    /// A literal integer count. Unlike `Unset`, always yields a list, even for `Exact(1)`.
    Exact(usize),
    /// `?`: zero or one token.
    Optional,
    /// `*`: zero or more tokens.
    ZeroOrMore,
    /// `+`: one or more tokens.
    OneOrMore,
    /// Every remaining token, including ones that look like options.
    Remainder,
    /// A subparser selector plus everything after it, verbatim.
    Parser,
}

impl Nargs {
    pub fn is_zero_arity(&self) -> bool {
        matches!(self, Nargs::Exact(0))
    }

    /// Whether a single explicit (`=`-joined or clustered) value may satisfy this arity.
    pub fn accepts_single_explicit(&self) -> bool {
        matches!(self, Nargs::Unset | Nargs::Exact(1))
    }

    /// The fragment used when this arity belongs to a positional action (may absorb `-*`, the
    /// pattern left behind by a consumed `--`).
    pub fn positional_fragment(&self) -> String {
        match self {
            Nargs::Unset => "(-*A-*)".to_string(),
            Nargs::Optional => "(-*A?-*)".to_string(),
            Nargs::ZeroOrMore => "(-*[A-]*)".to_string(),
            Nargs::OneOrMore => "(-*A[A-]*)".to_string(),
            Nargs::Exact(0) => "()".to_string(),
            Nargs::Exact(n) => {
                let body = std::iter::repeat("A").take(*n).collect::<Vec<_>>().join("-*");
                format!("(-*{}-*)", body)
            }
            Nargs::Remainder => "([-AO]*)".to_string(),
            Nargs::Parser => "(-*A[-AO]*)".to_string(),
        }
    }

    /// The fragment used when this arity belongs to an optional action. Optionals may not
    /// absorb a consumed `--`, so the `-*`/`-` parts of the positional fragment are stripped.
    pub fn optional_fragment(&self) -> String {
        strip_dashes(&self.positional_fragment())
    }
}

/// Strips the `-*` and lone `-` pieces that the positional fragments use to optionally absorb a
/// consumed `--` token, leaving the rest of the fragment's structure untouched.
fn strip_dashes(fragment: &str) -> String {
    fragment.replace("-*", "").replace('-', "")
}

impl fmt::Display for Nargs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Nargs::Unset => write!(f, "1"),
            Nargs::Exact(n) => write!(f, "{}", n),
            Nargs::Optional => write!(f, "?"),
            Nargs::ZeroOrMore => write!(f, "*"),
            Nargs::OneOrMore => write!(f, "+"),
            Nargs::Remainder => write!(f, "..."),
            Nargs::Parser => write!(f, "A..."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_fragments_match_the_spec_table() {
        assert_eq!(Nargs::Unset.positional_fragment(), "(-*A-*)");
        assert_eq!(Nargs::Optional.positional_fragment(), "(-*A?-*)");
        assert_eq!(Nargs::ZeroOrMore.positional_fragment(), "(-*[A-]*)");
        assert_eq!(Nargs::OneOrMore.positional_fragment(), "(-*A[A-]*)");
        assert_eq!(Nargs::Exact(3).positional_fragment(), "(-*A-*A-*A-*)");
        assert_eq!(Nargs::Remainder.positional_fragment(), "([-AO]*)");
        assert_eq!(Nargs::Parser.positional_fragment(), "(-*A[-AO]*)");
    }

    #[test]
    fn optional_fragments_strip_dash_parts() {
        assert_eq!(Nargs::Unset.optional_fragment(), "(A)");
        assert_eq!(Nargs::Optional.optional_fragment(), "(A?)");
        assert_eq!(Nargs::ZeroOrMore.optional_fragment(), "([A]*)");
        assert_eq!(Nargs::OneOrMore.optional_fragment(), "(A[A]*)");
        assert_eq!(Nargs::Exact(2).optional_fragment(), "(AA)");
    }
}
