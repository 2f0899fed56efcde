// Copyright (c) 2026 The Parsive Contributors
//
// This file is part of the `parsive` command-line argument parsing library.
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

//! The matching engine: drives the `O`/`A`/`-` pattern produced by [`crate::tokenize`] through
//! the alternating positional/optional consumption loop, invokes actions, and runs the
//! mutex/required post-checks.

use std::collections::{HashMap, HashSet};

use regex::Regex;

use crate::action::{Action, ActionKind};
use crate::arity::Nargs;
use crate::container::ActionContainer;
use crate::error::ArgparseError;
use crate::namespace::Namespace;
use crate::tokenize::{tokenize, Recognized};
use crate::types::coerce_and_check;
use crate::value::Value;

/// Parses `tokens` against `container`, writing into `namespace` and returning the leftover
/// ("extra") tokens neither a positional nor an optional consumed.
pub(crate) fn run(
    container: &ActionContainer,
    tokens: &[String],
    namespace: &mut Namespace,
) -> Result<Vec<String>, ArgparseError> {
    seed_defaults(container, namespace)?;

    let tokenized = tokenize(tokens, container)?;
    let mutex_companions = container.mutex_companions();

    let mut engine = Engine {
        container,
        tokens,
        pattern: &tokenized.pattern,
        recognized: &tokenized.recognized,
        namespace,
        extras: Vec::new(),
        remaining_positionals: container
            .actions()
            .iter()
            .enumerate()
            .filter(|(_, a)| a.is_positional())
            .map(|(i, _)| i)
            .collect(),
        mutex_companions,
        seen: HashSet::new(),
        non_default_seen: HashSet::new(),
    };

    engine.run_loop()?;
    engine.check_post_conditions()?;

    Ok(engine.extras)
}

fn seed_defaults(container: &ActionContainer, namespace: &mut Namespace) -> Result<(), ArgparseError> {
    for action in container.actions() {
        if action.dest_suppressed() {
            continue;
        }
        if namespace.contains(&action.destination) {
            continue;
        }
        let default = match &action.default {
            Some(d) => Some(d.clone()),
            None => container.defaults().get(&action.destination).cloned(),
        };
        if let Some(Value::Str(s)) = &default {
            if crate::types::is_suppress(s) {
                continue;
            }
            let coerced = coerce_and_check(&action.type_fn, &action.choices, &action.destination, s)?;
            namespace.set(action.destination.clone(), coerced);
        } else if let Some(value) = default {
            namespace.set(action.destination.clone(), value);
        }
    }
    for (dest, value) in container.defaults() {
        if !namespace.contains(dest) {
            namespace.set(dest.clone(), value.clone());
        }
    }
    Ok(())
}

struct Engine<'a> {
    container: &'a ActionContainer,
    tokens: &'a [String],
    pattern: &'a str,
    recognized: &'a HashMap<usize, Recognized>,
    namespace: &'a mut Namespace,
    extras: Vec<String>,
    remaining_positionals: Vec<usize>,
    mutex_companions: HashMap<usize, Vec<usize>>,
    seen: HashSet<usize>,
    non_default_seen: HashSet<usize>,
}

impl<'a> Engine<'a> {
    /// Mirrors the reference engine's own `while start_index <= max_option_string_index`
    /// structure precisely, continuation included: a positional consumption that reaches past
    /// the next (or even the last) recognized option index must re-check the loop condition
    /// instead of blindly trying `consume_optional` at a stale or out-of-range cursor. This
    /// matters because the `REMAINDER`/`PARSER` fragments are the only ones whose character
    /// class includes `O`, so a subparsers or "rest of the command line" positional can legally
    /// swallow every option-looking token still to come.
    fn run_loop(&mut self) -> Result<(), ArgparseError> {
        let o_indices: Vec<usize> = self
            .pattern
            .char_indices()
            .filter(|(_, c)| *c == 'O')
            .map(|(i, _)| i)
            .collect();

        if let Some(&max_option_index) = o_indices.last() {
            let mut i = 0usize;
            while i <= max_option_index {
                let next_option_index = *o_indices.iter().find(|&&idx| idx >= i).expect(
                    "a next recognized option index must exist while the cursor is still at or \
                     before the last one",
                );

                if i != next_option_index {
                    let positionals_end = self.consume_positionals_repeated(i)?;
                    if positionals_end > i {
                        i = positionals_end;
                        continue;
                    }
                    i = positionals_end;
                }

                if i != next_option_index {
                    self.push_extras(i..next_option_index);
                    i = next_option_index;
                }

                i = self.consume_optional(i)?;
            }

            let reached = self.consume_positionals_repeated(i)?;
            i = reached;
            if i < self.tokens.len() {
                self.push_extras(i..self.tokens.len());
            }
        } else {
            let reached = self.consume_positionals_repeated(0)?;
            if reached < self.tokens.len() {
                self.push_extras(reached..self.tokens.len());
            }
        }
        Ok(())
    }

    /// Appends the tokens in `range` to `extras`, skipping any position whose pattern character
    /// is the `--` terminator itself: it is a delimiter, never a value, and must never surface as
    /// an unrecognized argument even when nothing absorbs it.
    fn push_extras(&mut self, range: std::ops::Range<usize>) {
        let pattern = self.pattern.as_bytes();
        for idx in range {
            if pattern[idx] == b'-' {
                continue;
            }
            self.extras.push(self.tokens[idx].clone());
        }
    }

    fn consume_positionals_repeated(&mut self, start: usize) -> Result<usize, ArgparseError> {
        let mut cur = start;
        loop {
            if self.remaining_positionals.is_empty() {
                break;
            }
            let next = self.consume_positionals_once(cur)?;
            if next > cur {
                cur = next;
            } else {
                break;
            }
        }
        Ok(cur)
    }

    /// A single greedy-with-backoff pass: try matching the concatenated arity fragment of the
    /// full remaining-positionals list against the pattern from `start`; on failure, drop the
    /// last positional from the trial list and retry, down to the empty list (which trivially
    /// matches zero-width and consumes nothing).
    fn consume_positionals_once(&mut self, start: usize) -> Result<usize, ArgparseError> {
        for k in (0..=self.remaining_positionals.len()).rev() {
            let slice = self.remaining_positionals[..k].to_vec();
            let combined: String = slice
                .iter()
                .map(|&idx| self.container.actions()[idx].effective_nargs().positional_fragment())
                .collect();
            let re = Regex::new(&format!("^{}", combined)).expect("arity fragment is a valid regex");
            let rest = &self.pattern[start..];
            if let Some(caps) = re.captures(rest) {
                let mut offset = start;
                for (pos, &action_idx) in slice.iter().enumerate() {
                    let grp = caps.get(pos + 1).expect("one capture group per concatenated action fragment");
                    let len = grp.as_str().len();
                    let values: Vec<String> = self.tokens[offset..offset + len].to_vec();
                    self.invoke(action_idx, values, None)?;
                    offset += len;
                }
                self.remaining_positionals.drain(..k);
                return Ok(offset);
            }
        }
        Ok(start)
    }

    fn consume_optional(&mut self, i: usize) -> Result<usize, ArgparseError> {
        let rec = self.recognized.get(&i).expect("pattern 'O' position must be recognized").clone();

        let Some(action_idx) = rec.action_idx else {
            self.extras.push(self.tokens[i].clone());
            return Ok(i + 1);
        };

        if let Some(explicit) = &rec.explicit {
            let action = &self.container.actions()[action_idx];
            if action.is_zero_arity() && self.container.leading_prefix_len(&rec.option_string) == 1 {
                self.expand_short_cluster(explicit, &rec.option_string)?;
            } else if action.effective_nargs().accepts_single_explicit() {
                self.invoke(action_idx, vec![explicit.clone()], Some(rec.option_string.clone()))?;
            } else {
                return Err(ArgparseError::IgnoredExplicitArgument {
                    dest: action.display_name(),
                    value: explicit.clone(),
                });
            }
            return Ok(i + 1);
        }

        let action = &self.container.actions()[action_idx];
        let frag = action.effective_nargs().optional_fragment();
        let re = Regex::new(&format!("^{}", frag)).expect("arity fragment is a valid regex");
        let rest = &self.pattern[i + 1..];
        match re.captures(rest) {
            Some(caps) => {
                let whole = caps.get(0).unwrap();
                let len = whole.as_str().len();
                let values: Vec<String> = self.tokens[i + 1..i + 1 + len].to_vec();
                self.invoke(action_idx, values, Some(rec.option_string.clone()))?;
                Ok(i + 1 + len)
            }
            None => Err(ArgparseError::WrongArity {
                dest: action.display_name(),
                expected: format!("{} argument(s)", action.effective_nargs()),
            }),
        }
    }

    /// Expands `-xvf=X`-style explicit values attached to a zero-arity short option: walk the
    /// remainder char by char, consuming further zero-arity short options, until either the
    /// remainder is exhausted or a data-taking short option is reached (which consumes the rest
    /// as its single value, minus a leading `=` if present).
    fn expand_short_cluster(&mut self, remainder: &str, source: &str) -> Result<(), ArgparseError> {
        let mut rest = remainder;
        loop {
            if rest.is_empty() {
                return Ok(());
            }
            let mut chars = rest.chars();
            let ch = chars.next().unwrap();
            let tail = chars.as_str();
            let short_str = format!("-{}", ch);
            match self.container.option_index.get(&short_str) {
                None => {
                    return Err(ArgparseError::IgnoredExplicitArgument {
                        dest: source.to_string(),
                        value: remainder.to_string(),
                    })
                }
                Some(&action_idx) => {
                    let action = &self.container.actions()[action_idx];
                    if action.is_zero_arity() {
                        self.invoke(action_idx, vec![], Some(short_str))?;
                        rest = tail;
                        continue;
                    } else if action.effective_nargs().accepts_single_explicit() {
                        let value = tail.strip_prefix('=').unwrap_or(tail);
                        self.invoke(action_idx, vec![value.to_string()], Some(short_str))?;
                        return Ok(());
                    } else {
                        return Err(ArgparseError::IgnoredExplicitArgument {
                            dest: source.to_string(),
                            value: remainder.to_string(),
                        });
                    }
                }
            }
        }
    }

    fn invoke(
        &mut self,
        action_idx: usize,
        mut raw_values: Vec<String>,
        option_string: Option<String>,
    ) -> Result<(), ArgparseError> {
        let nargs = self.container.actions()[action_idx].effective_nargs();
        if !matches!(nargs, Nargs::Remainder | Nargs::Parser) {
            raw_values.retain(|v| v != "--");
        }

        self.seen.insert(action_idx);

        if self.container.actions()[action_idx].kind.is_zero_arity_kind() {
            let (dest, constant) = {
                let a = &self.container.actions()[action_idx];
                (a.destination.clone(), a.constant.clone())
            };
            self.check_mutex(action_idx)?;
            self.non_default_seen.insert(action_idx);
            if let ActionKind::Help = self.container.actions()[action_idx].kind {
                return Err(ArgparseError::HelpRequested);
            }
            if let ActionKind::Version(text) = &self.container.actions()[action_idx].kind {
                return Err(ArgparseError::VersionRequested(text.clone()));
            }
            if !dest.is_empty() && !crate::types::is_suppress(&dest) {
                self.container.actions()[action_idx]
                    .kind
                    .apply_const(self.namespace, &dest, &constant)?;
            }
            return Ok(());
        }

        if let ActionKind::Subparsers(subparsers) = &self.container.actions()[action_idx].kind {
            if raw_values.is_empty() {
                return Err(ArgparseError::TooFewArguments);
            }
            let chosen = raw_values[0].clone();
            let rest = raw_values[1..].to_vec();
            let dest = self.container.actions()[action_idx].destination.clone();
            if !dest.is_empty() && !crate::types::is_suppress(&dest) {
                self.namespace.set(dest, Value::from(chosen.clone()));
            }
            let leftover = subparsers.dispatch(&chosen, &rest, self.namespace)?;
            self.extras.extend(leftover);
            self.seen.insert(action_idx);
            self.non_default_seen.insert(action_idx);
            return Ok(());
        }

        let action = &self.container.actions()[action_idx];
        let mut coerced = Vec::with_capacity(raw_values.len());
        for raw in &raw_values {
            coerced.push(coerce_and_check(&action.type_fn, &action.choices, &action.destination, raw)?);
        }

        let shaped = shape_value(nargs, coerced, &action.default);

        let is_default = match &shaped {
            Some(v) => action.default.as_ref() == Some(v),
            None => false,
        };

        if !is_default {
            self.check_mutex(action_idx)?;
            self.non_default_seen.insert(action_idx);
        }

        let dest = action.destination.clone();
        let dest_suppressed = action.dest_suppressed();
        let kind_is_append = matches!(action.kind, ActionKind::Append);

        if let Some(value) = shaped {
            if !dest_suppressed {
                if kind_is_append {
                    match value {
                        Value::List(items) => {
                            for item in items {
                                self.namespace.append(dest.clone(), item);
                            }
                        }
                        other => self.namespace.append(dest.clone(), other),
                    }
                } else {
                    self.namespace.set(dest, value);
                }
            }
        }

        Ok(())
    }

    fn check_mutex(&self, action_idx: usize) -> Result<(), ArgparseError> {
        if let Some(companions) = self.mutex_companions.get(&action_idx) {
            for &other in companions {
                if self.non_default_seen.contains(&other) {
                    let a_name = self.container.actions()[action_idx].display_name();
                    let b_name = self.container.actions()[other].display_name();
                    return Err(ArgparseError::MutexConflict { dest: a_name, other: b_name });
                }
            }
        }
        Ok(())
    }

    fn check_post_conditions(&self) -> Result<(), ArgparseError> {
        if !self.remaining_positionals.is_empty() {
            let still_required: Vec<usize> = self
                .remaining_positionals
                .iter()
                .copied()
                .filter(|&i| self.container.actions()[i].required)
                .collect();
            if !still_required.is_empty() {
                return Err(ArgparseError::TooFewArguments);
            }
        }

        let mut missing = Vec::new();
        for (idx, action) in self.container.actions().iter().enumerate() {
            if action.required && !self.seen.contains(&idx) {
                missing.push(action.display_name());
            }
        }
        if !missing.is_empty() {
            return Err(ArgparseError::MissingRequired(missing.join(", ")));
        }

        for mg in self.container.mutex_groups() {
            if !mg.required {
                continue;
            }
            let any_seen = mg.action_indices.iter().any(|i| self.non_default_seen.contains(i));
            if !any_seen {
                let names: Vec<String> = mg
                    .action_indices
                    .iter()
                    .map(|&i| self.container.actions()[i].display_name())
                    .collect();
                return Err(ArgparseError::MutexRequired(names));
            }
        }

        Ok(())
    }
}

/// Shapes coerced values per arity: `Unset`/`?` with a single value yields the scalar; `*` with
/// no values yields the default (or an empty list); everything else is a list. Returns `None`
/// when there is nothing to write (an `Optional`/`ZeroOrMore` miss with no default configured).
fn shape_value(nargs: Nargs, mut values: Vec<Value>, default: &Option<Value>) -> Option<Value> {
    match nargs {
        Nargs::Unset => values.pop(),
        Nargs::Optional => {
            if values.is_empty() {
                default.clone()
            } else {
                values.pop()
            }
        }
        Nargs::ZeroOrMore => {
            if values.is_empty() {
                Some(default.clone().unwrap_or_else(|| Value::List(Vec::new())))
            } else {
                Some(Value::List(values))
            }
        }
        _ => Some(Value::List(values)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{Action, ActionKind};
    use crate::types::TypeFn;

    fn store_true(container: &mut ActionContainer, opts: &[&str]) {
        let option_strings: Vec<String> = opts.iter().map(|s| s.to_string()).collect();
        let dest = container.derive_destination(&option_strings).unwrap();
        container
            .finalize_action(Action {
                option_strings,
                destination: dest,
                nargs: Some(Nargs::Exact(0)),
                constant: None,
                default: Some(Value::Bool(false)),
                type_fn: TypeFn::default(),
                choices: None,
                required: false,
                required_explicit: false,
                help: None,
                metavar: None,
                kind: ActionKind::StoreTrue,
            })
            .unwrap();
    }

    fn store(container: &mut ActionContainer, opts: &[&str]) {
        let option_strings: Vec<String> = opts.iter().map(|s| s.to_string()).collect();
        let dest = container.derive_destination(&option_strings).unwrap();
        container
            .finalize_action(Action {
                option_strings,
                destination: dest,
                nargs: None,
                constant: None,
                default: None,
                type_fn: TypeFn::default(),
                choices: None,
                required: false,
                required_explicit: false,
                help: None,
                metavar: None,
                kind: ActionKind::Store,
            })
            .unwrap();
    }

    fn positional(container: &mut ActionContainer, name: &str, nargs: Nargs) {
        container
            .finalize_action(Action {
                option_strings: Vec::new(),
                destination: name.to_string(),
                nargs: Some(nargs),
                constant: None,
                default: None,
                type_fn: TypeFn::default(),
                choices: None,
                required: false,
                required_explicit: false,
                help: None,
                metavar: None,
                kind: ActionKind::Store,
            })
            .unwrap();
    }

    fn run_tokens(container: &ActionContainer, tokens: &[&str]) -> (Namespace, Vec<String>) {
        let owned: Vec<String> = tokens.iter().map(|s| s.to_string()).collect();
        let mut ns = Namespace::new();
        let extras = run(container, &owned, &mut ns).unwrap();
        (ns, extras)
    }

    #[test]
    fn short_option_cluster_matches_three_separate_invocations() {
        let mut c = ActionContainer::new();
        store_true(&mut c, &["-a"]);
        store_true(&mut c, &["-b"]);
        store_true(&mut c, &["-c"]);
        let (clustered, extras) = run_tokens(&c, &["-abc"]);
        assert!(extras.is_empty());
        let (separate, _) = run_tokens(&c, &["-a", "-b", "-c"]);
        assert_eq!(clustered, separate);
    }

    #[test]
    fn double_dash_forces_matching_option_like_token_to_positional() {
        let mut c = ActionContainer::new();
        store_true(&mut c, &["-x"]);
        positional(&mut c, "name", Nargs::Unset);
        let (ns, extras) = run_tokens(&c, &["--", "-x"]);
        assert!(extras.is_empty());
        assert_eq!(ns.get_str("name"), Some("-x"));
        assert_eq!(ns.get_bool("x"), Some(false));
    }

    #[test]
    fn remainder_positional_after_equals_or_long_option_does_not_starve_optionals() {
        // A remainder (or subparsers) positional following an optional in the pattern must not
        // cause the main loop to skip past a still-unconsumed option: this exercises the fixed
        // `run_loop`, which re-checks its `while i <= max_option_index` condition after a
        // positional consumption advances the cursor, rather than blindly trying
        // `consume_optional` at a stale index.
        let mut c = ActionContainer::new();
        store(&mut c, &["--foo"]);
        positional(&mut c, "rest", Nargs::Remainder);
        let (ns, extras) = run_tokens(&c, &["--foo", "bar", "baz", "qux"]);
        assert!(extras.is_empty());
        assert_eq!(ns.get_str("foo"), Some("bar"));
        let rest = ns.get_list("rest").unwrap();
        assert_eq!(rest.len(), 2);
        assert_eq!(rest[0].as_str(), Some("baz"));
        assert_eq!(rest[1].as_str(), Some("qux"));
    }

    #[test]
    fn zero_or_more_positional_with_no_values_receives_its_default_not_an_empty_list() {
        let mut c = ActionContainer::new();
        c.finalize_action(Action {
            option_strings: Vec::new(),
            destination: "names".to_string(),
            nargs: Some(Nargs::ZeroOrMore),
            constant: None,
            default: Some(Value::List(vec![Value::from("fallback")])),
            type_fn: TypeFn::default(),
            choices: None,
            required: false,
            required_explicit: false,
            help: None,
            metavar: None,
            kind: ActionKind::Store,
        })
        .unwrap();
        let (ns, extras) = run_tokens(&c, &[]);
        assert!(extras.is_empty());
        assert_eq!(ns.get_list("names").unwrap(), &[Value::from("fallback")]);
    }
}
