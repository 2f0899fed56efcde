// Copyright (c) 2026 The Parsive Contributors
//
// This file is part of the `parsive` command-line argument parsing library.
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

//! [`ActionContainer`]: the registry of declared arguments.
//!
//! Owns the action list, the option-string index, the group and mutex-group lists, the defaults
//! map and the prefix-character alphabet. A [`Parser`](crate::parser::Parser) wraps one of
//! these; a subparser's children each own their own.

use std::collections::HashMap;

use regex::Regex;

use crate::action::{Action, ActionKind};
use crate::arity::Nargs;
use crate::error::{DeclarationError, Flaw};
use crate::group::{Group, MutexGroup};
use crate::types::TypeFn;
use crate::value::Value;

/// What to do when a newly declared option string collides with one already indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictHandler {
    /// Reject the new declaration, naming every conflicting string.
    Error,
    /// Silently strip the conflicting strings from the prior action (and drop it entirely if
    /// that empties it).
    Resolve,
}

fn negative_number_re() -> &'static Regex {
    use std::sync::OnceLock;
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^-\d+$|^-\d*\.\d+$").unwrap())
}

pub fn looks_like_negative_number(s: &str) -> bool {
    negative_number_re().is_match(s)
}

/// The declaration-time registry of actions, option strings, groups and defaults.
pub struct ActionContainer {
    pub(crate) actions: Vec<Action>,
    pub(crate) option_index: HashMap<String, usize>,
    pub(crate) defaults: HashMap<String, Value>,
    pub(crate) groups: Vec<Group>,
    pub(crate) mutex_groups: Vec<MutexGroup>,
    pub(crate) prefix_chars: Vec<char>,
    pub(crate) conflict_handler: ConflictHandler,
    pub(crate) argument_default: Option<Value>,
    pub(crate) has_negative_number_option: bool,
    type_registry: HashMap<String, TypeFn>,
}

impl Default for ActionContainer {
    fn default() -> Self {
        let mut type_registry = HashMap::new();
        type_registry.insert("string".to_string(), TypeFn::string());
        type_registry.insert("int".to_string(), TypeFn::int());
        type_registry.insert("float".to_string(), TypeFn::float());
        Self {
            actions: Vec::new(),
            option_index: HashMap::new(),
            defaults: HashMap::new(),
            groups: Vec::new(),
            mutex_groups: Vec::new(),
            prefix_chars: vec!['-'],
            conflict_handler: ConflictHandler::Error,
            argument_default: None,
            has_negative_number_option: false,
            type_registry,
        }
    }
}

impl ActionContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_prefix_chars(&mut self, chars: &str) {
        self.prefix_chars = chars.chars().collect();
    }

    pub fn set_conflict_handler(&mut self, handler: ConflictHandler) {
        self.conflict_handler = handler;
    }

    pub fn set_argument_default(&mut self, default: Value) {
        self.argument_default = Some(default);
    }

    /// Binds `handler` into the type registry under `name`. Unknown names supplied later as a
    /// `type` are forwarded verbatim so a caller can still pass a one-off closure without
    /// registering it first.
    pub fn register_type(&mut self, name: impl Into<String>, handler: TypeFn) {
        self.type_registry.insert(name.into(), handler);
    }

    pub(crate) fn resolve_type(&self, name: &str) -> Option<TypeFn> {
        self.type_registry.get(name).cloned()
    }

    /// Merges `options` into the defaults map; for any already-declared action whose
    /// destination matches, also overwrites its stored `defaultValue`.
    pub fn set_defaults(&mut self, options: impl IntoIterator<Item = (String, Value)>) {
        for (dest, value) in options {
            for action in self.actions.iter_mut() {
                if action.destination == dest {
                    action.default = Some(value.clone());
                }
            }
            self.defaults.insert(dest, value);
        }
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn mutex_groups(&self) -> &[MutexGroup] {
        &self.mutex_groups
    }

    pub fn defaults(&self) -> &HashMap<String, Value> {
        &self.defaults
    }

    pub fn add_group(&mut self, title: Option<&str>, description: Option<&str>) -> Result<usize, DeclarationError> {
        if let Some(title) = title {
            if self.groups.iter().any(|g| g.title.as_deref() == Some(title)) {
                return Err(DeclarationError::single(Flaw::DuplicateGroupTitle(title.to_string())));
            }
        }
        self.groups.push(Group::new(title.map(str::to_string), description.map(str::to_string)));
        Ok(self.groups.len() - 1)
    }

    pub fn add_mutex_group(&mut self, required: bool) -> usize {
        self.mutex_groups.push(MutexGroup::new(required));
        self.mutex_groups.len() - 1
    }

    pub fn add_action_to_group(&mut self, group_idx: usize, action_idx: usize) {
        self.groups[group_idx].action_indices.push(action_idx);
    }

    pub fn add_action_to_mutex_group(&mut self, mutex_idx: usize, action_idx: usize) {
        self.mutex_groups[mutex_idx].action_indices.push(action_idx);
    }

    /// Classifies `tokens` as positional (empty, or the one token doesn't start with a prefix
    /// character) or optional (every token must start with one).
    pub fn classify(&self, tokens: &[&str]) -> Result<bool, DeclarationError> {
        if tokens.is_empty() {
            return Ok(true);
        }
        let first_is_prefixed = tokens[0]
            .chars()
            .next()
            .map(|c| self.prefix_chars.contains(&c))
            .unwrap_or(false);
        if tokens.len() == 1 && !first_is_prefixed {
            return Ok(true);
        }
        for t in tokens {
            let starts = t.chars().next().map(|c| self.prefix_chars.contains(&c)).unwrap_or(false);
            if !starts {
                return Err(DeclarationError::single(Flaw::OptionMissingPrefix(t.to_string())));
            }
        }
        Ok(false)
    }

    /// Derives a destination from the first long option string (else the first short), per the
    /// container's prefix alphabet: strip leading prefix characters and replace `-` with `_`.
    pub fn derive_destination(&self, option_strings: &[String]) -> Result<String, DeclarationError> {
        let preferred = option_strings
            .iter()
            .find(|s| self.leading_prefix_len(s) >= 2)
            .or_else(|| option_strings.first())
            .ok_or_else(|| DeclarationError::single(Flaw::EmptyDestination))?;
        let stripped = preferred.trim_start_matches(|c| self.prefix_chars.contains(&c));
        if stripped.is_empty() {
            return Err(DeclarationError::single(Flaw::EmptyDestination));
        }
        Ok(stripped.replace('-', "_"))
    }

    pub(crate) fn leading_prefix_len(&self, s: &str) -> usize {
        s.chars().take_while(|c| self.prefix_chars.contains(c)).count()
    }

    /// Registers a fully-built action: runs the conflict check over its option strings, appends
    /// it to the action list, and indexes its option strings. Returns the new action's index.
    pub(crate) fn finalize_action(&mut self, mut action: Action) -> Result<usize, DeclarationError> {
        let mut flaws = Vec::new();
        for opt in &action.option_strings {
            if opt.is_empty() {
                flaws.push(Flaw::EmptyOptionString);
            }
        }
        // A positional's required-ness is derived from its arity (`?`/`*` are optional,
        // everything else required); `required` is only meaningful on an optional.
        if action.is_positional() && action.required_explicit {
            flaws.push(Flaw::RequiredOnPositional);
        }
        if action.kind.is_zero_arity_kind() {
            if let Some(nargs) = action.nargs {
                if nargs != Nargs::Exact(0) {
                    flaws.push(Flaw::ZeroArityWithNargs(action.kind.name().to_string()));
                }
            }
        }
        if !flaws.is_empty() {
            return Err(DeclarationError(flaws));
        }

        let mut conflicts: Vec<(usize, String)> = Vec::new();
        for opt in &action.option_strings {
            if let Some(&existing_idx) = self.option_index.get(opt) {
                conflicts.push((existing_idx, opt.clone()));
            }
        }

        if !conflicts.is_empty() {
            match self.conflict_handler {
                ConflictHandler::Error => {
                    return Err(DeclarationError(
                        conflicts.into_iter().map(|(_, s)| Flaw::DuplicateOptionString(s)).collect(),
                    ));
                }
                ConflictHandler::Resolve => {
                    let mut emptied: Vec<usize> = Vec::new();
                    for (existing_idx, opt) in &conflicts {
                        let existing = &mut self.actions[*existing_idx];
                        existing.option_strings.retain(|s| s != opt);
                        self.option_index.remove(opt);
                        if existing.option_strings.is_empty() {
                            emptied.push(*existing_idx);
                        }
                    }
                    emptied.sort_unstable();
                    emptied.dedup();
                    for idx in emptied.into_iter().rev() {
                        self.actions.remove(idx);
                        self.reindex_after_removal(idx);
                    }
                }
            }
        }

        if action.option_strings.iter().any(|s| looks_like_negative_number(s)) {
            self.has_negative_number_option = true;
        }

        let new_idx = self.actions.len();
        for opt in &action.option_strings {
            self.option_index.insert(opt.clone(), new_idx);
        }
        // A `subparsers` positional (`Nargs::Parser`) is exempted from the usual "positionals
        // are required" default alongside `?`/`*`: real-world argparse lets a program with
        // subcommands run with none selected unless the caller opts in explicitly, and forcing
        // it here would leave no way to express that.
        action.required = action.required
            || (action.is_positional()
                && !matches!(action.effective_nargs(), Nargs::Optional | Nargs::ZeroOrMore | Nargs::Parser));
        self.actions.push(action);
        Ok(new_idx)
    }

    fn reindex_after_removal(&mut self, removed_idx: usize) {
        for (_, idx) in self.option_index.iter_mut() {
            if *idx > removed_idx {
                *idx -= 1;
            }
        }
        for group in self.groups.iter_mut() {
            for gi in group.action_indices.iter_mut() {
                if *gi > removed_idx {
                    *gi -= 1;
                }
            }
        }
        for mg in self.mutex_groups.iter_mut() {
            for gi in mg.action_indices.iter_mut() {
                if *gi > removed_idx {
                    *gi -= 1;
                }
            }
        }
    }

    /// Builds, for every action in every mutex group, the list of its sibling (forbidden
    /// companion) action indices.
    pub(crate) fn mutex_companions(&self) -> HashMap<usize, Vec<usize>> {
        let mut map: HashMap<usize, Vec<usize>> = HashMap::new();
        for mg in &self.mutex_groups {
            for &a in &mg.action_indices {
                let siblings: Vec<usize> = mg.action_indices.iter().copied().filter(|&b| b != a).collect();
                map.entry(a).or_default().extend(siblings);
            }
        }
        map
    }

    #[cfg(feature = "suggestions")]
    pub(crate) fn suggest(&self, unknown: &str) -> Option<String> {
        let mut best: Option<(String, f64)> = None;
        for opt in self.option_index.keys() {
            let score = strsim::jaro_winkler(unknown, opt);
            if score < 0.8 {
                continue;
            }
            match &best {
                Some((_, best_score)) if *best_score >= score => {}
                _ => best = Some((opt.clone(), score)),
            }
        }
        best.map(|(s, _)| s)
    }

    #[cfg(not(feature = "suggestions"))]
    pub(crate) fn suggest(&self, _unknown: &str) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_number_regex_matches_ints_and_floats_only() {
        assert!(looks_like_negative_number("-1"));
        assert!(looks_like_negative_number("-1.5"));
        assert!(looks_like_negative_number("-.5"));
        assert!(!looks_like_negative_number("-x"));
        assert!(!looks_like_negative_number("--1"));
    }

    #[test]
    fn classify_rejects_mixed_prefix_and_bare_tokens() {
        let c = ActionContainer::new();
        assert_eq!(c.classify(&["name"]).unwrap(), true);
        assert_eq!(c.classify(&["--foo"]).unwrap(), false);
        assert_eq!(c.classify(&["--foo", "-f"]).unwrap(), false);
        assert!(c.classify(&["--foo", "bar"]).is_err());
    }

    #[test]
    fn derive_destination_prefers_long_and_strips_dashes() {
        let c = ActionContainer::new();
        let dest = c
            .derive_destination(&["-f".to_string(), "--foo-bar".to_string()])
            .unwrap();
        assert_eq!(dest, "foo_bar");
    }
}
