// Copyright (c) 2026 The Parsive Contributors
//
// This file is part of the `parsive` command-line argument parsing library.
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

//! Turns a raw token sequence into the `O`/`A`/`-` pattern string the matching engine runs its
//! arity regexes against, plus a side table recording what each `O` position resolved to.

use std::collections::HashMap;

use crate::container::{looks_like_negative_number, ActionContainer};
use crate::error::ArgparseError;

/// What an `O`-patterned position resolved to during [`tokenize`].
#[derive(Debug, Clone)]
pub(crate) struct Recognized {
    /// `None` for a syntactically option-like token with no matching action (it may belong to a
    /// child subparser, or it may simply be unrecognized).
    pub action_idx: Option<usize>,
    pub option_string: String,
    pub explicit: Option<String>,
}

pub(crate) struct Tokenized {
    pub pattern: String,
    pub recognized: HashMap<usize, Recognized>,
}

/// Recursively expands `@file`-style tokens (those beginning with a file-prefix character) into
/// the lines of the named file. Each produced line is itself re-scanned for further expansion.
pub(crate) fn expand_file_args(
    tokens: Vec<String>,
    file_prefix_chars: &[char],
) -> Result<Vec<String>, ArgparseError> {
    if file_prefix_chars.is_empty() {
        return Ok(tokens);
    }
    let mut out = Vec::with_capacity(tokens.len());
    for token in tokens {
        let starts_with_file_prefix = token
            .chars()
            .next()
            .map(|c| file_prefix_chars.contains(&c))
            .unwrap_or(false);
        if !starts_with_file_prefix {
            out.push(token);
            continue;
        }
        let path = &token[1..];
        let contents = std::fs::read_to_string(path).map_err(|e| ArgparseError::FileExpansionFailed {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
        let lines: Vec<String> = contents.lines().map(str::to_string).collect();
        out.extend(expand_file_args(lines, file_prefix_chars)?);
    }
    Ok(out)
}

pub(crate) fn tokenize(
    tokens: &[String],
    container: &ActionContainer,
) -> Result<Tokenized, ArgparseError> {
    let mut pattern = String::with_capacity(tokens.len());
    let mut recognized = HashMap::new();
    let mut after_terminator = false;

    for (idx, token) in tokens.iter().enumerate() {
        if !after_terminator && token == "--" {
            pattern.push('-');
            after_terminator = true;
            continue;
        }
        if after_terminator {
            pattern.push('A');
            continue;
        }
        match parse_optional(token, container)? {
            Some(rec) => {
                pattern.push('O');
                recognized.insert(idx, rec);
            }
            None => pattern.push('A'),
        }
    }

    Ok(Tokenized { pattern, recognized })
}

enum Abbrev {
    Unique(usize, String),
    Ambiguous(Vec<String>),
    None,
}

fn find_abbrev(container: &ActionContainer, name: &str) -> Abbrev {
    let mut matched: Option<(usize, String)> = None;
    let mut ambiguous = Vec::new();
    let mut candidates: Vec<&String> = container
        .actions()
        .iter()
        .flat_map(|a| a.option_strings.iter())
        .filter(|opt| opt.len() > name.len() && opt.starts_with(name))
        .collect();
    candidates.sort();
    candidates.dedup();
    for opt in candidates {
        let action_idx = container
            .actions()
            .iter()
            .position(|a| a.option_strings.iter().any(|o| o == opt))
            .unwrap();
        match &matched {
            None => matched = Some((action_idx, opt.clone())),
            Some((_, first)) => {
                if ambiguous.is_empty() {
                    ambiguous.push(first.clone());
                }
                ambiguous.push(opt.clone());
            }
        }
    }
    if !ambiguous.is_empty() {
        return Abbrev::Ambiguous(ambiguous);
    }
    match matched {
        Some((idx, opt)) => Abbrev::Unique(idx, opt),
        None => Abbrev::None,
    }
}

fn split_eq(s: &str) -> (&str, Option<String>) {
    match s.find('=') {
        Some(pos) => (&s[..pos], Some(s[pos + 1..].to_string())),
        None => (s, None),
    }
}

fn parse_optional(
    arg: &str,
    container: &ActionContainer,
) -> Result<Option<Recognized>, ArgparseError> {
    if arg.is_empty() {
        return Ok(None);
    }
    let starts_with_prefix = arg
        .chars()
        .next()
        .map(|c| container.prefix_chars.contains(&c))
        .unwrap_or(false);
    if !starts_with_prefix {
        return Ok(None);
    }

    if let Some(&idx) = container.option_index.get(arg) {
        return Ok(Some(Recognized { action_idx: Some(idx), option_string: arg.to_string(), explicit: None }));
    }

    if arg.chars().count() == 1 {
        return Ok(None);
    }

    if let Some(eq) = arg.find('=') {
        let name = &arg[..eq];
        if let Some(&idx) = container.option_index.get(name) {
            return Ok(Some(Recognized {
                action_idx: Some(idx),
                option_string: name.to_string(),
                explicit: Some(arg[eq + 1..].to_string()),
            }));
        }
    }

    let prefix_len = container.leading_prefix_len(arg);
    if prefix_len >= 2 {
        let (name, explicit) = split_eq(arg);
        match find_abbrev(container, name) {
            Abbrev::Unique(idx, full) => {
                return Ok(Some(Recognized { action_idx: Some(idx), option_string: full, explicit }));
            }
            Abbrev::Ambiguous(candidates) => {
                return Err(ArgparseError::AmbiguousOption { token: arg.to_string(), candidates });
            }
            Abbrev::None => {}
        }
    } else {
        let mut chars = arg.char_indices();
        let _dash = chars.next();
        if let Some((byte_idx, ch)) = chars.next() {
            let short_str: String = arg[..byte_idx].chars().chain(std::iter::once(ch)).collect();
            if let Some(&idx) = container.option_index.get(&short_str) {
                let remainder_start = byte_idx + ch.len_utf8();
                let remainder = &arg[remainder_start..];
                let explicit = if remainder.is_empty() { None } else { Some(remainder.to_string()) };
                return Ok(Some(Recognized { action_idx: Some(idx), option_string: short_str, explicit }));
            }
        }
        let (name, explicit) = split_eq(arg);
        match find_abbrev(container, name) {
            Abbrev::Unique(idx, full) => {
                return Ok(Some(Recognized { action_idx: Some(idx), option_string: full, explicit }));
            }
            Abbrev::Ambiguous(candidates) => {
                return Err(ArgparseError::AmbiguousOption { token: arg.to_string(), candidates });
            }
            Abbrev::None => {}
        }
    }

    if looks_like_negative_number(arg) && !container.has_negative_number_option {
        return Ok(None);
    }

    if arg.chars().any(char::is_whitespace) {
        return Ok(None);
    }

    Ok(Some(Recognized { action_idx: None, option_string: arg.to_string(), explicit: None }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{Action, ActionKind};
    use crate::arity::Nargs;
    use crate::types::TypeFn;

    fn opt(container: &mut ActionContainer, strings: &[&str], kind: ActionKind) {
        let option_strings: Vec<String> = strings.iter().map(|s| s.to_string()).collect();
        let dest = container.derive_destination(&option_strings).unwrap();
        let nargs = if kind.is_zero_arity_kind() { Some(Nargs::Exact(0)) } else { None };
        container
            .finalize_action(Action {
                option_strings,
                destination: dest,
                nargs,
                constant: None,
                default: None,
                type_fn: TypeFn::default(),
                choices: None,
                required: false,
                required_explicit: false,
                help: None,
                metavar: None,
                kind,
            })
            .unwrap();
    }

    #[test]
    fn double_dash_switches_remainder_to_positional() {
        let mut c = ActionContainer::new();
        opt(&mut c, &["-x"], ActionKind::StoreTrue);
        let tokens = vec!["--".to_string(), "-x".to_string()];
        let t = tokenize(&tokens, &c).unwrap();
        assert_eq!(t.pattern, "-A");
    }

    #[test]
    fn ambiguous_abbreviation_is_an_error() {
        let mut c = ActionContainer::new();
        opt(&mut c, &["--foo"], ActionKind::Store);
        opt(&mut c, &["--foobar"], ActionKind::Store);
        let tokens = vec!["--fo".to_string()];
        assert!(tokenize(&tokens, &c).is_err());
        let tokens = vec!["--foob".to_string()];
        let t = tokenize(&tokens, &c).unwrap();
        assert_eq!(t.recognized.get(&0).unwrap().option_string, "--foobar");
    }

    #[test]
    fn short_cluster_is_tokenized_as_one_option_with_explicit_remainder() {
        let mut c = ActionContainer::new();
        opt(&mut c, &["-a"], ActionKind::StoreTrue);
        opt(&mut c, &["-b"], ActionKind::StoreTrue);
        opt(&mut c, &["-c"], ActionKind::StoreTrue);
        let tokens = vec!["-abc".to_string()];
        let t = tokenize(&tokens, &c).unwrap();
        assert_eq!(t.pattern, "O");
        let rec = t.recognized.get(&0).unwrap();
        assert_eq!(rec.option_string, "-a");
        assert_eq!(rec.explicit.as_deref(), Some("bc"));
    }
}
