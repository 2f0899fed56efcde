// Copyright (c) 2026 The Parsive Contributors
//
// This file is part of the `parsive` command-line argument parsing library.
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

//! Usage and help text layout.
//!
//! [`HelpFormatter`] renders a program's declared arguments the same way regardless of which
//! [`FormatterKind`] is selected; the kinds only change how description/help text wrapping and
//! the "show the default" behavior work. Line width defaults to the `COLUMNS` environment
//! variable (minus 2) and falls back to 78 when that hint isn't set or isn't a number.

use regex::Regex;

use crate::action::Action;
use crate::arity::Nargs;
use crate::group::{Group, MutexGroup};
use crate::value::Value;

/// Which help-formatting variant to use. All variants share layout; they differ only in
/// wrapping policy and in whether a default value is appended to an argument's help text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatterKind {
    /// Wraps description/help text normally.
    Default,
    /// Preserves the description text verbatim (no re-wrapping); argument help still wraps.
    RawDescription,
    /// Preserves whitespace in all text, including argument help.
    RawText,
    /// Like `Default`, but appends `(default: value)` to help text that doesn't already mention
    /// `%(default)`, for optionals and for positionals whose arity isn't `?`/`*`.
    ArgumentDefaults,
}

pub struct HelpFormatter {
    pub prog: String,
    pub kind: FormatterKind,
    pub width: usize,
    pub indent_step: usize,
    pub help_position_max: usize,
}

impl HelpFormatter {
    pub fn new(prog: impl Into<String>, kind: FormatterKind) -> Self {
        Self {
            prog: prog.into(),
            kind,
            width: terminal_width(),
            indent_step: 2,
            help_position_max: 24,
        }
    }

    /// Renders `usage: PROG [options] positionals...`, wrapping onto further lines when the
    /// single-line form doesn't fit within `width`.
    pub fn format_usage(
        &self,
        usage_override: Option<&str>,
        optionals: &[&Action],
        positionals: &[&Action],
        mutex_groups: &[MutexGroup],
        all_actions: &[Action],
    ) -> String {
        if let Some(u) = usage_override {
            return format!("usage: {}\n", u);
        }

        let prefix = "usage: ";
        let opt_parts = usage_parts(optionals, mutex_groups, all_actions);
        let pos_parts: Vec<String> = positionals.iter().map(|a| arity_rendering(a)).collect();

        let mut all_parts = opt_parts.clone();
        all_parts.extend(pos_parts.clone());
        let one_line = if all_parts.is_empty() {
            self.prog.clone()
        } else {
            format!("{} {}", self.prog, all_parts.join(" "))
        };

        if prefix.len() + one_line.len() <= self.width {
            return format!("{}{}\n", prefix, one_line);
        }

        let text_width = self.width.saturating_sub(prefix.len()).max(11);
        let part_re = Regex::new(r"\(.*?\)+|\[.*?\]+|\S+").unwrap();

        let indent = if (prefix.len() + self.prog.len()) as f64 <= 0.75 * text_width as f64 {
            " ".repeat(prefix.len() + self.prog.len() + 1)
        } else {
            " ".repeat(prefix.len())
        };

        let mut lines = Vec::new();
        if (prefix.len() + self.prog.len()) as f64 <= 0.75 * text_width as f64 {
            let mut first = format!("{}{} ", prefix, self.prog);
            let wrapped = wrap_parts(&opt_parts, &pos_parts, &part_re, self.width - indent.len());
            for (i, line) in wrapped.into_iter().enumerate() {
                if i == 0 {
                    first.push_str(&line);
                    lines.push(first.clone());
                } else {
                    lines.push(format!("{}{}", indent, line));
                }
            }
        } else {
            lines.push(format!("{}{}", prefix, self.prog));
            let wrapped = wrap_parts(&opt_parts, &pos_parts, &part_re, self.width - indent.len());
            for line in wrapped {
                lines.push(format!("{}{}", indent, line));
            }
        }

        format!("{}\n", lines.join("\n"))
    }

    /// Renders a single action's row: its header (option strings / metavar) and help text,
    /// aligned to the formatter's emergent help column.
    pub fn format_action(&self, action: &Action, help_position: usize) -> String {
        let header = action_header(action);
        let current_indent = self.indent_step;
        let mut out = format!("{}{}", " ".repeat(current_indent), header);

        let help_text = self.resolve_help(action);
        if help_text.is_empty() {
            out.push('\n');
            return out;
        }

        let header_width = current_indent + header.len();
        let wrapped = self.wrap_help(&help_text, self.width.saturating_sub(help_position).max(11));

        if header_width + 2 <= help_position {
            let pad = help_position.saturating_sub(header_width);
            out.push_str(&" ".repeat(pad));
            if let Some((first, rest)) = wrapped.split_first() {
                out.push_str(first);
                out.push('\n');
                for line in rest {
                    out.push_str(&" ".repeat(help_position));
                    out.push_str(line);
                    out.push('\n');
                }
            }
        } else {
            out.push('\n');
            for line in &wrapped {
                out.push_str(&" ".repeat(help_position));
                out.push_str(line);
                out.push('\n');
            }
        }
        out
    }

    fn wrap_help(&self, text: &str, width: usize) -> Vec<String> {
        match self.kind {
            FormatterKind::RawText => text.lines().map(str::to_string).collect(),
            _ => textwrap::wrap(text, width.max(1)).into_iter().map(|c| c.into_owned()).collect(),
        }
    }

    fn resolve_help(&self, action: &Action) -> String {
        let base = action.help.clone().unwrap_or_default();
        let mut text = interpolate(&base, action, &self.prog);
        if self.kind == FormatterKind::ArgumentDefaults
            && !text.contains("%(default)")
            && !matches!(action.effective_nargs(), Nargs::Optional | Nargs::ZeroOrMore)
        {
            if let Some(default) = &action.default {
                if !text.is_empty() {
                    text.push(' ');
                }
                text.push_str(&format!("(default: {})", default));
            }
        }
        text
    }

    /// Computes the emergent help column: two past the longest visible action header, clamped
    /// to `help_position_max`.
    pub fn compute_help_position(&self, actions: &[&Action]) -> usize {
        let longest = actions
            .iter()
            .filter(|a| !a.help_hidden())
            .map(|a| self.indent_step + action_header(a).len())
            .max()
            .unwrap_or(0);
        (longest + 2).min(self.help_position_max).max(self.indent_step + 2)
    }

    /// Collapses runs of 3+ newlines to exactly 2 and strips leading/trailing blank lines.
    pub fn normalize_blank_lines(text: &str) -> String {
        let collapse_re = Regex::new(r"\n\n\n+").unwrap();
        let collapsed = collapse_re.replace_all(text, "\n\n");
        collapsed.trim_matches('\n').to_string()
    }
}

fn terminal_width() -> usize {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|s| s.trim().parse::<usize>().ok())
        .map(|c| c.saturating_sub(2).max(11))
        .unwrap_or(78)
}

/// Metavar resolution: explicit `metavar` wins; else `{c1,c2,...}` if `choices` is set; else the
/// upper-cased destination for optionals, the destination itself for positionals.
pub fn metavar(action: &Action) -> String {
    if let Some(m) = &action.metavar {
        return m.clone();
    }
    if let Some(choices) = &action.choices {
        let items: Vec<String> = choices.iter().map(Value::to_string).collect();
        return format!("{{{}}}", items.join(","));
    }
    if action.is_positional() {
        action.destination.clone()
    } else {
        action.destination.to_uppercase()
    }
}

/// Renders the value placeholder(s) for one action per its arity, per the spec's rendering
/// table (`unset` ⇒ `M`, `?` ⇒ `[M]`, `*` ⇒ `[M [M ...]]`, `+` ⇒ `M [M ...]`, ...).
fn value_rendering(action: &Action) -> String {
    let m = metavar(action);
    match action.effective_nargs() {
        Nargs::Unset => m,
        Nargs::Optional => format!("[{}]", m),
        Nargs::ZeroOrMore => format!("[{} [{} ...]]", m, m),
        Nargs::OneOrMore => format!("{} [{} ...]", m, m),
        Nargs::Remainder => "...".to_string(),
        Nargs::Parser => format!("{} ...", m),
        Nargs::Exact(n) => std::iter::repeat(m.as_str()).take(n).collect::<Vec<_>>().join(" "),
    }
}

fn arity_rendering(action: &Action) -> String {
    if action.is_positional() {
        value_rendering(action)
    } else {
        let opt = action.option_strings.first().cloned().unwrap_or_default();
        if action.is_zero_arity() {
            if action.required {
                opt
            } else {
                format!("[{}]", opt)
            }
        } else if action.required {
            format!("{} {}", opt, value_rendering(action))
        } else {
            format!("[{} {}]", opt, value_rendering(action))
        }
    }
}

/// The header column for an action's row in the detailed listing: all option strings joined by
/// `, `, each followed by its value rendering (omitted for zero-arity kinds); for positionals,
/// just the value rendering.
fn action_header(action: &Action) -> String {
    if action.is_positional() {
        return value_rendering(action);
    }
    if action.is_zero_arity() {
        return action.option_strings.join(", ");
    }
    let value = value_rendering(action);
    action
        .option_strings
        .iter()
        .map(|o| format!("{} {}", o, value))
        .collect::<Vec<_>>()
        .join(", ")
}

fn usage_parts(optionals: &[&Action], mutex_groups: &[MutexGroup], all_actions: &[Action]) -> Vec<String> {
    let mut grouped: Vec<bool> = vec![false; optionals.len()];
    let mut parts = Vec::new();

    for mg in mutex_groups {
        let members: Vec<(usize, &Action)> = optionals
            .iter()
            .enumerate()
            .filter(|(_, a)| {
                mg.action_indices.iter().any(|&i| {
                    std::ptr::eq(*a as *const Action, &all_actions[i] as *const Action)
                })
            })
            .map(|(i, a)| (i, *a))
            .collect();
        if members.is_empty() {
            continue;
        }
        for (i, _) in &members {
            grouped[*i] = true;
        }
        let rendered: Vec<String> = members
            .iter()
            .filter(|(_, a)| !a.help_hidden())
            .map(|(_, a)| arity_rendering_bare(a))
            .collect();
        if rendered.is_empty() {
            continue;
        }
        let joined = rendered.join("|");
        parts.push(if mg.required { format!("({})", joined) } else { format!("[{}]", joined) });
    }

    for (i, a) in optionals.iter().enumerate() {
        if grouped[i] || a.help_hidden() {
            continue;
        }
        parts.push(arity_rendering(a));
    }

    parts
}

fn arity_rendering_bare(action: &Action) -> String {
    let opt = action.option_strings.first().cloned().unwrap_or_default();
    if action.is_zero_arity() {
        opt
    } else {
        format!("{} {}", opt, value_rendering(action))
    }
}

fn wrap_parts(opt_parts: &[String], pos_parts: &[String], _part_re: &Regex, width: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for part in opt_parts.iter().chain(pos_parts.iter()) {
        let candidate_len = if current.is_empty() {
            part.len()
        } else {
            current.len() + 1 + part.len()
        };
        if candidate_len > width.max(1) && !current.is_empty() {
            lines.push(current.clone());
            current.clear();
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(part);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Substitutes `%name%` tokens in `help` from the action's own attributes plus `%prog%`,
/// dropping any attribute whose value is `SUPPRESS` and rendering `choices` as a comma list.
pub fn interpolate(help: &str, action: &Action, prog: &str) -> String {
    let mut out = String::with_capacity(help.len());
    let mut rest = help;
    while let Some(start) = rest.find('%') {
        let Some(end_rel) = rest[start + 1..].find('%') else {
            out.push_str(rest);
            return out;
        };
        let name = &rest[start + 1..start + 1 + end_rel];
        out.push_str(&rest[..start]);
        match name {
            "prog" => out.push_str(prog),
            "default" => {
                if let Some(d) = &action.default {
                    if !matches!(d, Value::Str(s) if crate::types::is_suppress(s)) {
                        out.push_str(&d.to_string());
                    }
                }
            }
            "dest" => out.push_str(&action.destination),
            "metavar" => out.push_str(&metavar(action)),
            "choices" => {
                if let Some(choices) = &action.choices {
                    let items: Vec<String> = choices.iter().map(Value::to_string).collect();
                    out.push_str(&items.join(", "));
                }
            }
            other => {
                out.push('%');
                out.push_str(other);
                out.push('%');
            }
        }
        rest = &rest[start + 1 + end_rel + 1..];
    }
    out.push_str(rest);
    out
}

pub fn group_section_title(group: &Group) -> &str {
    group.title.as_deref().unwrap_or("arguments")
}
