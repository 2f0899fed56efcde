// Copyright (c) 2026 The Parsive Contributors
//
// This file is part of the `parsive` command-line argument parsing library.
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

//! Structural views over an [`ActionContainer`](crate::container::ActionContainer)'s action
//! list: plain titled groups (used only by help rendering) and mutually exclusive groups (used
//! also by the matching engine's conflict check).

/// A titled subset of a container's actions, referenced by index. No action is copied; a group
/// is purely a view for the help formatter.
#[derive(Debug, Clone, Default)]
pub struct Group {
    pub title: Option<String>,
    pub description: Option<String>,
    pub action_indices: Vec<usize>,
}

impl Group {
    pub fn new(title: Option<String>, description: Option<String>) -> Self {
        Self { title, description, action_indices: Vec::new() }
    }
}

/// A set of actions at most one of which may be given on the command line.
#[derive(Debug, Clone, Default)]
pub struct MutexGroup {
    pub required: bool,
    pub action_indices: Vec<usize>,
}

impl MutexGroup {
    pub fn new(required: bool) -> Self {
        Self { required, action_indices: Vec::new() }
    }
}
