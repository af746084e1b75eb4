// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `FIXME:<ticket>:` markers left in source code.
//!
//! Markers name a Trac ticket. Once the ticket has an issue in the repository
//! holding the code, the marker is rewritten to that issue number.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::mapping::IdMapping;
use crate::static_regex;

static FIXME_RE: LazyLock<Regex> = LazyLock::new(|| static_regex(r"FIXME:([0-9]+):"));

/// Rewrites markers for tickets migrated to one repository.
///
/// Rewriting is not idempotent: a rewritten number can collide with another
/// ticket id, so each tree is rewritten once.
#[derive(Debug, Clone, Default)]
pub struct FixmeRewriter {
    numbers: HashMap<u64, u64>,
    migrated: HashSet<u64>,
}

impl FixmeRewriter {
    /// Keeps the entries of `mapping` whose reference starts with `issues_prefix`.
    pub fn new(mapping: &IdMapping, issues_prefix: &str) -> Self {
        let numbers: HashMap<u64, u64> = mapping
            .iter()
            .filter(|(_, destination)| destination.reference.starts_with(issues_prefix))
            .map(|(id, destination)| (id, destination.number))
            .collect();
        let migrated = numbers.values().copied().collect();
        FixmeRewriter { numbers, migrated }
    }

    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }

    /// Replaces every known ticket id; unknown ones are kept and logged.
    pub fn rewrite(&self, text: &str) -> String {
        FIXME_RE
            .replace_all(text, |caps: &Captures| {
                let digits = &caps[1];
                let Ok(id) = digits.parse::<u64>() else {
                    tracing::warn!(marker = &caps[0], "ticket id out of range, kept");
                    return caps[0].to_string();
                };
                match self.numbers.get(&id) {
                    Some(number) => format!("FIXME:{number}:"),
                    None if self.migrated.contains(&id) => {
                        tracing::warn!(ticket = id, "ticket id may already be migrated, kept");
                        caps[0].to_string()
                    }
                    None => {
                        tracing::warn!(ticket = id, "ticket not in this repository, kept");
                        caps[0].to_string()
                    }
                }
            })
            .into_owned()
    }
}

#[cfg(test)]
#[path = "fixme_tests.rs"]
mod tests;
