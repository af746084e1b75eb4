// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! GitHub labels derived from Trac ticket fields.

use std::collections::BTreeSet;

use crate::ticket::TracTicket;

const DEFAULT_PRIORITY: &str = "normal";
const RELEASE_BLOCKER: &str = "release blocker";

/// Sorted, de-duplicated labels for a ticket.
///
/// - `priority-<priority>` (lowercase, `normal` when unset)
/// - the ticket type, with every `release blocker: ...` type collapsed
/// - each keyword, split on commas and whitespace
/// - the component
/// - the resolution of a closed ticket, otherwise its status
pub fn ticket_labels(ticket: &TracTicket) -> Vec<String> {
    let mut labels = BTreeSet::new();

    let priority = non_empty(&ticket.priority).unwrap_or(DEFAULT_PRIORITY);
    labels.insert(format!("priority-{}", priority.to_lowercase()));

    if let Some(kind) = non_empty(&ticket.ticket_type) {
        if kind.to_lowercase().starts_with(RELEASE_BLOCKER) {
            labels.insert("release-blocker".to_string());
        } else {
            labels.insert(kind.to_string());
        }
    }

    if let Some(keywords) = non_empty(&ticket.keywords) {
        labels.extend(keywords.replace(',', " ").split_whitespace().map(String::from));
    }

    if let Some(component) = non_empty(&ticket.component) {
        labels.insert(component.to_string());
    }

    let state = match non_empty(&ticket.resolution) {
        Some(resolution) if ticket.is_closed() => Some(resolution),
        _ => non_empty(&ticket.status),
    };
    if let Some(state) = state {
        labels.insert(state.to_string());
    }

    labels.into_iter().collect()
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
#[path = "labels_tests.rs"]
mod tests;
