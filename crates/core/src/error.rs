// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for trac2gh-core operations.

use thiserror::Error;

/// All possible errors that can occur in trac2gh-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("unclosed verbatim region: '{marker}' at byte {offset} has no matching close\n  hint: fix the source markup instead of guessing where the block ends")]
    UnclosedVerbatim { marker: &'static str, offset: usize },

    #[error("duplicate ticket #{0} in planning batch")]
    DuplicateTicket(u64),

    #[error("ticket #{0} is already mapped")]
    DuplicateMapping(u64),

    #[error("invalid destination reference '{0}'\n  hint: the last path segment must be the destination issue number")]
    InvalidReference(String),

    #[error("no cursor for repository '{0}'\n  hint: set the next number before planning")]
    UnknownRepository(String),

    #[error("cursor for repository '{repository}' is already set to {current}")]
    CursorAlreadySet { repository: String, current: u64 },

    #[error("repository '{0}' was already planned in this run")]
    RepositoryAlreadyPlanned(String),

    #[error("number mismatch for ticket #{ticket}: expected {expected}, created {actual}\n  hint: remaining predictions are invalid; reconcile manually before resuming")]
    NumberMismatch {
        ticket: u64,
        expected: u64,
        actual: u64,
    },
}

/// A specialized Result type for trac2gh-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
