// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// All possible errors that can occur in the trac2gh library.
///
/// Errors provide user-friendly messages with hints for common issues.
#[derive(Debug, Error)]
pub enum Error {
    #[error("no configuration found: {0}\n  hint: create trac2gh.toml in the migration directory or pass --config")]
    NotConfigured(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("trac database not found: {0}")]
    TracDbNotFound(String),

    #[error("ticket not found: #{0}")]
    TicketNotFound(u64),

    #[error("ticket #{0} is already recorded in the ledger\n  hint: each Trac ticket can only be migrated once")]
    AlreadyRecorded(u64),

    #[error("number mismatch for ticket #{ticket}: expected {expected}, created {actual}\n  hint: the issue was recorded, but every remaining prediction for this repository is invalid; reconcile manually and run 'trac2gh plan' again")]
    NumberMismatch {
        ticket: u64,
        expected: u64,
        actual: u64,
    },

    #[error("{path}:{line}: {reason}")]
    InvalidLedger {
        path: String,
        line: usize,
        reason: String,
    },

    #[error("invalid timestamp: {reason}")]
    InvalidTimestamp { reason: String },

    #[error("cannot translate ticket #{ticket}: {source}")]
    Translation {
        ticket: u64,
        #[source]
        source: trac2gh_core::Error,
    },

    #[error(transparent)]
    Core(trac2gh_core::Error),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for trac2gh operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<trac2gh_core::Error> for Error {
    fn from(e: trac2gh_core::Error) -> Self {
        match e {
            trac2gh_core::Error::DuplicateMapping(id) => Error::AlreadyRecorded(id),
            trac2gh_core::Error::NumberMismatch {
                ticket,
                expected,
                actual,
            } => Error::NumberMismatch {
                ticket,
                expected,
                actual,
            },
            other => Error::Core(other),
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
