// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod fixme;
pub mod plan;
pub mod record;
pub mod render;
pub mod wiki;

use trac2gh_core::{destination_number, IdMapping};

use crate::config::Project;
use crate::error::{Error, Result};
use crate::ledger;

/// Tickets already created on GitHub.
pub fn recorded(project: &Project) -> Result<IdMapping> {
    ledger::read_mapping(&project.ledger_path(), &project.config.trac_ticket_prefix)
}

/// Destinations predicted by the last `plan`, in submission order.
pub fn expected(project: &Project) -> Result<Vec<(u64, String)>> {
    ledger::read_entries(&project.expected_path(), &project.config.trac_ticket_prefix)
}

/// Fails when a created issue contradicts the expected file.
///
/// After a mismatch every later prediction is suspect, so nothing may be
/// rendered or recorded until `plan` rewrites the expected file.
pub fn check_plan(recorded: &IdMapping, expected: &[(u64, String)]) -> Result<()> {
    for (id, url) in expected {
        let Some(created) = recorded.get(*id) else {
            continue;
        };
        let Some(planned) = destination_number(url) else {
            continue;
        };
        if created.number != planned {
            return Err(Error::NumberMismatch {
                ticket: *id,
                expected: planned,
                actual: created.number,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
