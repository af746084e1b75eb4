// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;
use std::path::Path;

use trac2gh_core::{confirm_number, Destination};

use crate::config::Project;
use crate::error::{Error, Result};
use crate::ledger;

use super::{check_plan, expected, recorded};

pub fn run(config: Option<&Path>, trac_id: u64, url: &str) -> Result<()> {
    let project = Project::open(config)?;
    run_impl(&project, trac_id, url, &mut std::io::stdout().lock())
}

/// Appends the created issue to the ledger, then checks it against the plan.
///
/// A mismatch is reported after the record is written: the issue exists on
/// GitHub whatever its number. Once a mismatch is in the ledger, further
/// records are refused until the plan is rebuilt.
pub(crate) fn run_impl(
    project: &Project,
    trac_id: u64,
    url: &str,
    out: &mut impl Write,
) -> Result<()> {
    let created = recorded(project)?;
    if created.contains(trac_id) {
        return Err(Error::AlreadyRecorded(trac_id));
    }
    let destination = Destination::parse(url.trim())?;
    let expected = expected(project)?;
    check_plan(&created, &expected)?;
    let planned = expected
        .into_iter()
        .find(|(id, _)| *id == trac_id)
        .map(|(_, url)| Destination::parse(&url))
        .transpose()?;

    ledger::append(
        &project.ledger_path(),
        &project.config.trac_ticket_prefix,
        trac_id,
        &destination.reference,
    )?;
    writeln!(out, "Recorded trac#{trac_id} -> {}", destination.reference)?;

    match planned {
        Some(planned) => confirm_number(trac_id, planned.number, destination.number)?,
        None => tracing::warn!(ticket = trac_id, "ticket was not planned, number not checked"),
    }
    Ok(())
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
