// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use trac2gh_core::{next_number_from, NumberPredictor};

use crate::cli::{ObservedNumber, OutputFormat};
use crate::config::Project;
use crate::error::Result;
use crate::ledger;
use crate::ticket::TracTicket;
use crate::trac::TracDb;

use super::recorded;

#[derive(Debug, Serialize)]
struct PlannedRow {
    trac_id: u64,
    repository: String,
    expected_number: u64,
    expected_url: String,
    matches: bool,
}

#[derive(Debug, Serialize)]
struct PlanOutput {
    tickets: Vec<PlannedRow>,
    matched: usize,
    total: usize,
}

pub fn run(
    config: Option<&Path>,
    db: &Path,
    observed: &[ObservedNumber],
    open_only: bool,
    output: OutputFormat,
) -> Result<()> {
    let project = Project::open(config)?;
    let trac = TracDb::open(db)?;
    run_impl(
        &project,
        &trac,
        observed,
        open_only,
        output,
        &mut std::io::stdout().lock(),
    )
}

/// Internal implementation that accepts the database and writer for testing.
pub(crate) fn run_impl(
    project: &Project,
    trac: &TracDb,
    observed: &[ObservedNumber],
    open_only: bool,
    output: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    let config = &project.config;
    let recorded = recorded(project)?;

    let mut batches: BTreeMap<String, Vec<TracTicket>> = BTreeMap::new();
    for ticket in trac.tickets()? {
        if recorded.contains(ticket.id) || (open_only && ticket.is_closed()) {
            continue;
        }
        let repository = config.repository_for(ticket.component.as_deref());
        batches
            .entry(repository.to_string())
            .or_default()
            .push(ticket);
    }

    let mut predictor = NumberPredictor::new();
    for repository in batches.keys() {
        let observed_max = observed
            .iter()
            .filter(|o| &o.repository == repository)
            .map(|o| o.number)
            .max();
        if observed_max.is_none() {
            tracing::warn!(
                repository = repository.as_str(),
                "no observed issue number, assuming the ledger holds every issue"
            );
        }
        let migrated = recorded.max_number_with_prefix(&config.issues_prefix(repository));
        predictor.set_next_number(repository, next_number_from(observed_max.unwrap_or(0), [migrated]))?;
    }

    let plan = predictor.plan_all(batches)?;
    let matched = plan.matched_count();
    let rows: Vec<PlannedRow> = plan
        .iter()
        .map(|entry| PlannedRow {
            trac_id: entry.ticket.id,
            expected_url: config.issue_url(&entry.repository, entry.expected_number),
            repository: entry.repository.clone(),
            expected_number: entry.expected_number,
            matches: entry.is_match(),
        })
        .collect();

    let expected_path = project.expected_path();
    let file_rows: Vec<(u64, String)> = rows
        .iter()
        .map(|row| (row.trac_id, row.expected_url.clone()))
        .collect();
    ledger::write_expected(&expected_path, &config.trac_ticket_prefix, &file_rows)?;

    match output {
        OutputFormat::Text => {
            for row in &rows {
                writeln!(
                    out,
                    "trac#{} -> {}#{}",
                    row.trac_id, row.repository, row.expected_number
                )?;
            }
            writeln!(
                out,
                "Expected GitHub numbers to match Trac ID: {} out of {}",
                matched,
                rows.len()
            )?;
            writeln!(out, "Wrote {}", expected_path.display())?;
        }
        OutputFormat::Json => {
            let total = rows.len();
            let output = PlanOutput {
                tickets: rows,
                matched,
                total,
            };
            writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "plan_tests.rs"]
mod tests;
