// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;
use std::path::Path;

use trac2gh_core::IdMapping;

use crate::config::Project;
use crate::error::Result;
use crate::render::Renderer;
use crate::trac::TracDb;

use super::{check_plan, expected, recorded};

pub fn run(config: Option<&Path>, db: &Path, ids: &[u64], pretty: bool) -> Result<()> {
    let project = Project::open(config)?;
    let trac = TracDb::open(db)?;
    run_impl(&project, &trac, ids, pretty, &mut std::io::stdout().lock())
}

/// Internal implementation that accepts the database and writer for testing.
///
/// References resolve to created issues first, then to planned ones.
pub(crate) fn run_impl(
    project: &Project,
    trac: &TracDb,
    ids: &[u64],
    pretty: bool,
    out: &mut impl Write,
) -> Result<()> {
    let mut mapping = recorded(project)?;
    let planned = expected(project)?;
    check_plan(&mapping, &planned)?;

    let ids: Vec<u64> = if ids.is_empty() {
        planned
            .iter()
            .map(|(id, _)| *id)
            .filter(|id| !mapping.contains(*id))
            .collect()
    } else {
        ids.to_vec()
    };

    let mut predicted = IdMapping::new();
    for (id, url) in &planned {
        predicted.insert(*id, url)?;
    }
    mapping.merge_missing(&predicted);

    if ids.is_empty() {
        tracing::info!("nothing to render");
        return Ok(());
    }

    let renderer = Renderer::new(&project.config, &mapping);
    for id in ids {
        let payload = renderer.payload(&trac.record(id)?)?;
        let json = if pretty {
            serde_json::to_string_pretty(&payload)?
        } else {
            serde_json::to_string(&payload)?
        };
        writeln!(out, "{json}")?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod tests;
