// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use trac2gh_core::FixmeRewriter;

use crate::config::Project;
use crate::error::Result;

use super::recorded;

/// Directories never searched.
const SKIPPED_DIRS: &[&str] = &[".git", "node_modules"];
/// Generated files never rewritten.
const SKIPPED_EXTENSIONS: &[&str] = &["pyc"];

pub fn run(
    config: Option<&Path>,
    paths: &[PathBuf],
    repository: Option<&str>,
    exclude: &[String],
) -> Result<()> {
    let project = Project::open(config)?;
    run_impl(&project, paths, repository, exclude, &mut std::io::stdout().lock())
}

/// Rewrites markers using created issues only; planned numbers are not final.
pub(crate) fn run_impl(
    project: &Project,
    paths: &[PathBuf],
    repository: Option<&str>,
    exclude: &[String],
    out: &mut impl Write,
) -> Result<()> {
    let repository = repository.unwrap_or(&project.config.fallback_repository);
    let rewriter = FixmeRewriter::new(
        &recorded(project)?,
        &project.config.issues_prefix(repository),
    );
    if rewriter.is_empty() {
        tracing::warn!(repository, "no recorded issues in this repository");
    }

    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            collect_sources(path, exclude, &mut files)?;
        } else {
            files.push(path.clone());
        }
    }

    let mut changed = 0;
    for file in &files {
        if rewrite_file(&rewriter, file)? {
            changed += 1;
        }
    }
    writeln!(out, "Updated {changed} of {} files", files.len())?;
    Ok(())
}

/// Files under `dir`, depth first in name order.
fn collect_sources(dir: &Path, exclude: &[String], files: &mut Vec<PathBuf>) -> Result<()> {
    let mut entries = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort();

    for path in entries {
        if is_excluded(&path, exclude) {
            continue;
        }
        if path.is_dir() {
            if path
                .file_name()
                .is_some_and(|name| SKIPPED_DIRS.iter().any(|skip| name == *skip))
            {
                continue;
            }
            collect_sources(&path, exclude, files)?;
        } else if !path
            .extension()
            .is_some_and(|ext| SKIPPED_EXTENSIONS.iter().any(|skip| ext == *skip))
        {
            files.push(path);
        }
    }
    Ok(())
}

fn is_excluded(path: &Path, exclude: &[String]) -> bool {
    let text = path.to_string_lossy();
    exclude.iter().any(|pattern| text.contains(pattern.as_str()))
}

/// Rewrites one file in place; returns whether its content changed.
fn rewrite_file(rewriter: &FixmeRewriter, path: &Path) -> Result<bool> {
    let Ok(text) = String::from_utf8(fs::read(path)?) else {
        tracing::debug!(path = %path.display(), "skipping file that is not UTF-8");
        return Ok(false);
    };

    let rewritten = rewriter.rewrite(&text);
    if rewritten == text {
        return Ok(false);
    }
    fs::write(path, rewritten)?;
    tracing::debug!(path = %path.display(), "markers rewritten");
    Ok(true)
}

#[cfg(test)]
#[path = "fixme_tests.rs"]
mod tests;
