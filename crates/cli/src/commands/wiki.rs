// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use trac2gh_core::{PageOptions, PageTranslator};

use crate::config::Project;
use crate::error::{Error, Result};

pub fn run(config: Option<&Path>, paths: &[PathBuf], ext: &str) -> Result<()> {
    let options = page_options(config)?;
    run_impl(options, paths, ext, &mut std::io::stdout().lock())
}

/// Page options from the config, or defaults when none is found.
///
/// An explicit `--config` must exist.
fn page_options(config: Option<&Path>) -> Result<PageOptions> {
    match Project::open(config) {
        Ok(project) => Ok(PageOptions {
            ticket_url_prefix: Some(project.config.trac_ticket_prefix),
            wiki_base_url: project.config.wiki_base_url,
        }),
        Err(Error::NotConfigured(_)) if config.is_none() => {
            tracing::debug!("no configuration, converting with defaults");
            Ok(PageOptions::default())
        }
        Err(e) => Err(e),
    }
}

pub(crate) fn run_impl(
    options: PageOptions,
    paths: &[PathBuf],
    ext: &str,
    out: &mut impl Write,
) -> Result<()> {
    let translator = PageTranslator::new(options);
    let ext = ext.trim_start_matches('.');

    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            collect_pages(path, ext, &mut files)?;
        } else {
            files.push(path.clone());
        }
    }

    let mut changed = 0;
    for file in &files {
        if convert_file(&translator, file)? {
            changed += 1;
        }
    }
    writeln!(out, "Converted {changed} of {} pages", files.len())?;
    Ok(())
}

/// Pages under `dir` with extension `ext`, depth first in name order.
fn collect_pages(dir: &Path, ext: &str, files: &mut Vec<PathBuf>) -> Result<()> {
    let mut entries = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort();

    for path in entries {
        if path.is_dir() {
            if path.file_name().is_some_and(|name| name == ".git") {
                continue;
            }
            collect_pages(&path, ext, files)?;
        } else if path.extension().is_some_and(|e| e == ext) {
            files.push(path);
        }
    }
    Ok(())
}

/// Rewrites one page in place; returns whether its content changed.
fn convert_file(translator: &PageTranslator, path: &Path) -> Result<bool> {
    let Ok(text) = String::from_utf8(fs::read(path)?) else {
        tracing::warn!(path = %path.display(), "skipping page that is not UTF-8");
        return Ok(false);
    };

    let converted = translator.translate(&text);
    if converted == text {
        return Ok(false);
    }
    fs::write(path, converted)?;
    tracing::debug!(path = %path.display(), "page converted");
    Ok(true)
}

#[cfg(test)]
#[path = "wiki_tests.rs"]
mod tests;
