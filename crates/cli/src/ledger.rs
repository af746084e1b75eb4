// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tab-separated migration ledgers.
//!
//! Record lines are `<trac ticket url>\t<destination url>`. Lines that do not
//! start with the Trac ticket prefix, such as headers, are ignored. The
//! created-tickets ledger is append-only; the expected-numbers file is
//! rewritten by each `plan`.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use fs2::FileExt;
use trac2gh_core::IdMapping;

use crate::error::{Error, Result};

pub const EXPECTED_HEADER: &str = "Trac link\tExpected GitHub link";

/// Parses one ledger line into `(trac id, destination url)`.
///
/// Returns `Ok(None)` for lines that are not records.
pub fn parse_line(line: &str, prefix: &str) -> std::result::Result<Option<(u64, String)>, String> {
    let Some(rest) = line.strip_prefix(prefix) else {
        return Ok(None);
    };
    let (id, url) = rest
        .split_once('\t')
        .ok_or_else(|| "missing tab separator".to_string())?;
    let id = id
        .trim()
        .parse::<u64>()
        .map_err(|_| format!("invalid ticket id '{}'", id.trim()))?;
    let url = url.trim();
    if url.is_empty() {
        return Err("missing destination url".to_string());
    }
    Ok(Some((id, url.to_string())))
}

/// Reads all records in file order.
///
/// Returns an empty vec if the file doesn't exist.
pub fn read_entries(path: &Path, prefix: &str) -> Result<Vec<(u64, String)>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let reader = BufReader::new(File::open(path)?);
    let mut entries = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        match parse_line(&line, prefix) {
            Ok(Some(entry)) => entries.push(entry),
            Ok(None) => {}
            Err(reason) => {
                return Err(Error::InvalidLedger {
                    path: path.display().to_string(),
                    line: index + 1,
                    reason,
                })
            }
        }
    }
    Ok(entries)
}

/// Reads a ledger into an [`IdMapping`]; a ticket recorded twice is an error.
pub fn read_mapping(path: &Path, prefix: &str) -> Result<IdMapping> {
    let mut mapping = IdMapping::new();
    for (id, url) in read_entries(path, prefix)? {
        mapping.insert(id, &url)?;
    }
    Ok(mapping)
}

/// Appends one record under an exclusive lock, with fsync for durability.
pub fn append(path: &Path, prefix: &str, id: u64, url: &str) -> Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.lock_exclusive()?;

    let written = writeln!(file, "{prefix}{id}\t{url}").and_then(|()| file.sync_all());
    let unlocked = FileExt::unlock(&file);
    written?;
    unlocked?;

    tracing::debug!(ticket = id, url, ledger = %path.display(), "ledger record appended");
    Ok(())
}

/// Rewrites the expected-numbers file with a header and one record per row.
pub fn write_expected(path: &Path, prefix: &str, rows: &[(u64, String)]) -> Result<()> {
    let mut file = File::create(path)?;

    writeln!(file, "{EXPECTED_HEADER}")?;
    for (id, url) in rows {
        writeln!(file, "{prefix}{id}\t{url}")?;
    }
    file.sync_all()?;

    Ok(())
}

#[cfg(test)]
#[path = "ledger_tests.rs"]
mod tests;
