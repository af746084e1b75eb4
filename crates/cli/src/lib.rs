// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! trac2gh - migrate Trac tickets and wiki pages to GitHub.
//!
//! This crate provides the `trac2gh` CLI. It reads a Trac SQLite database,
//! predicts the GitHub number every ticket will receive, renders issue-import
//! payloads and keeps the migration ledgers.
//!
//! # Main Components
//!
//! - [`TracDb`] - read-only access to Trac tickets, comments and attachments
//! - [`Config`] - migration settings from `trac2gh.toml`
//! - [`Renderer`](render::Renderer) - GitHub import payloads for one ticket
//! - [`ledger`] - the created and expected ticket ledgers
//! - [`Error`] - error types for all operations
//!
//! # Migration
//!
//! ```text
//! trac2gh plan --db trac.db --observed server=120
//! trac2gh render --db trac.db > payloads.jsonl
//! trac2gh record 42 https://github.com/org/server/issues/130
//! ```

mod cli;
pub mod colors;
mod commands;
mod env;
pub mod help;
pub mod logging;

pub mod config;
pub mod error;
pub mod labels;
pub mod ledger;
pub mod render;
pub mod ticket;
pub mod trac;

#[cfg(test)]
mod testing;

pub use cli::{Cli, Command, ObservedNumber, OutputFormat};
pub use config::{find_config, Config, Project};
pub use error::{Error, Result};
pub use trac::TracDb;

use clap::CommandFactory;
use clap_complete::generate;

/// Execute a parsed command line. This is the main entry point for library
/// users and provides a testable way to run commands without process execution.
pub fn run(cli: Cli) -> Result<()> {
    if let Some(dir) = &cli.directory {
        std::env::set_current_dir(dir)?;
    }
    let config = cli.config.as_deref();

    match cli.command {
        Command::Plan {
            db,
            observed,
            open_only,
            output,
        } => commands::plan::run(config, &db, &observed, open_only, output),
        Command::Render { db, ids, pretty } => commands::render::run(config, &db, &ids, pretty),
        Command::Record { trac_id, url } => commands::record::run(config, trac_id, &url),
        Command::Fixme {
            paths,
            repository,
            exclude,
        } => commands::fixme::run(config, &paths, repository.as_deref(), &exclude),
        Command::Wiki { paths, ext } => commands::wiki::run(config, &paths, &ext),
        Command::Completion { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "trac2gh", &mut std::io::stdout());
            Ok(())
        }
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
