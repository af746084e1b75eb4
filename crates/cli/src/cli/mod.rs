// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;
use std::str::FromStr;

use crate::colors;
use crate::help;
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// Output format for commands supporting structured output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Highest issue number already taken in a repository, given as `repo=N`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObservedNumber {
    pub repository: String,
    pub number: u64,
}

impl FromStr for ObservedNumber {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (repository, number) = s
            .split_once('=')
            .ok_or_else(|| format!("expected <repo>=<number>, got '{s}'"))?;
        let repository = repository.trim();
        if repository.is_empty() {
            return Err("repository cannot be empty".to_string());
        }
        let number = number
            .trim()
            .parse()
            .map_err(|_| format!("invalid issue number '{}'", number.trim()))?;
        Ok(ObservedNumber {
            repository: repository.to_string(),
            number,
        })
    }
}

#[derive(Parser)]
#[command(name = "trac2gh")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(disable_version_flag = true)]
#[command(about = "Migrate Trac tickets and wiki pages to GitHub")]
#[command(
    long_about = "Migrate Trac tickets and wiki pages to GitHub.\n\n\
    Predicts the issue number every ticket will receive, renders import payloads \
    with cross references pointing at their future GitHub issues, and converts wiki pages."
)]
#[command(help_template = help::template())]
#[command(before_help = help::commands())]
#[command(after_help = help::quickstart())]
#[command(styles = help::styles())]
// Allow the unit type field pattern which is required for clap's ArgAction::Version/Help
#[allow(clippy::manual_non_exhaustive)]
pub struct Cli {
    /// Run as if trac2gh was started in <path>
    #[arg(short = 'C', long = "directory", global = true, value_name = "path")]
    pub directory: Option<String>,

    /// Use this config file instead of searching for trac2gh.toml
    #[arg(short = 'c', long = "config", global = true, value_name = "file")]
    pub config: Option<PathBuf>,

    /// Print version
    #[arg(short = 'v', short_alias = 'V', long = "version", action = clap::ArgAction::Version)]
    version: (),

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Predict submission order and expected GitHub numbers
    ///
    /// Tickets already in the ledger are skipped. The plan is written to the
    /// expected file so that 'render' and 'record' can follow it.
    #[command(after_help = colors::examples("\
Examples:
  trac2gh plan --db trac.db                         Plan using ledger numbers only
  trac2gh plan --db trac.db --observed server=120   Account for existing issues
  trac2gh plan --db trac.db --open-only             Leave closed tickets out
  trac2gh plan --db trac.db -o json                 Output the plan as JSON"))]
    Plan {
        /// Path to the Trac SQLite database
        #[arg(long, value_name = "file")]
        db: PathBuf,

        /// Highest existing issue number in a repository (repeatable)
        #[arg(long, value_name = "repo=N")]
        observed: Vec<ObservedNumber>,

        /// Only plan tickets that are not closed
        #[arg(long)]
        open_only: bool,

        /// Output format
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Render GitHub import payloads for tickets
    ///
    /// Without ids, renders every planned ticket that is not yet recorded,
    /// one JSON document per line in submission order.
    #[command(after_help = colors::examples("\
Examples:
  trac2gh render --db trac.db              Render all pending tickets
  trac2gh render --db trac.db 42 43        Render specific tickets
  trac2gh render --db trac.db 42 --pretty  Pretty-print one payload"))]
    Render {
        /// Path to the Trac SQLite database
        #[arg(long, value_name = "file")]
        db: PathBuf,

        /// Trac ticket ids
        ids: Vec<u64>,

        /// Pretty-print each payload
        #[arg(long)]
        pretty: bool,
    },

    /// Record a created issue in the ledger
    ///
    /// Fails when the created number differs from the planned one; the issue
    /// is recorded either way.
    #[command(
        arg_required_else_help = true,
        after_help = colors::examples("\
Examples:
  trac2gh record 42 https://github.com/org/server/issues/130")
    )]
    Record {
        /// Trac ticket id
        trac_id: u64,

        /// URL of the created GitHub issue
        url: String,
    },

    /// Rewrite FIXME markers in source code to GitHub issue numbers
    ///
    /// Markers look like 'FIXME:<trac id>:'. Only tickets recorded in the
    /// repository are rewritten, so run it once per tree after the migration.
    #[command(
        arg_required_else_help = true,
        after_help = colors::examples("\
Examples:
  trac2gh fixme src/                      Use the fallback repository
  trac2gh fixme -r client web/            Rewrite markers for the client repository
  trac2gh fixme --exclude build- .        Skip paths containing 'build-'")
    )]
    Fixme {
        /// Files or directories to rewrite
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Repository holding the code [default: fallback_repository]
        #[arg(long, short = 'r', value_name = "name")]
        repository: Option<String>,

        /// Skip paths containing this text (repeatable)
        #[arg(long, value_name = "text")]
        exclude: Vec<String>,
    },

    /// Convert Trac wiki pages to reStructuredText
    ///
    /// Directories are searched recursively for files with the given
    /// extension. Files are rewritten in place only when their content changes.
    #[command(
        arg_required_else_help = true,
        after_help = colors::examples("\
Examples:
  trac2gh wiki docs/                Convert every .rst page under docs/
  trac2gh wiki --ext txt pages/     Convert .txt pages
  trac2gh wiki WikiStart.rst        Convert a single page")
    )]
    Wiki {
        /// Files or directories to convert
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Extension of pages found in directories
        #[arg(long, default_value = "rst")]
        ext: String,
    },

    /// Generate shell completions
    #[command(
        arg_required_else_help = true,
        after_help = colors::examples("\
Examples:
  trac2gh completion bash > ~/.local/share/bash-completion/completions/trac2gh
  trac2gh completion zsh > ~/.zfunc/_trac2gh
  trac2gh completion fish > ~/.config/fish/completions/trac2gh.fish")
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[cfg(test)]
#[path = "../cli_tests/mod.rs"]
mod tests;
