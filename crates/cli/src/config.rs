// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Migration configuration.
//!
//! Configuration is stored in `trac2gh.toml`, found in the working directory
//! or one of its parents. Ledger paths are relative to the file's directory.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub const CONFIG_FILE_NAME: &str = "trac2gh.toml";
const DEFAULT_LEDGER: &str = "tickets_created.tsv";
const DEFAULT_EXPECTED: &str = "tickets_expected.tsv";

/// Migration settings stored in `trac2gh.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// GitHub organization or user owning the destination repositories.
    pub owner: String,
    /// Trac ticket URL prefix, e.g. `https://trac.example.com/ticket/`.
    pub trac_ticket_prefix: String,
    /// Repository for tickets whose component has no mapping.
    pub fallback_repository: String,
    /// Trac component to destination repository.
    #[serde(default)]
    pub repository_mapping: BTreeMap<String, String>,
    /// Trac user name to GitHub login.
    #[serde(default)]
    pub user_mapping: BTreeMap<String, String>,
    /// Prefix for converted wiki link targets.
    #[serde(default)]
    pub wiki_base_url: String,
    /// Base URL where Trac attachment files are published.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment_root: Option<String>,
    #[serde(default = "default_ledger")]
    pub ledger: String,
    #[serde(default = "default_expected")]
    pub expected: String,
}

fn default_ledger() -> String {
    DEFAULT_LEDGER.to_string()
}

fn default_expected() -> String {
    DEFAULT_EXPECTED.to_string()
}

impl Config {
    /// Loads and validates a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::NotConfigured(path.display().to_string()))
            }
            Err(e) => return Err(e.into()),
        };
        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let required = [
            ("owner", &self.owner),
            ("trac_ticket_prefix", &self.trac_ticket_prefix),
            ("fallback_repository", &self.fallback_repository),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(Error::Config(format!("{field} cannot be empty")));
            }
        }
        Ok(())
    }

    /// Destination repository for a Trac component.
    pub fn repository_for(&self, component: Option<&str>) -> &str {
        component
            .and_then(|c| self.repository_mapping.get(c))
            .map_or(self.fallback_repository.as_str(), String::as_str)
    }

    /// URL prefix shared by every issue of `repository`.
    pub fn issues_prefix(&self, repository: &str) -> String {
        format!("https://github.com/{}/{}/issues/", self.owner, repository)
    }

    pub fn issue_url(&self, repository: &str, number: u64) -> String {
        format!("{}{}", self.issues_prefix(repository), number)
    }

    pub fn trac_url(&self, id: u64) -> String {
        format!("{}{}", self.trac_ticket_prefix, id)
    }

    /// GitHub login for a Trac user, when one is mapped.
    pub fn github_user(&self, trac_user: &str) -> Option<&str> {
        self.user_mapping.get(trac_user).map(String::as_str)
    }
}

/// Searches the current directory and its parents for `trac2gh.toml`.
pub fn find_config() -> Result<PathBuf> {
    let mut current = std::env::current_dir()?;
    loop {
        let candidate = current.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Ok(candidate);
        }
        if !current.pop() {
            return Err(Error::NotConfigured(CONFIG_FILE_NAME.to_string()));
        }
    }
}

/// A loaded config together with the directory its relative paths use.
#[derive(Debug, Clone)]
pub struct Project {
    pub config: Config,
    pub root: PathBuf,
}

impl Project {
    /// Opens the explicit config file, or the nearest `trac2gh.toml`.
    pub fn open(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => find_config()?,
        };
        let config = Config::load(&path)?;
        let root = path.parent().map(Path::to_path_buf).unwrap_or_default();
        tracing::debug!(config = %path.display(), "loaded configuration");
        Ok(Project { config, root })
    }

    pub fn ledger_path(&self) -> PathBuf {
        self.root.join(&self.config.ledger)
    }

    pub fn expected_path(&self) -> PathBuf {
        self.root.join(&self.config.expected)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
