// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Allow unused items: test helpers are shared across multiple test binaries,
// and not every test file uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};

pub use predicates::prelude::*;
pub use tempfile::TempDir;

pub fn trac2gh() -> Command {
    cargo_bin_cmd!("trac2gh")
}

pub const CONFIG: &str = r#"
owner = "example"
trac_ticket_prefix = "https://trac.example.com/ticket/"
fallback_repository = "server"
wiki_base_url = "https://github.com/example/server/wiki/"

[repository_mapping]
client = "client"

[user_mapping]
adi = "adiroiban"
"#;

const SCHEMA: &str = "
CREATE TABLE ticket (
    id integer PRIMARY KEY,
    type text, time integer, changetime integer, component text,
    severity text, priority text, owner text, reporter text, cc text,
    version text, milestone text, status text, resolution text,
    summary text, description text, keywords text
);
CREATE TABLE ticket_change (
    ticket integer, time integer, author text, field text,
    oldvalue text, newvalue text
);
CREATE TABLE ticket_custom (ticket integer, name text, value text);
CREATE TABLE attachment (
    type text, id text, filename text, size integer, time integer,
    description text, author text, ipnr text
);
";

/// 2012-01-01T00:00:00Z in Trac microseconds.
pub const EPOCH_2012: i64 = 1_325_376_000_000_000;

/// A migration directory holding `trac2gh.toml` and `trac.db`.
pub struct Migration {
    pub temp: TempDir,
    conn: Connection,
}

impl Migration {
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("trac2gh.toml"), CONFIG).unwrap();
        let conn = Connection::open(temp.path().join("trac.db")).unwrap();
        conn.execute_batch(SCHEMA).unwrap();
        Migration { temp, conn }
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.temp.path().join(name)
    }

    pub fn read(&self, name: &str) -> String {
        std::fs::read_to_string(self.file(name)).unwrap()
    }

    pub fn ticket(&self, id: i64, component: &str, description: &str) -> &Self {
        self.conn
            .execute(
                "INSERT INTO ticket (id, type, time, changetime, component, priority,
                     owner, reporter, status, summary, description, keywords)
                 VALUES (?1, 'enhancement', ?2, ?2, ?3, 'Normal', 'adi', 'adi', 'new',
                     ?4, ?5, '')",
                params![
                    id,
                    EPOCH_2012 + id,
                    component,
                    format!("Ticket {id}"),
                    description
                ],
            )
            .unwrap();
        self
    }

    /// Runs trac2gh inside the migration directory.
    pub fn cmd(&self) -> Command {
        let mut cmd = trac2gh();
        cmd.current_dir(self.temp.path());
        cmd
    }
}
