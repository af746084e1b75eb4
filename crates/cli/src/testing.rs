// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

//! Test infrastructure: a temporary migration directory with a config file
//! and a Trac database using the subset of Trac's schema that is read.
//!
//! ```rust,ignore
//! let ctx = TestContext::new();
//! ctx.add_ticket(1, "client", "See #2");
//! let db = ctx.trac_db();
//! ```

use std::path::PathBuf;

use rusqlite::{params, Connection};
use tempfile::TempDir;

use crate::config::{Project, CONFIG_FILE_NAME};
use crate::trac::TracDb;

/// Trac tables and columns read by [`TracDb`].
pub const TRAC_SCHEMA: &str = "
CREATE TABLE ticket (
    id integer PRIMARY KEY,
    type text, time integer, changetime integer, component text,
    severity text, priority text, owner text, reporter text, cc text,
    version text, milestone text, status text, resolution text,
    summary text, description text, keywords text
);
CREATE TABLE ticket_change (
    ticket integer, time integer, author text, field text,
    oldvalue text, newvalue text,
    UNIQUE (ticket, time, field)
);
CREATE TABLE ticket_custom (
    ticket integer, name text, value text,
    UNIQUE (ticket, name)
);
CREATE TABLE attachment (
    type text, id text, filename text, size integer, time integer,
    description text, author text, ipnr text,
    UNIQUE (type, id, filename)
);
";

pub const CONFIG: &str = r#"
owner = "example"
trac_ticket_prefix = "https://trac.example.com/ticket/"
fallback_repository = "server"
attachment_root = "https://files.example.com/attachments/"

[repository_mapping]
client = "client"

[user_mapping]
adi = "adiroiban"
"#;

/// 2012-01-01T00:00:00Z in Trac microseconds.
pub const EPOCH_2012: i64 = 1_325_376_000_000_000;

/// Temporary migration directory with config and Trac database.
pub struct TestContext {
    pub dir: TempDir,
    pub conn: Connection,
}

impl TestContext {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), CONFIG).unwrap();
        let conn = Connection::open(dir.path().join("trac.db")).unwrap();
        conn.execute_batch(TRAC_SCHEMA).unwrap();
        TestContext { dir, conn }
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join(CONFIG_FILE_NAME)
    }

    pub fn trac_path(&self) -> PathBuf {
        self.dir.path().join("trac.db")
    }

    pub fn project(&self) -> Project {
        Project::open(Some(&self.config_path())).unwrap()
    }

    pub fn trac_db(&self) -> TracDb {
        TracDb::open(&self.trac_path()).unwrap()
    }

    /// Adds an open defect owned by `adi`.
    pub fn add_ticket(&self, id: i64, component: &str, description: &str) {
        self.conn
            .execute(
                "INSERT INTO ticket (id, type, time, changetime, component, priority,
                     owner, reporter, milestone, status, resolution, summary,
                     description, keywords)
                 VALUES (?1, 'defect', ?2, ?3, ?4, 'High', 'adi', 'adi', '', 'new', '',
                     ?5, ?6, 'tls, windows')",
                params![
                    id,
                    EPOCH_2012 + id,
                    EPOCH_2012 + id + 1,
                    component,
                    format!("Ticket {id}"),
                    description
                ],
            )
            .unwrap();
    }

    pub fn close_ticket(&self, id: i64, resolution: &str) {
        self.conn
            .execute(
                "UPDATE ticket SET status = 'closed', resolution = ?2 WHERE id = ?1",
                params![id, resolution],
            )
            .unwrap();
    }

    /// Adds a comment numbered after the ticket's existing comments.
    pub fn add_comment(&self, id: i64, time: i64, author: &str, text: &str) {
        self.conn
            .execute(
                "INSERT INTO ticket_change (ticket, time, author, field, oldvalue, newvalue)
                 SELECT ?1, ?2, ?3, 'comment', COUNT(*) + 1, ?4 FROM ticket_change
                 WHERE ticket = ?1 AND field = 'comment'",
                params![id, time, author, text],
            )
            .unwrap();
    }

    pub fn add_change(&self, id: i64, time: i64, author: &str, field: &str, old: &str, new: &str) {
        self.conn
            .execute(
                "INSERT INTO ticket_change (ticket, time, author, field, oldvalue, newvalue)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![id, time, author, field, old, new],
            )
            .unwrap();
    }

    pub fn add_attachment(&self, id: i64, filename: &str) {
        self.conn
            .execute(
                "INSERT INTO attachment (type, id, filename, size, time, description, author)
                 VALUES ('ticket', ?1, ?2, 1024, ?3, '', 'adi')",
                params![id.to_string(), filename, EPOCH_2012],
            )
            .unwrap();
    }

    pub fn set_custom(&self, id: i64, name: &str, value: &str) {
        self.conn
            .execute(
                "INSERT INTO ticket_custom (ticket, name, value) VALUES (?1, ?2, ?3)",
                params![id, name, value],
            )
            .unwrap();
    }
}
