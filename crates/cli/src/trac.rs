// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Read-only access to a Trac SQLite database.

use std::path::Path;

use rusqlite::{params, Connection, OpenFlags, OptionalExtension, Row};

use crate::error::{Error, Result};
use crate::ticket::{TicketAction, TicketRecord, TracAttachment, TracComment, TracTicket};

const TICKET_COLUMNS: &str = "id, type, time, changetime, component, priority, owner, \
     reporter, milestone, status, resolution, summary, description, keywords";

pub struct TracDb {
    conn: Connection,
}

impl TracDb {
    /// Opens an existing Trac database without write access.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::TracDbNotFound(path.display().to_string()));
        }
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(TracDb { conn })
    }

    /// All tickets ordered by id.
    pub fn tickets(&self) -> Result<Vec<TracTicket>> {
        let sql = format!("SELECT {TICKET_COLUMNS} FROM ticket ORDER BY id");
        let mut stmt = self.conn.prepare(&sql)?;
        let tickets = stmt
            .query_map([], ticket_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(tickets)
    }

    pub fn ticket(&self, id: u64) -> Result<TracTicket> {
        let sql = format!("SELECT {TICKET_COLUMNS} FROM ticket WHERE id = ?1");
        self.conn
            .query_row(&sql, params![to_sql_id(id)?], ticket_from_row)
            .optional()?
            .ok_or(Error::TicketNotFound(id))
    }

    /// Comments and status/owner changes, grouped by time in chronological
    /// order. Empty comment rows only join a group opened by another change.
    pub fn comments(&self, id: u64) -> Result<Vec<TracComment>> {
        let mut stmt = self.conn.prepare(
            "SELECT time, author, field, oldvalue, newvalue FROM ticket_change
             WHERE ticket = ?1 AND field IN ('comment', 'owner', 'status')
             ORDER BY time, field",
        )?;
        let rows = stmt
            .query_map(params![to_sql_id(id)?], |row| {
                Ok(ChangeRow {
                    time: row.get::<_, Option<i64>>(0)?.unwrap_or_default(),
                    author: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                    field: row.get(2)?,
                    old: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
                    new: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut comments: Vec<TracComment> = Vec::new();
        for row in rows {
            if row.field == "comment" && row.new.is_empty() {
                continue;
            }
            if !matches!(comments.last(), Some(last) if last.time == row.time) {
                comments.push(TracComment {
                    time: row.time,
                    author: row.author.clone(),
                    number: None,
                    text: String::new(),
                    actions: Vec::new(),
                });
            }
            let Some(comment) = comments.last_mut() else {
                continue;
            };
            match row.field.as_str() {
                "comment" if comment.text.is_empty() => {
                    comment.number = comment_number(&row.old);
                    comment.text = row.new;
                }
                "comment" => {
                    tracing::warn!(ticket = id, time = row.time, "second comment in one change, skipped");
                }
                "status" => comment.actions.push(TicketAction::Status(row.new)),
                _ => comment
                    .actions
                    .push(TicketAction::Owner(Some(row.new).filter(|o| !o.is_empty()))),
            }
        }
        Ok(comments)
    }

    pub fn attachments(&self, id: u64) -> Result<Vec<TracAttachment>> {
        let mut stmt = self.conn.prepare(
            "SELECT filename, size, time, description, author FROM attachment
             WHERE type = 'ticket' AND id = ?1
             ORDER BY time",
        )?;
        let attachments = stmt
            .query_map(params![id.to_string()], |row| {
                Ok(TracAttachment {
                    filename: row.get(0)?,
                    size: row.get(1)?,
                    time: row.get::<_, Option<i64>>(2)?.unwrap_or_default(),
                    description: row.get(3)?,
                    author: row.get(4)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(attachments)
    }

    /// Value of a `ticket_custom` field, if set and non-empty.
    pub fn custom_field(&self, id: u64, name: &str) -> Result<Option<String>> {
        let value: Option<Option<String>> = self
            .conn
            .query_row(
                "SELECT value FROM ticket_custom WHERE ticket = ?1 AND name = ?2",
                params![to_sql_id(id)?, name],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value.flatten().filter(|v| !v.trim().is_empty()))
    }

    /// Loads a ticket with its comments, attachments and branch.
    pub fn record(&self, id: u64) -> Result<TicketRecord> {
        Ok(TicketRecord {
            ticket: self.ticket(id)?,
            comments: self.comments(id)?,
            attachments: self.attachments(id)?,
            branch: self.custom_field(id, "branch")?,
        })
    }
}

fn to_sql_id(id: u64) -> Result<i64> {
    i64::try_from(id).map_err(|_| Error::TicketNotFound(id))
}

struct ChangeRow {
    time: i64,
    author: String,
    field: String,
    old: String,
    new: String,
}

/// Trac stores replies as `parent.number` in the comment's `oldvalue`.
fn comment_number(oldvalue: &str) -> Option<String> {
    oldvalue
        .rsplit('.')
        .next()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
}

fn ticket_from_row(row: &Row) -> rusqlite::Result<TracTicket> {
    let id: i64 = row.get(0)?;
    Ok(TracTicket {
        id: u64::try_from(id).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Integer, Box::new(e))
        })?,
        ticket_type: row.get(1)?,
        time: row.get::<_, Option<i64>>(2)?.unwrap_or_default(),
        changetime: row.get::<_, Option<i64>>(3)?.unwrap_or_default(),
        component: row.get(4)?,
        priority: row.get(5)?,
        owner: row.get(6)?,
        reporter: row.get(7)?,
        milestone: row.get(8)?,
        status: row.get(9)?,
        resolution: row.get(10)?,
        summary: row.get(11)?,
        description: row.get(12)?,
        keywords: row.get(13)?,
    })
}

#[cfg(test)]
#[path = "trac_tests.rs"]
mod tests;
