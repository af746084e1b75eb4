// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Rows read from a Trac database.
//!
//! Timestamps are Trac's native microseconds since the Unix epoch.

use serde::Serialize;

/// One row of Trac's `ticket` table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TracTicket {
    pub id: u64,
    pub ticket_type: Option<String>,
    pub time: i64,
    pub changetime: i64,
    pub component: Option<String>,
    pub priority: Option<String>,
    pub owner: Option<String>,
    pub reporter: Option<String>,
    pub milestone: Option<String>,
    pub status: Option<String>,
    pub resolution: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub keywords: Option<String>,
}

impl TracTicket {
    pub fn is_closed(&self) -> bool {
        self.status.as_deref() == Some("closed")
    }
}

impl trac2gh_core::Ticket for TracTicket {
    fn ticket_id(&self) -> u64 {
        self.id
    }
}

/// The `ticket_change` rows sharing one timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct TracComment {
    pub time: i64,
    pub author: String,
    /// Trac's comment number, used for the `note_N` anchor.
    pub number: Option<String>,
    /// Empty when the change carried no comment text.
    pub text: String,
    pub actions: Vec<TicketAction>,
}

/// A field change shown in the comment header.
#[derive(Debug, Clone, PartialEq)]
pub enum TicketAction {
    Status(String),
    /// `None` when the owner was cleared.
    Owner(Option<String>),
}

/// A file attached to a ticket.
#[derive(Debug, Clone, PartialEq)]
pub struct TracAttachment {
    pub filename: String,
    pub size: Option<i64>,
    pub time: i64,
    pub description: Option<String>,
    pub author: Option<String>,
}

/// Everything migrated for one ticket.
#[derive(Debug, Clone, Default)]
pub struct TicketRecord {
    pub ticket: TracTicket,
    pub comments: Vec<TracComment>,
    pub attachments: Vec<TracAttachment>,
    /// The `branch` custom field.
    pub branch: Option<String>,
}
