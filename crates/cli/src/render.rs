// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! GitHub issue-import payloads for Trac tickets.
//!
//! The issue body starts with a header table linking back to Trac, followed
//! by the translated description, the attachment list and a collapsed block
//! of searchable metadata.

use std::fmt::Write as _;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sha1::{Digest, Sha1};
use trac2gh_core::{BodyTranslator, IdMapping};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::labels::ticket_labels;
use crate::ticket::{TicketAction, TicketRecord, TracComment, TracTicket};

/// Issue part of an import payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IssuePayload {
    pub title: String,
    pub body: String,
    pub created_at: String,
    pub updated_at: String,
    pub closed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<String>,
    pub labels: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentPayload {
    pub created_at: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportPayload {
    pub issue: IssuePayload,
    pub comments: Vec<CommentPayload>,
}

pub struct Renderer<'a> {
    config: &'a Config,
    mapping: &'a IdMapping,
    translator: BodyTranslator,
}

impl<'a> Renderer<'a> {
    pub fn new(config: &'a Config, mapping: &'a IdMapping) -> Self {
        let translator =
            BodyTranslator::default().with_ticket_url_prefix(config.trac_ticket_prefix.as_str());
        Renderer {
            config,
            mapping,
            translator,
        }
    }

    pub fn payload(&self, record: &TicketRecord) -> Result<ImportPayload> {
        let ticket = &record.ticket;
        let comments = record
            .comments
            .iter()
            .map(|c| self.comment(ticket.id, c))
            .collect::<Result<Vec<_>>>()?;
        Ok(ImportPayload {
            issue: self.issue(record)?,
            comments,
        })
    }

    pub fn issue(&self, record: &TicketRecord) -> Result<IssuePayload> {
        let ticket = &record.ticket;
        let updated_at = isotime(ticket.changetime)?;
        Ok(IssuePayload {
            title: ticket.summary.clone().unwrap_or_default(),
            body: self.issue_body(record)?,
            created_at: isotime(ticket.time)?,
            closed_at: ticket.is_closed().then(|| updated_at.clone()),
            updated_at,
            closed: ticket.is_closed(),
            labels: ticket_labels(ticket),
            assignee: ticket
                .owner
                .as_deref()
                .and_then(|owner| self.config.github_user(owner))
                .map(String::from),
        })
    }

    pub fn issue_body(&self, record: &TicketRecord) -> Result<String> {
        let ticket = &record.ticket;
        let reporter = ticket.reporter.as_deref().unwrap_or_default();
        let mut body = String::new();

        let _ = writeln!(body, "|{}|{} reported|", self.avatar(reporter), self.user(reporter));
        let _ = writeln!(body, "|-|-|");
        let _ = writeln!(
            body,
            "|Trac ID|[trac#{id}]({url})|",
            id = ticket.id,
            url = self.config.trac_url(ticket.id)
        );
        let _ = writeln!(body, "|Type|{}|", ticket.ticket_type.as_deref().unwrap_or_default());
        let _ = writeln!(body, "|Created|{}|", showtime(ticket.time)?);
        if let Some(branch) = &record.branch {
            let _ = writeln!(body, "|Branch|{branch}|");
        }
        body.push('\n');

        let description = ticket.description.as_deref().unwrap_or_default();
        body.push_str(&self.translate(ticket.id, description)?);
        body.push_str("\n\n");

        if let Some(root) = &self.config.attachment_root {
            if !record.attachments.is_empty() {
                body.push_str("Attachments:\n\n");
                for attachment in &record.attachments {
                    let _ = writeln!(
                        body,
                        "* [{name}]({url}) ({size} bytes; added by {author} on {time})",
                        name = attachment.filename,
                        url = attachment_url(root, ticket.id, &attachment.filename),
                        size = attachment.size.unwrap_or_default(),
                        author = attachment.author.as_deref().unwrap_or_default(),
                        time = showtime(attachment.time)?,
                    );
                }
                body.push('\n');
            }
        }

        body.push_str(&metadata(ticket));
        Ok(body)
    }

    /// A header row with avatar, anchor and actions, then the translated text.
    pub fn comment(&self, ticket: u64, comment: &TracComment) -> Result<CommentPayload> {
        let who = self.user(&comment.author);
        let actions = if comment.actions.is_empty() {
            format!("{who} commented")
        } else {
            comment
                .actions
                .iter()
                .map(|action| self.action(&who, action))
                .collect::<Vec<_>>()
                .join("<br>")
        };
        let anchor = comment
            .number
            .as_deref()
            .map(|n| format!("<a name=\"note_{n}\"></a>"))
            .unwrap_or_default();

        let mut body = format!("|{}{anchor}|{actions}|\n|-|-|\n", self.avatar(&comment.author));
        if !comment.text.is_empty() {
            body.push('\n');
            body.push_str(&self.translate(ticket, &comment.text)?);
        }
        Ok(CommentPayload {
            created_at: isotime(comment.time)?,
            body,
        })
    }

    fn action(&self, who: &str, action: &TicketAction) -> String {
        match action {
            TicketAction::Status(status) => format!("{who} set status to `{status}`"),
            TicketAction::Owner(Some(owner)) => format!("{who} set owner to {}", self.user(owner)),
            TicketAction::Owner(None) => format!("{who} removed owner"),
        }
    }

    fn translate(&self, ticket: u64, text: &str) -> Result<String> {
        self.translator
            .translate(text, self.mapping)
            .map_err(|source| Error::Translation { ticket, source })
    }

    fn user(&self, trac_user: &str) -> String {
        match self.config.github_user(trac_user) {
            Some(login) => format!("@{login}"),
            None => trac_user.to_string(),
        }
    }

    fn avatar(&self, trac_user: &str) -> String {
        match self.config.github_user(trac_user) {
            Some(login) => format!(
                "<img src=\"https://avatars.githubusercontent.com/{login}?s=50\" width=\"50\" height=\"50\">"
            ),
            None => String::new(),
        }
    }
}

/// Collapsed block repeating ticket fields as searchable tokens.
fn metadata(ticket: &TracTicket) -> String {
    let fields = [
        ("reporter", &ticket.reporter),
        ("owner", &ticket.owner),
        ("component", &ticket.component),
        ("priority", &ticket.priority),
        ("milestone", &ticket.milestone),
        ("status", &ticket.status),
        ("resolution", &ticket.resolution),
        ("keywords", &ticket.keywords),
    ];

    let mut block = String::from("<details><summary>Searchable metadata</summary>\n\n```\n");
    let _ = writeln!(block, "trac-id__{}", ticket.id);
    for (name, value) in fields {
        if let Some(value) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
            let _ = writeln!(block, "{name}__{}", value.replace(char::is_whitespace, "_"));
        }
    }
    block.push_str("```\n</details>\n");
    block
}

fn timestamp(usec: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_micros(usec).ok_or_else(|| Error::InvalidTimestamp {
        reason: format!("{usec} is out of range"),
    })
}

/// ISO 8601 form used by the import API.
pub fn isotime(usec: i64) -> Result<String> {
    Ok(timestamp(usec)?.format("%Y-%m-%dT%H:%M:%SZ").to_string())
}

/// Human readable form used in issue bodies.
pub fn showtime(usec: i64) -> Result<String> {
    Ok(timestamp(usec)?.format("%Y-%m-%d %H:%M:%SZ").to_string())
}

fn sha1_hex(value: &str) -> String {
    hex::encode(Sha1::digest(value.as_bytes()))
}

/// Published location of a Trac attachment, following Trac's on-disk layout
/// `<sha1(id)[..3]>/<sha1(id)>/<sha1(filename)><.ext>`.
pub fn attachment_url(root: &str, ticket: u64, filename: &str) -> String {
    let parent = sha1_hex(&ticket.to_string());
    let extension = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default();
    format!(
        "{root}{}/{parent}/{}{extension}",
        &parent[..3],
        sha1_hex(filename)
    )
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod tests;
