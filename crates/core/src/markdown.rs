// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Mechanical Trac wiki to GitHub Markdown substitutions.
//!
//! Converters only ever see plain regions of a ticket body: verbatim
//! regions and ticket references are handled by [`crate::body`].

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::static_regex;

/// Stateless plain-text syntax conversion.
pub trait SyntaxConverter {
    fn convert(&self, text: &str) -> String;
}

/// Leaves plain text untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct Verbatim;

impl SyntaxConverter for Verbatim {
    fn convert(&self, text: &str) -> String {
        text.to_string()
    }
}

/// Trac wiki formatting to GitHub-flavored Markdown.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracMarkdown;

static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| static_regex(r"(?m)^(={1,6})[ \t]+(.+?)[ \t]+=+[ \t]*$"));
static BOLD_ITALIC_RE: LazyLock<Regex> = LazyLock::new(|| static_regex(r"'''''(.+?)'''''"));
static BOLD_RE: LazyLock<Regex> = LazyLock::new(|| static_regex(r"'''(.+?)'''"));
static ITALIC_RE: LazyLock<Regex> = LazyLock::new(|| static_regex(r"''(.+?)''"));
static LINE_BREAK_RE: LazyLock<Regex> = LazyLock::new(|| static_regex(r"(?i)\[\[br\]\]"));
static LABELED_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    static_regex(r"\[((?:https?|ftp)://[^\s\]]+|mailto:[^\s\]]+)[ \t]+([^\]\n]+)\]")
});
static BARE_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| static_regex(r"\[((?:https?|ftp)://[^\s\]]+)\]"));
static LIST_INDENT_RE: LazyLock<Regex> =
    LazyLock::new(|| static_regex(r"(?m)^ ((?:[*-]|[0-9]+\.)[ \t])"));

impl SyntaxConverter for TracMarkdown {
    fn convert(&self, text: &str) -> String {
        let text = text.replace("\r\n", "\n");
        let text = HEADING_RE.replace_all(&text, |caps: &Captures| {
            format!("{} {}", "#".repeat(caps[1].len()), &caps[2])
        });
        let text = BOLD_ITALIC_RE.replace_all(&text, "***${1}***");
        let text = BOLD_RE.replace_all(&text, "**${1}**");
        let text = ITALIC_RE.replace_all(&text, "*${1}*");
        let text = LINE_BREAK_RE.replace_all(&text, "<br>");
        let text = LABELED_LINK_RE.replace_all(&text, "[${2}](${1})");
        let text = BARE_LINK_RE.replace_all(&text, "<${1}>");
        let text = LIST_INDENT_RE.replace_all(&text, "${1}");
        convert_tables(&text)
    }
}

/// Rewrites `||a||b||` rows as pipe tables, adding the header separator
/// after the first row of each table.
fn convert_tables(text: &str) -> String {
    if !text.contains("||") {
        return text.to_string();
    }

    let mut lines = Vec::new();
    let mut in_table = false;
    for line in text.split('\n') {
        match table_cells(line) {
            Some(cells) => {
                lines.push(format!("| {} |", cells.join(" | ")));
                if !in_table {
                    lines.push(format!("|{}", "---|".repeat(cells.len())));
                }
                in_table = true;
            }
            None => {
                lines.push(line.to_string());
                in_table = false;
            }
        }
    }
    lines.join("\n")
}

fn table_cells(line: &str) -> Option<Vec<&str>> {
    let inner = line.trim().strip_prefix("||")?.strip_suffix("||")?;
    Some(
        inner
            .split("||")
            .map(|cell| cell.trim().trim_matches('=').trim())
            .collect(),
    )
}

#[cfg(test)]
#[path = "markdown_tests.rs"]
mod tests;
