// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Ticket description and comment translation.
//!
//! A body is scanned as a sequence of regions:
//! - plain text, where ticket references are rewritten and the
//!   [`SyntaxConverter`] runs
//! - inline verbatim (`` `x` ``), copied byte for byte
//! - fenced verbatim (`{{{ x }}}`), rendered as a code block or, for raw
//!   format processors, passed through untouched

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::error::{Error, Result};
use crate::mapping::IdMapping;
use crate::markdown::{SyntaxConverter, TracMarkdown};
use crate::static_regex;

const INLINE_MARKER: &str = "`";
const FENCE_OPEN: &str = "{{{";
const FENCE_CLOSE: &str = "}}}";

/// Processors whose content is already valid destination markup.
const RAW_FORMATS: &[&str] = &["rst", "html", "markdown", "md"];

static TICKET_REF_RE: LazyLock<Regex> = LazyLock::new(|| static_regex(r"#([0-9]+)\b"));

// Private use code points delimiting the index of a verbatim region. They
// survive every converter rule untouched.
const PLACEHOLDER_OPEN: char = '\u{E000}';
const PLACEHOLDER_CLOSE: char = '\u{E001}';
static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| static_regex("\u{E000}([0-9]+)\u{E001}"));

/// Translates ticket bodies using a configurable syntax converter.
#[derive(Debug, Clone)]
pub struct BodyTranslator<C = TracMarkdown> {
    ticket_url_prefix: Option<String>,
    converter: C,
}

impl Default for BodyTranslator<TracMarkdown> {
    fn default() -> Self {
        Self::new(TracMarkdown)
    }
}

impl<C: SyntaxConverter> BodyTranslator<C> {
    pub fn new(converter: C) -> Self {
        BodyTranslator {
            ticket_url_prefix: None,
            converter,
        }
    }

    /// Full ticket URLs starting with `prefix` are treated as `#N` references.
    pub fn with_ticket_url_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        self.ticket_url_prefix = (!prefix.is_empty()).then_some(prefix);
        self
    }

    /// Translates one description or comment.
    ///
    /// Verbatim regions are swapped for placeholders so that the plain text
    /// is converted in one pass with its real line structure, then restored.
    /// Unresolved references become `trac#N` and are logged; an opening
    /// verbatim marker without a close fails the whole call.
    pub fn translate(&self, text: &str, mapping: &IdMapping) -> Result<String> {
        let mut plain = String::with_capacity(text.len());
        let mut verbatim = Vec::new();
        let mut rest = text;
        let mut offset = 0;

        while let Some(marker) = next_marker(rest) {
            let (start, end, rendered) = match marker {
                Marker::Inline(start) => {
                    let body = &rest[start + INLINE_MARKER.len()..];
                    let close = body.find(INLINE_MARKER).ok_or(Error::UnclosedVerbatim {
                        marker: INLINE_MARKER,
                        offset: offset + start,
                    })?;
                    let end = start + INLINE_MARKER.len() + close + INLINE_MARKER.len();
                    (start, end, rest[start..end].to_string())
                }
                Marker::Fenced(start) => {
                    let body = &rest[start + FENCE_OPEN.len()..];
                    let close = body.find(FENCE_CLOSE).ok_or(Error::UnclosedVerbatim {
                        marker: FENCE_OPEN,
                        offset: offset + start,
                    })?;
                    let end = start + FENCE_OPEN.len() + close + FENCE_CLOSE.len();
                    (start, end, render_fenced(&body[..close]))
                }
            };
            plain.push_str(&rest[..start]);
            push_placeholder(&mut plain, verbatim.len());
            verbatim.push(rendered);
            offset += end;
            rest = &rest[end..];
        }
        plain.push_str(rest);

        let converted = self.plain(&plain, mapping);
        Ok(restore_placeholders(&converted, &verbatim))
    }

    fn plain(&self, text: &str, mapping: &IdMapping) -> String {
        if text.is_empty() {
            return String::new();
        }
        let text = match &self.ticket_url_prefix {
            Some(prefix) => Cow::Owned(text.replace(prefix.as_str(), "#")),
            None => Cow::Borrowed(text),
        };
        let linked = rewrite_ticket_refs(&text, mapping);
        self.converter.convert(&linked)
    }
}

/// Translates a body with the default Trac to Markdown converter.
pub fn translate_body(text: &str, mapping: &IdMapping) -> Result<String> {
    BodyTranslator::default().translate(text, mapping)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    Inline(usize),
    Fenced(usize),
}

/// Earliest verbatim marker in `text`; the fence wins a tie.
fn next_marker(text: &str) -> Option<Marker> {
    let inline = text.find(INLINE_MARKER);
    let fenced = text.find(FENCE_OPEN);
    match (inline, fenced) {
        (Some(i), Some(f)) if f <= i => Some(Marker::Fenced(f)),
        (Some(i), _) => Some(Marker::Inline(i)),
        (None, Some(f)) => Some(Marker::Fenced(f)),
        (None, None) => None,
    }
}

fn push_placeholder(out: &mut String, index: usize) {
    out.push(PLACEHOLDER_OPEN);
    out.push_str(&index.to_string());
    out.push(PLACEHOLDER_CLOSE);
}

fn restore_placeholders(text: &str, verbatim: &[String]) -> String {
    if verbatim.is_empty() {
        return text.to_string();
    }
    PLACEHOLDER_RE
        .replace_all(text, |caps: &Captures| {
            caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|i| verbatim.get(i))
                .map_or_else(|| caps[0].to_string(), Clone::clone)
        })
        .into_owned()
}

/// Whether the match at `start..end` is an `&#NN;` character entity.
fn is_entity(text: &str, start: usize, end: usize) -> bool {
    text[..start].ends_with('&') && text[end..].starts_with(';')
}

fn rewrite_ticket_refs(text: &str, mapping: &IdMapping) -> String {
    TICKET_REF_RE
        .replace_all(text, |caps: &Captures| {
            let whole = &caps[0];
            let entity = caps
                .get(0)
                .is_some_and(|m| is_entity(text, m.start(), m.end()));
            let id = match caps[1].parse::<u64>() {
                Ok(id) if !entity => id,
                _ => return whole.to_string(),
            };
            match mapping.get(id) {
                Some(dest) => format!("[#{}]({})", dest.number, dest.reference),
                None => {
                    tracing::warn!(ticket = id, "unresolved ticket reference left as trac#{id}");
                    format!("trac#{id}")
                }
            }
        })
        .into_owned()
}

/// Renders the content between `{{{` and `}}}`.
fn render_fenced(content: &str) -> String {
    if let Some((name, rest)) = processor(content) {
        if RAW_FORMATS.contains(&name) {
            return raw_content(rest).to_string();
        }
        return code_block(name, rest.trim_start_matches([' ', '\t']));
    }
    if content.contains('\n') {
        code_block("", content)
    } else {
        format!("```{content}```")
    }
}

/// Splits a leading `#!name` processor line from its content.
fn processor(content: &str) -> Option<(&str, &str)> {
    let directive = content.trim_start().strip_prefix("#!")?;
    let len = directive
        .find(|c: char| c.is_whitespace())
        .unwrap_or(directive.len());
    let name = &directive[..len];
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+'));
    valid.then_some((name, &directive[len..]))
}

/// Drops the line break after the processor name and the one before `}}}`.
fn raw_content(rest: &str) -> &str {
    let rest = rest.trim_start_matches([' ', '\t']);
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))
        .unwrap_or(rest);
    let trimmed = rest.trim_end_matches([' ', '\t']);
    trimmed
        .strip_suffix("\r\n")
        .or_else(|| trimmed.strip_suffix('\n'))
        .unwrap_or(trimmed)
}

fn code_block(language: &str, body: &str) -> String {
    let mut out = String::with_capacity(body.len() + language.len() + 8);
    out.push_str("```");
    out.push_str(language);
    if !body.starts_with('\n') {
        out.push('\n');
    }
    out.push_str(body);
    if !body.ends_with('\n') {
        out.push('\n');
    }
    out.push_str("```");
    out
}

#[cfg(test)]
#[path = "body_tests.rs"]
mod tests;
