// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Standalone wiki page translation to reStructuredText.
//!
//! Output always starts with a single `.. contents::` directive and ends
//! with exactly one newline. Translating an already translated page is a
//! no-op.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::static_regex;

const CONTENTS_DIRECTIVE: &str = ".. contents::";

static OUTLINE_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    static_regex(r"(?m)^[ \t]*\[\[(?:PageOutline|TOC)(?:\([^)\n]*\))?\]\][ \t]*(?:\n|$)")
});
static OUTLINE_RE: LazyLock<Regex> =
    LazyLock::new(|| static_regex(r"\[\[(?:PageOutline|TOC)(?:\([^)\n]*\))?\]\]"));
static CONTENTS_RE: LazyLock<Regex> = LazyLock::new(|| {
    static_regex(r"(?m)^\.\. contents::[^\n]*(?:\n|$)(?:[ \t]+:[^\n]*(?:\n|$))*")
});
static ROLE_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| static_regex(r":trac:`([^`\n]+)`|`([^`\n]+)`:trac:"));
static BRACKET_WIKI_RE: LazyLock<Regex> =
    LazyLock::new(|| static_regex(r"\[wiki:([^\]\s]+)(?:[ \t]+([^\]\n]+))?\]"));
static EXTERNAL_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    static_regex(r"\[((?:https?|ftp)://[^\s\]]+)(?:[ \t]+([^\]\n]+))?\]")
});
static TICKET_RE: LazyLock<Regex> =
    LazyLock::new(|| static_regex(r"(?i)\b(ticket)([ \t]+)#([0-9]+)\b"));
static HEADING1_RE: LazyLock<Regex> =
    LazyLock::new(|| static_regex(r"(?m)^=[ \t]+(.+?)[ \t]+=[ \t]*$"));
static HEADING2_RE: LazyLock<Regex> =
    LazyLock::new(|| static_regex(r"(?m)^==[ \t]+(.+?)[ \t]+==[ \t]*$"));
static LIST_INDENT_RE: LazyLock<Regex> =
    LazyLock::new(|| static_regex(r"(?m)^ ((?:[*+-]|#\.|[0-9]+\.)[ \t])"));
static LIST_ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| static_regex(r"^(?:[*+-]|#\.|[0-9]+\.)[ \t]"));

/// Settings for wiki page translation.
#[derive(Debug, Clone, Default)]
pub struct PageOptions {
    /// Source ticket URL prefix; `ticket #N` is linked back to it when set.
    pub ticket_url_prefix: Option<String>,
    /// Prepended to every converted wiki link target.
    pub wiki_base_url: String,
}

#[derive(Debug, Clone, Default)]
pub struct PageTranslator {
    options: PageOptions,
}

impl PageTranslator {
    pub fn new(options: PageOptions) -> Self {
        PageTranslator { options }
    }

    pub fn translate(&self, text: &str) -> String {
        let text = text.replace("\r\n", "\n");
        let text = strip_raw_wrapper(&text).unwrap_or(&text);
        let text = remove_outlines(text);
        let text = self.convert_wiki_links(&text);
        let text = convert_external_links(&text);
        let text = self.convert_ticket_refs(&text);
        let text = convert_headings(&text);
        let text = LIST_INDENT_RE.replace_all(&text, "${1}");
        let text = separate_lists(&text);

        let body = skip_blank_lines(&text).trim_end();
        if body.is_empty() {
            format!("{CONTENTS_DIRECTIVE}\n")
        } else {
            format!("{CONTENTS_DIRECTIVE}\n\n{body}\n")
        }
    }

    fn convert_wiki_links(&self, text: &str) -> String {
        let text = ROLE_LINK_RE.replace_all(text, |caps: &Captures| {
            let content = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
            match parse_role_target(content) {
                Some((title, label)) => self.wiki_link(title, label),
                None => caps[0].to_string(),
            }
        });
        BRACKET_WIKI_RE
            .replace_all(&text, |caps: &Captures| {
                let label = caps.get(2).map(|m| m.as_str().trim());
                self.wiki_link(&caps[1], label)
            })
            .into_owned()
    }

    fn wiki_link(&self, title: &str, label: Option<&str>) -> String {
        let target = if title == "WikiStart" {
            "Home".to_string()
        } else {
            title.replace(['/', ' '], "-")
        };
        let text = match label {
            Some(label) if !label.is_empty() && label != title => label,
            _ => title,
        };
        format!("`{text} <{}{target}>`__", self.options.wiki_base_url)
    }

    fn convert_ticket_refs(&self, text: &str) -> String {
        let Some(prefix) = self.options.ticket_url_prefix.as_deref() else {
            return text.to_string();
        };
        TICKET_RE
            .replace_all(text, |caps: &Captures| {
                let inside = caps
                    .get(0)
                    .is_some_and(|m| inside_inline_markup(text, m.start()));
                if inside {
                    return caps[0].to_string();
                }
                let id = &caps[3];
                format!("{}{}`#{id} <{prefix}{id}>`__", &caps[1], &caps[2])
            })
            .into_owned()
    }
}

/// Translates a page with [`PageOptions::default`].
///
/// No ticket URL prefix is set, so `ticket #N` stays plain text. Build a
/// [`PageTranslator`] with `ticket_url_prefix` to link tickets.
pub fn translate_page(text: &str) -> String {
    PageTranslator::default().translate(text)
}

/// Returns the body when the whole page is one `{{{ #!rst ... }}}` block.
fn strip_raw_wrapper(text: &str) -> Option<&str> {
    let inner = text.trim().strip_prefix("{{{")?.strip_suffix("}}}")?;
    if inner.contains("}}}") {
        return None;
    }
    let body = inner.trim_start().strip_prefix("#!rst")?;
    if !body.is_empty() && !body.starts_with(char::is_whitespace) {
        return None;
    }
    Some(body.trim_start_matches([' ', '\t']))
}

fn remove_outlines(text: &str) -> String {
    let text = OUTLINE_LINE_RE.replace_all(text, "");
    let text = OUTLINE_RE.replace_all(&text, "");
    CONTENTS_RE.replace_all(&text, "").into_owned()
}

/// Parses the content of a `:trac:` role as a wiki title and optional label.
fn parse_role_target(content: &str) -> Option<(&str, Option<&str>)> {
    let content = content.trim();
    if let Some(open) = content.strip_suffix('>').and_then(|s| s.rfind("<wiki:")) {
        let title = content[open + "<wiki:".len()..content.len() - 1].trim();
        let label = content[..open].trim();
        return Some((title, Some(label)));
    }
    let rest = content.strip_prefix("wiki:")?;
    match rest.split_once(char::is_whitespace) {
        Some((title, label)) => Some((title, Some(label.trim()))),
        None => Some((rest, None)),
    }
}

fn convert_external_links(text: &str) -> String {
    EXTERNAL_LINK_RE
        .replace_all(text, |caps: &Captures| match caps.get(2) {
            Some(label) => format!("`{} <{}>`__", label.as_str().trim(), &caps[1]),
            None => caps[1].to_string(),
        })
        .into_owned()
}

fn convert_headings(text: &str) -> String {
    let text = HEADING1_RE.replace_all(text, |caps: &Captures| underline(&caps[1], '='));
    HEADING2_RE
        .replace_all(&text, |caps: &Captures| underline(&caps[1], '-'))
        .into_owned()
}

fn underline(title: &str, ch: char) -> String {
    let rule = ch.to_string().repeat(title.chars().count());
    format!("{title}\n{rule}")
}

/// Whether `pos` falls after an odd number of backtick runs on its line.
fn inside_inline_markup(text: &str, pos: usize) -> bool {
    let line_start = text[..pos].rfind('\n').map_or(0, |i| i + 1);
    let mut runs = 0;
    let mut prev_tick = false;
    for c in text[line_start..pos].chars() {
        let tick = c == '`';
        if tick && !prev_tick {
            runs += 1;
        }
        prev_tick = tick;
    }
    runs % 2 == 1
}

/// Puts one blank line between a paragraph line and a list that follows it.
fn separate_lists(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    let mut prev_blank = true;
    let mut in_list = false;

    for line in text.split('\n') {
        let blank = line.trim().is_empty();
        let item = LIST_ITEM_RE.is_match(line);
        if item && !in_list && !prev_blank {
            out.push('\n');
        }
        if item {
            in_list = true;
        } else if blank || !line.starts_with([' ', '\t']) {
            in_list = false;
        }
        prev_blank = blank;
        out.push_str(line);
        out.push('\n');
    }
    out.pop();
    out
}

fn skip_blank_lines(text: &str) -> &str {
    let mut rest = text;
    while let Some((line, tail)) = rest.split_once('\n') {
        if !line.trim().is_empty() {
            break;
        }
        rest = tail;
    }
    rest
}

#[cfg(test)]
#[path = "page_tests.rs"]
mod tests;
