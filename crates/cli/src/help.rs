// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Help text generation with colorization support.

use crate::colors;
use clap::builder::styling::Styles;

/// Generate clap Styles matching the help color codes.
pub fn styles() -> Styles {
    if !colors::should_colorize() {
        return Styles::plain();
    }

    use anstyle::{Ansi256Color, Color, Style};

    let header = Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(colors::codes::HEADER))));
    let literal = Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(colors::codes::LITERAL))));
    let context = Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(colors::codes::CONTEXT))));

    Styles::styled()
        .header(header)
        .usage(header)
        .literal(literal)
        .placeholder(context)
        .valid(context)
}

/// Main help template with the commands list before the options.
pub fn template() -> String {
    format!(
        "{{about-with-newline}}
{{usage-heading}} {{usage}}

{{before-help}}{}
{{options}}{{after-help}}",
        colors::header("Options:")
    )
}

/// Commands list shown before options in main help.
pub fn commands() -> String {
    format!(
        "\
{header_migration}
  {plan}        Predict submission order and expected GitHub numbers
  {render}      Render GitHub import payloads for tickets
  {record}      Record a created issue in the ledger
  {fixme}       Rewrite FIXME markers to issue numbers

{header_wiki}
  {wiki}        Convert Trac wiki pages to reStructuredText

{header_setup}
  {completion}  Generate shell completions
",
        header_migration = colors::header("Ticket Migration:"),
        header_wiki = colors::header("Wiki:"),
        header_setup = colors::header("Setup:"),
        plan = colors::literal("plan"),
        render = colors::literal("render"),
        record = colors::literal("record"),
        fixme = colors::literal("fixme"),
        wiki = colors::literal("wiki"),
        completion = colors::literal("completion"),
    )
}

/// Workflow summary shown after options in main help.
pub fn quickstart() -> String {
    colors::examples(
        "\
Workflow:
  trac2gh plan --db trac.db --observed server=120    Write tickets_expected.tsv
  trac2gh render --db trac.db                        Print payloads in planned order
  trac2gh record 42 <github-url>                     Confirm one created issue",
    )
}

#[cfg(test)]
#[path = "help_tests.rs"]
mod tests;
