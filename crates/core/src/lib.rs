// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! trac2gh-core: markup translation and issue number prediction
//!
//! This crate holds the pure parts of a Trac to GitHub migration. Nothing in
//! here touches the network or the filesystem; the `trac2gh` CLI reads the
//! Trac database and ledgers and feeds them through these types.

pub mod body;
pub mod error;
pub mod fixme;
pub mod mapping;
pub mod markdown;
pub mod page;
pub mod predict;

pub use body::{translate_body, BodyTranslator};
pub use error::{Error, Result};
pub use fixme::FixmeRewriter;
pub use mapping::{destination_number, Destination, IdMapping};
pub use markdown::{SyntaxConverter, TracMarkdown, Verbatim};
pub use page::{translate_page, PageOptions, PageTranslator};
pub use predict::{
    confirm_number, next_number_from, plan, NumberPredictor, PlannedTicket, SubmissionPlan,
    Ticket,
};

/// Compiles a hard-coded pattern.
///
/// Patterns are constants verified by the unit tests, so a failure here is
/// unreachable.
pub(crate) fn static_regex(pattern: &str) -> regex::Regex {
    match regex::Regex::new(pattern) {
        Ok(re) => re,
        Err(_) => unreachable!("static regex pattern"),
    }
}
