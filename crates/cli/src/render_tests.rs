// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::testing::{TestContext, EPOCH_2012};

fn mapping() -> IdMapping {
    let mut mapping = IdMapping::new();
    mapping
        .insert(2, "https://github.com/example/client/issues/7")
        .unwrap();
    mapping
}

#[test]
fn timestamps_are_utc() {
    assert_eq!(isotime(EPOCH_2012).unwrap(), "2012-01-01T00:00:00Z");
    assert_eq!(showtime(EPOCH_2012 + 90_000_000).unwrap(), "2012-01-01 00:01:30Z");
}

#[test]
fn out_of_range_timestamp_fails() {
    let err = isotime(i64::MAX).unwrap_err();
    assert!(matches!(err, Error::InvalidTimestamp { .. }));
}

#[test]
fn attachment_url_uses_hashed_layout() {
    assert_eq!(
        attachment_url("https://files.example.com/", 1, "trace.log"),
        "https://files.example.com/356/356a192b7913b04c54574d18c28d46e6395428ab/\
         e2baaff654436c60e9336ba60c8c32b1853fbc8a.log"
    );
}

#[test]
fn attachment_url_without_extension() {
    assert_eq!(
        attachment_url("/a/", 2, "README"),
        "/a/da4/da4b9237bacccdf19c0760cab7aec4a8359010b0/69e27356ef629022720d868ab0c0e3394775b6c1"
    );
}

#[test]
fn issue_body_has_header_description_and_metadata() {
    let ctx = TestContext::new();
    ctx.add_ticket(1, "server", "See #2 and '''this'''");
    ctx.add_attachment(1, "trace.log");
    ctx.set_custom(1, "branch", "1-fix-tls");
    let project = ctx.project();
    let mapping = mapping();
    let renderer = Renderer::new(&project.config, &mapping);

    let body = renderer.issue_body(&ctx.trac_db().record(1).unwrap()).unwrap();

    assert!(body.starts_with(
        "|<img src=\"https://avatars.githubusercontent.com/adiroiban?s=50\" width=\"50\" height=\"50\">\
         |@adiroiban reported|\n|-|-|\n"
    ));
    assert!(body.contains("|Trac ID|[trac#1](https://trac.example.com/ticket/1)|\n"));
    assert!(body.contains("|Type|defect|\n|Created|2012-01-01 00:00:00Z|\n|Branch|1-fix-tls|\n"));
    assert!(body.contains(
        "\nSee [#7](https://github.com/example/client/issues/7) and **this**\n"
    ));
    assert!(body.contains("Attachments:\n\n* [trace.log](https://files.example.com/attachments/356/"));
    assert!(body.contains("(1024 bytes; added by adi on 2012-01-01 00:00:00Z)"));
    assert!(body.contains("trac-id__1\nreporter__adi\nowner__adi\ncomponent__server\n"));
    assert!(body.contains("keywords__tls,_windows\n"));
    assert!(!body.contains("milestone__"));
    assert!(body.ends_with("```\n</details>\n"));
}

#[test]
fn unmapped_reporter_has_no_avatar() {
    let ctx = TestContext::new();
    ctx.add_ticket(1, "server", "");
    ctx.conn
        .execute("UPDATE ticket SET reporter = 'guest' WHERE id = 1", [])
        .unwrap();
    let project = ctx.project();
    let mapping = IdMapping::new();
    let renderer = Renderer::new(&project.config, &mapping);

    let body = renderer.issue_body(&ctx.trac_db().record(1).unwrap()).unwrap();
    assert!(body.starts_with("||guest reported|\n"));
    assert!(!body.contains("Branch"));
    assert!(!body.contains("Attachments:"));
}

#[test]
fn closed_ticket_payload() {
    let ctx = TestContext::new();
    ctx.add_ticket(3, "client", "");
    ctx.close_ticket(3, "fixed");
    ctx.add_comment(3, EPOCH_2012 + 60_000_000, "adi", "Done in #2");
    ctx.add_comment(3, EPOCH_2012 + 120_000_000, "guest", "thanks");
    let project = ctx.project();
    let mapping = mapping();
    let renderer = Renderer::new(&project.config, &mapping);

    let payload = renderer.payload(&ctx.trac_db().record(3).unwrap()).unwrap();

    assert_eq!(payload.issue.title, "Ticket 3");
    assert!(payload.issue.closed);
    assert_eq!(payload.issue.closed_at, Some(payload.issue.updated_at.clone()));
    assert_eq!(payload.issue.assignee.as_deref(), Some("adiroiban"));
    assert!(payload.issue.labels.contains(&"fixed".to_string()));
    assert_eq!(payload.comments.len(), 2);
    assert_eq!(payload.comments[0].created_at, "2012-01-01T00:01:00Z");
    assert_eq!(
        payload.comments[0].body,
        "|<img src=\"https://avatars.githubusercontent.com/adiroiban?s=50\" width=\"50\" height=\"50\">\
         <a name=\"note_1\"></a>|@adiroiban commented|\n|-|-|\n\
         \nDone in [#7](https://github.com/example/client/issues/7)"
    );
    assert_eq!(
        payload.comments[1].body,
        "|<a name=\"note_2\"></a>|guest commented|\n|-|-|\n\nthanks"
    );
}

#[test]
fn field_changes_become_comment_actions() {
    let ctx = TestContext::new();
    ctx.add_ticket(5, "server", "");
    let time = EPOCH_2012 + 60_000_000;
    ctx.add_comment(5, time, "adi", "Taking this.");
    ctx.add_change(5, time, "adi", "owner", "", "adi");
    ctx.add_change(5, time, "adi", "status", "new", "assigned");
    ctx.add_change(5, time + 1, "guest", "owner", "adi", "");
    let project = ctx.project();
    let mapping = IdMapping::new();
    let renderer = Renderer::new(&project.config, &mapping);

    let payload = renderer.payload(&ctx.trac_db().record(5).unwrap()).unwrap();

    assert_eq!(payload.comments.len(), 2);
    assert!(payload.comments[0].body.ends_with(
        "<a name=\"note_1\"></a>|@adiroiban set owner to @adiroiban<br>\
         @adiroiban set status to `assigned`|\n|-|-|\n\nTaking this."
    ));
    assert_eq!(payload.comments[1].body, "||guest removed owner|\n|-|-|\n");
}

#[test]
fn open_ticket_payload_omits_closed_at() {
    let ctx = TestContext::new();
    ctx.add_ticket(4, "server", "");
    let project = ctx.project();
    let mapping = IdMapping::new();
    let renderer = Renderer::new(&project.config, &mapping);

    let payload = renderer.payload(&ctx.trac_db().record(4).unwrap()).unwrap();
    let json = serde_json::to_value(&payload).unwrap();
    assert_eq!(json["issue"]["closed"], false);
    assert!(json["issue"].get("closed_at").is_none());
    assert_eq!(json["issue"]["created_at"], "2012-01-01T00:00:00Z");
}

#[test]
fn unclosed_markup_names_the_ticket() {
    let ctx = TestContext::new();
    ctx.add_ticket(5, "server", "{{{ never closed");
    let project = ctx.project();
    let mapping = IdMapping::new();
    let renderer = Renderer::new(&project.config, &mapping);

    let err = renderer
        .issue_body(&ctx.trac_db().record(5).unwrap())
        .unwrap_err();
    assert!(matches!(err, Error::Translation { ticket: 5, .. }));
}
