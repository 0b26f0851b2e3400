// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::sync::test_helpers::{raw_reply, raw_ticket};
use chrono::TimeZone;
use serde_json::json;
use yare::parameterized;

#[test]
fn normalizes_full_ticket() {
    let mut raw = raw_ticket(42);
    raw["current_team_assignee"] = json!({"team": {"id": 3, "name": "Tier 1"}});
    raw["current_user_assignee"] = json!({"user": {"id": 8, "name": "Sam"}});
    raw["archived"] = json!(true);

    let ticket = normalize_ticket(&raw).unwrap();

    assert_eq!(ticket.id, 42);
    assert_eq!(ticket.source_type, "email");
    assert_eq!(ticket.source, "help@example.com");
    assert_eq!(ticket.labels, vec!["billing", "urgent"]);
    assert_eq!(ticket.subject, "Ticket 42");
    assert_eq!(ticket.replies_count, 2);
    assert_eq!(ticket.created_at, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    assert!(ticket.closed);
    assert_eq!(ticket.current_team_assignee_id, Some(3));
    assert_eq!(ticket.current_team_assignee_name.as_deref(), Some("Tier 1"));
    assert_eq!(ticket.current_user_assignee_id, Some(8));
    assert_eq!(ticket.current_user_assignee_name.as_deref(), Some("Sam"));
    assert_eq!(ticket.cc.len(), 1);
    assert_eq!(ticket.cc[0].email, "cc@example.com");
    assert_eq!(ticket.requester_display(), "Dana Reyes <dana@example.com>");
}

#[test]
fn missing_team_assignee_defaults_to_null() {
    let raw = raw_ticket(1);
    assert!(raw.get("current_team_assignee").is_none());

    let ticket = normalize_ticket(&raw).unwrap();
    assert_eq!(ticket.current_team_assignee_id, None);
    assert_eq!(ticket.current_team_assignee_name, None);
}

#[parameterized(
    explicit_null = { json!(null) },
    empty_object = { json!({}) },
    team_without_name = { json!({"team": {"id": 3}}) },
    team_without_id = { json!({"team": {"name": "Tier 1"}}) },
    wrong_shape = { json!("Tier 1") },
)]
fn partial_team_assignee_nulls_both(block: Value) {
    let mut raw = raw_ticket(1);
    raw["current_team_assignee"] = block;

    let ticket = normalize_ticket(&raw).unwrap();
    assert_eq!(ticket.current_team_assignee_id, None);
    assert_eq!(ticket.current_team_assignee_name, None);
}

#[test]
fn offset_timestamps_are_stored_as_utc() {
    let mut raw = raw_ticket(1);
    raw["created_at"] = json!("2024-01-01T05:30:00+05:30");

    let ticket = normalize_ticket(&raw).unwrap();
    assert_eq!(ticket.created_at, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
}

#[test]
fn non_string_source_value_is_encoded() {
    let mut raw = raw_ticket(1);
    raw["source"] = json!({"api": {"client": "zapier"}});

    let ticket = normalize_ticket(&raw).unwrap();
    assert_eq!(ticket.source_type, "api");
    assert_eq!(ticket.source, r#"{"client":"zapier"}"#);
}

#[test]
fn null_lists_become_empty() {
    let mut raw = raw_ticket(1);
    raw["labels"] = json!(null);
    raw["cc"] = json!(null);

    let ticket = normalize_ticket(&raw).unwrap();
    assert!(ticket.labels.is_empty());
    assert!(ticket.cc.is_empty());
}

#[test]
fn empty_source_map_fails() {
    let mut raw = raw_ticket(5);
    raw["source"] = json!({});

    let err = normalize_ticket(&raw).unwrap_err();
    assert_eq!(err.record, "ticket 5");
    assert_eq!(err.reason, "source map is empty");
}

#[test]
fn ambiguous_source_map_fails() {
    let mut raw = raw_ticket(5);
    raw["source"] = json!({"email": "a@example.com", "web": "form"});

    let err = normalize_ticket(&raw).unwrap_err();
    assert!(err.reason.contains("ambiguous source map"));
}

#[parameterized(
    subject = { "subject" },
    requester = { "requester" },
    source = { "source" },
    created_at = { "created_at" },
)]
fn missing_required_field_fails(field: &str) {
    let mut raw = raw_ticket(5);
    raw.as_object_mut().unwrap().remove(field);

    let err = normalize_ticket(&raw).unwrap_err();
    assert_eq!(err.record, "ticket 5");
    assert!(err.reason.contains(field), "{}", err.reason);
}

#[parameterized(
    id = { "id" },
    name = { "name" },
    email = { "email" },
)]
fn missing_requester_field_fails(field: &str) {
    let mut raw = raw_ticket(5);
    raw["requester"].as_object_mut().unwrap().remove(field);

    assert!(normalize_ticket(&raw).is_err());
}

#[test]
fn missing_id_names_unknown_record() {
    let mut raw = raw_ticket(5);
    raw.as_object_mut().unwrap().remove("id");

    let err = normalize_ticket(&raw).unwrap_err();
    assert_eq!(err.record, "ticket <unknown id>");
}

#[test]
fn bad_timestamp_fails() {
    let mut raw = raw_ticket(5);
    raw["last_activity_at"] = json!("last tuesday");

    let err = normalize_ticket(&raw).unwrap_err();
    assert!(err.reason.contains("last_activity_at"));
}

#[test]
fn normalizes_reply() {
    let raw = raw_reply(7, "2024-01-01T00:05:00Z");
    let reply = normalize_reply(&raw, 42).unwrap();

    assert_eq!(reply.id, 7);
    assert_eq!(reply.ticket_id, 42);
    assert_eq!(reply.created_at, Utc.with_ymd_and_hms(2024, 1, 1, 0, 5, 0).unwrap());
    assert_eq!(reply.replier_email, "agent@example.com");
    assert!(reply.replier_agent);
}

#[test]
fn reply_without_replier_fails() {
    let mut raw = raw_reply(7, "2024-01-01T00:05:00Z");
    raw.as_object_mut().unwrap().remove("replier");

    let err = normalize_reply(&raw, 42).unwrap_err();
    assert_eq!(err.record, "reply 7 of ticket 42");
}

#[test]
fn reply_with_bad_timestamp_fails() {
    let raw = raw_reply(7, "2024-13-45");
    assert!(normalize_reply(&raw, 42).is_err());
}
