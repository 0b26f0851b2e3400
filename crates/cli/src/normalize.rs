// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Mapping of raw helpdesk documents onto [`Ticket`] and [`Reply`].
//!
//! Raw documents are decoded into typed structs whose required fields are
//! non-optional, so a missing field is reported once with the record it
//! belongs to. Assignee blocks are read present-or-null: if either the id or
//! the name cannot be found, both are stored as null.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};
use tix_core::{CcEntry, Reply, Ticket};

/// A raw record that could not be mapped onto an entity.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{record}: {reason}")]
pub struct NormalizationError {
    /// Which record failed, e.g. `ticket 42` or `reply 7 of ticket 42`.
    pub record: String,
    pub reason: String,
}

impl NormalizationError {
    pub fn new(record: impl Into<String>, reason: impl Into<String>) -> Self {
        NormalizationError {
            record: record.into(),
            reason: reason.into(),
        }
    }
}

#[derive(Deserialize)]
struct RawTicket {
    id: i64,
    subject: String,
    source: Map<String, Value>,
    #[serde(default)]
    labels: Option<Vec<RawLabel>>,
    #[serde(default)]
    replies_count: i64,
    #[serde(default)]
    agent_replies_count: i64,
    #[serde(default)]
    comments_count: i64,
    created_at: String,
    last_activity_at: String,
    #[serde(default)]
    unanswered: bool,
    #[serde(default)]
    archived: bool,
    #[serde(default)]
    private: bool,
    #[serde(default)]
    trash: bool,
    #[serde(default)]
    draft: bool,
    #[serde(default)]
    starred: bool,
    #[serde(default)]
    current_team_assignee: Option<Value>,
    #[serde(default)]
    current_user_assignee: Option<Value>,
    #[serde(default)]
    cc: Option<Vec<RawCc>>,
    requester: RawRequester,
}

#[derive(Deserialize)]
struct RawLabel {
    name: String,
}

#[derive(Deserialize)]
struct RawCc {
    id: i64,
    #[serde(default)]
    name: Option<String>,
    email: String,
}

#[derive(Deserialize)]
struct RawRequester {
    id: i64,
    name: String,
    email: String,
}

#[derive(Deserialize)]
struct RawReply {
    id: i64,
    created_at: String,
    replier: RawReplier,
}

#[derive(Deserialize)]
struct RawReplier {
    id: i64,
    email: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    agent: bool,
}

/// Label used in errors for a raw ticket, before it has been decoded.
pub fn ticket_record(raw: &Value) -> String {
    match raw.get("id").and_then(Value::as_i64) {
        Some(id) => format!("ticket {id}"),
        None => "ticket <unknown id>".to_string(),
    }
}

fn reply_record(raw: &Value, ticket_id: i64) -> String {
    match raw.get("id").and_then(Value::as_i64) {
        Some(id) => format!("reply {id} of ticket {ticket_id}"),
        None => format!("reply <unknown id> of ticket {ticket_id}"),
    }
}

/// Parse a helpdesk timestamp (RFC 3339 with offset) into a UTC instant.
pub fn parse_timestamp(
    value: &str,
    field: &str,
    record: &str,
) -> Result<DateTime<Utc>, NormalizationError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| NormalizationError::new(record, format!("invalid {field} '{value}': {e}")))
}

/// Split the single-entry source map into (channel, value).
fn split_source(
    source: &Map<String, Value>,
    record: &str,
) -> Result<(String, String), NormalizationError> {
    let mut entries = source.iter();
    let (channel, value) = entries
        .next()
        .ok_or_else(|| NormalizationError::new(record, "source map is empty"))?;

    if entries.next().is_some() {
        let keys: Vec<&str> = source.keys().map(String::as_str).collect();
        return Err(NormalizationError::new(
            record,
            format!("ambiguous source map (keys: {})", keys.join(", ")),
        ));
    }

    let value = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    Ok((channel.clone(), value))
}

/// Read `<block>.<key>.{id,name}`; any missing piece nulls both.
fn assignee(block: Option<&Value>, key: &str) -> (Option<i64>, Option<String>) {
    let inner = block.and_then(|v| v.get(key));
    let id = inner.and_then(|v| v.get("id")).and_then(Value::as_i64);
    let name = inner.and_then(|v| v.get("name")).and_then(Value::as_str);
    match (id, name) {
        (Some(id), Some(name)) => (Some(id), Some(name.to_string())),
        _ => (None, None),
    }
}

/// Map a raw ticket document onto a [`Ticket`].
pub fn normalize_ticket(raw: &Value) -> Result<Ticket, NormalizationError> {
    let record = ticket_record(raw);
    let parsed =
        RawTicket::deserialize(raw).map_err(|e| NormalizationError::new(&record, e.to_string()))?;

    let (source_type, source) = split_source(&parsed.source, &record)?;
    let created_at = parse_timestamp(&parsed.created_at, "created_at", &record)?;
    let last_activity_at = parse_timestamp(&parsed.last_activity_at, "last_activity_at", &record)?;
    let (team_id, team_name) = assignee(parsed.current_team_assignee.as_ref(), "team");
    let (user_id, user_name) = assignee(parsed.current_user_assignee.as_ref(), "user");

    Ok(Ticket {
        id: parsed.id,
        source_type,
        source,
        labels: parsed
            .labels
            .unwrap_or_default()
            .into_iter()
            .map(|l| l.name)
            .collect(),
        subject: parsed.subject,
        replies_count: parsed.replies_count,
        agent_replies_count: parsed.agent_replies_count,
        comments_count: parsed.comments_count,
        created_at,
        last_activity_at,
        unanswered: parsed.unanswered,
        closed: parsed.archived,
        private: parsed.private,
        trash: parsed.trash,
        draft: parsed.draft,
        starred: parsed.starred,
        current_team_assignee_id: team_id,
        current_team_assignee_name: team_name,
        current_user_assignee_id: user_id,
        current_user_assignee_name: user_name,
        cc: parsed
            .cc
            .unwrap_or_default()
            .into_iter()
            .map(|c| CcEntry {
                id: c.id,
                name: c.name,
                email: c.email,
            })
            .collect(),
        requester_id: parsed.requester.id,
        requester_name: parsed.requester.name,
        requester_email: parsed.requester.email,
    })
}

/// Map a raw reply document onto a [`Reply`] belonging to `ticket_id`.
pub fn normalize_reply(raw: &Value, ticket_id: i64) -> Result<Reply, NormalizationError> {
    let record = reply_record(raw, ticket_id);
    let parsed =
        RawReply::deserialize(raw).map_err(|e| NormalizationError::new(&record, e.to_string()))?;

    Ok(Reply {
        id: parsed.id,
        ticket_id,
        created_at: parse_timestamp(&parsed.created_at, "created_at", &record)?,
        replier_id: parsed.replier.id,
        replier_email: parsed.replier.email,
        replier_name: parsed.replier.name,
        replier_agent: parsed.replier.agent,
    })
}

#[cfg(test)]
#[path = "normalize_tests.rs"]
mod tests;
