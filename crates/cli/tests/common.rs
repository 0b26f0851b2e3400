// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Allow unused items: test helpers are shared across multiple test binaries,
// and not every test file uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use chrono::{DateTime, TimeZone, Utc};
use tix_core::{Database, Reply, Ticket};

pub use mockito::{Matcher, Server};
pub use predicates::prelude::*;
pub use tempfile::TempDir;

/// `tix` with the environment scrubbed of tix variables and local test
/// servers reachable without a proxy.
pub fn tix() -> Command {
    let mut cmd = cargo_bin_cmd!("tix");
    cmd.env_remove("TIX_CONFIG")
        .env_remove("TIX_API_KEY")
        .env_remove("RUST_LOG")
        .env("NO_PROXY", "127.0.0.1,localhost");
    cmd
}

/// Temp directory holding a `tix.toml` with the given body.
pub fn temp_with_config(body: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("tix.toml"), body).unwrap();
    temp
}

pub fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
}

pub fn ticket(id: i64, created_at: DateTime<Utc>, closed: bool) -> Ticket {
    Ticket {
        id,
        source_type: "email".into(),
        source: "help@example.com".into(),
        labels: vec!["billing".into()],
        subject: format!("Ticket {id}"),
        replies_count: 1,
        agent_replies_count: 1,
        comments_count: 0,
        created_at,
        last_activity_at: created_at,
        unanswered: false,
        closed,
        private: false,
        trash: false,
        draft: false,
        starred: false,
        current_team_assignee_id: None,
        current_team_assignee_name: None,
        current_user_assignee_id: None,
        current_user_assignee_name: None,
        cc: vec![],
        requester_id: 100,
        requester_name: "Dana Reyes".into(),
        requester_email: "dana@example.com".into(),
    }
}

pub fn reply(id: i64, ticket_id: i64, created_at: DateTime<Utc>) -> Reply {
    Reply {
        id,
        ticket_id,
        created_at,
        replier_id: 500,
        replier_email: "agent@example.com".into(),
        replier_name: Some("Agent".into()),
        replier_agent: true,
    }
}

/// Write tickets (and replies) straight into the store at `db_path`.
pub fn seed(db_path: &Path, tickets: &[Ticket], replies: &[Reply]) {
    let db = Database::open(db_path).unwrap();
    for t in tickets {
        db.upsert_ticket(t).unwrap();
    }
    for r in replies {
        db.upsert_reply(r).unwrap();
    }
}
