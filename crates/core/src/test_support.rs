// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Fixtures shared by the unit tests in this crate.

#![allow(clippy::unwrap_used)]

use chrono::{DateTime, TimeZone, Utc};

use crate::ticket::{CcEntry, Reply, Ticket};

pub fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
}

pub fn sample_ticket(id: i64) -> Ticket {
    Ticket {
        id,
        source_type: "email".into(),
        source: "help@example.com".into(),
        labels: vec!["billing".into()],
        subject: format!("Ticket {id}"),
        replies_count: 0,
        agent_replies_count: 0,
        comments_count: 0,
        created_at: at(2024, 1, 1, 0, 0),
        last_activity_at: at(2024, 1, 1, 0, 0),
        unanswered: true,
        closed: false,
        private: false,
        trash: false,
        draft: false,
        starred: false,
        current_team_assignee_id: None,
        current_team_assignee_name: None,
        current_user_assignee_id: None,
        current_user_assignee_name: None,
        cc: vec![CcEntry {
            id: 9,
            name: Some("Ops".into()),
            email: "ops@example.com".into(),
        }],
        requester_id: 100,
        requester_name: "Dana Reyes".into(),
        requester_email: "dana@example.com".into(),
    }
}

pub fn sample_reply(id: i64, ticket_id: i64, created_at: DateTime<Utc>) -> Reply {
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
