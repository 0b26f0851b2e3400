// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Helpdesk entities mirrored into the local store.
//!
//! A [`Ticket`] is identified by the id the helpdesk assigned to it. A
//! [`Reply`] carries the id of the ticket it belongs to, but the store does
//! not require that ticket to exist.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A person copied on a ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CcEntry {
    pub id: i64,
    pub name: Option<String>,
    pub email: String,
}

/// A support ticket as stored locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: i64,
    /// Channel the ticket arrived through (e.g. "email", "web").
    pub source_type: String,
    /// Channel-specific origin value.
    pub source: String,
    /// Label names in the order the helpdesk returned them.
    pub labels: Vec<String>,
    pub subject: String,
    pub replies_count: i64,
    pub agent_replies_count: i64,
    pub comments_count: i64,
    pub created_at: DateTime<Utc>,
    pub last_activity_at: DateTime<Utc>,
    pub unanswered: bool,
    /// Archived on the helpdesk side.
    pub closed: bool,
    pub private: bool,
    pub trash: bool,
    pub draft: bool,
    pub starred: bool,
    pub current_team_assignee_id: Option<i64>,
    pub current_team_assignee_name: Option<String>,
    pub current_user_assignee_id: Option<i64>,
    pub current_user_assignee_name: Option<String>,
    pub cc: Vec<CcEntry>,
    pub requester_id: i64,
    pub requester_name: String,
    pub requester_email: String,
}

impl Ticket {
    /// Returns the requester formatted as `name <email>`.
    pub fn requester_display(&self) -> String {
        format!("{} <{}>", self.requester_name, self.requester_email)
    }

    /// Returns the labels joined with commas, or `None` when unlabeled.
    pub fn joined_labels(&self) -> Option<String> {
        if self.labels.is_empty() {
            None
        } else {
            Some(self.labels.join(","))
        }
    }
}

/// A reply posted on a ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub id: i64,
    pub ticket_id: i64,
    pub created_at: DateTime<Utc>,
    pub replier_id: i64,
    pub replier_email: String,
    pub replier_name: Option<String>,
    /// True when the reply was written by a helpdesk agent.
    pub replier_agent: bool,
}

#[cfg(test)]
#[path = "ticket_tests.rs"]
mod tests;
