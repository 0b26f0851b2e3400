// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for sync and normalization tests.

use std::collections::HashMap;

use serde_json::{json, Value};

use crate::error::{Error, Result};

use super::source::{TicketPage, TicketQuery, TicketSource};

/// A well-formed raw ticket as the helpdesk API returns it.
pub fn raw_ticket(id: i64) -> Value {
    json!({
        "id": id,
        "subject": format!("Ticket {id}"),
        "source": {"email": "help@example.com"},
        "labels": [{"name": "billing"}, {"name": "urgent"}],
        "replies_count": 2,
        "agent_replies_count": 1,
        "comments_count": 0,
        "created_at": "2024-01-01T00:00:00Z",
        "last_activity_at": "2024-01-02T08:00:00Z",
        "unanswered": false,
        "archived": false,
        "private": false,
        "trash": false,
        "draft": false,
        "starred": false,
        "cc": [{"id": 11, "name": "Cc Person", "email": "cc@example.com"}],
        "requester": {"id": 100, "name": "Dana Reyes", "email": "dana@example.com"}
    })
}

/// A well-formed raw reply.
pub fn raw_reply(id: i64, created_at: &str) -> Value {
    json!({
        "id": id,
        "created_at": created_at,
        "replier": {"id": 500, "email": "agent@example.com", "name": "Agent", "agent": true}
    })
}

/// In-memory ticket source that records every call made to it.
#[derive(Default)]
pub struct FakeSource {
    /// Tickets per page; page `n` is `pages[n - 1]`.
    pub pages: Vec<Vec<Value>>,
    /// Reported `total_pages`; defaults to `pages.len()`.
    pub total_pages: Option<u32>,
    pub replies: HashMap<i64, Vec<Value>>,
    /// Page number that answers with the given status.
    pub failing_page: Option<(u32, u16)>,
    /// Ticket whose replies answer with the given status.
    pub failing_replies: Option<(i64, u16)>,
    pub ticket_calls: Vec<TicketQuery>,
    pub reply_calls: Vec<i64>,
}

impl FakeSource {
    pub fn with_pages(pages: Vec<Vec<Value>>) -> Self {
        FakeSource {
            pages,
            ..FakeSource::default()
        }
    }

    pub fn with_replies(mut self, ticket_id: i64, replies: Vec<Value>) -> Self {
        self.replies.insert(ticket_id, replies);
        self
    }

    pub fn pages_requested(&self) -> Vec<u32> {
        self.ticket_calls.iter().map(|q| q.page).collect()
    }
}

impl TicketSource for FakeSource {
    fn fetch_tickets(&mut self, query: &TicketQuery) -> Result<TicketPage> {
        self.ticket_calls.push(query.clone());
        if let Some((page, status)) = self.failing_page {
            if page == query.page {
                return Err(Error::Fetch {
                    resource: format!("GET /tickets page {page}"),
                    status,
                });
            }
        }
        let index = query.page.saturating_sub(1) as usize;
        Ok(TicketPage {
            tickets: self.pages.get(index).cloned().unwrap_or_default(),
            total_pages: self.total_pages.unwrap_or(self.pages.len() as u32),
        })
    }

    fn fetch_replies(&mut self, ticket_id: i64) -> Result<Vec<Value>> {
        self.reply_calls.push(ticket_id);
        if let Some((id, status)) = self.failing_replies {
            if id == ticket_id {
                return Err(Error::Fetch {
                    resource: format!("GET /tickets/{ticket_id}/replies"),
                    status,
                });
            }
        }
        Ok(self.replies.get(&ticket_id).cloned().unwrap_or_default())
    }
}
