// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Source abstraction for the helpdesk ticket API.
//!
//! Provides a trait-based source layer that enables:
//! - Real HTTP fetches for production ([`super::HttpTicketSource`])
//! - In-memory sources for unit testing

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

use crate::error::Result;

/// Optional filters narrowing which tickets a sync pass fetches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketFilter {
    pub assigned_user: Option<String>,
    pub assigned_team: Option<String>,
    pub label: Option<String>,
    pub since: Option<NaiveDate>,
    pub until: Option<NaiveDate>,
    pub requester_emails: Vec<String>,
}

/// Parameters for one `GET /tickets` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketQuery {
    pub page: u32,
    pub per_page: u32,
    pub sort_by: String,
    /// Include archived tickets (`archived=any`).
    pub archived: bool,
    pub filter: TicketFilter,
}

impl TicketQuery {
    /// Query for the first page.
    pub fn first_page(per_page: u32, sort_by: &str, archived: bool, filter: TicketFilter) -> Self {
        TicketQuery {
            page: 1,
            per_page,
            sort_by: sort_by.to_string(),
            archived,
            filter,
        }
    }

    /// Same query for another page.
    pub fn for_page(&self, page: u32) -> Self {
        TicketQuery {
            page,
            ..self.clone()
        }
    }

    /// Query-string pairs, excluding the credential.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if self.archived {
            params.push(("archived", "any".to_string()));
        }
        if let Some(user) = &self.filter.assigned_user {
            params.push(("assigned_user", user.clone()));
        }
        if let Some(team) = &self.filter.assigned_team {
            params.push(("assigned_team", team.clone()));
        }
        if let Some(label) = &self.filter.label {
            params.push(("label", label.clone()));
        }
        if let Some(since) = self.filter.since {
            params.push(("since", since.format("%Y-%m-%d").to_string()));
        }
        if let Some(until) = self.filter.until {
            params.push(("until", until.format("%Y-%m-%d").to_string()));
        }
        params.push(("sort_by", self.sort_by.clone()));
        params.push(("page", self.page.to_string()));
        params.push(("per_page", self.per_page.to_string()));
        if !self.filter.requester_emails.is_empty() {
            params.push(("requester_emails", self.filter.requester_emails.join(",")));
        }
        params
    }
}

/// Envelope of a `GET /tickets` response.
///
/// Tickets stay raw until normalization so that one malformed record does
/// not fail the whole page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TicketPage {
    pub tickets: Vec<Value>,
    #[serde(default)]
    pub total_pages: u32,
}

/// Envelope of a `GET /tickets/{id}/replies` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReplyList {
    pub replies: Vec<Value>,
}

/// A paginated source of raw ticket and reply documents.
///
/// Calls are blocking; a non-success response is an error and no call is
/// retried.
pub trait TicketSource {
    /// Fetch one page of tickets.
    fn fetch_tickets(&mut self, query: &TicketQuery) -> Result<TicketPage>;

    /// Fetch every reply of a ticket in one call.
    fn fetch_replies(&mut self, ticket_id: i64) -> Result<Vec<Value>>;
}

#[cfg(test)]
#[path = "source_tests.rs"]
mod tests;
