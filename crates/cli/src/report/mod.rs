// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Per-ticket response-time report over the local store.
//!
//! The engine reads tickets created within an optional window, joins each
//! with its replies, and derives first-response (FRT) and close (CT) times in
//! minutes. Instants are stored in UTC and converted to the report timezone
//! only when a row is built.

mod metrics;
mod row;
mod sink;

pub use metrics::{DurationMode, ResponseMetrics};
pub use row::{Cell, ReportRow, REPORT_COLUMNS};
pub use sink::{ReportSink, XlsxSink};

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use tix_core::{Database, Ticket};

use crate::config::ReportSettings;
use crate::error::{Error, Result};

/// Title of the worksheet the report is written to.
pub const SHEET_TITLE: &str = "Support Tickets";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    pub timezone: Tz,
    pub duration_mode: DurationMode,
}

impl Default for ReportOptions {
    fn default() -> Self {
        ReportOptions {
            timezone: Tz::UTC,
            duration_mode: DurationMode::Elapsed,
        }
    }
}

impl ReportOptions {
    pub fn from_settings(settings: &ReportSettings) -> Self {
        ReportOptions {
            timezone: settings.timezone,
            duration_mode: DurationMode::from_legacy_flag(settings.legacy_durations),
        }
    }
}

/// Result of a report request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    /// The window matched no tickets; nothing should be written.
    NoTickets,
    Rows(Vec<ReportRow>),
}

pub struct ReportEngine<'a> {
    db: &'a Database,
    options: ReportOptions,
}

impl<'a> ReportEngine<'a> {
    pub fn new(db: &'a Database, options: ReportOptions) -> Self {
        ReportEngine { db, options }
    }

    /// Build rows for tickets created in `[since, until]`, either bound
    /// optional, ordered by creation time then id.
    pub fn build_report(
        &self,
        since: Option<DateTime<Utc>>,
        until: Option<DateTime<Utc>>,
    ) -> Result<ReportOutcome> {
        if self.options.duration_mode == DurationMode::Legacy {
            tracing::warn!("legacy durations active: whole days are dropped from FRT and CT");
        }

        let tickets = self.db.tickets_created_between(since, until)?;
        tracing::info!(tickets = tickets.len(), ?since, ?until, "selected tickets for report");
        if tickets.is_empty() {
            return Ok(ReportOutcome::NoTickets);
        }

        let rows = tickets
            .iter()
            .map(|ticket| self.build_row(ticket))
            .collect::<Result<Vec<_>>>()?;
        Ok(ReportOutcome::Rows(rows))
    }

    fn build_row(&self, ticket: &Ticket) -> Result<ReportRow> {
        let replies = self.db.replies_for_ticket(ticket.id)?;
        let metrics = ResponseMetrics::compute(ticket, &replies, self.options.duration_mode);
        tracing::debug!(
            ticket = ticket.id,
            replies = replies.len(),
            frt = ?metrics.frt,
            ct = ?metrics.ct,
            "computed ticket metrics"
        );

        Ok(ReportRow {
            ticket_id: ticket.id,
            subject: ticket.subject.clone(),
            team_assignee: ticket.current_team_assignee_name.clone(),
            user_assignee: ticket.current_user_assignee_name.clone(),
            created_at: self.local(ticket.created_at),
            first_response: metrics.first_response.map(|t| self.local(t)),
            last_response: metrics.last_response.map(|t| self.local(t)),
            closed: ticket.closed,
            labels: ticket.joined_labels(),
            frt: metrics.frt,
            ct: metrics.ct,
            requester: ticket.requester_display(),
        })
    }

    fn local(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        instant.with_timezone(&self.options.timezone).naive_local()
    }
}

/// Parse a report bound: `YYYY-MM-DD` (midnight UTC) or an RFC 3339 instant.
pub fn parse_bound(value: &str) -> Result<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date.and_time(chrono::NaiveTime::MIN).and_utc());
    }
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| Error::InvalidDate {
            value: value.to_string(),
        })
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

#[cfg(test)]
pub(crate) mod test_helpers;
