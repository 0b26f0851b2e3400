// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The sync pass: page through the helpdesk, normalize, upsert.

use serde_json::Value;
use tix_core::Database;

use crate::config::SyncSettings;
use crate::error::{Error, Result};
use crate::normalize::{normalize_reply, normalize_ticket, NormalizationError};

use super::source::{TicketFilter, TicketQuery, TicketSource};

/// Options for a sync pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOptions {
    pub page_size: u32,
    pub sort_by: String,
    /// Abort on the first malformed record instead of skipping it.
    pub strict: bool,
    pub filter: TicketFilter,
}

impl Default for SyncOptions {
    fn default() -> Self {
        SyncOptions {
            page_size: 99,
            sort_by: "last_activity".to_string(),
            strict: false,
            filter: TicketFilter::default(),
        }
    }
}

impl SyncOptions {
    pub fn from_settings(settings: &SyncSettings) -> Self {
        SyncOptions {
            page_size: settings.page_size,
            sort_by: settings.sort_by.clone(),
            strict: settings.strict,
            filter: TicketFilter::default(),
        }
    }
}

/// Outcome of a completed sync pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncSummary {
    pub tickets_written: usize,
    pub replies_written: usize,
    pub pages_fetched: u32,
    /// Records skipped because they could not be normalized.
    pub skipped: Vec<NormalizationError>,
}

impl SyncSummary {
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

/// Drives one sync pass from a [`TicketSource`] into the store.
///
/// Pages are fetched lazily in ascending order. For each ticket the ticket
/// is written first, then its replies are fetched and written. Any fetch or
/// store error aborts the pass; what was written before stays written.
pub struct Orchestrator<'a, S: TicketSource> {
    source: S,
    db: &'a Database,
    options: SyncOptions,
}

impl<'a, S: TicketSource> Orchestrator<'a, S> {
    pub fn new(source: S, db: &'a Database, options: SyncOptions) -> Self {
        Orchestrator {
            source,
            db,
            options,
        }
    }

    /// Run a full pass, including archived tickets if asked.
    pub fn sync(&mut self, include_archived: bool) -> Result<SyncSummary> {
        let mut summary = SyncSummary::default();
        let query = TicketQuery::first_page(
            self.options.page_size,
            &self.options.sort_by,
            include_archived,
            self.options.filter.clone(),
        );

        let first = self.source.fetch_tickets(&query)?;
        summary.pages_fetched = 1;
        // A source reporting zero pages still answered page 1.
        let total_pages = first.total_pages.max(1);
        tracing::info!(
            page = 1,
            total_pages,
            tickets = first.tickets.len(),
            "fetched ticket page"
        );
        self.sync_page(&first.tickets, &mut summary)?;

        for page in 2..=total_pages {
            let next = self.source.fetch_tickets(&query.for_page(page))?;
            summary.pages_fetched += 1;
            tracing::info!(
                page,
                total_pages,
                tickets = next.tickets.len(),
                "fetched ticket page"
            );
            self.sync_page(&next.tickets, &mut summary)?;
        }

        tracing::info!(
            tickets = summary.tickets_written,
            replies = summary.replies_written,
            skipped = summary.skipped_count(),
            "sync pass complete"
        );
        Ok(summary)
    }

    /// Give back the source, e.g. to inspect it after a pass.
    pub fn into_source(self) -> S {
        self.source
    }

    fn sync_page(&mut self, tickets: &[Value], summary: &mut SyncSummary) -> Result<()> {
        for raw in tickets {
            self.sync_ticket(raw, summary)?;
        }
        Ok(())
    }

    fn sync_ticket(&mut self, raw: &Value, summary: &mut SyncSummary) -> Result<()> {
        let ticket = match normalize_ticket(raw) {
            Ok(ticket) => ticket,
            Err(err) => return self.skip(err, summary),
        };
        self.db
            .upsert_ticket(&ticket)
            .map_err(|e| Error::StoreWrite {
                record: format!("ticket {}", ticket.id),
                source: e,
            })?;
        summary.tickets_written += 1;

        let replies = self.source.fetch_replies(ticket.id)?;
        let mut written = 0;
        for raw_reply in &replies {
            match normalize_reply(raw_reply, ticket.id) {
                Ok(reply) => {
                    self.db.upsert_reply(&reply).map_err(|e| Error::StoreWrite {
                        record: format!("reply {} of ticket {}", reply.id, ticket.id),
                        source: e,
                    })?;
                    written += 1;
                }
                Err(err) => self.skip(err, summary)?,
            }
        }
        summary.replies_written += written;

        tracing::debug!(ticket = ticket.id, replies = written, "synced ticket");
        Ok(())
    }

    fn skip(&self, err: NormalizationError, summary: &mut SyncSummary) -> Result<()> {
        if self.options.strict {
            return Err(err.into());
        }
        tracing::warn!(record = %err.record, reason = %err.reason, "skipping malformed record");
        summary.skipped.push(err);
        Ok(())
    }
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
