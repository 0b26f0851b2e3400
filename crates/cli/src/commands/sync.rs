// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use tix_core::Database;

use crate::config::Settings;
use crate::error::Result;
use crate::sync::{
    HttpTicketSource, Orchestrator, SyncOptions, SyncSummary, TicketFilter, TicketSource,
};

use super::{open_store, Access};

pub fn run(
    settings: &Settings,
    archived: bool,
    page_size: Option<u32>,
    sort_by: Option<String>,
    strict: bool,
    filter: TicketFilter,
) -> Result<()> {
    // Credentials are checked before the store or the network is touched.
    let helpdesk = settings.helpdesk()?;
    let options = options_for(settings, page_size, sort_by, strict, filter);
    let store = open_store(settings, Access::Exclusive)?;
    let source = HttpTicketSource::new(&helpdesk)?;

    let summary = run_impl(source, &store.db, options, archived)?;
    println!("{}", summary_line(&summary));
    Ok(())
}

/// Internal implementation that accepts a source and db for testing.
pub(crate) fn run_impl<S: TicketSource>(
    source: S,
    db: &Database,
    options: SyncOptions,
    archived: bool,
) -> Result<SyncSummary> {
    Orchestrator::new(source, db, options).sync(archived)
}

/// Settings with command-line overrides applied.
pub(crate) fn options_for(
    settings: &Settings,
    page_size: Option<u32>,
    sort_by: Option<String>,
    strict: bool,
    filter: TicketFilter,
) -> SyncOptions {
    let mut options = SyncOptions::from_settings(&settings.sync);
    if let Some(page_size) = page_size {
        options.page_size = page_size;
    }
    if let Some(sort_by) = sort_by {
        options.sort_by = sort_by;
    }
    options.strict |= strict;
    options.filter = filter;
    options
}

pub(crate) fn summary_line(summary: &SyncSummary) -> String {
    format!(
        "Synced {} tickets and {} replies across {} pages ({} skipped)",
        summary.tickets_written,
        summary.replies_written,
        summary.pages_fetched,
        summary.skipped_count()
    )
}

#[cfg(test)]
#[path = "sync_tests.rs"]
mod tests;
