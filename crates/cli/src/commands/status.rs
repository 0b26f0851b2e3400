// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::Path;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tix_core::Database;

use crate::config::Settings;
use crate::error::Result;

use super::{open_store, Access};

/// Counts describing the local store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StoreStatus {
    pub tickets: i64,
    pub replies: i64,
    pub latest_activity: Option<DateTime<Utc>>,
}

pub fn run(settings: &Settings) -> Result<()> {
    let store = open_store(settings, Access::Shared)?;
    let status = run_impl(&store.db)?;
    print!("{}", render(&status, &settings.db_path, settings.report.timezone));
    Ok(())
}

/// Internal implementation that accepts db for testing.
pub(crate) fn run_impl(db: &Database) -> Result<StoreStatus> {
    Ok(StoreStatus {
        tickets: db.count_tickets()?,
        replies: db.count_replies()?,
        latest_activity: db.latest_activity()?,
    })
}

pub(crate) fn render(status: &StoreStatus, db_path: &Path, timezone: Tz) -> String {
    let latest = match status.latest_activity {
        Some(at) => at
            .with_timezone(&timezone)
            .format("%Y-%m-%d %H:%M %Z")
            .to_string(),
        None => "never".to_string(),
    };
    format!(
        "Store: {}\nTickets: {}\nReplies: {}\nLatest activity: {}\n",
        db_path.display(),
        status.tickets,
        status.replies,
        latest
    )
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
