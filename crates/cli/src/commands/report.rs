// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::{DateTime, Utc};
use tix_core::Database;

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::report::{
    parse_bound, DurationMode, ReportEngine, ReportOptions, ReportOutcome, ReportSink, XlsxSink,
    REPORT_COLUMNS, SHEET_TITLE,
};

use super::{open_store, Access};

pub fn run(
    settings: &Settings,
    since: Option<&str>,
    until: Option<&str>,
    name: &str,
    legacy_durations: bool,
) -> Result<()> {
    validate_name(name)?;
    let since = since.map(parse_bound).transpose()?;
    let until = until.map(parse_bound).transpose()?;

    let mut options = ReportOptions::from_settings(&settings.report);
    if legacy_durations {
        options.duration_mode = DurationMode::Legacy;
    }

    let store = open_store(settings, Access::Shared)?;
    let mut sink = XlsxSink::new(&settings.report.output_dir, name);

    match run_impl(&store.db, options, since, until, &mut sink)? {
        Some(count) => {
            println!("{} tickets found", count);
            println!("Wrote {}", sink.path().display());
        }
        None => println!("No tickets found"),
    }
    Ok(())
}

/// Internal implementation that accepts db and sink for testing.
///
/// Returns the number of rows written, or `None` when nothing matched and
/// the sink was left untouched.
pub(crate) fn run_impl(
    db: &Database,
    options: ReportOptions,
    since: Option<DateTime<Utc>>,
    until: Option<DateTime<Utc>>,
    sink: &mut impl ReportSink,
) -> Result<Option<usize>> {
    let rows = match ReportEngine::new(db, options).build_report(since, until)? {
        ReportOutcome::NoTickets => return Ok(None),
        ReportOutcome::Rows(rows) => rows,
    };

    let cells: Vec<_> = rows.iter().map(|row| row.cells()).collect();
    sink.write_sheet(SHEET_TITLE, &REPORT_COLUMNS, &cells)?;
    Ok(Some(rows.len()))
}

/// The workbook name is a file stem inside the output directory.
fn validate_name(name: &str) -> Result<()> {
    if name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(Error::Config(format!(
            "report name '{}' must be a plain file name",
            name
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
