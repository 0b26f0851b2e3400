// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::NaiveDateTime;

/// Header of the report sheet, one name per [`ReportRow::cells`] entry.
pub const REPORT_COLUMNS: [&str; 11] = [
    "Subject",
    "Team Assigned",
    "User Assigned",
    "Created",
    "First Response",
    "Last Response",
    "Closed",
    "Labels",
    "FRT",
    "CT",
    "Requester",
];

/// A single typed sheet value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    Integer(i64),
    /// Wall-clock time in the report timezone.
    DateTime(NaiveDateTime),
    Empty,
}

impl Cell {
    fn text(value: &Option<String>) -> Self {
        value.clone().map_or(Cell::Empty, Cell::Text)
    }

    fn integer(value: Option<i64>) -> Self {
        value.map_or(Cell::Empty, Cell::Integer)
    }

    fn date_time(value: Option<NaiveDateTime>) -> Self {
        value.map_or(Cell::Empty, Cell::DateTime)
    }
}

/// One ticket's line in the report. Instants are already local to the
/// report timezone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub ticket_id: i64,
    pub subject: String,
    pub team_assignee: Option<String>,
    pub user_assignee: Option<String>,
    pub created_at: NaiveDateTime,
    pub first_response: Option<NaiveDateTime>,
    pub last_response: Option<NaiveDateTime>,
    pub closed: bool,
    pub labels: Option<String>,
    pub frt: Option<i64>,
    pub ct: Option<i64>,
    pub requester: String,
}

impl ReportRow {
    /// Values in [`REPORT_COLUMNS`] order.
    pub fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Text(self.subject.clone()),
            Cell::text(&self.team_assignee),
            Cell::text(&self.user_assignee),
            Cell::DateTime(self.created_at),
            Cell::date_time(self.first_response),
            Cell::date_time(self.last_response),
            Cell::Text(if self.closed { "Y" } else { "N" }.to_string()),
            Cell::text(&self.labels),
            Cell::integer(self.frt),
            Cell::integer(self.ct),
            Cell::Text(self.requester.clone()),
        ]
    }
}

#[cfg(test)]
#[path = "row_tests.rs"]
mod tests;
