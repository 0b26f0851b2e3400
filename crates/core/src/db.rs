// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! SQLite-backed store for mirrored tickets and replies.
//!
//! Both tables are keyed by the helpdesk id and written with replace
//! semantics: writing a record whose id already exists overwrites every
//! column. Replies carry a `ticket_id` but no foreign key, since a partial
//! sync may store replies before their ticket.

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;

use crate::error::{Error, Result};
use crate::ticket::{CcEntry, Reply, Ticket};

/// SQL schema for the ticket store.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS tickets (
    id INTEGER PRIMARY KEY,
    source_type TEXT NOT NULL,
    source TEXT NOT NULL,
    labels TEXT NOT NULL,          -- JSON array, helpdesk order
    subject TEXT NOT NULL,
    replies_count INTEGER NOT NULL,
    agent_replies_count INTEGER NOT NULL,
    comments_count INTEGER NOT NULL,
    created_at TEXT NOT NULL,
    last_activity_at TEXT NOT NULL,
    unanswered INTEGER NOT NULL,
    closed INTEGER NOT NULL,
    private INTEGER NOT NULL,
    trash INTEGER NOT NULL,
    draft INTEGER NOT NULL,
    starred INTEGER NOT NULL,
    current_team_assignee_id INTEGER,
    current_team_assignee_name TEXT,
    current_user_assignee_id INTEGER,
    current_user_assignee_name TEXT,
    cc TEXT NOT NULL,              -- JSON array of {id, name, email}
    requester_id INTEGER NOT NULL,
    requester_name TEXT NOT NULL,
    requester_email TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS replies (
    id INTEGER PRIMARY KEY,
    ticket_id INTEGER NOT NULL,
    created_at TEXT NOT NULL,
    replier_id INTEGER NOT NULL,
    replier_email TEXT NOT NULL,
    replier_name TEXT,
    replier_agent INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_tickets_created ON tickets(created_at);
CREATE INDEX IF NOT EXISTS idx_replies_ticket ON replies(ticket_id);
"#;

const TICKET_COLUMNS: &str = "id, source_type, source, labels, subject, replies_count,
    agent_replies_count, comments_count, created_at, last_activity_at, unanswered,
    closed, private, trash, draft, starred, current_team_assignee_id,
    current_team_assignee_name, current_user_assignee_id, current_user_assignee_name,
    cc, requester_id, requester_name, requester_email";

const REPLY_COLUMNS: &str =
    "id, ticket_id, created_at, replier_id, replier_email, replier_name, replier_agent";

/// Format an instant for storage.
///
/// The fixed-width form (nanoseconds, `Z` suffix) keeps text comparison in
/// SQL equal to chronological comparison at full `DateTime` precision.
pub fn format_timestamp(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

/// Widen microsecond timestamps written by earlier versions to nanoseconds.
const WIDEN_TIMESTAMPS: &str = r#"
UPDATE tickets SET created_at = substr(created_at, 1, 26) || '000Z'
    WHERE length(created_at) = 27;
UPDATE tickets SET last_activity_at = substr(last_activity_at, 1, 26) || '000Z'
    WHERE length(last_activity_at) = 27;
UPDATE replies SET created_at = substr(created_at, 1, 26) || '000Z'
    WHERE length(created_at) = 27;
"#;

fn conversion_error(message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        0,
        rusqlite::types::Type::Text,
        Box::new(Error::CorruptedData(message)),
    )
}

/// Parse an RFC3339 timestamp from the database.
fn parse_timestamp(
    value: &str,
    column: &str,
) -> std::result::Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| conversion_error(format!("invalid timestamp '{value}' in column '{column}'")))
}

/// Parse a JSON column from the database.
fn parse_json<T: serde::de::DeserializeOwned>(
    value: &str,
    column: &str,
) -> std::result::Result<T, rusqlite::Error> {
    serde_json::from_str(value)
        .map_err(|_| conversion_error(format!("invalid JSON in column '{column}'")))
}

fn ticket_from_row(row: &Row<'_>) -> std::result::Result<Ticket, rusqlite::Error> {
    let labels: String = row.get(3)?;
    let created: String = row.get(8)?;
    let last_activity: String = row.get(9)?;
    let cc: String = row.get(20)?;

    Ok(Ticket {
        id: row.get(0)?,
        source_type: row.get(1)?,
        source: row.get(2)?,
        labels: parse_json(&labels, "labels")?,
        subject: row.get(4)?,
        replies_count: row.get(5)?,
        agent_replies_count: row.get(6)?,
        comments_count: row.get(7)?,
        created_at: parse_timestamp(&created, "created_at")?,
        last_activity_at: parse_timestamp(&last_activity, "last_activity_at")?,
        unanswered: row.get(10)?,
        closed: row.get(11)?,
        private: row.get(12)?,
        trash: row.get(13)?,
        draft: row.get(14)?,
        starred: row.get(15)?,
        current_team_assignee_id: row.get(16)?,
        current_team_assignee_name: row.get(17)?,
        current_user_assignee_id: row.get(18)?,
        current_user_assignee_name: row.get(19)?,
        cc: parse_json::<Vec<CcEntry>>(&cc, "cc")?,
        requester_id: row.get(21)?,
        requester_name: row.get(22)?,
        requester_email: row.get(23)?,
    })
}

fn reply_from_row(row: &Row<'_>) -> std::result::Result<Reply, rusqlite::Error> {
    let created: String = row.get(2)?;
    Ok(Reply {
        id: row.get(0)?,
        ticket_id: row.get(1)?,
        created_at: parse_timestamp(&created, "created_at")?,
        replier_id: row.get(3)?,
        replier_email: row.get(4)?,
        replier_name: row.get(5)?,
        replier_agent: row.get(6)?,
    })
}

/// Run schema creation on a database connection.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    conn.execute_batch(WIDEN_TIMESTAMPS)?;
    Ok(())
}

/// SQLite database connection with ticket store operations.
pub struct Database {
    /// The underlying SQLite connection.
    pub conn: Connection,
}

impl Database {
    /// Open a database connection at the given path, creating and migrating if needed.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;",
        )?;

        let db = Database { conn };
        run_migrations(&db.conn)?;
        Ok(db)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Database { conn };
        run_migrations(&db.conn)?;
        Ok(db)
    }

    /// Insert a ticket, replacing any stored ticket with the same id.
    pub fn upsert_ticket(&self, ticket: &Ticket) -> Result<()> {
        let labels = serde_json::to_string(&ticket.labels)?;
        let cc = serde_json::to_string(&ticket.cc)?;
        self.conn.execute(
            &format!(
                "INSERT OR REPLACE INTO tickets ({TICKET_COLUMNS})
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12,
                         ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22, ?23, ?24)"
            ),
            params![
                ticket.id,
                ticket.source_type,
                ticket.source,
                labels,
                ticket.subject,
                ticket.replies_count,
                ticket.agent_replies_count,
                ticket.comments_count,
                format_timestamp(&ticket.created_at),
                format_timestamp(&ticket.last_activity_at),
                ticket.unanswered,
                ticket.closed,
                ticket.private,
                ticket.trash,
                ticket.draft,
                ticket.starred,
                ticket.current_team_assignee_id,
                ticket.current_team_assignee_name,
                ticket.current_user_assignee_id,
                ticket.current_user_assignee_name,
                cc,
                ticket.requester_id,
                ticket.requester_name,
                ticket.requester_email,
            ],
        )?;
        Ok(())
    }

    /// Insert a reply, replacing any stored reply with the same id.
    pub fn upsert_reply(&self, reply: &Reply) -> Result<()> {
        self.conn.execute(
            &format!(
                "INSERT OR REPLACE INTO replies ({REPLY_COLUMNS})
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"
            ),
            params![
                reply.id,
                reply.ticket_id,
                format_timestamp(&reply.created_at),
                reply.replier_id,
                reply.replier_email,
                reply.replier_name,
                reply.replier_agent,
            ],
        )?;
        Ok(())
    }

    /// Get a ticket by id.
    pub fn get_ticket(&self, id: i64) -> Result<Ticket> {
        let ticket = self
            .conn
            .query_row(
                &format!("SELECT {TICKET_COLUMNS} FROM tickets WHERE id = ?1"),
                params![id],
                ticket_from_row,
            )
            .optional()?;

        ticket.ok_or(Error::TicketNotFound(id))
    }

    /// Get all replies stored for a ticket, in no particular order.
    pub fn replies_for_ticket(&self, ticket_id: i64) -> Result<Vec<Reply>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {REPLY_COLUMNS} FROM replies WHERE ticket_id = ?1"
        ))?;

        let replies = stmt
            .query_map(params![ticket_id], reply_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(replies)
    }

    /// List tickets created within `[since, until]`.
    ///
    /// Each bound is inclusive and independently optional. Results are
    /// ordered by creation time, then id.
    pub fn tickets_created_between(
        &self,
        since: Option<DateTime<Utc>>,
        until: Option<DateTime<Utc>>,
    ) -> Result<Vec<Ticket>> {
        let mut sql = format!("SELECT {TICKET_COLUMNS} FROM tickets");
        let mut conditions = Vec::new();
        let mut params_vec: Vec<String> = Vec::new();

        if let Some(since) = since {
            conditions.push("created_at >= ?");
            params_vec.push(format_timestamp(&since));
        }
        if let Some(until) = until {
            conditions.push("created_at <= ?");
            params_vec.push(format_timestamp(&until));
        }

        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }
        sql.push_str(" ORDER BY created_at, id");

        let mut stmt = self.conn.prepare(&sql)?;
        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec
            .iter()
            .map(|s| s as &dyn rusqlite::ToSql)
            .collect();

        let tickets = stmt
            .query_map(params_refs.as_slice(), ticket_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(tickets)
    }

    /// Count stored tickets.
    pub fn count_tickets(&self) -> Result<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM tickets", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Count stored replies.
    pub fn count_replies(&self) -> Result<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM replies", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Most recent `last_activity_at` across stored tickets.
    pub fn latest_activity(&self) -> Result<Option<DateTime<Utc>>> {
        let latest: Option<String> =
            self.conn
                .query_row("SELECT MAX(last_activity_at) FROM tickets", [], |row| {
                    row.get(0)
                })?;

        latest
            .map(|value| {
                DateTime::parse_from_rfc3339(&value)
                    .map(|dt| dt.with_timezone(&Utc))
                    .map_err(|_| {
                        Error::CorruptedData(format!("invalid timestamp '{value}' in tickets"))
                    })
            })
            .transpose()
    }
}

#[cfg(test)]
#[path = "db_tests.rs"]
mod tests;
