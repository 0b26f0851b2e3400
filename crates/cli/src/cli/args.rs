// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared argument structs for CLI commands.

use chrono::NaiveDate;
use clap::Args;

use crate::sync::TicketFilter;

/// Remote-side filters narrowing which tickets `sync` fetches.
#[derive(Args, Clone, Debug, Default)]
pub struct TicketFilterArgs {
    /// Only tickets assigned to this user id (or "me", "none")
    #[arg(long, value_name = "USER")]
    pub assigned_user: Option<String>,

    /// Only tickets assigned to this team id (or "mine", "none")
    #[arg(long, value_name = "TEAM")]
    pub assigned_team: Option<String>,

    /// Only tickets carrying this label
    #[arg(long, short)]
    pub label: Option<String>,

    /// Only tickets active since this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub since: Option<NaiveDate>,

    /// Only tickets active until this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub until: Option<NaiveDate>,

    /// Only tickets from these requesters (comma-separated or repeated)
    #[arg(long = "requester-email", value_name = "EMAIL", value_delimiter = ',')]
    pub requester_emails: Vec<String>,
}

impl From<TicketFilterArgs> for TicketFilter {
    fn from(args: TicketFilterArgs) -> Self {
        TicketFilter {
            assigned_user: args.assigned_user,
            assigned_team: args.assigned_team,
            label: args.label,
            since: args.since,
            until: args.until,
            requester_emails: args.requester_emails,
        }
    }
}
