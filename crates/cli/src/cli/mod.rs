// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

mod args;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

pub use args::TicketFilterArgs;

/// Parse a string that must not be empty or whitespace-only.
fn non_empty_string(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        Err("cannot be empty".to_string())
    } else {
        Ok(s.to_string())
    }
}

#[derive(Parser, Debug)]
#[command(name = "tix")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Mirror helpdesk tickets locally and report response times")]
#[command(
    long_about = "Mirror helpdesk tickets and their replies into a local SQLite store,\n\
    then derive a per-ticket first-response and close-time report."
)]
pub struct Cli {
    /// Path to the config file (default: tix.toml, searched upward)
    #[arg(short = 'C', long = "config", global = true, value_name = "path")]
    pub config: Option<PathBuf>,

    /// Increase diagnostic output (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch tickets and replies from the helpdesk into the local store
    #[command(after_help = "\
Examples:
  tix sync                          Mirror open tickets
  tix sync --archived               Include archived (closed) tickets
  tix sync --label billing -v       Only tickets labeled billing, with progress
  tix sync --strict                 Abort on the first malformed record")]
    Sync {
        /// Include archived tickets
        #[arg(long)]
        archived: bool,

        /// Tickets per page (overrides sync.page_size)
        #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
        page_size: Option<u32>,

        /// Sort key sent to the helpdesk (overrides sync.sort_by)
        #[arg(long, value_name = "KEY", value_parser = non_empty_string)]
        sort_by: Option<String>,

        /// Abort on the first malformed record instead of skipping it
        #[arg(long)]
        strict: bool,

        #[command(flatten)]
        filter: TicketFilterArgs,
    },

    /// Write the response-time report for stored tickets
    #[command(after_help = "\
Examples:
  tix report                                    All stored tickets
  tix report --since 2024-01-01 --until 2024-01-31
  tix report --name january                     Write xlsx/january.xlsx")]
    Report {
        /// Earliest creation time, inclusive (YYYY-MM-DD or RFC 3339)
        #[arg(long, value_name = "DATE")]
        since: Option<String>,

        /// Latest creation time, inclusive (YYYY-MM-DD or RFC 3339)
        #[arg(long, value_name = "DATE")]
        until: Option<String>,

        /// File name of the workbook, without .xlsx
        #[arg(long, short, default_value = "myfile", value_parser = non_empty_string)]
        name: String,

        /// Drop whole days from FRT and CT, as older reports did
        #[arg(long)]
        legacy_durations: bool,
    },

    /// Show what the local store holds
    Status,

    /// Generate shell completions
    #[command(arg_required_else_help = true)]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[cfg(test)]
#[path = "../cli_tests/mod.rs"]
mod tests;
