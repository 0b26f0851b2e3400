// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! tixrs - Helpdesk ticket mirror and response-time reporting.
//!
//! This crate provides the functionality behind the `tix` CLI: it mirrors
//! tickets and replies from a SupportBee-style helpdesk into a local SQLite
//! store, then derives a per-ticket first-response and close-time report.
//!
//! # Main Components
//!
//! - [`sync`] - Paginated fetch, normalization and idempotent upsert
//! - [`report`] - Report engine and spreadsheet sink
//! - [`config`] - `tix.toml` loading and the resolved [`Settings`]
//! - [`Error`] - Error types for all operations
//!
//! # Example
//!
//! ```rust,ignore
//! use tixrs::config::load_settings;
//! use tixrs::report::{ReportEngine, ReportOptions};
//! use tix_core::Database;
//!
//! let settings = load_settings(None, None)?;
//! let db = Database::open(&settings.db_path)?;
//! let engine = ReportEngine::new(&db, ReportOptions::from_settings(&settings.report));
//! let outcome = engine.build_report(None, None)?;
//! ```

mod cli;
mod commands;
mod env;
mod lock;
pub mod logging;

pub mod config;
pub mod error;
pub mod normalize;
pub mod report;
pub mod sync;

pub use cli::{Cli, Command, TicketFilterArgs};
pub use config::{load_settings, Config, Settings};
pub use error::{Error, Result};

use clap::CommandFactory;
use clap_complete::generate;

/// Execute a CLI command. This is the main entry point for library users
/// and provides a testable way to run commands without process execution.
pub fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.or_else(env::config_path);
    let settings = || load_settings(config_path.clone(), env::api_key());

    match cli.command {
        Command::Sync {
            archived,
            page_size,
            sort_by,
            strict,
            filter,
        } => commands::sync::run(
            &settings()?,
            archived,
            page_size,
            sort_by,
            strict,
            filter.into(),
        ),
        Command::Report {
            since,
            until,
            name,
            legacy_durations,
        } => commands::report::run(
            &settings()?,
            since.as_deref(),
            until.as_deref(),
            &name,
            legacy_durations,
        ),
        Command::Status => commands::status::run(&settings()?),
        Command::Completion { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "tix", &mut std::io::stdout());
            Ok(())
        }
    }
}
