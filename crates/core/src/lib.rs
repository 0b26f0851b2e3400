// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! tix-core: Shared library for the tix helpdesk mirror
//!
//! This crate provides the ticket and reply entities and the SQLite store
//! they are mirrored into.

pub mod db;
pub mod error;
pub mod ticket;

#[cfg(test)]
mod test_support;

pub use db::Database;
pub use error::{Error, Result};
pub use ticket::{CcEntry, Reply, Ticket};
