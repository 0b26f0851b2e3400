// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Mirroring of helpdesk tickets into the local store.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ Orchestrator │────►│ TicketSource │────►│   Helpdesk   │
//! │  (one pass)  │◄────│   (trait)    │◄────│   REST API   │
//! └──────────────┘     └──────────────┘     └──────────────┘
//!        │
//!        ▼ normalize + upsert
//! ┌──────────────┐
//! │   Database   │  (tickets, replies)
//! └──────────────┘
//! ```
//!
//! # Features
//!
//! - Lazy page-by-page fetch with a fixed page size and sort key
//! - One unpaged reply fetch per ticket
//! - Skip-and-count of malformed records, or strict abort
//! - Injectable source trait for testing

mod http;
mod orchestrator;
mod source;

pub use http::HttpTicketSource;
pub use orchestrator::{Orchestrator, SyncOptions, SyncSummary};
pub use source::{ReplyList, TicketFilter, TicketPage, TicketQuery, TicketSource};

#[cfg(test)]
pub(crate) mod test_helpers;
