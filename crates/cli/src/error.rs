// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

use crate::normalize::NormalizationError;

/// All possible errors that can occur in the tixrs library.
///
/// Errors provide user-friendly messages with hints for common issues.
#[derive(Debug, Error)]
pub enum Error {
    #[error("fetch error: {resource} returned status {status}\n  hint: check helpdesk.company and the API key")]
    Fetch { resource: String, status: u16 },

    #[error("transport error: {resource}: {source}\n  hint: check helpdesk.base_url and the network")]
    Transport {
        resource: String,
        source: reqwest::Error,
    },

    #[error("normalization error: {0}")]
    Normalization(#[from] NormalizationError),

    #[error("store error: {0}")]
    Store(#[from] tix_core::Error),

    #[error("store error: {record}: {source}")]
    StoreWrite {
        record: String,
        source: tix_core::Error,
    },

    #[error("configuration missing: {field}\n  hint: set it in tix.toml (see --config)")]
    ConfigurationMissing { field: String },

    #[error("config error: {0}")]
    Config(String),

    #[error("invalid timezone '{0}'\n  hint: use an IANA name such as 'Asia/Kolkata' or 'UTC'")]
    InvalidTimezone(String),

    #[error("invalid date '{value}'\n  hint: use YYYY-MM-DD or an RFC 3339 timestamp")]
    InvalidDate { value: String },

    #[error("store is busy: {lock} is held by another tix process")]
    StoreBusy { lock: String },

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("spreadsheet error: {0}")]
    Sheet(#[from] rust_xlsxwriter::XlsxError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

}

/// Result type alias using the library's Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
