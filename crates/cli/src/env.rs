// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! All runtime environment variables used by the CLI are defined here
//! with typed accessor functions. The variable name constants are generated
//! by `build.rs` and live in the [`vars`] submodule.

use std::path::PathBuf;

/// Generated environment variable name constants.
pub mod vars {
    include!(concat!(env!("OUT_DIR"), "/env_vars.rs"));
}

/// Returns the value of `TIX_CONFIG` if set.
pub fn config_path() -> Option<PathBuf> {
    std::env::var(vars::TIX_CONFIG)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
}

/// Returns the value of `TIX_API_KEY` if set and non-empty.
pub fn api_key() -> Option<String> {
    std::env::var(vars::TIX_API_KEY)
        .ok()
        .filter(|v| !v.trim().is_empty())
}

/// Returns `true` if `RUST_LOG` is set, in which case it overrides `-v`.
pub fn has_log_filter() -> bool {
    std::env::var(vars::RUST_LOG).is_ok()
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
