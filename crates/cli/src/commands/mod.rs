// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod report;
pub mod status;
pub mod sync;

use tix_core::Database;

use crate::config::Settings;
use crate::error::Result;
use crate::lock::StoreLock;

/// How a command intends to use the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Writes; excludes every other tix process.
    Exclusive,
    /// Reads; excludes only writers.
    Shared,
}

/// An open store together with the lock guarding it.
pub struct Store {
    pub db: Database,
    _lock: StoreLock,
}

/// Helper to lock and open the store named by the settings.
pub fn open_store(settings: &Settings, access: Access) -> Result<Store> {
    let lock = match access {
        Access::Exclusive => StoreLock::exclusive(&settings.db_path)?,
        Access::Shared => StoreLock::shared(&settings.db_path)?,
    };
    let db = Database::open(&settings.db_path)?;
    tracing::debug!(
        path = %settings.db_path.display(),
        lock = %lock.path().display(),
        ?access,
        "opened store"
    );
    Ok(Store { db, _lock: lock })
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
