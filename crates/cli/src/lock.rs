// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Advisory lock guarding the store against concurrent tix processes.
//!
//! A sync pass holds the lock exclusively; reports and status take it shared,
//! so a report never observes a half-finished sync.

use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Held lock on `<db path>.lock`, released on drop.
#[derive(Debug)]
pub struct StoreLock {
    file: File,
    path: PathBuf,
}

impl StoreLock {
    /// Take the lock exclusively, failing immediately if it is held.
    pub fn exclusive(db_path: &Path) -> Result<Self> {
        Self::acquire(db_path, true)
    }

    /// Take the lock shared, failing immediately if it is held exclusively.
    pub fn shared(db_path: &Path) -> Result<Self> {
        Self::acquire(db_path, false)
    }

    /// Path of the lock file for a database.
    pub fn path_for(db_path: &Path) -> PathBuf {
        let mut name = db_path.as_os_str().to_os_string();
        name.push(".lock");
        PathBuf::from(name)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn acquire(db_path: &Path, exclusive: bool) -> Result<Self> {
        let path = Self::path_for(db_path);
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)?;

        let locked = if exclusive {
            FileExt::try_lock_exclusive(&file)
        } else {
            FileExt::try_lock_shared(&file)
        };
        locked.map_err(|_| Error::StoreBusy {
            lock: path.display().to_string(),
        })?;

        tracing::debug!(lock = %path.display(), exclusive, "acquired store lock");
        Ok(StoreLock { file, path })
    }
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

#[cfg(test)]
#[path = "lock_tests.rs"]
mod tests;
