// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration loading and settings resolution.
//!
//! Configuration is stored in `tix.toml`, found by walking up from the current
//! directory unless a path is given explicitly. It includes:
//! - `[store]`: where the SQLite mirror lives
//! - `[helpdesk]`: company subdomain, API key and HTTP timeout
//! - `[sync]`: page size, sort key and strict normalization
//! - `[report]`: rendering timezone, output directory, duration arithmetic
//!
//! The file is parsed into [`Config`], then resolved once into the immutable
//! [`Settings`] value handed to the sync orchestrator and report engine.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

pub const CONFIG_FILE_NAME: &str = "tix.toml";
const DEFAULT_DB_FILE_NAME: &str = "tickets.db";
const DEFAULT_PAGE_SIZE: u32 = 99;
const DEFAULT_SORT_BY: &str = "last_activity";
const DEFAULT_TIMEZONE: &str = "UTC";
const DEFAULT_OUTPUT_DIR: &str = "xlsx";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Raw contents of `tix.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub helpdesk: HelpdeskConfig,
    #[serde(default)]
    pub sync: SyncConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Database path, relative to the directory holding `tix.toml`.
    #[serde(default = "default_db_path")]
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HelpdeskConfig {
    /// Company subdomain (`<company>.supportbee.com`).
    pub company: Option<String>,
    pub api_key: Option<String>,
    /// Overrides the URL derived from `company`.
    pub base_url: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_sort_by")]
    pub sort_by: String,
    /// Abort the pass on the first malformed record instead of skipping it.
    #[serde(default)]
    pub strict: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// IANA timezone used when rendering instants.
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    /// Reproduce the day-discarding duration arithmetic of older reports.
    #[serde(default)]
    pub legacy_durations: bool,
}

fn default_db_path() -> String {
    DEFAULT_DB_FILE_NAME.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_sort_by() -> String {
    DEFAULT_SORT_BY.to_string()
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

fn default_output_dir() -> String {
    DEFAULT_OUTPUT_DIR.to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            path: default_db_path(),
        }
    }
}

impl Default for HelpdeskConfig {
    fn default() -> Self {
        HelpdeskConfig {
            company: None,
            api_key: None,
            base_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        SyncConfig {
            page_size: default_page_size(),
            sort_by: default_sort_by(),
            strict: false,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            timezone: default_timezone(),
            output_dir: default_output_dir(),
            legacy_durations: false,
        }
    }
}

impl Config {
    /// Loads configuration from the given file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::ConfigurationMissing {
                field: format!("config file {}", path.display()),
            });
        }
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config: {}", e)))?;
        Self::parse(&content)
    }

    /// Parses configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("failed to parse config: {}", e)))
    }
}

/// Credentials and endpoint for the helpdesk API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpdeskSettings {
    pub base_url: String,
    pub api_key: String,
    pub timeout: Duration,
}

/// Sync pass defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncSettings {
    pub page_size: u32,
    pub sort_by: String,
    pub strict: bool,
}

/// Report rendering settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSettings {
    pub timezone: Tz,
    pub output_dir: PathBuf,
    pub legacy_durations: bool,
}

/// Fully resolved, immutable settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub db_path: PathBuf,
    helpdesk: HelpdeskConfig,
    api_key_override: Option<String>,
    pub sync: SyncSettings,
    pub report: ReportSettings,
}

impl Settings {
    /// Resolve a parsed config against the directory it was loaded from.
    ///
    /// `api_key_override` (from `TIX_API_KEY`) takes precedence over the file.
    /// Helpdesk credentials are checked lazily by [`Settings::helpdesk`] so
    /// that commands that never touch the network do not require them.
    pub fn resolve(
        config: Config,
        config_dir: &Path,
        api_key_override: Option<String>,
    ) -> Result<Self> {
        let timezone: Tz = config
            .report
            .timezone
            .parse()
            .map_err(|_| Error::InvalidTimezone(config.report.timezone.clone()))?;

        if config.sync.page_size == 0 {
            return Err(Error::Config("sync.page_size must be at least 1".to_string()));
        }
        if config.sync.sort_by.trim().is_empty() {
            return Err(Error::ConfigurationMissing {
                field: "sync.sort_by".to_string(),
            });
        }

        Ok(Settings {
            db_path: resolve_path(config_dir, &config.store.path),
            helpdesk: config.helpdesk,
            api_key_override,
            sync: SyncSettings {
                page_size: config.sync.page_size,
                sort_by: config.sync.sort_by,
                strict: config.sync.strict,
            },
            report: ReportSettings {
                timezone,
                output_dir: resolve_path(config_dir, &config.report.output_dir),
                legacy_durations: config.report.legacy_durations,
            },
        })
    }

    /// Helpdesk endpoint and credentials.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigurationMissing`] if the company or API key is
    /// absent.
    pub fn helpdesk(&self) -> Result<HelpdeskSettings> {
        let api_key = self
            .api_key_override
            .clone()
            .or_else(|| non_blank(self.helpdesk.api_key.as_deref()))
            .ok_or_else(|| Error::ConfigurationMissing {
                field: "helpdesk.api_key".to_string(),
            })?;

        let base_url = match non_blank(self.helpdesk.base_url.as_deref()) {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => {
                let company = non_blank(self.helpdesk.company.as_deref()).ok_or_else(|| {
                    Error::ConfigurationMissing {
                        field: "helpdesk.company".to_string(),
                    }
                })?;
                format!("https://{company}.supportbee.com")
            }
        };

        Ok(HelpdeskSettings {
            base_url,
            api_key,
            timeout: Duration::from_secs(self.helpdesk.timeout_secs),
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

fn resolve_path(base: &Path, value: &str) -> PathBuf {
    let path = Path::new(value);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Find `tix.toml` by walking up from the current directory.
pub fn find_config() -> Result<PathBuf> {
    let start = std::env::current_dir()?;
    let mut current = start.clone();
    loop {
        let candidate = current.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Ok(candidate);
        }
        if !current.pop() {
            return Err(Error::ConfigurationMissing {
                field: format!(
                    "{} (searched from {} upward)",
                    CONFIG_FILE_NAME,
                    start.display()
                ),
            });
        }
    }
}

/// Load and resolve settings from an explicit path or the nearest `tix.toml`.
pub fn load_settings(explicit: Option<PathBuf>, api_key_override: Option<String>) -> Result<Settings> {
    let path = match explicit {
        Some(path) => path,
        None => find_config()?,
    };
    let config = Config::load(&path)?;
    let config_dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    Settings::resolve(config, config_dir, api_key_override)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
