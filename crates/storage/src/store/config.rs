#![forbid(unsafe_code)]

use super::StoreError;
use chk_core::dates::DEFAULT_MAX_TARGET_DAYS;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

const STORAGE_DIR_ENV: &str = "CHECKLIST_STORAGE_DIR";
const DB_FILE_ENV: &str = "CHECKLIST_DB_FILE";
const BUSY_TIMEOUT_ENV: &str = "CHECKLIST_BUSY_TIMEOUT_MS";
const MODIFIER_ENV: &str = "CHECKLIST_MODIFIER";
const MAX_TARGET_DAYS_ENV: &str = "CHECKLIST_MAX_TARGET_DAYS";

const DEFAULT_STORAGE_DIR: &str = ".checklists";
const DEFAULT_DB_FILE: &str = "checklists.db";
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_MODIFIER: &str = "admin";

/// Store settings. Every field has a default, so a TOML document only needs
/// the keys it wants to change.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    pub storage_dir: PathBuf,
    pub db_file_name: String,
    /// Upper bound on how long a writer waits for the database write lock.
    pub busy_timeout_ms: u64,
    /// Tag written to `modified_by` on every touched row.
    pub modifier: String,
    pub max_target_days: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            db_file_name: DEFAULT_DB_FILE.to_string(),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            modifier: DEFAULT_MODIFIER.to_string(),
            max_target_days: DEFAULT_MAX_TARGET_DAYS,
        }
    }
}

impl StoreConfig {
    pub fn for_dir(storage_dir: impl AsRef<Path>) -> Self {
        Self {
            storage_dir: storage_dir.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, StoreError> {
        let config: Self =
            toml::from_str(raw).map_err(|err| StoreError::Config(err.message().to_string()))?;
        config.validate()
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Applies `CHECKLIST_*` environment variables on top of `self`.
    pub fn with_env_overrides(self) -> Result<Self, StoreError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, StoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = non_empty(lookup(STORAGE_DIR_ENV)) {
            self.storage_dir = PathBuf::from(dir);
        }
        if let Some(file) = non_empty(lookup(DB_FILE_ENV)) {
            self.db_file_name = file;
        }
        if let Some(raw) = non_empty(lookup(BUSY_TIMEOUT_ENV)) {
            self.busy_timeout_ms = raw
                .parse()
                .map_err(|_| StoreError::Config(format!("{BUSY_TIMEOUT_ENV} must be an integer")))?;
        }
        if let Some(modifier) = non_empty(lookup(MODIFIER_ENV)) {
            self.modifier = modifier;
        }
        if let Some(raw) = non_empty(lookup(MAX_TARGET_DAYS_ENV)) {
            self.max_target_days = raw.parse().map_err(|_| {
                StoreError::Config(format!("{MAX_TARGET_DAYS_ENV} must be an integer"))
            })?;
        }
        self.validate()
    }

    pub fn db_path(&self) -> PathBuf {
        self.storage_dir.join(&self.db_file_name)
    }

    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }

    fn validate(self) -> Result<Self, StoreError> {
        if self.db_file_name.trim().is_empty() {
            return Err(StoreError::Config("db_file_name must not be empty".to_string()));
        }
        if self.modifier.trim().is_empty() {
            return Err(StoreError::Config("modifier must not be empty".to_string()));
        }
        Ok(self)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
}
