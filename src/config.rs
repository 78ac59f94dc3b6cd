//! Runtime configuration loaded from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;
use std::str::FromStr;

use crate::consts::{CLICK_THRESHOLD_PX, VIEWPORT_SAVE_DEBOUNCE_MS};
use crate::storage::{FileStorage, MemoryStorage};
use crate::validate::Locale;

const DEFAULT_DATA_DIR: &str = ".vortex";

/// Tuning knobs for the canvas and its storage.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Directory for [`FileStorage`].
    pub data_dir: PathBuf,
    /// Quiet period before a viewport change is persisted.
    pub viewport_debounce_ms: u64,
    /// Net pointer travel below which a gesture is a click.
    pub click_threshold_px: f64,
    /// Storage capacity in bytes; `0` means unlimited.
    pub storage_quota_bytes: u64,
    /// Language for user-facing messages.
    pub locale: Locale,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            viewport_debounce_ms: VIEWPORT_SAVE_DEBOUNCE_MS,
            click_threshold_px: CLICK_THRESHOLD_PX,
            storage_quota_bytes: 0,
            locale: Locale::default(),
        }
    }
}

impl Config {
    /// Read `VORTEX_*` variables, falling back to defaults for missing or invalid values.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            data_dir: env_parse("VORTEX_DATA_DIR", defaults.data_dir),
            viewport_debounce_ms: env_parse("VORTEX_VIEWPORT_DEBOUNCE_MS", defaults.viewport_debounce_ms),
            click_threshold_px: env_parse("VORTEX_CLICK_THRESHOLD_PX", defaults.click_threshold_px),
            storage_quota_bytes: env_parse("VORTEX_STORAGE_QUOTA_BYTES", defaults.storage_quota_bytes),
            locale: env_parse("VORTEX_LOCALE", defaults.locale),
        }
    }

    /// File storage rooted at `data_dir`, with the configured quota.
    #[must_use]
    pub fn file_storage(&self) -> FileStorage {
        let storage = FileStorage::new(&self.data_dir);
        if self.storage_quota_bytes > 0 {
            storage.with_quota(self.storage_quota_bytes)
        } else {
            storage
        }
    }

    /// Empty in-memory storage with the configured quota.
    #[must_use]
    pub fn memory_storage(&self) -> MemoryStorage {
        if self.storage_quota_bytes == 0 {
            return MemoryStorage::new();
        }
        MemoryStorage::with_quota(usize::try_from(self.storage_quota_bytes).unwrap_or(usize::MAX))
    }
}

/// Parse `key` from the environment, or return `default` when unset or unparseable.
pub fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!(key, value = %raw, "ignoring unparseable environment value");
                default
            }
        },
        Err(_) => default,
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "es" => Ok(Locale::Es),
            "en" => Ok(Locale::En),
            other => Err(format!("unknown locale: {other}")),
        }
    }
}
