//! Configuration loading and representation.
//!
//! Everything comes from environment variables with usable defaults:
//!
//! | variable | default |
//! |---|---|
//! | `TECHNEXUS_DATA_DIR` | `{os data dir}/technexus` |
//! | `TECHNEXUS_STORAGE_KEY` | `technexus_products` |
//! | `TECHNEXUS_SUBMIT_DELAY_MS` | `800` |

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::storage::{DEFAULT_SLOT, FileKeyValueStore, SlotCatalogStorage, validate_key};
use crate::submission::DEFAULT_SUBMIT_DELAY;

pub const DATA_DIR_VAR: &str = "TECHNEXUS_DATA_DIR";
pub const STORAGE_KEY_VAR: &str = "TECHNEXUS_STORAGE_KEY";
pub const SUBMIT_DELAY_VAR: &str = "TECHNEXUS_SUBMIT_DELAY_MS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var}={value:?} is invalid: {reason}")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("failed to resolve a data directory; set TECHNEXUS_DATA_DIR")]
    NoDataDir,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Directory holding the key-value slot files.
    pub data_dir: PathBuf,
    /// Slot name for the catalog.
    pub storage_key: String,
    /// Simulated latency before a submitted listing is written.
    pub submit_delay: Duration,
}

impl StorefrontConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from an arbitrary variable source (tests pass a map).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_dir = match lookup(DATA_DIR_VAR).filter(|v| !v.trim().is_empty()) {
            Some(dir) => PathBuf::from(dir),
            None => default_data_dir()?,
        };

        let storage_key = lookup(STORAGE_KEY_VAR).unwrap_or_else(|| DEFAULT_SLOT.to_string());
        validate_key(&storage_key).map_err(|err| ConfigError::InvalidValue {
            var: STORAGE_KEY_VAR,
            value: storage_key.clone(),
            reason: err.to_string(),
        })?;

        let submit_delay = match lookup(SUBMIT_DELAY_VAR) {
            Some(raw) => {
                let ms: u64 = raw.trim().parse().map_err(|err: std::num::ParseIntError| {
                    ConfigError::InvalidValue {
                        var: SUBMIT_DELAY_VAR,
                        value: raw.clone(),
                        reason: err.to_string(),
                    }
                })?;
                Duration::from_millis(ms)
            }
            None => DEFAULT_SUBMIT_DELAY,
        };

        Ok(Self {
            data_dir,
            storage_key,
            submit_delay,
        })
    }

    /// File-backed catalog slot described by this config.
    pub fn catalog_storage(&self) -> SlotCatalogStorage<FileKeyValueStore> {
        SlotCatalogStorage::with_key(FileKeyValueStore::new(&self.data_dir), &self.storage_key)
    }
}

/// `{app_data_dir}/technexus`, falling back to `~/.local/share/technexus`.
fn default_data_dir() -> Result<PathBuf, ConfigError> {
    let mut dir = dirs::data_dir()
        .or_else(|| {
            dirs::home_dir().map(|mut h| {
                h.push(".local");
                h.push("share");
                h
            })
        })
        .ok_or(ConfigError::NoDataDir)?;
    dir.push("technexus");
    Ok(dir)
}
