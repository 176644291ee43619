//! Command-layer settings, read from an optional JSON file.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use devutil_core::identifier::{DEFAULT_NANOID_SIZE, MAX_BATCH};
use devutil_core::totp::{DEFAULT_QR_ENDPOINT, DEFAULT_WINDOW};

/// Tunables for the command layer. All fields have defaults via [`Default`],
/// so a partial file only overrides what it names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CommandConfig {
    /// Most identifiers one generate call may return.
    #[serde(default = "default_max_batch")]
    pub max_batch: usize,

    /// ± windows accepted by `validate_totp_code` when the caller gives none.
    #[serde(default = "default_validation_window")]
    pub default_validation_window: u32,

    /// Nano ID length when the caller gives none.
    #[serde(default = "default_nanoid_size")]
    pub default_nanoid_size: usize,

    /// QR renderer the provisioning URI is appended to.
    #[serde(default = "default_qr_code_endpoint")]
    pub qr_code_endpoint: String,
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self {
            max_batch: default_max_batch(),
            default_validation_window: default_validation_window(),
            default_nanoid_size: default_nanoid_size(),
            qr_code_endpoint: default_qr_code_endpoint(),
        }
    }
}

const fn default_max_batch() -> usize {
    MAX_BATCH
}
const fn default_validation_window() -> u32 {
    DEFAULT_WINDOW
}
const fn default_nanoid_size() -> usize {
    DEFAULT_NANOID_SIZE
}
fn default_qr_code_endpoint() -> String {
    DEFAULT_QR_ENDPOINT.into()
}

/// Why a config file could not be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("invalid config file: {0}")]
    Parse(#[from] serde_json::Error),
}

impl CommandConfig {
    /// Load settings from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or is not valid JSON.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}
