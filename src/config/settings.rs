use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::crypto::kdf::{Pbkdf2Params, DEFAULT_ITERATIONS};
use crate::errors::{PassVaultError, Result};

/// Project-level configuration, loaded from `.passvault.toml`.
///
/// Every field has a sensible default so PassVault works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Directory (relative to project root) holding the store file.
    #[serde(default = "default_store_dir")]
    pub store_dir: String,

    /// Name of the store file inside `store_dir`.
    #[serde(default = "default_store_file")]
    pub store_file: String,

    /// Stable user identifier (usually the account email) used to
    /// compute the key derivation salt.
    #[serde(default)]
    pub identifier: Option<String>,

    /// PBKDF2 round count (default: 100 000, also the minimum).
    #[serde(default = "default_pbkdf2_iterations")]
    pub pbkdf2_iterations: u32,

    /// Log filter used when `PASSVAULT_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_store_dir() -> String {
    ".passvault".to_string()
}

fn default_store_file() -> String {
    "vault.json".to_string()
}

fn default_pbkdf2_iterations() -> u32 {
    DEFAULT_ITERATIONS
}

fn default_log_level() -> String {
    "warn".to_string()
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_dir: default_store_dir(),
            store_file: default_store_file(),
            identifier: None,
            pbkdf2_iterations: default_pbkdf2_iterations(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the project root.
    const FILE_NAME: &'static str = ".passvault.toml";

    /// Load settings from `<project_dir>/.passvault.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            PassVaultError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// Build the full path to the store file.
    ///
    /// `store_dir_override` (from `--store-dir`) replaces `store_dir`.
    /// Example: `project_dir/.passvault/vault.json`
    pub fn store_path(&self, project_dir: &Path, store_dir_override: Option<&str>) -> PathBuf {
        project_dir
            .join(store_dir_override.unwrap_or(&self.store_dir))
            .join(&self.store_file)
    }

    /// Convert the PBKDF2 settings into crypto-layer params.
    pub fn pbkdf2_params(&self) -> Pbkdf2Params {
        Pbkdf2Params {
            iterations: self.pbkdf2_iterations,
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────
