//! # morph-config
//!
//! Layered configuration loading for morph using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`MORPH_*` prefix, `__` as separator)
//! 2. Project-level `.morph/config.toml`
//! 3. User-level `~/.config/morph/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `MORPH_STORAGE__KEY` -> `storage.key`, `MORPH_EXPORT__DIR` -> `export.dir`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use morph_config::MorphConfig;
//!
//! let config = MorphConfig::load_with_dotenv().expect("config");
//! println!("session key: {}", config.storage.key);
//! ```

mod annotate;
mod error;
mod export;
mod storage;

pub use annotate::AnnotateConfig;
pub use error::ConfigError;
pub use export::ExportConfig;
pub use storage::StorageConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the per-project directory holding config and session data.
pub const PROJECT_DIR: &str = ".morph";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MorphConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub annotate: AnnotateConfig,
}

impl MorphConfig {
    /// Load configuration relative to the current directory.
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source fails to parse or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new("."))
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source fails to parse or a value is invalid.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Load configuration for the project rooted at `project_root`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source fails to parse or a value is invalid.
    pub fn load_from(project_root: &Path) -> Result<Self, ConfigError> {
        let config: Self = Self::figment_for(project_root).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain for the current directory.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        Self::figment_for(Path::new("."))
    }

    /// Build the figment provider chain for a given project root.
    #[must_use]
    pub fn figment_for(project_root: &Path) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = project_root.join(PROJECT_DIR).join("config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("MORPH_").split("__"))
    }

    /// Reject values that would make storage or export unusable.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("storage.dir", &self.storage.dir),
            ("storage.key", &self.storage.key),
            ("export.basename", &self.export.basename),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    reason: "must not be empty".to_string(),
                });
            }
        }
        if self.storage.key.contains(['/', '\\']) {
            return Err(ConfigError::InvalidValue {
                field: "storage.key".to_string(),
                reason: "must not contain path separators".to_string(),
            });
        }
        Ok(())
    }

    /// Directory of the session store, resolved against `project_root`.
    #[must_use]
    pub fn storage_dir(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.storage.dir)
    }

    /// Path of the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("morph").join("config.toml"))
    }
}
