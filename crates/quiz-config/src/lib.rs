//! # quiz-config
//!
//! Layered configuration loading using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`QUIZ_*` prefix, `__` as separator)
//! 2. Project-level `quiz.toml`
//! 3. User-level `~/.config/quiz/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `QUIZ_DATABASE__PATH` -> `database.path`,
//! `QUIZ_SERVER__BIND` -> `server.bind`, and so on.
//!
//! # Usage
//!
//! ```no_run
//! use quiz_config::QuizConfig;
//!
//! let config = QuizConfig::load_with_dotenv().expect("config");
//! println!("database at {}", config.database.path);
//! ```

mod database;
mod error;
mod ingest;
mod server;

pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use ingest::IngestConfig;
pub use server::ServerConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Project-local config file name.
pub const LOCAL_CONFIG_FILE: &str = "quiz.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct QuizConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub ingest: IngestConfig,
}

impl QuizConfig {
    /// Extract and validate the merged configuration.
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source fails to parse or the merged values
    /// fail [`Self::validate`].
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration after reading a `.env` file from the current directory.
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Defaults, then the files that exist, then `QUIZ_*` variables.
    ///
    /// Exposed for tests that want to merge extra providers.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // ~/.config/quiz/config.toml
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // ./quiz.toml
        let local_path = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // QUIZ_DATABASE__PATH and friends win over both files.
        figment.merge(Env::prefixed("QUIZ_").split("__"))
    }

    /// Reject values that would only fail later at runtime.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for an empty database path, bind
    /// address, or manifest name.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            ("database.path", &self.database.path),
            ("server.bind", &self.server.bind),
            ("ingest.manifest", &self.ingest.manifest),
        ];
        for (field, value) in checks {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    reason: "must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }

    /// `<config dir>/quiz/config.toml`, when the platform has a config dir.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("quiz").join("config.toml"))
    }
}
