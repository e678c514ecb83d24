//! core::config
//!
//! Application configuration and loading.
//!
//! # Overview
//!
//! [`AppConfig`] is what the bootstrap hands to the application. It combines:
//! - Static build metadata ([`BuildInfo`])
//! - The `--debug` flag
//! - The resolved config directory
//! - The user config loaded from `<config dir>/config.toml`
//!
//! # Config Directory
//!
//! Resolved in order:
//! 1. `$CONFIG_DIR` if set and non-empty
//! 2. `<platform config dir>/gitdeck` (via `dirs`)
//!
//! The directory is created on load. A missing `config.toml` is not an
//! error; defaults are used.
//!
//! # Example
//!
//! ```no_run
//! use gitdeck::core::build::BuildInfo;
//! use gitdeck::core::config::AppConfig;
//!
//! let config = AppConfig::new(BuildInfo::current(), false).unwrap();
//! println!("log limit: {}", config.user.git.log_limit);
//! println!("debug log: {}", config.log_path().display());
//! ```

pub mod schema;

pub use schema::{GitConfig, GuiConfig, KeybindingConfig, UserConfig};

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::build::BuildInfo;

/// Environment variable overriding the config directory.
pub const CONFIG_DIR_ENV: &str = "CONFIG_DIR";

/// File name of the application debug log inside the config directory.
pub const DEBUG_LOG_FILE: &str = "development.log";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("failed to create config directory '{path}': {source}")]
    CreateDirError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("config directory not found")]
    NoConfigDir,
}

/// Everything the application needs to start.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Build metadata
    pub build: BuildInfo,
    /// Debug run: application log goes to [`AppConfig::log_path`]
    pub debug: bool,
    /// Resolved config directory
    pub config_dir: PathBuf,
    /// Loaded user configuration
    pub user: UserConfig,
}

impl AppConfig {
    /// Resolve the config directory and load the user config.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be determined or
    /// created, or if `config.toml` exists but cannot be read, parsed or
    /// validated.
    pub fn new(build: BuildInfo, debug: bool) -> Result<Self, ConfigError> {
        let config_dir = Self::config_dir(&build.name)?;
        Self::load(build, debug, config_dir)
    }

    /// Load from an explicit config directory.
    pub fn load(build: BuildInfo, debug: bool, config_dir: PathBuf) -> Result<Self, ConfigError> {
        fs::create_dir_all(&config_dir).map_err(|e| ConfigError::CreateDirError {
            path: config_dir.clone(),
            source: e,
        })?;

        let path = Self::user_config_file(&config_dir);
        let user = if path.exists() {
            Self::read_user_config(&path)?
        } else {
            UserConfig::default()
        };
        user.validate()?;

        Ok(Self {
            build,
            debug,
            config_dir,
            user,
        })
    }

    /// Resolve the config directory for a program name.
    pub fn config_dir(name: &str) -> Result<PathBuf, ConfigError> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|v| !v.is_empty()) {
            return Ok(PathBuf::from(dir));
        }
        let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(base.join(name))
    }

    /// Get the canonical user config path inside a config directory.
    pub fn user_config_file(config_dir: &Path) -> PathBuf {
        config_dir.join("config.toml")
    }

    /// Read and parse a user config file.
    fn read_user_config(path: &Path) -> Result<UserConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Path of the application debug log.
    pub fn log_path(&self) -> PathBuf {
        self.config_dir.join(DEBUG_LOG_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    fn build() -> BuildInfo {
        BuildInfo::current()
    }

    #[test]
    fn load_missing_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let config = AppConfig::load(build(), false, temp.path().to_path_buf()).unwrap();

        assert_eq!(config.user, UserConfig::default());
        assert!(!config.debug);
    }

    #[test]
    fn load_creates_config_dir() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("nested/gitdeck");

        let config = AppConfig::load(build(), true, dir.clone()).unwrap();

        assert!(dir.is_dir());
        assert_eq!(config.log_path(), dir.join("development.log"));
    }

    #[test]
    fn load_user_config() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("config.toml"),
            r#"
            [gui]
            language = "nl"

            [git]
            log_limit = 5
            "#,
        )
        .unwrap();

        let config = AppConfig::load(build(), false, temp.path().to_path_buf()).unwrap();

        assert_eq!(config.user.gui.language, "nl");
        assert_eq!(config.user.git.log_limit, 5);
    }

    #[test]
    fn parse_error_names_file() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("config.toml"), "[git\nlog_limit = ").unwrap();

        let err = AppConfig::load(build(), false, temp.path().to_path_buf()).unwrap_err();

        assert!(matches!(err, ConfigError::ParseError { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn invalid_value_rejected() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("config.toml"), "[git]\nlog_limit = 0\n").unwrap();

        let result = AppConfig::load(build(), false, temp.path().to_path_buf());
        assert!(matches!(result, Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    #[serial]
    fn config_dir_from_env() {
        let temp = TempDir::new().unwrap();
        std::env::set_var(CONFIG_DIR_ENV, temp.path());

        let dir = AppConfig::config_dir("gitdeck").unwrap();
        assert_eq!(dir, temp.path());

        std::env::remove_var(CONFIG_DIR_ENV);
    }
}
