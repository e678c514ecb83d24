//! core::config::schema
//!
//! User configuration schema.
//!
//! # Location
//!
//! `<config dir>/config.toml`, where the config dir is `$CONFIG_DIR` if set,
//! otherwise `<platform config dir>/gitdeck`.
//!
//! # Validation
//!
//! Values are validated after parsing: the log limit must be positive and
//! every keybinding must be a single character distinct from the others.

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Languages with a translation table.
pub const LANGUAGES: &[&str] = &["auto", "en", "nl"];

/// User configuration.
///
/// Every section falls back to its defaults when omitted, so an empty file
/// is a valid config.
///
/// # Example
///
/// ```toml
/// [gui]
/// language = "auto"
/// time_format = "%d %b %Y %H:%M"
/// show_file_counts = true
///
/// [git]
/// log_limit = 50
/// show_untracked = true
///
/// [keybinding]
/// quit = "q"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct UserConfig {
    /// Presentation settings
    pub gui: GuiConfig,

    /// Repository settings
    pub git: GitConfig,

    /// Session keys
    pub keybinding: KeybindingConfig,
}

impl UserConfig {
    /// The default configuration rendered as TOML.
    ///
    /// This is what `gitdeck --config` prints.
    pub fn default_toml() -> Result<String, ConfigError> {
        toml::to_string_pretty(&Self::default())
            .map_err(|e| ConfigError::InvalidValue(e.to_string()))
    }

    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.gui.validate()?;
        self.git.validate()?;
        self.keybinding.validate()
    }
}

/// Presentation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GuiConfig {
    /// UI language: "auto" follows the locale
    pub language: String,

    /// `chrono` format string for commit dates
    pub time_format: String,

    /// Show staged/unstaged/untracked counts in the status header
    pub show_file_counts: bool,
}

impl Default for GuiConfig {
    fn default() -> Self {
        Self {
            language: "auto".to_string(),
            time_format: "%d %b %Y %H:%M".to_string(),
            show_file_counts: true,
        }
    }
}

impl GuiConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !LANGUAGES.contains(&self.language.as_str()) {
            return Err(ConfigError::InvalidValue(format!(
                "invalid language '{}', must be one of: {}",
                self.language,
                LANGUAGES.join(", ")
            )));
        }
        if self.time_format.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "time_format cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Repository settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GitConfig {
    /// Maximum number of entries shown in the log and reflog views
    pub log_limit: usize,

    /// Count untracked files in the status view
    pub show_untracked: bool,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            log_limit: 50,
            show_untracked: true,
        }
    }
}

impl GitConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.log_limit == 0 {
            return Err(ConfigError::InvalidValue(
                "log_limit must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Session keys.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct KeybindingConfig {
    pub quit: String,
    pub refresh: String,
    pub status: String,
    pub log: String,
    pub branches: String,
    pub stash: String,
    pub reflog: String,
    pub help: String,
}

impl Default for KeybindingConfig {
    fn default() -> Self {
        Self {
            quit: "q".to_string(),
            refresh: "R".to_string(),
            status: "s".to_string(),
            log: "l".to_string(),
            branches: "b".to_string(),
            stash: "t".to_string(),
            reflog: "r".to_string(),
            help: "?".to_string(),
        }
    }
}

impl KeybindingConfig {
    /// All bindings as `(action, key)` pairs, in help order.
    pub fn entries(&self) -> [(&'static str, &str); 8] {
        [
            ("status", self.status.as_str()),
            ("log", self.log.as_str()),
            ("branches", self.branches.as_str()),
            ("stash", self.stash.as_str()),
            ("reflog", self.reflog.as_str()),
            ("refresh", self.refresh.as_str()),
            ("help", self.help.as_str()),
            ("quit", self.quit.as_str()),
        ]
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let entries = self.entries();
        for (action, key) in &entries {
            if key.chars().count() != 1 {
                return Err(ConfigError::InvalidValue(format!(
                    "keybinding for {} must be a single character, got '{}'",
                    action, key
                )));
            }
        }
        for (i, (action, key)) in entries.iter().enumerate() {
            if let Some((other, _)) = entries[i + 1..].iter().find(|(_, k)| k == key) {
                return Err(ConfigError::InvalidValue(format!(
                    "key '{}' is bound to both {} and {}",
                    key, action, other
                )));
            }
        }
        Ok(())
    }
}
