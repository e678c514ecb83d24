//! i18n
//!
//! Translation tables for user-facing strings.
//!
//! The language comes from `gui.language` in the user config. When it is
//! `auto`, the locale environment (`LC_ALL`, then `LANG`) decides: a value
//! starting with `nl` selects Dutch, anything else English.

mod dutch;
mod english;

use crate::core::config::UserConfig;

/// Every user-facing string the application prints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationSet {
    pub error_occurred: &'static str,
    pub not_a_repository: &'static str,
    pub bare_repository: &'static str,
    pub repository_access_denied: &'static str,
    pub log_file_missing: &'static str,
    pub tailing_log_file: &'static str,
    pub filter_mode_banner: &'static str,
    pub branch_label: &'static str,
    pub detached_head: &'static str,
    pub operation_in_progress: &'static str,
    pub staged_label: &'static str,
    pub unstaged_label: &'static str,
    pub untracked_label: &'static str,
    pub clean_worktree: &'static str,
    pub no_commits: &'static str,
    pub no_branches: &'static str,
    pub no_stashes: &'static str,
    pub no_reflog: &'static str,
    pub unknown_key: &'static str,
    pub keybindings_title: &'static str,
    pub prompt: &'static str,
    pub goodbye: &'static str,
}

impl TranslationSet {
    /// Translation set for a language code.
    ///
    /// Unknown codes fall back to English.
    pub fn for_language(code: &str) -> Self {
        match code {
            "nl" => dutch::translations(),
            _ => english::translations(),
        }
    }

    /// Translation set selected by the user config.
    pub fn from_config(config: &UserConfig) -> Self {
        let code = match config.gui.language.as_str() {
            "auto" => detect_language(),
            other => other.to_string(),
        };
        Self::for_language(&code)
    }
}

/// Two-letter language code from the locale environment.
fn detect_language() -> String {
    ["LC_ALL", "LANG"]
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|value| !value.is_empty())
        .map(|value| language_from_locale(&value))
        .unwrap_or_else(|| "en".to_string())
}

/// Extract the language part of a locale such as `nl_NL.UTF-8`.
fn language_from_locale(locale: &str) -> String {
    locale
        .split(['_', '.', '@', '-'])
        .next()
        .unwrap_or("en")
        .to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::GuiConfig;

    #[test]
    fn locale_language_part() {
        assert_eq!(language_from_locale("nl_NL.UTF-8"), "nl");
        assert_eq!(language_from_locale("en-US"), "en");
        assert_eq!(language_from_locale("C"), "c");
    }

    #[test]
    fn unknown_language_falls_back_to_english() {
        assert_eq!(
            TranslationSet::for_language("xx"),
            TranslationSet::for_language("en")
        );
    }

    #[test]
    fn explicit_config_language_wins() {
        let config = UserConfig {
            gui: GuiConfig {
                language: "nl".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(
            TranslationSet::from_config(&config),
            TranslationSet::for_language("nl")
        );
    }

    #[test]
    fn dutch_differs_from_english() {
        let en = TranslationSet::for_language("en");
        let nl = TranslationSet::for_language("nl");
        assert_ne!(en.error_occurred, nl.error_occurred);
        assert_ne!(en.not_a_repository, nl.not_a_repository);
    }
}
