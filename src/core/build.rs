//! core::build
//!
//! Static build metadata.
//!
//! The package version comes from Cargo. Commit, build date and build source
//! are stamped by the release pipeline through compile-time environment
//! variables and fall back to placeholders for local builds:
//!
//! - `GITDECK_COMMIT`
//! - `GITDECK_BUILD_DATE`
//! - `GITDECK_BUILD_SOURCE` (defaults to `unknown`)

/// Program name used for config directories, log files and messages.
pub const PROGRAM_NAME: &str = "gitdeck";

/// Build metadata baked into the binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInfo {
    /// Program name
    pub name: String,
    /// Semantic version
    pub version: String,
    /// Commit hash the binary was built from (empty for local builds)
    pub commit: String,
    /// Build date (empty for local builds)
    pub date: String,
    /// Where the binary came from (release pipeline, package manager, ...)
    pub build_source: String,
}

impl BuildInfo {
    /// Build metadata for the running binary.
    pub fn current() -> Self {
        Self {
            name: PROGRAM_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            commit: option_env!("GITDECK_COMMIT").unwrap_or_default().to_string(),
            date: option_env!("GITDECK_BUILD_DATE")
                .unwrap_or_default()
                .to_string(),
            build_source: option_env!("GITDECK_BUILD_SOURCE")
                .unwrap_or("unknown")
                .to_string(),
        }
    }

    /// The single line printed by `--version`.
    ///
    /// # Example
    ///
    /// ```
    /// use gitdeck::core::build::BuildInfo;
    ///
    /// let build = BuildInfo {
    ///     name: "gitdeck".into(),
    ///     version: "1.2.3".into(),
    ///     commit: "abc123".into(),
    ///     date: "2024-01-01".into(),
    ///     build_source: "release".into(),
    /// };
    /// assert!(build
    ///     .version_line()
    ///     .starts_with("commit=abc123, build date=2024-01-01, build source=release, version=1.2.3"));
    /// ```
    pub fn version_line(&self) -> String {
        format!(
            "commit={}, build date={}, build source={}, version={}, os={}, arch={}",
            self.commit,
            self.date,
            self.build_source,
            self.version,
            std::env::consts::OS,
            std::env::consts::ARCH
        )
    }
}
