//! cli::launch
//!
//! The real [`Host`]: prints version and config, follows the debug log, and
//! launches the application.

use std::io::{self, Write};
use std::marker::PhantomData;
use std::path::PathBuf;

use tracing::info;

use super::dispatch::Host;
use super::failure::classify;
use super::intent::RunIntent;
use super::Fatal;
use crate::app::tail::{LogTail, POLL_INTERVAL};
use crate::app::{Application, Diagnostics};
use crate::core::build::BuildInfo;
use crate::core::config::{AppConfig, UserConfig, DEBUG_LOG_FILE};
use crate::i18n::TranslationSet;

/// Bootstrap actions for application `A`, printing to `W`.
pub struct Bootstrap<A, W = io::Stdout> {
    build: BuildInfo,
    out: W,
    app: PhantomData<fn() -> A>,
}

impl<A: Application> Bootstrap<A> {
    pub fn new(build: BuildInfo) -> Self {
        Self::with_output(build, io::stdout())
    }
}

impl<A: Application, W: Write> Bootstrap<A, W> {
    pub fn with_output(build: BuildInfo, out: W) -> Self {
        Self {
            build,
            out,
            app: PhantomData,
        }
    }

    #[cfg(test)]
    fn into_output(self) -> W {
        self.out
    }

    fn debug_log_path(&self) -> Result<PathBuf, Fatal> {
        Ok(AppConfig::config_dir(&self.build.name)?.join(DEBUG_LOG_FILE))
    }
}

impl<A: Application, W: Write> Host for Bootstrap<A, W> {
    fn version(&mut self) -> Result<(), Fatal> {
        writeln!(self.out, "{}", self.build.version_line())?;
        Ok(())
    }

    fn default_config(&mut self) -> Result<(), Fatal> {
        write!(self.out, "{}", UserConfig::default_toml()?)?;
        Ok(())
    }

    fn tail_logs(&mut self) -> Result<(), Fatal> {
        let path = self.debug_log_path()?;
        let tr = TranslationSet::from_config(&UserConfig::default());

        write!(self.out, "{} {}\n\n", tr.tailing_log_file, path.display())?;
        self.out.flush()?;

        LogTail::open(&path, &tr)?.follow(&mut self.out, POLL_INTERVAL)?;
        Ok(())
    }

    fn launch(&mut self, intent: &RunIntent) -> Result<(), Fatal> {
        launch::<A>(intent, self.build.clone())
    }
}

/// Enter the work tree, build the config, then construct and run `A`.
///
/// # Errors
///
/// Directory, config and log failures surface as their own [`Fatal`]
/// variants. Anything from the application itself is classified into
/// [`Fatal::Report`].
pub fn launch<A: Application>(intent: &RunIntent, build: BuildInfo) -> Result<(), Fatal> {
    if let Some(work_tree) = &intent.work_tree {
        std::env::set_current_dir(work_tree).map_err(|source| Fatal::ChangeDir {
            path: PathBuf::from(work_tree),
            source,
        })?;
    }

    let config = AppConfig::new(build, intent.debug)?;
    let diagnostics = Diagnostics::new(&config)?;
    info!(
        config_dir = %config.config_dir.display(),
        debug = config.debug,
        "launching"
    );

    A::new(&config, &diagnostics, intent.filter_path.as_deref())
        .and_then(|mut app| app.run())
        .map_err(|err| Fatal::Report(classify::<A>(&err, &diagnostics)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::failure::ErrorReport;
    use crate::core::config::CONFIG_DIR_ENV;
    use anyhow::bail;
    use serial_test::serial;
    use tempfile::TempDir;

    struct Refusing;

    impl Application for Refusing {
        fn new(_: &AppConfig, _: &Diagnostics, _: Option<&str>) -> anyhow::Result<Self> {
            bail!("no repository here")
        }
        fn run(&mut self) -> anyhow::Result<()> {
            Ok(())
        }
        fn known_error(err: &anyhow::Error, _: &TranslationSet) -> Option<String> {
            (err.to_string() == "no repository here").then(|| "repository not found".to_string())
        }
    }

    struct Crashing;

    impl Application for Crashing {
        fn new(_: &AppConfig, _: &Diagnostics, _: Option<&str>) -> anyhow::Result<Self> {
            Ok(Crashing)
        }
        fn run(&mut self) -> anyhow::Result<()> {
            bail!("renderer exploded")
        }
        fn known_error(_: &anyhow::Error, _: &TranslationSet) -> Option<String> {
            None
        }
    }

    struct Finishing;

    impl Application for Finishing {
        fn new(
            _: &AppConfig,
            diagnostics: &Diagnostics,
            filter: Option<&str>,
        ) -> anyhow::Result<Self> {
            assert_eq!(filter, Some("src"));
            diagnostics
                .log
                .in_scope(|| tracing::info!("application constructed"));
            Ok(Finishing)
        }
        fn run(&mut self) -> anyhow::Result<()> {
            Ok(())
        }
        fn known_error(_: &anyhow::Error, _: &TranslationSet) -> Option<String> {
            None
        }
    }

    fn with_config_dir<T>(f: impl FnOnce(&TempDir) -> T) -> T {
        let temp = TempDir::new().unwrap();
        std::env::set_var(CONFIG_DIR_ENV, temp.path());
        let result = f(&temp);
        std::env::remove_var(CONFIG_DIR_ENV);
        result
    }

    fn output<A: Application>(run: impl FnOnce(&mut Bootstrap<A, Vec<u8>>)) -> String {
        let mut host = Bootstrap::<A, Vec<u8>>::with_output(BuildInfo::current(), Vec::new());
        run(&mut host);
        String::from_utf8(host.into_output()).unwrap()
    }

    #[test]
    fn version_prints_single_line() {
        let text = output::<Finishing>(|host| host.version().unwrap());
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("commit="));
        assert!(text.contains(&format!("os={}", std::env::consts::OS)));
    }

    #[test]
    fn config_prints_default_toml() {
        let text = output::<Finishing>(|host| host.default_config().unwrap());
        let parsed: UserConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, UserConfig::default());
    }

    #[test]
    #[serial]
    fn tail_without_log_reports_hint() {
        with_config_dir(|_| {
            let mut host = Bootstrap::<Finishing, Vec<u8>>::with_output(
                BuildInfo::current(),
                Vec::new(),
            );
            let err = host.tail_logs().unwrap_err();
            assert!(matches!(err, Fatal::Tail(_)));

            let text = String::from_utf8(host.into_output()).unwrap();
            assert!(text.contains(DEBUG_LOG_FILE));
        });
    }

    #[test]
    #[serial]
    fn known_failure_is_reported_without_trace() {
        with_config_dir(|_| {
            let err = launch::<Refusing>(&RunIntent::default(), BuildInfo::current()).unwrap_err();
            match err {
                Fatal::Report(ErrorReport::Known { message }) => {
                    assert_eq!(message, "repository not found")
                }
                other => panic!("unexpected {other:?}"),
            }
        });
    }

    #[test]
    #[serial]
    fn unknown_failure_is_logged_in_debug_mode() {
        with_config_dir(|temp| {
            let intent = RunIntent {
                debug: true,
                ..Default::default()
            };
            let err = launch::<Crashing>(&intent, BuildInfo::current()).unwrap_err();
            assert!(matches!(err, Fatal::Report(ErrorReport::Unknown { .. })));

            let log = std::fs::read_to_string(temp.path().join(DEBUG_LOG_FILE)).unwrap();
            assert!(log.contains("renderer exploded"));
        });
    }

    #[test]
    #[serial]
    fn successful_run_passes_filter() {
        with_config_dir(|_| {
            let intent = RunIntent {
                filter_path: Some("src".into()),
                ..Default::default()
            };
            launch::<Finishing>(&intent, BuildInfo::current()).unwrap();
        });
    }

    #[test]
    #[serial]
    fn application_shares_the_launch_log() {
        with_config_dir(|temp| {
            let intent = RunIntent {
                debug: true,
                filter_path: Some("src".into()),
                ..Default::default()
            };
            launch::<Finishing>(&intent, BuildInfo::current()).unwrap();

            let log = std::fs::read_to_string(temp.path().join(DEBUG_LOG_FILE)).unwrap();
            assert_eq!(log.matches("application constructed").count(), 1);
        });
    }

    #[test]
    #[serial]
    fn missing_work_tree_fails_before_config() {
        let intent = RunIntent {
            work_tree: Some("/definitely/not/here".into()),
            ..Default::default()
        };
        let err = launch::<Finishing>(&intent, BuildInfo::current()).unwrap_err();
        assert!(matches!(err, Fatal::ChangeDir { .. }));
    }
}
