//! Logging configuration shared by the Stencil binaries.
//!
//! Stencil writes composed documents to standard output, so log records go to
//! standard error unless configured otherwise.
use std::{fs::OpenOptions, path::PathBuf};

use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use tracing_subscriber::{
    Layer, layer::SubscriberExt, registry::LookupSpan, util::SubscriberInitExt,
};

/// Where log records are emitted and the minimum level that is kept.
#[serde_as]
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogConfig {
    /// Append log records to this file when set.
    /// If `None`, no file is written.
    #[serde(default = "LogConfig::default_file_path")]
    pub file_path: Option<PathBuf>,

    /// Whether log records are sent to `journald`.
    #[serde(default = "LogConfig::default_emit_journald")]
    pub emit_journald: bool,

    /// Whether log records are written to standard output, where they mix
    /// with the documents Stencil prints.
    #[serde(default = "LogConfig::default_emit_stdout")]
    pub emit_stdout: bool,

    /// Whether log records are written to standard error.
    #[serde(default = "LogConfig::default_emit_stderr")]
    pub emit_stderr: bool,

    /// The minimum level recorded; records below it are filtered out.
    #[serde(default = "LogConfig::default_log_level")]
    #[serde_as(as = "DisplayFromStr")]
    pub level: tracing::Level,
}

impl Default for LogConfig {
    /// `WARN` and above, written to standard error only.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stencil_cli::config::LogConfig;
    /// use tracing::Level;
    ///
    /// let config = LogConfig::default();
    /// assert_eq!(config.level, Level::WARN);
    /// assert!(config.emit_stderr);
    /// assert!(!config.emit_stdout);
    /// assert!(!config.emit_journald);
    /// assert!(config.file_path.is_none());
    /// ```
    fn default() -> Self {
        Self {
            file_path: Self::default_file_path(),
            emit_journald: Self::default_emit_journald(),
            emit_stdout: Self::default_emit_stdout(),
            emit_stderr: Self::default_emit_stderr(),
            level: Self::default_log_level(),
        }
    }
}

impl LogConfig {
    #[inline]
    #[must_use]
    /// Returns the default log level, `WARN`.
    pub const fn default_log_level() -> tracing::Level { tracing::Level::WARN }

    #[inline]
    #[must_use]
    /// Returns `None`: no log file by default.
    pub const fn default_file_path() -> Option<PathBuf> { None }

    #[inline]
    #[must_use]
    /// Returns `false`: `journald` is opt-in.
    pub const fn default_emit_journald() -> bool { false }

    #[inline]
    #[must_use]
    /// Returns `false`: standard output is reserved for command output.
    pub const fn default_emit_stdout() -> bool { false }

    #[inline]
    #[must_use]
    /// Returns `true`.
    pub const fn default_emit_stderr() -> bool { true }

    /// Installs the global `tracing` subscriber described by this
    /// configuration.
    ///
    /// # Panics
    ///
    /// Panics if a global subscriber has already been installed.
    pub fn registry(&self) {
        let Self { emit_journald, file_path, emit_stdout, emit_stderr, level } = self;

        tracing_subscriber::registry()
            .with(tracing_subscriber::filter::LevelFilter::from_level(*level))
            .with(emit_journald.then(|| LogDriver::Journald.layer()))
            .with(file_path.clone().map(|path| LogDriver::File(path).layer()))
            .with(emit_stdout.then(|| LogDriver::Stdout.layer()))
            .with(emit_stderr.then(|| LogDriver::Stderr.layer()))
            .init();
    }
}

/// A destination log records can be written to.
#[derive(Clone, Debug)]
enum LogDriver {
    /// Standard output.
    Stdout,

    /// Standard error.
    Stderr,

    /// The systemd journal.
    Journald,

    /// A file, opened for appending.
    File(PathBuf),
}

impl LogDriver {
    /// Builds the layer for this destination, or `None` when the destination
    /// cannot be opened.
    #[allow(clippy::type_repetition_in_bounds)]
    fn layer<S>(self) -> Option<Box<dyn Layer<S> + Send + Sync + 'static>>
    where
        S: tracing::Subscriber,
        for<'a> S: LookupSpan<'a>,
    {
        let fmt = tracing_subscriber::fmt::layer().with_target(true);

        match self {
            Self::Stdout => Some(Box::new(fmt.with_writer(std::io::stdout))),
            Self::Stderr => Some(Box::new(fmt.with_writer(std::io::stderr))),
            Self::File(path) => {
                let file = OpenOptions::new().create(true).append(true).open(path).ok()?;
                Some(Box::new(fmt.with_ansi(false).with_writer(file)))
            }
            Self::Journald => Some(Box::new(tracing_journald::layer().ok()?)),
        }
    }
}
