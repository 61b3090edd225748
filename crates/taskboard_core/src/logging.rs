//! Board logging bootstrap.
//!
//! # Responsibility
//! - Turn a level and an optional directory into one `LogConfig`.
//! - Start the process-wide `flexi_logger` backend exactly once, writing to
//!   stderr or to rolling files under an absolute directory.
//!
//! # Invariants
//! - Initialization is idempotent for an equal `LogConfig`.
//! - Initialization never panics.
//! - Re-initialization with a different level or target is rejected.
//! - Project titles/descriptions are never written to logs; events carry ids
//!   and counts only.

use flexi_logger::{
    Cleanup, Criterion, FileSpec, FlexiLoggerError, LogSpecification, Logger, LoggerHandle,
    Naming, WriteMode,
};
use log::{info, LevelFilter};
use once_cell::sync::OnceCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Environment variable holding the log level.
pub const LOG_LEVEL_ENV: &str = "TASKBOARD_LOG_LEVEL";
/// Environment variable holding the log directory; unset means stderr.
pub const LOG_DIR_ENV: &str = "TASKBOARD_LOG_DIR";

const LOG_FILE_BASENAME: &str = "taskboard";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;
const MAX_LOG_FILES: usize = 3;

static LOGGING_STATE: OnceCell<LoggingState> = OnceCell::new();

struct LoggingState {
    config: LogConfig,
    _handle: LoggerHandle,
}

/// Where log lines are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    /// Rolling `taskboard*.log` files under an absolute directory.
    Directory(PathBuf),
}

impl Display for LogTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stderr => f.write_str("stderr"),
            Self::Directory(dir) => write!(f, "{}", dir.display()),
        }
    }
}

/// Validated logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub level: LevelFilter,
    pub target: LogTarget,
}

impl LogConfig {
    pub fn stderr(level: LevelFilter) -> Self {
        Self {
            level,
            target: LogTarget::Stderr,
        }
    }

    /// File logging under `dir`.
    ///
    /// # Errors
    /// - `LoggingError::RelativeDirectory` when `dir` is not absolute.
    pub fn directory(level: LevelFilter, dir: impl AsRef<Path>) -> Result<Self, LoggingError> {
        let dir = dir.as_ref();
        if !dir.is_absolute() {
            return Err(LoggingError::RelativeDirectory(dir.to_path_buf()));
        }
        Ok(Self {
            level,
            target: LogTarget::Directory(dir.to_path_buf()),
        })
    }

    /// Builds a config from raw settings.
    ///
    /// A missing level falls back to `default_log_level()`. A missing or
    /// blank directory selects stderr.
    pub fn parse(level: Option<&str>, dir: Option<&str>) -> Result<Self, LoggingError> {
        let level = match level {
            Some(raw) => parse_level(raw)?,
            None => default_log_level(),
        };
        match dir.map(str::trim).filter(|dir| !dir.is_empty()) {
            Some(dir) => Self::directory(level, dir),
            None => Ok(Self::stderr(level)),
        }
    }

    /// Reads `TASKBOARD_LOG_LEVEL` and `TASKBOARD_LOG_DIR`.
    pub fn from_env() -> Result<Self, LoggingError> {
        let level = std::env::var(LOG_LEVEL_ENV).ok();
        let dir = std::env::var(LOG_DIR_ENV).ok();
        Self::parse(level.as_deref(), dir.as_deref())
    }
}

/// Logging setup failures.
#[derive(Debug)]
pub enum LoggingError {
    UnsupportedLevel(String),
    RelativeDirectory(PathBuf),
    CreateDirectory {
        dir: PathBuf,
        source: std::io::Error,
    },
    Backend(FlexiLoggerError),
    AlreadyInitialized {
        active: LogConfig,
        requested: LogConfig,
    },
}

impl Display for LoggingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedLevel(level) => write!(
                f,
                "unsupported log level `{level}`; expected trace|debug|info|warn|error"
            ),
            Self::RelativeDirectory(dir) => write!(
                f,
                "log directory must be an absolute path, got `{}`",
                dir.display()
            ),
            Self::CreateDirectory { dir, source } => write!(
                f,
                "failed to create log directory `{}`: {source}",
                dir.display()
            ),
            Self::Backend(err) => write!(f, "failed to start logger: {err}"),
            Self::AlreadyInitialized { active, requested } => write!(
                f,
                "logging already initialized with {} -> {}; refusing to switch to {} -> {}",
                active.level, active.target, requested.level, requested.target
            ),
        }
    }
}

impl Error for LoggingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CreateDirectory { source, .. } => Some(source),
            Self::Backend(err) => Some(err),
            _ => None,
        }
    }
}

/// Starts board logging.
///
/// # Errors
/// - `CreateDirectory` or `Backend` when the logger cannot start.
/// - `AlreadyInitialized` when logging runs with a different config.
pub fn init_logging(config: &LogConfig) -> Result<(), LoggingError> {
    let state = LOGGING_STATE.get_or_try_init(|| -> Result<LoggingState, LoggingError> {
        let handle = start_backend(config)?;
        info!(
            "event=logging_init module=core status=ok level={} target={} version={}",
            config.level,
            config.target,
            env!("CARGO_PKG_VERSION")
        );
        Ok(LoggingState {
            config: config.clone(),
            _handle: handle,
        })
    })?;

    if state.config != *config {
        return Err(LoggingError::AlreadyInitialized {
            active: state.config.clone(),
            requested: config.clone(),
        });
    }
    Ok(())
}

/// Active config, if logging has been started.
pub fn logging_status() -> Option<LogConfig> {
    LOGGING_STATE.get().map(|state| state.config.clone())
}

/// `Debug` for debug builds, `Info` for release builds.
pub fn default_log_level() -> LevelFilter {
    if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

fn start_backend(config: &LogConfig) -> Result<LoggerHandle, LoggingError> {
    let logger = Logger::with(LogSpecification::builder().default(config.level).build());
    let logger = match &config.target {
        LogTarget::Stderr => logger
            .log_to_stderr()
            .format(flexi_logger::default_format),
        LogTarget::Directory(dir) => {
            std::fs::create_dir_all(dir).map_err(|source| LoggingError::CreateDirectory {
                dir: dir.clone(),
                source,
            })?;
            logger
                .log_to_file(
                    FileSpec::default()
                        .directory(dir.as_path())
                        .basename(LOG_FILE_BASENAME),
                )
                .rotate(
                    Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
                    Naming::Numbers,
                    Cleanup::KeepLogFiles(MAX_LOG_FILES),
                )
                .write_mode(WriteMode::BufferAndFlush)
                .append()
                .format_for_files(flexi_logger::detailed_format)
        }
    };
    logger.start().map_err(LoggingError::Backend)
}

fn parse_level(raw: &str) -> Result<LevelFilter, LoggingError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok(LevelFilter::Trace),
        "debug" => Ok(LevelFilter::Debug),
        "info" => Ok(LevelFilter::Info),
        "warn" | "warning" => Ok(LevelFilter::Warn),
        "error" => Ok(LevelFilter::Error),
        _ => Err(LoggingError::UnsupportedLevel(raw.trim().to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::{default_log_level, parse_level, LogConfig, LogTarget, LoggingError};
    use log::LevelFilter;
    use std::path::PathBuf;

    #[test]
    fn parse_level_accepts_known_values() {
        assert_eq!(parse_level("INFO").unwrap(), LevelFilter::Info);
        assert_eq!(parse_level(" warning ").unwrap(), LevelFilter::Warn);
    }

    #[test]
    fn parse_level_rejects_unknown_values() {
        let error = parse_level("verbose").unwrap_err();
        assert!(matches!(error, LoggingError::UnsupportedLevel(ref level) if level == "verbose"));
        assert!(error.to_string().contains("unsupported log level"));
    }

    #[test]
    fn missing_or_blank_directory_selects_stderr() {
        let config = LogConfig::parse(Some("warn"), None).unwrap();
        assert_eq!(config, LogConfig::stderr(LevelFilter::Warn));

        let blank = LogConfig::parse(None, Some("   ")).unwrap();
        assert_eq!(blank.target, LogTarget::Stderr);
        assert_eq!(blank.level, default_log_level());
    }

    #[test]
    fn relative_directory_is_rejected() {
        let error = LogConfig::parse(Some("info"), Some("logs/dev")).unwrap_err();
        assert!(
            matches!(error, LoggingError::RelativeDirectory(ref dir) if *dir == PathBuf::from("logs/dev"))
        );
    }

    #[test]
    fn absolute_directory_selects_file_target() {
        let dir = std::env::temp_dir().join("taskboard-logs");
        let config = LogConfig::parse(Some("debug"), dir.to_str()).unwrap();
        assert_eq!(config.target, LogTarget::Directory(dir));
        assert_eq!(config.level, LevelFilter::Debug);
    }

    #[test]
    fn conflict_message_names_both_configs() {
        let error = LoggingError::AlreadyInitialized {
            active: LogConfig::stderr(LevelFilter::Info),
            requested: LogConfig::stderr(LevelFilter::Debug),
        };
        assert_eq!(
            error.to_string(),
            "logging already initialized with INFO -> stderr; refusing to switch to DEBUG -> stderr"
        );
    }
}
