#![deny(missing_docs)]
//! Shared logging utilities for the jobboard workspace.
//!
//! This crate provides the `jb_*` logging macros used across the codebase,
//! the application logger setup and a minimal test initializer for the
//! global logger. The macros go through a re-exported `log` facade so
//! dependent crates do not need their own `log` dependency.

use std::fs::File;
use std::path::{Path, PathBuf};

pub use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

#[doc(hidden)]
pub use log as __log;

/// Default log file written by [`LogDestination::File`] and [`LogDestination::Both`].
pub const DEFAULT_LOG_FILE: &str = "./jobboard.log";

/// `log::trace!` routed through this crate.
#[macro_export]
macro_rules! jb_trace {
    ($($arg:tt)*) => {{
        $crate::__log::trace!($($arg)*);
    }};
}

/// `log::debug!` routed through this crate.
#[macro_export]
macro_rules! jb_debug {
    ($($arg:tt)*) => {{
        $crate::__log::debug!($($arg)*);
    }};
}

/// `log::info!` routed through this crate.
#[macro_export]
macro_rules! jb_info {
    ($($arg:tt)*) => {{
        $crate::__log::info!($($arg)*);
    }};
}

/// `log::warn!` routed through this crate.
#[macro_export]
macro_rules! jb_warn {
    ($($arg:tt)*) => {{
        $crate::__log::warn!($($arg)*);
    }};
}

/// `log::error!` routed through this crate.
#[macro_export]
macro_rules! jb_error {
    ($($arg:tt)*) => {{
        $crate::__log::error!($($arg)*);
    }};
}

/// Where [`initialize`] sends log records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogDestination {
    /// Write to the given file, truncating it.
    File(PathBuf),
    /// Write to the terminal.
    Terminal,
    /// Write to both the given file and the terminal.
    Both(PathBuf),
}

impl LogDestination {
    /// File destination at [`DEFAULT_LOG_FILE`].
    pub fn default_file() -> Self {
        LogDestination::File(PathBuf::from(DEFAULT_LOG_FILE))
    }
}

/// Initialize the global logger with the specified destination and level.
///
/// A file that cannot be created is reported on stderr and skipped; a second
/// call is a no-op because the global logger can only be set once.
pub fn initialize(destination: LogDestination, level: LevelFilter) {
    let config = build_config();

    let loggers: Vec<Box<dyn SharedLogger>> = match destination {
        LogDestination::Terminal => vec![terminal_logger(level, config)],
        LogDestination::File(path) => create_file_logger(&path, level, config)
            .into_iter()
            .collect(),
        LogDestination::Both(path) => {
            let mut loggers = vec![terminal_logger(level, config.clone())];
            loggers.extend(create_file_logger(&path, level, config));
            loggers
        }
    };
    if loggers.is_empty() {
        return;
    }

    let _ = CombinedLogger::init(loggers);
}

/// Terminal logger for test binaries, at debug level in debug builds.
///
/// Safe to call from every test: only the first call installs a logger.
pub fn initialize_for_tests() {
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let _ = CombinedLogger::init(vec![terminal_logger(level, Config::default())]);
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_target_level(LevelFilter::Error)
        .set_time_format_rfc3339()
        .build()
}

fn terminal_logger(level: LevelFilter, config: Config) -> Box<dyn SharedLogger> {
    TermLogger::new(level, config, TerminalMode::Mixed, ColorChoice::Auto)
}

fn create_file_logger(
    path: &Path,
    level: LevelFilter,
    config: Config,
) -> Option<Box<dyn SharedLogger>> {
    match File::create(path) {
        Ok(file) => Some(WriteLogger::new(level, config, file) as Box<dyn SharedLogger>),
        Err(err) => {
            eprintln!(
                "jobboard: log file {} unavailable ({err}); file logging disabled",
                path.display()
            );
            None
        }
    }
}
