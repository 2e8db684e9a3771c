use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use jobboard_engine::{EngineConfig, FetchSettings, DEFAULT_ENDPOINT};
use jobboard_logging::LogDestination;
use serde::{Deserialize, Serialize};

pub(crate) const CONFIG_FILENAME: &str = "jobboard.ron";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct AppConfig {
    pub endpoint: String,
    pub data_dir: PathBuf,
    /// Log to `./jobboard.log` when set, to the terminal otherwise.
    pub log_to_file: bool,
    pub connect_timeout_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            data_dir: PathBuf::from("data"),
            log_to_file: true,
            connect_timeout_secs: None,
            request_timeout_secs: None,
        }
    }
}

impl AppConfig {
    pub(crate) fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            fetch: FetchSettings {
                connect_timeout: self.connect_timeout_secs.map(Duration::from_secs),
                request_timeout: self.request_timeout_secs.map(Duration::from_secs),
                ..FetchSettings::with_endpoint(self.endpoint.clone())
            },
            data_dir: self.data_dir.clone(),
        }
    }

    pub(crate) fn log_destination(&self) -> LogDestination {
        if self.log_to_file {
            LogDestination::default_file()
        } else {
            LogDestination::Terminal
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum ConfigError {
    #[error("failed to read config from {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config from {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

/// Reads `jobboard.ron` from `dir`. A missing file yields the defaults.
///
/// Runs before logging is set up, so failures are returned for the caller to
/// report once a logger exists.
pub(crate) fn load_config(dir: &Path) -> Result<AppConfig, ConfigError> {
    let path = dir.join(CONFIG_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(AppConfig::default());
        }
        Err(source) => return Err(ConfigError::Read { path, source }),
    };

    ron::from_str(&content).map_err(|source| ConfigError::Parse { path, source })
}
