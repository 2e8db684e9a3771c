use std::fmt;

use serde_json::Value;

pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    PageFetched {
        request: RequestId,
        page: u32,
        result: Result<Vec<Value>, FetchError>,
    },
    /// Stored bookmark records; empty when storage was absent or unreadable.
    BookmarksLoaded(Vec<Value>),
    BookmarksPersisted {
        revision: u64,
        result: Result<(), StorageError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Format,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => f.write_str("bad endpoint url"),
            FailureKind::HttpStatus(code) => write!(f, "status {code}"),
            FailureKind::Timeout => f.write_str("timed out"),
            FailureKind::TooLarge {
                max_bytes,
                actual: Some(actual),
            } => write!(f, "body of {actual} bytes exceeds {max_bytes}"),
            FailureKind::TooLarge {
                max_bytes,
                actual: None,
            } => write!(f, "body exceeds {max_bytes} bytes"),
            FailureKind::Format => f.write_str("unexpected payload shape"),
            FailureKind::Network => f.write_str("transport failure"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("failed to read {key}: {message}")]
    Read { key: String, message: String },
    #[error("failed to write {key}: {message}")]
    Write { key: String, message: String },
    #[error("failed to serialize {key}: {message}")]
    Serialize { key: String, message: String },
}
