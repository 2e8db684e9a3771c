//! Jobboard engine: HTTP fetching, bookmark storage and effect execution.
mod bookmarks;
mod engine;
mod fetch;
mod payload;
mod persist;
mod sink;
mod storage;
mod types;

pub use bookmarks::{load_bookmarks, save_bookmarks, BOOKMARKS_KEY};
pub use engine::{EngineConfig, EngineError, EngineHandle};
pub use fetch::{page_url, FetchSettings, JobsClient, ReqwestJobsClient, DEFAULT_ENDPOINT};
pub use payload::{decode_results, FORMAT_ERROR_MESSAGE};
pub use persist::PersistQueue;
pub use sink::{ChannelEventSink, EventSink};
pub use storage::{
    ensure_dir, file_name_for_key, FileKeyValueStore, KeyValueStore, MemoryKeyValueStore,
};
pub use types::{EngineEvent, FailureKind, FetchError, RequestId, StorageError};
