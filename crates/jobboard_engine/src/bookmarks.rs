use jobboard_logging::{jb_error, jb_info, jb_warn};
use serde_json::Value;

use crate::{KeyValueStore, StorageError};

/// Storage key holding the whole bookmark collection.
pub const BOOKMARKS_KEY: &str = "@bookmarkedJobs";

/// Reads the stored bookmark collection, fail-open.
///
/// Absent, unreadable or corrupt storage all yield an empty collection; the
/// latter two are logged.
pub fn load_bookmarks(store: &dyn KeyValueStore) -> Vec<Value> {
    let text = match store.get(BOOKMARKS_KEY) {
        Ok(Some(text)) => text,
        Ok(None) => {
            jb_info!("No stored bookmarks yet");
            return Vec::new();
        }
        Err(err) => {
            jb_error!("Failed to load bookmarks: {}", err);
            return Vec::new();
        }
    };

    match serde_json::from_str::<Value>(&text) {
        Ok(Value::Array(items)) => {
            jb_info!("Read {} stored bookmarks", items.len());
            items
        }
        Ok(other) => {
            jb_warn!(
                "Stored bookmarks are not an array ({}); starting empty",
                kind_of(&other)
            );
            Vec::new()
        }
        Err(err) => {
            jb_warn!("Stored bookmarks are corrupt: {}; starting empty", err);
            Vec::new()
        }
    }
}

/// Overwrites the stored collection with `bookmarks`.
pub fn save_bookmarks(store: &dyn KeyValueStore, bookmarks: &[Value]) -> Result<(), StorageError> {
    let text = serde_json::to_string(bookmarks).map_err(|err| StorageError::Serialize {
        key: BOOKMARKS_KEY.to_string(),
        message: err.to_string(),
    })?;
    store.set(BOOKMARKS_KEY, &text)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
