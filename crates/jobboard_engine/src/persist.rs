use std::sync::{Arc, Mutex, MutexGuard};

use jobboard_logging::{jb_debug, jb_info, jb_warn};
use serde_json::Value;
use tokio::sync::Notify;
use tokio_util::sync::CancellationToken;

use crate::bookmarks::save_bookmarks;
use crate::{EngineEvent, EventSink, KeyValueStore, StorageError};

#[derive(Debug)]
struct Snapshot {
    revision: u64,
    bookmarks: Vec<Value>,
}

#[derive(Debug, Default)]
struct Shared {
    pending: Mutex<Option<Snapshot>>,
    notify: Notify,
}

/// Single-writer queue for bookmark snapshots.
///
/// Only the newest submitted snapshot is kept, so a burst of changes collapses
/// into one write, and a snapshot older than one already written is refused.
#[derive(Debug, Clone, Default)]
pub struct PersistQueue {
    shared: Arc<Shared>,
}

impl PersistQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the full collection at `revision`, replacing any older pending one.
    pub fn submit(&self, revision: u64, bookmarks: Vec<Value>) {
        {
            let mut pending = self.lock();
            if let Some(current) = pending.as_ref() {
                if current.revision >= revision {
                    jb_debug!(
                        "Dropping bookmark snapshot {} behind pending {}",
                        revision,
                        current.revision
                    );
                    return;
                }
                jb_debug!("Snapshot {} replaces pending {}", revision, current.revision);
            }
            *pending = Some(Snapshot {
                revision,
                bookmarks,
            });
        }
        self.shared.notify.notify_one();
    }

    pub fn has_pending(&self) -> bool {
        self.lock().is_some()
    }

    /// Writes snapshots until `cancel` fires, then flushes whatever is pending.
    pub async fn run(
        &self,
        store: Arc<dyn KeyValueStore>,
        sink: Arc<dyn EventSink>,
        cancel: CancellationToken,
    ) {
        let mut newest_attempted = 0;
        loop {
            tokio::select! {
                _ = self.shared.notify.notified() => {
                    self.drain(&store, sink.as_ref(), &mut newest_attempted).await;
                }
                _ = cancel.cancelled() => {
                    self.drain(&store, sink.as_ref(), &mut newest_attempted).await;
                    jb_debug!("Bookmark writer stopped");
                    break;
                }
            }
        }
    }

    async fn drain(
        &self,
        store: &Arc<dyn KeyValueStore>,
        sink: &dyn EventSink,
        newest_attempted: &mut u64,
    ) {
        while let Some(snapshot) = self.take_pending() {
            if snapshot.revision <= *newest_attempted {
                jb_warn!(
                    "Refusing stale bookmark snapshot {} (already wrote {})",
                    snapshot.revision,
                    newest_attempted
                );
                continue;
            }
            *newest_attempted = snapshot.revision;

            let revision = snapshot.revision;
            let count = snapshot.bookmarks.len();
            let store = Arc::clone(store);
            let result = tokio::task::spawn_blocking(move || {
                save_bookmarks(store.as_ref(), &snapshot.bookmarks)
            })
            .await
            .unwrap_or_else(|err| {
                Err(StorageError::Write {
                    key: crate::BOOKMARKS_KEY.to_string(),
                    message: format!("writer task failed: {err}"),
                })
            });

            match &result {
                Ok(()) => jb_info!("Persisted {} bookmarks (revision {})", count, revision),
                Err(err) => jb_warn!("Bookmark revision {} not persisted: {}", revision, err),
            }
            sink.emit(EngineEvent::BookmarksPersisted { revision, result });
        }
    }

    fn take_pending(&self) -> Option<Snapshot> {
        self.lock().take()
    }

    fn lock(&self) -> MutexGuard<'_, Option<Snapshot>> {
        self.shared
            .pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
