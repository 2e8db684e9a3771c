use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use jobboard_logging::{jb_debug, jb_error, jb_info};
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::bookmarks::load_bookmarks;
use crate::fetch::{FetchSettings, JobsClient, ReqwestJobsClient};
use crate::persist::PersistQueue;
use crate::sink::{ChannelEventSink, EventSink};
use crate::storage::{FileKeyValueStore, KeyValueStore};
use crate::{EngineEvent, FetchError, RequestId};

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub fetch: FetchSettings,
    /// Directory backing the key-value store.
    pub data_dir: PathBuf,
}

impl EngineConfig {
    pub fn default_with_data_dir(data_dir: PathBuf) -> Self {
        Self {
            fetch: FetchSettings::default(),
            data_dir,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("failed to build http client: {0}")]
    Client(#[from] FetchError),
}

enum EngineCommand {
    FetchPage { request: RequestId, page: u32 },
    LoadBookmarks,
    PersistBookmarks { revision: u64, bookmarks: Vec<Value> },
    Shutdown,
}

/// Runs fetches and storage IO on a background runtime and reports results
/// as [`EngineEvent`]s.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
    worker: Option<thread::JoinHandle<()>>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        let client = ReqwestJobsClient::new(config.fetch)?;
        let store = FileKeyValueStore::new(config.data_dir);
        Self::with_parts(Arc::new(client), Arc::new(store))
    }

    /// Builds an engine over caller-provided collaborators.
    pub fn with_parts(
        client: Arc<dyn JobsClient>,
        store: Arc<dyn KeyValueStore>,
    ) -> Result<Self, EngineError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let sink: Arc<dyn EventSink> = Arc::new(ChannelEventSink::new(event_tx));

        let worker = thread::spawn(move || {
            let queue = PersistQueue::new();
            let cancel = CancellationToken::new();
            let writer = {
                let queue = queue.clone();
                let store = Arc::clone(&store);
                let sink = Arc::clone(&sink);
                let cancel = cancel.clone();
                runtime.spawn(async move { queue.run(store, sink, cancel).await })
            };

            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::FetchPage { request, page } => {
                        let client = Arc::clone(&client);
                        let sink = Arc::clone(&sink);
                        runtime.spawn(async move {
                            let result = client.fetch_page(page).await;
                            jb_debug!(
                                "Fetch finish: page={} request={} ok={}",
                                page,
                                request,
                                result.is_ok()
                            );
                            sink.emit(EngineEvent::PageFetched {
                                request,
                                page,
                                result,
                            });
                        });
                    }
                    EngineCommand::LoadBookmarks => {
                        let store = Arc::clone(&store);
                        let sink = Arc::clone(&sink);
                        runtime.spawn_blocking(move || {
                            let bookmarks = load_bookmarks(store.as_ref());
                            sink.emit(EngineEvent::BookmarksLoaded(bookmarks));
                        });
                    }
                    EngineCommand::PersistBookmarks {
                        revision,
                        bookmarks,
                    } => queue.submit(revision, bookmarks),
                    EngineCommand::Shutdown => break,
                }
            }

            cancel.cancel();
            if let Err(err) = runtime.block_on(writer) {
                jb_error!("Bookmark writer ended abnormally: {}", err);
            }
            runtime.shutdown_timeout(Duration::from_secs(1));
            jb_info!("Engine stopped");
        });

        Ok(Self {
            cmd_tx,
            event_rx,
            worker: Some(worker),
        })
    }

    pub fn fetch_page(&self, request: RequestId, page: u32) {
        self.send(EngineCommand::FetchPage { request, page });
    }

    pub fn load_bookmarks(&self) {
        self.send(EngineCommand::LoadBookmarks);
    }

    pub fn persist_bookmarks(&self, revision: u64, bookmarks: Vec<Value>) {
        self.send(EngineCommand::PersistBookmarks {
            revision,
            bookmarks,
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    /// Stops accepting work, flushes the newest pending bookmark snapshot and
    /// waits for the worker to exit. In-flight fetches are abandoned.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        let _ = self.cmd_tx.send(EngineCommand::Shutdown);
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                jb_error!("Engine worker panicked");
            }
        }
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            jb_error!("Engine worker is gone; command dropped");
        }
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
