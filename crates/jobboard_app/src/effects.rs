use jobboard_core::{Effect, FetchFailure, Job, Msg};
use jobboard_engine::{EngineEvent, EngineHandle, FailureKind, FetchError};
use jobboard_logging::{jb_info, jb_warn};

/// Turns effects from `update` into engine commands.
pub(crate) struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub(crate) fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    pub(crate) fn engine(&self) -> &EngineHandle {
        &self.engine
    }

    pub(crate) fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchPage(request) => {
                    jb_info!(
                        "FetchPage request={} page={} kind={:?}",
                        request.request,
                        request.page,
                        request.kind
                    );
                    self.engine.fetch_page(request.request, request.page);
                }
                Effect::RefreshFinished { success } => {
                    jb_info!("Refresh finished success={}", success);
                }
                Effect::LoadBookmarks => self.engine.load_bookmarks(),
                Effect::PersistBookmarks(snapshot) => {
                    let records = snapshot.bookmarks.iter().map(Job::to_value).collect();
                    self.engine.persist_bookmarks(snapshot.revision, records);
                }
            }
        }
    }

    pub(crate) fn shutdown(self) {
        self.engine.shutdown();
    }
}

pub(crate) fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::PageFetched {
            request, result, ..
        } => Msg::PageFetched {
            request,
            result: result.map_err(map_failure),
        },
        EngineEvent::BookmarksLoaded(records) => {
            let total = records.len();
            let jobs: Vec<Job> = records.iter().filter_map(Job::from_value).collect();
            if jobs.len() != total {
                jb_warn!(
                    "Dropped {} stored bookmark(s) without a usable id or title",
                    total - jobs.len()
                );
            }
            Msg::BookmarksLoaded(jobs)
        }
        EngineEvent::BookmarksPersisted { revision, result } => Msg::BookmarksPersisted {
            revision,
            result: result.map_err(|err| err.to_string()),
        },
    }
}

pub(crate) fn map_failure(error: FetchError) -> FetchFailure {
    let FetchError { kind, message } = error;
    match kind {
        FailureKind::HttpStatus(status) => FetchFailure::Http { status, message },
        FailureKind::Format => FetchFailure::Format { message },
        FailureKind::InvalidUrl
        | FailureKind::Timeout
        | FailureKind::TooLarge { .. }
        | FailureKind::Network => FetchFailure::Network { message },
    }
}
