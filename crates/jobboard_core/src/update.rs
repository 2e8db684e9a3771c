use jobboard_logging::jb_debug;

use crate::{AppState, BookmarkSnapshot, Effect, FetchKind, Msg};

/// Pure update function: applies a message to state and returns any effects.
///
/// An empty effect list for `RefreshRequested` or `LoadMoreRequested` means
/// the request was dropped because another fetch is in flight.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    if !state.is_live() {
        jb_debug!("Ignoring {:?} after shutdown", msg);
        return (state, Vec::new());
    }

    let effects = match msg {
        Msg::Started => {
            let mut effects = Vec::with_capacity(2);
            if state.bookmarks.begin_load() {
                effects.push(Effect::LoadBookmarks);
            }
            if let Some(request) = state.feed.begin_refresh() {
                effects.push(Effect::FetchPage(request));
            }
            state.mark_dirty();
            effects
        }
        Msg::RefreshRequested => match state.feed.begin_refresh() {
            Some(request) => {
                state.mark_dirty();
                vec![Effect::FetchPage(request)]
            }
            None => Vec::new(),
        },
        Msg::LoadMoreRequested => match state.feed.begin_load_more() {
            Some(request) => {
                state.mark_dirty();
                vec![Effect::FetchPage(request)]
            }
            None => Vec::new(),
        },
        Msg::PageFetched { request, result } => match state.feed.complete_page(request, result) {
            Some(outcome) => {
                state.mark_dirty();
                match outcome.request.kind {
                    FetchKind::Initial => vec![Effect::RefreshFinished {
                        success: outcome.success,
                    }],
                    FetchKind::More => Vec::new(),
                }
            }
            None => Vec::new(),
        },
        Msg::BookmarksLoaded(stored) => {
            let snapshot = state.bookmarks.finish_load(stored);
            state.mark_dirty();
            persist(snapshot)
        }
        Msg::BookmarkAdded(job) => {
            let before = state.bookmarks.bookmarks().len();
            let snapshot = state.bookmarks.add(job);
            mark_if_changed(&mut state, before);
            persist(snapshot)
        }
        Msg::BookmarkRemoved(id) => {
            let before = state.bookmarks.bookmarks().len();
            let snapshot = state.bookmarks.remove(&id);
            mark_if_changed(&mut state, before);
            persist(snapshot)
        }
        Msg::BookmarkToggled(job) => {
            let before = state.bookmarks.bookmarks().len();
            let snapshot = state.toggle_bookmark(job);
            mark_if_changed(&mut state, before);
            persist(snapshot)
        }
        Msg::BookmarksPersisted { revision, result } => {
            state.bookmarks.record_persisted(revision, result);
            Vec::new()
        }
        Msg::Shutdown => {
            state.shut_down();
            Vec::new()
        }
    };

    (state, effects)
}

fn persist(snapshot: Option<BookmarkSnapshot>) -> Vec<Effect> {
    snapshot.map(Effect::PersistBookmarks).into_iter().collect()
}

fn mark_if_changed(state: &mut AppState, before: usize) {
    if state.bookmarks.bookmarks().len() != before {
        state.mark_dirty();
    }
}
