use std::sync::Once;

use jobboard_core::{update, AppState, BookmarkState, Effect, Job, JobId, Msg};
use pretty_assertions::assert_eq;
use serde_json::json;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(jobboard_logging::initialize_for_tests);
}

fn job(id: u64) -> Job {
    Job::new(id, format!("Job {id}")).with_attr("location_string", json!("Pune"))
}

fn loaded(stored: Vec<Job>) -> BookmarkState {
    let mut state = BookmarkState::new();
    assert!(state.begin_load());
    assert_eq!(state.finish_load(stored), None);
    state
}

fn ids(state: &BookmarkState) -> Vec<String> {
    state.bookmarks().iter().map(|job| job.id.to_string()).collect()
}

#[test]
fn loading_flag_clears_once_resolved() {
    init_logging();
    let mut state = BookmarkState::new();
    assert!(state.is_loading());
    assert!(state.begin_load());
    assert!(!state.begin_load(), "a second read is not issued");

    state.finish_load(vec![job(1), job(2)]);
    assert!(!state.is_loading());
    assert_eq!(ids(&state), vec!["1", "2"]);
}

#[test]
fn empty_store_resolves_to_empty_collection() {
    init_logging();
    let state = loaded(Vec::new());
    assert!(state.bookmarks().is_empty());
    assert!(!state.is_loading());
}

#[test]
fn stored_duplicates_are_collapsed() {
    init_logging();
    let state = loaded(vec![job(1), job(1), job(2)]);
    assert_eq!(ids(&state), vec!["1", "2"]);
}

#[test]
fn add_is_visible_before_persistence() {
    init_logging();
    let mut state = loaded(Vec::new());
    let snapshot = state.add(job(7)).expect("snapshot to persist");

    assert!(state.is_bookmarked(&JobId::from(7u64)));
    assert_eq!(snapshot.revision, 1);
    assert_eq!(snapshot.bookmarks, vec![job(7)]);
    assert_eq!(state.persisted_revision(), 0);
}

#[test]
fn adding_existing_bookmark_changes_nothing() {
    init_logging();
    let mut state = loaded(vec![job(1)]);
    let before = state.clone();

    assert_eq!(state.add(Job::new(1u64, "Renamed")), None);
    assert_eq!(state, before);
}

#[test]
fn add_rejects_unusable_id() {
    init_logging();
    let mut state = loaded(Vec::new());
    assert_eq!(state.add(Job::new("", "No id")), None);
    assert!(state.bookmarks().is_empty());
}

#[test]
fn removing_unknown_id_is_silent() {
    init_logging();
    let mut state = loaded(vec![job(1)]);
    let before = state.clone();

    assert_eq!(state.remove(&JobId::from(99u64)), None);
    assert_eq!(state, before);
}

#[test]
fn every_change_persists_the_full_collection_with_a_newer_revision() {
    init_logging();
    let mut state = loaded(vec![job(1)]);

    let first = state.add(job(2)).unwrap();
    let second = state.remove(&JobId::from(1u64)).unwrap();

    assert!(second.revision > first.revision);
    assert_eq!(first.bookmarks, vec![job(1), job(2)]);
    assert_eq!(second.bookmarks, vec![job(2)]);
}

#[test]
fn text_and_numeric_ids_are_distinct() {
    init_logging();
    let mut state = loaded(vec![job(1)]);
    assert!(!state.is_bookmarked(&JobId::from("1")));
    assert_eq!(state.remove(&JobId::from("1")), None);
    assert_eq!(ids(&state), vec!["1"]);
}

#[test]
fn changes_before_load_are_merged_into_stored_collection() {
    init_logging();
    let mut state = BookmarkState::new();
    state.begin_load();

    assert_eq!(state.add(job(3)), None, "no write before the read finishes");
    assert!(state.is_bookmarked(&JobId::from(3u64)));
    assert_eq!(state.remove(&JobId::from(1u64)), None);

    let snapshot = state
        .finish_load(vec![job(1), job(2)])
        .expect("merged collection is persisted");
    assert_eq!(ids(&state), vec!["2", "3"]);
    assert_eq!(snapshot.bookmarks, vec![job(2), job(3)]);
}

#[test]
fn failed_persist_keeps_memory() {
    init_logging();
    let mut state = loaded(Vec::new());
    let snapshot = state.add(job(5)).unwrap();

    state.record_persisted(snapshot.revision, Err("disk full".to_string()));
    assert!(state.is_bookmarked(&JobId::from(5u64)));
    assert_eq!(state.persisted_revision(), 0);

    state.record_persisted(snapshot.revision, Ok(()));
    assert_eq!(state.persisted_revision(), snapshot.revision);
}

#[test]
fn started_requests_bookmarks_and_first_page() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::Started);

    assert_eq!(effects.len(), 2);
    assert_eq!(effects[0], Effect::LoadBookmarks);
    assert!(matches!(effects[1], Effect::FetchPage(request) if request.page == 1));
    assert!(state.view().is_loading_bookmarks);
    assert!(state.view().is_loading);
}

#[test]
fn toggle_adds_then_removes() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::Started);
    let (mut state, effects) = update(state, Msg::BookmarksLoaded(Vec::new()));
    assert!(effects.is_empty());
    assert!(state.consume_dirty());

    let (mut state, effects) = update(state, Msg::BookmarkToggled(job(4)));
    assert!(state.is_bookmarked(&JobId::from(4u64)));
    assert!(state.consume_dirty());
    match effects.as_slice() {
        [Effect::PersistBookmarks(snapshot)] => assert_eq!(snapshot.bookmarks, vec![job(4)]),
        other => panic!("unexpected effects {other:?}"),
    }

    let (state, effects) = update(state, Msg::BookmarkToggled(job(4)));
    assert!(!state.is_bookmarked(&JobId::from(4u64)));
    match effects.as_slice() {
        [Effect::PersistBookmarks(snapshot)] => assert!(snapshot.bookmarks.is_empty()),
        other => panic!("unexpected effects {other:?}"),
    }
}

#[test]
fn duplicate_add_through_update_is_clean_noop() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::Started);
    let (mut state, _) = update(state, Msg::BookmarksLoaded(vec![job(1)]));
    state.consume_dirty();

    let (mut state, effects) = update(state, Msg::BookmarkAdded(job(1)));
    assert!(effects.is_empty());
    assert!(!state.consume_dirty());
    assert_eq!(state.view().bookmarks.len(), 1);
}

#[test]
fn view_marks_bookmarked_feed_rows() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::Started);
    let request = effects
        .iter()
        .find_map(|effect| match effect {
            Effect::FetchPage(request) => Some(request.request),
            _ => None,
        })
        .unwrap();
    let (state, _) = update(state, Msg::BookmarksLoaded(vec![job(2)]));
    let (state, _) = update(
        state,
        Msg::PageFetched {
            request,
            result: Ok(vec![job(1).to_value(), job(2).to_value()]),
        },
    );

    let view = state.view();
    let flags: Vec<bool> = view.jobs.iter().map(|row| row.bookmarked).collect();
    assert_eq!(flags, vec![false, true]);
    assert_eq!(view.jobs[0].location.as_deref(), Some("Pune"));
    assert!(!view.is_loading_bookmarks);
}
