use serde_json::Value;

use crate::{FetchFailure, Job, JobId, RequestId};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Session start: load bookmarks and the first page.
    Started,
    /// User pulled to refresh.
    RefreshRequested,
    /// User scrolled to the end of the feed.
    LoadMoreRequested,
    /// Engine completion for a page fetch.
    PageFetched {
        request: RequestId,
        result: Result<Vec<Value>, FetchFailure>,
    },
    /// Stored bookmarks, already fail-open (empty on read failure).
    BookmarksLoaded(Vec<Job>),
    /// User bookmarked a job.
    BookmarkAdded(Job),
    /// User removed a bookmark.
    BookmarkRemoved(JobId),
    /// User tapped the bookmark toggle on a job.
    BookmarkToggled(Job),
    /// Engine completion for a bookmark write.
    BookmarksPersisted {
        revision: u64,
        result: Result<(), String>,
    },
    /// The owning view is gone; later completions are ignored.
    Shutdown,
}
