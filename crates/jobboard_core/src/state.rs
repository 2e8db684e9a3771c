use crate::view_model::{AppViewModel, JobRowView};
use crate::{format_salary, BookmarkState, BookmarkSnapshot, FeedState, Job, JobId};

/// Everything the presentation layer reads, owned by [`crate::update`].
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub(crate) feed: FeedState,
    pub(crate) bookmarks: BookmarkState,
    live: bool,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            feed: FeedState::default(),
            bookmarks: BookmarkState::default(),
            live: true,
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(&self) -> &FeedState {
        &self.feed
    }

    pub fn bookmarks(&self) -> &BookmarkState {
        &self.bookmarks
    }

    pub fn is_bookmarked(&self, id: &JobId) -> bool {
        self.bookmarks.is_bookmarked(id)
    }

    pub fn is_live(&self) -> bool {
        self.live
    }

    /// Looks a job up in the feed first, then in the bookmarks.
    pub fn find_job(&self, id: &JobId) -> Option<&Job> {
        self.feed
            .jobs()
            .iter()
            .chain(self.bookmarks.bookmarks())
            .find(|job| &job.id == id)
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            jobs: self.feed.jobs().iter().map(|job| self.row(job)).collect(),
            status: self.feed.status(),
            is_loading: self.feed.is_loading(),
            is_loading_more: self.feed.is_loading_more(),
            error: self.feed.error().map(ToOwned::to_owned),
            has_more: self.feed.has_more(),
            bookmarks: self
                .bookmarks
                .bookmarks()
                .iter()
                .map(|job| self.row(job))
                .collect(),
            is_loading_bookmarks: self.bookmarks.is_loading(),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn shut_down(&mut self) {
        self.live = false;
    }

    /// Toggles the bookmark for `job`, returning the snapshot to persist.
    pub(crate) fn toggle_bookmark(&mut self, job: Job) -> Option<BookmarkSnapshot> {
        if self.bookmarks.is_bookmarked(&job.id) {
            self.bookmarks.remove(&job.id)
        } else {
            self.bookmarks.add(job)
        }
    }

    fn row(&self, job: &Job) -> JobRowView {
        JobRowView {
            id: job.id.clone(),
            title: job.title_text(),
            location: job.location(),
            salary: format_salary(job.salary()),
            phone: job.phone_number(),
            bookmarked: self.bookmarks.is_bookmarked(&job.id),
        }
    }
}
