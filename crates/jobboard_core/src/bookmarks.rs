use jobboard_logging::{jb_debug, jb_error, jb_info, jb_warn};

use crate::{Job, JobId};

/// Full copy of the bookmark collection to be written to storage.
///
/// Revisions increase with every committed change, so a writer can refuse a
/// snapshot older than the one it already stored.
#[derive(Debug, Clone, PartialEq)]
pub struct BookmarkSnapshot {
    pub revision: u64,
    pub bookmarks: Vec<Job>,
}

/// In-memory bookmark collection, authoritative for readers.
///
/// Mutations apply immediately and hand back a snapshot to persist. Until the
/// stored collection has been loaded, changes are kept in memory only and
/// merged into the stored collection once it arrives, so an early write can
/// never clobber bookmarks that were not read yet.
#[derive(Debug, Clone, PartialEq)]
pub struct BookmarkState {
    bookmarks: Vec<Job>,
    is_loading: bool,
    load_pending: bool,
    loaded: bool,
    pending_removals: Vec<JobId>,
    revision: u64,
    persisted_revision: u64,
}

impl Default for BookmarkState {
    fn default() -> Self {
        Self {
            bookmarks: Vec::new(),
            is_loading: true,
            load_pending: false,
            loaded: false,
            pending_removals: Vec::new(),
            revision: 0,
            persisted_revision: 0,
        }
    }
}

impl BookmarkState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bookmarks(&self) -> &[Job] {
        &self.bookmarks
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Highest revision storage has confirmed.
    pub fn persisted_revision(&self) -> u64 {
        self.persisted_revision
    }

    pub fn is_bookmarked(&self, id: &JobId) -> bool {
        self.bookmarks.iter().any(|job| &job.id == id)
    }

    /// Marks the stored collection as being read. Returns `false` when a
    /// read is already outstanding.
    pub fn begin_load(&mut self) -> bool {
        if self.load_pending {
            jb_debug!("Bookmark load already in progress");
            return false;
        }
        self.load_pending = true;
        self.is_loading = true;
        true
    }

    /// Installs the stored collection.
    ///
    /// Returns a snapshot when changes made before the load finished had to be
    /// merged in and therefore need persisting.
    pub fn finish_load(&mut self, stored: Vec<Job>) -> Option<BookmarkSnapshot> {
        let early = std::mem::take(&mut self.bookmarks);
        let removals = std::mem::take(&mut self.pending_removals);
        let had_early_changes = !early.is_empty() || !removals.is_empty();

        let mut merged: Vec<Job> = Vec::with_capacity(stored.len() + early.len());
        for job in stored.into_iter().chain(early) {
            if !job.id.is_valid() {
                jb_warn!("Dropping stored bookmark with unusable id {}", job.id);
                continue;
            }
            if removals.contains(&job.id) || merged.iter().any(|b| b.id == job.id) {
                continue;
            }
            merged.push(job);
        }

        jb_info!("Loaded {} bookmarks", merged.len());
        self.bookmarks = merged;
        self.is_loading = false;
        self.load_pending = false;
        self.loaded = true;

        if had_early_changes {
            Some(self.commit())
        } else {
            None
        }
    }

    /// Optimistically bookmarks `job`. Returns the snapshot to persist, or
    /// `None` if nothing changed or the load has not completed yet.
    pub fn add(&mut self, job: Job) -> Option<BookmarkSnapshot> {
        if !job.id.is_valid() {
            jb_error!("Attempted to bookmark job with unusable id {}", job.id);
            return None;
        }
        if self.is_bookmarked(&job.id) {
            jb_debug!("Bookmark already exists: {}", job.id);
            return None;
        }
        jb_info!("Bookmark added: {}", job.id);
        self.pending_removals.retain(|id| id != &job.id);
        self.bookmarks.push(job);
        if self.loaded {
            Some(self.commit())
        } else {
            None
        }
    }

    /// Removes the bookmark for `id`, if any.
    pub fn remove(&mut self, id: &JobId) -> Option<BookmarkSnapshot> {
        let before = self.bookmarks.len();
        self.bookmarks.retain(|job| &job.id != id);
        if !self.loaded {
            if !self.pending_removals.contains(id) {
                self.pending_removals.push(id.clone());
            }
            return None;
        }
        if self.bookmarks.len() == before {
            jb_debug!("Bookmark not found for removal: {}", id);
            return None;
        }
        jb_info!("Bookmark removed: {}", id);
        Some(self.commit())
    }

    /// Records the outcome of a persist. Memory is never rolled back.
    pub fn record_persisted(&mut self, revision: u64, result: Result<(), String>) {
        match result {
            Ok(()) => {
                self.persisted_revision = self.persisted_revision.max(revision);
                jb_debug!("Bookmarks revision {} persisted", revision);
            }
            Err(err) => {
                jb_error!("Failed to persist bookmarks revision {}: {}", revision, err);
            }
        }
    }

    fn commit(&mut self) -> BookmarkSnapshot {
        self.revision += 1;
        BookmarkSnapshot {
            revision: self.revision,
            bookmarks: self.bookmarks.clone(),
        }
    }
}
