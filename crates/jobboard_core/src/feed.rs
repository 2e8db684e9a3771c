use jobboard_logging::{jb_debug, jb_info, jb_warn};
use serde_json::Value;

use crate::Job;

/// Stamp identifying one fetch; completions carrying another stamp are stale.
pub type RequestId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    /// Page 1, replacing the feed.
    Initial,
    /// Next page, appended to the feed.
    More,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub request: RequestId,
    pub page: u32,
    pub kind: FetchKind,
}

/// Why a page fetch failed. The display text is what lands in the feed's
/// `error` field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchFailure {
    #[error("{message}")]
    Network { message: String },
    #[error("{message}")]
    Http { status: u16, message: String },
    #[error("{message}")]
    Format { message: String },
}

/// Derived view of the feed's flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedStatus {
    #[default]
    Idle,
    LoadingInitial,
    LoadingMore,
    Error,
}

/// Result of applying a completed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageOutcome {
    pub request: PageRequest,
    pub success: bool,
    pub raw_count: usize,
    pub accepted: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeedState {
    jobs: Vec<Job>,
    page: u32,
    is_loading: bool,
    is_loading_more: bool,
    error: Option<String>,
    has_more: bool,
    in_flight: Option<PageRequest>,
    last_request: RequestId,
}

impl Default for FeedState {
    fn default() -> Self {
        Self {
            jobs: Vec::new(),
            page: 1,
            is_loading: false,
            is_loading_more: false,
            error: None,
            has_more: true,
            in_flight: None,
            last_request: 0,
        }
    }
}

impl FeedState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_loading_more(&self) -> bool {
        self.is_loading_more
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn in_flight(&self) -> Option<PageRequest> {
        self.in_flight
    }

    pub fn status(&self) -> FeedStatus {
        if self.is_loading {
            FeedStatus::LoadingInitial
        } else if self.is_loading_more {
            FeedStatus::LoadingMore
        } else if self.error.is_some() {
            FeedStatus::Error
        } else {
            FeedStatus::Idle
        }
    }

    /// Starts a reload of page 1.
    ///
    /// Returns `None` when a refresh is already in flight. A pending load-more
    /// is superseded: its flag is cleared and its completion will be stale.
    pub fn begin_refresh(&mut self) -> Option<PageRequest> {
        if self.is_loading {
            jb_debug!("Refresh blocked: a refresh is already in flight");
            return None;
        }
        if let Some(pending) = self.in_flight.take() {
            jb_info!(
                "Refresh supersedes pending page {} (request {})",
                pending.page,
                pending.request
            );
            self.is_loading_more = false;
        }

        self.is_loading = true;
        self.page = 1;
        self.jobs.clear();
        self.has_more = true;
        self.error = None;
        Some(self.issue(1, FetchKind::Initial))
    }

    /// Starts a fetch of the page after the current one.
    ///
    /// Returns `None` while any fetch is in flight or once the endpoint has
    /// reported an empty page.
    pub fn begin_load_more(&mut self) -> Option<PageRequest> {
        if self.is_loading || self.is_loading_more || !self.has_more {
            jb_debug!(
                "Load more blocked: is_loading={} is_loading_more={} has_more={}",
                self.is_loading,
                self.is_loading_more,
                self.has_more
            );
            return None;
        }

        self.is_loading_more = true;
        self.error = None;
        Some(self.issue(self.page + 1, FetchKind::More))
    }

    /// Applies the result of a fetch started by `begin_refresh` or
    /// `begin_load_more`.
    ///
    /// Returns `None` and leaves the state untouched when `request` is not the
    /// fetch currently in flight.
    pub fn complete_page(
        &mut self,
        request: RequestId,
        result: Result<Vec<Value>, FetchFailure>,
    ) -> Option<PageOutcome> {
        let pending = match self.in_flight {
            Some(pending) if pending.request == request => pending,
            _ => {
                jb_debug!("Discarding stale page result for request {}", request);
                return None;
            }
        };
        self.in_flight = None;
        match pending.kind {
            FetchKind::Initial => self.is_loading = false,
            FetchKind::More => self.is_loading_more = false,
        }

        let raw = match result {
            Ok(raw) => raw,
            Err(failure) => {
                jb_warn!("Fetch of page {} failed: {}", pending.page, failure);
                self.error = Some(failure.to_string());
                return Some(PageOutcome {
                    request: pending,
                    success: false,
                    raw_count: 0,
                    accepted: 0,
                });
            }
        };

        let valid: Vec<Job> = raw.iter().filter_map(Job::from_value).collect();
        jb_info!(
            "Filtered {} raw items down to {} valid jobs for page {}",
            raw.len(),
            valid.len(),
            pending.page
        );
        if valid.is_empty() && !raw.is_empty() {
            jb_warn!("Page {} returned items, but none were valid jobs", pending.page);
        }
        if raw.is_empty() {
            jb_info!("No more raw items (page {}); pagination ends", pending.page);
            self.has_more = false;
        }

        let accepted = valid.len();
        if pending.page == 1 {
            self.jobs = valid;
        } else {
            self.jobs.extend(valid);
        }
        self.page = pending.page;
        self.error = None;

        Some(PageOutcome {
            request: pending,
            success: true,
            raw_count: raw.len(),
            accepted,
        })
    }

    fn issue(&mut self, page: u32, kind: FetchKind) -> PageRequest {
        self.last_request += 1;
        let request = PageRequest {
            request: self.last_request,
            page,
            kind,
        };
        jb_info!("Fetch start: page={} kind={:?} request={}", page, kind, request.request);
        self.in_flight = Some(request);
        request
    }
}
