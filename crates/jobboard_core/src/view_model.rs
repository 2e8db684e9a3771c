use crate::{FeedStatus, JobId};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub jobs: Vec<JobRowView>,
    pub status: FeedStatus,
    pub is_loading: bool,
    pub is_loading_more: bool,
    pub error: Option<String>,
    pub has_more: bool,
    pub bookmarks: Vec<JobRowView>,
    pub is_loading_bookmarks: bool,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct JobRowView {
    pub id: JobId,
    pub title: String,
    pub location: Option<String>,
    pub salary: String,
    pub phone: Option<String>,
    pub bookmarked: bool,
}
