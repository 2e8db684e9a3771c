//! Jobboard core: pure feed and bookmark state machines plus view-model helpers.
mod bookmarks;
mod effect;
mod feed;
mod format;
mod job;
mod msg;
mod state;
mod update;
mod view_model;

pub use bookmarks::{BookmarkSnapshot, BookmarkState};
pub use effect::Effect;
pub use feed::{FeedState, FeedStatus, FetchFailure, FetchKind, PageOutcome, PageRequest, RequestId};
pub use format::{format_salary, limit_text, SALARY_NOT_SPECIFIED};
pub use job::{Job, JobId};
pub use msg::Msg;
pub use state::AppState;
pub use update::update;
pub use view_model::{AppViewModel, JobRowView};
