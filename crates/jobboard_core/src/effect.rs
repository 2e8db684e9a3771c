use crate::{BookmarkSnapshot, PageRequest};

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    FetchPage(PageRequest),
    /// A refresh finished; `success` is the indicator handed back to the caller.
    RefreshFinished { success: bool },
    LoadBookmarks,
    PersistBookmarks(BookmarkSnapshot),
}
