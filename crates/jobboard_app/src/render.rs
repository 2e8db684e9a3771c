use std::fmt::Write as _;

use jobboard_core::{format_salary, limit_text, AppViewModel, FeedStatus, Job, JobRowView};

use crate::commands::id_label;

const TITLE_WIDTH: usize = 48;
const DESCRIPTION_WIDTH: usize = 400;

pub(crate) fn status_line(view: &AppViewModel) -> String {
    let status = match view.status {
        FeedStatus::LoadingInitial => "loading".to_string(),
        FeedStatus::LoadingMore => "loading more".to_string(),
        FeedStatus::Error => format!("error: {}", view.error.as_deref().unwrap_or("unknown")),
        FeedStatus::Idle if view.has_more => "ready".to_string(),
        FeedStatus::Idle => "end of feed".to_string(),
    };
    let saved = if view.is_loading_bookmarks {
        "loading".to_string()
    } else {
        view.bookmarks.len().to_string()
    };
    format!("[{} jobs | {} | saved {}]", view.jobs.len(), status, saved)
}

pub(crate) fn job_list(rows: &[JobRowView]) -> String {
    if rows.is_empty() {
        return "  (no jobs)\n".to_string();
    }
    let mut out = String::new();
    for (index, row) in rows.iter().enumerate() {
        let marker = if row.bookmarked { '*' } else { ' ' };
        let _ = writeln!(
            out,
            "{:>3}.{} {}  [{}]",
            index + 1,
            marker,
            limit_text(&row.title, TITLE_WIDTH),
            row.salary
        );
        if let Some(location) = &row.location {
            let _ = writeln!(out, "       {location}");
        }
    }
    out
}

pub(crate) fn saved_list(rows: &[JobRowView]) -> String {
    if rows.is_empty() {
        return "  (no saved jobs)\n".to_string();
    }
    let mut out = String::new();
    for row in rows {
        let _ = writeln!(
            out,
            "  id {}: {}",
            id_label(&row.id),
            limit_text(&row.title, TITLE_WIDTH)
        );
    }
    out
}

pub(crate) fn job_details(job: &Job, bookmarked: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}{}", job.title_text(), if bookmarked { "  (saved)" } else { "" });
    let _ = writeln!(out, "  id: {}", job.id);
    let _ = writeln!(out, "  salary: {}", format_salary(job.salary()));
    let fields = [
        ("location", job.location()),
        ("experience", job.experience()),
        ("type", job.job_type()),
        ("qualification", job.qualification()),
        ("english", job.english_level()),
        ("phone", job.phone_number()),
    ];
    for (label, value) in fields {
        if let Some(value) = value {
            let _ = writeln!(out, "  {label}: {value}");
        }
    }
    if let Some(description) = job.description() {
        let _ = writeln!(out, "\n{}", limit_text(&description, DESCRIPTION_WIDTH));
    }
    let _ = writeln!(out, "\n  share: {}", job.share_message());
    out
}
