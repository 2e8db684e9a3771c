use jobboard_core::{Job, JobId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    Refresh,
    More,
    List,
    /// 1-based position in the feed.
    Show(usize),
    /// 1-based position in the feed.
    Save(usize),
    /// Job id as printed by `saved`.
    Unsave(String),
    Saved,
    Help,
    Quit,
}

pub(crate) const HELP: &str = "commands: refresh | more | list | show <n> | save <n> | unsave <id> | saved | help | quit\n\
    (text ids that look like numbers are shown and typed quoted, e.g. unsave \"1\")";

pub(crate) fn parse_command(line: &str) -> Result<Command, String> {
    let mut parts = line.split_whitespace();
    let Some(word) = parts.next() else {
        return Ok(Command::List);
    };
    let arg = parts.next();

    let command = match (word.to_ascii_lowercase().as_str(), arg) {
        ("refresh" | "r", None) => Command::Refresh,
        ("more" | "m", None) => Command::More,
        ("list" | "l", None) => Command::List,
        ("saved", None) => Command::Saved,
        ("help" | "?", None) => Command::Help,
        ("quit" | "q" | "exit", None) => Command::Quit,
        ("show", Some(n)) => Command::Show(position(n)?),
        ("save", Some(n)) => Command::Save(position(n)?),
        ("unsave", Some(id)) => Command::Unsave(id.to_string()),
        _ => return Err(format!("unrecognized command `{}`; {HELP}", line.trim())),
    };

    if parts.next().is_some() {
        return Err(format!("too many arguments; {HELP}"));
    }
    Ok(command)
}

/// Label `saved` prints for an id. Text ids that would read as numbers are
/// quoted so `1` and `"1"` stay distinguishable.
pub(crate) fn id_label(id: &JobId) -> String {
    match id {
        JobId::Text(text) if text.parse::<f64>().is_ok() => format!("\"{text}\""),
        other => other.to_string(),
    }
}

/// Resolves an `unsave` argument against the saved jobs by printed label.
pub(crate) fn resolve_saved_id(saved: &[Job], arg: &str) -> Option<JobId> {
    saved
        .iter()
        .find(|job| id_label(&job.id) == arg)
        .map(|job| job.id.clone())
}

fn position(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("`{raw}` is not a list position")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands_and_arguments() {
        assert_eq!(parse_command("refresh"), Ok(Command::Refresh));
        assert_eq!(parse_command("  MORE "), Ok(Command::More));
        assert_eq!(parse_command(""), Ok(Command::List));
        assert_eq!(parse_command("show 3"), Ok(Command::Show(3)));
        assert_eq!(parse_command("save 1"), Ok(Command::Save(1)));
        assert_eq!(
            parse_command("unsave abc-1"),
            Ok(Command::Unsave("abc-1".to_string()))
        );
    }

    #[test]
    fn numeric_and_text_ids_resolve_separately() {
        let saved = vec![
            Job::new("1", "Text one"),
            Job::new(1u64, "Number one"),
            Job::new("abc", "C"),
        ];

        assert_eq!(id_label(&saved[0].id), "\"1\"");
        assert_eq!(id_label(&saved[1].id), "1");
        assert_eq!(resolve_saved_id(&saved, "1"), Some(JobId::from(1u64)));
        assert_eq!(resolve_saved_id(&saved, "\"1\""), Some(JobId::from("1")));
        assert_eq!(resolve_saved_id(&saved, "abc"), Some(JobId::from("abc")));
        assert_eq!(resolve_saved_id(&saved, "2"), None);
    }

    #[test]
    fn rejects_bad_positions_and_extra_words() {
        assert!(parse_command("show 0").is_err());
        assert!(parse_command("show x").is_err());
        assert!(parse_command("save").is_err());
        assert!(parse_command("refresh now").is_err());
        assert!(parse_command("dance").is_err());
    }
}
