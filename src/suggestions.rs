// Preset tasks and the board's well-known default columns

use crate::column::same_title;
use crate::task::TaskDraft;

/// Well-known id of the default ("To Do") column
pub const DEFAULT_COLUMN_ID: &str = "1";

/// Columns every fresh board starts with, as (id, title)
pub const DEFAULT_COLUMNS: &[(&str, &str)] = &[(DEFAULT_COLUMN_ID, "To Do"), ("2", "Doing"), ("3", "Done")];

/// Built-in suggested tasks, as (title, description)
pub const PRESETS: &[(&str, &str)] = &[
    ("Call Manager", "Follow up on project status"),
    ("Schedule Meeting", "Plan team sync for next week"),
    ("Prepare Report", "Summarize project progress"),
    ("Review Code", "Check recent pull requests"),
    ("Send Email", "Update team on deadlines"),
    ("Research Topic", "Look into new tools"),
    ("Write Documentation", "Update API docs"),
    ("Create Presentation", "Prepare slides for the meeting"),
    ("Brainstorm Ideas", "Discuss with the team"),
    ("Conduct User Testing", "Gather feedback on new features"),
];

/// The built-in presets as drafts
pub fn presets() -> Vec<TaskDraft> {
    PRESETS
        .iter()
        .map(|(title, description)| TaskDraft::new(*title, *description))
        .collect()
}

/// Pick a suggestion by 1-based position or case-insensitive title
pub fn lookup<'a>(suggestions: &'a [TaskDraft], key: &str) -> Option<&'a TaskDraft> {
    let key = key.trim();
    if let Ok(n) = key.parse::<usize>() {
        return n.checked_sub(1).and_then(|i| suggestions.get(i));
    }
    suggestions.iter().find(|s| same_title(&s.title, key))
}
