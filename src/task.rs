// Task cards

use serde::{Deserialize, Serialize};

use crate::error::{BoardError, Field, require_text};
use crate::ids::TaskId;

/// A titled, described unit of work with a creation date.
///
/// Title and description are never empty; `id` and `created_at` are fixed at
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: String,
    created_at: String,
}

impl Task {
    /// Build a task with a fresh id, validating both text fields
    pub fn new(title: &str, description: &str, created_at: impl Into<String>) -> Result<Self, BoardError> {
        let title = require_text(title, Field::TaskTitle)?;
        let description = require_text(description, Field::TaskDescription)?;
        Ok(Self {
            id: TaskId::generate(),
            title,
            description,
            created_at: created_at.into(),
        })
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn created_at(&self) -> &str {
        &self.created_at
    }

    /// Copy of this task with new text; id and creation date carried over
    pub fn edited(&self, title: &str, description: &str) -> Result<Self, BoardError> {
        let title = require_text(title, Field::TaskTitle)?;
        let description = require_text(description, Field::TaskDescription)?;
        Ok(Self {
            title,
            description,
            ..self.clone()
        })
    }
}

/// Title/description pair for a task that does not exist yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_new() {
        let task = Task::new("Write spec", "Draft section 1", "10/17/2026").unwrap();
        assert_eq!(task.title(), "Write spec");
        assert_eq!(task.description(), "Draft section 1");
        assert_eq!(task.created_at(), "10/17/2026");
    }

    #[test]
    fn test_task_new_rejects_empty_fields() {
        assert_eq!(
            Task::new("", "desc", "d").unwrap_err(),
            BoardError::Validation { field: Field::TaskTitle }
        );
        assert_eq!(
            Task::new("title", "  ", "d").unwrap_err(),
            BoardError::Validation {
                field: Field::TaskDescription
            }
        );
    }

    #[test]
    fn test_task_edited_keeps_identity() {
        let task = Task::new("Old", "Old desc", "1/1/2026").unwrap();
        let edited = task.edited("New", "New desc").unwrap();

        assert_eq!(edited.id(), task.id());
        assert_eq!(edited.created_at(), task.created_at());
        assert_eq!(edited.title(), "New");
        assert_eq!(edited.description(), "New desc");
        // Source task unchanged
        assert_eq!(task.title(), "Old");
    }

    #[test]
    fn test_task_edited_rejects_empty() {
        let task = Task::new("Old", "Old desc", "1/1/2026").unwrap();
        assert!(task.edited("New", "").is_err());
        assert!(task.edited("", "New desc").is_err());
    }

    #[test]
    fn test_task_serialization() {
        let task = Task::new("Title", "Desc", "1/1/2026").unwrap();
        let json = serde_json::to_string(&task).unwrap();
        assert!(json.contains("\"title\":\"Title\""));
        assert!(json.contains("\"created_at\":\"1/1/2026\""));
        assert!(json.contains(&task.id().to_string()));
    }
}
