// Error taxonomy for board mutations

use thiserror::Error;

use crate::ids::{ColumnId, TaskId};

/// Why a board mutation was suppressed.
///
/// Every variant means the board is unchanged: operations return a new
/// snapshot only on success.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardError {
    /// A required text field was empty after trimming.
    #[error("{field} must not be empty")]
    Validation { field: Field },

    /// Two columns on one board would share this id.
    #[error("duplicate column id: {0}")]
    DuplicateColumn(ColumnId),

    /// The referenced column is not on the board.
    #[error("column not found: {0}")]
    ColumnNotFound(ColumnId),

    /// The referenced task is not in the expected column.
    #[error("task {task} not found in column {column}")]
    TaskNotFound { task: TaskId, column: ColumnId },
}

/// Text fields subject to validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    ColumnTitle,
    TaskTitle,
    TaskDescription,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::ColumnTitle => write!(f, "column title"),
            Field::TaskTitle => write!(f, "task title"),
            Field::TaskDescription => write!(f, "task description"),
        }
    }
}

impl BoardError {
    pub(crate) fn empty(field: Field) -> Self {
        BoardError::Validation { field }
    }

    /// True for the not-found family of errors
    pub fn is_not_found(&self) -> bool {
        matches!(self, BoardError::ColumnNotFound(_) | BoardError::TaskNotFound { .. })
    }
}

/// Trim `value` and reject it if nothing is left.
pub(crate) fn require_text(value: &str, field: Field) -> Result<String, BoardError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(BoardError::empty(field));
    }
    Ok(trimmed.to_string())
}
