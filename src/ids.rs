// Identifiers for columns and tasks

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Number of trailing hex digits shown as a task's short handle
const SHORT_LEN: usize = 8;

/// Unique identifier for a task, unique across the whole board.
///
/// Backed by a UUID v7, so ids are time-ordered and never reused within a
/// process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Generate a fresh identifier
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }

    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Trailing digits of the id, used as a human-typeable handle.
    ///
    /// The leading digits of a v7 UUID encode the creation time, so tasks
    /// created close together share a prefix but not a suffix.
    pub fn short(&self) -> String {
        let simple = self.0.simple().to_string();
        simple[simple.len() - SHORT_LEN..].to_string()
    }

    /// True if `handle` is this id (hyphenated or simple) or its short suffix
    pub fn matches(&self, handle: &str) -> bool {
        let handle = handle.trim().to_ascii_lowercase();
        if handle.is_empty() {
            return false;
        }
        let simple = self.0.simple().to_string();
        handle == self.0.hyphenated().to_string() || handle == simple || simple.ends_with(&handle)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier for a column.
///
/// Columns created at runtime get a generated UUID v7; configured columns
/// may use a fixed well-known id such as `"1"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnId(String);

impl ColumnId {
    /// Generate a fresh identifier
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ColumnId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ColumnId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
