// Columns and their ordered task sequences

use serde::Serialize;
use std::sync::Arc;

use crate::error::{BoardError, Field, require_text};
use crate::ids::{ColumnId, TaskId};
use crate::task::Task;

/// A named, ordered bucket of tasks.
///
/// Columns are immutable values; every change produces a new column that
/// shares unchanged tasks with the old one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    id: ColumnId,
    title: String,
    tasks: Vec<Arc<Task>>,
}

impl Column {
    /// New empty column with a generated id
    pub fn new(title: &str) -> Result<Self, BoardError> {
        Self::with_id(ColumnId::generate(), title)
    }

    /// New empty column with a caller-chosen id (e.g. a well-known default)
    pub fn with_id(id: ColumnId, title: &str) -> Result<Self, BoardError> {
        Ok(Self {
            id,
            title: require_text(title, Field::ColumnTitle)?,
            tasks: Vec::new(),
        })
    }

    pub fn id(&self) -> &ColumnId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Tasks in insertion order
    pub fn tasks(&self) -> &[Arc<Task>] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn task(&self, id: TaskId) -> Option<&Arc<Task>> {
        self.tasks.iter().find(|t| t.id() == id)
    }

    pub fn contains(&self, id: TaskId) -> bool {
        self.task(id).is_some()
    }

    fn position(&self, id: TaskId) -> Result<usize, BoardError> {
        self.tasks
            .iter()
            .position(|t| t.id() == id)
            .ok_or_else(|| BoardError::TaskNotFound {
                task: id,
                column: self.id.clone(),
            })
    }

    pub(crate) fn renamed(&self, title: &str) -> Result<Self, BoardError> {
        Ok(Self {
            id: self.id.clone(),
            title: require_text(title, Field::ColumnTitle)?,
            tasks: self.tasks.clone(),
        })
    }

    fn with_tasks(&self, tasks: Vec<Arc<Task>>) -> Self {
        Self {
            id: self.id.clone(),
            title: self.title.clone(),
            tasks,
        }
    }

    pub(crate) fn appended(&self, task: Arc<Task>) -> Self {
        let mut tasks = self.tasks.clone();
        tasks.push(task);
        self.with_tasks(tasks)
    }

    /// This column minus task `id`, plus the removed task
    pub(crate) fn removed(&self, id: TaskId) -> Result<(Self, Arc<Task>), BoardError> {
        let index = self.position(id)?;
        let mut tasks = self.tasks.clone();
        let task = tasks.remove(index);
        Ok((self.with_tasks(tasks), task))
    }

    /// This column with task `id` swapped for `task`, keeping its position
    pub(crate) fn replaced(&self, id: TaskId, task: Task) -> Result<Self, BoardError> {
        let index = self.position(id)?;
        let mut tasks = self.tasks.clone();
        tasks[index] = Arc::new(task);
        Ok(self.with_tasks(tasks))
    }
}

/// Title equality ignoring surrounding whitespace and case (Unicode-aware)
pub(crate) fn same_title(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}
