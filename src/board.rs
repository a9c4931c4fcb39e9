// Board snapshots and the pure operations that derive new ones

use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;

use crate::column::{Column, same_title};
use crate::error::BoardError;
use crate::ids::{ColumnId, TaskId};
use crate::suggestions::DEFAULT_COLUMNS;
use crate::task::{Task, TaskDraft};

/// The full set of columns and their tasks at a point in time.
///
/// A `Board` is never mutated. Each operation takes `&self` and returns a new
/// board; columns that the operation does not touch are shared with the old
/// snapshot through `Arc`. An `Err` means no new board was produced, so the
/// caller's current snapshot stays valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    default_column: ColumnId,
    columns: Vec<Arc<Column>>,
}

impl Board {
    /// Board over `columns`, with suggested tasks routed to `default_column`.
    ///
    /// Fails if two columns share an id.
    pub fn from_columns(default_column: ColumnId, columns: Vec<Column>) -> Result<Self, BoardError> {
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.id()) {
                return Err(BoardError::DuplicateColumn(column.id().clone()));
            }
        }

        Ok(Self {
            default_column,
            columns: columns.into_iter().map(Arc::new).collect(),
        })
    }

    /// Id of the column that receives suggested tasks
    pub fn default_column_id(&self) -> &ColumnId {
        &self.default_column
    }

    pub fn columns(&self) -> &[Arc<Column>] {
        &self.columns
    }

    pub fn column(&self, id: &ColumnId) -> Option<&Arc<Column>> {
        self.columns.iter().find(|c| c.id() == id)
    }

    /// First column whose title matches, ignoring case
    pub fn column_by_title(&self, title: &str) -> Option<&Arc<Column>> {
        let title = title.trim();
        self.columns.iter().find(|c| same_title(c.title(), title))
    }

    /// Locate a task anywhere on the board
    pub fn find_task(&self, id: TaskId) -> Option<(&Arc<Column>, &Arc<Task>)> {
        self.columns
            .iter()
            .find_map(|c| c.task(id).map(|t| (c, t)))
    }

    /// All tasks, column by column
    pub fn tasks(&self) -> impl Iterator<Item = &Arc<Task>> {
        self.columns.iter().flat_map(|c| c.tasks().iter())
    }

    pub fn task_count(&self) -> usize {
        self.columns.iter().map(|c| c.len()).sum()
    }

    fn index_of(&self, id: &ColumnId) -> Result<usize, BoardError> {
        self.columns
            .iter()
            .position(|c| c.id() == id)
            .ok_or_else(|| BoardError::ColumnNotFound(id.clone()))
    }

    fn with_column_at(&self, index: usize, column: Column) -> Self {
        let mut columns = self.columns.clone();
        columns[index] = Arc::new(column);
        Self {
            default_column: self.default_column.clone(),
            columns,
        }
    }

    /// Append a new empty column; returns the new board and the column's id
    pub fn add_column(&self, title: &str) -> Result<(Self, ColumnId), BoardError> {
        let column = Column::new(title)?;
        let id = column.id().clone();
        let mut columns = self.columns.clone();
        columns.push(Arc::new(column));
        Ok((
            Self {
                default_column: self.default_column.clone(),
                columns,
            },
            id,
        ))
    }

    /// Remove a column and every task in it
    pub fn delete_column(&self, id: &ColumnId) -> Result<Self, BoardError> {
        let index = self.index_of(id)?;
        let mut columns = self.columns.clone();
        columns.remove(index);
        Ok(Self {
            default_column: self.default_column.clone(),
            columns,
        })
    }

    pub fn rename_column(&self, id: &ColumnId, title: &str) -> Result<Self, BoardError> {
        let index = self.index_of(id)?;
        let column = self.columns[index].renamed(title)?;
        Ok(self.with_column_at(index, column))
    }

    /// Append a new task to `column`, stamped with `created_at`
    pub fn add_task(
        &self,
        column: &ColumnId,
        title: &str,
        description: &str,
        created_at: &str,
    ) -> Result<(Self, TaskId), BoardError> {
        let index = self.index_of(column)?;
        let task = Task::new(title, description, created_at)?;
        let id = task.id();
        let column = self.columns[index].appended(Arc::new(task));
        Ok((self.with_column_at(index, column), id))
    }

    /// Append a preset task to the default column
    pub fn add_suggested_task(&self, draft: &TaskDraft, created_at: &str) -> Result<(Self, TaskId), BoardError> {
        self.add_task(&self.default_column, &draft.title, &draft.description, created_at)
    }

    /// Overwrite a task's title and description; id and creation date are kept
    pub fn edit_task(&self, column: &ColumnId, task: TaskId, title: &str, description: &str) -> Result<Self, BoardError> {
        let index = self.index_of(column)?;
        let current = self.columns[index].task(task).ok_or_else(|| BoardError::TaskNotFound {
            task,
            column: column.clone(),
        })?;
        let edited = current.edited(title, description)?;
        let column = self.columns[index].replaced(task, edited)?;
        Ok(self.with_column_at(index, column))
    }

    pub fn delete_task(&self, column: &ColumnId, task: TaskId) -> Result<Self, BoardError> {
        let index = self.index_of(column)?;
        let (column, _) = self.columns[index].removed(task)?;
        Ok(self.with_column_at(index, column))
    }

    /// Move `task` from `from` to the end of `to`.
    ///
    /// When `from == to` the append is applied to the column after removal,
    /// so the task ends up last exactly once.
    pub fn move_task(&self, task: TaskId, from: &ColumnId, to: &ColumnId) -> Result<Self, BoardError> {
        let source = self.index_of(from)?;
        let dest = self.index_of(to)?;
        let (remaining, moved) = self.columns[source].removed(task)?;

        if source == dest {
            return Ok(self.with_column_at(source, remaining.appended(moved)));
        }

        let destination = self.columns[dest].appended(moved);
        Ok(self.with_column_at(source, remaining).with_column_at(dest, destination))
    }
}

impl Default for Board {
    /// The three standard columns: To Do, Doing, Done
    fn default() -> Self {
        let columns = DEFAULT_COLUMNS
            .iter()
            .filter_map(|(id, title)| Column::with_id(ColumnId::from(*id), title).ok())
            .map(Arc::new)
            .collect();
        Self {
            default_column: ColumnId::from(DEFAULT_COLUMNS[0].0),
            columns,
        }
    }
}
