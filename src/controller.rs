// Board controller: owns the current snapshot and applies mutations to it

use mockable::{Clock, DefaultClock};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::board::Board;
use crate::clock::DateStamp;
use crate::dnd::DropEvent;
use crate::error::BoardError;
use crate::ids::{ColumnId, TaskId};
use crate::suggestions;
use crate::task::TaskDraft;

/// First half of an edit: the task being edited and its current text.
///
/// The caller collects replacement text however it likes, then hands the
/// request back to [`BoardController::commit_edit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRequest {
    pub column: ColumnId,
    pub task: TaskId,
    pub title: String,
    pub description: String,
}

/// Sole mutator of the board.
///
/// Holds the current [`Board`] snapshot and replaces it wholesale on every
/// successful operation. A failed operation leaves the current snapshot in
/// place, so the board is always valid.
pub struct BoardController {
    board: Arc<Board>,
    clock: Box<dyn Clock>,
    stamp: DateStamp,
    suggestions: Vec<TaskDraft>,
}

impl BoardController {
    /// Controller over `board` using the wall clock and built-in presets
    pub fn new(board: Board) -> Self {
        Self {
            board: Arc::new(board),
            clock: Box::new(DefaultClock),
            stamp: DateStamp::default(),
            suggestions: suggestions::presets(),
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_date_stamp(mut self, stamp: DateStamp) -> Self {
        self.stamp = stamp;
        self
    }

    pub fn with_suggestions(mut self, suggestions: Vec<TaskDraft>) -> Self {
        self.suggestions = suggestions;
        self
    }

    /// The current snapshot
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// A handle to the current snapshot that later mutations will not affect
    pub fn snapshot(&self) -> Arc<Board> {
        Arc::clone(&self.board)
    }

    pub fn suggestions(&self) -> &[TaskDraft] {
        &self.suggestions
    }

    fn commit<T>(&mut self, op: &'static str, result: Result<(Board, T), BoardError>) -> Result<T, BoardError> {
        match result {
            Ok((next, value)) => {
                self.board = Arc::new(next);
                debug!(op, tasks = self.board.task_count(), "Board updated");
                Ok(value)
            }
            Err(e) => {
                warn!(op, error = %e, "Board unchanged");
                Err(e)
            }
        }
    }

    fn commit_unit(&mut self, op: &'static str, result: Result<Board, BoardError>) -> Result<(), BoardError> {
        self.commit(op, result.map(|board| (board, ())))
    }

    pub fn add_column(&mut self, title: &str) -> Result<ColumnId, BoardError> {
        let result = self.board.add_column(title);
        let id = self.commit("add_column", result)?;
        info!(column = %id, title = title.trim(), "Added column");
        Ok(id)
    }

    /// Delete a column along with its tasks
    pub fn delete_column(&mut self, column: &ColumnId) -> Result<(), BoardError> {
        let discarded = self.board.column(column).map(|c| c.len()).unwrap_or(0);
        let result = self.board.delete_column(column);
        self.commit_unit("delete_column", result)?;
        info!(column = %column, discarded, "Deleted column");
        Ok(())
    }

    pub fn rename_column(&mut self, column: &ColumnId, title: &str) -> Result<(), BoardError> {
        let result = self.board.rename_column(column, title);
        self.commit_unit("rename_column", result)
    }

    /// Add a task to `column`, stamped with today's date
    pub fn add_task(&mut self, column: &ColumnId, title: &str, description: &str) -> Result<TaskId, BoardError> {
        let created_at = self.stamp.stamp(self.clock.as_ref());
        let result = self.board.add_task(column, title, description, &created_at);
        let id = self.commit("add_task", result)?;
        info!(task = %id, column = %column, "Added task");
        Ok(id)
    }

    /// Add a preset task to the default column
    pub fn add_suggested_task(&mut self, draft: &TaskDraft) -> Result<TaskId, BoardError> {
        let created_at = self.stamp.stamp(self.clock.as_ref());
        let result = self.board.add_suggested_task(draft, &created_at);
        let id = self.commit("add_suggested_task", result)?;
        info!(task = %id, column = %self.board.default_column_id(), "Added suggested task");
        Ok(id)
    }

    /// Start editing a task in `column`
    pub fn request_edit(&self, column: &ColumnId, task: TaskId) -> Result<EditRequest, BoardError> {
        let current = self
            .board
            .column(column)
            .ok_or_else(|| BoardError::ColumnNotFound(column.clone()))?
            .task(task)
            .ok_or_else(|| BoardError::TaskNotFound {
                task,
                column: column.clone(),
            })?;

        Ok(EditRequest {
            column: column.clone(),
            task,
            title: current.title().to_string(),
            description: current.description().to_string(),
        })
    }

    /// Finish an edit with replacement text; both fields must be non-empty
    pub fn commit_edit(&mut self, request: &EditRequest, title: &str, description: &str) -> Result<(), BoardError> {
        let result = self.board.edit_task(&request.column, request.task, title, description);
        self.commit_unit("edit_task", result)?;
        info!(task = %request.task, "Edited task");
        Ok(())
    }

    pub fn delete_task(&mut self, column: &ColumnId, task: TaskId) -> Result<(), BoardError> {
        let result = self.board.delete_task(column, task);
        self.commit_unit("delete_task", result)?;
        info!(task = %task, column = %column, "Deleted task");
        Ok(())
    }

    /// Move a task to the end of `to`; safe when `from == to`
    pub fn move_task(&mut self, task: TaskId, from: &ColumnId, to: &ColumnId) -> Result<(), BoardError> {
        let result = self.board.move_task(task, from, to);
        self.commit_unit("move_task", result)?;
        info!(task = %task, from = %from, to = %to, "Moved task");
        Ok(())
    }

    /// Apply a drop delivered by the drag coordinator
    pub fn handle_drop(&mut self, event: &DropEvent) -> Result<(), BoardError> {
        self.move_task(event.task, &event.origin, &event.target)
    }
}

impl Default for BoardController {
    fn default() -> Self {
        Self::new(Board::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::dnd::DragCoordinator;
    use crate::error::Field;
    use chrono::NaiveDate;

    fn controller() -> BoardController {
        BoardController::default().with_clock(FixedClock(NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()))
    }

    fn todo() -> ColumnId {
        ColumnId::from("1")
    }

    fn doing() -> ColumnId {
        ColumnId::from("2")
    }

    fn count(ctl: &BoardController, column: &ColumnId) -> usize {
        ctl.board().column(column).unwrap().len()
    }

    #[test]
    fn test_walkthrough_add_move_delete() {
        let mut ctl = controller();

        let id = ctl.add_task(&todo(), "Write spec", "Draft section 1").unwrap();
        let (_, task) = ctl.board().find_task(id).unwrap();
        assert_eq!(task.title(), "Write spec");
        assert_eq!(task.created_at(), "10/17/2026");
        let before = Arc::clone(task);

        ctl.move_task(id, &todo(), &doing()).unwrap();
        assert_eq!(count(&ctl, &todo()), 0);
        let (column, task) = ctl.board().find_task(id).unwrap();
        assert_eq!(column.id(), &doing());
        assert_eq!(**task, *before);

        ctl.delete_task(&doing(), id).unwrap();
        assert_eq!(count(&ctl, &doing()), 0);
        assert_eq!(ctl.board().task_count(), 0);
    }

    #[test]
    fn test_failed_operation_keeps_snapshot() {
        let mut ctl = controller();
        ctl.add_task(&todo(), "a", "b").unwrap();
        let before = ctl.snapshot();

        assert!(ctl.add_task(&todo(), "", "b").is_err());
        assert!(ctl.add_column("  ").is_err());
        assert!(ctl.delete_column(&ColumnId::from("missing")).is_err());
        assert!(Arc::ptr_eq(&before, &ctl.snapshot()));
    }

    #[test]
    fn test_conservation_of_tasks() {
        let mut ctl = controller();
        let mut added = 0;
        let mut deleted = 0;

        let mut ids = Vec::new();
        for i in 0..6 {
            let column = if i % 2 == 0 { todo() } else { doing() };
            ids.push((ctl.add_task(&column, &format!("t{}", i), "d").unwrap(), column));
            added += 1;
        }

        ctl.move_task(ids[0].0, &todo(), &doing()).unwrap();
        ctl.move_task(ids[1].0, &doing(), &doing()).unwrap();
        assert!(ctl.move_task(ids[2].0, &doing(), &todo()).is_err());

        ctl.delete_task(&doing(), ids[0].0).unwrap();
        deleted += 1;

        assert_eq!(ctl.board().task_count(), added - deleted);
    }

    #[test]
    fn test_two_step_edit() {
        let mut ctl = controller();
        let id = ctl.add_task(&todo(), "Old", "Old desc").unwrap();

        let request = ctl.request_edit(&todo(), id).unwrap();
        assert_eq!(request.title, "Old");
        assert_eq!(request.description, "Old desc");

        ctl.commit_edit(&request, "New", "New desc").unwrap();
        let (_, task) = ctl.board().find_task(id).unwrap();
        assert_eq!(task.title(), "New");
        assert_eq!(task.created_at(), "10/17/2026");
    }

    #[test]
    fn test_edit_with_empty_text_is_rejected() {
        let mut ctl = controller();
        let id = ctl.add_task(&todo(), "Old", "Old desc").unwrap();
        let request = ctl.request_edit(&todo(), id).unwrap();

        let err = ctl.commit_edit(&request, "New", "").unwrap_err();
        assert_eq!(
            err,
            BoardError::Validation {
                field: Field::TaskDescription
            }
        );
        assert_eq!(ctl.board().find_task(id).unwrap().1.title(), "Old");
    }

    #[test]
    fn test_edit_after_task_moved_away() {
        let mut ctl = controller();
        let id = ctl.add_task(&todo(), "t", "d").unwrap();
        let request = ctl.request_edit(&todo(), id).unwrap();
        ctl.move_task(id, &todo(), &doing()).unwrap();

        assert!(ctl.commit_edit(&request, "x", "y").unwrap_err().is_not_found());
    }

    #[test]
    fn test_request_edit_unknown_task() {
        let ctl = controller();
        let missing = TaskId::generate();
        assert!(ctl.request_edit(&todo(), missing).unwrap_err().is_not_found());
        assert!(ctl.request_edit(&ColumnId::from("x"), missing).unwrap_err().is_not_found());
    }

    #[test]
    fn test_suggested_task_lands_in_default_column() {
        let mut ctl = controller();
        ctl.add_column("Review").unwrap();
        ctl.rename_column(&todo(), "Inbox").unwrap();
        ctl.delete_column(&ColumnId::from("3")).unwrap();

        let draft = TaskDraft::new("Call Manager", "Follow up on project status");
        let id = ctl.add_suggested_task(&draft).unwrap();
        let (column, task) = ctl.board().find_task(id).unwrap();
        assert_eq!(column.id(), &todo());
        assert_eq!(task.description(), "Follow up on project status");
    }

    #[test]
    fn test_drop_event_moves_task() {
        let mut ctl = controller();
        let id = ctl.add_task(&todo(), "t", "d").unwrap();
        let mut dnd = DragCoordinator::new();

        dnd.begin_drag(id, todo());
        let event = dnd.drop_on(doing()).unwrap();
        ctl.handle_drop(&event).unwrap();

        assert_eq!(count(&ctl, &todo()), 0);
        assert_eq!(count(&ctl, &doing()), 1);
    }

    #[test]
    fn test_drop_on_origin_keeps_task_once() {
        let mut ctl = controller();
        let a = ctl.add_task(&todo(), "a", "d").unwrap();
        let b = ctl.add_task(&todo(), "b", "d").unwrap();
        let mut dnd = DragCoordinator::new();

        dnd.begin_drag(a, todo());
        let event = dnd.drop_on(todo()).unwrap();
        ctl.handle_drop(&event).unwrap();

        let ids: Vec<TaskId> = ctl.board().column(&todo()).unwrap().tasks().iter().map(|t| t.id()).collect();
        assert_eq!(ids, vec![b, a]);
    }

    #[test]
    fn test_old_snapshot_survives_mutation() {
        let mut ctl = controller();
        let id = ctl.add_task(&todo(), "t", "d").unwrap();
        let snapshot = ctl.snapshot();

        ctl.move_task(id, &todo(), &doing()).unwrap();
        ctl.delete_column(&todo()).unwrap();

        assert_eq!(snapshot.column(&todo()).unwrap().len(), 1);
        assert!(ctl.board().column(&todo()).is_none());
    }

    #[test]
    fn test_custom_date_stamp() {
        let mut ctl = controller().with_date_stamp(DateStamp::new("%Y-%m-%d").unwrap());
        let id = ctl.add_suggested_task(&TaskDraft::new("Send Email", "Update team on deadlines")).unwrap();
        assert_eq!(ctl.board().find_task(id).unwrap().1.created_at(), "2026-10-17");
    }
}
