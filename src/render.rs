// Text and JSON views of a board

use colored::Colorize;
use eyre::{Context, Result};
use std::fmt;

use crate::board::Board;
use crate::column::Column;
use crate::task::{Task, TaskDraft};

/// Text view of every column and its task cards (colored on a tty)
pub struct BoardView<'a>(pub &'a Board);

impl fmt::Display for BoardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board = self.0;
        if board.columns().is_empty() {
            return writeln!(f, "{}", "(no columns)".dimmed());
        }
        for column in board.columns() {
            write_column(f, column, column.id() == board.default_column_id())?;
        }
        Ok(())
    }
}

fn write_column(f: &mut fmt::Formatter<'_>, column: &Column, is_default: bool) -> fmt::Result {
    let marker = if is_default { " *" } else { "" };
    writeln!(
        f,
        "{} {}{} ({})",
        column.title().bold(),
        format!("[{}]", column.id()).dimmed(),
        marker,
        column.len()
    )?;

    if column.is_empty() {
        writeln!(f, "  {}", "no tasks".dimmed())?;
    }
    for task in column.tasks() {
        write_task(f, task)?;
    }
    Ok(())
}

fn write_task(f: &mut fmt::Formatter<'_>, task: &Task) -> fmt::Result {
    writeln!(f, "  - {} {}", task.title().cyan(), format!("({})", task.id().short()).dimmed())?;
    writeln!(f, "    {}", task.description())?;
    writeln!(f, "    {}", format!("Created on: {}", task.created_at()).italic())
}

/// Numbered list of suggested tasks
pub struct SuggestionsView<'a>(pub &'a [TaskDraft]);

impl fmt::Display for SuggestionsView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, draft) in self.0.iter().enumerate() {
            writeln!(f, "{:>2}. {} - {}", i + 1, draft.title.yellow(), draft.description)?;
        }
        Ok(())
    }
}

pub fn board_text(board: &Board) -> String {
    BoardView(board).to_string()
}

pub fn suggestions_text(suggestions: &[TaskDraft]) -> String {
    SuggestionsView(suggestions).to_string()
}

/// Pretty-printed JSON view of the board
pub fn board_json(board: &Board) -> Result<String> {
    serde_json::to_string_pretty(board).context("Failed to serialize board")
}
