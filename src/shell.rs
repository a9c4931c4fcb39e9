// Line-oriented front end: parses commands and forwards them to the controller

use clap::Parser;
use clap::error::ErrorKind;
use eyre::{Context, Result, eyre};
use std::io::{BufRead, Write};
use tracing::debug;

use crate::controller::{BoardController, EditRequest};
use crate::dnd::DragCoordinator;
use crate::ids::{ColumnId, TaskId};
use crate::render;
use crate::suggestions;

/// One line of shell input
#[derive(Parser, Debug, PartialEq)]
#[command(name = "kanban", no_binary_name = true, disable_version_flag = true)]
pub enum ShellCommand {
    /// Print the board
    Show,

    /// List the suggested tasks
    Suggestions,

    /// Add a column at the end of the board
    AddColumn {
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
    },

    /// Rename a column; its id stays the same
    RenameColumn {
        column: String,
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
    },

    /// Delete a column and all of its tasks
    DeleteColumn { column: String },

    /// Add a task to a column
    Add {
        column: String,
        title: String,
        description: String,
    },

    /// Add a suggested task (by number or title) to the default column
    Suggest {
        #[arg(required = true, num_args = 1..)]
        key: Vec<String>,
    },

    /// Start editing a task; finish with `commit` or `cancel`
    Edit { column: String, task: String },

    /// Apply the pending edit
    Commit { title: String, description: String },

    /// Discard the pending edit and any drag in progress
    Cancel,

    /// Delete a task from a column
    Delete { column: String, task: String },

    /// Move a task to the end of another column
    Move { task: String, from: String, to: String },

    /// Pick up a task card
    Drag { task: String, from: Option<String> },

    /// Drop the dragged card onto a column
    Drop { column: String },

    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

/// What a command produced
#[derive(Debug, PartialEq)]
pub enum Reply {
    Text(String),
    Quit,
}

/// An interactive session over one in-memory board
pub struct Session {
    controller: BoardController,
    dnd: DragCoordinator,
    pending_edit: Option<EditRequest>,
    json: bool,
}

impl Session {
    pub fn new(controller: BoardController) -> Self {
        Self {
            controller,
            dnd: DragCoordinator::new(),
            pending_edit: None,
            json: false,
        }
    }

    /// Print boards as JSON instead of text
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    pub fn controller(&self) -> &BoardController {
        &self.controller
    }

    pub fn pending_edit(&self) -> Option<&EditRequest> {
        self.pending_edit.as_ref()
    }

    /// Current board, rendered per the session's output mode
    pub fn show(&self) -> Result<String> {
        if self.json {
            render::board_json(self.controller.board()).map(|s| s + "\n")
        } else {
            Ok(render::board_text(self.controller.board()))
        }
    }

    /// Read commands from `input` until EOF or `quit`.
    ///
    /// Command errors are written to `output` and the session carries on.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W, prompt: bool) -> Result<()> {
        let mut lines = input.lines();
        loop {
            if prompt {
                write!(output, "kanban> ")?;
                output.flush()?;
            }

            let Some(line) = lines.next() else {
                break;
            };
            let line = line.context("Failed to read input")?;

            match self.execute(&line) {
                Ok(Some(Reply::Quit)) => break,
                Ok(Some(Reply::Text(text))) => write!(output, "{}", text)?,
                Ok(None) => {}
                Err(e) => writeln!(output, "error: {:#}", e)?,
            }
        }
        Ok(())
    }

    /// Run one line; `None` for blank lines and comments
    pub fn execute(&mut self, line: &str) -> Result<Option<Reply>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let tokens = tokenize(line)?;
        let command = match ShellCommand::try_parse_from(&tokens) {
            Ok(command) => command,
            Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand) => {
                return Ok(Some(Reply::Text(e.render().to_string())));
            }
            Err(e) => return Err(eyre!("{}", e.render().to_string().trim_end())),
        };

        debug!(?command, "Executing shell command");
        self.dispatch(command).map(Some)
    }

    fn dispatch(&mut self, command: ShellCommand) -> Result<Reply> {
        let text = match command {
            ShellCommand::Quit => return Ok(Reply::Quit),
            ShellCommand::Show => self.show()?,
            ShellCommand::Suggestions => render::suggestions_text(self.controller.suggestions()),
            ShellCommand::AddColumn { title } => {
                let id = self.controller.add_column(&title.join(" "))?;
                format!("Added column {}\n", id)
            }
            ShellCommand::RenameColumn { column, title } => {
                let column = self.resolve_column(&column)?;
                self.controller.rename_column(&column, &title.join(" "))?;
                format!("Renamed column {}\n", column)
            }
            ShellCommand::DeleteColumn { column } => {
                let column = self.resolve_column(&column)?;
                self.controller.delete_column(&column)?;
                format!("Deleted column {}\n", column)
            }
            ShellCommand::Add {
                column,
                title,
                description,
            } => {
                let column = self.resolve_column(&column)?;
                let id = self.controller.add_task(&column, &title, &description)?;
                format!("Added task {}\n", id.short())
            }
            ShellCommand::Suggest { key } => {
                let key = key.join(" ");
                let draft = suggestions::lookup(self.controller.suggestions(), &key)
                    .cloned()
                    .ok_or_else(|| eyre!("no suggestion matches '{}'", key))?;
                let id = self.controller.add_suggested_task(&draft)?;
                format!("Added task {} ({})\n", id.short(), draft.title)
            }
            ShellCommand::Edit { column, task } => {
                let column = self.resolve_column(&column)?;
                let task = self.resolve_task(&task)?;
                let request = self.controller.request_edit(&column, task)?;
                let text = format!(
                    "Editing {}\n  title: {}\n  description: {}\nUse `commit <title> <description>` or `cancel`\n",
                    task.short(),
                    request.title,
                    request.description
                );
                self.pending_edit = Some(request);
                text
            }
            ShellCommand::Commit { title, description } => {
                let request = self.pending_edit.clone().ok_or_else(|| eyre!("no edit in progress"))?;
                match self.controller.commit_edit(&request, &title, &description) {
                    Ok(()) => {
                        self.pending_edit = None;
                        format!("Edited task {}\n", request.task.short())
                    }
                    Err(e) => {
                        // Validation failures leave the edit open for another try
                        if e.is_not_found() {
                            self.pending_edit = None;
                        }
                        return Err(e.into());
                    }
                }
            }
            ShellCommand::Cancel => {
                let had_edit = self.pending_edit.take().is_some();
                let had_drag = self.dnd.cancel();
                match (had_edit, had_drag) {
                    (false, false) => "Nothing to cancel\n".to_string(),
                    _ => "Cancelled\n".to_string(),
                }
            }
            ShellCommand::Delete { column, task } => {
                let column = self.resolve_column(&column)?;
                let task = self.resolve_task(&task)?;
                self.controller.delete_task(&column, task)?;
                format!("Deleted task {}\n", task.short())
            }
            ShellCommand::Move { task, from, to } => {
                let task = self.resolve_task(&task)?;
                let from = self.resolve_column(&from)?;
                let to = self.resolve_column(&to)?;
                self.controller.move_task(task, &from, &to)?;
                format!("Moved task {} to {}\n", task.short(), to)
            }
            ShellCommand::Drag { task, from } => {
                let task = self.resolve_task(&task)?;
                let origin = match from {
                    Some(from) => self.resolve_column(&from)?,
                    None => self
                        .controller
                        .board()
                        .find_task(task)
                        .map(|(column, _)| column.id().clone())
                        .ok_or_else(|| eyre!("task {} is not on the board", task.short()))?,
                };
                self.dnd.begin_drag(task, origin);
                format!("Dragging task {}\n", task.short())
            }
            ShellCommand::Drop { column } => {
                let target = self.resolve_column(&column)?;
                let event = self.dnd.drop_on(target).ok_or_else(|| eyre!("nothing is being dragged"))?;
                self.controller.handle_drop(&event)?;
                format!("Moved task {} to {}\n", event.task.short(), event.target)
            }
        };
        Ok(Reply::Text(text))
    }

    /// Column by exact id, falling back to a case-insensitive title
    fn resolve_column(&self, reference: &str) -> Result<ColumnId> {
        let board = self.controller.board();
        let id = ColumnId::from(reference.trim());
        if board.column(&id).is_some() {
            return Ok(id);
        }
        board
            .column_by_title(reference)
            .map(|c| c.id().clone())
            .ok_or_else(|| eyre!("no column matches '{}'", reference))
    }

    /// Task by full id or unique short suffix.
    ///
    /// A handle that matches nothing on the board is still accepted when it
    /// parses as a full id, so the controller reports it as not found.
    fn resolve_task(&self, handle: &str) -> Result<TaskId> {
        let matches: Vec<TaskId> = self
            .controller
            .board()
            .tasks()
            .map(|t| t.id())
            .filter(|id| id.matches(handle))
            .collect();

        match matches.as_slice() {
            [id] => Ok(*id),
            [] => uuid::Uuid::parse_str(handle.trim())
                .map(TaskId::from_uuid)
                .map_err(|_| eyre!("no task matches '{}'", handle)),
            _ => Err(eyre!("'{}' matches {} tasks, use more characters", handle, matches.len())),
        }
    }
}

/// Split a line into words, honouring double quotes and backslash escapes
pub fn tokenize(line: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quoted = false;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                let next = chars.next().ok_or_else(|| eyre!("trailing backslash"))?;
                current.push(next);
                in_token = true;
            }
            '"' => {
                quoted = !quoted;
                in_token = true;
            }
            c if c.is_whitespace() && !quoted => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if quoted {
        return Err(eyre!("unterminated quote"));
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::NaiveDate;

    fn session() -> Session {
        let controller =
            BoardController::default().with_clock(FixedClock(NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()));
        Session::new(controller)
    }

    fn text(session: &mut Session, line: &str) -> String {
        match session.execute(line).unwrap() {
            Some(Reply::Text(text)) => text,
            other => panic!("unexpected reply: {:?}", other),
        }
    }

    fn only_task(session: &Session) -> TaskId {
        let ids: Vec<TaskId> = session.controller().board().tasks().map(|t| t.id()).collect();
        assert_eq!(ids.len(), 1);
        ids[0]
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(
            tokenize(r#"add "To Do" "Write spec" Draft"#).unwrap(),
            vec!["add", "To Do", "Write spec", "Draft"]
        );
        assert_eq!(tokenize(r#"add a\ b """#).unwrap(), vec!["add", "a b", ""]);
        assert!(tokenize(r#"add "open"#).is_err());
        assert!(tokenize("add \\").is_err());
        assert!(tokenize("   ").unwrap().is_empty());
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            ShellCommand::try_parse_from(["move", "abc", "1", "Done"]).unwrap(),
            ShellCommand::Move {
                task: "abc".to_string(),
                from: "1".to_string(),
                to: "Done".to_string(),
            }
        );
        assert_eq!(ShellCommand::try_parse_from(["exit"]).unwrap(), ShellCommand::Quit);
        assert!(ShellCommand::try_parse_from(["frobnicate"]).is_err());
    }

    #[test]
    fn test_blank_and_comment_lines() {
        let mut s = session();
        assert!(s.execute("").unwrap().is_none());
        assert!(s.execute("# comment").unwrap().is_none());
    }

    #[test]
    fn test_add_move_delete_scenario() {
        let mut s = session();
        text(&mut s, r#"add "To Do" "Write spec" "Draft section 1""#);
        let id = only_task(&s);

        text(&mut s, &format!("move {} \"to do\" Doing", id.short()));
        let board = s.controller().board();
        assert!(board.column(&ColumnId::from("1")).unwrap().is_empty());
        assert_eq!(board.column(&ColumnId::from("2")).unwrap().len(), 1);

        text(&mut s, &format!("delete 2 {}", id));
        assert_eq!(s.controller().board().task_count(), 0);
    }

    #[test]
    fn test_empty_fields_rejected() {
        let mut s = session();
        let err = s.execute(r#"add 1 "" "desc""#).unwrap_err();
        assert!(err.to_string().contains("task title must not be empty"));
        assert_eq!(s.controller().board().task_count(), 0);
    }

    #[test]
    fn test_unknown_column() {
        let mut s = session();
        let err = s.execute("add Review title desc").unwrap_err();
        assert!(err.to_string().contains("no column matches"));
    }

    #[test]
    fn test_suggest_by_number_and_title() {
        let mut s = session();
        text(&mut s, "add-column Code Review");
        text(&mut s, "suggest 1");
        text(&mut s, "suggest send email");

        let todo = s.controller().board().column(&ColumnId::from("1")).unwrap().clone();
        let titles: Vec<&str> = todo.tasks().iter().map(|t| t.title()).collect();
        assert_eq!(titles, vec!["Call Manager", "Send Email"]);
        assert!(s.controller().board().column_by_title("code review").is_some());
        assert!(s.execute("suggest 99").is_err());
    }

    #[test]
    fn test_edit_commit_flow() {
        let mut s = session();
        text(&mut s, "add 1 Old \"Old desc\"");
        let id = only_task(&s);

        let reply = text(&mut s, &format!("edit 1 {}", id.short()));
        assert!(reply.contains("Old desc"));
        assert!(s.pending_edit().is_some());

        // Empty text keeps the edit open
        assert!(s.execute("commit New \"\"").is_err());
        assert!(s.pending_edit().is_some());

        text(&mut s, "commit New \"New desc\"");
        assert!(s.pending_edit().is_none());
        let (_, task) = s.controller().board().find_task(id).unwrap();
        assert_eq!(task.title(), "New");
        assert_eq!(task.created_at(), "10/17/2026");
    }

    #[test]
    fn test_commit_without_edit() {
        let mut s = session();
        assert!(s.execute("commit a b").is_err());
        assert_eq!(text(&mut s, "cancel"), "Nothing to cancel\n");
    }

    #[test]
    fn test_drag_and_drop() {
        let mut s = session();
        text(&mut s, "add 1 a b");
        let id = only_task(&s);

        assert!(s.execute("drop Done").is_err());
        text(&mut s, &format!("drag {}", id.short()));
        text(&mut s, "drop Done");
        let (column, _) = s.controller().board().find_task(id).unwrap();
        assert_eq!(column.id(), &ColumnId::from("3"));

        // One drop per drag
        assert!(s.execute("drop Doing").is_err());
    }

    #[test]
    fn test_cancel_drag() {
        let mut s = session();
        text(&mut s, "add 1 a b");
        let id = only_task(&s);
        text(&mut s, &format!("drag {} 1", id));
        assert_eq!(text(&mut s, "cancel"), "Cancelled\n");
        assert!(s.execute("drop 2").is_err());
    }

    #[test]
    fn test_delete_column_cascades() {
        let mut s = session();
        text(&mut s, "add 1 a b");
        text(&mut s, "add 2 c d");
        text(&mut s, "delete-column \"To Do\"");
        assert_eq!(s.controller().board().task_count(), 1);
        assert!(s.execute("suggest 1").unwrap_err().to_string().contains("column not found"));
    }

    #[test]
    fn test_unknown_task_handle() {
        let mut s = session();
        let err = s.execute("delete 1 deadbeef").unwrap_err();
        assert!(err.to_string().contains("no task matches"));

        let missing = TaskId::generate();
        let err = s.execute(&format!("delete 1 {}", missing)).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_help_is_text() {
        let mut s = session();
        let reply = text(&mut s, "help");
        assert!(reply.contains("add-column"));
    }

    #[test]
    fn test_run_reads_until_quit() {
        let mut s = session();
        let script = "add 1 a b\nbogus\nquit\nadd 1 c d\n";
        let mut out = Vec::new();
        s.run(script.as_bytes(), &mut out, false).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Added task"));
        assert!(out.contains("error:"));
        assert_eq!(s.controller().board().task_count(), 1);
    }

    #[test]
    fn test_json_show() {
        let mut s = session().with_json(true);
        let reply = text(&mut s, "show");
        let value: serde_json::Value = serde_json::from_str(&reply).unwrap();
        assert_eq!(value["default_column"], "1");
    }
}
