// Kanban - in-memory kanban board with immutable snapshots

pub mod board;
pub mod clock;
pub mod column;
pub mod config;
pub mod controller;
pub mod dnd;
pub mod error;
pub mod ids;
pub mod render;
pub mod shell;
pub mod suggestions;
pub mod task;

// Re-export main types for convenience
pub use board::Board;
pub use clock::{DateFormatError, DateStamp};
pub use column::Column;
pub use config::Config;
pub use controller::{BoardController, EditRequest};
pub use dnd::{DragCoordinator, DropEvent};
pub use error::{BoardError, Field};
pub use ids::{ColumnId, TaskId};
pub use suggestions::DEFAULT_COLUMN_ID;
pub use task::{Task, TaskDraft};
