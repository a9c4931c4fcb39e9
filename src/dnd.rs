// Drag-and-drop coordination between task cards and columns

use tracing::debug;

use crate::ids::{ColumnId, TaskId};

/// A completed drop: the dragged task, where it came from, where it landed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropEvent {
    pub task: TaskId,
    pub origin: ColumnId,
    pub target: ColumnId,
}

/// Tracks the card currently being dragged, if any.
///
/// Each successful drop yields exactly one [`DropEvent`] and returns the
/// coordinator to idle.
#[derive(Debug, Clone, Default)]
pub struct DragCoordinator {
    dragging: Option<(TaskId, ColumnId)>,
}

impl DragCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick up `task` from `origin`, replacing any drag already in progress
    pub fn begin_drag(&mut self, task: TaskId, origin: ColumnId) {
        if let Some((previous, _)) = &self.dragging {
            debug!(task = %previous, "Replacing in-progress drag");
        }
        debug!(task = %task, origin = %origin, "Drag started");
        self.dragging = Some((task, origin));
    }

    /// Release over `target`; `None` if nothing was being dragged
    pub fn drop_on(&mut self, target: ColumnId) -> Option<DropEvent> {
        let (task, origin) = self.dragging.take()?;
        debug!(task = %task, origin = %origin, target = %target, "Dropped");
        Some(DropEvent { task, origin, target })
    }

    /// Abandon the current drag without producing an event
    pub fn cancel(&mut self) -> bool {
        self.dragging.take().is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging.is_some()
    }

    /// The task and origin column of the drag in progress
    pub fn dragged(&self) -> Option<(TaskId, &ColumnId)> {
        self.dragging.as_ref().map(|(task, origin)| (*task, origin))
    }
}
