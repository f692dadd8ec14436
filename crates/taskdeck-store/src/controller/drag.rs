use crate::persistence::Persistence;
use crate::store::TaskStore;
use std::mem;
use taskdeck_core::TaskId;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(TaskId),
}

/// Drag-and-drop reordering: one `begin_drag` followed by either
/// `drop_on` or `cancel` produces at most one [`TaskStore::reorder`].
#[derive(Debug, Default)]
pub struct DragReorderController {
    state: DragState,
}

impl DragReorderController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// Pick up `id`. A drag already in progress is abandoned.
    pub fn begin_drag(&mut self, id: TaskId) {
        tracing::trace!(%id, "drag started");
        self.state = DragState::Dragging(id);
    }

    /// Release over `target`. Returns `true` when the collection was reordered.
    ///
    /// Dropping a task on itself, or when either task no longer exists,
    /// changes nothing. The controller is idle afterwards in every case.
    pub fn drop_on<P: Persistence>(&mut self, store: &mut TaskStore<P>, target: &TaskId) -> bool {
        let DragState::Dragging(source) = mem::take(&mut self.state) else {
            return false;
        };
        if &source == target || !store.contains(&source) || !store.contains(target) {
            tracing::trace!(%source, %target, "drop ignored");
            return false;
        }
        store.reorder(&source, target)
    }

    /// Release outside any task.
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }
}
