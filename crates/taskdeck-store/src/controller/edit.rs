use crate::persistence::Persistence;
use crate::store::TaskStore;
use taskdeck_core::{TaskId, ValidationError};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditState {
    #[default]
    Viewing,
    Editing { id: TaskId, draft: String },
}

/// Result of leaving the editing state through [`InlineEditController::commit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The draft was written to the task.
    Saved,
    /// The draft was blank, so the previous text stays.
    Discarded,
    /// The task was deleted while being edited.
    Missing,
    /// No edit was in progress.
    NotEditing,
}

/// In-place text editing. At most one task is in the editing state.
///
/// The draft lives here until commit; the task itself is untouched while
/// editing.
#[derive(Debug, Default)]
pub struct InlineEditController {
    state: EditState,
}

impl InlineEditController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &EditState {
        &self.state
    }

    pub fn editing_id(&self) -> Option<&TaskId> {
        match &self.state {
            EditState::Editing { id, .. } => Some(id),
            EditState::Viewing => None,
        }
    }

    pub fn draft(&self) -> Option<&str> {
        match &self.state {
            EditState::Editing { draft, .. } => Some(draft),
            EditState::Viewing => None,
        }
    }

    /// Open `id` for editing with its current text as the draft.
    ///
    /// An edit open on another task is committed first; if that commit is
    /// rejected the earlier edit stays open and its error is returned.
    /// Returns `Ok(false)` when `id` does not exist.
    pub fn start_edit<P: Persistence>(
        &mut self,
        store: &mut TaskStore<P>,
        id: &TaskId,
    ) -> Result<bool, ValidationError> {
        if let Some(current) = self.editing_id() {
            if current == id {
                return Ok(true);
            }
            self.commit(store)?;
        }
        let Some(task) = store.get(id) else {
            return Ok(false);
        };
        self.state = EditState::Editing {
            id: id.clone(),
            draft: task.text.clone(),
        };
        Ok(true)
    }

    /// Replace the draft. Returns `false` when nothing is being edited.
    pub fn set_draft(&mut self, text: impl Into<String>) -> bool {
        match &mut self.state {
            EditState::Editing { draft, .. } => {
                *draft = text.into();
                true
            }
            EditState::Viewing => false,
        }
    }

    /// Enter or focus loss: save a non-blank draft, drop a blank one.
    ///
    /// A draft that fails validation for length keeps the editor open.
    pub fn commit<P: Persistence>(
        &mut self,
        store: &mut TaskStore<P>,
    ) -> Result<CommitOutcome, ValidationError> {
        let outcome = match &self.state {
            EditState::Viewing => return Ok(CommitOutcome::NotEditing),
            EditState::Editing { draft, .. } if draft.trim().is_empty() => CommitOutcome::Discarded,
            EditState::Editing { id, draft } => {
                if store.edit_text(id, draft)? {
                    CommitOutcome::Saved
                } else {
                    CommitOutcome::Missing
                }
            }
        };
        self.state = EditState::Viewing;
        Ok(outcome)
    }

    /// Escape: drop the draft. Returns `false` when nothing was being edited.
    pub fn cancel(&mut self) -> bool {
        let was_editing = self.editing_id().is_some();
        self.state = EditState::Viewing;
        was_editing
    }
}
