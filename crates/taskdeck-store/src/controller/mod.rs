//! State machines that turn UI gestures into [`TaskStore`](crate::TaskStore)
//! calls. Both borrow the store only for the duration of a transition.

pub mod drag;
pub mod edit;

pub use drag::{DragReorderController, DragState};
pub use edit::{CommitOutcome, EditState, InlineEditController};
