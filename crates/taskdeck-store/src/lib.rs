//! Stateful side of taskdeck: the authoritative task collection, its
//! persistence, and the UI state machines that drive it.

pub mod controller;
pub mod error;
pub mod lockfile;
pub mod persistence;
pub mod store;
pub mod view;
pub mod workspace;

pub use controller::{CommitOutcome, DragReorderController, InlineEditController};
pub use error::{LookupError, StoreError};
pub use persistence::{FilePersistence, MemoryPersistence, Persistence, Theme};
pub use store::TaskStore;
pub use view::{Filter, ViewState};
pub use workspace::Workspace;
