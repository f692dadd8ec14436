//! Task model, validation, and backup encoding for taskdeck.

pub mod backup;
pub mod error;
pub mod normalize;
pub mod task;

pub use backup::RawCollection;
pub use error::{CoreError, ParseError, ValidationError};
pub use task::{Priority, Task, TaskCounts, TaskId, MAX_TEXT_LEN};
