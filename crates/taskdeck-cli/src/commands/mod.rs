pub mod backup;
pub mod edit;
pub mod init;
pub mod list;
pub mod reorder;
pub mod task;
pub mod theme;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use std::env;
use taskdeck_core::{Task, TaskId};
use taskdeck_store::{FilePersistence, TaskStore, Workspace};

/// Open the store of the workspace containing the current directory.
pub fn open_store() -> Result<TaskStore<FilePersistence>> {
    let cwd = env::current_dir().context("failed to get current directory")?;
    let workspace = Workspace::discover(&cwd)
        .context("not a taskdeck workspace (or any parent); run `taskdeck init`")?;
    tracing::debug!(root = %workspace.root().display(), "using workspace");
    Ok(workspace.open_store())
}

/// Resolve a user-typed id or id prefix.
pub fn resolve(store: &TaskStore<FilePersistence>, id: &str) -> Result<TaskId> {
    Ok(store.resolve_id(id)?)
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// One-line rendering: `[x] 1a2b3c4d  Pay rent  (high, due 05 Mar, overdue)`.
pub fn format_task(task: &Task, today: NaiveDate) -> String {
    let mark = if task.completed { "x" } else { " " };
    let mut meta = vec![task.priority.to_string()];
    if task.due_date.is_some() {
        meta.push(format!("due {}", task.due_label()));
        if task.is_overdue(today) {
            meta.push("overdue".to_string());
        }
    }
    format!(
        "[{}] {}  {}  ({})",
        mark,
        task.id.short(),
        task.text,
        meta.join(", ")
    )
}
