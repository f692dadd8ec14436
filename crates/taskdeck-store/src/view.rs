//! Filter and search projection over the task collection.

use std::fmt;
use std::slice;
use std::str::FromStr;
use taskdeck_core::Task;

/// Which tasks to show by completion state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }

    fn admits(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Active => !task.completed,
            Self::Completed => task.completed,
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Filter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            other => Err(format!(
                "unknown filter '{other}' (expected all, active, or completed)"
            )),
        }
    }
}

/// Ephemeral view configuration. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub filter: Filter,
    pub search: String,
}

impl ViewState {
    /// Lazily filter `tasks`, preserving their order.
    pub fn project<'a>(&self, tasks: &'a [Task]) -> VisibleTasks<'a> {
        VisibleTasks {
            tasks: tasks.iter(),
            filter: self.filter,
            needle: self.search.to_lowercase(),
        }
    }
}

/// Iterator over the tasks admitted by a [`ViewState`].
///
/// Cloning yields an independent iterator from the same position.
#[derive(Debug, Clone)]
pub struct VisibleTasks<'a> {
    tasks: slice::Iter<'a, Task>,
    filter: Filter,
    needle: String,
}

impl<'a> Iterator for VisibleTasks<'a> {
    type Item = &'a Task;

    fn next(&mut self) -> Option<Self::Item> {
        let filter = self.filter;
        let needle = self.needle.as_str();
        self.tasks.by_ref().find(|task| {
            filter.admits(task) && (needle.is_empty() || task.text.to_lowercase().contains(needle))
        })
    }
}
