//! Best-effort durable storage for the task collection and the theme flag.
//!
//! Persistence mirrors the in-memory state; it is never the source of truth.
//! Every method of [`Persistence`] absorbs its own failures: reads degrade to
//! "nothing stored" and failed writes are logged and dropped.

use crate::error::StoreError;
use crate::lockfile::write_atomic;
use std::cell::RefCell;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use taskdeck_core::backup::{self, RawCollection};
use taskdeck_core::Task;

const TASKS_FILE: &str = "tasks.json";
const THEME_FILE: &str = "theme";

/// Display theme, persisted independently of the tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Durable key-value mirror of the store's state. Never fails to the caller.
pub trait Persistence {
    /// Stored task records, or an empty collection when nothing usable is stored.
    fn load_tasks(&self) -> RawCollection;

    fn save_tasks(&self, tasks: &[Task]);

    /// Stored theme, or [`Theme::Light`] when unset or unreadable.
    fn load_theme(&self) -> Theme;

    fn save_theme(&self, theme: Theme);
}

/// Directory-backed persistence: `tasks.json` and `theme` inside `dir`.
#[derive(Debug, Clone)]
pub struct FilePersistence {
    dir: PathBuf,
}

impl FilePersistence {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn tasks_path(&self) -> PathBuf {
        self.dir.join(TASKS_FILE)
    }

    fn theme_path(&self) -> PathBuf {
        self.dir.join(THEME_FILE)
    }

    /// Read the stored records. `Ok(None)` when the file does not exist.
    pub fn try_load_tasks(&self) -> Result<Option<RawCollection>, StoreError> {
        let text = match fs::read_to_string(self.tasks_path()) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        if text.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(backup::deserialize(&text)?))
    }

    pub fn try_save_tasks(&self, tasks: &[Task]) -> Result<(), StoreError> {
        let json = backup::serialize(tasks)?;
        write_atomic(self.tasks_path(), json.as_bytes())
    }

    pub fn try_load_theme(&self) -> Result<Option<Theme>, StoreError> {
        match fs::read_to_string(self.theme_path()) {
            Ok(text) => Ok(Theme::parse(&text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn try_save_theme(&self, theme: Theme) -> Result<(), StoreError> {
        write_atomic(self.theme_path(), format!("{theme}\n").as_bytes())
    }
}

impl Persistence for FilePersistence {
    fn load_tasks(&self) -> RawCollection {
        match self.try_load_tasks() {
            Ok(records) => records.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(error = %e, path = %self.tasks_path().display(), "failed to load tasks");
                RawCollection::default()
            }
        }
    }

    fn save_tasks(&self, tasks: &[Task]) {
        if let Err(e) = self.try_save_tasks(tasks) {
            tracing::warn!(error = %e, path = %self.tasks_path().display(), "failed to save tasks");
        }
    }

    fn load_theme(&self) -> Theme {
        match self.try_load_theme() {
            Ok(theme) => theme.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to load theme");
                Theme::default()
            }
        }
    }

    fn save_theme(&self, theme: Theme) {
        if let Err(e) = self.try_save_theme(theme) {
            tracing::warn!(error = %e, "failed to save theme");
        }
    }
}

#[derive(Debug, Default)]
struct MemorySlots {
    tasks: Option<String>,
    theme: Option<String>,
    fail_writes: bool,
    writes: usize,
}

/// In-process persistence with the same contract as [`FilePersistence`].
///
/// Clones share the same slots, so a test can keep a handle after moving one
/// into a [`TaskStore`](crate::TaskStore).
#[derive(Debug, Clone, Default)]
pub struct MemoryPersistence {
    slots: Rc<RefCell<MemorySlots>>,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the task slot with raw text, as if written by an older build.
    pub fn with_raw_tasks(text: impl Into<String>) -> Self {
        let persistence = Self::default();
        persistence.slots.borrow_mut().tasks = Some(text.into());
        persistence
    }

    /// Make every later write fail (and be dropped).
    pub fn fail_writes(&self, fail: bool) {
        self.slots.borrow_mut().fail_writes = fail;
    }

    pub fn raw_tasks(&self) -> Option<String> {
        self.slots.borrow().tasks.clone()
    }

    /// Number of successful writes so far.
    pub fn writes(&self) -> usize {
        self.slots.borrow().writes
    }
}

impl Persistence for MemoryPersistence {
    fn load_tasks(&self) -> RawCollection {
        let slots = self.slots.borrow();
        let Some(text) = slots.tasks.as_deref() else {
            return RawCollection::default();
        };
        backup::deserialize(text).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "stored tasks are malformed");
            RawCollection::default()
        })
    }

    fn save_tasks(&self, tasks: &[Task]) {
        let mut slots = self.slots.borrow_mut();
        if slots.fail_writes {
            tracing::warn!("failed to save tasks: storage unavailable");
            return;
        }
        match backup::serialize(tasks) {
            Ok(json) => {
                slots.tasks = Some(json);
                slots.writes += 1;
            }
            Err(e) => tracing::warn!(error = %e, "failed to save tasks"),
        }
    }

    fn load_theme(&self) -> Theme {
        self.slots
            .borrow()
            .theme
            .as_deref()
            .and_then(Theme::parse)
            .unwrap_or_default()
    }

    fn save_theme(&self, theme: Theme) {
        let mut slots = self.slots.borrow_mut();
        if slots.fail_writes {
            tracing::warn!("failed to save theme: storage unavailable");
            return;
        }
        slots.theme = Some(theme.as_str().to_string());
        slots.writes += 1;
    }
}
