use crate::error::LookupError;
use crate::persistence::{Persistence, Theme};
use crate::view::{Filter, ViewState, VisibleTasks};
use chrono::{NaiveDate, Utc};
use taskdeck_core::backup::{self, RawCollection};
use taskdeck_core::task::validate_text;
use taskdeck_core::{CoreError, ParseError, Priority, Task, TaskCounts, TaskId, ValidationError};

/// Shortest id prefix accepted by [`TaskStore::resolve_id`].
pub const MIN_PREFIX_LEN: usize = 4;

/// Owner of the authoritative, order-sorted task collection.
///
/// Every mutation is mirrored to the [`Persistence`] adapter before the
/// method returns. Readers get shared borrows or copies; nothing outside
/// the store holds a mutable reference to a task.
pub struct TaskStore<P: Persistence> {
    tasks: Vec<Task>,
    view: ViewState,
    theme: Theme,
    persistence: P,
}

impl<P: Persistence> TaskStore<P> {
    /// Load the persisted collection and theme.
    ///
    /// Records repaired while loading (fresh ids, truncated text, dropped
    /// entries) are written straight back so ids stay stable across opens.
    pub fn open(persistence: P) -> Self {
        let raw = persistence.load_tasks();
        let tasks = raw.normalize(Utc::now());
        let theme = persistence.load_theme();
        tracing::debug!(count = tasks.len(), %theme, "task store opened");
        let store = Self {
            tasks,
            view: ViewState::default(),
            theme,
            persistence,
        };
        if !raw.is_encoding_of(&store.tasks) {
            tracing::info!(records = raw.len(), kept = store.tasks.len(), "stored tasks repaired");
            store.save();
        }
        store
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    /// Full collection in display order, ignoring the view.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    pub fn contains(&self, id: &TaskId) -> bool {
        self.index_of(id).is_some()
    }

    fn index_of(&self, id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| &t.id == id)
    }

    fn save(&self) {
        self.persistence.save_tasks(&self.tasks);
    }

    /// Resolve a full id or a unique id prefix.
    pub fn resolve_id(&self, id_or_prefix: &str) -> Result<TaskId, LookupError> {
        let wanted = id_or_prefix.trim();
        if let Some(task) = self.tasks.iter().find(|t| t.id.as_str() == wanted) {
            return Ok(task.id.clone());
        }
        if wanted.chars().count() < MIN_PREFIX_LEN {
            return Err(LookupError::PrefixTooShort(wanted.to_string()));
        }
        let mut matches = self.tasks.iter().filter(|t| t.id.starts_with(wanted));
        match (matches.next(), matches.count()) {
            (None, _) => Err(LookupError::NotFound(wanted.to_string())),
            (Some(task), 0) => Ok(task.id.clone()),
            (Some(_), rest) => Err(LookupError::AmbiguousPrefix {
                prefix: wanted.to_string(),
                count: rest + 1,
            }),
        }
    }

    // --- Mutations ---

    /// Append a new task after every existing one.
    pub fn add(
        &mut self,
        text: &str,
        priority: Priority,
        due_date: Option<NaiveDate>,
    ) -> Result<&Task, ValidationError> {
        let text = validate_text(text)?;
        let now = Utc::now();
        let order = self.next_order(now.timestamp_millis() as f64);
        let task = Task::new(&text, priority, due_date, order, now)?;
        tracing::debug!(id = %task.id, order, "task added");
        self.tasks.push(task);
        self.save();
        Ok(&self.tasks[self.tasks.len() - 1])
    }

    /// A sort key strictly greater than every existing `order`.
    fn next_order(&mut self, clock: f64) -> f64 {
        let max = self
            .tasks
            .iter()
            .map(|t| t.order)
            .fold(f64::NEG_INFINITY, f64::max);
        let candidate = if clock > max { clock } else { max + 1.0 };
        if candidate > max {
            return candidate;
        }
        // Keys too large to step past; compact them first.
        self.renumber();
        self.tasks.len() as f64
    }

    /// Flip `completed`. Returns `false` when the id is unknown.
    pub fn toggle_completed(&mut self, id: &TaskId) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        let task = &mut self.tasks[index];
        task.completed = !task.completed;
        tracing::debug!(%id, completed = task.completed, "task toggled");
        self.save();
        true
    }

    /// Delete a task. Returns `false` when the id is unknown.
    pub fn remove(&mut self, id: &TaskId) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        self.tasks.remove(index);
        tracing::debug!(%id, "task removed");
        self.save();
        true
    }

    /// Replace a task's text.
    ///
    /// The text is validated before the lookup, so invalid text is reported
    /// even for an unknown id. Returns `Ok(false)` when the id is unknown.
    pub fn edit_text(&mut self, id: &TaskId, new_text: &str) -> Result<bool, ValidationError> {
        let text = validate_text(new_text)?;
        let Some(index) = self.index_of(id) else {
            return Ok(false);
        };
        self.tasks[index].text = text;
        tracing::debug!(%id, "task text edited");
        self.save();
        Ok(true)
    }

    /// Remove every completed task. Returns how many were removed.
    pub fn clear_completed(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| !t.completed);
        let removed = before - self.tasks.len();
        tracing::debug!(removed, "completed tasks cleared");
        self.save();
        removed
    }

    /// Move `source` to sit immediately before `target`, then renumber the
    /// whole collection to `0..n`.
    ///
    /// Operates on the full collection regardless of the current view.
    /// Returns `false` without changes when either id is unknown. Moving a
    /// task onto itself only renumbers.
    pub fn reorder(&mut self, source: &TaskId, target: &TaskId) -> bool {
        let (Some(from), true) = (self.index_of(source), self.contains(target)) else {
            return false;
        };
        let moved = self.tasks.remove(from);
        // Only missing when source == target
        let to = self.index_of(target).unwrap_or(from);
        self.tasks.insert(to, moved);
        self.renumber();
        tracing::debug!(%source, %target, position = to, "task reordered");
        self.save();
        true
    }

    fn renumber(&mut self) {
        for (position, task) in self.tasks.iter_mut().enumerate() {
            task.order = position as f64;
        }
    }

    // --- Backup / restore ---

    /// Encode the full collection as backup text.
    pub fn backup(&self) -> Result<String, CoreError> {
        backup::serialize(&self.tasks)
    }

    /// Replace the whole collection with normalized `raw` records.
    ///
    /// Returns the number of tasks installed.
    pub fn import_and_replace(&mut self, raw: &RawCollection) -> usize {
        self.tasks = raw.normalize(Utc::now());
        tracing::debug!(records = raw.len(), installed = self.tasks.len(), "collection replaced");
        self.save();
        self.tasks.len()
    }

    /// Decode `text` and install it. On error the collection is untouched.
    pub fn restore(&mut self, text: &str) -> Result<usize, ParseError> {
        let raw = backup::deserialize(text)?;
        Ok(self.import_and_replace(&raw))
    }

    // --- View ---

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.view.filter = filter;
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.view.search = query.into();
    }

    /// Tasks admitted by the current view, in collection order.
    pub fn visible_tasks(&self) -> VisibleTasks<'_> {
        self.view.project(&self.tasks)
    }

    pub fn counts(&self) -> TaskCounts {
        TaskCounts::of(&self.tasks)
    }

    // --- Theme ---

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.persistence.save_theme(theme);
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.set_theme(self.theme.toggled());
        self.theme
    }
}
