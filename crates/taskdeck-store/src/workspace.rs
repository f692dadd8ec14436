use crate::error::StoreError;
use crate::lockfile::write_atomic;
use crate::persistence::FilePersistence;
use crate::store::TaskStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const WORKSPACE_DIR: &str = ".taskdeck";
const CONFIG_FILE: &str = "config.json";

/// Layout version written by [`Workspace::init`].
pub const CONFIG_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceConfig {
    pub version: u32,
    pub created_at: DateTime<Utc>,
}

/// A directory holding a `.taskdeck/` store.
///
/// Layout:
/// - `.taskdeck/config.json` — [`WorkspaceConfig`]
/// - `.taskdeck/tasks.json`  — the task collection
/// - `.taskdeck/theme`       — `light` or `dark`
#[derive(Debug)]
pub struct Workspace {
    root: PathBuf,
    config: WorkspaceConfig,
}

impl Workspace {
    /// Create a new workspace at `path`.
    pub fn init(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let root = path.as_ref().to_path_buf();
        let dir = root.join(WORKSPACE_DIR);

        if dir.exists() {
            return Err(StoreError::WorkspaceExists(dir.display().to_string()));
        }
        fs::create_dir_all(&dir)?;

        let config = WorkspaceConfig {
            version: CONFIG_VERSION,
            created_at: Utc::now(),
        };
        write_atomic(
            dir.join(CONFIG_FILE),
            serde_json::to_string_pretty(&config)?.as_bytes(),
        )?;

        tracing::debug!(path = %dir.display(), "workspace initialized");
        Ok(Self { root, config })
    }

    /// Open the workspace at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let root = path.as_ref().to_path_buf();
        let dir = root.join(WORKSPACE_DIR);

        if !dir.is_dir() {
            return Err(StoreError::WorkspaceNotFound(root.display().to_string()));
        }

        let config: WorkspaceConfig =
            serde_json::from_str(&fs::read_to_string(dir.join(CONFIG_FILE))?)?;
        if config.version != CONFIG_VERSION {
            return Err(StoreError::UnsupportedVersion {
                found: config.version,
                expected: CONFIG_VERSION,
            });
        }

        Ok(Self { root, config })
    }

    /// Search upward from `start` for a `.taskdeck/` directory and open it.
    pub fn discover(start: impl AsRef<Path>) -> Result<Self, StoreError> {
        let mut current = start.as_ref().to_path_buf();
        loop {
            if current.join(WORKSPACE_DIR).is_dir() {
                return Self::open(&current);
            }
            if !current.pop() {
                return Err(StoreError::WorkspaceNotFound(
                    start.as_ref().display().to_string(),
                ));
            }
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The `.taskdeck/` directory itself.
    pub fn dir(&self) -> PathBuf {
        self.root.join(WORKSPACE_DIR)
    }

    pub fn config(&self) -> &WorkspaceConfig {
        &self.config
    }

    pub fn persistence(&self) -> FilePersistence {
        FilePersistence::new(self.dir())
    }

    /// Load the task store backed by this workspace.
    pub fn open_store(&self) -> TaskStore<FilePersistence> {
        TaskStore::open(self.persistence())
    }
}
