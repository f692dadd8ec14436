use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("core error: {0}")]
    Core(#[from] taskdeck_core::CoreError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed task data: {0}")]
    Parse(#[from] taskdeck_core::ParseError),

    #[error("lock file {0} exists; another taskdeck is writing, or remove it if one crashed")]
    LockConflict(String),

    #[error("taskdeck workspace not found (searched upward from {0})")]
    WorkspaceNotFound(String),

    #[error("taskdeck workspace already exists at {0}")]
    WorkspaceExists(String),

    #[error("unsupported workspace config version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
}

/// Failure to resolve a user-supplied task id or id prefix.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("no task matches '{0}'")]
    NotFound(String),

    #[error("id prefix '{0}' is too short (minimum {min} characters)", min = crate::store::MIN_PREFIX_LEN)]
    PrefixTooShort(String),

    #[error("ambiguous id prefix '{prefix}': matches {count} tasks")]
    AmbiguousPrefix { prefix: String, count: usize },
}
