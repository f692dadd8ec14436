use thiserror::Error;

/// User-supplied task text was rejected. No state was changed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("task cannot be empty")]
    EmptyText,

    #[error("task text is {len} characters; keep it under {max}")]
    TextTooLong { len: usize, max: usize },
}

/// Backup text could not be decoded as a list of task records.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("backup is not valid JSON: {0}")]
    Syntax(#[from] serde_json::Error),

    #[error("backup must be a list of task records, found {0}")]
    NotASequence(&'static str),
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("unknown priority '{0}' (expected low, medium, or high)")]
    UnknownPriority(String),
}
