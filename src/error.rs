use thiserror::Error;

/// A task source failed to produce the initial task list.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read task data: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse task data: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },
}

/// The store behind a dispatcher has been shut down.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("store is closed")]
pub struct StoreClosed;
