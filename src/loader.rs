use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::action::Action;
use crate::error::LoadError;
use crate::store::Dispatcher;
use crate::task::Task;

const SEED_TASKS: &str = include_str!("../data/tasks.json");

#[async_trait]
pub trait TaskSource: Send + Sync {
    async fn fetch_tasks(&self) -> Result<Vec<Task>, LoadError>;
}

/// The built-in seed list, optionally delayed to mimic a slow fetch.
#[derive(Debug, Clone, Default)]
pub struct StaticTaskSource {
    delay: Duration,
}

impl StaticTaskSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl TaskSource for StaticTaskSource {
    async fn fetch_tasks(&self) -> Result<Vec<Task>, LoadError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(serde_json::from_str(SEED_TASKS)?)
    }
}

/// Reads a JSON array of tasks from disk. The file is never written.
#[derive(Debug, Clone)]
pub struct FileTaskSource {
    path: PathBuf,
}

impl FileTaskSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl TaskSource for FileTaskSource {
    async fn fetch_tasks(&self) -> Result<Vec<Task>, LoadError> {
        let data = tokio::fs::read_to_string(&self.path).await?;
        Ok(serde_json::from_str(&data)?)
    }
}

/// Dispatches `LoadTasks`, then exactly one `TasksLoaded` or `Error`.
///
/// Nothing cancels a load in flight, so when two loads overlap both results
/// are applied in completion order.
pub async fn load_tasks(source: &dyn TaskSource, dispatcher: &Dispatcher) {
    if dispatcher.dispatch(Action::LoadTasks).is_err() {
        warn!("store closed before loading tasks");
        return;
    }

    let outcome = match source.fetch_tasks().await {
        Ok(tasks) => {
            info!(count = tasks.len(), "tasks loaded");
            Action::TasksLoaded(tasks)
        }
        Err(e) => {
            warn!("failed to load tasks: {}", e);
            Action::Error
        }
    };

    if dispatcher.dispatch(outcome).is_err() {
        warn!("store closed before tasks finished loading");
    }
}
