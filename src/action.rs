use std::collections::BTreeSet;

use crate::task::{Task, TaskId};

/// Everything that can change a [`crate::reducer::ToDoState`].
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    LoadTasks,
    TasksLoaded(Vec<Task>),
    /// The payload's id is ignored; the store assigns a fresh one.
    AddTask(Task),
    UpdateTask(Task),
    RemoveTasks(BTreeSet<TaskId>),
    Error,
}

impl Action {
    pub fn remove_tasks(ids: impl IntoIterator<Item = TaskId>) -> Self {
        Action::RemoveTasks(ids.into_iter().collect())
    }

    pub fn name(&self) -> &'static str {
        match self {
            Action::LoadTasks => "LoadTasks",
            Action::TasksLoaded(_) => "TasksLoaded",
            Action::AddTask(_) => "AddTask",
            Action::UpdateTask(_) => "UpdateTask",
            Action::RemoveTasks(_) => "RemoveTasks",
            Action::Error => "Error",
        }
    }
}
