use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fmt;

pub type TaskId = u32;

/// Format used for `due_date` strings, e.g. "5/15/2022".
pub const DUE_DATE_FORMAT: &str = "%-m/%-d/%Y";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub description: String,
    pub due_date: String,
    pub status: Status,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::NotStarted, Status::InProgress, Status::Completed];

    /// Next option of the status select, wrapping around.
    pub fn next(self) -> Self {
        match self {
            Status::NotStarted => Status::InProgress,
            Status::InProgress => Status::Completed,
            Status::Completed => Status::NotStarted,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Status::NotStarted => "Not Started",
            Status::InProgress => "In Progress",
            Status::Completed => "Completed",
        };
        f.write_str(label)
    }
}

/// Editable columns of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskField {
    Description,
    DueDate,
    Status,
}

impl TaskField {
    pub fn title(self) -> &'static str {
        match self {
            TaskField::Description => "Description",
            TaskField::DueDate => "Due Date",
            TaskField::Status => "Status",
        }
    }
}

/// A committed cell edit: one field, one new value.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskEdit {
    Description(String),
    DueDate(String),
    Status(Status),
}

impl Task {
    pub fn new(description: impl Into<String>, due_date: impl Into<String>, status: Status) -> Self {
        Self {
            id: 0,
            description: description.into(),
            due_date: due_date.into(),
            status,
        }
    }

    /// Template for a freshly added row. The id is a placeholder; the store
    /// assigns the real one.
    pub fn blank() -> Self {
        let due_date = Local::now().format(DUE_DATE_FORMAT).to_string();
        Self::new("", due_date, Status::NotStarted)
    }

    pub fn with_edit(&self, edit: TaskEdit) -> Self {
        let mut task = self.clone();
        match edit {
            TaskEdit::Description(description) => task.description = description,
            TaskEdit::DueDate(due_date) => task.due_date = due_date,
            TaskEdit::Status(status) => task.status = status,
        }
        task
    }

    /// Current text of a column, as shown in the grid.
    pub fn field_text(&self, field: TaskField) -> String {
        match field {
            TaskField::Description => self.description.clone(),
            TaskField::DueDate => self.due_date.clone(),
            TaskField::Status => self.status.to_string(),
        }
    }
}
