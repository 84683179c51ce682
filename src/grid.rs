use std::collections::BTreeSet;
use std::ops::Range;

use taskgrid::{Action, Task, TaskEdit, TaskField, TaskId, ToDoState};

/// A cell being edited: which task, which column, and the text typed so far.
#[derive(Debug, Clone, PartialEq)]
pub struct CellEditor {
    pub id: TaskId,
    pub field: TaskField,
    pub buffer: String,
}

/// Cursor, selection and paging for the task table. Reads the store state,
/// never changes it; edits come back out as actions.
#[derive(Debug)]
pub struct TaskGrid {
    pub cursor: usize,
    pub selected: BTreeSet<TaskId>,
    pub page_size: usize,
    pub editor: Option<CellEditor>,
}

impl TaskGrid {
    pub fn new(page_size: usize) -> Self {
        Self {
            cursor: 0,
            selected: BTreeSet::new(),
            page_size: page_size.max(1),
            editor: None,
        }
    }

    pub fn page(&self) -> usize {
        self.cursor / self.page_size
    }

    pub fn page_count(&self, len: usize) -> usize {
        len.div_ceil(self.page_size).max(1)
    }

    pub fn visible_range(&self, len: usize) -> Range<usize> {
        let start = self.page() * self.page_size;
        start.min(len)..(start + self.page_size).min(len)
    }

    pub fn current<'a>(&self, state: &'a ToDoState) -> Option<&'a Task> {
        state.tasks.get(self.cursor).map(|t| t.as_ref())
    }

    pub fn move_cursor(&mut self, delta: isize, len: usize) {
        if len == 0 {
            self.cursor = 0;
            return;
        }
        self.cursor = (self.cursor as isize + delta).clamp(0, len as isize - 1) as usize;
    }

    pub fn next_page(&mut self, len: usize) {
        if self.page() + 1 < self.page_count(len) {
            self.cursor = (self.page() + 1) * self.page_size;
        }
    }

    pub fn prev_page(&mut self) {
        if self.page() > 0 {
            self.cursor = (self.page() - 1) * self.page_size;
        }
    }

    /// Re-fits cursor and selection after the task list changed.
    pub fn sync(&mut self, state: &ToDoState) {
        self.cursor = self.cursor.min(state.len().saturating_sub(1));
        self.selected
            .retain(|id| state.tasks.iter().any(|t| t.id == *id));
        if self
            .editor
            .as_ref()
            .is_some_and(|editor| state.task(editor.id).is_none())
        {
            self.editor = None;
        }
    }

    pub fn toggle_selected(&mut self, state: &ToDoState) {
        if let Some(task) = self.current(state) {
            if !self.selected.remove(&task.id) {
                self.selected.insert(task.id);
            }
        }
    }

    pub fn add_action(&mut self) -> Action {
        self.cursor = 0;
        Action::AddTask(Task::blank())
    }

    /// Removes the selected rows, or the row under the cursor when nothing is
    /// selected.
    pub fn delete_action(&mut self, state: &ToDoState) -> Option<Action> {
        if !self.selected.is_empty() {
            return Some(Action::RemoveTasks(std::mem::take(&mut self.selected)));
        }
        self.current(state).map(|task| Action::remove_tasks([task.id]))
    }

    pub fn cycle_status_action(&self, state: &ToDoState) -> Option<Action> {
        self.current(state).map(|task| {
            Action::UpdateTask(task.with_edit(TaskEdit::Status(task.status.next())))
        })
    }

    pub fn begin_edit(&mut self, state: &ToDoState, field: TaskField) {
        if let Some(task) = self.current(state) {
            self.editor = Some(CellEditor {
                id: task.id,
                field,
                buffer: task.field_text(field),
            });
        }
    }

    pub fn input(&mut self, c: char) {
        if let Some(editor) = &mut self.editor {
            editor.buffer.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(editor) = &mut self.editor {
            editor.buffer.pop();
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editor = None;
    }

    /// Turns the open editor into an `UpdateTask`, provided exactly one task
    /// still carries the edited id.
    pub fn commit_edit(&mut self, state: &ToDoState) -> Option<Action> {
        let editor = self.editor.take()?;
        let mut matching = state.tasks.iter().filter(|t| t.id == editor.id);
        let task = matching.next()?;
        if matching.next().is_some() {
            return None;
        }

        let edit = match editor.field {
            TaskField::Description => TaskEdit::Description(editor.buffer),
            TaskField::DueDate => TaskEdit::DueDate(editor.buffer),
            // Status is changed by cycling, never typed.
            TaskField::Status => return None,
        };
        Some(Action::UpdateTask(task.with_edit(edit)))
    }
}
