use std::collections::BTreeSet;
use std::rc::Rc;

use crate::action::Action;
use crate::ids::IdGenerator;
use crate::task::{Task, TaskId};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToDoState {
    /// Newest first. Unchanged tasks are shared between successive states.
    pub tasks: Vec<Rc<Task>>,
    pub tasks_loading: bool,
    pub tasks_loaded: bool,
    pub error: bool,
}

impl ToDoState {
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id).map(|t| t.as_ref())
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

fn remove_task_array(current: &[Rc<Task>], ids: &BTreeSet<TaskId>) -> Vec<Rc<Task>> {
    current
        .iter()
        .filter(|task| !ids.contains(&task.id))
        .cloned()
        .collect()
}

/// Computes the state that follows `state` once `action` is applied.
///
/// Never fails. Only `AddTask` consults `ids`, so the result is fully
/// determined by the inputs and the generator's current state.
pub fn reduce(state: &ToDoState, action: Action, ids: &mut dyn IdGenerator) -> ToDoState {
    match action {
        Action::LoadTasks => ToDoState {
            tasks_loading: true,
            tasks_loaded: false,
            ..state.clone()
        },
        Action::TasksLoaded(tasks) => ToDoState {
            tasks: tasks.into_iter().map(Rc::new).collect(),
            tasks_loading: false,
            tasks_loaded: true,
            error: false,
        },
        Action::AddTask(task) => {
            let task = Task {
                id: ids.next_id(),
                ..task
            };
            let mut tasks = Vec::with_capacity(state.tasks.len() + 1);
            tasks.push(Rc::new(task));
            tasks.extend(state.tasks.iter().cloned());
            ToDoState {
                tasks,
                ..state.clone()
            }
        }
        Action::UpdateTask(task) => {
            let task = Rc::new(task);
            let tasks = state
                .tasks
                .iter()
                .map(|current| {
                    if current.id == task.id {
                        Rc::clone(&task)
                    } else {
                        Rc::clone(current)
                    }
                })
                .collect();
            ToDoState {
                tasks,
                ..state.clone()
            }
        }
        Action::RemoveTasks(remove) => ToDoState {
            tasks: remove_task_array(&state.tasks, &remove),
            ..state.clone()
        },
        Action::Error => ToDoState {
            tasks_loading: false,
            tasks_loaded: false,
            error: true,
            ..state.clone()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{RandomIds, SequentialIds, ID_RANGE};
    use crate::task::Status;

    fn task(id: TaskId, description: &str) -> Task {
        Task {
            id,
            description: description.into(),
            due_date: "5/1/2022".into(),
            status: Status::NotStarted,
        }
    }

    fn state_with(tasks: Vec<Task>) -> ToDoState {
        ToDoState {
            tasks: tasks.into_iter().map(Rc::new).collect(),
            tasks_loaded: true,
            ..Default::default()
        }
    }

    fn ids_of(state: &ToDoState) -> Vec<TaskId> {
        state.tasks.iter().map(|t| t.id).collect()
    }

    #[test]
    fn load_then_loaded_scenario() {
        let mut ids = SequentialIds::default();
        let initial = ToDoState::default();
        assert!(!initial.tasks_loading && !initial.tasks_loaded && !initial.error);

        let loading = reduce(&initial, Action::LoadTasks, &mut ids);
        assert!(loading.tasks_loading);
        assert!(!loading.tasks_loaded);

        let loaded_task = Task {
            id: 7,
            description: "x".into(),
            due_date: "1/1/2022".into(),
            status: Status::InProgress,
        };
        let loaded = reduce(
            &loading,
            Action::TasksLoaded(vec![loaded_task.clone()]),
            &mut ids,
        );
        assert_eq!(loaded.tasks.len(), 1);
        assert_eq!(*loaded.tasks[0], loaded_task);
        assert!(!loaded.tasks_loading);
        assert!(loaded.tasks_loaded);
        assert!(!loaded.error);
    }

    #[test]
    fn load_tasks_leaves_error_flag_alone() {
        let mut ids = SequentialIds::default();
        let failed = reduce(&ToDoState::default(), Action::Error, &mut ids);
        assert!(failed.error);

        let retry = reduce(&failed, Action::LoadTasks, &mut ids);
        assert!(retry.error);
        assert!(retry.tasks_loading);

        let loaded = reduce(&retry, Action::TasksLoaded(vec![]), &mut ids);
        assert!(!loaded.error);
    }

    #[test]
    fn error_clears_loading_and_loaded() {
        let mut ids = SequentialIds::default();
        let state = ToDoState {
            tasks_loading: true,
            tasks_loaded: true,
            ..state_with(vec![task(1, "keep")])
        };

        let next = reduce(&state, Action::Error, &mut ids);
        assert!(next.error);
        assert!(!next.tasks_loading);
        assert!(!next.tasks_loaded);
        assert_eq!(ids_of(&next), vec![1]);
    }

    #[test]
    fn tasks_loaded_without_load_tasks_is_accepted() {
        let mut ids = SequentialIds::default();
        let next = reduce(
            &ToDoState::default(),
            Action::TasksLoaded(vec![task(3, "a")]),
            &mut ids,
        );
        assert!(next.tasks_loaded);
        assert_eq!(ids_of(&next), vec![3]);
    }

    #[test]
    fn tasks_loaded_twice_equals_once() {
        let mut ids = SequentialIds::default();
        let payload = vec![task(1, "a"), task(2, "b")];
        let start = state_with(vec![task(9, "old")]);

        let once = reduce(&start, Action::TasksLoaded(payload.clone()), &mut ids);
        let twice = reduce(&once, Action::TasksLoaded(payload), &mut ids);
        assert_eq!(once, twice);
        assert!(twice.tasks_loaded && !twice.tasks_loading && !twice.error);
    }

    #[test]
    fn add_task_prepends_with_fresh_id() {
        let mut ids = RandomIds::seeded(3);
        let state = state_with(vec![task(1, "first"), task(2, "second")]);

        let mut input = task(555, "new");
        input.status = Status::Completed;
        let next = reduce(&state, Action::AddTask(input.clone()), &mut ids);

        assert_eq!(next.tasks.len(), state.tasks.len() + 1);
        let added = &next.tasks[0];
        assert!(added.id < ID_RANGE);
        assert_eq!(added.description, input.description);
        assert_eq!(added.due_date, input.due_date);
        assert_eq!(added.status, input.status);
        assert_eq!(ids_of(&next)[1..], [1, 2]);
        assert!(next.tasks_loaded);
    }

    #[test]
    fn add_task_ignores_payload_id() {
        let mut ids = SequentialIds::starting_at(40);
        let next = reduce(&ToDoState::default(), Action::AddTask(task(999, "x")), &mut ids);
        assert_eq!(next.tasks[0].id, 40);
    }

    #[test]
    fn update_task_replaces_matching_task_in_place() {
        let mut ids = SequentialIds::default();
        let state = state_with(vec![task(1, "a"), task(2, "b"), task(3, "c")]);

        let mut replacement = task(2, "b2");
        replacement.status = Status::InProgress;
        let next = reduce(&state, Action::UpdateTask(replacement.clone()), &mut ids);

        assert_eq!(ids_of(&next), vec![1, 2, 3]);
        assert_eq!(next.tasks.iter().filter(|t| ***t == replacement).count(), 1);
        assert_eq!(*next.tasks[1], replacement);
        assert!(Rc::ptr_eq(&next.tasks[0], &state.tasks[0]));
        assert!(Rc::ptr_eq(&next.tasks[2], &state.tasks[2]));
    }

    #[test]
    fn update_task_without_match_keeps_tasks() {
        let mut ids = SequentialIds::default();
        let state = state_with(vec![task(1, "a"), task(2, "b")]);

        let next = reduce(&state, Action::UpdateTask(task(77, "ghost")), &mut ids);
        assert_eq!(next.tasks, state.tasks);
        assert_eq!(next, state);
    }

    #[test]
    fn remove_tasks_keeps_survivors_in_order() {
        let mut ids = SequentialIds::default();
        let state = state_with(vec![task(1, "a"), task(2, "b"), task(3, "c")]);

        let next = reduce(&state, Action::remove_tasks([1, 3]), &mut ids);
        assert_eq!(ids_of(&next), vec![2]);
        assert!(Rc::ptr_eq(&next.tasks[0], &state.tasks[1]));
    }

    #[test]
    fn remove_tasks_matches_filter() {
        let mut ids = SequentialIds::default();
        let state = state_with(vec![
            task(5, "a"),
            task(0, "b"),
            task(8, "c"),
            task(13, "d"),
        ]);
        let remove: BTreeSet<TaskId> = [0, 13, 400].into_iter().collect();

        let expected: Vec<_> = state
            .tasks
            .iter()
            .filter(|t| !remove.contains(&t.id))
            .cloned()
            .collect();
        let next = reduce(&state, Action::RemoveTasks(remove), &mut ids);
        assert_eq!(next.tasks, expected);
    }

    #[test]
    fn remove_tasks_with_empty_set_is_a_no_op() {
        let mut ids = SequentialIds::default();
        let state = state_with(vec![task(1, "a")]);
        let next = reduce(&state, Action::remove_tasks([]), &mut ids);
        assert_eq!(next, state);
    }

    #[test]
    fn reduce_is_repeatable_for_same_inputs() {
        let state = state_with(vec![task(1, "a"), task(2, "b")]);
        let action = Action::AddTask(task(0, "n"));

        let first = reduce(&state, action.clone(), &mut RandomIds::seeded(11));
        let second = reduce(&state, action, &mut RandomIds::seeded(11));
        assert_eq!(first, second);
    }
}
