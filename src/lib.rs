pub mod action;
pub mod config;
pub mod error;
pub mod ids;
pub mod loader;
pub mod reducer;
pub mod store;
pub mod task;

pub use action::Action;
pub use reducer::{reduce, ToDoState};
pub use store::{Dispatcher, Store};
pub use task::{Status, Task, TaskEdit, TaskField, TaskId};
