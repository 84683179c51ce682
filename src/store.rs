use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info};

use crate::action::Action;
use crate::error::StoreClosed;
use crate::ids::IdGenerator;
use crate::reducer::{reduce, ToDoState};

/// Cloneable handle for submitting actions to a [`Store`] from elsewhere.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    tx: UnboundedSender<Action>,
}

impl Dispatcher {
    pub fn dispatch(&self, action: Action) -> Result<(), StoreClosed> {
        self.tx.send(action).map_err(|_| StoreClosed)
    }
}

/// Owns the task state for one application session.
pub struct Store {
    state: ToDoState,
    ids: Box<dyn IdGenerator>,
    tx: UnboundedSender<Action>,
    rx: UnboundedReceiver<Action>,
}

impl Store {
    pub fn new(ids: Box<dyn IdGenerator>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        info!("task store opened");
        Self {
            state: ToDoState::default(),
            ids,
            tx,
            rx,
        }
    }

    pub fn state(&self) -> &ToDoState {
        &self.state
    }

    pub fn dispatcher(&self) -> Dispatcher {
        Dispatcher {
            tx: self.tx.clone(),
        }
    }

    pub fn dispatch(&mut self, action: Action) {
        let name = action.name();
        self.state = reduce(&self.state, action, self.ids.as_mut());
        debug!(
            action = name,
            tasks = self.state.tasks.len(),
            loading = self.state.tasks_loading,
            loaded = self.state.tasks_loaded,
            error = self.state.error,
            "state transition"
        );
    }

    /// Applies the oldest action queued through a [`Dispatcher`], if any.
    pub fn drain_one(&mut self) -> bool {
        match self.rx.try_recv() {
            Ok(action) => {
                self.dispatch(action);
                true
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => false,
        }
    }

    /// Applies every queued action, oldest first.
    pub fn drain(&mut self) -> usize {
        let mut applied = 0;
        while self.drain_one() {
            applied += 1;
        }
        applied
    }

    /// Ends the session. Actions still queued are discarded and later
    /// dispatches fail with [`StoreClosed`].
    pub fn shutdown(mut self) -> ToDoState {
        self.rx.close();
        let dropped = std::iter::from_fn(|| self.rx.try_recv().ok()).count();
        info!(
            tasks = self.state.tasks.len(),
            dropped, "task store closed"
        );
        self.state
    }
}
