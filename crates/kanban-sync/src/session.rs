use kanban_core::{AppConfig, KanbanResult};
use kanban_domain::{
    BoardState, GestureEvent, GestureInterpreter, NewTask, PointerEvent, SyncCommand, Task, TaskId,
};
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::reconciler::{ReconcileHandle, Reconciler};
use crate::traits::TaskService;

/// One open board: owns the task list, interprets pointer input, and talks
/// to the task service.
///
/// The board state is only mutated through `&mut self`, so pointer events
/// and refresh results are applied one at a time in arrival order.
/// Reconciliation requests run detached and never touch the board.
pub struct BoardSession {
    state: BoardState,
    interpreter: GestureInterpreter,
    service: Arc<dyn TaskService>,
    reconciler: Reconciler,
}

impl BoardSession {
    pub fn new(service: Arc<dyn TaskService>, interpreter: GestureInterpreter) -> Self {
        Self {
            state: BoardState::default(),
            interpreter,
            reconciler: Reconciler::new(Arc::clone(&service)),
            service,
        }
    }

    pub fn from_config(service: Arc<dyn TaskService>, config: &AppConfig) -> Self {
        let interpreter = GestureInterpreter::new(config.effective_activation_distance())
            .with_column_drag(config.effective_allow_column_drag());
        Self::new(service, interpreter)
    }

    /// Open a board and seed it with the initial snapshot.
    /// A failed initial fetch leaves the board empty.
    pub async fn load(service: Arc<dyn TaskService>, config: &AppConfig) -> Self {
        let mut session = Self::from_config(service, config);
        session.refresh().await;
        session
    }

    /// Open a board, failing when the initial snapshot cannot be fetched.
    /// For hosts that have no earlier board to fall back on.
    pub async fn open(service: Arc<dyn TaskService>, config: &AppConfig) -> KanbanResult<Self> {
        let mut session = Self::from_config(service, config);
        let tasks = session.service.fetch_tasks().await?;
        session.apply_snapshot(Ok(tasks));
        Ok(session)
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn interpreter(&self) -> &GestureInterpreter {
        &self.interpreter
    }

    /// Feed raw pointer input. Returns the reconciliation request started by
    /// a completed gesture, if any.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Option<ReconcileHandle> {
        let mut handle = None;
        for gesture in self.interpreter.handle(event) {
            if let Some(command) = self.dispatch(gesture) {
                handle = Some(self.reconciler.submit(command));
            }
        }
        handle
    }

    /// Apply one semantic gesture event to the board
    pub fn dispatch(&mut self, event: GestureEvent) -> Option<SyncCommand> {
        let state = std::mem::take(&mut self.state);
        let (next, command) = state.reduce(event);
        self.state = next;
        command
    }

    /// Fetch and apply the authoritative snapshot. Returns whether the board
    /// was replaced.
    pub async fn refresh(&mut self) -> bool {
        let result = self.service.fetch_tasks().await;
        self.apply_snapshot(result)
    }

    /// Start a snapshot fetch without holding the board. Feed the result to
    /// [`apply_snapshot`](Self::apply_snapshot) when it resolves.
    pub fn begin_refresh(&self) -> JoinHandle<KanbanResult<Vec<Task>>> {
        let service = Arc::clone(&self.service);
        tokio::spawn(async move { service.fetch_tasks().await })
    }

    /// Replace the task list with a fetched snapshot. On failure the current
    /// list stays as it is.
    pub fn apply_snapshot(&mut self, result: KanbanResult<Vec<Task>>) -> bool {
        match result {
            Ok(tasks) => {
                tracing::info!("Refreshed board with {} tasks", tasks.len());
                self.state.replace_tasks(tasks);
                true
            }
            Err(e) => {
                tracing::warn!("Refresh failed, keeping last known board: {}", e);
                false
            }
        }
    }

    /// Create a task, then refresh to pick up its server-assigned id
    pub async fn create_task(&mut self, task: NewTask) -> KanbanResult<()> {
        self.service.create_task(&task).await?;
        tracing::info!("Created task '{}'", task.title);
        self.refresh().await;
        Ok(())
    }

    /// Remove a task locally at once, delete it remotely, then refresh.
    /// The refresh runs either way; a failed delete is healed by it and the
    /// remote outcome is returned.
    pub async fn delete_task(&mut self, id: &TaskId) -> KanbanResult<()> {
        if self.state.remove_task(id).is_none() {
            tracing::debug!("Deleting task {} not present on the board", id);
        }
        let result = self.service.delete_task(id).await;
        match &result {
            Ok(()) => tracing::info!("Deleted task {}", id),
            Err(e) => tracing::warn!("Delete of task {} failed: {}", id, e),
        }
        self.refresh().await;
        result
    }
}
