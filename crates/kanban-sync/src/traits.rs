use async_trait::async_trait;
use kanban_core::KanbanResult;
use kanban_domain::{ColumnId, NewTask, SyncCommand, Task, TaskId};
use serde::{Deserialize, Serialize};

/// Body of the order update call: the complete order of one column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderRequest {
    pub issue_ids: Vec<TaskId>,
    pub target_column_id: ColumnId,
}

impl From<SyncCommand> for UpdateOrderRequest {
    fn from(command: SyncCommand) -> Self {
        match command {
            SyncCommand::UpdateOrder {
                issue_ids,
                target_column_id,
            } => Self {
                issue_ids,
                target_column_id,
            },
        }
    }
}

/// Remote task service scoped to one project.
/// The service is the authority on task order; the board only caches it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskService: Send + Sync {
    /// Fetch the full task snapshot
    async fn fetch_tasks(&self) -> KanbanResult<Vec<Task>>;

    /// Create a task; the caller refreshes to learn its id
    async fn create_task(&self, task: &NewTask) -> KanbanResult<()>;

    async fn delete_task(&self, id: &TaskId) -> KanbanResult<()>;

    /// Overwrite the stored order and status of every listed task
    async fn update_order(&self, request: &UpdateOrderRequest) -> KanbanResult<()>;
}
