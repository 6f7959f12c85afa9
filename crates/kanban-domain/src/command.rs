use serde::{Deserialize, Serialize};

use crate::column::ColumnId;
use crate::task::TaskId;

/// Side effect requested by a board transition, performed by the sync layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyncCommand {
    /// Persist the full top-to-bottom order of one column.
    /// Each command is a complete snapshot of the column, never a delta.
    UpdateOrder {
        issue_ids: Vec<TaskId>,
        target_column_id: ColumnId,
    },
}

impl SyncCommand {
    /// Human-readable description of what this command does
    pub fn description(&self) -> String {
        match self {
            SyncCommand::UpdateOrder {
                issue_ids,
                target_column_id,
            } => format!(
                "Update order of {} ({} tasks)",
                target_column_id,
                issue_ids.len()
            ),
        }
    }
}
