use kanban_core::KanbanError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Status lane a task belongs to. The set is fixed for the lifetime of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ColumnId {
    Todo,
    InProgress,
    Done,
}

impl ColumnId {
    pub const ALL: [ColumnId; 3] = [ColumnId::Todo, ColumnId::InProgress, ColumnId::Done];

    /// Wire representation, e.g. `IN_PROGRESS`
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnId::Todo => "TODO",
            ColumnId::InProgress => "IN_PROGRESS",
            ColumnId::Done => "DONE",
        }
    }

    pub fn default_title(&self) -> &'static str {
        match self {
            ColumnId::Todo => "Todo",
            ColumnId::InProgress => "In Progress",
            ColumnId::Done => "Done",
        }
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnId {
    type Err = KanbanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "TODO" | "TO_DO" => Ok(ColumnId::Todo),
            "IN_PROGRESS" => Ok(ColumnId::InProgress),
            "DONE" => Ok(ColumnId::Done),
            _ => Err(KanbanError::Validation(format!("Unknown column: {}", s))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
}

impl Column {
    pub fn new(id: ColumnId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }

    /// The three standard lanes in display order
    pub fn standard_set() -> Vec<Column> {
        ColumnId::ALL
            .iter()
            .map(|id| Column::new(*id, id.default_title()))
            .collect()
    }
}
