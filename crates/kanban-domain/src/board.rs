//! Board state and the reordering algorithm.
//!
//! Task order within a column is the order of the task list filtered by
//! column; no rank field exists. Every transition consumes the state and
//! returns the next one so that callers and tests can treat them as pure
//! functions.

use serde::Serialize;
use std::collections::HashSet;

use crate::column::{Column, ColumnId};
use crate::command::SyncCommand;
use crate::gesture::{DragSubject, DropTarget, GestureEnd, GestureEvent, GestureOver};
use crate::search::TitleSearcher;
use crate::task::{Task, TaskId};

/// Stable single-element relocation: remove at `from`, insert at `to`.
/// Out-of-range indices leave the list untouched.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if from >= items.len() || to >= items.len() || from == to {
        return;
    }
    let item = items.remove(from);
    items.insert(to, item);
}

/// One column with its tasks in display order
#[derive(Debug, Clone, Serialize)]
pub struct ColumnView<'a> {
    pub column: &'a Column,
    pub tasks: Vec<&'a Task>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoardState {
    columns: Vec<Column>,
    tasks: Vec<Task>,
    active: Option<DragSubject>,
    last_over: Option<GestureOver>,
}

impl BoardState {
    pub fn new(columns: Vec<Column>, tasks: Vec<Task>) -> Self {
        Self {
            columns,
            tasks: dedup_tasks(tasks),
            active: None,
            last_over: None,
        }
    }

    /// Board with the standard Todo / In Progress / Done lanes
    pub fn with_standard_columns(tasks: Vec<Task>) -> Self {
        Self::new(Column::standard_set(), tasks)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Subject of the gesture in progress, used to highlight the dragged card
    pub fn active(&self) -> Option<&DragSubject> {
        self.active.as_ref()
    }

    pub fn find_task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    fn task_index(&self, id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| &t.id == id)
    }

    fn column_index(&self, id: ColumnId) -> Option<usize> {
        self.columns.iter().position(|c| c.id == id)
    }

    pub fn tasks_in(&self, column: ColumnId) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(move |t| t.column_id == column)
    }

    /// Top-to-bottom task ids of one column
    pub fn column_order(&self, column: ColumnId) -> Vec<TaskId> {
        self.tasks_in(column).map(|t| t.id.clone()).collect()
    }

    /// Columns in display order, each with its tasks
    pub fn columns_view(&self) -> Vec<ColumnView<'_>> {
        self.columns
            .iter()
            .map(|column| ColumnView {
                column,
                tasks: self.tasks_in(column.id).collect(),
            })
            .collect()
    }

    /// Tasks whose title contains `query`, ignoring case
    pub fn search(&self, query: &str) -> Vec<&Task> {
        let searcher = TitleSearcher::new(query);
        self.tasks.iter().filter(|t| searcher.matches(t)).collect()
    }

    /// Append a task created elsewhere
    pub fn push_task(&mut self, task: Task) {
        if self.task_index(&task.id).is_some() {
            tracing::warn!("Task {} already on the board, ignoring append", task.id);
            return;
        }
        self.last_over = None;
        self.tasks.push(task);
    }

    /// Remove a task, returning it when present
    pub fn remove_task(&mut self, id: &TaskId) -> Option<Task> {
        let index = self.task_index(id)?;
        self.last_over = None;
        Some(self.tasks.remove(index))
    }

    /// Replace the list wholesale with an authoritative snapshot
    pub fn replace_tasks(&mut self, tasks: Vec<Task>) {
        self.tasks = dedup_tasks(tasks);
        self.last_over = None;
        if let Some(DragSubject::Task(id)) = &self.active {
            if self.task_index(id).is_none() {
                tracing::debug!("Dragged task {} vanished in refresh", id);
            }
        }
    }

    pub fn apply_gesture_start(mut self, subject: DragSubject) -> Self {
        if !self.subject_exists(&subject) {
            tracing::debug!("Ignoring drag start for unknown subject {:?}", subject);
            return self;
        }
        self.active = Some(subject);
        self.last_over = None;
        self
    }

    /// Commit a live preview of the hovered position into the list.
    /// Repeating the event just applied is a no-op, so hover may fire at
    /// pointer rate.
    pub fn apply_gesture_over(mut self, over: &GestureOver) -> Self {
        if self.last_over.as_ref() == Some(over) {
            return self;
        }
        match (&over.subject, &over.target) {
            (DragSubject::Task(active), DropTarget::Task(target)) => {
                self.move_task_over_task(active, target);
            }
            (DragSubject::Task(active), DropTarget::Column(column)) => {
                self.move_task_to_column(active, *column);
            }
            (DragSubject::Column(active), DropTarget::Column(target)) => {
                self.swap_columns(*active, *target);
            }
            (DragSubject::Column(_), DropTarget::Task(_)) => {}
        }
        self.last_over = Some(over.clone());
        self
    }

    /// Finish the gesture. The list already has its final shape; this only
    /// clears the drag state and describes the reconciliation to perform.
    pub fn apply_gesture_end(mut self, end: &GestureEnd) -> (Self, Option<SyncCommand>) {
        self.active = None;
        self.last_over = None;

        let DragSubject::Task(active) = &end.subject else {
            return (self, None);
        };
        let Some(dropped_on) = &end.dropped_on else {
            tracing::debug!("Task {} dropped outside any target", active);
            return (self, None);
        };
        if !self.target_exists(dropped_on) {
            tracing::debug!("Task {} dropped on unknown target {:?}", active, dropped_on);
            return (self, None);
        }
        let Some(task) = self.find_task(active) else {
            tracing::debug!("Ignoring drag end for unknown task {}", active);
            return (self, None);
        };

        let target_column_id = task.column_id;
        let command = SyncCommand::UpdateOrder {
            issue_ids: self.column_order(target_column_id),
            target_column_id,
        };
        (self, Some(command))
    }

    /// Route a semantic gesture event to its transition
    pub fn reduce(self, event: GestureEvent) -> (Self, Option<SyncCommand>) {
        match event {
            GestureEvent::Start(subject) => (self.apply_gesture_start(subject), None),
            GestureEvent::Over(over) => (self.apply_gesture_over(&over), None),
            GestureEvent::End(end) => self.apply_gesture_end(&end),
        }
    }

    fn subject_exists(&self, subject: &DragSubject) -> bool {
        match subject {
            DragSubject::Task(id) => self.task_index(id).is_some(),
            DragSubject::Column(id) => self.column_index(*id).is_some(),
        }
    }

    fn target_exists(&self, target: &DropTarget) -> bool {
        match target {
            DropTarget::Task(id) => self.task_index(id).is_some(),
            DropTarget::Column(id) => self.column_index(*id).is_some(),
        }
    }

    fn move_task_over_task(&mut self, active: &TaskId, target: &TaskId) {
        if active == target {
            return;
        }
        let (Some(active_index), Some(over_index)) =
            (self.task_index(active), self.task_index(target))
        else {
            return;
        };

        let target_column = self.tasks[over_index].column_id;
        if self.tasks[active_index].column_id != target_column {
            self.tasks[active_index].move_to_column(target_column);
        }
        move_item(&mut self.tasks, active_index, over_index);
    }

    fn move_task_to_column(&mut self, active: &TaskId, column: ColumnId) {
        if self.column_index(column).is_none() {
            return;
        }
        let Some(active_index) = self.task_index(active) else {
            return;
        };

        let mut task = self.tasks.remove(active_index);
        task.move_to_column(column);
        // Right after the column's last task, or at the end when the column is empty
        let insert_at = self
            .tasks
            .iter()
            .rposition(|t| t.column_id == column)
            .map_or(self.tasks.len(), |last| last + 1);
        self.tasks.insert(insert_at, task);
    }

    fn swap_columns(&mut self, active: ColumnId, target: ColumnId) {
        if let (Some(a), Some(b)) = (self.column_index(active), self.column_index(target)) {
            self.columns.swap(a, b);
        }
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::with_standard_columns(Vec::new())
    }
}

fn dedup_tasks(tasks: Vec<Task>) -> Vec<Task> {
    let mut seen = HashSet::with_capacity(tasks.len());
    let total = tasks.len();
    let unique: Vec<Task> = tasks
        .into_iter()
        .filter(|t| seen.insert(t.id.clone()))
        .collect();
    if unique.len() != total {
        tracing::warn!("Dropped {} duplicate task(s) from snapshot", total - unique.len());
    }
    unique
}
