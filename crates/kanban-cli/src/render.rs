//! Plain-text board rendering.

use kanban_domain::{BoardState, DragSubject};
use std::fmt::Write;

pub fn render_board(state: &BoardState) -> String {
    let mut out = String::new();
    for (index, view) in state.columns_view().iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "{} ({})", view.column.title, view.tasks.len());
        if view.tasks.is_empty() {
            out.push_str("  (empty)\n");
        }
        for task in &view.tasks {
            let marker = match state.active() {
                Some(DragSubject::Task(id)) if id == &task.id => "*",
                _ => "-",
            };
            let _ = writeln!(out, "  {} [{}] {}", marker, task.id, task.title);
        }
    }
    out
}
