use kanban_domain::{DragSubject, DropTarget, NewTask, Point, PointerEvent, TaskId};
use kanban_sync::ReconcileStatus;
use serde::Serialize;

use crate::cli::{CreateArgs, MoveArgs};
use crate::context::CliContext;
use crate::output;

#[derive(Serialize)]
struct MoveResult<'a> {
    task: &'a kanban_domain::Task,
    column_order: Vec<TaskId>,
    reconciled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reconcile_error: Option<String>,
}

pub async fn handle_move(ctx: &mut CliContext, args: MoveArgs) -> anyhow::Result<()> {
    let id = TaskId::new(args.id);
    if ctx.session.state().find_task(&id).is_none() {
        output::output_error(&format!("Task not found: {}", id));
    }

    let target = match (args.over_task, args.to_column) {
        (Some(other), _) => {
            let other = TaskId::new(other);
            if ctx.session.state().find_task(&other).is_none() {
                output::output_error(&format!("Task not found: {}", other));
            }
            DropTarget::Task(other)
        }
        (None, Some(column)) => DropTarget::Column(column),
        (None, None) => output::output_error("Either --over-task or --to-column is required"),
    };

    // Replay a full pointer gesture: press, travel past the threshold, release
    let origin = Point::new(0.0, 0.0);
    let travel = ctx.session.interpreter().activation_distance() + 1.0;
    ctx.session.handle_pointer(PointerEvent::Down {
        subject: DragSubject::Task(id.clone()),
        at: origin,
    });
    ctx.session.handle_pointer(PointerEvent::Move {
        at: Point::new(origin.x, origin.y + travel),
        over: Some(target.clone()),
    });
    let handle = ctx
        .session
        .handle_pointer(PointerEvent::Up { over: Some(target) });

    let (reconciled, reconcile_error) = match handle {
        Some(handle) => match handle.wait().await {
            ReconcileStatus::Delivered => (true, None),
            ReconcileStatus::Failed(e) => (false, Some(e)),
            ReconcileStatus::Aborted => (false, Some("aborted".to_string())),
        },
        None => (false, Some("drop did not produce a move".to_string())),
    };

    let state = ctx.session.state();
    let Some(task) = state.find_task(&id) else {
        output::output_error(&format!("Task vanished during move: {}", id));
    };
    output::output_success(MoveResult {
        task,
        column_order: state.column_order(task.column_id),
        reconciled,
        reconcile_error,
    })
}

pub async fn handle_create(ctx: &mut CliContext, args: CreateArgs) -> anyhow::Result<()> {
    let mut new_task = NewTask::new(args.title, args.status);
    new_task.description = args.description;

    ctx.session.create_task(new_task).await?;
    output::output_list(ctx.session.state().tasks_in(args.status).collect())
}

pub async fn handle_delete(ctx: &mut CliContext, id: String) -> anyhow::Result<()> {
    let id = TaskId::new(id);
    ctx.session.delete_task(&id).await?;

    let still_present = ctx.session.state().find_task(&id).is_some();
    output::output_success(serde_json::json!({
        "deleted": id.to_string(),
        "still_present": still_present,
    }))
}
