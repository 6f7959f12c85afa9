use kanban_core::AppConfig;
use kanban_domain::{ColumnId, DragSubject, DropTarget, Point, PointerEvent, TaskId};
use kanban_sync::{BoardSession, HttpTaskService, ReconcileHandle, ReconcileStatus};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ISSUES: &str = "/projects/p1/issues";
const UPDATE_ORDER: &str = "/projects/p1/issues/updateOrder";

async fn mount_snapshot(server: &MockServer, snapshot: Value) {
    Mock::given(method("GET"))
        .and(path(ISSUES))
        .respond_with(ResponseTemplate::new(200).set_body_json(snapshot))
        .mount(server)
        .await;
}

async fn open(server: &MockServer) -> BoardSession {
    let service = HttpTaskService::new(&server.uri(), "p1").unwrap();
    BoardSession::load(Arc::new(service), &AppConfig::default()).await
}

fn drag(session: &mut BoardSession, id: &str, over: DropTarget) -> Option<ReconcileHandle> {
    session.handle_pointer(PointerEvent::Down {
        subject: DragSubject::Task(TaskId::new(id)),
        at: Point::new(100.0, 100.0),
    });
    session.handle_pointer(PointerEvent::Move {
        at: Point::new(100.0, 130.0),
        over: Some(over.clone()),
    });
    session.handle_pointer(PointerEvent::Up { over: Some(over) })
}

fn layout(session: &BoardSession) -> Vec<(String, ColumnId)> {
    session
        .state()
        .tasks()
        .iter()
        .map(|t| (t.id.to_string(), t.column_id))
        .collect()
}

async fn update_order_bodies(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.method.as_str() == "PATCH")
        .map(|r| serde_json::from_slice(&r.body).unwrap())
        .collect()
}

#[tokio::test]
async fn test_reorder_within_column() {
    let server = MockServer::start().await;
    mount_snapshot(
        &server,
        json!([
            {"id": "A", "status": "TODO", "title": "a"},
            {"id": "B", "status": "TODO", "title": "b"},
            {"id": "C", "status": "DONE", "title": "c"}
        ]),
    )
    .await;
    Mock::given(method("PATCH"))
        .and(path(UPDATE_ORDER))
        .and(body_json(json!({"issueIds": ["B", "A"], "targetColumnId": "TODO"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = open(&server).await;
    let handle = drag(&mut session, "A", DropTarget::Task(TaskId::new("B"))).unwrap();

    assert_eq!(
        layout(&session),
        vec![
            ("B".to_string(), ColumnId::Todo),
            ("A".to_string(), ColumnId::Todo),
            ("C".to_string(), ColumnId::Done)
        ]
    );
    assert_eq!(handle.wait().await, ReconcileStatus::Delivered);
}

#[tokio::test]
async fn test_move_to_empty_column() {
    let server = MockServer::start().await;
    mount_snapshot(
        &server,
        json!([
            {"id": "A", "status": "TODO", "title": "a"},
            {"id": "B", "status": "IN_PROGRESS", "title": "b"}
        ]),
    )
    .await;
    Mock::given(method("PATCH"))
        .and(path(UPDATE_ORDER))
        .and(body_json(json!({"issueIds": ["A"], "targetColumnId": "DONE"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = open(&server).await;
    let handle = drag(&mut session, "A", DropTarget::Column(ColumnId::Done)).unwrap();

    assert_eq!(
        layout(&session),
        vec![
            ("B".to_string(), ColumnId::InProgress),
            ("A".to_string(), ColumnId::Done)
        ]
    );
    assert_eq!(handle.wait().await, ReconcileStatus::Delivered);
}

#[tokio::test]
async fn test_click_below_activation_distance() {
    let server = MockServer::start().await;
    mount_snapshot(
        &server,
        json!([
            {"id": "A", "status": "TODO", "title": "a"},
            {"id": "B", "status": "TODO", "title": "b"}
        ]),
    )
    .await;
    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut session = open(&server).await;
    let before = layout(&session);

    session.handle_pointer(PointerEvent::Down {
        subject: DragSubject::Task(TaskId::new("A")),
        at: Point::new(50.0, 50.0),
    });
    session.handle_pointer(PointerEvent::Move {
        at: Point::new(52.0, 51.0),
        over: Some(DropTarget::Task(TaskId::new("B"))),
    });
    let handle = session.handle_pointer(PointerEvent::Up {
        over: Some(DropTarget::Task(TaskId::new("B"))),
    });

    assert!(handle.is_none());
    assert!(!session.interpreter().is_dragging());
    assert_eq!(layout(&session), before);
}

#[tokio::test]
async fn test_out_of_order_responses_carry_full_snapshots() {
    let server = MockServer::start().await;
    mount_snapshot(
        &server,
        json!([
            {"id": "A", "status": "TODO", "title": "a"},
            {"id": "B", "status": "TODO", "title": "b"},
            {"id": "C", "status": "TODO", "title": "c"}
        ]),
    )
    .await;
    // The first request is slow, the second fast: responses arrive reversed
    Mock::given(method("PATCH"))
        .and(path(UPDATE_ORDER))
        .and(body_json(json!({"issueIds": ["B", "A", "C"], "targetColumnId": "TODO"})))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(300)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path(UPDATE_ORDER))
        .and(body_json(json!({"issueIds": ["B", "C", "A"], "targetColumnId": "TODO"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = open(&server).await;
    let first = drag(&mut session, "A", DropTarget::Task(TaskId::new("B"))).unwrap();
    let second = drag(&mut session, "A", DropTarget::Task(TaskId::new("C"))).unwrap();

    assert_eq!(second.wait().await, ReconcileStatus::Delivered);
    assert!(!first.is_finished());
    assert_eq!(first.wait().await, ReconcileStatus::Delivered);

    // Every request is the whole column as it stood at its own drop
    let bodies = update_order_bodies(&server).await;
    assert_eq!(bodies.len(), 2);
    for body in &bodies {
        assert_eq!(body["issueIds"].as_array().unwrap().len(), 3);
    }
    assert_eq!(
        session.state().column_order(ColumnId::Todo),
        vec![TaskId::new("B"), TaskId::new("C"), TaskId::new("A")]
    );
}

#[tokio::test]
async fn test_failed_reconciliation_heals_on_refresh() {
    let server = MockServer::start().await;
    mount_snapshot(
        &server,
        json!([
            {"id": "A", "status": "TODO", "title": "a"},
            {"id": "B", "status": "IN_PROGRESS", "title": "b"}
        ]),
    )
    .await;
    Mock::given(method("PATCH"))
        .and(path(UPDATE_ORDER))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = open(&server).await;
    let handle = drag(&mut session, "A", DropTarget::Column(ColumnId::InProgress)).unwrap();
    assert!(matches!(handle.wait().await, ReconcileStatus::Failed(_)));

    // No rollback: the optimistic move stays until the next refresh
    assert_eq!(
        session.state().find_task(&TaskId::new("A")).unwrap().column_id,
        ColumnId::InProgress
    );

    assert!(session.refresh().await);
    assert_eq!(
        session.state().find_task(&TaskId::new("A")).unwrap().column_id,
        ColumnId::Todo
    );
}

#[tokio::test]
async fn test_drop_outside_any_target_sends_nothing() {
    let server = MockServer::start().await;
    mount_snapshot(
        &server,
        json!([
            {"id": "A", "status": "TODO", "title": "a"},
            {"id": "B", "status": "TODO", "title": "b"}
        ]),
    )
    .await;
    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut session = open(&server).await;
    session.handle_pointer(PointerEvent::Down {
        subject: DragSubject::Task(TaskId::new("A")),
        at: Point::default(),
    });
    session.handle_pointer(PointerEvent::Move {
        at: Point::new(0.0, 25.0),
        over: Some(DropTarget::Task(TaskId::new("B"))),
    });
    let handle = session.handle_pointer(PointerEvent::Up { over: None });

    assert!(handle.is_none());
    assert!(session.state().active().is_none());
    assert_eq!(
        session.state().column_order(ColumnId::Todo),
        vec![TaskId::new("B"), TaskId::new("A")]
    );
}
