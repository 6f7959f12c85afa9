//! Fire-and-forget order reconciliation.
//!
//! Each completed gesture produces one independent request carrying the full
//! order of the destination column. Requests are never retried, queued or
//! de-duplicated, and a failure never rolls back the local board: the next
//! full refresh is the only healing point.

use kanban_domain::SyncCommand;
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::traits::{TaskService, UpdateOrderRequest};

/// Outcome of one reconciliation request, for callers that choose to wait
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileStatus {
    Delivered,
    /// The request failed; the error was logged and the board left as is
    Failed(String),
    /// The caller aborted the request before it completed
    Aborted,
}

/// Handle to an in-flight reconciliation request.
/// Dropping it (or calling [`detach`](Self::detach)) lets the request run on
/// in the background.
#[derive(Debug)]
pub struct ReconcileHandle {
    inner: JoinHandle<ReconcileStatus>,
}

impl ReconcileHandle {
    pub async fn wait(self) -> ReconcileStatus {
        match self.inner.await {
            Ok(status) => status,
            Err(e) if e.is_cancelled() => ReconcileStatus::Aborted,
            Err(e) => ReconcileStatus::Failed(format!("Reconciliation task panicked: {}", e)),
        }
    }

    /// Abandon interest in the response. The request may already be on the wire.
    pub fn abort(&self) {
        self.inner.abort();
    }

    pub fn detach(self) {
        drop(self.inner);
    }

    pub fn is_finished(&self) -> bool {
        self.inner.is_finished()
    }
}

#[derive(Clone)]
pub struct Reconciler {
    service: Arc<dyn TaskService>,
}

impl Reconciler {
    pub fn new(service: Arc<dyn TaskService>) -> Self {
        Self { service }
    }

    /// Spawn the request on the current tokio runtime and return immediately
    pub fn submit(&self, command: SyncCommand) -> ReconcileHandle {
        let service = Arc::clone(&self.service);
        tracing::debug!("Submitting reconciliation: {}", command.description());
        let inner = tokio::spawn(async move { reconcile(service.as_ref(), command).await });
        ReconcileHandle { inner }
    }
}

async fn reconcile(service: &dyn TaskService, command: SyncCommand) -> ReconcileStatus {
    let description = command.description();
    let request = UpdateOrderRequest::from(command);
    match service.update_order(&request).await {
        Ok(()) => {
            tracing::debug!("Reconciled: {}", description);
            ReconcileStatus::Delivered
        }
        Err(e) => {
            tracing::warn!(
                "Reconciliation failed, board may diverge until next refresh: {}: {}",
                description,
                e
            );
            ReconcileStatus::Failed(e.to_string())
        }
    }
}
