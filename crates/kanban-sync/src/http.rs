//! JSON-over-HTTP implementation of [`TaskService`].

use async_trait::async_trait;
use kanban_core::{AppConfig, KanbanError, KanbanResult};
use kanban_domain::{NewTask, Task, TaskId};
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::Deserialize;
use std::time::Duration;

use crate::traits::{TaskService, UpdateOrderRequest};

/// Wrapped snapshot shape: `{"issues": [...]}` or `{"data": [...]}`
#[derive(Deserialize)]
struct WrappedIssues {
    #[serde(alias = "data")]
    issues: Vec<Task>,
}

/// Decode a snapshot given either as a bare array or wrapped in an object.
/// The shape is picked up front so a bad task reports its own field error.
fn decode_snapshot(body: &[u8]) -> KanbanResult<Vec<Task>> {
    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|e| KanbanError::Serialization(e.to_string()))?;
    let tasks = if value.is_array() {
        serde_json::from_value::<Vec<Task>>(value)
    } else {
        serde_json::from_value::<WrappedIssues>(value).map(|wrapped| wrapped.issues)
    };
    tasks.map_err(|e| KanbanError::Serialization(e.to_string()))
}

#[derive(Debug, Clone)]
pub struct HttpTaskService {
    client: Client,
    base_url: Url,
    project_id: String,
    auth_token: Option<String>,
}

impl HttpTaskService {
    const DEFAULT_TIMEOUT_SECS: u64 = 10;

    pub fn new(base_url: &str, project_id: impl Into<String>) -> KanbanResult<Self> {
        Self::with_timeout(
            base_url,
            project_id,
            Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
        )
    }

    pub fn with_timeout(
        base_url: &str,
        project_id: impl Into<String>,
        timeout: Duration,
    ) -> KanbanResult<Self> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| KanbanError::Validation(format!("Invalid API URL {}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(KanbanError::Validation(format!(
                "API URL cannot be used as a base: {}",
                base_url
            )));
        }

        let project_id = project_id.into();
        if project_id.trim().is_empty() {
            return Err(KanbanError::Validation("Project id is empty".to_string()));
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("kanban-board/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| KanbanError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            project_id,
            auth_token: None,
        })
    }

    /// Build from configuration; `project_id` must be set
    pub fn from_config(config: &AppConfig) -> KanbanResult<Self> {
        let project_id = config
            .project_id
            .clone()
            .ok_or_else(|| KanbanError::Validation("No project id configured".to_string()))?;
        let service = Self::with_timeout(
            config.effective_api_url(),
            project_id,
            Duration::from_secs(config.effective_request_timeout_secs()),
        )?;
        Ok(match &config.auth_token {
            Some(token) => service.with_auth_token(token.clone()),
            None => service,
        })
    }

    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// `{base}/projects/{project}/issues/{segments..}` with each segment escaped
    fn issues_url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty()
                .extend(["projects", self.project_id.as_str(), "issues"])
                .extend(segments);
        }
        url
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self
            .client
            .request(method, url)
            .header("Accept", "application/json");
        match &self.auth_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> KanbanResult<Response> {
        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                KanbanError::Connection(format!("Request timed out: {}", e))
            } else {
                KanbanError::Connection(e.to_string())
            }
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        let message = if message.trim().is_empty() {
            status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string()
        } else {
            message
        };
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(KanbanError::NotFound(message));
        }
        Err(KanbanError::Remote {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl TaskService for HttpTaskService {
    async fn fetch_tasks(&self) -> KanbanResult<Vec<Task>> {
        let url = self.issues_url(&[]);
        tracing::debug!("GET {}", url);
        let response = self.send(self.request(Method::GET, url)).await?;

        let body = response
            .bytes()
            .await
            .map_err(|e| KanbanError::Connection(e.to_string()))?;
        decode_snapshot(&body)
    }

    async fn create_task(&self, task: &NewTask) -> KanbanResult<()> {
        let url = self.issues_url(&["create"]);
        tracing::debug!("POST {}", url);
        self.send(self.request(Method::POST, url).json(task)).await?;
        Ok(())
    }

    async fn delete_task(&self, id: &TaskId) -> KanbanResult<()> {
        let url = self.issues_url(&[id.as_str()]);
        tracing::debug!("DELETE {}", url);
        self.send(self.request(Method::DELETE, url)).await?;
        Ok(())
    }

    async fn update_order(&self, request: &UpdateOrderRequest) -> KanbanResult<()> {
        let url = self.issues_url(&["updateOrder"]);
        tracing::debug!(
            "PATCH {} ({} ids -> {})",
            url,
            request.issue_ids.len(),
            request.target_column_id
        );
        self.send(self.request(Method::PATCH, url).json(request))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issues_url_escapes_segments() {
        let service = HttpTaskService::new("https://tracker.example.com/api/", "team a").unwrap();
        assert_eq!(
            service.issues_url(&[]).as_str(),
            "https://tracker.example.com/api/projects/team%20a/issues"
        );
        assert_eq!(
            service.issues_url(&["x/y"]).as_str(),
            "https://tracker.example.com/api/projects/team%20a/issues/x%2Fy"
        );
    }

    #[test]
    fn test_issues_url_on_bare_host() {
        let service = HttpTaskService::new("http://localhost:8080", "p1").unwrap();
        assert_eq!(
            service.issues_url(&["updateOrder"]).as_str(),
            "http://localhost:8080/projects/p1/issues/updateOrder"
        );
    }

    #[test]
    fn test_rejects_invalid_configuration() {
        assert!(HttpTaskService::new("not a url", "p1").is_err());
        assert!(HttpTaskService::new("mailto:someone@example.com", "p1").is_err());
        assert!(HttpTaskService::new("http://localhost", "  ").is_err());
    }

    #[test]
    fn test_from_config_requires_project() {
        let config = AppConfig::default();
        assert!(matches!(
            HttpTaskService::from_config(&config),
            Err(KanbanError::Validation(_))
        ));

        let config = AppConfig {
            project_id: Some("p9".to_string()),
            auth_token: Some("secret".to_string()),
            ..Default::default()
        };
        let service = HttpTaskService::from_config(&config).unwrap();
        assert_eq!(service.project_id(), "p9");
        assert_eq!(service.auth_token.as_deref(), Some("secret"));
    }

    #[test]
    fn test_snapshot_shapes() {
        let bare = decode_snapshot(br#"[{"id":"a","status":"TODO","title":"A"}]"#).unwrap();
        assert_eq!(bare.len(), 1);

        let wrapped =
            decode_snapshot(br#"{"data":[{"id":"a","status":"DONE","title":"A"}]}"#).unwrap();
        assert_eq!(wrapped[0].id, TaskId::new("a"));

        let issues = decode_snapshot(br#"{"issues":[]}"#).unwrap();
        assert!(issues.is_empty());
    }

    #[test]
    fn test_snapshot_error_names_the_bad_field() {
        let err = decode_snapshot(br#"[{"id":"a","status":"BLOCKED","title":"A"}]"#).unwrap_err();
        assert!(
            matches!(&err, KanbanError::Serialization(m) if m.contains("BLOCKED")),
            "{}",
            err
        );

        let err =
            decode_snapshot(br#"{"issues":[{"id":"a","status":"BLOCKED","title":"A"}]}"#)
                .unwrap_err();
        assert!(err.to_string().contains("BLOCKED"), "{}", err);
    }
}
