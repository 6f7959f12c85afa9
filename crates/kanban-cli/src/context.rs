use anyhow::Context;
use kanban_core::AppConfig;
use kanban_sync::{BoardSession, HttpTaskService};
use std::sync::Arc;

use crate::cli::Cli;

pub struct CliContext {
    pub config: AppConfig,
    pub session: BoardSession,
}

impl CliContext {
    /// Resolve configuration (file, then flags and env) and open the board
    pub async fn load(cli: &Cli) -> anyhow::Result<Self> {
        let config = resolve_config(cli);
        let service = HttpTaskService::from_config(&config)
            .context("Set --project or KANBAN_PROJECT to choose a board")?;
        tracing::info!(
            "Opening project {} at {}",
            service.project_id(),
            config.effective_api_url()
        );

        // A one-shot run has no earlier board to fall back on
        let session = BoardSession::open(Arc::new(service), &config)
            .await
            .context("Failed to load the board")?;
        Ok(Self { config, session })
    }
}

pub fn resolve_config(cli: &Cli) -> AppConfig {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    };
    if let Some(url) = &cli.api_url {
        config.api_url = Some(url.clone());
    }
    if let Some(project) = &cli.project {
        config.project_id = Some(project.clone());
    }
    if let Some(token) = &cli.token {
        config.auth_token = Some(token.clone());
    }
    config
}
