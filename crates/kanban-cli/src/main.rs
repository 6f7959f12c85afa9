mod cli;
mod context;
mod handlers;
mod output;
mod render;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use context::CliContext;
use tracing_subscriber::EnvFilter;

fn init_tracing() -> anyhow::Result<()> {
    if let Ok(log_path) = std::env::var("KANBAN_DEBUG_LOG") {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        tracing_subscriber::fmt()
            .with_writer(log_file)
            .with_max_level(tracing::Level::DEBUG)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            )
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let cli = Cli::parse();

    if let Commands::Completions { shell } = cli.command {
        let mut command = Cli::command();
        clap_complete::generate(shell, &mut command, "kanban-board", &mut std::io::stdout());
        return Ok(());
    }

    let mut ctx = match CliContext::load(&cli).await {
        Ok(ctx) => ctx,
        Err(e) => output::output_error(&format!("{:#}", e)),
    };
    tracing::debug!(
        "Activation distance {}px, column drag {}",
        ctx.config.effective_activation_distance(),
        ctx.config.effective_allow_column_drag()
    );

    let result = match cli.command {
        Commands::Show { plain } => handlers::board::handle_show(&ctx, plain),
        Commands::Search { query } => handlers::board::handle_search(&ctx, &query),
        Commands::Move(args) => handlers::task::handle_move(&mut ctx, args).await,
        Commands::Create(args) => handlers::task::handle_create(&mut ctx, args).await,
        Commands::Delete { id } => handlers::task::handle_delete(&mut ctx, id).await,
        Commands::Completions { .. } => Ok(()),
    };

    if let Err(e) = result {
        output::output_error(&format!("{:#}", e));
    }
    Ok(())
}
