use clap::{Args, Parser, Subcommand};
use kanban_domain::ColumnId;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "kanban-board")]
#[command(about = "Drive a remote kanban board from the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Base URL of the task service (overrides the config file)
    #[arg(long, global = true, env = "KANBAN_API_URL")]
    pub api_url: Option<String>,

    /// Project whose board to open (overrides the config file)
    #[arg(long, global = true, env = "KANBAN_PROJECT")]
    pub project: Option<String>,

    /// Bearer token for the task service
    #[arg(long, global = true, env = "KANBAN_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Config file to read instead of the default location
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the board, column by column
    Show {
        /// Human-readable output instead of JSON
        #[arg(long)]
        plain: bool,
    },
    /// List tasks whose title contains QUERY
    Search { query: String },
    /// Drag a task onto another task or onto a column
    Move(MoveArgs),
    /// Create a task
    Create(CreateArgs),
    /// Delete a task
    Delete { id: String },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Args)]
pub struct MoveArgs {
    /// Task to drag
    pub id: String,
    /// Drop onto this task, taking its place
    #[arg(long, conflicts_with = "to_column", required_unless_present = "to_column")]
    pub over_task: Option<String>,
    /// Drop onto the body of this column (TODO, IN_PROGRESS, DONE)
    #[arg(long)]
    pub to_column: Option<ColumnId>,
}

#[derive(Args)]
pub struct CreateArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long, default_value = "TODO")]
    pub status: ColumnId,
    #[arg(long)]
    pub description: Option<String>,
}
