mod cmd;
mod config;
mod output;

use clap::{Parser, Subcommand};
use cmd::{
    note::NoteSubcommand, project::ProjectSubcommand, secret::SecretSubcommand,
    task::TaskSubcommand,
};
use config::Config;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "taskbot",
    about = "Telegram task/notes/project bot backed by a Google Sheets spreadsheet",
    version,
    propagate_version = true
)]
struct Cli {
    /// Config file (default: ./taskbot.yaml if present)
    #[arg(long, global = true, env = "TASKBOT_CONFIG")]
    config: Option<PathBuf>,

    /// Telegram bot token
    #[arg(long, global = true, env = "TASKBOT_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Spreadsheet document id
    #[arg(long, global = true, env = "TASKBOT_SPREADSHEET_ID")]
    spreadsheet_id: Option<String>,

    /// Google service-account key file (JSON)
    #[arg(long, global = true, env = "TASKBOT_CREDENTIALS")]
    credentials: Option<PathBuf>,

    /// Pre-minted Sheets access token, bypassing the service account
    #[arg(
        long,
        global = true,
        env = "TASKBOT_ACCESS_TOKEN",
        hide_env_values = true
    )]
    access_token: Option<String>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the bot (long-poll loop, Ctrl-C to stop)
    Run {
        /// getUpdates long-poll timeout in seconds
        #[arg(long, default_value = "30")]
        poll_timeout: u64,

        /// Keep records in memory instead of the spreadsheet (for trying
        /// the bot out; nothing survives exit)
        #[arg(long)]
        memory: bool,
    },

    /// Create missing worksheets with their header rows
    Init,

    /// List and delete projects
    Project {
        #[command(subcommand)]
        subcommand: ProjectSubcommand,
    },

    /// List tasks and update their status
    Task {
        #[command(subcommand)]
        subcommand: TaskSubcommand,
    },

    /// List notes
    Note {
        #[command(subcommand)]
        subcommand: NoteSubcommand,
    },

    /// List secret metadata
    Secret {
        #[command(subcommand)]
        subcommand: SecretSubcommand,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Run { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .init();

    let config = Config::resolve(
        cli.config.as_deref(),
        cli.token,
        cli.spreadsheet_id,
        cli.credentials,
        cli.access_token,
    );
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e:#}");
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Run {
            poll_timeout,
            memory,
        } => cmd::run::run(&config, poll_timeout, memory).await,
        Commands::Init => cmd::init::run(&config).await,
        Commands::Project { subcommand } => match config.sheets_store() {
            Ok(store) => cmd::project::run(&store, subcommand, cli.json).await,
            Err(e) => Err(e),
        },
        Commands::Task { subcommand } => match config.sheets_store() {
            Ok(store) => cmd::task::run(&store, subcommand, cli.json).await,
            Err(e) => Err(e),
        },
        Commands::Note { subcommand } => match config.sheets_store() {
            Ok(store) => cmd::note::run(&store, subcommand, cli.json).await,
            Err(e) => Err(e),
        },
        Commands::Secret { subcommand } => match config.sheets_store() {
            Ok(store) => cmd::secret::run(&store, subcommand, cli.json).await,
            Err(e) => Err(e),
        },
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
