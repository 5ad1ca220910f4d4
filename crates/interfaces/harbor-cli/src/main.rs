use std::time::Duration;

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use harbor_cli::settings::Settings;
use harbor_cli::{commands, Session};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Seed file with boat types and boats (defaults to a built-in sample)
    #[arg(long, global = true, env = "HARBOR_DATA")]
    data: Option<Utf8PathBuf>,
    /// Settings file (defaults to settings.json in the config directory)
    #[arg(long, global = true, env = "HARBOR_CONFIG")]
    config: Option<Utf8PathBuf>,
    /// Simulated backend latency in milliseconds
    #[arg(long, global = true)]
    latency_ms: Option<u64>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List boat types usable with --type
    Types,
    /// List boats, optionally of one type
    Search {
        #[arg(short = 't', long = "type")]
        boat_type: Option<String>,
    },
    /// Edit one boat and save it
    Edit {
        #[arg(long)]
        id: String,
        #[arg(long = "set", value_name = "FIELD=VALUE", required = true)]
        assignments: Vec<String>,
        #[arg(short = 't', long = "type")]
        boat_type: Option<String>,
    },
    /// Select a boat and show the published message
    Select { id: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut settings = Settings::load(cli.config.as_deref())?;
    if cli.data.is_some() {
        settings.data = cli.data;
    }
    if cli.latency_ms.is_some() {
        settings.latency_ms = cli.latency_ms;
    }

    let session = Session::new(
        settings.seed()?,
        settings.controller.clone(),
        settings.latency_ms.map(Duration::from_millis),
    );

    match cli.command {
        Commands::Types => {
            commands::cmd_types(&session).await?;
        }
        Commands::Search { boat_type } => {
            commands::cmd_search(&session, boat_type.as_deref()).await?;
        }
        Commands::Edit {
            id,
            assignments,
            boat_type,
        } => {
            commands::cmd_edit(&session, boat_type.as_deref(), &id, &assignments).await?;
        }
        Commands::Select { id } => {
            commands::cmd_select(&session, &id).await?;
        }
    }

    Ok(())
}
