use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "ticketray")]
#[command(about = "IT support-ticket analytics with narrative insight generation")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Full analysis: local aggregation plus narrative insights
    Analyze {
        /// CSV export of the ticket batch
        file: PathBuf,
        /// Skip the narrative service and synthesize insights locally
        #[arg(long)]
        offline: bool,
        /// Print the raw report as JSON instead of formatted sections
        #[arg(long)]
        json: bool,
    },
    /// Local-only summary: metrics, distribution and recent spike alerts
    Summary {
        /// CSV export of the ticket batch
        file: PathBuf,
    },
    /// List tickets in descending triage priority order
    Prioritize {
        /// CSV export of the ticket batch
        file: PathBuf,
        /// Show only the first N tickets
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
    /// Verify the configured API key against the narrative service
    CheckKey,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Analyze { file, offline, json } => commands::analyze(&file, offline, json).await,
        Commands::Summary { file } => commands::summary(&file),
        Commands::Prioritize { file, limit } => commands::prioritize(&file, limit),
        Commands::CheckKey => commands::check_key().await,
    }
}
