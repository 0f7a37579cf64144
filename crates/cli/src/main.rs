mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use crimestat_core::AppConfig;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "crimestat")]
#[command(about = "US crime statistics API: CRUD and analytics over per-state yearly records", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server
    Serve {
        /// Port to listen on [env: CRIMESTAT_PORT, default 8000]
        #[arg(short, long)]
        port: Option<u16>,
        /// Host to bind [env: CRIMESTAT_HOST, default 127.0.0.1]
        #[arg(short = 'H', long)]
        host: Option<String>,
        /// Keep records in process memory instead of PostgreSQL
        #[arg(long)]
        memory: bool,
    },
    /// Import records from a JSON array file into PostgreSQL
    Import {
        file: PathBuf,
        /// Delete every existing record first
        #[arg(long)]
        clear: bool,
    },
    /// Validate a JSON array file with the full rule set, without a database
    Check { file: PathBuf },
    /// Create or upgrade the PostgreSQL schema
    Migrate,
}

pub(crate) fn require_database_url(config: &AppConfig) -> Result<&str> {
    config.database_url.as_deref().ok_or_else(|| {
        anyhow::anyhow!("DATABASE_URL must be set (or pass --memory to serve)")
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env();

    match cli.command {
        Commands::Serve { port, host, memory } => {
            commands::serve::run(config, host, port, memory).await
        },
        Commands::Import { file, clear } => commands::import::run(&config, &file, clear).await,
        Commands::Check { file } => commands::check::run(&config, &file).await,
        Commands::Migrate => commands::migrate::run(&config).await,
    }
}
