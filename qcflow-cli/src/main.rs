//! QCFlow CLI
//!
//! Command-line front end for the sequencing QC pipeline service.

mod commands;
mod config;
mod render;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "qcflow")]
#[command(about = "Sequencing QC pipeline CLI", long_about = None)]
struct Cli {
    /// Pipeline service URL [env: QCFLOW_API_URL]
    #[arg(long)]
    api_url: Option<String>,

    /// Auth service URL, defaults to the pipeline service URL [env: QCFLOW_AUTH_URL]
    #[arg(long)]
    auth_url: Option<String>,

    /// Seconds between log polls while a run is in progress [env: QCFLOW_POLL_INTERVAL]
    #[arg(long)]
    poll_interval: Option<u64>,

    /// HTTP request timeout in seconds [env: QCFLOW_REQUEST_TIMEOUT]
    #[arg(long)]
    request_timeout: Option<u64>,

    /// Where the login session is persisted [env: QCFLOW_SESSION_PATH]
    #[arg(long)]
    session_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("qcflow_cli=info,qcflow_engine=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Flags take precedence over the environment
    let mut engine = qcflow_engine::Config::from_env()?;
    if let Some(api_url) = cli.api_url {
        engine = engine.with_api_url(api_url);
    }
    if let Some(auth_url) = cli.auth_url {
        engine.auth_url = auth_url;
    }
    if let Some(secs) = cli.poll_interval {
        engine.poll_interval = Duration::from_secs(secs);
    }
    if let Some(secs) = cli.request_timeout {
        engine.request_timeout = Duration::from_secs(secs);
    }
    if let Some(path) = cli.session_path {
        engine.session_path = path;
    }

    let config = Config::new(engine)?;

    handle_command(cli.command, &config).await
}
