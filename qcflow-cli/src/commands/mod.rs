//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod auth;
mod job;
mod report;
mod run;

pub use auth::AuthCommands;
pub use report::ReportCommands;
pub use run::RunArgs;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Check that the pipeline service is reachable
    Health,
    /// Account and session management
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
    /// Upload a sample and follow its analysis until reports are ready
    Run(RunArgs),
    /// Fetch the current log output of a run
    Logs {
        /// Job ID
        #[arg(long)]
        job: String,

        /// Run iteration within the job
        #[arg(long)]
        iteration: u32,

        /// Print the raw log chunk as JSON
        #[arg(long)]
        json: bool,
    },
    /// Browse the reports of a finished run
    Report {
        #[command(subcommand)]
        command: ReportCommands,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Health => job::check_health(config).await,
        Commands::Auth { command } => auth::handle_auth_command(command, config).await,
        Commands::Run(args) => run::handle_run(args, config).await,
        Commands::Logs {
            job,
            iteration,
            json,
        } => job::show_logs(config, &job, iteration, json).await,
        Commands::Report { command } => report::handle_report_command(command, config).await,
    }
}
