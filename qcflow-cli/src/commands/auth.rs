//! Auth command handlers
//!
//! Register, log in and out, and inspect the persisted session.

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use qcflow_engine::SessionStore;

use crate::config::Config;

/// Auth subcommands
#[derive(Subcommand)]
pub enum AuthCommands {
    /// Create an account and log in with it
    Register {
        #[arg(long)]
        email: String,

        #[arg(long)]
        username: String,

        #[arg(long, env = "QCFLOW_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Log in and persist the session
    Login {
        #[arg(long)]
        email: String,

        #[arg(long, env = "QCFLOW_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the persisted session
    Logout,
    /// Verify the persisted session against the auth service
    Status,
}

pub async fn handle_auth_command(command: AuthCommands, config: &Config) -> Result<()> {
    let mut ctx = config.auth_context();

    match command {
        AuthCommands::Register {
            email,
            username,
            password,
        } => {
            let session = ctx.register(&email, &username, &password).await?;
            println!(
                "{} Registered and logged in as {} ({})",
                "✓".green(),
                session.user.username.bold(),
                session.user.email
            );
        }
        AuthCommands::Login { email, password } => {
            let session = ctx.login(&email, &password).await?;
            println!(
                "{} Logged in as {} ({})",
                "✓".green(),
                session.user.username.bold(),
                session.user.email
            );
        }
        AuthCommands::Logout => {
            ctx.logout()?;
            println!("{} Logged out", "✓".green());
        }
        AuthCommands::Status => {
            ctx.init().await?;
            match ctx.user() {
                Some(user) => {
                    println!(
                        "{} Logged in as {} ({})",
                        "●".green(),
                        user.username.bold(),
                        user.email
                    );
                    if let Some(saved_at) = ctx.store().load()?.and_then(|s| s.saved_at) {
                        println!(
                            "  Since:        {}",
                            saved_at.format("%Y-%m-%d %H:%M:%S").to_string().dimmed()
                        );
                    }
                }
                None => println!("{} Not logged in", "○".yellow()),
            }
            println!("  Session file: {}", ctx.store().path().display().to_string().dimmed());
        }
    }

    Ok(())
}
