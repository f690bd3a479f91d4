//! Job command handlers
//!
//! Service health and one-shot access to a run's logs.

use anyhow::{Context, Result};
use colored::*;

use crate::config::Config;

/// Report whether the pipeline service answers
pub async fn check_health(config: &Config) -> Result<()> {
    let client = config.pipeline_client(None);

    match client.check_health().await {
        Ok(health) => {
            println!(
                "{} {} ({})",
                "✓".green(),
                client.base_url().bold(),
                health.status.green()
            );
            Ok(())
        }
        Err(e) => {
            println!("{} {}", "✗".red(), client.base_url().bold());
            Err(e).context("Pipeline service is not reachable")
        }
    }
}

/// Print the log output accumulated so far for a run
pub async fn show_logs(config: &Config, job_id: &str, iteration: u32, json: bool) -> Result<()> {
    let token = config.stored_token();
    let client = config.pipeline_client(token.as_deref());

    let chunk = client
        .get_logs(job_id, iteration)
        .await
        .with_context(|| format!("Failed to fetch logs for job {} iteration {}", job_id, iteration))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&chunk)?);
        return Ok(());
    }

    if chunk.has_text() {
        print!("{}", chunk.logs);
        if !chunk.logs.ends_with('\n') {
            println!();
        }
    } else {
        println!("{}", "No log output yet.".yellow());
    }

    let state = if chunk.done {
        "finished".green()
    } else {
        "still running".yellow()
    };
    println!("{} Job {} iteration {} is {}", "▸".cyan(), job_id.bold(), iteration, state);

    Ok(())
}
