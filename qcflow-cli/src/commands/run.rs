//! Run command handler
//!
//! Drives a full analysis: validate the form, upload inputs, launch the run,
//! stream its log output and finally render the reports it produced.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Result, anyhow};
use clap::Args;
use colored::*;
use qcflow_core::domain::job::{RunRequest, Stage};
use qcflow_engine::{PipelineView, RunForm, ViewState};
use tokio::sync::watch;
use tracing::warn;

use super::report::show_report;
use crate::config::Config;
use crate::render::colorize_status;

#[derive(Args)]
pub struct RunArgs {
    /// Sample name the reads are uploaded under
    #[arg(short, long, default_value = "")]
    sample: String,

    /// Forward reads (FASTQ)
    #[arg(long)]
    r1: Option<PathBuf>,

    /// Reverse reads (FASTQ)
    #[arg(long)]
    r2: Option<PathBuf>,

    /// Reference genome (.fa, .fna or .fasta); required for the full stage
    #[arg(long)]
    reference: Option<PathBuf>,

    /// Pipeline stage: full, qc_only or trim_qc
    #[arg(long, default_value_t = Stage::Full)]
    stage: Stage,

    /// Minimum base quality used when trimming
    #[arg(long, default_value_t = RunRequest::DEFAULT_QUALITY_THRESHOLD)]
    qual: u32,

    /// Minimum read length kept after trimming
    #[arg(long = "min-len", default_value_t = RunRequest::DEFAULT_MIN_LENGTH)]
    min_len: u32,

    /// Include passing metrics in the QC summary
    #[arg(long)]
    show_all: bool,

    /// Do not stream log output while the run is in progress
    #[arg(short, long)]
    quiet: bool,
}

impl RunArgs {
    fn to_form(&self) -> RunForm {
        let mut form = RunForm::new(self.sample.clone())
            .stage(self.stage)
            .thresholds(self.qual, self.min_len);
        form.r1 = self.r1.clone();
        form.r2 = self.r2.clone();
        form.reference = self.reference.clone();
        form
    }
}

pub async fn handle_run(args: RunArgs, config: &Config) -> Result<()> {
    let mut auth = config.auth_context();
    if let Err(e) = auth.init().await {
        warn!("Continuing without a session: {}", e);
    }
    if !auth.is_authenticated() {
        println!("{}", "Not logged in; submitting anonymously.".yellow());
    }

    let api = Arc::new(config.pipeline_client(auth.token()));
    let mut view = PipelineView::new(Arc::clone(&api), config.engine.poll_interval);
    let mut rx = view.subscribe();

    let form = args.to_form();
    println!(
        "{} Starting {} for sample {}",
        "▸".cyan(),
        form.stage.description().bold(),
        form.sample_name.bold()
    );

    let iteration = match view.start_run(&form).await {
        Ok(iteration) => iteration,
        Err(e) => {
            println!("{} {}", "✗".red(), e.user_message().red());
            return Err(anyhow!(e));
        }
    };

    let state = view.state();
    println!(
        "{} Job {} iteration {} is {}",
        "▸".cyan(),
        state.job_id.as_deref().unwrap_or("-").bold(),
        iteration,
        colorize_status(state.status)
    );
    println!();

    let Some(state) = follow(view, &mut rx, args.quiet).await? else {
        return Ok(());
    };

    println!();
    println!("{} {}", "Status:".bold(), colorize_status(state.status));

    match state.reports {
        Some(index) => show_report(api, index, None, args.show_all).await,
        None => {
            println!("{}", "No reports available.".yellow());
            Ok(())
        }
    }
}

/// Streams new log text until the run is finished and its reports settled
///
/// Consumes the view. Returns `None` when the user stops following with
/// Ctrl-C; the run keeps going on the server.
async fn follow<A>(
    view: PipelineView<A>,
    rx: &mut watch::Receiver<ViewState>,
    quiet: bool,
) -> Result<Option<ViewState>>
where
    A: qcflow_engine::PipelineApi + 'static,
{
    let mut printed = 0;

    loop {
        let state = rx.borrow_and_update().clone();

        if !quiet {
            let fresh = state.logs.since(printed);
            if !fresh.is_empty() {
                print!("{}", fresh);
                std::io::stdout().flush()?;
            }
            printed = state.logs.len();
        }

        if is_settled(&state) {
            return Ok(Some(state));
        }

        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    return Err(anyhow!("Run state closed before the run finished"));
                }
            }
            _ = tokio::signal::ctrl_c() => {
                view.unmount();
                println!();
                println!(
                    "{} Stopped following; check back with `qcflow logs --job {} --iteration {}`",
                    "▸".cyan(),
                    state.job_id.as_deref().unwrap_or("-"),
                    state.iteration
                );
                return Ok(None);
            }
        }
    }
}

fn is_settled(state: &ViewState) -> bool {
    state.status.is_finished() && !state.reports_pending
}
