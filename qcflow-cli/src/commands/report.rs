//! Report command handlers
//!
//! Lists the report index of a finished run and renders a single report.

use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use clap::Subcommand;
use qcflow_client::PipelineClient;
use qcflow_core::domain::report::{ReportCategory, ReportIndex, ReportKind};
use qcflow_engine::ReportViewer;
use serde::Serialize;

use crate::config::Config;
use crate::render::{print_report_content, print_report_index};

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// List the reports produced by a run
    List {
        #[command(flatten)]
        target: ReportTarget,

        /// Print the index as JSON
        #[arg(long)]
        json: bool,
    },
    /// Render one report; defaults to the QC summary when there is one
    Show {
        #[command(flatten)]
        target: ReportTarget,

        /// Report name as listed by `report list`
        #[arg(long)]
        name: Option<String>,

        /// Include passing metrics in QC summaries
        #[arg(long)]
        show_all: bool,
    },
}

#[derive(clap::Args)]
pub struct ReportTarget {
    #[arg(long)]
    job: String,

    #[arg(long)]
    iteration: u32,

    #[arg(long)]
    sample: String,
}

#[derive(Serialize)]
struct ReportRow<'a> {
    name: &'a str,
    url: &'a str,
    label: String,
    summary: bool,
    category: &'static str,
}

pub async fn handle_report_command(command: ReportCommands, config: &Config) -> Result<()> {
    let token = config.stored_token();
    let client = config.pipeline_client(token.as_deref());

    match command {
        ReportCommands::List { target, json } => {
            let index = fetch_index(&client, &target).await?;
            if json {
                print_index_json(&index)
            } else {
                print_report_index(&index, None);
                Ok(())
            }
        }
        ReportCommands::Show {
            target,
            name,
            show_all,
        } => {
            let index = fetch_index(&client, &target).await?;
            show_report(Arc::new(client), index, name.as_deref(), show_all).await
        }
    }
}

async fn fetch_index(client: &PipelineClient, target: &ReportTarget) -> Result<ReportIndex> {
    match client
        .get_reports(&target.job, target.iteration, &target.sample)
        .await
    {
        Ok(index) => Ok(index),
        Err(e) if e.is_not_found() => Err(anyhow!(
            "No reports for sample {} in job {} iteration {}: {}",
            target.sample,
            target.job,
            target.iteration,
            e.detail().unwrap_or_else(|| "not found".to_string())
        )),
        Err(e) => Err(e).with_context(|| {
            format!(
                "Failed to fetch reports for job {} iteration {}",
                target.job, target.iteration
            )
        }),
    }
}

/// Open a viewer over `index` and render the requested or auto-selected report
pub async fn show_report(
    api: Arc<PipelineClient>,
    index: ReportIndex,
    name: Option<&str>,
    show_all: bool,
) -> Result<()> {
    let mut viewer = match name {
        Some(name) => {
            let mut viewer = ReportViewer::new(api, index);
            viewer.select(name).await?;
            viewer
        }
        None => ReportViewer::open(api, index).await,
    };
    viewer.set_show_all(show_all);

    print_report_index(viewer.index(), viewer.selected());
    print_report_content(viewer.content(), viewer.show_all());

    Ok(())
}

fn print_index_json(index: &ReportIndex) -> Result<()> {
    let rows: Vec<ReportRow<'_>> = index
        .iter()
        .map(|entry| ReportRow {
            name: &entry.name,
            url: &entry.url,
            label: entry.label(),
            summary: entry.kind() == ReportKind::QcSummary,
            category: match entry.category() {
                ReportCategory::Summary => "summary",
                ReportCategory::Trimming => "trimming",
                ReportCategory::QualityControl => "quality_control",
                ReportCategory::Other => "other",
            },
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}
