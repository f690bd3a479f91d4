//! Terminal rendering shared by the command handlers

use colored::*;
use qcflow_core::domain::job::JobStatus;
use qcflow_core::domain::report::{ReportCategory, ReportEntry, ReportIndex};
use qcflow_core::domain::summary::{QcStatus, QcSummary};
use qcflow_engine::ReportContent;

/// Colorize job status for display
pub fn colorize_status(status: JobStatus) -> ColoredString {
    let label = status.display_label();
    match status {
        JobStatus::Idle => label.normal(),
        JobStatus::Uploading => label.cyan(),
        JobStatus::Running => label.yellow(),
        JobStatus::Completed => label.green(),
        JobStatus::Error => label.red(),
    }
}

fn category_icon(category: ReportCategory) -> &'static str {
    match category {
        ReportCategory::Summary => "◆",
        ReportCategory::Trimming => "✂",
        ReportCategory::QualityControl => "▤",
        ReportCategory::Other => "•",
    }
}

fn qc_icon(status: &QcStatus) -> ColoredString {
    match status {
        QcStatus::Pass => "✓".green(),
        QcStatus::Warn => "⚠".yellow(),
        QcStatus::Fail => "✗".red(),
        _ => "ℹ".blue(),
    }
}

fn colorize_qc(status: &QcStatus) -> ColoredString {
    let label = format!("[{}]", status);
    match status {
        QcStatus::Pass => label.green(),
        QcStatus::Warn => label.yellow(),
        QcStatus::Fail => label.red(),
        _ => label.blue(),
    }
}

/// Print the report index, marking the selected entry
pub fn print_report_index(index: &ReportIndex, selected: Option<&ReportEntry>) {
    if index.is_empty() {
        println!("{}", "No reports available.".yellow());
        return;
    }

    println!("{}", format!("Reports ({}):", index.len()).bold());
    for entry in index.iter() {
        let is_selected = selected.is_some_and(|s| s.name == entry.name);
        let marker = if is_selected { "▸".cyan() } else { " ".normal() };
        let label = if is_selected {
            entry.label().bold()
        } else {
            entry.label().normal()
        };
        println!(
            "  {} {} {}  {}",
            marker,
            category_icon(entry.category()),
            label,
            entry.name.dimmed()
        );
    }
    println!();
}

/// Print whatever the selected report resolved to
pub fn print_report_content(content: &ReportContent, show_all: bool) {
    match content {
        ReportContent::Empty => {}
        ReportContent::Summary { title, summary } => print_summary(title, summary, show_all),
        ReportContent::SummaryError { title, message } => {
            println!("{}", title.bold());
            println!("  {} {}", "Error loading summary:".red(), message);
        }
        ReportContent::External { url } => {
            println!("{}", "HTML report".bold());
            println!("  Open in a browser: {}", url.underline());
        }
    }
}

fn print_summary(title: &str, summary: &QcSummary, show_all: bool) {
    let view = summary.view(show_all);

    println!("{}", title.bold());

    let mut badges = Vec::new();
    if view.counts.fail > 0 {
        badges.push(format!("{} Fails", view.counts.fail).red().bold());
    }
    if view.counts.warn > 0 {
        badges.push(format!("{} Warnings", view.counts.warn).yellow().bold());
    }
    badges.push(format!("{} Passed", view.counts.pass).green());
    let badges: Vec<String> = badges.iter().map(ToString::to_string).collect();
    println!("  {}", badges.join("  "));
    println!();

    if view.all_passed() {
        println!("  {} {}", "✓".green(), "All QC checks passed!".green().bold());
        println!("  {}", "Use --show-all to list every metric.".dimmed());
    }

    for row in &view.rows {
        println!(
            "  {} {} {}",
            qc_icon(&row.result.status),
            row.display_name(),
            colorize_qc(&row.result.status)
        );
        if !row.result.reason.is_empty() {
            println!("      {}", row.result.reason.dimmed());
        }
    }
}
