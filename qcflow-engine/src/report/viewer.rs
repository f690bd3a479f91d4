//! Report viewer
//!
//! Given a [`ReportIndex`], keeps track of the selected report and what it
//! resolves to: a parsed QC summary (fetched on every selection, never
//! cached), an inline error when that fetch fails, or an external link for
//! HTML artifacts.

use qcflow_client::ClientError;
use qcflow_core::domain::report::{ReportEntry, ReportIndex, ReportKind};
use qcflow_core::domain::summary::{QcSummary, SummaryView};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

use crate::repository::PipelineApi;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("No report named `{0}`")]
pub struct UnknownReport(pub String);

/// What the selected report resolves to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportContent {
    /// Nothing selected yet, or the index is empty
    Empty,
    Summary {
        title: String,
        summary: QcSummary,
    },
    SummaryError {
        title: String,
        message: String,
    },
    /// HTML artifact to open in a separate browsing context
    External {
        url: String,
    },
}

pub struct ReportViewer<A: PipelineApi> {
    api: Arc<A>,
    index: ReportIndex,
    selected: Option<String>,
    content: ReportContent,
    show_all: bool,
}

impl<A: PipelineApi> ReportViewer<A> {
    /// Creates a viewer with nothing selected
    pub fn new(api: Arc<A>, index: ReportIndex) -> Self {
        Self {
            api,
            index,
            selected: None,
            content: ReportContent::Empty,
            show_all: false,
        }
    }

    /// Creates a viewer and loads the auto-selected report
    pub async fn open(api: Arc<A>, index: ReportIndex) -> Self {
        let mut viewer = Self::new(api, index);
        if let Some(name) = viewer.index.auto_select().map(|entry| entry.name.clone()) {
            viewer.load(&name).await;
        }
        viewer
    }

    pub fn index(&self) -> &ReportIndex {
        &self.index
    }

    pub fn selected(&self) -> Option<&ReportEntry> {
        self.selected
            .as_deref()
            .and_then(|name| self.index.get(name))
    }

    pub fn content(&self) -> &ReportContent {
        &self.content
    }

    pub fn show_all(&self) -> bool {
        self.show_all
    }

    pub fn set_show_all(&mut self, show_all: bool) {
        self.show_all = show_all;
    }

    /// Flips between the default view and the full metric list
    pub fn toggle_show_all(&mut self) -> bool {
        self.show_all = !self.show_all;
        self.show_all
    }

    /// Rows of the loaded summary for the current `show_all` setting
    pub fn summary_view(&self) -> Option<SummaryView<'_>> {
        match &self.content {
            ReportContent::Summary { summary, .. } => Some(summary.view(self.show_all)),
            _ => None,
        }
    }

    /// Selects a report by name and resolves its content
    pub async fn select(&mut self, name: &str) -> Result<&ReportContent, UnknownReport> {
        if self.index.get(name).is_none() {
            return Err(UnknownReport(name.to_string()));
        }
        self.load(name).await;
        Ok(&self.content)
    }

    async fn load(&mut self, name: &str) {
        let Some(entry) = self.index.get(name).cloned() else {
            return;
        };

        self.selected = Some(entry.name.clone());
        self.show_all = false;

        self.content = match entry.kind() {
            ReportKind::QcSummary => {
                debug!("Loading QC summary {}", entry.name);
                match self.api.fetch_qc_summary(&entry.url).await {
                    Ok(summary) => ReportContent::Summary {
                        title: entry.title(),
                        summary,
                    },
                    Err(e) => {
                        warn!("Failed to load QC summary {}: {:#}", entry.name, e);
                        ReportContent::SummaryError {
                            title: entry.title(),
                            message: summary_error_message(&e),
                        }
                    }
                }
            }
            ReportKind::Html => ReportContent::External {
                url: self.api.artifact_url(&entry.url),
            },
        };
    }
}

fn summary_error_message(err: &ClientError) -> String {
    match err {
        ClientError::ApiError { status, .. } => {
            format!("Failed to fetch QC data (status {})", status)
        }
        ClientError::ParseError(message) => format!("Invalid QC data: {}", message),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::mock::MockPipeline;

    const SUMMARY_URL: &str = "/qc/J1/3/qc_summary/sample1_report.json";

    fn index() -> ReportIndex {
        ReportIndex::from_pairs([
            ("fastp Report (HTML)", "/qc/J1/3/fastp.html"),
            ("Summary JSON (sample1)", SUMMARY_URL),
        ])
    }

    fn api() -> Arc<MockPipeline> {
        Arc::new(MockPipeline::new().with_summary(
            SUMMARY_URL,
            r#"{
                "gc_content": {"status": "PASS", "reason": "ok"},
                "adapter_content": {"status": "FAIL", "reason": "high"},
                "duplication": {"status": "WARN", "reason": "elevated"}
            }"#,
        ))
    }

    #[tokio::test]
    async fn test_open_loads_summary() {
        let viewer = ReportViewer::open(api(), index()).await;

        assert_eq!(viewer.selected().unwrap().name, "Summary JSON (sample1)");
        let ReportContent::Summary { title, .. } = viewer.content() else {
            panic!("expected a summary, got {:?}", viewer.content());
        };
        assert_eq!(title, "sample1");

        let rows: Vec<&str> = viewer
            .summary_view()
            .unwrap()
            .rows
            .iter()
            .map(|row| row.key)
            .collect();
        assert_eq!(rows, vec!["adapter_content", "duplication"]);
    }

    #[tokio::test]
    async fn test_toggle_show_all() {
        let mut viewer = ReportViewer::open(api(), index()).await;

        assert!(viewer.toggle_show_all());
        let rows: Vec<&str> = viewer
            .summary_view()
            .unwrap()
            .rows
            .iter()
            .map(|row| row.key)
            .collect();
        assert_eq!(rows, vec!["adapter_content", "duplication", "gc_content"]);
    }

    #[tokio::test]
    async fn test_html_report_links_out() {
        let api = api();
        let mut viewer = ReportViewer::new(Arc::clone(&api), index());
        assert_eq!(viewer.content(), &ReportContent::Empty);

        let content = viewer.select("fastp Report (HTML)").await.unwrap();
        assert_eq!(
            content,
            &ReportContent::External {
                url: "http://pipeline.test/qc/J1/3/fastp.html".to_string()
            }
        );
        assert!(viewer.summary_view().is_none());
        assert_eq!(api.count("fetch_qc_summary"), 0);
    }

    #[tokio::test]
    async fn test_summary_refetched_on_each_selection() {
        let api = api();
        let mut viewer = ReportViewer::open(Arc::clone(&api), index()).await;
        viewer.select("fastp Report (HTML)").await.unwrap();
        viewer.select("Summary JSON (sample1)").await.unwrap();

        assert_eq!(api.count("fetch_qc_summary"), 2);
    }

    #[tokio::test]
    async fn test_summary_fetch_failure_is_inline() {
        let index = ReportIndex::from_pairs([("Summary JSON (missing)", "/qc/J1/3/nope.json")]);
        let viewer = ReportViewer::open(api(), index).await;

        assert_eq!(
            viewer.content(),
            &ReportContent::SummaryError {
                title: "missing".to_string(),
                message: "Failed to fetch QC data (status 404)".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_malformed_summary_is_inline() {
        let api = Arc::new(MockPipeline::new().with_summary(SUMMARY_URL, "<html>"));
        let viewer = ReportViewer::open(api, index()).await;

        assert!(matches!(
            viewer.content(),
            ReportContent::SummaryError { .. }
        ));
    }

    #[tokio::test]
    async fn test_unknown_report() {
        let mut viewer = ReportViewer::new(api(), index());
        let err = viewer.select("multiqc").await.unwrap_err();
        assert_eq!(err, UnknownReport("multiqc".to_string()));
    }

    #[tokio::test]
    async fn test_empty_index() {
        let viewer = ReportViewer::open(api(), ReportIndex::default()).await;
        assert!(viewer.selected().is_none());
        assert_eq!(viewer.content(), &ReportContent::Empty);
    }
}
