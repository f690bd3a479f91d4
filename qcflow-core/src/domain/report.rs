//! Report index domain types
//!
//! The pipeline service names its artifacts for humans ("fastp",
//! "falco_raw_R1", "Summary JSON (sample_R1)") and the client infers what
//! kind of artifact it is looking at from those names.

use serde::{Deserialize, Deserializer};

use crate::types::OrderedEntries;

/// Name marker of structured QC summary artifacts
pub const SUMMARY_MARKER: &str = "Summary JSON";

/// How a report is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    /// JSON verdicts fetched and rendered client-side
    QcSummary,
    /// Opaque HTML artifact opened outside the client
    Html,
}

impl ReportKind {
    pub fn of(name: &str) -> Self {
        if name.contains(SUMMARY_MARKER) {
            ReportKind::QcSummary
        } else {
            ReportKind::Html
        }
    }
}

/// Family of tool that produced a report, used to pick a display icon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportCategory {
    Summary,
    Trimming,
    QualityControl,
    Other,
}

impl ReportCategory {
    pub fn of(name: &str) -> Self {
        if name.contains("Summary") {
            ReportCategory::Summary
        } else if name.contains("fastp") || name.contains("Trimmed") {
            ReportCategory::Trimming
        } else if name.contains("falco") || name.contains("fastqc") {
            ReportCategory::QualityControl
        } else {
            ReportCategory::Other
        }
    }
}

/// One named artifact of a finished run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    pub name: String,
    /// Server-relative artifact URL
    pub url: String,
}

impl ReportEntry {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    pub fn kind(&self) -> ReportKind {
        ReportKind::of(&self.name)
    }

    pub fn category(&self) -> ReportCategory {
        ReportCategory::of(&self.name)
    }

    /// Short label for report lists
    pub fn label(&self) -> String {
        strip_parens(&self.name.replace(SUMMARY_MARKER, "Summary"))
    }

    /// Heading for a rendered QC summary
    pub fn title(&self) -> String {
        strip_parens(&self.name.replace(SUMMARY_MARKER, ""))
    }
}

fn strip_parens(s: &str) -> String {
    s.replace(['(', ')'], "").trim().to_string()
}

/// Mapping from report name to artifact URL, in the order the server listed them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportIndex {
    entries: Vec<ReportEntry>,
}

impl ReportIndex {
    pub fn from_pairs<N, U>(pairs: impl IntoIterator<Item = (N, U)>) -> Self
    where
        N: Into<String>,
        U: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(name, url)| ReportEntry::new(name, url))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReportEntry> {
        self.entries.iter()
    }

    pub fn get(&self, name: &str) -> Option<&ReportEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// The report shown first: the QC summary when there is one, else the first entry
    pub fn auto_select(&self) -> Option<&ReportEntry> {
        self.entries
            .iter()
            .find(|entry| entry.kind() == ReportKind::QcSummary)
            .or_else(|| self.entries.first())
    }
}

impl<'de> Deserialize<'de> for ReportIndex {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let OrderedEntries(pairs) = OrderedEntries::<String>::deserialize(deserializer)?;
        Ok(Self::from_pairs(pairs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_select_prefers_summary() {
        let index = ReportIndex::from_pairs([
            ("fastp Report (HTML)", "/qc/J1/1/fastp.html"),
            ("Summary JSON (sample1)", "/qc/J1/1/qc_summary/sample1_report.json"),
        ]);
        assert_eq!(index.auto_select().unwrap().name, "Summary JSON (sample1)");

        let reversed = ReportIndex::from_pairs([
            ("Summary JSON (sample1)", "/qc/J1/1/qc_summary/sample1_report.json"),
            ("fastp Report (HTML)", "/qc/J1/1/fastp.html"),
        ]);
        assert_eq!(reversed.auto_select().unwrap().name, "Summary JSON (sample1)");
    }

    #[test]
    fn test_auto_select_falls_back_to_first() {
        let index: ReportIndex = serde_json::from_str(
            r#"{"falco_raw_R1": "/qc/J1/1/a.html", "fastp": "/qc/J1/1/b.html"}"#,
        )
        .unwrap();

        assert_eq!(index.auto_select().unwrap().name, "falco_raw_R1");
        assert!(ReportIndex::default().auto_select().is_none());
    }

    #[test]
    fn test_kind_and_category() {
        assert_eq!(ReportKind::of("Summary JSON (x)"), ReportKind::QcSummary);
        assert_eq!(ReportKind::of("fastp"), ReportKind::Html);

        assert_eq!(ReportCategory::of("Summary JSON (x)"), ReportCategory::Summary);
        assert_eq!(ReportCategory::of("fastp"), ReportCategory::Trimming);
        assert_eq!(ReportCategory::of("x_Trimmed"), ReportCategory::Trimming);
        assert_eq!(ReportCategory::of("falco_raw_R1"), ReportCategory::QualityControl);
        assert_eq!(ReportCategory::of("multiqc"), ReportCategory::Other);
    }

    #[test]
    fn test_labels() {
        let entry = ReportEntry::new("Summary JSON (ecoli_R1.trimmed)", "/x.json");
        assert_eq!(entry.label(), "Summary ecoli_R1.trimmed");
        assert_eq!(entry.title(), "ecoli_R1.trimmed");

        let html = ReportEntry::new("falco_trimmed_R2", "/y.html");
        assert_eq!(html.label(), "falco_trimmed_R2");
    }

    #[test]
    fn test_get_by_name() {
        let index = ReportIndex::from_pairs([("fastp", "/a.html")]);
        assert_eq!(index.get("fastp").unwrap().url, "/a.html");
        assert!(index.get("missing").is_none());
        assert_eq!(index.len(), 1);
    }
}
