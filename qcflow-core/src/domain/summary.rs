//! QC summary domain types
//!
//! A QC summary is a JSON object mapping metric keys to a verdict:
//!
//! ```json
//! { "per_base_sequence_quality": { "status": "PASS", "reason": "Median >= 25" } }
//! ```
//!
//! The view model here decides what a summary screen shows: counts, which
//! rows are listed and in which order, and whether the "all checks passed"
//! state replaces the list.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::types::OrderedEntries;

/// Verdict of one metric
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QcStatus {
    Pass,
    Warn,
    Fail,
    /// Also used when a metric carries no status at all
    #[default]
    Unknown,
    /// Any status value the client does not recognise, kept verbatim
    Other(String),
}

impl QcStatus {
    pub fn as_str(&self) -> &str {
        match self {
            QcStatus::Pass => "PASS",
            QcStatus::Warn => "WARN",
            QcStatus::Fail => "FAIL",
            QcStatus::Unknown => "UNKNOWN",
            QcStatus::Other(value) => value,
        }
    }

    /// Display priority: failures first, then warnings, passes, everything else
    pub fn rank(&self) -> u8 {
        match self {
            QcStatus::Fail => 0,
            QcStatus::Warn => 1,
            QcStatus::Pass => 2,
            QcStatus::Unknown | QcStatus::Other(_) => 3,
        }
    }
}

impl From<String> for QcStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "PASS" => QcStatus::Pass,
            "WARN" => QcStatus::Warn,
            "FAIL" => QcStatus::Fail,
            "UNKNOWN" => QcStatus::Unknown,
            _ => QcStatus::Other(value),
        }
    }
}

impl From<QcStatus> for String {
    fn from(status: QcStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for QcStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QcResult {
    #[serde(default)]
    pub status: QcStatus,
    #[serde(default)]
    pub reason: String,
}

/// Parsed content of one structured report artifact, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QcSummary {
    metrics: Vec<(String, QcResult)>,
}

impl QcSummary {
    pub fn from_metrics<K: Into<String>>(metrics: impl IntoIterator<Item = (K, QcResult)>) -> Self {
        Self {
            metrics: metrics
                .into_iter()
                .map(|(key, result)| (key.into(), result))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&QcResult> {
        self.metrics
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, result)| result)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &QcResult)> {
        self.metrics.iter().map(|(key, result)| (key.as_str(), result))
    }

    /// Count verdicts in a single pass
    pub fn counts(&self) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for (_, result) in &self.metrics {
            match result.status {
                QcStatus::Pass => counts.pass += 1,
                QcStatus::Warn => counts.warn += 1,
                QcStatus::Fail => counts.fail += 1,
                QcStatus::Unknown | QcStatus::Other(_) => {}
            }
        }
        counts
    }

    /// Build the rows a summary screen displays
    ///
    /// Passing metrics are hidden unless `show_all` is set.
    pub fn view(&self, show_all: bool) -> SummaryView<'_> {
        let mut rows: Vec<MetricRow<'_>> = self
            .metrics
            .iter()
            .filter(|(_, result)| show_all || result.status != QcStatus::Pass)
            .map(|(key, result)| MetricRow { key, result })
            .collect();

        // sort_by_key is stable, ties keep document order
        rows.sort_by_key(|row| row.result.status.rank());

        SummaryView {
            counts: self.counts(),
            show_all,
            rows,
        }
    }
}

impl<'de> Deserialize<'de> for QcSummary {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let OrderedEntries(metrics) = OrderedEntries::<QcResult>::deserialize(deserializer)?;
        Ok(Self { metrics })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub pass: usize,
    pub warn: usize,
    pub fail: usize,
}

/// One displayed metric; `key` is the untouched lookup key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricRow<'a> {
    pub key: &'a str,
    pub result: &'a QcResult,
}

impl MetricRow<'_> {
    pub fn display_name(&self) -> String {
        format_metric_name(self.key)
    }
}

/// What a summary screen renders for one `show_all` setting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryView<'a> {
    pub counts: StatusCounts,
    pub show_all: bool,
    pub rows: Vec<MetricRow<'a>>,
}

impl SummaryView<'_> {
    /// The default view has nothing failing or warning to report
    pub fn all_passed(&self) -> bool {
        !self.show_all && self.counts.fail == 0 && self.counts.warn == 0
    }
}

/// `per_base_sequence_quality` -> `Per Base Sequence Quality`
pub fn format_metric_name(key: &str) -> String {
    key.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIXED: &str = r#"{
        "gc_content": {"status": "PASS", "reason": "ok"},
        "adapter_content": {"status": "FAIL", "reason": "high"},
        "duplication": {"status": "WARN", "reason": "elevated"}
    }"#;

    fn keys<'a>(view: &SummaryView<'a>) -> Vec<&'a str> {
        view.rows.iter().map(|row| row.key).collect()
    }

    #[test]
    fn test_default_view_hides_passing() {
        let summary: QcSummary = serde_json::from_str(MIXED).unwrap();

        let view = summary.view(false);
        assert_eq!(keys(&view), vec!["adapter_content", "duplication"]);
        assert!(!view.all_passed());
    }

    #[test]
    fn test_show_all_appends_passing() {
        let summary: QcSummary = serde_json::from_str(MIXED).unwrap();

        let view = summary.view(true);
        assert_eq!(
            keys(&view),
            vec!["adapter_content", "duplication", "gc_content"]
        );
    }

    #[test]
    fn test_counts() {
        let summary: QcSummary = serde_json::from_str(MIXED).unwrap();
        assert_eq!(
            summary.counts(),
            StatusCounts {
                pass: 1,
                warn: 1,
                fail: 1
            }
        );
    }

    #[test]
    fn test_all_passing_shows_affirmation() {
        let summary: QcSummary = serde_json::from_str(
            r#"{"a": {"status": "PASS", "reason": ""}, "b": {"status": "PASS", "reason": ""}}"#,
        )
        .unwrap();

        let view = summary.view(false);
        assert!(view.all_passed());
        assert!(view.rows.is_empty());

        let all = summary.view(true);
        assert!(!all.all_passed());
        assert_eq!(all.rows.len(), 2);
    }

    #[test]
    fn test_ties_keep_document_order() {
        let summary: QcSummary = serde_json::from_str(
            r#"{
                "z_metric": {"status": "WARN", "reason": ""},
                "odd": {"status": "MAYBE", "reason": ""},
                "a_metric": {"status": "WARN", "reason": ""},
                "first_fail": {"status": "FAIL", "reason": ""},
                "unk": {"status": "UNKNOWN", "reason": ""}
            }"#,
        )
        .unwrap();

        let view = summary.view(false);
        assert_eq!(
            keys(&view),
            vec!["first_fail", "z_metric", "a_metric", "odd", "unk"]
        );
    }

    #[test]
    fn test_unrecognised_status_kept() {
        let result: QcResult =
            serde_json::from_str(r#"{"status": "MAYBE", "reason": "?"}"#).unwrap();
        assert_eq!(result.status, QcStatus::Other("MAYBE".to_string()));
        assert_eq!(result.status.to_string(), "MAYBE");
    }

    #[test]
    fn test_missing_status_ranks_last() {
        let summary: QcSummary = serde_json::from_str(
            r#"{
                "no_verdict": {"reason": "not computed"},
                "adapter_content": {"status": "FAIL", "reason": "high"}
            }"#,
        )
        .unwrap();

        assert_eq!(summary.get("no_verdict").unwrap().status, QcStatus::Unknown);
        let view = summary.view(false);
        assert_eq!(keys(&view), vec!["adapter_content", "no_verdict"]);
        assert_eq!(summary.counts().fail, 1);
    }

    #[test]
    fn test_format_metric_name() {
        assert_eq!(
            format_metric_name("per_base_sequence_quality"),
            "Per Base Sequence Quality"
        );
        assert_eq!(format_metric_name("gc"), "Gc");
        assert_eq!(format_metric_name("per__base"), "Per  Base");
    }

    #[test]
    fn test_display_name_keeps_lookup_key() {
        let summary: QcSummary = serde_json::from_str(MIXED).unwrap();
        let view = summary.view(false);

        let row = view.rows[0];
        assert_eq!(row.display_name(), "Adapter Content");
        assert_eq!(summary.get(row.key).unwrap().reason, "high");
    }
}
