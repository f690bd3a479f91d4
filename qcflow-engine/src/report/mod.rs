//! Report viewing
//!
//! Selection over a finished run's report index, with lazy loading of
//! structured QC summaries.

mod viewer;

pub use viewer::{ReportContent, ReportViewer, UnknownReport};
