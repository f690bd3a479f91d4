//! Log domain types

use serde::{Deserialize, Serialize};

/// Incremental execution output for one iteration
///
/// Each poll returns only the text written since the previous poll.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogChunk {
    #[serde(default)]
    pub logs: String,
    #[serde(default)]
    pub done: bool,
}

impl LogChunk {
    pub fn has_text(&self) -> bool {
        !self.logs.is_empty()
    }
}
