//! Log buffer
//!
//! Accumulates the execution output of one run. Chunks are appended in
//! arrival order and the buffer is never truncated or rotated; it is only
//! reset when a new run starts.

/// Running log text of the current run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogBuffer {
    text: String,
    chunks: usize,
}

impl LogBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a chunk; empty chunks are ignored
    ///
    /// # Returns
    /// Whether anything was appended
    pub fn append(&mut self, chunk: &str) -> bool {
        if chunk.is_empty() {
            return false;
        }
        self.text.push_str(chunk);
        self.chunks += 1;
        true
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Number of non-empty chunks appended so far
    pub fn chunk_count(&self) -> usize {
        self.chunks
    }

    /// Text appended after byte `offset`, for renderers that print incrementally
    ///
    /// An offset past the end (e.g. from a previous run) yields the whole buffer.
    pub fn since(&self, offset: usize) -> &str {
        if offset > self.text.len() {
            return &self.text;
        }
        self.text.get(offset..).unwrap_or("")
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.chunks = 0;
    }
}
