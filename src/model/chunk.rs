//! Line chunks and their relevance scores.

use serde::{Deserialize, Serialize};

/// One non-empty line of a document, the unit of ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Source document name (file name)
    pub document: String,
    /// Page index (0-based)
    pub page: usize,
    /// Trimmed line text
    pub text: String,
}

impl Chunk {
    /// Create a new chunk.
    pub fn new(document: impl Into<String>, page: usize, text: impl Into<String>) -> Self {
        Self {
            document: document.into(),
            page,
            text: text.into(),
        }
    }
}

/// A chunk with its cosine similarity to the query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredChunk {
    #[serde(flatten)]
    pub chunk: Chunk,
    pub score: f64,
}

impl ScoredChunk {
    /// Attach a score to a chunk.
    pub fn new(chunk: Chunk, score: f64) -> Self {
        Self { chunk, score }
    }
}
