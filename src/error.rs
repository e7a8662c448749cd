//! Error types for docsift.

use std::io;
use thiserror::Error;

/// Result type alias for docsift operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Pipeline stage that was running when a document failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Pipeline A: title detection, heading classification, outline assembly.
    Outline,
    /// Pipeline B: line chunk extraction ahead of ranking.
    Chunking,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Outline => write!(f, "outline extraction"),
            Stage::Chunking => write!(f, "chunk extraction"),
        }
    }
}

/// Error types that can occur while extracting outlines or ranking text.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file is not recognized as PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF header carries a version we do not understand.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// Error parsing PDF structure.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The PDF document is encrypted.
    #[error("Document is encrypted")]
    Encrypted,

    /// Page index is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(usize, usize),

    /// A required run input (the persona/job description) was not found.
    #[error("Missing required input: {0}")]
    MissingInput(String),

    /// A source document could not be read by the span source.
    #[error("{stage} failed for document '{document}': {reason}")]
    UnreadableDocument {
        stage: Stage,
        document: String,
        reason: String,
    },

    /// The embedder failed or returned an unusable result.
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Two vectors that must share a dimension do not.
    #[error("Embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// JSON input could not be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error while rendering output.
    #[error("Rendering error: {0}")]
    Render(String),
}

impl Error {
    /// Wrap this error as a per-document failure for the given stage.
    pub fn for_document(self, stage: Stage, document: impl Into<String>) -> Self {
        match self {
            already @ Error::UnreadableDocument { .. } => already,
            other => Error::UnreadableDocument {
                stage,
                document: document.into(),
                reason: other.to_string(),
            },
        }
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}
