//! # docsift
//!
//! Outline extraction and persona-driven section ranking for PDF documents.
//!
//! Two pipelines share one structural primitive (page, block, line, span,
//! with a font size per span):
//!
//! - **Outline extraction** infers a title and H1/H2 headings from font
//!   size statistics alone.
//! - **Relevance ranking** embeds every line of a document set and ranks
//!   it against a query built from a persona and the job they need done.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docsift::{extract_outline_file, render};
//!
//! fn main() -> docsift::Result<()> {
//!     let outline = extract_outline_file("document.pdf")?;
//!     let json = render::outline_to_json(&outline, render::JsonFormat::Pretty)?;
//!     println!("{}", json);
//!     Ok(())
//! }
//! ```
//!
//! Ranking a directory of PDFs with a persona file:
//!
//! ```no_run
//! use docsift::{Docsift, RunConfig};
//!
//! let config = RunConfig::from_input_dir("input", "output/persona_analysis.json")?;
//! let analysis = Docsift::new().with_top_k(5).analyze(&config)?;
//! for section in &analysis.section_summary {
//!     println!("{}. {}", section.importance_rank, section.section_title);
//! }
//! # Ok::<(), docsift::Error>(())
//! ```

pub mod config;
pub mod detect;
pub mod embed;
pub mod error;
pub mod model;
pub mod options;
pub mod outline;
pub mod rank;
pub mod render;
pub mod source;

// Re-export commonly used types
pub use config::RunConfig;
pub use detect::{sniff_bytes, sniff_path, PdfHeader};
pub use embed::{cosine_similarity, Embedder, HashEmbedder};
pub use error::{Error, Result, Stage};
pub use model::{
    AnalysisMetadata, AnalysisResult, Block, Chunk, Heading, HeadingLevel, Line, Outline,
    PageLayout, PersonaJob, ScoredChunk, SectionSummary, Span, SubsectionAnalysis,
};
pub use options::{ErrorMode, OutlineOptions, RankOptions};
pub use outline::{FontStats, OutlineExtractor};
pub use rank::Analyzer;
pub use render::JsonFormat;
pub use source::{MemorySource, PdfSpanSource, SpanSource};

use std::path::Path;

/// Extract the outline of a document from any span source.
///
/// # Example
///
/// ```
/// use docsift::{extract_outline, Block, Line, MemorySource, PageLayout, Span};
///
/// let page = PageLayout::with_blocks(
///     0,
///     vec![Block::new(vec![Line::new(vec![Span::new("Introduction to Systems", 24.0)])])],
/// );
/// let outline = extract_outline(&MemorySource::from_pages(vec![page])).unwrap();
/// assert_eq!(outline.headings.len(), 1);
/// ```
pub fn extract_outline<S: SpanSource + ?Sized>(source: &S) -> Result<Outline> {
    OutlineExtractor::default().extract(source)
}

/// Extract the outline of a PDF file.
///
/// # Example
///
/// ```no_run
/// use docsift::extract_outline_file;
///
/// let outline = extract_outline_file("document.pdf").unwrap();
/// println!("{}", outline.title);
/// ```
pub fn extract_outline_file<P: AsRef<Path>>(path: P) -> Result<Outline> {
    let source = PdfSpanSource::open(path)?;
    extract_outline(&source)
}

/// Extract the outline of a PDF held in memory.
pub fn extract_outline_bytes(data: &[u8]) -> Result<Outline> {
    let source = PdfSpanSource::from_bytes(data)?;
    extract_outline(&source)
}

/// Builder tying options and the embedder together.
///
/// # Example
///
/// ```no_run
/// use docsift::Docsift;
///
/// let outline = Docsift::new()
///     .with_title_scan_pages(2)
///     .lenient()
///     .outline("document.pdf")?;
/// # Ok::<(), docsift::Error>(())
/// ```
pub struct Docsift {
    outline_options: OutlineOptions,
    rank_options: RankOptions,
    embedder: Box<dyn Embedder>,
}

impl Docsift {
    /// Create a builder with default options and the hashing embedder.
    pub fn new() -> Self {
        Self {
            outline_options: OutlineOptions::default(),
            rank_options: RankOptions::default(),
            embedder: Box::new(HashEmbedder::new()),
        }
    }

    /// Skip unreadable documents and pages instead of failing.
    pub fn lenient(mut self) -> Self {
        self.outline_options = self.outline_options.lenient();
        self.rank_options = self.rank_options.lenient();
        self
    }

    /// Set how many leading pages are scanned for the title.
    pub fn with_title_scan_pages(mut self, pages: usize) -> Self {
        self.outline_options = self.outline_options.with_title_scan_pages(pages);
        self
    }

    /// Set how many ranked sections are kept.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.rank_options = self.rank_options.with_top_k(top_k);
        self
    }

    /// Set the section title truncation length.
    pub fn with_title_chars(mut self, chars: usize) -> Self {
        self.rank_options = self.rank_options.with_title_chars(chars);
        self
    }

    /// Use a different embedder.
    pub fn with_embedder(mut self, embedder: Box<dyn Embedder>) -> Self {
        self.embedder = embedder;
        self
    }

    /// Extract the outline of a PDF file.
    ///
    /// Failures name the document and the outline stage.
    pub fn outline<P: AsRef<Path>>(&self, path: P) -> Result<Outline> {
        let path = path.as_ref();
        let name = config::document_name(path);
        let source = PdfSpanSource::open(path)
            .map_err(|e| e.for_document(Stage::Outline, &name))?
            .with_error_mode(self.outline_options.error_mode);
        OutlineExtractor::new(self.outline_options.clone())
            .extract(&source)
            .map_err(|e| e.for_document(Stage::Outline, name))
    }

    /// Run the ranking pipeline over a resolved run config.
    pub fn analyze(self, config: &RunConfig) -> Result<AnalysisResult> {
        Analyzer::new(self.embedder)
            .with_options(self.rank_options)
            .analyze_run(config)
    }
}

impl Default for Docsift {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_docsift_builder() {
        let docsift = Docsift::new().lenient().with_top_k(3).with_title_scan_pages(1);
        assert_eq!(docsift.outline_options.error_mode, ErrorMode::Lenient);
        assert_eq!(docsift.outline_options.title_scan_pages, 1);
        assert_eq!(docsift.rank_options.error_mode, ErrorMode::Lenient);
        assert_eq!(docsift.rank_options.top_k, 3);
        assert_eq!(docsift.embedder.dim(), embed::DEFAULT_DIMENSIONS);
    }

    #[test]
    fn test_extract_outline_bytes_rejects_garbage() {
        assert!(matches!(
            extract_outline_bytes(b"%PDF"),
            Err(Error::UnknownFormat)
        ));
        assert!(matches!(
            extract_outline_bytes(b"<!DOCTYPE html><html></html>"),
            Err(Error::UnknownFormat)
        ));
    }

    #[test]
    fn test_outline_failure_names_document_and_stage() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("notes.pdf");
        std::fs::write(&path, b"plain text, not a PDF").unwrap();

        match Docsift::new().outline(&path) {
            Err(Error::UnreadableDocument {
                stage,
                document,
                reason,
            }) => {
                assert_eq!(stage, Stage::Outline);
                assert_eq!(document, "notes.pdf");
                assert!(reason.contains("not a valid PDF"));
            }
            other => panic!("expected an unreadable document, got {:?}", other),
        }
    }

    #[test]
    fn test_extract_outline_of_empty_source() {
        let outline = extract_outline(&MemorySource::new()).unwrap();
        assert_eq!(outline, Outline::default());
    }
}
