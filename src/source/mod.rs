//! Span sources: where pages, blocks, lines and spans come from.
//!
//! Both pipelines read documents exclusively through [`SpanSource`]. The
//! crate ships a PDF reader ([`PdfSpanSource`]) and an in-memory source
//! ([`MemorySource`]) for callers that already hold span data.

mod layout;
mod pdf;

pub use pdf::PdfSpanSource;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::PageLayout;

/// Structural reader for one document.
///
/// Implementations return pages in document order; blocks, lines and spans
/// within a page are returned in reading order.
pub trait SpanSource {
    /// Number of pages in the document.
    fn page_count(&self) -> usize;

    /// Read the page at `index` (0-based).
    fn page(&self, index: usize) -> Result<PageLayout>;
}

impl<S: SpanSource + ?Sized> SpanSource for &S {
    fn page_count(&self) -> usize {
        (**self).page_count()
    }

    fn page(&self, index: usize) -> Result<PageLayout> {
        (**self).page(index)
    }
}

impl<S: SpanSource + ?Sized> SpanSource for Box<S> {
    fn page_count(&self) -> usize {
        (**self).page_count()
    }

    fn page(&self, index: usize) -> Result<PageLayout> {
        (**self).page(index)
    }
}

/// A span source backed by pages held in memory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemorySource {
    pages: Vec<PageLayout>,
}

impl MemorySource {
    /// Create a source with no pages.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a source from pages; page indices are renumbered to match
    /// their position.
    pub fn from_pages(pages: Vec<PageLayout>) -> Self {
        let mut source = Self::new();
        for page in pages {
            source.push_page(page);
        }
        source
    }

    /// Append a page.
    pub fn push_page(&mut self, mut page: PageLayout) {
        page.index = self.pages.len();
        self.pages.push(page);
    }

    /// Parse a JSON dump of the form `{"pages": [...]}`.
    pub fn from_json(data: &str) -> Result<Self> {
        let parsed: MemorySource = serde_json::from_str(data)?;
        Ok(Self::from_pages(parsed.pages))
    }

    /// Access the pages.
    pub fn pages(&self) -> &[PageLayout] {
        &self.pages
    }
}

impl SpanSource for MemorySource {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page(&self, index: usize) -> Result<PageLayout> {
        self.pages
            .get(index)
            .cloned()
            .ok_or(Error::PageOutOfRange(index, self.pages.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Block, Line, Span};

    fn one_span_page(text: &str, size: f64) -> PageLayout {
        PageLayout::with_blocks(
            99,
            vec![Block::new(vec![Line::new(vec![Span::new(text, size)])])],
        )
    }

    #[test]
    fn test_memory_source_renumbers_pages() {
        let source = MemorySource::from_pages(vec![
            one_span_page("first", 10.0),
            one_span_page("second", 10.0),
        ]);
        assert_eq!(source.page_count(), 2);
        assert_eq!(source.page(0).unwrap().index, 0);
        assert_eq!(source.page(1).unwrap().index, 1);
    }

    #[test]
    fn test_memory_source_out_of_range() {
        let source = MemorySource::new();
        assert!(matches!(source.page(0), Err(Error::PageOutOfRange(0, 0))));
    }

    #[test]
    fn test_memory_source_from_json() {
        let source = MemorySource::from_json(
            r#"{"pages": [{"index": 0, "blocks": [{"lines": [{"spans": [{"text": "Hello", "size": 12.0}]}]}]}]}"#,
        )
        .unwrap();
        let page = source.page(0).unwrap();
        assert_eq!(page.spans().next().unwrap().text, "Hello");
    }

    #[test]
    fn test_span_source_through_reference_and_box() {
        let source = MemorySource::from_pages(vec![one_span_page("x", 1.0)]);
        let by_ref: &dyn SpanSource = &source;
        assert_eq!(by_ref.page_count(), 1);
        let boxed: Box<dyn SpanSource> = Box::new(source.clone());
        assert_eq!(boxed.page_count(), 1);
    }
}
