//! Outline extraction: title and H1/H2 headings from font sizes alone.
//!
//! The extractor makes two passes over a document. The first pass reads the
//! leading pages ([`OutlineOptions::title_scan_pages`]) to collect font size
//! extremes and detect the title. The second pass classifies every span of
//! every page against thresholds derived from those extremes.

mod assembler;
mod classifier;
mod stats;

pub use assembler::OutlineAssembler;
pub use classifier::{is_valid_heading, HeadingClassifier};
pub use stats::{FontStatisticsCollector, FontStats, TitleScan};

use crate::error::{Result, Stage};
use crate::model::{Outline, PageLayout};
use crate::options::{ErrorMode, OutlineOptions};
use crate::source::SpanSource;

/// Extracts outlines from span sources.
#[derive(Debug, Clone, Default)]
pub struct OutlineExtractor {
    options: OutlineOptions,
}

impl OutlineExtractor {
    /// Create an extractor with the given options.
    pub fn new(options: OutlineOptions) -> Self {
        Self { options }
    }

    /// Access the options.
    pub fn options(&self) -> &OutlineOptions {
        &self.options
    }

    /// Scan the leading pages for font statistics and the title.
    pub fn scan_title<S: SpanSource + ?Sized>(&self, source: &S) -> Result<TitleScan> {
        let limit = self.options.title_scan_pages.min(source.page_count());
        let pages = (0..limit)
            .map(|index| source.page(index))
            .collect::<Result<Vec<PageLayout>>>()?;
        Ok(self.scan_pages(&pages))
    }

    fn scan_pages(&self, pages: &[PageLayout]) -> TitleScan {
        let limit = self.options.title_scan_pages.min(pages.len());
        let mut collector = FontStatisticsCollector::new();
        for page in &pages[..limit] {
            page.spans().for_each(|span| collector.observe(span));
        }
        collector.finish()
    }

    /// Extract the outline of one document.
    pub fn extract<S: SpanSource + ?Sized>(&self, source: &S) -> Result<Outline> {
        let pages = (0..source.page_count())
            .map(|index| source.page(index))
            .collect::<Result<Vec<PageLayout>>>()?;

        let TitleScan { stats, title } = self.scan_pages(&pages);
        log::debug!(
            "font stats: max {} min {}, title {:?}",
            stats.max_size,
            stats.min_size,
            title
        );

        let classifier = HeadingClassifier::new(stats, title.clone());
        let mut assembler = OutlineAssembler::new(title);
        for page in &pages {
            for span in page.spans() {
                if let Some(level) = classifier.classify(&span.text, span.size) {
                    assembler.push(level, span.text.trim(), page.index);
                }
            }
        }

        let outline = assembler.finish();
        log::info!(
            "outline: {} pages, {} headings",
            pages.len(),
            outline.headings.len()
        );
        Ok(outline)
    }

    /// Extract the outline of a named document, applying the error mode.
    ///
    /// Returns `Ok(None)` when the document failed and the mode is lenient.
    pub fn extract_document<S: SpanSource + ?Sized>(
        &self,
        name: &str,
        source: &S,
    ) -> Result<Option<Outline>> {
        match self.extract(source) {
            Ok(outline) => Ok(Some(outline)),
            Err(e) if self.options.error_mode == ErrorMode::Lenient => {
                log::warn!("Skipping '{}': {}", name, e);
                Ok(None)
            }
            Err(e) => Err(e.for_document(Stage::Outline, name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::model::{Block, HeadingLevel, Line, Span};
    use crate::source::MemorySource;

    fn page(spans: &[(&str, f64)]) -> PageLayout {
        PageLayout::with_blocks(
            0,
            vec![Block::new(
                spans
                    .iter()
                    .map(|(text, size)| Line::new(vec![Span::new(*text, *size)]))
                    .collect(),
            )],
        )
    }

    struct FailingSource;

    impl SpanSource for FailingSource {
        fn page_count(&self) -> usize {
            1
        }

        fn page(&self, _index: usize) -> Result<PageLayout> {
            Err(Error::PdfParse("bad xref".to_string()))
        }
    }

    #[test]
    fn test_thresholds_come_from_leading_pages() {
        // Page 3 is outside the scan window, so its 40pt span does not raise
        // the maximum and is classified against the 20pt-derived thresholds.
        let source = MemorySource::from_pages(vec![
            page(&[("Overview", 20.0), ("body", 10.0)]),
            page(&[("body", 10.0)]),
            page(&[("body", 10.0)]),
            page(&[("Appendix", 40.0), ("Details", 16.0)]),
        ]);
        let outline = OutlineExtractor::default().extract(&source).unwrap();
        let found: Vec<(&str, HeadingLevel, usize)> = outline
            .headings
            .iter()
            .map(|h| (h.text.as_str(), h.level, h.page))
            .collect();
        assert_eq!(
            found,
            vec![
                ("Overview", HeadingLevel::H1, 0),
                ("Appendix", HeadingLevel::H1, 3),
                ("Details", HeadingLevel::H2, 3),
            ]
        );
    }

    #[test]
    fn test_title_scan_pages_option() {
        let source = MemorySource::from_pages(vec![
            page(&[("body", 10.0)]),
            page(&[("The Late Title Page", 30.0)]),
        ]);
        let extractor = OutlineExtractor::new(OutlineOptions::new().with_title_scan_pages(1));
        let scan = extractor.scan_title(&source).unwrap();
        assert_eq!(scan.title, "");
        assert_eq!(scan.stats.max_size, 10.0);
    }

    #[test]
    fn test_strict_wraps_document_error() {
        let err = OutlineExtractor::default()
            .extract_document("broken.pdf", &FailingSource)
            .unwrap_err();
        match err {
            Error::UnreadableDocument { stage, document, .. } => {
                assert_eq!(stage, Stage::Outline);
                assert_eq!(document, "broken.pdf");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_lenient_skips_document() {
        let extractor = OutlineExtractor::new(OutlineOptions::new().lenient());
        assert!(extractor
            .extract_document("broken.pdf", &FailingSource)
            .unwrap()
            .is_none());
    }
}
