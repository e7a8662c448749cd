//! Line chunks for ranking.

use crate::error::Result;
use crate::model::{Chunk, PageLayout};
use crate::source::SpanSource;

/// Turns every non-empty line of a document into a [`Chunk`].
///
/// There is no cross-line merging and no paragraph detection; heading
/// validity rules do not apply here.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChunkExtractor;

impl ChunkExtractor {
    /// Chunks of all pages, in page then line order.
    pub fn extract<S: SpanSource + ?Sized>(&self, document: &str, source: &S) -> Result<Vec<Chunk>> {
        let mut chunks = Vec::new();
        for index in 0..source.page_count() {
            let page = source.page(index)?;
            chunks.extend(self.page_chunks(document, &page));
        }
        log::debug!("{}: {} chunks", document, chunks.len());
        Ok(chunks)
    }

    /// Chunks of one page.
    pub fn page_chunks<'a>(
        &self,
        document: &'a str,
        page: &'a PageLayout,
    ) -> impl Iterator<Item = Chunk> + 'a {
        page.lines()
            .map(|line| line.text())
            .filter(|text| !text.is_empty())
            .map(move |text| Chunk::new(document, page.index, text))
    }
}
