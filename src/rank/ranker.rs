//! Embedding-based relevance ranking.

use crate::embed::{cosine_similarity, Embedder};
use crate::error::{Error, Result};
use crate::model::{Chunk, ScoredChunk};

/// Scores chunks against a query and keeps the best `top_k`.
pub struct EmbeddingRanker<'a> {
    embedder: &'a dyn Embedder,
    top_k: usize,
}

impl<'a> EmbeddingRanker<'a> {
    pub fn new(embedder: &'a dyn Embedder, top_k: usize) -> Self {
        Self { embedder, top_k }
    }

    /// Rank chunks by cosine similarity to the query, best first.
    ///
    /// The corpus is embedded in one batch call and the query in one more.
    /// Equal scores keep their input order. An empty corpus returns an empty
    /// ranking without calling the embedder.
    pub fn rank(&self, chunks: Vec<Chunk>, query: &str) -> Result<Vec<ScoredChunk>> {
        if chunks.is_empty() {
            return Ok(Vec::new());
        }

        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let vectors = self.embedder.embed_batch(&texts)?;
        if vectors.len() != chunks.len() {
            return Err(Error::Embedding(format!(
                "expected {} vectors, got {}",
                chunks.len(),
                vectors.len()
            )));
        }

        let query_vector = self.embedder.embed(query)?;
        let dim = self.embedder.dim();
        check_vector(dim, &query_vector)?;

        let mut scored = Vec::with_capacity(chunks.len());
        for (chunk, vector) in chunks.into_iter().zip(vectors) {
            check_vector(dim, &vector)?;
            let score = cosine_similarity(&query_vector, &vector);
            scored.push(ScoredChunk::new(chunk, score));
        }

        // sort_by is stable
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(self.top_k);

        log::info!("ranked {} chunks, kept {}", texts.len(), scored.len());
        Ok(scored)
    }
}

/// A usable vector has the embedder's dimension and only finite components.
fn check_vector(expected: usize, vector: &[f32]) -> Result<()> {
    if vector.len() != expected {
        return Err(Error::DimensionMismatch {
            expected,
            actual: vector.len(),
        });
    }
    if vector.iter().any(|v| !v.is_finite()) {
        return Err(Error::Embedding("vector has non-finite components".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Embeds corpus texts as fixed vectors by position; the second call
    /// embeds the query.
    struct TableEmbedder {
        vectors: Vec<Vec<f32>>,
        query: Vec<f32>,
        calls: Cell<usize>,
    }

    impl Embedder for TableEmbedder {
        fn dim(&self) -> usize {
            self.query.len()
        }

        fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            let call = self.calls.get();
            self.calls.set(call + 1);
            if call == 1 {
                return Ok(vec![self.query.clone()]);
            }
            Ok(self.vectors.iter().take(texts.len()).cloned().collect())
        }
    }

    fn chunks(n: usize) -> Vec<Chunk> {
        (0..n).map(|i| Chunk::new("doc.pdf", i, format!("chunk {i}"))).collect()
    }

    #[test]
    fn test_empty_corpus_skips_embedder() {
        let embedder = TableEmbedder {
            vectors: vec![],
            query: vec![1.0, 0.0],
            calls: Cell::new(0),
        };
        let ranked = EmbeddingRanker::new(&embedder, 10).rank(vec![], "q: x").unwrap();
        assert!(ranked.is_empty());
        assert_eq!(embedder.calls.get(), 0);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let embedder = TableEmbedder {
            vectors: vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![1.0, 0.0], vec![1.0, 0.0]],
            query: vec![1.0, 0.0],
            calls: Cell::new(0),
        };
        let ranked = EmbeddingRanker::new(&embedder, 10)
            .rank(chunks(4), "q: x")
            .unwrap();
        let pages: Vec<usize> = ranked.iter().map(|s| s.chunk.page).collect();
        assert_eq!(pages, vec![0, 2, 3, 1]);
        assert_eq!(embedder.calls.get(), 2);
    }

    #[test]
    fn test_vector_count_mismatch() {
        let embedder = TableEmbedder {
            vectors: vec![vec![1.0, 0.0]],
            query: vec![1.0, 0.0],
            calls: Cell::new(0),
        };
        let err = EmbeddingRanker::new(&embedder, 10)
            .rank(chunks(3), "q: x")
            .unwrap_err();
        assert!(matches!(err, Error::Embedding(_)));
    }

    #[test]
    fn test_non_finite_vector_is_rejected() {
        let embedder = TableEmbedder {
            vectors: vec![vec![f32::NAN, 0.0], vec![0.5, 0.5]],
            query: vec![1.0, 0.0],
            calls: Cell::new(0),
        };
        let err = EmbeddingRanker::new(&embedder, 10)
            .rank(chunks(2), "q: x")
            .unwrap_err();
        assert!(matches!(err, Error::Embedding(_)));
    }

    #[test]
    fn test_non_finite_query_is_rejected() {
        let embedder = TableEmbedder {
            vectors: vec![vec![0.5, 0.5]],
            query: vec![f32::INFINITY, 0.0],
            calls: Cell::new(0),
        };
        let err = EmbeddingRanker::new(&embedder, 10)
            .rank(chunks(1), "q: x")
            .unwrap_err();
        assert!(matches!(err, Error::Embedding(_)));
    }

    #[test]
    fn test_single_chunk_is_not_mistaken_for_query() {
        let embedder = TableEmbedder {
            vectors: vec![vec![0.0, 1.0]],
            query: vec![1.0, 0.0],
            calls: Cell::new(0),
        };
        let ranked = EmbeddingRanker::new(&embedder, 10)
            .rank(vec![Chunk::new("doc.pdf", 0, "Scope: trails")], "q: x")
            .unwrap();
        assert_eq!(ranked.len(), 1);
        assert!(ranked[0].score.abs() < 1e-12);
    }

    #[test]
    fn test_dimension_mismatch() {
        let embedder = TableEmbedder {
            vectors: vec![vec![1.0, 0.0, 0.0]],
            query: vec![1.0, 0.0],
            calls: Cell::new(0),
        };
        let err = EmbeddingRanker::new(&embedder, 10)
            .rank(chunks(1), "q: x")
            .unwrap_err();
        assert!(matches!(
            err,
            Error::DimensionMismatch { expected: 2, actual: 3 }
        ));
    }
}
