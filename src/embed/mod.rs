//! Text embedding for relevance ranking.
//!
//! Ranking only depends on the [`Embedder`] trait: a deterministic map from
//! text to a fixed-dimension vector. [`HashEmbedder`] is the built-in,
//! dependency-light implementation; callers with a sentence-embedding model
//! plug it in by implementing the trait.

mod hash;

pub use hash::{HashEmbedder, DEFAULT_DIMENSIONS, MODEL_NAME};

use crate::error::{Error, Result};

/// Deterministic text-to-vector model.
pub trait Embedder {
    /// Dimension of every vector this embedder returns.
    fn dim(&self) -> usize;

    /// Embed a batch of texts, one vector per input, in input order.
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Embed a single text.
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.embed_batch(&[text.to_string()])?
            .pop()
            .ok_or_else(|| Error::Embedding("embedder returned no vector".to_string()))
    }
}

impl<E: Embedder + ?Sized> Embedder for Box<E> {
    fn dim(&self) -> usize {
        (**self).dim()
    }

    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        (**self).embed_batch(texts)
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        (**self).embed(text)
    }
}

/// Cosine similarity of two vectors, in `[-1, 1]`.
///
/// Returns 0.0 when the lengths differ, the vectors are empty, either has
/// zero norm, or a component is not finite.
pub fn cosine_similarity(left: &[f32], right: &[f32]) -> f64 {
    if left.len() != right.len() || left.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0_f64;
    let mut left_norm = 0.0_f64;
    let mut right_norm = 0.0_f64;
    for (l, r) in left.iter().zip(right.iter()) {
        let (l, r) = (f64::from(*l), f64::from(*r));
        dot += l * r;
        left_norm += l * l;
        right_norm += r * r;
    }

    if left_norm <= 0.0 || right_norm <= 0.0 {
        return 0.0;
    }

    let similarity = dot / (left_norm.sqrt() * right_norm.sqrt());
    if !similarity.is_finite() {
        return 0.0;
    }
    similarity.clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_similarity_basics() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-12);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-12);
        assert!((cosine_similarity(&[1.0, 0.0], &[-2.0, 0.0]) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_cosine_similarity_is_scale_invariant() {
        let a = cosine_similarity(&[3.0, 4.0], &[4.0, 3.0]);
        let b = cosine_similarity(&[30.0, 40.0], &[0.4, 0.3]);
        assert!((a - 0.96).abs() < 1e-6);
        assert!((a - b).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_degenerate_inputs() {
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 2.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
        assert_eq!(cosine_similarity(&[f32::NAN, 0.0], &[0.5, 0.5]), 0.0);
        assert_eq!(cosine_similarity(&[f32::INFINITY, 1.0], &[1.0, 1.0]), 0.0);
    }

    #[test]
    fn test_default_embed_uses_batch() {
        let embedder: Box<dyn Embedder> = Box::new(HashEmbedder::new());
        let single = embedder.embed("field guide").unwrap();
        let batch = embedder.embed_batch(&["field guide".to_string()]).unwrap();
        assert_eq!(single, batch[0]);
        assert_eq!(single.len(), embedder.dim());
    }
}
