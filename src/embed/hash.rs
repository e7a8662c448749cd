//! Feature-hashing embedder.

use std::hash::Hasher;

use twox_hash::XxHash64;

use super::Embedder;
use crate::error::Result;

/// Vector dimension of the reference sentence model.
pub const DEFAULT_DIMENSIONS: usize = 384;

/// Identifier reported for the built-in embedder.
pub const MODEL_NAME: &str = "local-hash-v1";

const MIN_DIMENSIONS: usize = 8;

/// Embeds text by hashing word and word-bigram features into a fixed
/// number of buckets, then L2-normalizing.
///
/// Texts sharing vocabulary land close together; unrelated texts are
/// near-orthogonal. Output depends only on the input text and dimension.
#[derive(Debug, Clone)]
pub struct HashEmbedder {
    dimensions: usize,
}

impl HashEmbedder {
    /// Create an embedder with [`DEFAULT_DIMENSIONS`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an embedder with a custom dimension (at least 8).
    pub fn with_dimensions(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(MIN_DIMENSIONS),
        }
    }

    /// Embed one text without the batch wrapper.
    pub fn embed_text(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0_f32; self.dimensions];

        for feature in features(text) {
            let hash = stable_hash(&feature);
            let index = (hash % self.dimensions as u64) as usize;
            let sign = if (hash >> 63) & 1 == 0 { 1.0 } else { -1.0 };
            let weight = 1.0 + (((hash >> 48) & 0xFF) as f32 / 255.0);
            vector[index] += sign * weight;
        }

        normalize(&mut vector);
        vector
    }
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self {
            dimensions: DEFAULT_DIMENSIONS,
        }
    }
}

impl Embedder for HashEmbedder {
    fn dim(&self) -> usize {
        self.dimensions
    }

    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.embed_text(t)).collect())
    }
}

/// Lowercased alphanumeric words (`w:`) and adjacent word pairs (`b:`).
fn features(text: &str) -> Vec<String> {
    let words: Vec<String> = text
        .split_whitespace()
        .map(|word| {
            word.chars()
                .filter(|c| c.is_alphanumeric())
                .flat_map(char::to_lowercase)
                .collect::<String>()
        })
        .filter(|word| !word.is_empty())
        .collect();

    let mut features = Vec::with_capacity(words.len() * 2);
    for (index, word) in words.iter().enumerate() {
        features.push(format!("w:{word}"));
        if let Some(next) = words.get(index + 1) {
            features.push(format!("b:{word}_{next}"));
        }
    }
    features
}

fn stable_hash(value: &str) -> u64 {
    let mut hasher = XxHash64::with_seed(0);
    hasher.write(value.as_bytes());
    hasher.finish()
}

fn normalize(values: &mut [f32]) {
    let norm = values
        .iter()
        .map(|v| f64::from(*v) * f64::from(*v))
        .sum::<f64>()
        .sqrt() as f32;

    if norm == 0.0 {
        return;
    }

    for value in values {
        *value /= norm;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embed::cosine_similarity;

    #[test]
    fn test_dimensions() {
        assert_eq!(HashEmbedder::new().dim(), 384);
        assert_eq!(HashEmbedder::with_dimensions(64).embed_text("a b").len(), 64);
        assert_eq!(HashEmbedder::with_dimensions(2).dim(), 8);
    }

    #[test]
    fn test_deterministic() {
        let embedder = HashEmbedder::new();
        assert_eq!(
            embedder.embed_text("Plan a trip"),
            embedder.embed_text("Plan a trip")
        );
    }

    #[test]
    fn test_unit_norm() {
        let v = HashEmbedder::new().embed_text("Nightlife and entertainment in Nice");
        let norm: f64 = v.iter().map(|x| f64::from(*x) * f64::from(*x)).sum();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_empty_text_is_zero_vector() {
        let v = HashEmbedder::new().embed_text("  ... ");
        assert!(v.iter().all(|x| *x == 0.0));
    }

    #[test]
    fn test_case_and_punctuation_insensitive() {
        let embedder = HashEmbedder::new();
        assert_eq!(
            embedder.embed_text("Coastal Adventures!"),
            embedder.embed_text("coastal adventures")
        );
    }

    #[test]
    fn test_shared_vocabulary_scores_higher() {
        let embedder = HashEmbedder::new();
        let query = embedder.embed_text("Travel Planner: plan a trip for college friends");
        let related = embedder.embed_text("Tips for planning a trip with friends");
        let unrelated = embedder.embed_text("Quarterly revenue grew by four percent");
        assert!(cosine_similarity(&query, &related) > cosine_similarity(&query, &unrelated));
    }
}
