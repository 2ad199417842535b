//! Hashed TF-IDF provider.
//!
//! Terms are hashed into fixed-dimension buckets, weighted by frequency and a
//! length-based IDF approximation, then L2-normalized. Always available.

use std::collections::HashMap;

use heval_core::errors::{EmbeddingError, HevalResult};
use heval_core::traits::IEmbeddingProvider;

/// Words that carry no signal for matching UI situations.
const STOPWORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "has", "in", "is", "it", "of", "on",
    "or", "the", "to", "with",
];

/// Deterministic embedding provider over hashed term buckets.
#[derive(Debug, Clone)]
pub struct TfIdfEmbedder {
    dimensions: usize,
}

impl TfIdfEmbedder {
    pub fn new(dimensions: usize) -> HevalResult<Self> {
        if dimensions == 0 {
            return Err(EmbeddingError::InferenceFailed {
                reason: "embedding dimensions must be greater than 0".to_string(),
            }
            .into());
        }
        Ok(Self { dimensions })
    }

    /// FNV-1a bucket index.
    fn bucket(term: &str, dims: usize) -> usize {
        let mut h: u64 = 0xcbf29ce484222325;
        for b in term.as_bytes() {
            h ^= *b as u64;
            h = h.wrapping_mul(0x100000001b3);
        }
        (h % dims as u64) as usize
    }

    fn tokenize(text: &str) -> Vec<String> {
        text.split(|c: char| !c.is_alphanumeric())
            .map(str::to_lowercase)
            .filter(|s| s.len() >= 2 && !STOPWORDS.contains(&s.as_str()))
            .collect()
    }

    fn vectorize(&self, text: &str) -> Vec<f32> {
        let mut vec = vec![0.0f32; self.dimensions];
        let tokens = Self::tokenize(text);
        if tokens.is_empty() {
            return vec;
        }

        let mut tf: HashMap<&str, f32> = HashMap::new();
        for tok in &tokens {
            *tf.entry(tok.as_str()).or_default() += 1.0;
        }

        let total = tokens.len() as f32;
        for (term, count) in tf {
            let idf = 1.0 + (term.len() as f32).ln();
            vec[Self::bucket(term, self.dimensions)] += (count / total) * idf;
        }

        let norm: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            vec.iter_mut().for_each(|v| *v /= norm);
        }
        vec
    }
}

impl IEmbeddingProvider for TfIdfEmbedder {
    fn embed(&self, text: &str) -> HevalResult<Vec<f32>> {
        Ok(self.vectorize(text))
    }

    fn embed_batch(&self, texts: &[String]) -> HevalResult<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.vectorize(t)).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "hashed-tfidf"
    }
}
