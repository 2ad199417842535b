//! In-memory embedding cache keyed by blake3 content hash.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use moka::sync::Cache;
use tracing::debug;

use heval_core::errors::{EmbeddingError, HevalResult};
use heval_core::traits::IEmbeddingProvider;

/// Wraps a provider so repeated situations and queries are embedded once.
pub struct CachedEmbedder<P> {
    inner: P,
    cache: Cache<String, Vec<f32>>,
    misses: AtomicU64,
}

impl<P: IEmbeddingProvider> CachedEmbedder<P> {
    pub fn new(inner: P, max_entries: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .time_to_idle(Duration::from_secs(3600))
            .build();
        Self {
            inner,
            cache,
            misses: AtomicU64::new(0),
        }
    }

    pub fn content_hash(text: &str) -> String {
        blake3::hash(text.as_bytes()).to_hex().to_string()
    }

    /// Number of embeddings computed by the wrapped provider.
    pub fn miss_count(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn clear(&self) {
        self.cache.invalidate_all();
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }
}

impl<P: IEmbeddingProvider> IEmbeddingProvider for CachedEmbedder<P> {
    fn embed(&self, text: &str) -> HevalResult<Vec<f32>> {
        let key = Self::content_hash(text);
        if let Some(hit) = self.cache.get(&key) {
            return Ok(hit);
        }

        let embedding = self.inner.embed(text)?;
        if embedding.len() != self.inner.dimensions() {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.inner.dimensions(),
                actual: embedding.len(),
            }
            .into());
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        debug!(provider = self.inner.name(), hash = %key, "embedding cache miss");
        self.cache.insert(key, embedding.clone());
        Ok(embedding)
    }

    fn dimensions(&self) -> usize {
        self.inner.dimensions()
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::TfIdfEmbedder;

    #[test]
    fn repeated_text_hits_cache() {
        let cached = CachedEmbedder::new(TfIdfEmbedder::new(64).unwrap(), 100);
        let a = cached.embed("confirm before delete").unwrap();
        let b = cached.embed("confirm before delete").unwrap();
        assert_eq!(a, b);
        assert_eq!(cached.miss_count(), 1);
    }

    #[test]
    fn distinct_text_misses() {
        let cached = CachedEmbedder::new(TfIdfEmbedder::new(64).unwrap(), 100);
        cached.embed("first").unwrap();
        cached.embed("second").unwrap();
        assert_eq!(cached.miss_count(), 2);
    }

    #[test]
    fn clear_forces_recompute() {
        let cached = CachedEmbedder::new(TfIdfEmbedder::new(64).unwrap(), 100);
        cached.embed("labels").unwrap();
        cached.clear();
        cached.embed("labels").unwrap();
        assert_eq!(cached.miss_count(), 2);
    }

    #[test]
    fn hash_is_stable() {
        assert_eq!(
            CachedEmbedder::<TfIdfEmbedder>::content_hash("x"),
            CachedEmbedder::<TfIdfEmbedder>::content_hash("x")
        );
    }
}
