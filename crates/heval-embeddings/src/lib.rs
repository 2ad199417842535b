//! # heval-embeddings
//!
//! Text embeddings for exemplar situations and retrieval queries.
//! Deterministic and offline: hashed TF-IDF vectors behind a content-hash cache.

pub mod cache;
pub mod providers;
pub mod similarity;

pub use cache::CachedEmbedder;
pub use providers::TfIdfEmbedder;
pub use similarity::cosine_similarity;
