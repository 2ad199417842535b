//! # heval-explain
//!
//! Turns mechanical violation descriptions into explanations. Retrieval from
//! the knowledge base is best-effort: any failure, timeout, or cancellation
//! falls back to a deterministic template.

pub mod augmenter;
mod pool;
pub mod template;

pub use augmenter::{Explanation, ExplanationAugmenter, ExplanationSource, FallbackReason};
