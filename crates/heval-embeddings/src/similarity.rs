//! Similarity between a query embedding and an exemplar embedding.

use heval_core::errors::EmbeddingError;

/// Cosine similarity in [-1, 1], accumulated in f64.
///
/// Vectors of different lengths come from different providers and are an
/// error. A zero vector (empty or stopword-only text) carries no signal and
/// scores 0.0 against anything, so it never clears a positive floor.
pub fn cosine_similarity(query: &[f32], candidate: &[f32]) -> Result<f64, EmbeddingError> {
    if query.len() != candidate.len() {
        return Err(EmbeddingError::DimensionMismatch {
            expected: query.len(),
            actual: candidate.len(),
        });
    }

    let (dot, query_sq, candidate_sq) = query.iter().zip(candidate).fold(
        (0.0f64, 0.0f64, 0.0f64),
        |(dot, qq, cc), (&q, &c)| {
            let (q, c) = (f64::from(q), f64::from(c));
            (dot + q * c, qq + q * q, cc + c * c)
        },
    );
    if query_sq == 0.0 || candidate_sq == 0.0 {
        return Ok(0.0);
    }
    Ok((dot / (query_sq.sqrt() * candidate_sq.sqrt())).clamp(-1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_is_one() {
        let v = [0.3, -0.2, 0.9];
        assert!((cosine_similarity(&v, &v).unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn opposite_is_minus_one() {
        let sim = cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]).unwrap();
        assert!((sim + 1.0).abs() < 1e-9);
    }

    #[test]
    fn zero_vectors_score_zero() {
        assert_eq!(cosine_similarity(&[], &[]).unwrap(), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]).unwrap(), 0.0);
    }

    #[test]
    fn length_mismatch_is_an_error() {
        let err = cosine_similarity(&[1.0], &[1.0, 0.0]).unwrap_err();
        assert!(matches!(
            err,
            EmbeddingError::DimensionMismatch { expected: 1, actual: 2 }
        ));
    }
}
