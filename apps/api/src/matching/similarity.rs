//! Cosine similarity over mixed-representation embedding vectors.

use crate::matching::MatchError;
use crate::models::record::EmbeddingValue;

/// Computes cosine similarity: `dot(a, b) / (‖a‖ · ‖b‖)`.
///
/// Both vectors must be non-empty and of equal length. Each element is
/// coerced to `f64` independently, so vectors may freely mix native floats
/// and decimal strings. A zero-magnitude vector is rejected explicitly —
/// dividing through would produce NaN, which would silently corrupt the
/// ranker's sort order downstream.
pub fn cosine_similarity(a: &[EmbeddingValue], b: &[EmbeddingValue]) -> Result<f64, MatchError> {
    if a.is_empty() || b.is_empty() {
        return Err(MatchError::EmptyVector);
    }
    if a.len() != b.len() {
        return Err(MatchError::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    let mut dot = 0.0_f64;
    let mut norm_a = 0.0_f64;
    let mut norm_b = 0.0_f64;

    for (x, y) in a.iter().zip(b.iter()) {
        let x = coerce(x)?;
        let y = coerce(y)?;
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return Err(MatchError::ZeroNormVector);
    }

    Ok(dot / (norm_a.sqrt() * norm_b.sqrt()))
}

fn coerce(value: &EmbeddingValue) -> Result<f64, MatchError> {
    value.as_f64().ok_or_else(|| {
        let raw = match value {
            EmbeddingValue::Float(v) => v.to_string(),
            EmbeddingValue::Decimal(s) => s.clone(),
        };
        MatchError::NonNumericElement(raw)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn floats(values: &[f64]) -> Vec<EmbeddingValue> {
        values.iter().map(|&v| EmbeddingValue::Float(v)).collect()
    }

    fn decimals(values: &[&str]) -> Vec<EmbeddingValue> {
        values
            .iter()
            .map(|s| EmbeddingValue::Decimal(s.to_string()))
            .collect()
    }

    #[test]
    fn test_self_similarity_is_one() {
        let v = floats(&[0.3, -1.2, 4.5, 0.01]);
        let score = cosine_similarity(&v, &v).unwrap();
        assert!((score - 1.0).abs() < TOLERANCE, "got {score}");
    }

    #[test]
    fn test_similarity_is_symmetric() {
        let a = floats(&[1.0, 2.0, 3.0]);
        let b = floats(&[-0.5, 0.25, 1.75]);
        let ab = cosine_similarity(&a, &b).unwrap();
        let ba = cosine_similarity(&b, &a).unwrap();
        assert!((ab - ba).abs() < TOLERANCE);
    }

    #[test]
    fn test_orthogonal_vectors_score_zero() {
        let a = floats(&[1.0, 0.0]);
        let b = floats(&[0.0, 1.0]);
        let score = cosine_similarity(&a, &b).unwrap();
        assert!(score.abs() < TOLERANCE);
    }

    #[test]
    fn test_opposite_vectors_score_negative_one() {
        let a = floats(&[1.0, 0.0]);
        let b = floats(&[-1.0, 0.0]);
        let score = cosine_similarity(&a, &b).unwrap();
        assert!((score + 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_magnitude_does_not_affect_score() {
        let a = floats(&[1.0, 2.0]);
        let b = floats(&[10.0, 20.0]);
        let score = cosine_similarity(&a, &b).unwrap();
        assert!((score - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_dimension_mismatch_is_rejected() {
        let a = floats(&[1.0, 2.0, 3.0]);
        let b = floats(&[1.0, 2.0]);
        assert_eq!(
            cosine_similarity(&a, &b),
            Err(MatchError::DimensionMismatch { left: 3, right: 2 })
        );
    }

    #[test]
    fn test_empty_vector_is_rejected() {
        let a = floats(&[]);
        let b = floats(&[1.0]);
        assert_eq!(cosine_similarity(&a, &b), Err(MatchError::EmptyVector));
    }

    #[test]
    fn test_zero_norm_vector_is_rejected_not_nan() {
        let a = floats(&[0.0, 0.0]);
        let b = floats(&[1.0, 1.0]);
        assert_eq!(cosine_similarity(&a, &b), Err(MatchError::ZeroNormVector));
    }

    #[test]
    fn test_decimal_vector_scores_same_as_float_vector() {
        let query = floats(&[0.5, -0.25, 0.75]);
        let as_floats = floats(&[0.1, 0.9, -0.3]);
        let as_decimals = decimals(&["0.1", "0.9", "-0.3"]);

        let float_score = cosine_similarity(&query, &as_floats).unwrap();
        let decimal_score = cosine_similarity(&query, &as_decimals).unwrap();
        assert!((float_score - decimal_score).abs() < TOLERANCE);
    }

    #[test]
    fn test_mixed_representation_within_one_vector() {
        let a = vec![
            EmbeddingValue::Float(0.5),
            EmbeddingValue::Decimal("0.5".to_string()),
        ];
        let score = cosine_similarity(&a, &a).unwrap();
        assert!((score - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_non_numeric_element_is_rejected() {
        let a = floats(&[1.0, 2.0]);
        let b = decimals(&["1.0", "not-a-number"]);
        assert_eq!(
            cosine_similarity(&a, &b),
            Err(MatchError::NonNumericElement("not-a-number".to_string()))
        );
    }

    #[test]
    fn test_nan_decimal_string_is_rejected() {
        let a = floats(&[1.0, 2.0]);
        let b = decimals(&["1.0", "NaN"]);
        assert!(matches!(
            cosine_similarity(&a, &b),
            Err(MatchError::NonNumericElement(_))
        ));
    }
}
