//! Top-N ranking of candidate records against one query embedding.

use serde::Serialize;
use tracing::{debug, warn};

use crate::matching::{cosine_similarity, MatchError};
use crate::models::record::Record;

/// Tunables for a single ranking call.
#[derive(Debug, Clone, Copy)]
pub struct MatchParams {
    pub top_n: usize,
    pub similarity_threshold: f64,
}

impl Default for MatchParams {
    fn default() -> Self {
        Self {
            top_n: 5,
            similarity_threshold: 0.3,
        }
    }
}

/// A candidate that survived filtering, paired with its score.
///
/// Borrows the full original record so callers can render every field of
/// the matched document, not just an identifier.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredMatch<'a> {
    pub record: &'a Record,
    pub score: f64,
}

/// Scores every candidate against the query embedding, drops candidates
/// below `similarity_threshold`, sorts descending, and returns the top N.
///
/// Partial-failure policy: a candidate that is malformed (no embedding,
/// empty embedding) or that fails scoring (dimension mismatch, zero norm,
/// bad numeric data) is logged and skipped — one bad record never aborts
/// the batch. Only a query without a usable embedding fails the whole call,
/// since that is a contract violation by the caller rather than bad data
/// among many.
///
/// Ties are broken by input order: the sort is stable and no secondary key
/// is applied.
pub fn find_top_matches<'a>(
    query: &Record,
    candidates: &'a [Record],
    params: MatchParams,
) -> Result<Vec<ScoredMatch<'a>>, MatchError> {
    let query_embedding = match query.embedding.as_deref() {
        Some(e) if !e.is_empty() => e,
        _ => return Err(MatchError::MissingEmbedding),
    };

    let mut scored: Vec<ScoredMatch<'a>> = Vec::new();

    for candidate in candidates {
        let embedding = match candidate.embedding.as_deref() {
            Some(e) if !e.is_empty() => e,
            _ => {
                debug!("skipping candidate {}: no embedding", candidate.id);
                continue;
            }
        };

        let score = match cosine_similarity(query_embedding, embedding) {
            Ok(score) => score,
            Err(e) => {
                warn!("skipping candidate {}: {e}", candidate.id);
                continue;
            }
        };

        if score >= params.similarity_threshold {
            scored.push(ScoredMatch {
                record: candidate,
                score,
            });
        }
    }

    // Scores are guaranteed non-NaN here (cosine_similarity rejects the
    // inputs that would produce one), and Vec::sort_by is stable.
    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    scored.truncate(params.top_n);

    Ok(scored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::{EmbeddingValue, RecordKind};
    use serde_json::json;

    fn candidate(id: &str, embedding: Option<Vec<f64>>) -> Record {
        let mut record = Record::new(RecordKind::Resume);
        record.id = id.to_string();
        record.embedding =
            embedding.map(|e| e.into_iter().map(EmbeddingValue::Float).collect());
        record.set_field("name", json!(format!("Candidate {id}")));
        record
    }

    fn query(embedding: Option<Vec<f64>>) -> Record {
        let mut record = Record::new(RecordKind::JobDescription);
        record.embedding =
            embedding.map(|e| e.into_iter().map(EmbeddingValue::Float).collect());
        record
    }

    fn params(top_n: usize, threshold: f64) -> MatchParams {
        MatchParams {
            top_n,
            similarity_threshold: threshold,
        }
    }

    #[test]
    fn test_default_params_match_reference_values() {
        let defaults = MatchParams::default();
        assert_eq!(defaults.top_n, 5);
        assert!((defaults.similarity_threshold - 0.3).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_candidate_list_returns_empty_not_error() {
        let matches =
            find_top_matches(&query(Some(vec![1.0, 0.0])), &[], MatchParams::default()).unwrap();
        assert!(matches.is_empty());
    }

    #[test]
    fn test_query_without_embedding_fails_the_call() {
        let candidates = vec![candidate("a", Some(vec![1.0, 0.0]))];
        let result = find_top_matches(&query(None), &candidates, MatchParams::default());
        assert_eq!(result.unwrap_err(), MatchError::MissingEmbedding);
    }

    #[test]
    fn test_query_with_empty_embedding_fails_the_call() {
        let candidates = vec![candidate("a", Some(vec![1.0, 0.0]))];
        let result = find_top_matches(&query(Some(vec![])), &candidates, MatchParams::default());
        assert_eq!(result.unwrap_err(), MatchError::MissingEmbedding);
    }

    #[test]
    fn test_malformed_candidates_are_skipped_not_fatal() {
        let candidates = vec![
            candidate("a", Some(vec![1.0, 0.0])),
            candidate("b", None),
            candidate("c", Some(vec![])),
            candidate("d", Some(vec![0.0, 1.0])),
        ];
        let matches =
            find_top_matches(&query(Some(vec![1.0, 0.0])), &candidates, params(5, 0.0)).unwrap();

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].record.id, "a"); // highest score first
        assert_eq!(matches[1].record.id, "d");
    }

    #[test]
    fn test_scoring_failure_skips_only_the_offending_candidate() {
        let candidates = vec![
            candidate("mismatched", Some(vec![1.0, 0.0, 0.0])),
            candidate("zero-norm", Some(vec![0.0, 0.0])),
            candidate("ok", Some(vec![1.0, 0.0])),
        ];
        let matches =
            find_top_matches(&query(Some(vec![1.0, 0.0])), &candidates, params(5, 0.0)).unwrap();

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].record.id, "ok");
    }

    #[test]
    fn test_threshold_excludes_strictly_lower_scores() {
        let candidates = vec![
            candidate("aligned", Some(vec![1.0, 0.0])),
            candidate("opposed", Some(vec![-1.0, 0.0])),
        ];
        let matches =
            find_top_matches(&query(Some(vec![1.0, 0.0])), &candidates, params(5, 0.5)).unwrap();

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].record.id, "aligned");
        assert!((matches[0].score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_score_exactly_at_threshold_is_kept() {
        // Orthogonal pair scores exactly 0.0
        let candidates = vec![candidate("orthogonal", Some(vec![0.0, 1.0]))];
        let matches =
            find_top_matches(&query(Some(vec![1.0, 0.0])), &candidates, params(5, 0.0)).unwrap();
        assert_eq!(matches.len(), 1);
    }

    #[test]
    fn test_top_n_truncation_keeps_highest_scores() {
        // Ten candidates at increasing angles from the query; higher index
        // means lower similarity.
        let candidates: Vec<Record> = (0..10)
            .map(|i| {
                let angle = i as f64 * 0.15;
                candidate(&format!("c{i}"), Some(vec![angle.cos(), angle.sin()]))
            })
            .collect();

        let matches =
            find_top_matches(&query(Some(vec![1.0, 0.0])), &candidates, params(5, 0.0)).unwrap();

        assert_eq!(matches.len(), 5);
        let ids: Vec<&str> = matches.iter().map(|m| m.record.id.as_str()).collect();
        assert_eq!(ids, vec!["c0", "c1", "c2", "c3", "c4"]);
    }

    #[test]
    fn test_equal_scores_preserve_input_order() {
        // Both candidates are the same direction as the query → score 1.0.
        let candidates = vec![
            candidate("first", Some(vec![2.0, 0.0])),
            candidate("second", Some(vec![5.0, 0.0])),
        ];
        let matches =
            find_top_matches(&query(Some(vec![1.0, 0.0])), &candidates, params(5, 0.0)).unwrap();

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].record.id, "first");
        assert_eq!(matches[1].record.id, "second");
    }

    #[test]
    fn test_results_sorted_descending_by_score() {
        let candidates = vec![
            candidate("low", Some(vec![0.2, 1.0])),
            candidate("high", Some(vec![1.0, 0.1])),
            candidate("mid", Some(vec![1.0, 1.0])),
        ];
        let matches =
            find_top_matches(&query(Some(vec![1.0, 0.0])), &candidates, params(5, 0.0)).unwrap();

        let ids: Vec<&str> = matches.iter().map(|m| m.record.id.as_str()).collect();
        assert_eq!(ids, vec!["high", "mid", "low"]);
        assert!(matches.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_match_carries_full_original_record() {
        let mut resume = candidate("a", Some(vec![1.0, 0.0]));
        resume.set_field("skills", json!(["Rust", "PostgreSQL"]));
        resume.set_field("contact", json!({"email": "a@example.com"}));

        let candidates = vec![resume];
        let matches =
            find_top_matches(&query(Some(vec![1.0, 0.0])), &candidates, params(5, 0.0)).unwrap();

        let record = matches[0].record;
        assert_eq!(record.field("skills").unwrap(), &json!(["Rust", "PostgreSQL"]));
        assert_eq!(
            record.field("contact").unwrap()["email"],
            json!("a@example.com")
        );
    }

    #[test]
    fn test_inputs_are_not_mutated() {
        let candidates = vec![candidate("a", Some(vec![1.0, 0.0]))];
        let q = query(Some(vec![1.0, 0.0]));
        let before = serde_json::to_string(&candidates).unwrap();

        find_top_matches(&q, &candidates, MatchParams::default()).unwrap();
        assert_eq!(serde_json::to_string(&candidates).unwrap(), before);
    }

    #[test]
    fn test_decimal_candidate_ranks_like_float_candidate() {
        let mut decimal = candidate("decimal", None);
        decimal.embedding = Some(vec![
            crate::models::record::EmbeddingValue::Decimal("0.6".to_string()),
            crate::models::record::EmbeddingValue::Decimal("0.8".to_string()),
        ]);
        let float = candidate("float", Some(vec![0.6, 0.8]));

        let candidates = vec![decimal, float];
        let matches =
            find_top_matches(&query(Some(vec![0.6, 0.8])), &candidates, params(5, 0.0)).unwrap();

        assert_eq!(matches.len(), 2);
        assert!((matches[0].score - matches[1].score).abs() < 1e-9);
    }
}
