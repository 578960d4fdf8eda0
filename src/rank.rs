//! Relevance ranking of candidate batches.
//!
//! The store-side predicate over-fetches by design. This module recomputes a
//! true fuzzy score per candidate and drops everything under the selected
//! level's threshold.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::distance::similarity;
use crate::document::CandidateRecord;
use crate::normalize::normalize;

/// Word-overlap bonus weight.
const WORD_BONUS: f64 = 0.2;

/// A candidate record with its computed relevance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredResult {
    /// The underlying record, copied from the candidate batch.
    pub record: CandidateRecord,
    /// Heuristic relevance in [0, 1] plus word-overlap bonus; see
    /// [`field_score`] for why this may exceed 1.0.
    pub relevance_score: f64,
    /// The field that produced the winning score, if the result was ranked.
    pub matched_field: Option<String>,
}

/// Score a single normalized field value against the normalized term.
///
/// Base score: 1.0 for equality, 0.9 for a prefix match, 0.7 for substring
/// containment, otherwise the Levenshtein similarity ratio. On top of that,
/// a word-overlap bonus of `0.2 * matched_words / term_words` is added with
/// NO ceiling at 1.0. The unclamped sum is a deliberate quirk of the scoring
/// scheme: clamping would silently reorder results against the established
/// ranking behavior, so callers compare the raw sum to their threshold.
pub fn field_score(norm_term: &str, norm_value: &str) -> f64 {
    let base = if norm_value == norm_term {
        1.0
    } else if norm_value.starts_with(norm_term) {
        0.9
    } else if norm_value.contains(norm_term) {
        0.7
    } else {
        similarity(norm_term, norm_value)
    };

    let words: Vec<&str> = norm_term.split_whitespace().collect();
    if words.is_empty() {
        return base;
    }
    let matched = words.iter().filter(|word| norm_value.contains(*word)).count();

    base + WORD_BONUS * matched as f64 / words.len() as f64
}

/// Score each candidate against `term` over the target fields, drop those
/// below `threshold`, and sort the survivors by descending score.
///
/// A candidate's score is the maximum field score across `fields`; the first
/// field to reach that maximum is recorded as `matched_field`. Fields that
/// are missing, non-text, or empty are skipped, not zero-scored. The sort is
/// stable: candidates with equal scores keep their retrieval order.
pub fn score_and_filter(
    candidates: Vec<CandidateRecord>,
    term: &str,
    fields: &[String],
    threshold: f64,
    fold_accents: bool,
) -> Vec<ScoredResult> {
    let norm_term = normalize(term, fold_accents);

    let mut results = Vec::new();
    for record in candidates {
        let mut best: Option<(f64, String)> = None;
        for field in fields {
            let Some(value) = record.text(field) else {
                continue;
            };
            if value.is_empty() {
                continue;
            }

            let norm_value = normalize(value, fold_accents);
            let score = field_score(&norm_term, &norm_value);
            let replace = match &best {
                Some((current, _)) => score > *current,
                None => true,
            };
            if replace {
                best = Some((score, field.clone()));
            }
        }

        if let Some((score, field)) = best {
            if score >= threshold {
                results.push(ScoredResult {
                    record,
                    relevance_score: score,
                    matched_field: Some(field),
                });
            }
        }
    }

    results.sort_by(|a, b| {
        b.relevance_score
            .partial_cmp(&a.relevance_score)
            .unwrap_or(Ordering::Equal)
    });
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name_record(name: &str) -> CandidateRecord {
        CandidateRecord::builder().text("name", name).build()
    }

    fn name_field() -> Vec<String> {
        vec!["name".to_string()]
    }

    #[test]
    fn test_field_score_tiers() {
        // equality beats prefix beats substring
        let eq = field_score("nguyen", "nguyen");
        let prefix = field_score("nguyen", "nguyen van a");
        let substring = field_score("nguyen", "mr nguyen van");
        assert!(eq > prefix);
        assert!(prefix > substring);
        // single-word term always matches itself as a word: bonus included
        assert!((eq - 1.2).abs() < 1e-9);
        assert!((prefix - 1.1).abs() < 1e-9);
        assert!((substring - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_field_score_can_exceed_one() {
        // Unclamped by design.
        assert!(field_score("nguyen van", "nguyen van a") > 1.0);
    }

    #[test]
    fn test_word_bonus_is_partial() {
        // "van" matches, "nguyen" does not; distance-based base plus half bonus
        let score = field_score("nguyen van", "tran van c");
        let base = similarity("nguyen van", "tran van c");
        assert!((score - (base + 0.1)).abs() < 1e-9);
    }

    #[test]
    fn test_score_and_filter_threshold_and_order() {
        let candidates = vec![
            name_record("Tran Van C"),
            name_record("Nguyễn Văn A"),
            name_record("Nguyen Thi B"),
        ];
        let results = score_and_filter(candidates, "nguyen van", &name_field(), 0.5, true);

        let names: Vec<_> = results
            .iter()
            .map(|r| r.record.text("name").unwrap())
            .collect();
        assert_eq!(names, vec!["Nguyễn Văn A", "Nguyen Thi B"]);
        assert!(results.iter().all(|r| r.relevance_score >= 0.5));
        assert_eq!(results[0].matched_field.as_deref(), Some("name"));
    }

    #[test]
    fn test_raising_threshold_never_grows_results() {
        let candidates = vec![
            name_record("Nguyễn Văn A"),
            name_record("Nguyen Thi B"),
            name_record("Tran Van C"),
            name_record("Pham Quang D"),
        ];
        let mut previous = usize::MAX;
        for threshold in [0.0, 0.3, 0.5, 0.8, 1.0, 1.2] {
            let results = score_and_filter(
                candidates.clone(),
                "nguyen van",
                &name_field(),
                threshold,
                true,
            );
            assert!(results.len() <= previous);
            previous = results.len();
        }
    }

    #[test]
    fn test_missing_and_non_text_fields_are_skipped() {
        let with_name = CandidateRecord::builder()
            .text("name", "nguyen")
            .integer("code", 7)
            .build();
        let without_name = CandidateRecord::builder().integer("code", 7).build();
        let empty_name = CandidateRecord::builder().text("name", "").build();

        let results = score_and_filter(
            vec![with_name, without_name, empty_name],
            "nguyen",
            &["name".to_string(), "code".to_string()],
            0.0,
            true,
        );
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].matched_field.as_deref(), Some("name"));
    }

    #[test]
    fn test_best_field_wins_and_first_field_breaks_ties() {
        let record = CandidateRecord::builder()
            .text("alias", "nguyen")
            .text("name", "totally different")
            .build();
        let fields = vec!["name".to_string(), "alias".to_string()];
        let results = score_and_filter(vec![record], "nguyen", &fields, 0.5, true);
        assert_eq!(results[0].matched_field.as_deref(), Some("alias"));

        // identical values on both fields: the first listed field is tagged
        let tie = CandidateRecord::builder()
            .text("name", "nguyen")
            .text("alias", "nguyen")
            .build();
        let results = score_and_filter(vec![tie], "nguyen", &fields, 0.5, true);
        assert_eq!(results[0].matched_field.as_deref(), Some("name"));
    }

    #[test]
    fn test_stable_order_for_equal_scores() {
        let candidates = vec![
            name_record("nguyen x"),
            name_record("nguyen y"),
            name_record("nguyen z"),
        ];
        let results = score_and_filter(candidates, "nguyen", &name_field(), 0.0, true);
        let names: Vec<_> = results
            .iter()
            .map(|r| r.record.text("name").unwrap())
            .collect();
        // all three are prefix matches with identical scores
        assert_eq!(names, vec!["nguyen x", "nguyen y", "nguyen z"]);
    }

    #[test]
    fn test_accent_folding_controls_matching() {
        let candidates = vec![name_record("Nguyễn Văn A")];
        let folded =
            score_and_filter(candidates.clone(), "nguyen van a", &name_field(), 0.95, true);
        assert_eq!(folded.len(), 1);
        assert!((folded[0].relevance_score - 1.2).abs() < 1e-9);

        let unfolded = score_and_filter(candidates, "nguyen van a", &name_field(), 0.95, false);
        assert!(unfolded.is_empty());
    }
}
