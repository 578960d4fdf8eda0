//! Search suggestion generation from candidate batches.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::distance::similarity;
use crate::document::CandidateRecord;
use crate::normalize::normalize;

/// Derive a deduplicated suggestion list from a candidate batch.
///
/// Collects every target-field value whose normalized form contains the
/// normalized term, plus each whitespace-delimited word of such values that
/// also contains it. Entries are deduplicated by exact stored value (case
/// and accents preserved), truncated to `limit`, then sorted by descending
/// similarity to the term.
///
/// Truncation happens BEFORE the final ranking, so an entry discovered late
/// in the batch can be cut even if it would have ranked higher than a
/// retained one. That imprecision is part of the contract; suggestion lists
/// are advisory.
pub fn suggest(
    candidates: &[CandidateRecord],
    term: &str,
    fields: &[String],
    limit: usize,
) -> Vec<String> {
    let norm_term = normalize(term, true);
    if norm_term.is_empty() {
        return Vec::new();
    }

    let mut seen = HashSet::new();
    let mut entries = Vec::new();
    for record in candidates {
        for field in fields {
            let Some(value) = record.text(field) else {
                continue;
            };
            if value.is_empty() || !normalize(value, true).contains(&norm_term) {
                continue;
            }

            if seen.insert(value.to_string()) {
                entries.push(value.to_string());
            }
            for word in value.split_whitespace() {
                if normalize(word, true).contains(&norm_term) && seen.insert(word.to_string()) {
                    entries.push(word.to_string());
                }
            }
        }
    }

    entries.truncate(limit);
    entries.sort_by(|a, b| {
        let sim_a = similarity(&norm_term, &normalize(a, true));
        let sim_b = similarity(&norm_term, &normalize(b, true));
        sim_b.partial_cmp(&sim_a).unwrap_or(Ordering::Equal)
    });
    entries
}
