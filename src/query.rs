//! Query builder: search term + target fields -> store predicate.
//!
//! The store cannot evaluate edit distance, so the builder emits a broad
//! disjunction of substring clauses that is guaranteed to be a superset of
//! the true fuzzy matches. The relevance ranker restores precision after
//! retrieval; the raw predicate alone is only trustworthy for
//! existence/count checks.

use serde::{Deserialize, Serialize};

use crate::normalize::fold_diacritics;
use crate::store::Predicate;

/// Options controlling predicate construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryOptions {
    /// Match case exactly instead of case-insensitively.
    pub case_sensitive: bool,
    /// Also match the accent-folded form of the term.
    pub fold_accents: bool,
    /// Require exact field equality instead of substring containment.
    pub exact_match: bool,
}

impl Default for QueryOptions {
    fn default() -> Self {
        QueryOptions {
            case_sensitive: false,
            fold_accents: true,
            exact_match: false,
        }
    }
}

/// Build the coarse store predicate for a search term over the given fields.
///
/// A blank term yields [`Predicate::Empty`] (no fuzzy constraint). With
/// `exact_match`, each field must equal the trimmed term. Otherwise each
/// field gets a containment clause per pattern variant: the trimmed term
/// verbatim and, when `fold_accents` actually changes it, its accent-folded
/// form. Multi-word variants additionally contribute one clause per word
/// longer than one character, so records containing only some of the words
/// still reach the ranker.
pub fn build_predicate(term: &str, fields: &[String], options: &QueryOptions) -> Predicate {
    let term = term.trim();
    if term.is_empty() {
        return Predicate::Empty;
    }

    let case_insensitive = !options.case_sensitive;

    if options.exact_match {
        return Predicate::or(
            fields
                .iter()
                .map(|field| Predicate::Equals {
                    field: field.clone(),
                    value: term.to_string(),
                    case_insensitive,
                })
                .collect(),
        );
    }

    let mut variants = vec![term.to_string()];
    if options.fold_accents {
        let folded = fold_diacritics(term);
        if folded != term {
            variants.push(folded);
        }
    }

    let mut clauses = Vec::new();
    for field in fields {
        for variant in &variants {
            clauses.push(Predicate::Contains {
                field: field.clone(),
                pattern: variant.clone(),
                case_insensitive,
            });

            let words: Vec<&str> = variant.split_whitespace().collect();
            if words.len() > 1 {
                for word in words {
                    if word.chars().count() > 1 {
                        clauses.push(Predicate::Contains {
                            field: field.clone(),
                            pattern: word.to_string(),
                            case_insensitive,
                        });
                    }
                }
            }
        }
    }

    Predicate::or(clauses)
}
