//! In-memory document store implementation for testing and demos.

use std::cmp::Ordering;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use regex::RegexBuilder;

use crate::document::{CandidateRecord, FieldValue};
use crate::error::{Result, TimkiemError};
use crate::store::predicate::{FindOptions, Predicate, SortDirection};
use crate::store::DocumentStore;

/// An in-memory [`DocumentStore`].
///
/// Evaluates predicates the way a regex-capable store adapter would: literal
/// patterns are escaped and compiled with the case-insensitivity flag from
/// the clause. `populate` is accepted and ignored, there are no relations to
/// expand in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Arc<RwLock<Vec<CandidateRecord>>>,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        MemoryStore {
            records: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Create a store pre-populated with the given records.
    pub fn with_records(records: Vec<CandidateRecord>) -> Self {
        MemoryStore {
            records: Arc::new(RwLock::new(records)),
        }
    }

    /// Insert a record.
    pub fn insert(&self, record: CandidateRecord) {
        self.records.write().expect("record lock poisoned").push(record);
    }

    /// Insert a batch of records.
    pub fn insert_all(&self, records: impl IntoIterator<Item = CandidateRecord>) {
        self.records
            .write()
            .expect("record lock poisoned")
            .extend(records);
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.read().expect("record lock poisoned").len()
    }

    /// Check if the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn matches(record: &CandidateRecord, predicate: &Predicate) -> Result<bool> {
        match predicate {
            Predicate::Empty => Ok(true),
            Predicate::Equals {
                field,
                value,
                case_insensitive,
            } => {
                let Some(stored) = record.get_field(field).and_then(FieldValue::comparison_text)
                else {
                    return Ok(false);
                };
                if *case_insensitive {
                    Ok(stored.to_lowercase() == value.to_lowercase())
                } else {
                    Ok(stored == *value)
                }
            }
            Predicate::Contains {
                field,
                pattern,
                case_insensitive,
            } => {
                let Some(stored) = record.get_field(field).and_then(FieldValue::comparison_text)
                else {
                    return Ok(false);
                };
                let regex = RegexBuilder::new(&regex::escape(pattern))
                    .case_insensitive(*case_insensitive)
                    .build()
                    .map_err(|e| TimkiemError::query(e.to_string()))?;
                Ok(regex.is_match(&stored))
            }
            Predicate::And(parts) => {
                for part in parts {
                    if !Self::matches(record, part)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Predicate::Or(parts) => {
                for part in parts {
                    if Self::matches(record, part)? {
                        return Ok(true);
                    }
                }
                // An empty disjunction constrains nothing.
                Ok(parts.is_empty())
            }
        }
    }

    fn compare_values(a: Option<&FieldValue>, b: Option<&FieldValue>) -> Ordering {
        match (a, b) {
            (None, None) => Ordering::Equal,
            // Records missing the sort field order last.
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => match (a, b) {
                (FieldValue::Text(x), FieldValue::Text(y)) => x.cmp(y),
                (FieldValue::Boolean(x), FieldValue::Boolean(y)) => x.cmp(y),
                _ => match (a.as_float(), b.as_float()) {
                    (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
                    _ => Ordering::Equal,
                },
            },
        }
    }

    fn sort_records(records: &mut [CandidateRecord], sort: &[(String, SortDirection)]) {
        if sort.is_empty() {
            return;
        }
        records.sort_by(|a, b| {
            for (field, direction) in sort {
                let ordering = Self::compare_values(a.get_field(field), b.get_field(field));
                let ordering = match direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                };
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            Ordering::Equal
        });
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find(
        &self,
        predicate: &Predicate,
        options: &FindOptions,
    ) -> Result<Vec<CandidateRecord>> {
        if let Some(spec) = &options.populate {
            tracing::trace!(spec = %spec, "populate ignored by memory store");
        }

        let records = self.records.read().expect("record lock poisoned");
        let mut matched = Vec::new();
        for record in records.iter() {
            if Self::matches(record, predicate)? {
                matched.push(record.clone());
            }
        }
        drop(records);

        Self::sort_records(&mut matched, &options.sort);

        let skip = options.skip.unwrap_or(0) as usize;
        let mut page: Vec<CandidateRecord> = if skip >= matched.len() {
            Vec::new()
        } else {
            matched.split_off(skip)
        };
        if let Some(limit) = options.limit {
            page.truncate(limit as usize);
        }

        if let Some(select) = &options.select {
            page = page.iter().map(|record| record.project(select)).collect();
        }

        tracing::debug!(hits = page.len(), "memory store find");
        Ok(page)
    }

    async fn count_documents(&self, predicate: &Predicate) -> Result<u64> {
        let records = self.records.read().expect("record lock poisoned");
        let mut count = 0u64;
        for record in records.iter() {
            if Self::matches(record, predicate)? {
                count += 1;
            }
        }
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> MemoryStore {
        MemoryStore::with_records(vec![
            CandidateRecord::builder()
                .text("name", "Nguyễn Văn A")
                .integer("age", 30)
                .build(),
            CandidateRecord::builder()
                .text("name", "Nguyen Thi B")
                .integer("age", 25)
                .build(),
            CandidateRecord::builder()
                .text("name", "Tran Van C")
                .integer("age", 40)
                .build(),
        ])
    }

    fn contains(field: &str, pattern: &str) -> Predicate {
        Predicate::Contains {
            field: field.to_string(),
            pattern: pattern.to_string(),
            case_insensitive: true,
        }
    }

    #[tokio::test]
    async fn test_find_empty_predicate_returns_all() {
        let store = store();
        let all = store
            .find(&Predicate::Empty, &FindOptions::new())
            .await
            .unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_contains_is_case_insensitive_but_not_accent_folding() {
        let store = store();
        let hits = store
            .find(&contains("name", "nguyen"), &FindOptions::new())
            .await
            .unwrap();
        // "Nguyễn Văn A" does not match: the store has no accent folding,
        // that is the query builder's job via the folded pattern variant.
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].text("name"), Some("Nguyen Thi B"));
    }

    #[tokio::test]
    async fn test_case_sensitive_contains() {
        let store = store();
        let predicate = Predicate::Contains {
            field: "name".to_string(),
            pattern: "nguyen".to_string(),
            case_insensitive: false,
        };
        let hits = store.find(&predicate, &FindOptions::new()).await.unwrap();
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn test_equals_on_numeric_rendering() {
        let store = store();
        let predicate = Predicate::Equals {
            field: "age".to_string(),
            value: "25".to_string(),
            case_insensitive: false,
        };
        assert_eq!(store.count_documents(&predicate).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_missing_field_never_matches() {
        let store = store();
        let hits = store
            .find(&contains("email", "a"), &FindOptions::new())
            .await
            .unwrap();
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn test_regex_metacharacters_are_literal() {
        let store = MemoryStore::with_records(vec![
            CandidateRecord::builder().text("name", "a.c corp").build(),
            CandidateRecord::builder().text("name", "abc corp").build(),
        ]);
        let hits = store
            .find(&contains("name", "a.c"), &FindOptions::new())
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].text("name"), Some("a.c corp"));
    }

    #[tokio::test]
    async fn test_sort_skip_limit_projection() {
        let store = store();
        let options = FindOptions::new()
            .sort_by("age", SortDirection::Desc)
            .skip(1)
            .limit(1)
            .select(vec!["name".to_string()]);
        let hits = store.find(&Predicate::Empty, &options).await.unwrap();
        assert_eq!(hits.len(), 1);
        // ages desc: 40, 30, 25 -> skip 1 -> 30
        assert_eq!(hits[0].text("name"), Some("Nguyễn Văn A"));
        assert!(!hits[0].has_field("age"));
    }

    #[tokio::test]
    async fn test_and_or_composition() {
        let store = store();
        let predicate = Predicate::and(vec![
            Predicate::or(vec![contains("name", "nguyen"), contains("name", "nguyễn")]),
            Predicate::Equals {
                field: "age".to_string(),
                value: "30".to_string(),
                case_insensitive: false,
            },
        ]);
        let hits = store.find(&predicate, &FindOptions::new()).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].text("name"), Some("Nguyễn Văn A"));
    }

    #[tokio::test]
    async fn test_skip_past_end() {
        let store = store();
        let hits = store
            .find(&Predicate::Empty, &FindOptions::new().skip(10))
            .await
            .unwrap();
        assert!(hits.is_empty());
    }
}
