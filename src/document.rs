//! Candidate record model for store results.
//!
//! Records fetched from the document store are schema-less field maps. The
//! fuzzy layer only interprets text fields; every other value type is
//! carried opaquely for the caller.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Represents a value for a field in a candidate record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// String data, the only type the fuzzy layer scores.
    Text(String),
    /// 64-bit signed integer.
    Integer(i64),
    /// 64-bit floating-point number.
    Float(f64),
    /// true/false value.
    Boolean(bool),
    /// Explicit null.
    Null,
}

impl FieldValue {
    /// Get the value as text, if it is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as an integer, if it is an integer value.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Get the value as a float. Integer values are widened.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            FieldValue::Float(f) => Some(*f),
            FieldValue::Integer(n) => Some(*n as f64),
            _ => None,
        }
    }

    /// Get the value as a boolean, if it is a boolean value.
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            FieldValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Check if the value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Render the value as comparison text for store-side predicates.
    /// Null has no textual form and never matches.
    pub fn comparison_text(&self) -> Option<String> {
        match self {
            FieldValue::Text(s) => Some(s.clone()),
            FieldValue::Integer(n) => Some(n.to_string()),
            FieldValue::Float(f) => Some(f.to_string()),
            FieldValue::Boolean(b) => Some(b.to_string()),
            FieldValue::Null => None,
        }
    }
}

/// A raw record returned by the document store.
///
/// Candidate records are transient read-only snapshots fetched per request;
/// the fuzzy layer never mutates them in place, it copies them into scored
/// wrappers.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CandidateRecord {
    /// The field values for this record.
    fields: HashMap<String, FieldValue>,
}

impl CandidateRecord {
    /// Create a new empty record.
    pub fn new() -> Self {
        CandidateRecord {
            fields: HashMap::new(),
        }
    }

    /// Create a builder for ergonomic record construction.
    pub fn builder() -> CandidateRecordBuilder {
        CandidateRecordBuilder {
            record: CandidateRecord::new(),
        }
    }

    /// Add a field value to the record.
    pub fn add_field<S: Into<String>>(&mut self, name: S, value: FieldValue) {
        self.fields.insert(name.into(), value);
    }

    /// Get a field value from the record.
    pub fn get_field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Check if the record has a field.
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Remove a field from the record.
    pub fn remove_field(&mut self, name: &str) -> Option<FieldValue> {
        self.fields.remove(name)
    }

    /// Get the text content of a field, if present and textual.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(|v| v.as_text())
    }

    /// Get all field names.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.keys().map(|s| s.as_str()).collect()
    }

    /// Get all field values.
    pub fn fields(&self) -> &HashMap<String, FieldValue> {
        &self.fields
    }

    /// Number of fields on the record.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Copy of this record retaining only the named fields.
    pub fn project(&self, select: &[String]) -> CandidateRecord {
        let fields = select
            .iter()
            .filter_map(|name| {
                self.fields
                    .get(name)
                    .map(|value| (name.clone(), value.clone()))
            })
            .collect();
        CandidateRecord { fields }
    }
}

/// Builder for [`CandidateRecord`].
#[derive(Debug)]
pub struct CandidateRecordBuilder {
    record: CandidateRecord,
}

impl CandidateRecordBuilder {
    /// Add a text field.
    pub fn text<N: Into<String>, V: Into<String>>(mut self, name: N, value: V) -> Self {
        self.record.add_field(name, FieldValue::Text(value.into()));
        self
    }

    /// Add an integer field.
    pub fn integer<N: Into<String>>(mut self, name: N, value: i64) -> Self {
        self.record.add_field(name, FieldValue::Integer(value));
        self
    }

    /// Add a float field.
    pub fn float<N: Into<String>>(mut self, name: N, value: f64) -> Self {
        self.record.add_field(name, FieldValue::Float(value));
        self
    }

    /// Add a boolean field.
    pub fn boolean<N: Into<String>>(mut self, name: N, value: bool) -> Self {
        self.record.add_field(name, FieldValue::Boolean(value));
        self
    }

    /// Finish building the record.
    pub fn build(self) -> CandidateRecord {
        self.record
    }
}
