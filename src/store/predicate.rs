//! Declarative predicate and find-option structures for the store boundary.
//!
//! The fuzzy layer cannot push edit distance down to the store, so it speaks
//! the small predicate language every candidate store understands: equality,
//! substring containment, conjunction, and disjunction. Adapters translate
//! this structure into their native query syntax (e.g. `$regex`/`$or` for a
//! MongoDB-backed store).

use serde::{Deserialize, Serialize};

/// A store-executable filter over record fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Predicate {
    /// No constraint; matches every record.
    Empty,
    /// Exact equality on a field's textual rendering.
    Equals {
        /// Field to compare.
        field: String,
        /// Expected value.
        value: String,
        /// Whether comparison ignores case.
        case_insensitive: bool,
    },
    /// Substring containment on a field's textual rendering.
    Contains {
        /// Field to scan.
        field: String,
        /// Literal pattern; adapters must escape it for regex-based stores.
        pattern: String,
        /// Whether matching ignores case.
        case_insensitive: bool,
    },
    /// All sub-predicates must match.
    And(Vec<Predicate>),
    /// At least one sub-predicate must match.
    Or(Vec<Predicate>),
}

impl Predicate {
    /// Check whether this predicate imposes no constraint.
    pub fn is_empty(&self) -> bool {
        match self {
            Predicate::Empty => true,
            Predicate::And(parts) | Predicate::Or(parts) => parts.iter().all(|p| p.is_empty()),
            _ => false,
        }
    }

    /// Conjunction of the given parts. Empty operands are dropped and a
    /// single survivor is returned unwrapped.
    pub fn and(parts: Vec<Predicate>) -> Predicate {
        Self::combine(parts, Predicate::And)
    }

    /// Disjunction of the given parts, with the same flattening rules as
    /// [`Predicate::and`].
    pub fn or(parts: Vec<Predicate>) -> Predicate {
        Self::combine(parts, Predicate::Or)
    }

    fn combine(parts: Vec<Predicate>, wrap: fn(Vec<Predicate>) -> Predicate) -> Predicate {
        let mut parts: Vec<Predicate> = parts.into_iter().filter(|p| !p.is_empty()).collect();
        match parts.len() {
            0 => Predicate::Empty,
            1 => parts.pop().unwrap(),
            _ => wrap(parts),
        }
    }
}

impl Default for Predicate {
    fn default() -> Self {
        Predicate::Empty
    }
}

/// Sort direction for a find call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    /// Ascending order.
    Asc,
    /// Descending order.
    Desc,
}

/// Options for a single `find` call, passed declaratively in one piece.
///
/// There is no hidden builder state: the struct is assembled up front and
/// handed to the store adapter once per call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FindOptions {
    /// Fields to project; `None` returns whole records.
    pub select: Option<Vec<String>>,
    /// Sort keys applied in order.
    pub sort: Vec<(String, SortDirection)>,
    /// Number of records to skip.
    pub skip: Option<u64>,
    /// Maximum number of records to return.
    pub limit: Option<u64>,
    /// Relation expansion spec, passed through to adapters that support it.
    pub populate: Option<String>,
}

impl FindOptions {
    /// Create options with no projection, sort, or paging.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the projected field list.
    pub fn select(mut self, fields: Vec<String>) -> Self {
        self.select = Some(fields);
        self
    }

    /// Append a sort key.
    pub fn sort_by<S: Into<String>>(mut self, field: S, direction: SortDirection) -> Self {
        self.sort.push((field.into(), direction));
        self
    }

    /// Set the number of records to skip.
    pub fn skip(mut self, skip: u64) -> Self {
        self.skip = Some(skip);
        self
    }

    /// Set the maximum number of records to return.
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the relation expansion spec.
    pub fn populate<S: Into<String>>(mut self, spec: S) -> Self {
        self.populate = Some(spec.into());
        self
    }
}
