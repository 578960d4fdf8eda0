//! Fuzzy level presets controlling match strictness.

use std::collections::HashMap;

use lazy_static::lazy_static;
use serde::Serialize;

use crate::distance::levenshtein_within;

/// A named fuzzy-matching configuration.
///
/// `threshold` is the minimum relevance score a candidate must reach to
/// survive the rerank pass; `max_distance` is the edit-distance cap for
/// callers that gate by distance instead of ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FuzzyLevel {
    /// Minimum relevance score in [0, 1].
    pub threshold: f64,
    /// Maximum tolerated edit distance.
    pub max_distance: usize,
    /// Human-readable description of the preset.
    pub description: &'static str,
}

/// Near-exact matching; tolerates a single edit.
pub const STRICT: FuzzyLevel = FuzzyLevel {
    threshold: 0.8,
    max_distance: 1,
    description: "near-exact matching, one edit tolerated",
};

/// Balanced default for typo-tolerant search.
pub const NORMAL: FuzzyLevel = FuzzyLevel {
    threshold: 0.5,
    max_distance: 2,
    description: "balanced typo-tolerant matching",
};

/// Broad matching for exploratory queries.
pub const LOOSE: FuzzyLevel = FuzzyLevel {
    threshold: 0.3,
    max_distance: 3,
    description: "broad matching for exploratory queries",
};

lazy_static! {
    static ref LEVELS: HashMap<&'static str, FuzzyLevel> = {
        let mut map = HashMap::new();
        map.insert("strict", STRICT);
        map.insert("normal", NORMAL);
        map.insert("loose", LOOSE);
        map
    };
}

impl FuzzyLevel {
    /// Resolve a preset by name, case-insensitively.
    /// Unrecognized names fall back to [`NORMAL`].
    pub fn by_name(name: &str) -> FuzzyLevel {
        LEVELS
            .get(name.trim().to_lowercase().as_str())
            .copied()
            .unwrap_or(NORMAL)
    }

    /// Check whether two strings are within this level's edit-distance cap.
    pub fn is_within(&self, a: &str, b: &str) -> bool {
        levenshtein_within(a, b, self.max_distance).is_some()
    }
}

impl Default for FuzzyLevel {
    fn default() -> Self {
        NORMAL
    }
}
