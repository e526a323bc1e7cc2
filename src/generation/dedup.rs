//! First-occurrence tracking for templates
//!
//! Templates often walk the same structure several times (two methods sharing
//! an output type, for example) and must emit each declaration once. The
//! [`DuplicateFilter`] remembers which values were already seen, keyed by a
//! template-chosen collection name.

use std::collections::{HashMap, HashSet};

/// Per-render record of seen values, grouped into independent collections
#[derive(Debug, Default)]
pub struct DuplicateFilter {
    collections: HashMap<String, HashSet<String>>,
}

impl DuplicateFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` the first time `value` is seen in `collection` and
    /// `true` for every later call with the same pair.
    pub fn is_duplicate(&mut self, collection: &str, value: &str) -> bool {
        let seen = self.collections.entry(collection.to_string()).or_default();
        if seen.contains(value) {
            return true;
        }
        seen.insert(value.to_string());
        false
    }
}
