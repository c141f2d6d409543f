//! Source issue id to destination issue number mapping.

use std::collections::BTreeMap;

/// Maps source issue ids to destination issue numbers.
///
/// Built by the planning pass before any content is transformed, so every
/// cross-reference can be resolved regardless of migration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdMap {
    entries: BTreeMap<u64, u64>,
}

impl IdMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the destination number for a source id, returning the previous one.
    pub fn insert(&mut self, source_id: u64, number: u64) -> Option<u64> {
        self.entries.insert(source_id, number)
    }

    /// Returns the destination number for a source id.
    #[must_use]
    pub fn get(&self, source_id: u64) -> Option<u64> {
        self.entries.get(&source_id).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(u64, u64)> for IdMap {
    fn from_iter<T: IntoIterator<Item = (u64, u64)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
