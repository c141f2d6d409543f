//! Milestone name to destination milestone number mapping.

use crate::destination::Milestone;
use std::collections::HashMap;

/// Resolves milestone names against the destination.
///
/// Entries are filled in lazily: a name is looked up in the milestones that
/// existed when the run started, and only created when absent.
#[derive(Debug, Clone, Default)]
pub struct MilestoneMap {
    existing: Vec<Milestone>,
    resolved: HashMap<String, u64>,
}

impl MilestoneMap {
    /// Creates a map over the milestones already present at the destination.
    #[must_use]
    pub fn new(existing: Vec<Milestone>) -> Self {
        Self {
            existing,
            resolved: HashMap::new(),
        }
    }

    /// Returns the destination number for a milestone name without creating it.
    pub fn resolve(&mut self, name: &str) -> Option<u64> {
        if let Some(number) = self.resolved.get(name) {
            return Some(*number);
        }

        let number = self
            .existing
            .iter()
            .find(|milestone| milestone.title == name)?
            .number;
        self.resolved.insert(name.to_string(), number);
        Some(number)
    }

    /// Records a milestone created during this run.
    pub fn insert(&mut self, name: impl Into<String>, number: u64) {
        self.resolved.insert(name.into(), number);
    }

    /// Returns the number of names resolved so far.
    #[must_use]
    pub fn resolved_len(&self) -> usize {
        self.resolved.len()
    }
}
