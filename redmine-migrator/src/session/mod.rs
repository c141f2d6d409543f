//! Per-run migration state.
//!
//! A [`MigrationSession`] owns everything a run learns about the destination:
//! the id mapping, the milestone mapping and the next free issue number.
//! Nothing here is persisted; a re-run rebuilds it from the live destination.

mod id_map;
mod milestones;
mod plan;

pub use id_map::IdMap;
pub use milestones::MilestoneMap;
pub use plan::{PlannedAction, PlannedIssue};

use crate::destination::{DestinationError, DestinationTracker, ExistingIssue, Milestone};
use crate::source::SourceIssue;
use std::collections::HashMap;
use tracing::{debug, info};

/// Milestone resolution result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MilestoneRef {
    pub number: u64,
    /// Whether the milestone was created by this call.
    pub created: bool,
}

/// State shared by every step of a single migration run.
#[derive(Debug, Clone)]
pub struct MigrationSession {
    id_map: IdMap,
    milestones: MilestoneMap,
    existing_titles: HashMap<String, u64>,
    next_number: u64,
}

impl MigrationSession {
    /// Starts a session from the current destination state.
    ///
    /// Pull requests count towards the next free number but are never
    /// matched by title.
    #[must_use]
    pub fn new(existing_issues: &[ExistingIssue], existing_milestones: Vec<Milestone>) -> Self {
        let next_number = existing_issues
            .iter()
            .map(|issue| issue.number)
            .max()
            .unwrap_or(0)
            + 1;

        let mut existing_titles = HashMap::new();
        for issue in existing_issues.iter().filter(|issue| !issue.is_pull_request) {
            existing_titles
                .entry(issue.title.clone())
                .or_insert(issue.number);
        }

        debug!(
            existing = existing_issues.len(),
            milestones = existing_milestones.len(),
            next_number,
            "Started migration session"
        );

        Self {
            id_map: IdMap::new(),
            milestones: MilestoneMap::new(existing_milestones),
            existing_titles,
            next_number,
        }
    }

    /// Maps every source issue to a destination number.
    ///
    /// Issues whose title already exists at the destination reuse that
    /// number and are planned as skipped; all others reserve the next free
    /// number. Must run over all issues before any body is rendered.
    pub fn plan(&mut self, issues: &[SourceIssue]) -> Vec<PlannedIssue> {
        let planned: Vec<PlannedIssue> = issues
            .iter()
            .map(|issue| {
                let (number, action) = match self.existing_titles.get(&issue.subject) {
                    Some(existing) => (*existing, PlannedAction::Skip),
                    None => {
                        let reserved = self.next_number;
                        self.next_number += 1;
                        (reserved, PlannedAction::Create)
                    }
                };
                self.id_map.insert(issue.id, number);

                PlannedIssue {
                    source_id: issue.id,
                    title: issue.subject.clone(),
                    number,
                    action,
                }
            })
            .collect();

        info!(
            planned = planned.len(),
            mapped = self.id_map.len(),
            to_create = planned
                .iter()
                .filter(|issue| issue.action == PlannedAction::Create)
                .count(),
            "Mapped source issues to destination numbers"
        );
        planned
    }

    /// Replaces a reserved number with the number the destination assigned.
    pub fn record_created(&mut self, source_id: u64, number: u64) {
        if let Some(reserved) = self.id_map.insert(source_id, number) {
            if reserved != number {
                debug!(source_id, reserved, number, "Destination assigned a different number");
            }
        }
    }

    /// Returns the destination number for a milestone, creating it if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the milestone has to be created and creation fails.
    pub async fn ensure_milestone<D>(
        &mut self,
        destination: &D,
        name: &str,
    ) -> Result<MilestoneRef, DestinationError>
    where
        D: DestinationTracker + ?Sized,
    {
        if let Some(number) = self.milestones.resolve(name) {
            return Ok(MilestoneRef {
                number,
                created: false,
            });
        }

        let milestone = destination.create_milestone(name).await?;
        self.milestones.insert(name, milestone.number);
        Ok(MilestoneRef {
            number: milestone.number,
            created: true,
        })
    }

    #[must_use]
    pub fn id_map(&self) -> &IdMap {
        &self.id_map
    }

    /// Returns the next number that would be reserved.
    #[must_use]
    pub fn next_number(&self) -> u64 {
        self.next_number
    }
}
