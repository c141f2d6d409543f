//! The migration driver.

use super::RunnerError;
use crate::attachments::{collect_attachments, AttachmentStore};
use crate::config::MigrationConfig;
use crate::destination::DestinationTracker;
use crate::issues::{compose_comment, compose_issue, is_closed_status};
use crate::rate_limit::pause_after_creation;
use crate::session::{MigrationSession, PlannedAction, PlannedIssue};
use crate::source::{SourceIssue, SourceProject, SourceTracker};
use crate::summary::{IssueOutcome, RunSummary};
use crate::templates::TemplateRenderer;
use tracing::{debug, info, info_span, Instrument};

/// Source issues and the session planned over them.
struct Prepared {
    project: SourceProject,
    issues: Vec<SourceIssue>,
    session: MigrationSession,
    plan: Vec<PlannedIssue>,
}

/// Migrates every issue of a source project into a destination tracker.
///
/// Issues are handled one at a time in ascending source id order. Each
/// request is awaited before the next one is sent.
pub struct Migrator<S, D> {
    source: S,
    destination: D,
    config: MigrationConfig,
    store: AttachmentStore,
    renderer: TemplateRenderer,
}

impl<S, D> Migrator<S, D>
where
    S: SourceTracker,
    D: DestinationTracker,
{
    /// Creates a migrator storing attachments under the configured directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the body templates fail to register.
    pub fn new(source: S, destination: D, config: MigrationConfig) -> Result<Self, RunnerError> {
        let store = AttachmentStore::new(
            config.migration.attachments_dir.clone(),
            config.migration.repository_dir.clone(),
        );
        Ok(Self {
            source,
            destination,
            config,
            store,
            renderer: TemplateRenderer::new()?,
        })
    }

    /// Reads both trackers and maps every source issue to a destination number.
    async fn prepare(&self) -> Result<Prepared, RunnerError> {
        let project = self.source.project().await?;
        let mut issues = self.source.list_issues(&project).await?;
        issues.sort_by_key(|issue| issue.id);

        let existing = self.destination.list_issues().await?;
        let milestones = self.destination.list_milestones().await?;

        let mut session = MigrationSession::new(&existing, milestones);
        let plan = session.plan(&issues);

        Ok(Prepared {
            project,
            issues,
            session,
            plan,
        })
    }

    /// Computes the mapping without writing to the destination or the disk.
    ///
    /// # Errors
    ///
    /// Returns an error if either tracker cannot be read.
    pub async fn preview(&self) -> Result<Vec<PlannedIssue>, RunnerError> {
        Ok(self.prepare().await?.plan)
    }

    /// Runs the migration.
    ///
    /// # Errors
    ///
    /// Any tracker, storage or rendering failure aborts the run. Issues
    /// created before the failure stay in place and are skipped on re-run.
    pub async fn run(&self) -> Result<RunSummary, RunnerError> {
        let mut summary = RunSummary::new(false);
        let Prepared {
            project,
            issues,
            mut session,
            plan,
        } = self.prepare().await?;
        summary.issues_fetched = issues.len();
        debug!(dir = %self.store.root().display(), "Storing attachments");

        for (issue, planned) in issues.iter().zip(&plan) {
            let outcome = match planned.action {
                PlannedAction::Skip => {
                    info!(
                        issue_id = issue.id,
                        existing = planned.number,
                        title = %issue.subject,
                        "Issue already migrated, skipping"
                    );
                    IssueOutcome::Skipped {
                        source_id: issue.id,
                        existing: planned.number,
                    }
                }
                PlannedAction::Create => {
                    let span = info_span!("migrate_issue", issue_id = issue.id);
                    self.migrate_issue(&mut session, &project, issue)
                        .instrument(span)
                        .await?
                }
            };
            summary.record(&outcome);
        }

        info!(
            created = summary.issues_created,
            skipped = summary.issues_skipped,
            "Migration complete"
        );
        Ok(summary)
    }

    /// Creates one destination issue with its milestone, attachments,
    /// comments and final state.
    async fn migrate_issue(
        &self,
        session: &mut MigrationSession,
        project: &SourceProject,
        issue: &SourceIssue,
    ) -> Result<IssueOutcome, RunnerError> {
        info!(title = %issue.subject, "Processing issue");

        let milestone = match &issue.milestone {
            Some(name) => Some(session.ensure_milestone(&self.destination, name).await?),
            None => None,
        };

        let attachments =
            collect_attachments(&self.source, &self.store, issue, &self.config).await?;

        let new_issue = compose_issue(
            &self.renderer,
            &self.config,
            &project.name,
            issue,
            &attachments.links,
            session.id_map(),
            milestone.map(|milestone| milestone.number),
        )?;

        let created = self.destination.create_issue(&new_issue).await?;
        session.record_created(issue.id, created.number);
        info!(number = created.number, "Created issue");

        let mut comments = 0;
        for journal in &issue.journals {
            let comment = compose_comment(&self.renderer, &self.config, journal, session.id_map())?;
            if let Some(body) = comment {
                self.destination.create_comment(created.number, &body).await?;
                comments += 1;
            }
        }
        debug!(comments, "Replayed journal notes");

        let closed = is_closed_status(&issue.status);
        if closed {
            self.destination.close_issue(created.number).await?;
            info!(number = created.number, status = %issue.status, "Closed issue");
        }

        pause_after_creation(self.config.creation_delay()).await;

        Ok(IssueOutcome::Created {
            source_id: issue.id,
            number: created.number,
            comments,
            closed,
            milestone_created: milestone.is_some_and(|milestone| milestone.created),
            attachments_saved: attachments.saved,
            attachments_missing: attachments.missing,
        })
    }
}
