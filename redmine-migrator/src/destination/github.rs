//! GitHub destination backed by octocrab.

use super::models::{ExistingIssue, Milestone, NewIssue};
use super::{DestinationError, DestinationTracker};
use crate::config::GitHubSettings;
use crate::rate_limit::ensure_core_rate_limit;
use async_trait::async_trait;
use octocrab::models::IssueState;
use octocrab::{params, Octocrab};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Results per page for list endpoints.
const RESULTS_PER_PAGE: u8 = 100;

/// Writes migrated issues into a single GitHub repository.
pub struct GitHubTracker {
    octocrab: Octocrab,
    owner: String,
    repo: String,
    respect_rate_limit: bool,
}

impl GitHubTracker {
    /// Builds an authenticated client from the `[github]` configuration section.
    ///
    /// # Errors
    ///
    /// Returns an error if the octocrab client cannot be built.
    pub fn new(settings: &GitHubSettings) -> Result<Self, DestinationError> {
        let octocrab = Octocrab::builder()
            .personal_token(settings.token.clone())
            .build()?;

        info!(
            owner = %settings.owner,
            repo = %settings.repository,
            "Created GitHub client"
        );

        Ok(Self {
            octocrab,
            owner: settings.owner.clone(),
            repo: settings.repository.clone(),
            respect_rate_limit: settings.respect_rate_limit,
        })
    }

    fn milestones_route(&self) -> String {
        format!("/repos/{}/{}/milestones", self.owner, self.repo)
    }

    /// Waits for the core rate limit when configured to.
    async fn before_write(&self) -> Result<(), DestinationError> {
        if self.respect_rate_limit {
            ensure_core_rate_limit(&self.octocrab).await?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for GitHubTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubTracker")
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .finish_non_exhaustive()
    }
}

#[derive(Serialize)]
struct MilestoneQuery {
    state: &'static str,
    per_page: u8,
    page: u32,
}

#[derive(Serialize)]
struct CreateMilestone<'a> {
    title: &'a str,
}

#[derive(Deserialize)]
struct MilestoneRecord {
    number: u64,
    title: String,
}

impl From<MilestoneRecord> for Milestone {
    fn from(record: MilestoneRecord) -> Self {
        Milestone {
            number: record.number,
            title: record.title,
        }
    }
}

impl From<octocrab::models::issues::Issue> for ExistingIssue {
    fn from(issue: octocrab::models::issues::Issue) -> Self {
        ExistingIssue {
            number: issue.number,
            title: issue.title,
            is_pull_request: issue.pull_request.is_some(),
        }
    }
}

#[async_trait]
impl DestinationTracker for GitHubTracker {
    async fn list_issues(&self) -> Result<Vec<ExistingIssue>, DestinationError> {
        debug!("Listing destination issues");

        let first_page = self
            .octocrab
            .issues(&self.owner, &self.repo)
            .list()
            .state(params::State::All)
            .per_page(RESULTS_PER_PAGE)
            .send()
            .await?;
        let issues = self.octocrab.all_pages(first_page).await?;

        info!(count = issues.len(), "Listed destination issues");
        Ok(issues.into_iter().map(Into::into).collect())
    }

    async fn list_milestones(&self) -> Result<Vec<Milestone>, DestinationError> {
        debug!("Listing destination milestones");

        let route = self.milestones_route();
        let mut milestones = Vec::new();
        let mut page = 1;
        loop {
            let query = MilestoneQuery {
                state: "all",
                per_page: RESULTS_PER_PAGE,
                page,
            };
            let batch: Vec<MilestoneRecord> = self.octocrab.get(&route, Some(&query)).await?;
            let fetched = batch.len();
            milestones.extend(batch.into_iter().map(Milestone::from));

            if fetched < usize::from(RESULTS_PER_PAGE) {
                break;
            }
            page += 1;
        }

        Ok(milestones)
    }

    async fn create_milestone(&self, title: &str) -> Result<Milestone, DestinationError> {
        self.before_write().await?;

        let record: MilestoneRecord = self
            .octocrab
            .post(self.milestones_route(), Some(&CreateMilestone { title }))
            .await?;

        info!(milestone = record.number, title = %record.title, "Created milestone");
        Ok(record.into())
    }

    async fn create_issue(&self, issue: &NewIssue) -> Result<ExistingIssue, DestinationError> {
        self.before_write().await?;

        let created = self
            .octocrab
            .issues(&self.owner, &self.repo)
            .create(issue.title.as_str())
            .body(issue.body.as_str())
            .labels(issue.labels.clone())
            .milestone(issue.milestone)
            .assignees(issue.assignee.clone().map(|login| vec![login]))
            .send()
            .await?;

        Ok(created.into())
    }

    async fn create_comment(&self, number: u64, body: &str) -> Result<(), DestinationError> {
        self.before_write().await?;

        self.octocrab
            .issues(&self.owner, &self.repo)
            .create_comment(number, body)
            .await?;
        Ok(())
    }

    async fn close_issue(&self, number: u64) -> Result<(), DestinationError> {
        self.before_write().await?;

        self.octocrab
            .issues(&self.owner, &self.repo)
            .update(number)
            .state(IssueState::Closed)
            .send()
            .await?;
        Ok(())
    }
}
