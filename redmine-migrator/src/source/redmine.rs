//! Redmine REST API client.
//!
//! API documentation: <https://www.redmine.org/projects/redmine/wiki/Rest_api>

use super::models::{Attachment, JournalDetail, JournalEntry, SourceIssue, SourceProject};
use super::{SourceError, SourceTracker};
use crate::config::RedmineSettings;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

/// Header carrying the API key.
const API_KEY_HEADER: &str = "X-Redmine-API-Key";

/// Default timeout for API requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Issues requested per page; Redmine caps this at 100.
const PAGE_SIZE: usize = 100;

/// Author name used when Redmine omits the user (deleted accounts).
const ANONYMOUS: &str = "Anonymous";

/// Read-only Redmine client.
#[derive(Clone)]
pub struct RedmineClient {
    client: Client,
    base_url: String,
    token: String,
    project: String,
}

impl RedmineClient {
    /// Creates a client from the `[redmine]` configuration section.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(settings: &RedmineSettings) -> Result<Self, SourceError> {
        Self::with_base_url(&settings.url, &settings.token, &settings.project)
    }

    /// Creates a client for an explicit base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_base_url(
        base_url: impl Into<String>,
        token: impl Into<String>,
        project: impl Into<String>,
    ) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            project: project.into(),
        })
    }

    /// Makes an authenticated GET request against an API path.
    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        resource: &str,
    ) -> Result<T, SourceError> {
        let url = format!("{}{path}", self.base_url);
        debug!(url = %url, "GET request");

        let request = self
            .client
            .get(&url)
            .query(query)
            .header(API_KEY_HEADER, &self.token);
        let response = self.send(request, resource).await?;
        Ok(response.json().await?)
    }

    /// Sends a request and maps error statuses.
    async fn send(&self, request: RequestBuilder, resource: &str) -> Result<Response, SourceError> {
        let response = request.send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(SourceError::NotFound {
                resource: resource.to_string(),
            });
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SourceError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }

    /// Returns true if `url` points below the configured base URL.
    ///
    /// The scheme is not compared.
    fn is_own_url(&self, url: &str) -> bool {
        fn without_scheme(url: &str) -> &str {
            url.split_once("://").map_or(url, |(_, rest)| rest)
        }

        without_scheme(url)
            .strip_prefix(without_scheme(&self.base_url))
            .is_some_and(|rest| rest.is_empty() || rest.starts_with(['/', '?']))
    }

    /// Fetches a single issue with its journals.
    async fn issue_with_journals(&self, id: u64) -> Result<SourceIssue, SourceError> {
        let envelope: IssueEnvelope = self
            .get(
                &format!("/issues/{id}.json"),
                &[("include", "journals".to_string())],
                &format!("issue {id}"),
            )
            .await?;
        Ok(envelope.issue.into())
    }
}

impl std::fmt::Debug for RedmineClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedmineClient")
            .field("base_url", &self.base_url)
            .field("project", &self.project)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl SourceTracker for RedmineClient {
    async fn project(&self) -> Result<SourceProject, SourceError> {
        let envelope: ProjectEnvelope = self
            .get(
                &format!("/projects/{}.json", self.project),
                &[],
                &format!("project {}", self.project),
            )
            .await?;

        let project = envelope.project;
        info!(id = project.id, name = %project.name, "Resolved Redmine project");
        Ok(SourceProject {
            id: project.id,
            identifier: project.identifier,
            name: project.name,
        })
    }

    async fn list_issues(&self, project: &SourceProject) -> Result<Vec<SourceIssue>, SourceError> {
        info!(project = %project.identifier, "Fetching issues from Redmine");

        let mut ids = Vec::new();
        loop {
            let page: IssuesPage = self
                .get(
                    "/issues.json",
                    &[
                        ("project_id", project.id.to_string()),
                        ("status_id", "*".to_string()),
                        ("sort", "id:asc".to_string()),
                        ("offset", ids.len().to_string()),
                        ("limit", PAGE_SIZE.to_string()),
                    ],
                    "issues",
                )
                .await?;

            let fetched = page.issues.len();
            ids.extend(page.issues.into_iter().map(|issue| issue.id));
            debug!(fetched, total = page.total_count, "Fetched issue page");

            if fetched == 0 || ids.len() as u64 >= page.total_count {
                break;
            }
        }

        // The list endpoint does not return journals, so each issue is
        // fetched again individually.
        let mut issues = Vec::with_capacity(ids.len());
        for id in ids {
            debug!(issue_id = id, "Fetching journals");
            issues.push(self.issue_with_journals(id).await?);
        }
        issues.sort_by_key(|issue| issue.id);

        info!(count = issues.len(), "Fetched issues");
        Ok(issues)
    }

    async fn attachment(&self, id: &str) -> Result<Attachment, SourceError> {
        let envelope: AttachmentEnvelope = self
            .get(
                &format!("/attachments/{id}.json"),
                &[],
                &format!("attachment {id}"),
            )
            .await?;

        let attachment = envelope.attachment;
        Ok(Attachment {
            id: attachment.id,
            filename: attachment.filename,
            content_url: attachment.content_url,
        })
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, SourceError> {
        debug!(url = %url, "Downloading attachment");
        let mut request = self.client.get(url);
        if self.is_own_url(url) {
            request = request.header(API_KEY_HEADER, &self.token);
        } else {
            debug!(url = %url, "Attachment is hosted elsewhere, sending no API key");
        }
        let response = self.send(request, url).await?;
        Ok(response.bytes().await?.to_vec())
    }
}

#[derive(Debug, Deserialize)]
struct ProjectEnvelope {
    project: RedmineProject,
}

#[derive(Debug, Deserialize)]
struct RedmineProject {
    id: u64,
    identifier: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct IssuesPage {
    issues: Vec<RedmineIssue>,
    total_count: u64,
}

#[derive(Debug, Deserialize)]
struct IssueEnvelope {
    issue: RedmineIssue,
}

#[derive(Debug, Deserialize)]
struct NamedRef {
    name: String,
}

#[derive(Debug, Deserialize)]
struct RedmineIssue {
    id: u64,
    subject: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    author: Option<NamedRef>,
    created_on: DateTime<Utc>,
    status: NamedRef,
    tracker: NamedRef,
    #[serde(default)]
    fixed_version: Option<NamedRef>,
    #[serde(default)]
    assigned_to: Option<NamedRef>,
    #[serde(default)]
    journals: Vec<RedmineJournal>,
}

#[derive(Debug, Deserialize)]
struct RedmineJournal {
    #[serde(default)]
    user: Option<NamedRef>,
    #[serde(default)]
    notes: Option<String>,
    created_on: DateTime<Utc>,
    #[serde(default)]
    details: Vec<JournalDetail>,
}

#[derive(Debug, Deserialize)]
struct AttachmentEnvelope {
    attachment: RedmineAttachment,
}

#[derive(Debug, Deserialize)]
struct RedmineAttachment {
    id: u64,
    filename: String,
    content_url: String,
}

fn display_name(user: Option<NamedRef>) -> String {
    user.map_or_else(|| ANONYMOUS.to_string(), |user| user.name)
}

impl From<RedmineIssue> for SourceIssue {
    fn from(issue: RedmineIssue) -> Self {
        SourceIssue {
            id: issue.id,
            subject: issue.subject,
            description: issue.description.unwrap_or_default(),
            author: display_name(issue.author),
            created_on: issue.created_on,
            status: issue.status.name,
            tracker: issue.tracker.name,
            milestone: issue.fixed_version.map(|version| version.name),
            assignee: issue.assigned_to.map(|user| user.name),
            journals: issue.journals.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<RedmineJournal> for JournalEntry {
    fn from(journal: RedmineJournal) -> Self {
        JournalEntry {
            author: display_name(journal.user),
            created_on: journal.created_on,
            notes: journal.notes.unwrap_or_default(),
            details: journal.details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn own_url_requires_path_boundary() {
        let client =
            RedmineClient::with_base_url("https://redmine.example.com", "key", "widgets").unwrap();

        assert!(client.is_own_url("https://redmine.example.com/attachments/download/1/a.png"));
        assert!(client.is_own_url("http://redmine.example.com/attachments/download/1/a.png"));
        assert!(!client.is_own_url("https://redmine.example.com.evil/attachments/1/a.png"));
        assert!(!client.is_own_url("https://cdn.example.org/redmine.example.com/a.png"));
    }

    #[test]
    fn converts_issue_with_optional_fields_missing() {
        let raw = json!({
            "id": 5,
            "subject": "Fix crash",
            "author": { "id": 1, "name": "Jane Doe" },
            "created_on": "2014-03-02T10:15:00Z",
            "status": { "id": 1, "name": "New" },
            "tracker": { "id": 1, "name": "Bug" }
        });

        let issue: SourceIssue = serde_json::from_value::<RedmineIssue>(raw).unwrap().into();

        assert_eq!(issue.id, 5);
        assert_eq!(issue.description, "");
        assert_eq!(issue.author, "Jane Doe");
        assert_eq!(issue.tracker, "Bug");
        assert!(issue.milestone.is_none());
        assert!(issue.assignee.is_none());
        assert!(issue.journals.is_empty());
    }

    #[test]
    fn converts_journal_with_null_notes() {
        let raw = json!({
            "id": 9,
            "created_on": "2014-03-03T08:00:00Z",
            "notes": null,
            "details": [
                { "property": "attachment", "name": "77", "new_value": "trace.log" }
            ]
        });

        let journal: JournalEntry = serde_json::from_value::<RedmineJournal>(raw).unwrap().into();

        assert_eq!(journal.author, ANONYMOUS);
        assert_eq!(journal.notes, "");
        assert_eq!(journal.details[0].attachment_id(), Some("77"));
        assert_eq!(journal.details[0].new_value.as_deref(), Some("trace.log"));
    }
}
