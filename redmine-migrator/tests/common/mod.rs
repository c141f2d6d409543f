//! In-memory trackers for driving the migrator in tests.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use redmine_migrator::{
    Attachment, DestinationError, DestinationTracker, ExistingIssue, JournalDetail, JournalEntry,
    MigrationConfig, Milestone, NewIssue, SourceError, SourceIssue, SourceProject, SourceTracker,
};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

pub const REDMINE_URL: &str = "https://redmine.example.com";
pub const PREFIX: &str = "https://github.com/acme/widgets";

/// Builds a configuration treating `repository_dir` as the destination
/// checkout, with attachments under `attachments/download` and no pause
/// between issues.
pub fn config(repository_dir: &Path) -> MigrationConfig {
    let content = format!(
        r#"
[redmine]
url = "{REDMINE_URL}"
token = "redmine-key"
project = "widgets"

[github]
token = "github-token"
owner = "acme"
repository = "widgets"
prefix = "{PREFIX}"

[migration]
footer = "Migrated from the Acme redmine."
repository-dir = '{repository}'
attachments-dir = '{repository}/attachments/download'
creation-delay-ms = 0

[users]
"Max Mustermann" = "maxm"
"#,
        repository = repository_dir.display()
    );
    MigrationConfig::parse(&content, "test").unwrap()
}

pub fn issue(id: u64, subject: &str) -> SourceIssue {
    SourceIssue {
        id,
        subject: subject.to_string(),
        description: format!("Description of {subject}."),
        author: "Jane Doe".to_string(),
        created_on: Utc.with_ymd_and_hms(2014, 3, 2, 10, 15, 0).unwrap(),
        status: "New".to_string(),
        tracker: "Feature".to_string(),
        milestone: None,
        assignee: None,
        journals: Vec::new(),
    }
}

pub fn note(author: &str, notes: &str) -> JournalEntry {
    JournalEntry {
        author: author.to_string(),
        created_on: Utc.with_ymd_and_hms(2014, 3, 3, 8, 0, 0).unwrap(),
        notes: notes.to_string(),
        details: Vec::new(),
    }
}

pub fn attachment_added(attachment_id: &str) -> JournalEntry {
    JournalEntry {
        author: "Jane Doe".to_string(),
        created_on: Utc.with_ymd_and_hms(2014, 3, 3, 9, 0, 0).unwrap(),
        notes: String::new(),
        details: vec![JournalDetail {
            property: "attachment".to_string(),
            name: attachment_id.to_string(),
            old_value: None,
            new_value: Some("file".to_string()),
        }],
    }
}

/// Source tracker serving a fixed project.
#[derive(Clone)]
pub struct InMemorySource {
    project: SourceProject,
    issues: Vec<SourceIssue>,
    attachments: HashMap<String, Attachment>,
    files: HashMap<String, Vec<u8>>,
    downloads: Arc<Mutex<Vec<String>>>,
}

impl InMemorySource {
    pub fn new(issues: Vec<SourceIssue>) -> Self {
        Self {
            project: SourceProject {
                id: 1,
                identifier: "widgets".to_string(),
                name: "Widgets".to_string(),
            },
            issues,
            attachments: HashMap::new(),
            files: HashMap::new(),
            downloads: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_attachment(mut self, id: u64, filename: &str, bytes: &[u8]) -> Self {
        let content_url = format!("{REDMINE_URL}/attachments/download/{id}/{filename}");
        self.files.insert(content_url.clone(), bytes.to_vec());
        self.attachments.insert(
            id.to_string(),
            Attachment {
                id,
                filename: filename.to_string(),
                content_url,
            },
        );
        self
    }

    pub fn downloads(&self) -> Vec<String> {
        self.downloads.lock().unwrap().clone()
    }
}

#[async_trait]
impl SourceTracker for InMemorySource {
    async fn project(&self) -> Result<SourceProject, SourceError> {
        Ok(self.project.clone())
    }

    async fn list_issues(&self, _project: &SourceProject) -> Result<Vec<SourceIssue>, SourceError> {
        Ok(self.issues.clone())
    }

    async fn attachment(&self, id: &str) -> Result<Attachment, SourceError> {
        self.attachments
            .get(id)
            .cloned()
            .ok_or_else(|| SourceError::NotFound {
                resource: format!("attachment {id}"),
            })
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, SourceError> {
        self.downloads.lock().unwrap().push(url.to_string());
        self.files.get(url).cloned().ok_or_else(|| SourceError::Api {
            status: 500,
            message: format!("no file behind {url}"),
        })
    }
}

/// An issue stored by [`InMemoryDestination`].
#[derive(Debug, Clone)]
pub struct StoredIssue {
    pub number: u64,
    pub title: String,
    pub body: String,
    pub labels: Vec<String>,
    pub milestone: Option<u64>,
    pub assignee: Option<String>,
    pub closed: bool,
    pub is_pull_request: bool,
}

#[derive(Debug, Default)]
pub struct DestinationState {
    pub issues: Vec<StoredIssue>,
    pub milestones: Vec<Milestone>,
    pub comments: Vec<(u64, String)>,
    pub fail_comments: bool,
}

/// Destination tracker numbering issues like GitHub does.
#[derive(Clone, Default)]
pub struct InMemoryDestination {
    state: Arc<Mutex<DestinationState>>,
}

impl InMemoryDestination {
    pub fn with_issue(self, number: u64, title: &str, is_pull_request: bool) -> Self {
        self.state.lock().unwrap().issues.push(StoredIssue {
            number,
            title: title.to_string(),
            body: String::new(),
            labels: Vec::new(),
            milestone: None,
            assignee: None,
            closed: false,
            is_pull_request,
        });
        self
    }

    pub fn with_milestone(self, number: u64, title: &str) -> Self {
        self.state.lock().unwrap().milestones.push(Milestone {
            number,
            title: title.to_string(),
        });
        self
    }

    pub fn fail_comments(&self, fail: bool) {
        self.state.lock().unwrap().fail_comments = fail;
    }

    pub fn issues(&self) -> Vec<StoredIssue> {
        self.state.lock().unwrap().issues.clone()
    }

    pub fn issue(&self, title: &str) -> StoredIssue {
        self.issues()
            .into_iter()
            .find(|issue| issue.title == title)
            .unwrap()
    }

    pub fn milestones(&self) -> Vec<Milestone> {
        self.state.lock().unwrap().milestones.clone()
    }

    pub fn comments_on(&self, number: u64) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .comments
            .iter()
            .filter(|(issue, _)| *issue == number)
            .map(|(_, body)| body.clone())
            .collect()
    }
}

#[async_trait]
impl DestinationTracker for InMemoryDestination {
    async fn list_issues(&self) -> Result<Vec<ExistingIssue>, DestinationError> {
        Ok(self
            .issues()
            .into_iter()
            .map(|issue| ExistingIssue {
                number: issue.number,
                title: issue.title,
                is_pull_request: issue.is_pull_request,
            })
            .collect())
    }

    async fn list_milestones(&self) -> Result<Vec<Milestone>, DestinationError> {
        Ok(self.milestones())
    }

    async fn create_milestone(&self, title: &str) -> Result<Milestone, DestinationError> {
        let mut state = self.state.lock().unwrap();
        let milestone = Milestone {
            number: state.milestones.len() as u64 + 1,
            title: title.to_string(),
        };
        state.milestones.push(milestone.clone());
        Ok(milestone)
    }

    async fn create_issue(&self, issue: &NewIssue) -> Result<ExistingIssue, DestinationError> {
        let mut state = self.state.lock().unwrap();
        let number = state.issues.iter().map(|issue| issue.number).max().unwrap_or(0) + 1;
        state.issues.push(StoredIssue {
            number,
            title: issue.title.clone(),
            body: issue.body.clone(),
            labels: issue.labels.clone(),
            milestone: issue.milestone,
            assignee: issue.assignee.clone(),
            closed: false,
            is_pull_request: false,
        });
        Ok(ExistingIssue {
            number,
            title: issue.title.clone(),
            is_pull_request: false,
        })
    }

    async fn create_comment(&self, number: u64, body: &str) -> Result<(), DestinationError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_comments {
            return Err(DestinationError::Rejected {
                operation: "comment".to_string(),
                message: "abuse detection triggered".to_string(),
            });
        }
        state.comments.push((number, body.to_string()));
        Ok(())
    }

    async fn close_issue(&self, number: u64) -> Result<(), DestinationError> {
        let mut state = self.state.lock().unwrap();
        match state.issues.iter_mut().find(|issue| issue.number == number) {
            Some(issue) => {
                issue.closed = true;
                Ok(())
            }
            None => Err(DestinationError::Rejected {
                operation: "close".to_string(),
                message: format!("issue {number} does not exist"),
            }),
        }
    }
}
