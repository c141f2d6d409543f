//! Redmine client tests against a mock HTTP server.

use redmine_migrator::{RedmineClient, SourceError, SourceProject, SourceTracker};
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const API_KEY: &str = "redmine-key";

fn client(server: &MockServer) -> RedmineClient {
    RedmineClient::with_base_url(server.uri(), API_KEY, "widgets").unwrap()
}

fn project() -> SourceProject {
    SourceProject {
        id: 3,
        identifier: "widgets".to_string(),
        name: "Widgets".to_string(),
    }
}

fn issue_json(id: u64, subject: &str) -> Value {
    json!({
        "id": id,
        "subject": subject,
        "description": format!("Description of {subject}."),
        "author": { "id": 1, "name": "Jane Doe" },
        "created_on": "2014-03-02T10:15:00Z",
        "status": { "id": 1, "name": "New" },
        "tracker": { "id": 1, "name": "Bug" }
    })
}

async fn mount_issue_page(server: &MockServer, offset: usize, issues: Vec<Value>, total: usize) {
    Mock::given(method("GET"))
        .and(path("/issues.json"))
        .and(query_param("project_id", "3"))
        .and(query_param("status_id", "*"))
        .and(query_param("offset", offset.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "issues": issues,
            "total_count": total,
            "offset": offset,
            "limit": 100
        })))
        .mount(server)
        .await;
}

async fn mount_issue_detail(server: &MockServer, issue: Value) {
    let id = issue["id"].as_u64().unwrap();
    Mock::given(method("GET"))
        .and(path(format!("/issues/{id}.json")))
        .and(query_param("include", "journals"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "issue": issue })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn resolves_project_with_api_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/projects/widgets.json"))
        .and(header("X-Redmine-API-Key", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "project": { "id": 3, "identifier": "widgets", "name": "Widgets" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let project = client(&server).project().await.unwrap();

    assert_eq!(project, self::project());
}

#[tokio::test]
async fn lists_issues_across_pages_with_journals() {
    let server = MockServer::start().await;

    let first_page: Vec<Value> = (1..=100).map(|id| issue_json(id, &format!("Issue {id}"))).collect();
    mount_issue_page(&server, 0, first_page, 101).await;
    mount_issue_page(&server, 100, vec![issue_json(101, "Issue 101")], 101).await;

    for id in 1..=101 {
        let mut detail = issue_json(id, &format!("Issue {id}"));
        if id == 2 {
            detail["fixed_version"] = json!({ "id": 4, "name": "v1.0" });
            detail["assigned_to"] = json!({ "id": 7, "name": "Max Mustermann" });
            detail["journals"] = json!([
                {
                    "id": 11,
                    "user": { "id": 2, "name": "John Roe" },
                    "notes": "Confirmed.",
                    "created_on": "2014-03-03T08:00:00Z",
                    "details": []
                },
                {
                    "id": 12,
                    "notes": "",
                    "created_on": "2014-03-03T09:00:00Z",
                    "details": [
                        { "property": "attachment", "name": "77", "new_value": "trace.log" },
                        { "property": "attr", "name": "status_id", "old_value": "1", "new_value": "2" }
                    ]
                }
            ]);
        }
        mount_issue_detail(&server, detail).await;
    }

    let issues = client(&server).list_issues(&project()).await.unwrap();

    assert_eq!(issues.len(), 101);
    assert_eq!(issues[0].id, 1);
    assert_eq!(issues[100].id, 101);

    let second = &issues[1];
    assert_eq!(second.subject, "Issue 2");
    assert_eq!(second.milestone.as_deref(), Some("v1.0"));
    assert_eq!(second.assignee.as_deref(), Some("Max Mustermann"));
    assert_eq!(second.journals.len(), 2);
    assert_eq!(second.journals[0].author, "John Roe");
    assert_eq!(second.journals[0].notes, "Confirmed.");
    assert_eq!(second.journals[1].author, "Anonymous");
    assert_eq!(second.attachment_ids().collect::<Vec<_>>(), vec!["77"]);
}

#[tokio::test]
async fn stops_on_empty_page() {
    let server = MockServer::start().await;
    mount_issue_page(&server, 0, vec![issue_json(1, "Only")], 5).await;
    mount_issue_page(&server, 1, Vec::new(), 5).await;
    mount_issue_detail(&server, issue_json(1, "Only")).await;

    let issues = client(&server).list_issues(&project()).await.unwrap();

    assert_eq!(issues.len(), 1);
}

#[tokio::test]
async fn fetches_attachment_metadata() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/attachments/77.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "attachment": {
                "id": 77,
                "filename": "trace.log",
                "filesize": 4,
                "content_url": "http://redmine.example.com/attachments/download/77/trace.log"
            }
        })))
        .mount(&server)
        .await;

    let attachment = client(&server).attachment("77").await.unwrap();

    assert_eq!(attachment.id, 77);
    assert_eq!(attachment.filename, "trace.log");
    assert_eq!(
        attachment.content_url,
        "http://redmine.example.com/attachments/download/77/trace.log"
    );
}

#[tokio::test]
async fn missing_attachment_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/attachments/78.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let error = client(&server).attachment("78").await.unwrap_err();

    assert!(error.is_not_found());
}

#[tokio::test]
async fn downloads_attachment_bytes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/attachments/download/77/trace.log"))
        .and(header("X-Redmine-API-Key", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"boom".to_vec()))
        .mount(&server)
        .await;

    let url = format!("{}/attachments/download/77/trace.log", server.uri());
    let bytes = client(&server).download(&url).await.unwrap();

    assert_eq!(bytes, b"boom");
}

#[tokio::test]
async fn download_from_other_host_omits_api_key() {
    let server = MockServer::start().await;
    let other = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/files/trace.log"))
        .and(|request: &Request| !request.headers.contains_key("X-Redmine-API-Key"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"boom".to_vec()))
        .expect(1)
        .mount(&other)
        .await;

    let url = format!("{}/files/trace.log", other.uri());
    let bytes = client(&server).download(&url).await.unwrap();

    assert_eq!(bytes, b"boom");
}

#[tokio::test]
async fn unauthorized_is_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/projects/widgets.json"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&server)
        .await;

    let error = client(&server).project().await.unwrap_err();

    match error {
        SourceError::Api { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "Unauthorized");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
