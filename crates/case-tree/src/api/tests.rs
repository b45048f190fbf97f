//! HTTP Client Tests
//!
//! Runs `HttpCaseApi` against an in-process axum stub of the backend.

use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::api::{CaseApi, CaseOrder, HttpCaseApi, SuiteOrder};
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::model::{CaseUpdate, NewCase, NewSuite};

#[derive(Debug, Clone, PartialEq)]
struct Recorded {
    method: String,
    path: String,
    auth: Option<String>,
    body: Value,
}

type Log = Arc<Mutex<Vec<Recorded>>>;

async fn backend(State(log): State<Log>, method: Method, uri: Uri, headers: HeaderMap, body: Bytes) -> Response {
    let path = uri.path().to_string();
    log.lock().unwrap().push(Recorded {
        method: method.to_string(),
        path: path.clone(),
        auth: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    });

    match (method.as_str(), path.as_str()) {
        ("GET", "/projects/expired/cases") => StatusCode::UNAUTHORIZED.into_response(),
        ("GET", "/projects/demo/cases") => Json(json!({
            "project_id": 1,
            "entities": [
                {"id": 1, "name": "Suite1", "test_suites": [], "test_cases": [
                    {"id": 1, "title": "Case1", "content": ""},
                    {"id": 2, "title": "Case2", "content": ""}
                ]},
                {"id": 2, "name": "Suite2", "test_suites": [], "test_cases": []}
            ],
            "folders": [{"key": 1, "title": "Suite1", "children": []}, {"key": 2, "title": "Suite2", "children": []}]
        }))
        .into_response(),
        ("GET", "/demo/milestones") => {
            Json(json!({"entities": [{"id": 7, "title": "v1.0", "status": "open"}]})).into_response()
        }
        ("PUT", "/cases/999") => {
            (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"error": "Update failed"}))).into_response()
        }
        ("PUT", p) if p.starts_with("/cases/") => {
            Json(json!({"id": 5, "title": "Renamed", "content": "body", "milestone": null})).into_response()
        }
        ("POST", "/cases") => {
            (StatusCode::CREATED, Json(json!({"id": 42, "title": "New", "content": ""}))).into_response()
        }
        ("DELETE", _) => StatusCode::NO_CONTENT.into_response(),
        _ => Json(json!({"status": "success"})).into_response(),
    }
}

async fn start_backend() -> (String, Log) {
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let router = Router::new().fallback(backend).with_state(log.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind stub backend");
    let addr = listener.local_addr().expect("stub address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("stub backend");
    });

    (format!("http://{}", addr), log)
}

fn client(base_url: &str) -> HttpCaseApi {
    HttpCaseApi::new(ClientConfig::new(base_url).unwrap().with_token("secret"))
}

fn last(log: &Log) -> Recorded {
    log.lock().unwrap().last().cloned().expect("a recorded request")
}

#[tokio::test]
async fn test_fetch_tree_sends_bearer_token() {
    let (url, log) = start_backend().await;
    let tree = client(&url).fetch_tree("demo").await.expect("fetch");

    assert_eq!(tree.entities.len(), 2);
    assert_eq!(tree.entities[0].cases[1].id, 2);
    assert_eq!(tree.folders.len(), 2);

    let request = last(&log);
    assert_eq!(request.path, "/projects/demo/cases");
    assert_eq!(request.auth.as_deref(), Some("Bearer secret"));
}

#[tokio::test]
async fn test_reparent_case_into_empty_suite() {
    let (url, log) = start_backend().await;
    client(&url).reparent_case(1, 2).await.expect("reparent");

    let request = last(&log);
    assert_eq!(request.method, "PUT");
    assert_eq!(request.path, "/cases/1");
    assert_eq!(request.body, json!({"test_suite_id": 2}));
}

#[tokio::test]
async fn test_bulk_reorders() {
    let (url, log) = start_backend().await;
    let api = client(&url);

    api.reorder_cases("demo", &CaseOrder::new(1, &[12, 10, 11])).await.expect("cases bulk");
    let request = last(&log);
    assert_eq!(request.path, "/demo/cases/bulk");
    assert_eq!(request.body["test_suite_id"], 1);
    assert_eq!(request.body["test_cases"][0], json!({"test_case_id": 12, "index": 0}));

    api.reorder_suites("demo", &SuiteOrder::new(None, &[2, 1])).await.expect("suites bulk");
    let request = last(&log);
    assert_eq!(request.path, "/demo/suites/bulk");
    assert!(request.body["parent_id"].is_null());
    assert_eq!(request.body["test_suites"][1], json!({"test_suite_id": 1, "index": 1}));

    api.reparent_suite(3, Some(1)).await.expect("suite reparent");
    let request = last(&log);
    assert_eq!(request.path, "/suites/3");
    assert_eq!(request.body, json!({"parent_id": 1}));
}

#[tokio::test]
async fn test_unauthorized_is_session_expiry() {
    let (url, _log) = start_backend().await;
    let err = client(&url).fetch_tree("expired").await.unwrap_err();
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn test_error_body_becomes_message() {
    let (url, _log) = start_backend().await;
    let err = client(&url).reparent_case(999, 2).await.unwrap_err();
    match err {
        ApiError::Status { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "Update failed");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    // Bind and drop to get a port nobody listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(&format!("http://{}", addr)).fetch_tree("demo").await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}

#[tokio::test]
async fn test_case_crud_round() {
    let (url, log) = start_backend().await;
    let api = client(&url);

    let created = api
        .create_case(&NewCase {
            project_id: 1,
            test_suite_id: 2,
            title: "New".into(),
            content: String::new(),
            created_by_id: Some(1),
            updated_by_id: Some(1),
        })
        .await
        .expect("create");
    assert_eq!(created.id, 42);
    assert_eq!(last(&log).body["test_suite_id"], 2);

    let update = CaseUpdate {
        title: "Renamed".into(),
        content: "body".into(),
        milestone_id: None,
        updated_by_id: Some(1),
    };
    let updated = api.update_case(5, &update).await.expect("update");
    assert_eq!(updated.title, "Renamed");
    assert!(last(&log).body["milestone_id"].is_null());

    api.delete_case(5).await.expect("delete");
    assert_eq!(last(&log).method, "DELETE");

    api.create_suite(&NewSuite { project_id: 1, parent_id: None, name: "Smoke".into() })
        .await
        .expect("create suite");
    assert_eq!(last(&log).path, "/suites");

    api.delete_suite(2).await.expect("delete suite");
    assert_eq!(last(&log).path, "/suites/2");

    let milestones = api.fetch_milestones("demo").await.expect("milestones");
    assert_eq!(milestones[0].title, "v1.0");
}
