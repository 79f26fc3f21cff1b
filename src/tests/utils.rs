// src/tests/utils.rs
use crate::db::{init_db, Database};
use crate::router;
use crate::state::AppState;
use astra::{Body, Request, Response};
use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use std::io::Read;
use std::time::Duration;
use tempfile::TempDir;

/// 2024-06-15 12:00 UTC, a Saturday.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
}

/// A state backed by a fresh schema-initialised database in a temp dir.
/// The dir lives as long as the `TestApp`.
pub struct TestApp {
    pub state: AppState,
    _dir: TempDir,
}

pub fn test_app() -> TestApp {
    test_app_with_polls(4, Duration::from_millis(50))
}

/// Like [`test_app`] with a chosen long-poll slot count and timeout.
pub fn test_app_with_polls(max_polls: usize, poll_timeout: Duration) -> TestApp {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("chores.sqlite");
    let db = Database::new(path.to_string_lossy().into_owned());
    init_db(&db).unwrap_or_else(|e| panic!("Database initialization failed: {e}"));

    let state = AppState::new(
        db,
        FixedOffset::east_opt(0).unwrap(),
        poll_timeout,
    )
    .with_poll_limit(max_polls)
    .with_clock(fixed_now);

    TestApp { state, _dir: dir }
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request {
    http::Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request {
    http::Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn form_request(uri: &str, body: &str) -> Request {
    http::Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn send(app: &TestApp, req: Request) -> Response {
    router::serve(req, &app.state)
}

pub fn body_string(resp: Response) -> String {
    let mut out = String::new();
    resp.into_body()
        .reader()
        .read_to_string(&mut out)
        .expect("read response body");
    out
}

pub fn body_json(resp: Response) -> serde_json::Value {
    serde_json::from_str(&body_string(resp)).expect("response body is JSON")
}

/// Creates a chore through the API and returns its id.
pub fn add_chore(app: &TestApp, body: serde_json::Value) -> i64 {
    let resp = send(app, json_request("POST", "/api/chores", body));
    assert_eq!(resp.status(), 200);
    body_json(resp)["id"].as_i64().expect("chore id")
}
