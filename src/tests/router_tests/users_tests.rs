// src/tests/router_tests/users_tests.rs
use crate::tests::utils::{body_json, empty_request, json_request, send, test_app};
use serde_json::json;

#[test]
fn lists_seeded_users() {
    let app = test_app();
    let resp = send(&app, empty_request("GET", "/api/users"));
    assert_eq!(resp.status(), 200);

    let users = body_json(resp);
    assert_eq!(users.as_array().map(Vec::len), Some(2));
    assert_eq!(users[0]["name"], "Husband");
    assert_eq!(users[1]["email"], "wife@example.com");
}

#[test]
fn create_update_delete_user() {
    let app = test_app();

    let resp = send(
        &app,
        json_request("POST", "/api/users", json!({ "name": "  Kid ", "email": "" })),
    );
    assert_eq!(resp.status(), 200);
    let created = body_json(resp);
    assert_eq!(created["name"], "Kid");
    assert_eq!(created["email"], serde_json::Value::Null);
    let id = created["id"].as_i64().unwrap();

    let resp = send(
        &app,
        json_request(
            "PUT",
            &format!("/api/users/{id}"),
            json!({ "name": "Teen", "email": "Teen@Example.com" }),
        ),
    );
    assert_eq!(resp.status(), 200);
    assert_eq!(body_json(resp)["email"], "teen@example.com");

    let resp = send(&app, empty_request("DELETE", &format!("/api/users/{id}")));
    assert_eq!(resp.status(), 200);
    assert_eq!(body_json(resp), json!({ "success": true }));

    let resp = send(&app, empty_request("DELETE", &format!("/api/users/{id}")));
    assert_eq!(resp.status(), 404);
}

#[test]
fn blank_user_name_is_rejected() {
    let app = test_app();
    let resp = send(&app, json_request("POST", "/api/users", json!({ "name": "   " })));
    assert_eq!(resp.status(), 400);
    assert_eq!(body_json(resp), json!({ "error": "name is required" }));
}

#[test]
fn stats_include_users_without_completions() {
    let app = test_app();
    let stats = body_json(send(&app, empty_request("GET", "/api/stats")));
    let counts: Vec<i64> = stats
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["completion_count"].as_i64().unwrap())
        .collect();
    assert_eq!(counts, vec![0, 0]);
}
