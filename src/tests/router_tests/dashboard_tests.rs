// src/tests/router_tests/dashboard_tests.rs
use crate::tests::utils::{add_chore, body_string, empty_request, form_request, send, test_app};
use serde_json::json;

#[test]
fn dashboard_lists_chores_with_status() {
    let app = test_app();
    add_chore(&app, json!({ "name": "Dishes", "frequency": "daily" }));
    add_chore(
        &app,
        json!({ "name": "Gutters", "frequency": "yearly", "start_date": "2024-06-18" }),
    );

    let resp = send(&app, empty_request("GET", "/"));
    assert_eq!(resp.status(), 200);
    let html = body_string(resp);

    assert!(html.contains("Household Chores"));
    assert!(html.contains("Saturday, June 15"));
    assert!(html.contains(r#"<span class="badge due-today">Due Today</span>"#));
    assert!(html.contains(r#"<span class="badge upcoming">Upcoming</span>"#));
    assert!(html.contains("Starts: Jun 18, 2024"));
    assert!(html.contains("starts in 3d"));
    assert!(html.contains(r#"data-feed-version="2""#));
}

#[test]
fn dashboard_form_completion_redirects_back_to_user() {
    let app = test_app();
    let id = add_chore(&app, json!({ "name": "Dishes", "frequency": "daily" }));

    let resp = send(&app, form_request(&format!("/chores/{id}/complete"), "user_id=2"));
    assert_eq!(resp.status(), 302);
    let location = resp
        .headers()
        .get("Location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    assert_eq!(location, "/?user=2");

    let html = body_string(send(&app, empty_request("GET", "/?user=2")));
    assert!(html.contains(r#"<span class="badge completed">Completed</span>"#));
    assert!(html.contains("No chores due today!"));
}

#[test]
fn unknown_page_renders_html_error() {
    let app = test_app();
    let resp = send(&app, empty_request("GET", "/nope"));
    assert_eq!(resp.status(), 404);
    assert!(body_string(resp).contains("Not Found"));
}
